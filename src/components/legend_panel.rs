use super::legend::LegendRow;
use tile_explorer::model::Terrain;
use tile_explorer::state::terrain::base_colour;
use tile_explorer::state::tile_cache::{PENDING_COLOUR, TAGGED_COLOUR};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    /// Terrain under the cursor, highlighted in the list.
    #[prop_or_default]
    pub hover: Option<Terrain>,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:150px; font-size:13px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { for Terrain::ALL.iter().map(|&t| html!{
            <LegendRow color={base_colour(t).to_css()} label={t.label()} highlight={props.hover == Some(t)}/>
        }) }
        <div style="border-top:1px solid #30363d; margin:6px 0;"></div>
        <LegendRow color={PENDING_COLOUR.to_css()} label="Pending"/>
        <LegendRow color={TAGGED_COLOUR.to_css()} label="Tagged"/>
        <div style="font-size:11px; color:#8b949e; margin-top:6px;">{"WASD pan · drag to tag · wheel zoom · C log · Esc quit"}</div>
    </div>}
}
