use tile_explorer::model::Terrain;
use tile_explorer::state::TileInfo;
use tile_explorer::state::terrain::base_colour;
use tile_explorer::state::tile_cache::TAGGED_COLOUR;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TileInfoPanelProps {
    pub info: Option<TileInfo>,
}

fn terrain_blurb(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Water => "Open water",
        Terrain::Sand => "Shoreline sand",
        Terrain::Grass => "Lowland grass",
        Terrain::Forest => "Dense forest",
        Terrain::Hill => "Rolling hills",
        Terrain::Mountain => "Bare rock",
        Terrain::Snow => "Snow-capped peak",
    }
}

#[function_component]
pub fn TileInfoPanel(props: &TileInfoPanelProps) -> Html {
    let Some(info) = &props.info else {
        return html! {};
    };

    let panel_style = "position:absolute; right:12px; top:12px; \
        background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
        padding:12px 16px; min-width:220px; max-width:320px; font-size:13px; color:#c9d1d9;";
    let header_style = "font-weight:600; font-size:15px; margin-bottom:8px; display:flex; align-items:center; gap:8px;";
    let stat_row_style =
        "display:flex; justify-content:space-between; gap:12px; margin:4px 0; font-size:12px;";
    let stat_label_style = "color:#8b949e;";
    let stat_value_style = "font-weight:500; overflow-wrap:anywhere; text-align:right;";

    let swatch = format!(
        "display:inline-block; width:14px; height:14px; background:{}; border:1px solid #30363d; border-radius:2px;",
        base_colour(info.terrain).to_css()
    );
    let tagged = if info.tagged {
        html! { <span style={format!("{} color:{};", stat_value_style, TAGGED_COLOUR.to_css())}>{"Yes"}</span> }
    } else {
        html! { <span style={stat_value_style}>{"No"}</span> }
    };

    html! {
        <div style={panel_style}>
            <div style={header_style}>
                <span style={swatch}></span>
                <span>{ info.terrain.label() }</span>
            </div>
            <div style="color:#8b949e; font-size:12px; margin-bottom:6px;">{ terrain_blurb(info.terrain) }</div>
            <div style={stat_row_style}>
                <span style={stat_label_style}>{"Tile"}</span>
                <span style={stat_value_style}>{ info.coord.to_string() }</span>
            </div>
            <div style={stat_row_style}>
                <span style={stat_label_style}>{"Tagged"}</span>
                { tagged }
            </div>
        </div>
    }
}
