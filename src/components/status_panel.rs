use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusPanelProps {
    pub fps: u32,
    pub position: String,
    pub tile_size: u32,
    pub tagged: usize,
    pub mode: &'static str,
}

#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500; color:#8b949e;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:6px; font-size:13px;">
            <div style={row_style}>
                <span style={label_style}>{"FPS"}</span>
                <span style={value_style}>{ props.fps }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Camera"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ props.position.clone() }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Tile size"}</span>
                <span style={value_style}>{ format!("{}px", props.tile_size) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Tagged"}</span>
                <span style={format!("{} color:#39c5cf;", value_style)}>{ props.tagged }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Selection"}</span>
                <span style={value_style}>{ props.mode }</span>
            </div>
        </div>
    }
}
