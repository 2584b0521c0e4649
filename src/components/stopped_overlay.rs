use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StoppedOverlayProps {
    pub show: bool,
    pub position: String,
    pub tagged: usize,
}

#[function_component]
pub fn StoppedOverlay(props: &StoppedOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #58a6ff; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#58a6ff;">{"Explorer stopped"}</h2>
            <p style="margin:4px 0;">{ format!("Last position: {}", props.position) }</p>
            <p style="margin:4px 0;">{ format!("Tiles tagged: {}", props.tagged) }</p>
            <p style="margin:12px 0 0 0; font-size:12px; color:#8b949e;">{"Reload the page to explore again."}</p>
        </div>
    }
}
