use super::explorer_view::ExplorerView;
use crate::util::load_config;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Stored override is read once; the explorer keeps its own copy after mount.
    let config = use_memo((), |_| {
        let config = load_config();
        log::set_max_level(config.level_filter());
        log::info!("explorer config: {config:?}");
        config
    });

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <ExplorerView config={(*config).clone()} />
        </div>
    }
}
