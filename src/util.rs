// Browser-side helpers: console logging and persisted configuration.

use log::{Level, LevelFilter, Log, Metadata, Record};
use tile_explorer::ExplorerConfig;
use wasm_bindgen::JsValue;

pub const CONFIG_KEY: &str = "te_config";

/// `log` sink that writes to the browser console at the matching level.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once; later calls only adjust the level.
pub fn init_logging(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Config override from local storage, or defaults when absent or unreadable.
pub fn load_config() -> ExplorerConfig {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(CONFIG_KEY).ok().flatten());
    let Some(raw) = raw else {
        return ExplorerConfig::default();
    };
    match ExplorerConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring stored config `{CONFIG_KEY}`: {err}");
            ExplorerConfig::default()
        }
    }
}

/// Current browser window size in CSS pixels.
pub fn window_size(window: &web_sys::Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback).max(0.0) as u32
    };
    (
        dim(window.inner_width(), 1280.0),
        dim(window.inner_height(), 720.0),
    )
}
