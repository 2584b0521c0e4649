//! Core of the infinite tile explorer: precision camera tracking, the viewport tile cache,
//! drag selection and zoom. Nothing in here touches the browser; the yew shell in `main.rs`
//! feeds [`model::FrameInput`] snapshots into [`state::Explorer`] and draws what it returns.

pub mod config;
pub mod model;
pub mod state;

pub use config::{ConfigError, ExplorerConfig};
pub use state::Explorer;
