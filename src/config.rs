//! Tuning constants for the explorer.
//!
//! Every value has a tuned default. A JSON override can be
//! supplied (the browser shell reads one from `localStorage`); missing fields fall back to the
//! defaults.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Window size used until the first resize event arrives.
    pub window_width: u32,
    pub window_height: u32,
    /// Tile edge in pixels at startup.
    pub tile_size: u32,
    pub min_tile_size: u32,
    pub max_tile_size: u32,
    /// Extra ring of off-screen tiles kept cached around the window.
    pub margin: u32,
    /// Colour jitter amplitude; also seeds the per-tile hash.
    pub noise_seed: u32,
    /// Tiles per tick per unit of pan input.
    pub camera_speed: f64,
    pub ticks_per_second: u32,
    /// Feature size of the terrain noise, in tiles.
    pub terrain_scale: u32,
    /// Fraction of the window by which cursor positions near an edge are pushed outward
    /// while zooming.
    pub zoom_edge_extension: f64,
    /// Camera nudge multiplier when a zoom-out hits `min_tile_size`.
    pub zoomed_out_nudge: f64,
    /// Camera nudge multiplier when a zoom-in hits `max_tile_size`.
    pub zoomed_in_nudge: f64,
    pub log_level: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            tile_size: 20,
            min_tile_size: 16,
            max_tile_size: 128,
            margin: 2,
            noise_seed: 15,
            camera_speed: 0.125,
            ticks_per_second: 120,
            terrain_scale: 24,
            zoom_edge_extension: 0.1,
            zoomed_out_nudge: 4.0,
            zoomed_in_nudge: -0.5,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse explorer config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid explorer config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl ExplorerConfig {
    /// Parse a JSON override and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(invalid("window_width", "window dimensions must be non-zero"));
        }
        if self.min_tile_size == 0 {
            return Err(invalid("min_tile_size", "must be at least 1"));
        }
        if self.min_tile_size > self.max_tile_size {
            return Err(invalid(
                "max_tile_size",
                format!(
                    "{} is smaller than min_tile_size {}",
                    self.max_tile_size, self.min_tile_size
                ),
            ));
        }
        if !(self.min_tile_size..=self.max_tile_size).contains(&self.tile_size) {
            return Err(invalid(
                "tile_size",
                format!(
                    "{} is outside {}..={}",
                    self.tile_size, self.min_tile_size, self.max_tile_size
                ),
            ));
        }
        if self.noise_seed > 255 {
            return Err(invalid(
                "noise_seed",
                format!("{} exceeds the 255 per-channel jitter limit", self.noise_seed),
            ));
        }
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be at least 1"));
        }
        if self.terrain_scale < 2 {
            return Err(invalid("terrain_scale", "must be at least 2"));
        }
        for (field, value) in [
            ("camera_speed", self.camera_speed),
            ("zoom_edge_extension", self.zoom_edge_extension),
            ("zoomed_out_nudge", self.zoomed_out_nudge),
            ("zoomed_in_nudge", self.zoomed_in_nudge),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(invalid(
                "log_level",
                format!("unknown level `{}`", self.log_level),
            ));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExplorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_size, 20);
        assert_eq!(config.margin, 2);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = ExplorerConfig::from_json(r#"{ "noise_seed": 4, "log_level": "debug" }"#)
            .expect("override parses");
        assert_eq!(config.noise_seed, 4);
        assert_eq!(config.max_tile_size, 128);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ExplorerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = ExplorerConfig::from_json(r#"{ "min_tile_size": 64, "max_tile_size": 32 }"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "max_tile_size"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn initial_tile_size_must_fit_bounds() {
        let config = ExplorerConfig {
            tile_size: 200,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "tile_size",
                ..
            })
        ));
    }

    #[test]
    fn oversized_noise_seed_is_rejected() {
        let err = ExplorerConfig::from_json(r#"{ "noise_seed": 4000000000 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "noise_seed",
                ..
            }
        ));
        let max = ExplorerConfig {
            noise_seed: 255,
            ..Default::default()
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn json_round_trip_preserves_tuning() {
        let config = ExplorerConfig {
            zoomed_in_nudge: -0.75,
            ..Default::default()
        };
        let raw = config.to_json().unwrap();
        assert_eq!(ExplorerConfig::from_json(&raw).unwrap(), config);
    }
}
