//! Tile-size zoom that keeps the world point under the cursor in place.

use crate::config::ExplorerConfig;
use crate::model::WindowSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    pub min_size: u32,
    pub max_size: u32,
    /// Fraction of the window by which cursor positions are pushed toward the nearest edge.
    pub edge_extension: f64,
    /// Nudge multiplier when already at `min_size`.
    pub zoomed_out_nudge: f64,
    /// Nudge multiplier when already at `max_size`.
    pub zoomed_in_nudge: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::from_config(&ExplorerConfig::default())
    }
}

/// Result of one zoom step: the new tile size and how far to move the camera, in tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep {
    pub tile_size: u32,
    pub camera_shift: (f64, f64),
}

/// Remap a cursor coordinate so positions near an edge count as slightly beyond it.
pub fn extend_edge(pos: f64, extent: f64, amount: f64) -> f64 {
    let rel = pos / extent;
    if rel < 0.5 {
        pos - amount * (1.0 - rel * 2.0) * extent
    } else if rel > 0.5 {
        pos + amount * (rel - 0.5) * 2.0 * extent
    } else {
        pos
    }
}

impl ZoomController {
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            min_size: config.min_tile_size,
            max_size: config.max_tile_size,
            edge_extension: config.zoom_edge_extension,
            zoomed_out_nudge: config.zoomed_out_nudge,
            zoomed_in_nudge: config.zoomed_in_nudge,
        }
    }

    pub fn step_size(tile_size: u32) -> u32 {
        tile_size / 10 + 1
    }

    /// Tile size after one step in `direction` (+1 in, -1 out), clamped to the bounds.
    pub fn next_size(&self, direction: i32, tile_size: u32) -> u32 {
        let step = Self::step_size(tile_size) as i64;
        let size = tile_size as i64 + step * direction.signum() as i64;
        size.clamp(self.min_size as i64, self.max_size as i64) as u32
    }

    pub fn apply(
        &self,
        direction: i32,
        cursor: Option<(f64, f64)>,
        tile_size: u32,
        window: WindowSize,
    ) -> ZoomStep {
        let new_size = self.next_size(direction, tile_size);
        let mut step = ZoomStep {
            tile_size: new_size,
            camera_shift: (0.0, 0.0),
        };
        if window.width == 0 || window.height == 0 || tile_size == 0 {
            return step;
        }
        let width = window.width as f64;
        let height = window.height as f64;
        let (cursor_x, cursor_y) = cursor.unwrap_or_else(|| window.centre());

        if new_size == tile_size {
            let multiplier = if new_size == self.min_size {
                self.zoomed_out_nudge
            } else if new_size == self.max_size {
                self.zoomed_in_nudge
            } else {
                0.0
            };
            step.camera_shift = (
                -(cursor_x / width - 0.5) * multiplier,
                -(cursor_y / height - 0.5) * multiplier,
            );
            return step;
        }

        let old_span = (width / tile_size as f64, height / tile_size as f64);
        let new_span = (width / new_size as f64, height / new_size as f64);
        let anchor_x = extend_edge(cursor_x, width, self.edge_extension);
        let anchor_y = extend_edge(cursor_y, height, self.edge_extension);
        step.camera_shift = (
            (old_span.0 - new_span.0) * anchor_x / width,
            (old_span.1 - new_span.1) * anchor_y / height,
        );
        step
    }
}
