use num_bigint::BigInt;
use num_traits::FromPrimitive;

use super::position::PrecisionPosition;
use crate::model::TileCoord;

// Camera: a precision position plus a pan speed in tiles per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: PrecisionPosition,
    pub speed: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: PrecisionPosition::default(),
            speed: 0.125,
        }
    }
}

impl Camera {
    pub fn new(x: f64, y: f64, speed: f64) -> Self {
        Self {
            position: PrecisionPosition::new(x, y),
            speed,
        }
    }

    /// Move by `(dx, dy) * multiplier`; `None` uses the camera speed.
    pub fn move_by(&mut self, dx: f64, dy: f64, multiplier: Option<f64>) {
        let multiplier = multiplier.unwrap_or(self.speed);
        self.position.move_by(dx, dy, multiplier);
    }

    /// Pan for `ticks` fixed ticks in direction `(dx, dy)`, each in `-1..=1`.
    /// Returns whether the camera moved.
    pub fn pan(&mut self, dx: i8, dy: i8, ticks: u32) -> bool {
        if ticks == 0 || (dx == 0 && dy == 0) {
            return false;
        }
        self.move_by(dx as f64, dy as f64, Some(self.speed * ticks as f64));
        true
    }

    /// Tile under a window pixel, for tiles `tile_size` pixels wide.
    pub fn tile_at(&self, pixel: (f64, f64), tile_size: f64) -> TileCoord {
        let axis_tile = |whole: &BigInt, frac: f64, px: f64| -> BigInt {
            let offset = (frac + px / tile_size).floor();
            whole + BigInt::from_f64(offset).unwrap_or_default()
        };
        TileCoord {
            x: axis_tile(self.position.x.whole(), self.position.x.frac(), pixel.0),
            y: axis_tile(self.position.y.whole(), self.position.y.frac(), pixel.1),
        }
    }
}
