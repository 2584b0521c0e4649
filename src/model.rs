//! Core data models for the tile explorer.
//! Plain data shared between the core state machines and the browser shell.

use std::collections::HashSet;
use std::fmt;

use num_bigint::BigInt;

/// Identity of one grid cell. Unbounded in both axes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: BigInt,
    pub y: BigInt,
}

impl TileCoord {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Water,
    Sand,
    Grass,
    Forest,
    Hill,
    Mountain,
    Snow,
}

impl Terrain {
    pub const ALL: [Terrain; 7] = [
        Terrain::Water,
        Terrain::Sand,
        Terrain::Grass,
        Terrain::Forest,
        Terrain::Hill,
        Terrain::Mountain,
        Terrain::Snow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Terrain::Water => "Water",
            Terrain::Sand => "Sand",
            Terrain::Grass => "Grass",
            Terrain::Forest => "Forest",
            Terrain::Hill => "Hill",
            Terrain::Mountain => "Mountain",
            Terrain::Snow => "Snow",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, for canvas fill styles.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pixel-space square a tile is drawn into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Cached per-tile visual data. `terrain` and `colour` are computed once when the tile enters
/// the view; `rect` follows the camera every recalculation.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRecord {
    pub terrain: Terrain,
    pub colour: Rgb,
    pub rect: ScreenRect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn centre(self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    Quit,
    PrintPosition,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to an explorer key.
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::PanUp),
            "KeyS" | "ArrowDown" => Some(Key::PanDown),
            "KeyA" | "ArrowLeft" => Some(Key::PanLeft),
            "KeyD" | "ArrowRight" => Some(Key::PanRight),
            "Escape" => Some(Key::Quit),
            "KeyC" => Some(Key::PrintPosition),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Primary,
            1 => MouseButton::Middle,
            2 => MouseButton::Secondary,
            other => MouseButton::Other(other),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    Resize {
        width: u32,
        height: u32,
    },
    MouseDown {
        button: MouseButton,
        pos: (f64, f64),
    },
    /// `delta` > 0 zooms in. `pos` anchors the zoom; `None` uses the current mouse position.
    Scroll {
        delta: i32,
        pos: Option<(f64, f64)>,
    },
}

/// Everything the core reads from the outside world for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys_pressed: HashSet<Key>,
    pub events: Vec<InputEvent>,
    pub mouse_pos: Option<(f64, f64)>,
    pub primary_down: bool,
    /// Fixed ticks elapsed since the previous frame.
    pub ticks: u32,
}

impl FrameInput {
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Running { redraw: bool },
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_codes_map_to_keys() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::PanUp));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::PanRight));
        assert_eq!(Key::from_code("Escape"), Some(Key::Quit));
        assert_eq!(Key::from_code("KeyC"), Some(Key::PrintPosition));
        assert_eq!(Key::from_code("KeyQ"), None);
    }

    #[test]
    fn css_colour_is_zero_padded_hex() {
        assert_eq!(Rgb::new(0, 128, 255).to_css(), "#0080ff");
    }

    #[test]
    fn tile_coord_displays_as_pair() {
        assert_eq!(TileCoord::new(-3, 12).to_string(), "(-3, 12)");
    }
}
