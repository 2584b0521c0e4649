//! Viewport-local cache of generated tiles.
//!
//! Terrain and colour for a coordinate are generated once, when it enters the visible rectangle,
//! and kept until it leaves or a caller evicts it. Only the screen rectangle is refreshed on
//! every recalculation. Callers that change a coordinate's marker state (tagged / pending) must
//! evict it first, otherwise its colour stays stale.

use std::collections::{HashMap, HashSet};

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::camera::Camera;
use super::terrain::{TerrainOracle, base_colour};
use crate::model::{RenderRecord, Rgb, ScreenRect, TileCoord, WindowSize};

pub const PENDING_COLOUR: Rgb = Rgb::new(255, 255, 0);
pub const TAGGED_COLOUR: Rgb = Rgb::new(0, 255, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Pending,
    Tagged,
}

impl Marker {
    pub fn colour(self) -> Rgb {
        match self {
            Marker::Pending => PENDING_COLOUR,
            Marker::Tagged => TAGGED_COLOUR,
        }
    }
}

/// Fifteen parts `marker`, one part `base`.
pub fn mix_colour(base: Rgb, marker: Rgb) -> Rgb {
    let b = base.channels();
    let m = marker.channels();
    let mix = |i: usize| ((b[i] as f64 + m[i] as f64 * 15.0) / 16.0).round() as u8;
    Rgb::from_channels([mix(0), mix(1), mix(2)])
}

/// Add `jitter` to every channel, clamped to `0..=255`.
pub fn jitter_colour(base: Rgb, jitter: i32) -> Rgb {
    let shift = |c: u8| (c as i32 + jitter).clamp(0, 255) as u8;
    Rgb::from_channels(base.channels().map(shift))
}

/// Selection state as the cache needs to see it.
#[derive(Clone, Copy, Debug)]
pub struct MarkerSets<'a> {
    pub tagged: &'a HashSet<TileCoord>,
    pub pending: &'a HashSet<TileCoord>,
    /// True while a tagging drag is in progress.
    pub pending_active: bool,
}

impl MarkerSets<'_> {
    /// A pending coordinate shows the outcome of the drag: highlighted when the drag tags,
    /// plain when it untags.
    pub fn marker_for(&self, coord: &TileCoord) -> Option<Marker> {
        let pending = self.pending.contains(coord);
        if self.pending_active && pending {
            Some(Marker::Pending)
        } else if !pending && self.tagged.contains(coord) {
            Some(Marker::Tagged)
        } else {
            None
        }
    }
}

/// Half-open tile rectangle `[min, max)` per axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleBounds {
    pub min_x: BigInt,
    pub min_y: BigInt,
    pub max_x: BigInt,
    pub max_y: BigInt,
}

impl VisibleBounds {
    pub fn around(camera: &Camera, tile_size: u32, window: WindowSize, margin: u32) -> Self {
        let tile_size = tile_size.max(1);
        let span_x = window.width.div_ceil(tile_size);
        let span_y = window.height.div_ceil(tile_size);
        let whole_x = camera.position.x.whole();
        let whole_y = camera.position.y.whole();
        Self {
            min_x: whole_x - margin + 1,
            min_y: whole_y - margin + 1,
            max_x: whole_x + span_x + margin,
            max_y: whole_y + span_y + margin,
        }
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.min_x <= coord.x && coord.x < self.max_x && self.min_y <= coord.y && coord.y < self.max_y
    }

    pub fn width(&self) -> u64 {
        (&self.max_x - &self.min_x).to_u64().unwrap_or(0)
    }

    pub fn height(&self) -> u64 {
        (&self.max_y - &self.min_y).to_u64().unwrap_or(0)
    }

    /// Coordinates in column-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let height = self.height();
        (0..self.width()).flat_map(move |dx| {
            let x = &self.min_x + dx;
            (0..height).map(move |dy| TileCoord {
                x: x.clone(),
                y: &self.min_y + dy,
            })
        })
    }
}

/// Counts from one recalculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecalcStats {
    pub evicted: usize,
    pub generated: usize,
    pub reused: usize,
}

#[derive(Debug, Default)]
pub struct TileCache {
    records: HashMap<TileCoord, RenderRecord>,
    visible: Vec<TileCoord>,
    bounds: Option<VisibleBounds>,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, coord: &TileCoord) -> Option<&RenderRecord> {
        self.records.get(coord)
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.records.contains_key(coord)
    }

    pub fn bounds(&self) -> Option<&VisibleBounds> {
        self.bounds.as_ref()
    }

    pub fn visible_coords(&self) -> &[TileCoord] {
        &self.visible
    }

    /// Visible tiles in draw order.
    pub fn visible(&self) -> impl Iterator<Item = (&TileCoord, &RenderRecord)> + '_ {
        self.visible
            .iter()
            .filter_map(|coord| self.records.get(coord).map(|record| (coord, record)))
    }

    /// Drop a cached record. Absent coordinates are ignored.
    pub fn evict(&mut self, coord: &TileCoord) -> bool {
        self.records.remove(coord).is_some()
    }

    pub fn evict_all<'a>(&mut self, coords: impl IntoIterator<Item = &'a TileCoord>) -> usize {
        coords.into_iter().filter(|coord| self.evict(coord)).count()
    }

    pub fn recalculate(
        &mut self,
        camera: &Camera,
        tile_size: u32,
        window: WindowSize,
        margin: u32,
        noise_seed: u32,
        markers: MarkerSets<'_>,
        oracle: &dyn TerrainOracle,
    ) -> RecalcStats {
        let bounds = VisibleBounds::around(camera, tile_size, window, margin);
        let mut stats = RecalcStats::default();

        let before = self.records.len();
        self.records.retain(|coord, _| bounds.contains(coord));
        stats.evicted = before - self.records.len();

        let size = tile_size as f64;
        let whole_x = camera.position.x.whole();
        let whole_y = camera.position.y.whole();
        let frac_x = camera.position.x.frac();
        let frac_y = camera.position.y.frac();

        let mut visible = Vec::with_capacity((bounds.width() * bounds.height()) as usize);
        for coord in bounds.coords() {
            let rect = ScreenRect {
                x: (offset(&coord.x, whole_x) - frac_x) * size,
                y: (offset(&coord.y, whole_y) - frac_y) * size,
                size,
            };
            match self.records.get_mut(&coord) {
                Some(record) => {
                    record.rect = rect;
                    stats.reused += 1;
                }
                None => {
                    let terrain = oracle.classify(&coord);
                    let jitter = oracle.jitter(&coord, noise_seed);
                    let mut colour = jitter_colour(base_colour(terrain), jitter);
                    if let Some(marker) = markers.marker_for(&coord) {
                        colour = mix_colour(colour, marker.colour());
                    }
                    self.records.insert(
                        coord.clone(),
                        RenderRecord {
                            terrain,
                            colour,
                            rect,
                        },
                    );
                    stats.generated += 1;
                }
            }
            visible.push(coord);
        }

        self.visible = visible;
        self.bounds = Some(bounds);
        log::debug!(
            "recalculated {} tiles: {} generated, {} reused, {} evicted",
            self.visible.len(),
            stats.generated,
            stats.reused,
            stats.evicted
        );
        stats
    }
}

fn offset(coord: &BigInt, whole: &BigInt) -> f64 {
    (coord - whole).to_f64().unwrap_or(0.0)
}
