//! Top-level controller. Owns the camera, tile cache, selection and zoom, and runs them in a
//! fixed order once per frame: pan, selection, zoom, then a cache recalculation if any of them
//! changed something.

use crate::config::ExplorerConfig;
use crate::model::{
    FrameInput, FrameOutcome, InputEvent, Key, MouseButton, RenderRecord, Terrain, TileCoord,
    WindowSize,
};

use super::camera::Camera;
use super::selection::{Selection, SelectionPhase};
use super::terrain::{NoiseTerrain, TerrainOracle};
use super::tile_cache::{RecalcStats, TileCache};
use super::zoom::ZoomController;

/// What the shell shows about the tile under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct TileInfo {
    pub coord: TileCoord,
    pub terrain: Terrain,
    pub tagged: bool,
}

pub struct Explorer {
    config: ExplorerConfig,
    camera: Camera,
    tile_size: u32,
    window: WindowSize,
    cache: TileCache,
    selection: Selection,
    zoom: ZoomController,
    oracle: Box<dyn TerrainOracle>,
    last_stats: RecalcStats,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        let oracle = Box::new(NoiseTerrain::new(config.terrain_scale));
        Self::with_oracle(config, oracle)
    }

    pub fn with_oracle(config: ExplorerConfig, oracle: Box<dyn TerrainOracle>) -> Self {
        let mut explorer = Self {
            camera: Camera::new(0.0, 0.0, config.camera_speed),
            tile_size: config.tile_size,
            window: WindowSize::new(config.window_width, config.window_height),
            cache: TileCache::new(),
            selection: Selection::new(),
            zoom: ZoomController::from_config(&config),
            oracle,
            last_stats: RecalcStats::default(),
            config,
        };
        explorer.recalculate();
        explorer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    pub fn tagged_count(&self) -> usize {
        self.selection.tagged().len()
    }

    pub fn last_stats(&self) -> RecalcStats {
        self.last_stats
    }

    /// Full-precision camera position, `"x, y"`.
    pub fn position_string(&self) -> String {
        self.camera.position.to_string()
    }

    /// Window title: measured frame rate followed by the camera position.
    pub fn title(&self, fps: u32) -> String {
        format!("{} {}", fps, self.position_string())
    }

    /// Visible tiles in draw order.
    pub fn visible_records(&self) -> impl Iterator<Item = (&TileCoord, &RenderRecord)> + '_ {
        self.cache.visible()
    }

    pub fn tile_at(&self, pixel: (f64, f64)) -> TileCoord {
        self.camera.tile_at(pixel, self.tile_size as f64)
    }

    pub fn tile_info(&self, pixel: (f64, f64)) -> TileInfo {
        let coord = self.tile_at(pixel);
        let terrain = match self.cache.get(&coord) {
            Some(record) => record.terrain,
            None => self.oracle.classify(&coord),
        };
        let tagged = self.selection.is_tagged(&coord);
        TileInfo {
            coord,
            terrain,
            tagged,
        }
    }

    pub fn recalculate(&mut self) -> RecalcStats {
        self.last_stats = self.cache.recalculate(
            &self.camera,
            self.tile_size,
            self.window,
            self.config.margin,
            self.config.noise_seed,
            self.selection.markers(),
            self.oracle.as_ref(),
        );
        self.last_stats
    }

    pub fn update(&mut self, input: &FrameInput) -> FrameOutcome {
        if input.is_pressed(Key::Quit) {
            return FrameOutcome::Quit;
        }

        let mut dirty = false;
        let mut press = None;
        let mut scroll = None;
        for event in &input.events {
            match event {
                InputEvent::Quit => return FrameOutcome::Quit,
                InputEvent::Resize { width, height } => {
                    self.window = WindowSize::new(*width, *height);
                    log::debug!("window resized to {width}x{height}");
                    dirty = true;
                }
                InputEvent::MouseDown {
                    button: MouseButton::Primary,
                    pos,
                } => press = Some(*pos),
                InputEvent::MouseDown { .. } => {}
                InputEvent::Scroll { delta, pos } if *delta != 0 => {
                    scroll = Some((delta.signum(), pos.or(input.mouse_pos)));
                }
                InputEvent::Scroll { .. } => {}
            }
        }

        dirty |= self.pan(input);
        dirty |= self.update_selection(input, press);
        if let Some((direction, cursor)) = scroll {
            self.apply_zoom(direction, cursor);
            dirty = true;
        }

        if input.is_pressed(Key::PrintPosition) {
            log::info!("camera at {}", self.position_string());
        }

        if dirty {
            self.recalculate();
        }
        FrameOutcome::Running { redraw: dirty }
    }

    fn pan(&mut self, input: &FrameInput) -> bool {
        let axis = |neg: Key, pos: Key| -> i8 {
            input.is_pressed(pos) as i8 - input.is_pressed(neg) as i8
        };
        let dx = axis(Key::PanLeft, Key::PanRight);
        let dy = axis(Key::PanUp, Key::PanDown);
        self.camera.pan(dx, dy, input.ticks)
    }

    fn update_selection(&mut self, input: &FrameInput, press: Option<(f64, f64)>) -> bool {
        let mut changed = false;
        if let Some(pos) = press {
            if self.selection.is_dragging() {
                // Button went up and down again between two frames; commit the first drag.
                self.selection.release(&mut self.cache);
                changed = true;
            }
            let tile = self.tile_at(pos);
            changed |= self.selection.press(tile, &mut self.cache);
        }
        if !self.selection.is_dragging() {
            return changed;
        }
        if !input.primary_down {
            self.selection.release(&mut self.cache);
            return true;
        }
        if let Some(pos) = input.mouse_pos {
            let tile = self.tile_at(pos);
            changed |= self.selection.drag_to(&tile, &mut self.cache);
        }
        changed
    }

    pub fn apply_zoom(&mut self, direction: i32, cursor: Option<(f64, f64)>) {
        let step = self
            .zoom
            .apply(direction, cursor, self.tile_size, self.window);
        if step.tile_size != self.tile_size {
            log::debug!("tile size {} -> {}", self.tile_size, step.tile_size);
        }
        self.tile_size = step.tile_size;
        let (dx, dy) = step.camera_shift;
        self.camera.move_by(dx, dy, Some(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat;

    impl TerrainOracle for Flat {
        fn classify(&self, _coord: &TileCoord) -> Terrain {
            Terrain::Sand
        }

        fn jitter(&self, _coord: &TileCoord, _seed: u32) -> i32 {
            0
        }
    }

    fn explorer() -> Explorer {
        Explorer::with_oracle(ExplorerConfig::default(), Box::new(Flat))
    }

    #[test]
    fn starts_with_a_full_view() {
        let explorer = explorer();
        // 1280/20 + 720/20 tiles plus the margin ring.
        let bounds = explorer.cache().bounds().unwrap();
        assert_eq!(bounds.width(), 64 + 2 + 1);
        assert_eq!(bounds.height(), 36 + 2 + 1);
        assert_eq!(explorer.visible_records().count(), 67 * 39);
        assert_eq!(explorer.position_string(), "0.0, 0.0");
    }

    #[test]
    fn idle_frame_does_not_redraw() {
        let mut explorer = explorer();
        let outcome = explorer.update(&FrameInput {
            ticks: 3,
            ..Default::default()
        });
        assert_eq!(outcome, FrameOutcome::Running { redraw: false });
    }

    #[test]
    fn escape_quits() {
        let mut explorer = explorer();
        let mut input = FrameInput::default();
        input.keys_pressed.insert(Key::Quit);
        assert_eq!(explorer.update(&input), FrameOutcome::Quit);
        let input = FrameInput {
            events: vec![InputEvent::Quit],
            ..Default::default()
        };
        assert_eq!(explorer.update(&input), FrameOutcome::Quit);
    }

    #[test]
    fn tile_info_reports_tag_state() {
        let mut explorer = explorer();
        let press = FrameInput {
            events: vec![InputEvent::MouseDown {
                button: MouseButton::Primary,
                pos: (45.0, 5.0),
            }],
            mouse_pos: Some((45.0, 5.0)),
            primary_down: true,
            ..Default::default()
        };
        explorer.update(&press);
        explorer.update(&FrameInput {
            mouse_pos: Some((45.0, 5.0)),
            ..Default::default()
        });
        let info = explorer.tile_info((45.0, 5.0));
        assert_eq!(info.coord, TileCoord::new(2, 0));
        assert_eq!(info.terrain, Terrain::Sand);
        assert!(info.tagged);
        assert_eq!(explorer.title(59), "59 0.0, 0.0");
    }
}
