pub mod camera;
pub mod explorer;
pub mod frame_clock;
pub mod input;
pub mod position;
pub mod selection;
pub mod terrain;
pub mod tile_cache;
pub mod zoom;

pub use camera::Camera;
pub use explorer::{Explorer, TileInfo};
pub use frame_clock::{FrameClock, FrameTiming};
pub use input::InputCollector;
pub use position::{PrecisionAxis, PrecisionPosition};
pub use selection::{DragMode, Selection, SelectionPhase};
pub use terrain::{NoiseTerrain, TerrainOracle};
pub use tile_cache::{MarkerSets, RecalcStats, TileCache};
pub use zoom::ZoomController;
