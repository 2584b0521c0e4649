pub mod app;
pub mod camera_controls;
pub mod explorer_view;
pub mod legend;
pub mod legend_panel;
pub mod status_panel;
pub mod stopped_overlay;
pub mod tile_info_panel;
