// Gauge and spectrum-bar rasterization for the voxmeter TUI.

pub mod cells;
pub mod fps;
pub mod gauge;
pub mod spectrum;
pub mod surface;
pub mod ui;
