use std::path::PathBuf;

use clap::Parser;

use vx_core::config::{CellMode, TrainerConfig};
use vx_core::mode::Mode;

/// voxmeter — vocal loudness trainer for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Training mode: whisper, normal, speaker.
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Target tick rate (15 to 120).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Glyph backend: auto, braille, block.
    #[arg(long)]
    pub cells: Option<CellMode>,

    /// Disable color output.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut TrainerConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(cells) = self.cells {
            config.cells = cells;
        }
        if self.no_color {
            config.color_enabled = false;
        }
        config.clamp_all();
    }
}
