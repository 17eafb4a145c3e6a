use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::mode::Mode;

/// Terminal cell encoding for the rasterized widgets.
///
/// `Auto` resolves to braille on UTF-8 terminals and plain blocks
/// elsewhere, once, when the painter is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMode {
    /// Probe the terminal locale at painter construction.
    #[default]
    Auto,
    /// Braille 2x4 sub-pixel cells (rounded bar corners).
    Braille,
    /// Half/full block cells for terminals without braille glyphs.
    Block,
}

impl FromStr for CellMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(CellMode::Auto),
            "braille" => Ok(CellMode::Braille),
            "block" => Ok(CellMode::Block),
            _ => Err(CoreError::Config(format!(
                "unknown cell mode '{s}' (expected auto, braille, or block)"
            ))),
        }
    }
}

/// Complete trainer configuration.
///
/// Serializable to TOML. Every field has a sane default.
///
/// # Example
/// ```
/// use vx_core::config::TrainerConfig;
/// let config = TrainerConfig::default();
/// assert_eq!(config.target_fps, 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrainerConfig {
    /// Loudness band active at startup.
    pub mode: Mode,
    /// Refresh rate of the tick loop.
    pub target_fps: u32,
    /// Cell encoding for gauges and spectrum bars.
    pub cells: CellMode,
    /// Truecolor output. Off renders everything in the default foreground.
    pub color_enabled: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            target_fps: 60,
            cells: CellMode::Auto,
            color_enabled: true,
        }
    }
}

impl TrainerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.target_fps = self.target_fps.clamp(15, 120);
    }
}

/// TOML file shape: every field optional for partial override.
#[derive(Deserialize)]
struct ConfigFile {
    trainer: Option<TrainerSection>,
    render: Option<RenderSection>,
}

#[derive(Deserialize)]
struct TrainerSection {
    mode: Option<Mode>,
}

#[derive(Deserialize)]
struct RenderSection {
    target_fps: Option<u32>,
    cells: Option<CellMode>,
    color_enabled: Option<bool>,
}

/// Load a TOML file and merge it over the defaults.
///
/// An unknown `mode` or `cells` value is a parse error, not a fallback.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use vx_core::config::load_config;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<TrainerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("TOML parse error in {}", path.display()))?;

    let mut config = TrainerConfig::default();

    if let Some(t) = file.trainer {
        if let Some(v) = t.mode {
            config.mode = v;
        }
    }

    if let Some(r) = file.render {
        if let Some(v) = r.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = r.cells {
            config.cells = v;
        }
        if let Some(v) = r.color_enabled {
            config.color_enabled = v;
        }
    }

    config.clamp_all();
    log::debug!("config loaded from {}", path.display());
    Ok(config)
}
