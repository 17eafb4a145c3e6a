use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Loudness band selected by the user.
///
/// The set is closed: every mode carries a compile-time threshold on the
/// 0-255 byte-spectrum scale, and text boundaries (CLI, config) reject
/// identifiers outside the set instead of defaulting.
///
/// # Example
/// ```
/// use vx_core::mode::Mode;
/// assert_eq!(Mode::Normal.threshold(), 80.0);
/// assert_eq!("speaker".parse::<Mode>().unwrap(), Mode::Speaker);
/// assert!("shouting".parse::<Mode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Quiet practice, loudness at or under 30.
    Whisper,
    /// Conversational level, loudness at or under 80.
    #[default]
    Normal,
    /// Projected voice, loudness at or under 180.
    Speaker,
}

impl Mode {
    /// All modes in selection order.
    pub const ALL: [Mode; 3] = [Mode::Whisper, Mode::Normal, Mode::Speaker];

    /// Inclusive upper loudness bound for "within target".
    #[must_use]
    pub fn threshold(self) -> f32 {
        match self {
            Mode::Whisper => 30.0,
            Mode::Normal => 80.0,
            Mode::Speaker => 180.0,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Whisper => "Whisper",
            Mode::Normal => "Normal",
            Mode::Speaker => "Speaker",
        }
    }

    /// The next mode in cycling order, wrapping around.
    ///
    /// # Example
    /// ```
    /// use vx_core::mode::Mode;
    /// assert_eq!(Mode::Speaker.next(), Mode::Whisper);
    /// ```
    #[must_use]
    pub fn next(self) -> Mode {
        match self {
            Mode::Whisper => Mode::Normal,
            Mode::Normal => Mode::Speaker,
            Mode::Speaker => Mode::Whisper,
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whisper" => Ok(Mode::Whisper),
            "normal" => Ok(Mode::Normal),
            "speaker" => Ok(Mode::Speaker),
            _ => Err(CoreError::UnknownMode {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
