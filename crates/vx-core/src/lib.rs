/// Shared types, configuration, and scoring for voxmeter.
///
/// This crate contains the mode table, the training session counters,
/// the tick timer, frame/reading types, and configuration logic used
/// across the voxmeter workspace.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod mode;
pub mod session;
pub mod traits;

pub use clock::TickTimer;
pub use config::TrainerConfig;
pub use error::CoreError;
pub use frame::{GaugeState, SpectrumFrame, TickReading};
pub use mode::Mode;
pub use session::TrainingSession;
