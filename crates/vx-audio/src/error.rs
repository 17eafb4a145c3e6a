use thiserror::Error;

/// Errors originating from the audio module.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio input device found.
    #[error("no audio input device found")]
    NoInputDevice,

    /// The input device refused to report a stream configuration.
    #[error("no usable input stream config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    /// The input stream could not be built.
    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// The input stream could not be started.
    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// The capture thread could not be spawned.
    #[error("failed to spawn capture thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The capture thread died before reporting a live stream.
    #[error("capture thread exited before the stream came up")]
    WorkerExited,
}
