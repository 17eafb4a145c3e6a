use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Mode identifier outside the registered set.
    #[error("unknown mode '{name}' (expected whisper, normal, or speaker)")]
    UnknownMode {
        /// The identifier that failed to resolve.
        name: String,
    },
}
