use frame_art_sdk::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),
}

/// Failures of the art controller's device operations.
#[derive(Debug, Error)]
pub enum ArtError {
    #[error("TV error: {0}")]
    Service(#[from] ServiceError),
    /// The image to upload could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
    #[error("Art controller error: {0}")]
    Art(#[from] ArtError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("The TV does not support art mode")]
    ArtModeUnsupported,
}
