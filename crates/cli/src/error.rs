//! Error types for tactilectl CLI

use tactile_controller::{ConfigError, ControllerError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Vibration unavailable: {0}")]
    Unsupported(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Request #{index} rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: ControllerError,
    },

    #[error("Controller error: {0}")]
    Controller(ControllerError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<ControllerError> for CliError {
    fn from(error: ControllerError) -> Self {
        match error {
            ControllerError::InvalidArgument(e) => Self::ValidationError(e.to_string()),
            ControllerError::UnsupportedPlatform(reason) => Self::Unsupported(reason),
            other => Self::Controller(other),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ValidationError(_) | Self::JsonError(_) => 4,
            Self::Rejected { source, .. } if source.is_invalid_argument() => 4,
            Self::Unsupported(_) => 5,
            Self::InvalidConfiguration(_) => 3,
            Self::Rejected { .. } | Self::Controller(_) | Self::IoError(_) => 1,
        }
    }
}
