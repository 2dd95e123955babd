//! Error types for backend acquisition.

/// Errors raised while obtaining or configuring a vibration backend.
///
/// Issuing commands to an acquired backend cannot fail; only acquisition
/// and configuration can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The platform offers no vibration service.
    #[error("vibration backend '{backend}' is unavailable: {reason}")]
    Unavailable {
        /// Provider that failed.
        backend: &'static str,
        /// Why the service could not be obtained.
        reason: String,
    },

    /// Backend configuration is inconsistent.
    #[error("invalid backend configuration: {0}")]
    InvalidConfiguration(String),
}

impl BackendError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            backend,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// True when the error means "no vibration service on this platform".
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// A specialized `Result` type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
