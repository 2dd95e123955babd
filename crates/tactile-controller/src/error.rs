//! Error types for the vibration controller.

use tactile_command::ValidationError;

use crate::state::HandleState;

/// Errors reported by [`VibrationController`](crate::VibrationController).
///
/// None of these are retried and none are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// The platform offers no vibration service.
    ///
    /// [`ControllerLifecycle::acquire`](crate::ControllerLifecycle::acquire)
    /// reports this as an absent controller; the variant exists for callers
    /// that need an error value, such as [`ControllerLifecycle::try_acquire`](crate::ControllerLifecycle::try_acquire).
    #[error("vibration is not supported on this platform: {0}")]
    UnsupportedPlatform(String),

    /// Malformed request. Nothing was forwarded to the backend.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Operation attempted on a handle that is not active.
    #[error("vibration controller used while {state}")]
    DisposedHandleUsed {
        /// State the handle was in.
        state: HandleState,
    },
}

impl ControllerError {
    /// Create an unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(reason: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(reason.into())
    }

    #[must_use]
    pub fn disposed(state: HandleState) -> Self {
        Self::DisposedHandleUsed { state }
    }

    /// True for request validation failures.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// A specialized `Result` type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ControllerError::disposed(HandleState::Disposed).to_string(),
            "vibration controller used while Disposed"
        );
        assert_eq!(
            ControllerError::from(ValidationError::UnknownEffect(7)).to_string(),
            "invalid argument: unknown predefined effect id 7"
        );
    }

    #[test]
    fn test_classification() {
        assert!(ControllerError::from(ValidationError::EmptyWaveform).is_invalid_argument());
        assert!(!ControllerError::unsupported_platform("none").is_invalid_argument());
    }
}
