//! Vibration request model for Tactile
//!
//! This crate defines the request shapes a haptic controller accepts
//! (one-shot, waveform, predefined effect) and the validation that turns
//! untyped caller input into requests a motor driver can execute.
//!
//! # Example
//!
//! ```
//! use tactile_command::prelude::*;
//!
//! let validator = CommandValidator::new();
//! let request = validator.validate(&RawVibrationRequest::oneshot(120))?;
//! assert_eq!(request.kind(), RequestKind::Oneshot);
//! assert_eq!(request.total_duration_ms(), Some(120));
//! # Ok::<(), ValidationError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod constants;
pub mod effect;
pub mod error;
pub mod prelude;
pub mod request;
pub mod validator;

pub use constants::*;
pub use effect::{EffectId, ParseEffectError};
pub use error::{ValidationError, ValidationResult};
pub use request::{OneshotAmplitude, RawVibrationRequest, RequestKind, VibrationRequest};
pub use validator::CommandValidator;
