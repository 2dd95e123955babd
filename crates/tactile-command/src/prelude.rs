//! Commonly used request types.
//!
//! ```
//! use tactile_command::prelude::*;
//!
//! let request = CommandValidator::new().validate(&EffectId::Click.into());
//! assert!(request.is_ok());
//! ```

pub use crate::effect::EffectId;
pub use crate::error::{ValidationError, ValidationResult};
pub use crate::request::{OneshotAmplitude, RawVibrationRequest, RequestKind, VibrationRequest};
pub use crate::validator::CommandValidator;
