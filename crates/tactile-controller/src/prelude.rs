//! Prelude for tactile-controller.
//!
//! This module re-exports the most commonly used types for convenient importing,
//! including the request types from `tactile-command`.

pub use crate::capabilities::Capabilities;
pub use crate::config::{AmplitudeFallback, ConfigError, ControllerConfig};
pub use crate::controller::VibrationController;
pub use crate::error::{ControllerError, ControllerResult};
pub use crate::lifecycle::ControllerLifecycle;
pub use crate::metrics::ControllerMetrics;
pub use crate::state::{HandleState, LifecycleState};

pub use tactile_command::{EffectId, RawVibrationRequest, ValidationError, VibrationRequest};
