//! Prelude for tactile-backend.
//!
//! This module re-exports the most commonly used types for convenient importing.

pub use crate::backend::VibrationBackend;
pub use crate::error::{BackendError, BackendResult};
pub use crate::null::NullBackend;
pub use crate::provider::{
    BackendProvider, BackendSelection, NullProvider, SimulatedProvider, UnsupportedProvider,
    provider_for,
};
pub use crate::simulated::{MotorActivity, SimulatedBackend, SimulatedCapabilities};
