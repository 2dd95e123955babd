//! # tactile-backend
//!
//! Contract between a haptic controller and the platform service that
//! actually drives a vibration motor.
//!
//! This crate provides:
//! - `VibrationBackend` trait capturing the platform calling convention
//! - `BackendProvider` trait for acquiring a backend at startup
//! - `SimulatedBackend` for hardware-free environments and tests
//! - `NullBackend` for environments without a motor
//! - `RecordingBackend` (feature `mock`) for asserting forwarded calls
//!
//! ## Example
//!
//! ```rust
//! use tactile_backend::prelude::*;
//!
//! let provider = provider_for(BackendSelection::Simulated, SimulatedCapabilities::FULL);
//! let mut backend = provider.acquire()?;
//!
//! assert!(backend.has_vibrator());
//! backend.oneshot(80);
//! backend.cancel();
//! backend.release();
//! # Ok::<(), BackendError>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backend;
pub mod error;
#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;
pub mod null;
pub mod prelude;
pub mod provider;
pub mod simulated;

pub use backend::VibrationBackend;
pub use error::{BackendError, BackendResult};
pub use null::NullBackend;
pub use provider::{
    BackendProvider, BackendSelection, NullProvider, SimulatedProvider, UnsupportedProvider,
    provider_for,
};
pub use simulated::{MotorActivity, SimulatedBackend, SimulatedCapabilities};
