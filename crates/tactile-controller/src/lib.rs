//! # tactile-controller
//!
//! Haptic vibration control on top of a platform vibration service.
//!
//! This crate provides:
//! - `VibrationController`: validates requests and forwards them to the backend
//! - `ControllerLifecycle`: lazy, cached acquisition with explicit release
//! - `CapabilityProbe`: capability queries with an optional snapshot
//! - `ControllerConfig`: YAML/JSON configuration and builder
//!
//! ## Example
//!
//! ```rust
//! use tactile_controller::prelude::*;
//!
//! let mut lifecycle = ControllerLifecycle::from_config(ControllerConfig::default())?;
//!
//! if let Some(controller) = lifecycle.acquire() {
//!     controller.vibrate_effect(EffectId::Click)?;
//!     controller.vibrate_waveform(&[0, 100, 50, 100], -1)?;
//!     controller.cancel()?;
//! }
//!
//! lifecycle.release();
//! assert!(lifecycle.acquire().is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_debug_implementations
)]

pub mod capabilities;
pub mod config;
pub mod controller;
pub mod error;
pub mod fallback;
pub mod lifecycle;
pub mod metrics;
pub mod prelude;
pub mod state;

pub use capabilities::{Capabilities, CapabilityProbe};
pub use config::{
    AmplitudeFallback, ConfigError, ConfigResult, ControllerConfig, ControllerConfigBuilder,
};
pub use controller::VibrationController;
pub use error::{ControllerError, ControllerResult};
pub use fallback::{OnOffPattern, strip_amplitudes};
pub use lifecycle::ControllerLifecycle;
pub use metrics::ControllerMetrics;
pub use state::{HandleState, LifecycleState};
