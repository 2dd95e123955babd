//! Controller and lifecycle states.
//!
//! A controller handle moves `Uninitialized -> Active -> Disposed` exactly
//! once. The lifecycle that hands out handles has its own, coarser state.

use serde::{Deserialize, Serialize};

/// State of a [`VibrationController`](crate::VibrationController) handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleState {
    /// No service reference held yet.
    #[default]
    Uninitialized,
    /// Holds the service reference; commands are forwarded.
    Active,
    /// Service reference released (terminal state).
    Disposed,
}

impl HandleState {
    /// Check if commands may be issued in this state.
    #[must_use]
    pub fn accepts_commands(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Disposed)
    }

    /// Get the state as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Active => "Active",
            Self::Disposed => "Disposed",
        }
    }
}

impl core::fmt::Display for HandleState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of a [`ControllerLifecycle`](crate::ControllerLifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// `acquire()` has not been called yet.
    #[default]
    Idle,
    /// A live controller is cached.
    Active,
    /// The platform offered no usable vibration service. Cached.
    Unavailable,
    /// The controller was released; no further acquisition.
    Released,
}

impl LifecycleState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active => "Active",
            Self::Unavailable => "Unavailable",
            Self::Released => "Released",
        }
    }
}

impl core::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
