//! Backend acquisition.
//!
//! A `BackendProvider` knows how to obtain a reference to a platform
//! vibration service. The composition root picks one provider at startup
//! from a [`BackendSelection`]; the controller only ever sees the trait.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tactile_command::EffectId;
use tracing::debug;

use crate::backend::VibrationBackend;
use crate::error::{BackendError, BackendResult};
use crate::null::NullBackend;
use crate::simulated::{SimulatedBackend, SimulatedCapabilities};

/// Source of vibration backends.
pub trait BackendProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Obtain a reference to the vibration service.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] when the platform offers no
    /// vibration service. Callers treat this as "no controller", not as a
    /// fatal error.
    fn acquire(&self) -> BackendResult<Box<dyn VibrationBackend>>;
}

/// Provides [`SimulatedBackend`]s.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    capabilities: SimulatedCapabilities,
    native_effects: Vec<EffectId>,
}

impl SimulatedProvider {
    #[must_use]
    pub fn new(capabilities: SimulatedCapabilities) -> Self {
        Self {
            capabilities,
            native_effects: EffectId::ALL.to_vec(),
        }
    }

    /// Restrict which effects the simulated hardware implements natively.
    #[must_use]
    pub fn with_native_effects(mut self, native_effects: Vec<EffectId>) -> Self {
        self.native_effects = native_effects;
        self
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(SimulatedCapabilities::default())
    }
}

impl BackendProvider for SimulatedProvider {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn acquire(&self) -> BackendResult<Box<dyn VibrationBackend>> {
        self.capabilities.validate()?;
        debug!(capabilities = ?self.capabilities, "Acquiring simulated vibration backend");
        Ok(Box::new(SimulatedBackend::with_native_effects(
            self.capabilities,
            self.native_effects.clone(),
        )))
    }
}

/// Provides [`NullBackend`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl BackendProvider for NullProvider {
    fn name(&self) -> &'static str {
        "null"
    }

    fn acquire(&self) -> BackendResult<Box<dyn VibrationBackend>> {
        Ok(Box::new(NullBackend::new()))
    }
}

/// Provider for platforms with no vibration service at all.
#[derive(Debug, Clone)]
pub struct UnsupportedProvider {
    reason: String,
}

impl UnsupportedProvider {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnsupportedProvider {
    fn default() -> Self {
        Self::new("platform offers no vibration service")
    }
}

impl BackendProvider for UnsupportedProvider {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn acquire(&self) -> BackendResult<Box<dyn VibrationBackend>> {
        Err(BackendError::unavailable(self.name(), self.reason.clone()))
    }
}

/// Backend chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSelection {
    #[default]
    Simulated,
    Null,
    Unsupported,
}

impl BackendSelection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Null => "null",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendSelection {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "null" => Ok(Self::Null),
            "unsupported" => Ok(Self::Unsupported),
            other => Err(BackendError::invalid_configuration(format!(
                "unknown backend '{other}' (expected simulated, null or unsupported)"
            ))),
        }
    }
}

/// Build the provider for a startup selection.
#[must_use]
pub fn provider_for(
    selection: BackendSelection,
    capabilities: SimulatedCapabilities,
) -> Box<dyn BackendProvider> {
    match selection {
        BackendSelection::Simulated => Box::new(SimulatedProvider::new(capabilities)),
        BackendSelection::Null => Box::new(NullProvider),
        BackendSelection::Unsupported => Box::new(UnsupportedProvider::default()),
    }
}
