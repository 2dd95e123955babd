//! Capability snapshot and probe.

use serde::{Deserialize, Serialize};
use tactile_backend::VibrationBackend;
use tracing::debug;

/// What the vibration hardware can do.
///
/// Capabilities never change during the life of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
}

impl Capabilities {
    /// Query both capabilities from a backend.
    #[must_use]
    pub fn query(backend: &dyn VibrationBackend) -> Self {
        let capabilities = Self {
            has_vibrator: backend.has_vibrator(),
            has_amplitude_control: backend.has_amplitude_control(),
        };
        debug!(
            backend = backend.name(),
            has_vibrator = capabilities.has_vibrator,
            has_amplitude_control = capabilities.has_amplitude_control,
            "Probed vibration capabilities"
        );
        capabilities
    }
}

/// Answers capability queries, optionally from a snapshot taken once.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityProbe {
    snapshot: Option<Capabilities>,
}

impl CapabilityProbe {
    /// Probe that queries the backend once and serves the snapshot afterwards.
    #[must_use]
    pub fn cached(backend: &dyn VibrationBackend) -> Self {
        Self {
            snapshot: Some(Capabilities::query(backend)),
        }
    }

    /// Probe that forwards every query to the backend.
    #[must_use]
    pub fn live() -> Self {
        Self { snapshot: None }
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.snapshot.is_some()
    }

    #[must_use]
    pub fn has_vibrator(&self, backend: &dyn VibrationBackend) -> bool {
        match self.snapshot {
            Some(snapshot) => snapshot.has_vibrator,
            None => backend.has_vibrator(),
        }
    }

    #[must_use]
    pub fn has_amplitude_control(&self, backend: &dyn VibrationBackend) -> bool {
        match self.snapshot {
            Some(snapshot) => snapshot.has_amplitude_control,
            None => backend.has_amplitude_control(),
        }
    }

    #[must_use]
    pub fn capabilities(&self, backend: &dyn VibrationBackend) -> Capabilities {
        self.snapshot.unwrap_or_else(|| Capabilities::query(backend))
    }
}
