//! Controller counters.

use serde::{Deserialize, Serialize};
use tactile_command::RequestKind;

/// Counters kept by a [`VibrationController`](crate::VibrationController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerMetrics {
    /// One-shots forwarded to the backend.
    pub oneshot_count: u64,
    /// Waveforms forwarded to the backend.
    pub waveform_count: u64,
    /// Predefined effects forwarded to the backend.
    pub effect_count: u64,
    /// Requests rejected by validation.
    pub rejected_count: u64,
    /// Cancel calls forwarded to the backend.
    pub cancel_count: u64,
    /// Requests whose amplitudes were stripped by the fallback policy.
    pub amplitude_fallback_count: u64,
    /// Operations refused because the handle was not active.
    pub disposed_use_count: u64,
}

impl ControllerMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total vibrate commands forwarded, of any shape.
    #[must_use]
    pub fn forwarded_count(&self) -> u64 {
        self.oneshot_count
            .saturating_add(self.waveform_count)
            .saturating_add(self.effect_count)
    }

    pub(crate) fn record_forwarded(&mut self, kind: RequestKind) {
        let counter = match kind {
            RequestKind::Oneshot => &mut self.oneshot_count,
            RequestKind::Waveform => &mut self.waveform_count,
            RequestKind::PredefinedEffect => &mut self.effect_count,
        };
        *counter = counter.saturating_add(1);
    }

    pub(crate) fn record_rejected(&mut self) {
        self.rejected_count = self.rejected_count.saturating_add(1);
    }

    pub(crate) fn record_cancel(&mut self) {
        self.cancel_count = self.cancel_count.saturating_add(1);
    }

    pub(crate) fn record_amplitude_fallback(&mut self) {
        self.amplitude_fallback_count = self.amplitude_fallback_count.saturating_add(1);
    }

    pub(crate) fn record_disposed_use(&mut self) {
        self.disposed_use_count = self.disposed_use_count.saturating_add(1);
    }
}
