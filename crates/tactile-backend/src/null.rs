//! Backend for environments without a motor.

use tracing::trace;

use crate::backend::VibrationBackend;

/// Vibration service that reports no motor and drops every command.
///
/// Selected at startup where a platform service exists but has nothing to
/// drive (desktop builds, headless CI). Capability absence is reported, not
/// faked: `has_vibrator()` is always false.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl NullBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VibrationBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn has_vibrator(&self) -> bool {
        false
    }

    fn has_amplitude_control(&self) -> bool {
        false
    }

    fn oneshot(&mut self, duration_ms: u64) {
        trace!(duration_ms, "Null backend dropped one-shot");
    }

    fn oneshot_with_amplitude(&mut self, duration_ms: u64, amplitude: i32) {
        trace!(duration_ms, amplitude, "Null backend dropped one-shot");
    }

    fn waveform(&mut self, timings_ms: &[u64], repeat_index: i32) {
        trace!(segments = timings_ms.len(), repeat_index, "Null backend dropped waveform");
    }

    fn waveform_with_amplitudes(&mut self, timings_ms: &[u64], _amplitudes: &[u8], repeat_index: i32) {
        trace!(segments = timings_ms.len(), repeat_index, "Null backend dropped waveform");
    }

    fn predefined_effect(&mut self, effect_id: i32) {
        trace!(effect_id, "Null backend dropped effect");
    }

    fn cancel(&mut self) {}

    fn release(&mut self) {}
}
