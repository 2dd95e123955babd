//! Call-recording backend for tests.
//!
//! `RecordingBackend` writes every call into a shared [`CallLog`], so a test
//! can keep a handle to the log after the backend has been boxed and moved
//! into a controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::backend::VibrationBackend;
use crate::error::{BackendError, BackendResult};
use crate::provider::BackendProvider;

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    HasVibrator,
    HasAmplitudeControl,
    Oneshot {
        duration_ms: u64,
    },
    OneshotWithAmplitude {
        duration_ms: u64,
        amplitude: i32,
    },
    Waveform {
        timings_ms: Vec<u64>,
        repeat_index: i32,
    },
    WaveformWithAmplitudes {
        timings_ms: Vec<u64>,
        amplitudes: Vec<u8>,
        repeat_index: i32,
    },
    PredefinedEffect {
        effect_id: i32,
    },
    Cancel,
    Release,
}

impl BackendCall {
    /// True for capability probes, which have no side effects.
    #[must_use]
    pub fn is_probe(&self) -> bool {
        matches!(self, Self::HasVibrator | Self::HasAmplitudeControl)
    }
}

/// Shared, cloneable log of backend calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: BackendCall) {
        self.calls.lock().push(call);
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Recorded calls excluding capability probes.
    #[must_use]
    pub fn commands(&self) -> Vec<BackendCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| !call.is_probe())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn last_command(&self) -> Option<BackendCall> {
        self.commands().pop()
    }

    #[must_use]
    pub fn count(&self, call: &BackendCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    #[must_use]
    pub fn release_count(&self) -> usize {
        self.count(&BackendCall::Release)
    }

    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.is_probe()).count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

/// Backend that records calls instead of driving a motor.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    log: CallLog,
    has_vibrator: bool,
    has_amplitude_control: bool,
}

impl RecordingBackend {
    /// Backend with a vibrator and amplitude control.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capabilities(true, true)
    }

    #[must_use]
    pub fn with_capabilities(has_vibrator: bool, has_amplitude_control: bool) -> Self {
        Self {
            log: CallLog::new(),
            has_vibrator,
            has_amplitude_control,
        }
    }

    /// Handle to this backend's call log.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VibrationBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn has_vibrator(&self) -> bool {
        self.log.push(BackendCall::HasVibrator);
        self.has_vibrator
    }

    fn has_amplitude_control(&self) -> bool {
        self.log.push(BackendCall::HasAmplitudeControl);
        self.has_amplitude_control
    }

    fn oneshot(&mut self, duration_ms: u64) {
        self.log.push(BackendCall::Oneshot { duration_ms });
    }

    fn oneshot_with_amplitude(&mut self, duration_ms: u64, amplitude: i32) {
        self.log.push(BackendCall::OneshotWithAmplitude {
            duration_ms,
            amplitude,
        });
    }

    fn waveform(&mut self, timings_ms: &[u64], repeat_index: i32) {
        self.log.push(BackendCall::Waveform {
            timings_ms: timings_ms.to_vec(),
            repeat_index,
        });
    }

    fn waveform_with_amplitudes(&mut self, timings_ms: &[u64], amplitudes: &[u8], repeat_index: i32) {
        self.log.push(BackendCall::WaveformWithAmplitudes {
            timings_ms: timings_ms.to_vec(),
            amplitudes: amplitudes.to_vec(),
            repeat_index,
        });
    }

    fn predefined_effect(&mut self, effect_id: i32) {
        self.log.push(BackendCall::PredefinedEffect { effect_id });
    }

    fn cancel(&mut self) {
        self.log.push(BackendCall::Cancel);
    }

    fn release(&mut self) {
        self.log.push(BackendCall::Release);
    }
}

/// Provider handing out [`RecordingBackend`]s that share one log.
#[derive(Debug, Clone)]
pub struct RecordingProvider {
    template: RecordingBackend,
    available: bool,
    acquisitions: Arc<AtomicUsize>,
}

impl RecordingProvider {
    #[must_use]
    pub fn new(backend: RecordingBackend) -> Self {
        Self {
            template: backend,
            available: true,
            acquisitions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider whose acquisitions always fail as unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(RecordingBackend::new())
        }
    }

    #[must_use]
    pub fn log(&self) -> CallLog {
        self.template.log()
    }

    /// Number of `acquire()` calls, successful or not.
    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::Acquire)
    }

    /// Shared acquisition counter, readable after the provider is moved.
    #[must_use]
    pub fn acquisition_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.acquisitions)
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new(RecordingBackend::new())
    }
}

impl BackendProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn acquire(&self) -> BackendResult<Box<dyn VibrationBackend>> {
        self.acquisitions.fetch_add(1, Ordering::AcqRel);
        if !self.available {
            return Err(BackendError::unavailable(
                self.name(),
                "recording provider configured as unavailable",
            ));
        }
        Ok(Box::new(self.template.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_log_survives_boxing() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut boxed: Box<dyn VibrationBackend> = Box::new(backend);

        boxed.oneshot(10);
        boxed.cancel();
        let _ = boxed.has_vibrator();

        assert_eq!(
            log.commands(),
            vec![BackendCall::Oneshot { duration_ms: 10 }, BackendCall::Cancel]
        );
        assert_eq!(log.probe_count(), 1);
    }

    #[test]
    fn test_provider_shares_log_across_acquisitions() -> TestResult {
        let provider = RecordingProvider::default();
        let log = provider.log();

        provider.acquire()?.predefined_effect(1);
        provider.acquire()?.release();

        assert_eq!(provider.acquisitions(), 2);
        assert_eq!(log.calls().len(), 2);
        assert_eq!(log.release_count(), 1);
        Ok(())
    }

    #[test]
    fn test_unavailable_provider() {
        let provider = RecordingProvider::unavailable();
        assert!(provider.acquire().is_err());
        assert_eq!(provider.acquisitions(), 1);
    }
}
