//! Vibration controller handle.
//!
//! A `VibrationController` exclusively owns one backend reference. Requests
//! are validated before anything reaches the backend; a rejected request has
//! no side effect. The handle is released exactly once, either by
//! [`dispose`](VibrationController::dispose) or when it is dropped.

use core::fmt;

use tactile_backend::VibrationBackend;
use tactile_command::{
    CommandValidator, EffectId, NO_REPEAT, OneshotAmplitude, RawVibrationRequest,
    VibrationRequest,
};
use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, CapabilityProbe};
use crate::config::{AmplitudeFallback, ControllerConfig};
use crate::error::{ControllerError, ControllerResult};
use crate::fallback::strip_amplitudes;
use crate::metrics::ControllerMetrics;
use crate::state::HandleState;

/// Handle for issuing vibration commands.
///
/// Calls from one owner are forwarded in order; a new vibrate command
/// supersedes whatever pattern the hardware is playing.
///
/// # Example
///
/// ```rust
/// use tactile_backend::{SimulatedBackend, SimulatedCapabilities};
/// use tactile_controller::{ControllerError, VibrationController};
///
/// let backend = SimulatedBackend::new(SimulatedCapabilities::FULL);
/// let mut controller = VibrationController::new(Box::new(backend));
///
/// controller.vibrate_waveform_with_amplitudes(&[0, 200, 100, 300], &[0, 0, 128, 255], -1)?;
/// controller.cancel()?;
/// controller.dispose();
///
/// assert!(matches!(
///     controller.vibrate(10),
///     Err(ControllerError::DisposedHandleUsed { .. })
/// ));
/// # Ok::<(), ControllerError>(())
/// ```
pub struct VibrationController {
    backend: Box<dyn VibrationBackend>,
    state: HandleState,
    probe: CapabilityProbe,
    validator: CommandValidator,
    amplitude_fallback: AmplitudeFallback,
    metrics: ControllerMetrics,
}

impl VibrationController {
    /// Take ownership of `backend` with the default configuration.
    #[must_use]
    pub fn new(backend: Box<dyn VibrationBackend>) -> Self {
        Self::with_config(backend, &ControllerConfig::default())
    }

    /// Take ownership of `backend` with the policies from `config`.
    #[must_use]
    pub fn with_config(backend: Box<dyn VibrationBackend>, config: &ControllerConfig) -> Self {
        let probe = if config.cache_capabilities {
            CapabilityProbe::cached(backend.as_ref())
        } else {
            CapabilityProbe::live()
        };
        info!(
            backend = backend.name(),
            cache_capabilities = config.cache_capabilities,
            amplitude_fallback = %config.amplitude_fallback,
            "Vibration controller active"
        );
        Self {
            backend,
            state: HandleState::Active,
            probe,
            validator: CommandValidator::new(),
            amplitude_fallback: config.amplitude_fallback,
            metrics: ControllerMetrics::new(),
        }
    }

    /// Vibrate once for `duration_ms` at the default strength.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn vibrate(&mut self, duration_ms: u64) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::oneshot(duration_ms))
    }

    /// Vibrate once at `amplitude` (`-1` for the default strength).
    ///
    /// On hardware without amplitude control the amplitude is accepted and
    /// handled by the configured [`AmplitudeFallback`].
    ///
    /// # Errors
    ///
    /// - [`ControllerError::InvalidArgument`] unless `amplitude` is `-1` or within `1..=255`
    /// - [`ControllerError::DisposedHandleUsed`] after disposal
    pub fn vibrate_with_amplitude(&mut self, duration_ms: u64, amplitude: i32) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::oneshot_with_amplitude(
            duration_ms,
            amplitude,
        ))
    }

    /// Play a constant-strength off/on pattern.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::InvalidArgument`] for an empty pattern or a bad repeat index
    /// - [`ControllerError::DisposedHandleUsed`] after disposal
    pub fn vibrate_waveform(&mut self, timings_ms: &[u64], repeat_index: i32) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::waveform(timings_ms, repeat_index))
    }

    /// Play a pattern with one amplitude per timing.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::InvalidArgument`] for mismatched lengths, out of
    ///   range amplitudes or a bad repeat index
    /// - [`ControllerError::DisposedHandleUsed`] after disposal
    pub fn vibrate_waveform_with_amplitudes(
        &mut self,
        timings_ms: &[u64],
        amplitudes: &[i32],
        repeat_index: i32,
    ) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::waveform_with_amplitudes(
            timings_ms,
            amplitudes,
            repeat_index,
        ))
    }

    /// Play a predefined effect by platform id.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::InvalidArgument`] for ids outside the effect set
    /// - [`ControllerError::DisposedHandleUsed`] after disposal
    pub fn vibrate_effect_id(&mut self, effect_id: i32) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::effect(effect_id))
    }

    /// Play a predefined effect.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn vibrate_effect(&mut self, effect: EffectId) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::from(effect))
    }

    /// Validate and forward a raw request.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::InvalidArgument`] if validation fails; the backend is not called
    /// - [`ControllerError::DisposedHandleUsed`] after disposal
    pub fn submit(&mut self, raw: &RawVibrationRequest) -> ControllerResult<()> {
        self.ensure_active("vibrate")?;

        let request = match self.validator.validate(raw) {
            Ok(request) => request,
            Err(error) => {
                self.metrics.record_rejected();
                warn!(%error, "Rejected vibration request");
                return Err(error.into());
            }
        };

        let explicit_amplitude = matches!(
            raw,
            RawVibrationRequest::Oneshot {
                amplitude: Some(_),
                ..
            }
        );
        self.dispatch(&request, explicit_amplitude);
        Ok(())
    }

    /// Forward an already typed request.
    ///
    /// The request is checked again since its fields are public.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub fn submit_request(&mut self, request: &VibrationRequest) -> ControllerResult<()> {
        self.submit(&RawVibrationRequest::from(request))
    }

    /// Stop any active pattern. Safe to call when idle.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn cancel(&mut self) -> ControllerResult<()> {
        self.ensure_active("cancel")?;
        self.backend.cancel();
        self.metrics.record_cancel();
        debug!(backend = self.backend.name(), "Vibration cancelled");
        Ok(())
    }

    /// Release the backend reference. Repeated calls are no-ops.
    pub fn dispose(&mut self) {
        match self.state {
            HandleState::Active => {
                self.backend.release();
                self.state = HandleState::Disposed;
                info!(
                    backend = self.backend.name(),
                    forwarded = self.metrics.forwarded_count(),
                    "Vibration controller disposed"
                );
            }
            HandleState::Uninitialized => self.state = HandleState::Disposed,
            HandleState::Disposed => debug!("Vibration controller already disposed"),
        }
    }

    /// True iff the device exposes a vibration motor.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn has_vibrator(&self) -> ControllerResult<bool> {
        self.check_active()?;
        Ok(self.probe.has_vibrator(self.backend.as_ref()))
    }

    /// True iff the motor can vary its strength.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn has_amplitude_control(&self) -> ControllerResult<bool> {
        self.check_active()?;
        Ok(self.probe.has_amplitude_control(self.backend.as_ref()))
    }

    /// Both capabilities at once.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DisposedHandleUsed`] after disposal.
    pub fn capabilities(&self) -> ControllerResult<Capabilities> {
        self.check_active()?;
        Ok(self.probe.capabilities(self.backend.as_ref()))
    }

    #[must_use]
    pub fn state(&self) -> HandleState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.accepts_commands()
    }

    #[must_use]
    pub fn metrics(&self) -> ControllerMetrics {
        self.metrics
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    #[must_use]
    pub fn amplitude_fallback(&self) -> AmplitudeFallback {
        self.amplitude_fallback
    }

    fn check_active(&self) -> ControllerResult<()> {
        if self.state.accepts_commands() {
            Ok(())
        } else {
            Err(ControllerError::disposed(self.state))
        }
    }

    fn ensure_active(&mut self, operation: &'static str) -> ControllerResult<()> {
        let result = self.check_active();
        if result.is_err() {
            self.metrics.record_disposed_use();
            warn!(operation, state = %self.state, "Vibration controller used after dispose");
        }
        result
    }

    fn strips_amplitudes(&self) -> bool {
        self.amplitude_fallback == AmplitudeFallback::DefaultStrength
            && !self.probe.has_amplitude_control(self.backend.as_ref())
    }

    fn dispatch(&mut self, request: &VibrationRequest, explicit_amplitude: bool) {
        debug!(
            backend = self.backend.name(),
            kind = request.kind().as_str(),
            duration_ms = ?request.total_duration_ms(),
            silent = request.is_silent(),
            "Forwarding vibration request"
        );

        match request {
            VibrationRequest::Oneshot {
                duration_ms,
                amplitude,
            } => self.dispatch_oneshot(*duration_ms, *amplitude, explicit_amplitude),
            VibrationRequest::Waveform {
                timings_ms,
                amplitudes: None,
                repeat_index,
            } => self.backend.waveform(timings_ms, raw_repeat(*repeat_index)),
            VibrationRequest::Waveform {
                timings_ms,
                amplitudes: Some(amplitudes),
                repeat_index,
            } => {
                if self.strips_amplitudes() {
                    let pattern = strip_amplitudes(timings_ms, amplitudes, *repeat_index);
                    self.metrics.record_amplitude_fallback();
                    debug!(
                        segments = pattern.timings_ms.len(),
                        "Amplitudes stripped for on/off motor"
                    );
                    self.backend
                        .waveform(&pattern.timings_ms, raw_repeat(pattern.repeat_index));
                } else {
                    self.backend.waveform_with_amplitudes(
                        timings_ms,
                        amplitudes,
                        raw_repeat(*repeat_index),
                    );
                }
            }
            VibrationRequest::PredefinedEffect { effect } => {
                self.backend.predefined_effect(effect.to_raw());
            }
        }

        self.metrics.record_forwarded(request.kind());
    }

    fn dispatch_oneshot(&mut self, duration_ms: u64, amplitude: OneshotAmplitude, explicit: bool) {
        if !explicit {
            self.backend.oneshot(duration_ms);
        } else if !amplitude.is_default() && self.strips_amplitudes() {
            self.metrics.record_amplitude_fallback();
            debug!(
                amplitude = amplitude.to_raw(),
                "Amplitude dropped for on/off motor"
            );
            self.backend.oneshot(duration_ms);
        } else {
            self.backend
                .oneshot_with_amplitude(duration_ms, amplitude.to_raw());
        }
    }
}

fn raw_repeat(index: Option<usize>) -> i32 {
    index
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(NO_REPEAT)
}

impl fmt::Debug for VibrationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VibrationController")
            .field("backend", &self.backend.name())
            .field("state", &self.state)
            .field("probe", &self.probe)
            .field("amplitude_fallback", &self.amplitude_fallback)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Drop for VibrationController {
    fn drop(&mut self) {
        if self.state == HandleState::Active {
            self.backend.release();
            self.state = HandleState::Disposed;
            debug!(
                backend = self.backend.name(),
                "Vibration controller released on drop"
            );
        }
    }
}
