//! Vibration service contract.
//!
//! This module defines the `VibrationBackend` trait: the calls a platform
//! bridge must expose for a controller to drive the motor.

/// Platform vibration service.
///
/// Every command is fire-and-forget: it returns as soon as the command is
/// issued and the physical vibration runs on the driver's own clock. Issuing
/// a new vibrate command supersedes whatever pattern is active.
///
/// Values arrive already validated. Implementations may assume:
/// - one-shot amplitudes are `-1` or within `1..=255`
/// - waveform amplitudes, when present, have one entry per timing
/// - repeat indices are `-1` or a valid timing index
///
/// # Implementation Requirements
///
/// 1. Capability probes MUST be side-effect free
/// 2. Amplitudes MUST be ignored, not rejected, when the motor has no
///    amplitude control
/// 3. Unknown or unsupported effect ids MUST fall back to a generic pattern
/// 4. `release()` MUST stop any active vibration before dropping the
///    underlying reference
pub trait VibrationBackend: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// True iff the device exposes a vibration motor.
    fn has_vibrator(&self) -> bool;

    /// True iff the motor can vary its strength.
    fn has_amplitude_control(&self) -> bool;

    /// Vibrate for `duration_ms` at the default strength.
    fn oneshot(&mut self, duration_ms: u64);

    /// Vibrate for `duration_ms` at `amplitude` (`-1` for default).
    fn oneshot_with_amplitude(&mut self, duration_ms: u64, amplitude: i32);

    /// Play a constant-strength off/on pattern.
    fn waveform(&mut self, timings_ms: &[u64], repeat_index: i32);

    /// Play a pattern with one amplitude per timing.
    fn waveform_with_amplitudes(&mut self, timings_ms: &[u64], amplitudes: &[u8], repeat_index: i32);

    /// Play a predefined effect by platform id.
    fn predefined_effect(&mut self, effect_id: i32);

    /// Stop any active pattern. Safe to call when idle.
    fn cancel(&mut self);

    /// Release the underlying service reference.
    fn release(&mut self);
}
