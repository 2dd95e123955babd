//! Software vibration backend.
//!
//! This module provides `SimulatedBackend`, a software implementation of the
//! `VibrationBackend` trait for hardware-free environments and tests. It
//! reproduces the driver-side policies a real platform applies: amplitude
//! fallback on motors without strength control, generic emulation of effects
//! the hardware lacks, and silence on devices without a motor.

use serde::{Deserialize, Serialize};
use tactile_command::{DEFAULT_AMPLITUDE, EffectId};
use tracing::{debug, warn};

use crate::backend::VibrationBackend;
use crate::error::{BackendError, BackendResult};

/// Hardware capabilities a simulated device reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedCapabilities {
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
}

impl SimulatedCapabilities {
    /// Motor with amplitude control.
    pub const FULL: Self = Self {
        has_vibrator: true,
        has_amplitude_control: true,
    };

    /// Motor that only switches on and off.
    pub const ON_OFF: Self = Self {
        has_vibrator: true,
        has_amplitude_control: false,
    };

    /// Device without a motor.
    pub const NONE: Self = Self {
        has_vibrator: false,
        has_amplitude_control: false,
    };

    /// Validate the capability combination.
    ///
    /// # Errors
    ///
    /// Returns an error when amplitude control is claimed without a vibrator.
    pub fn validate(&self) -> BackendResult<()> {
        if self.has_amplitude_control && !self.has_vibrator {
            return Err(BackendError::invalid_configuration(
                "has_amplitude_control requires has_vibrator",
            ));
        }
        Ok(())
    }
}

impl Default for SimulatedCapabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// What the simulated motor is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MotorActivity {
    #[default]
    Idle,
    Oneshot {
        duration_ms: u64,
        /// Strength actually applied (`-1` when the driver used its default).
        amplitude: i32,
    },
    Waveform {
        timings_ms: Vec<u64>,
        /// Applied per-segment strengths; `None` for constant strength.
        amplitudes: Option<Vec<u8>>,
        repeat_index: i32,
    },
    Effect {
        effect_id: i32,
        /// True when a generic pattern stands in for the requested effect.
        emulated: bool,
    },
}

impl MotorActivity {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Software stand-in for a platform vibration service.
///
/// # Example
///
/// ```rust
/// use tactile_backend::{MotorActivity, SimulatedBackend, SimulatedCapabilities, VibrationBackend};
///
/// let mut backend = SimulatedBackend::new(SimulatedCapabilities::ON_OFF);
/// backend.oneshot_with_amplitude(200, 64);
///
/// // No amplitude control: the driver falls back to its default strength.
/// assert_eq!(
///     backend.activity(),
///     &MotorActivity::Oneshot { duration_ms: 200, amplitude: -1 }
/// );
/// ```
#[derive(Debug)]
pub struct SimulatedBackend {
    capabilities: SimulatedCapabilities,
    native_effects: Vec<EffectId>,
    activity: MotorActivity,
    commands_issued: u64,
    cancel_count: u64,
    released: bool,
}

impl SimulatedBackend {
    /// Create a backend where every predefined effect is native.
    #[must_use]
    pub fn new(capabilities: SimulatedCapabilities) -> Self {
        Self::with_native_effects(capabilities, EffectId::ALL.to_vec())
    }

    /// Create a backend that only implements `native_effects` in hardware.
    ///
    /// Other effect ids are played as a generic pattern.
    #[must_use]
    pub fn with_native_effects(
        capabilities: SimulatedCapabilities,
        native_effects: Vec<EffectId>,
    ) -> Self {
        Self {
            capabilities,
            native_effects,
            activity: MotorActivity::Idle,
            commands_issued: 0,
            cancel_count: 0,
            released: false,
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> SimulatedCapabilities {
        self.capabilities
    }

    /// Current motor activity.
    #[must_use]
    pub fn activity(&self) -> &MotorActivity {
        &self.activity
    }

    /// Number of vibrate commands received, including silently dropped ones.
    #[must_use]
    pub fn commands_issued(&self) -> u64 {
        self.commands_issued
    }

    #[must_use]
    pub fn cancel_count(&self) -> u64 {
        self.cancel_count
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Record a command and report whether the motor should act on it.
    fn accept_command(&mut self, command: &'static str) -> bool {
        if self.released {
            warn!(command, "Command issued to released simulated backend; ignored");
            return false;
        }
        self.commands_issued = self.commands_issued.saturating_add(1);
        if !self.capabilities.has_vibrator {
            debug!(command, "Simulated device has no vibrator; command dropped");
            return false;
        }
        true
    }

    fn applied_amplitude(&self, amplitude: i32) -> i32 {
        if self.capabilities.has_amplitude_control {
            amplitude
        } else {
            DEFAULT_AMPLITUDE
        }
    }

    /// Without amplitude control every non-zero slot plays at full strength.
    fn applied_waveform_amplitudes(&self, amplitudes: &[u8]) -> Vec<u8> {
        if self.capabilities.has_amplitude_control {
            amplitudes.to_vec()
        } else {
            amplitudes
                .iter()
                .map(|a| if *a == 0 { 0 } else { u8::MAX })
                .collect()
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SimulatedCapabilities::default())
    }
}

impl VibrationBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn has_vibrator(&self) -> bool {
        self.capabilities.has_vibrator
    }

    fn has_amplitude_control(&self) -> bool {
        self.capabilities.has_amplitude_control
    }

    fn oneshot(&mut self, duration_ms: u64) {
        self.oneshot_with_amplitude(duration_ms, DEFAULT_AMPLITUDE);
    }

    fn oneshot_with_amplitude(&mut self, duration_ms: u64, amplitude: i32) {
        if !self.accept_command("oneshot") {
            return;
        }
        let amplitude = self.applied_amplitude(amplitude);
        debug!(duration_ms, amplitude, "Simulated one-shot");
        self.activity = MotorActivity::Oneshot {
            duration_ms,
            amplitude,
        };
    }

    fn waveform(&mut self, timings_ms: &[u64], repeat_index: i32) {
        if !self.accept_command("waveform") {
            return;
        }
        debug!(segments = timings_ms.len(), repeat_index, "Simulated waveform");
        self.activity = MotorActivity::Waveform {
            timings_ms: timings_ms.to_vec(),
            amplitudes: None,
            repeat_index,
        };
    }

    fn waveform_with_amplitudes(&mut self, timings_ms: &[u64], amplitudes: &[u8], repeat_index: i32) {
        if !self.accept_command("waveform_with_amplitudes") {
            return;
        }
        debug!(
            segments = timings_ms.len(),
            repeat_index,
            amplitude_control = self.capabilities.has_amplitude_control,
            "Simulated waveform with amplitudes"
        );
        self.activity = MotorActivity::Waveform {
            timings_ms: timings_ms.to_vec(),
            amplitudes: Some(self.applied_waveform_amplitudes(amplitudes)),
            repeat_index,
        };
    }

    fn predefined_effect(&mut self, effect_id: i32) {
        if !self.accept_command("predefined_effect") {
            return;
        }
        let emulated = !EffectId::from_raw(effect_id)
            .is_some_and(|effect| self.native_effects.contains(&effect));
        debug!(effect_id, emulated, "Simulated predefined effect");
        self.activity = MotorActivity::Effect {
            effect_id,
            emulated,
        };
    }

    fn cancel(&mut self) {
        if self.released {
            return;
        }
        self.cancel_count = self.cancel_count.saturating_add(1);
        self.activity = MotorActivity::Idle;
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.activity = MotorActivity::Idle;
        self.released = true;
        debug!(
            commands_issued = self.commands_issued,
            "Simulated backend released"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vibrate_supersedes_active_pattern() {
        let mut backend = SimulatedBackend::default();
        backend.waveform(&[0, 100, 50, 100], 0);
        backend.oneshot(30);
        assert_eq!(
            backend.activity(),
            &MotorActivity::Oneshot {
                duration_ms: 30,
                amplitude: -1
            }
        );
        assert_eq!(backend.commands_issued(), 2);
    }

    #[test]
    fn test_no_vibrator_drops_commands() {
        let mut backend = SimulatedBackend::new(SimulatedCapabilities::NONE);
        backend.oneshot(100);
        backend.predefined_effect(EffectId::Click.to_raw());
        assert!(backend.activity().is_idle());
        assert_eq!(backend.commands_issued(), 2);
    }

    #[test]
    fn test_on_off_motor_masks_amplitudes() {
        let mut backend = SimulatedBackend::new(SimulatedCapabilities::ON_OFF);
        backend.waveform_with_amplitudes(&[0, 200, 100, 300], &[0, 0, 128, 255], -1);
        assert_eq!(
            backend.activity(),
            &MotorActivity::Waveform {
                timings_ms: vec![0, 200, 100, 300],
                amplitudes: Some(vec![0, 0, 255, 255]),
                repeat_index: -1,
            }
        );
    }

    #[test]
    fn test_missing_native_effect_is_emulated() {
        let mut backend =
            SimulatedBackend::with_native_effects(SimulatedCapabilities::FULL, vec![EffectId::Tick]);
        backend.predefined_effect(EffectId::Click.to_raw());
        assert_eq!(
            backend.activity(),
            &MotorActivity::Effect {
                effect_id: 0,
                emulated: true
            }
        );
        backend.predefined_effect(EffectId::Tick.to_raw());
        assert_eq!(
            backend.activity(),
            &MotorActivity::Effect {
                effect_id: 2,
                emulated: false
            }
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut backend = SimulatedBackend::default();
        backend.cancel();
        backend.oneshot(500);
        backend.cancel();
        backend.cancel();
        assert!(backend.activity().is_idle());
        assert_eq!(backend.cancel_count(), 3);
    }

    #[test]
    fn test_release_stops_motor_and_ignores_later_commands() {
        let mut backend = SimulatedBackend::default();
        backend.oneshot(500);
        backend.release();
        assert!(backend.is_released());
        assert!(backend.activity().is_idle());

        backend.oneshot(100);
        assert!(backend.activity().is_idle());
        assert_eq!(backend.commands_issued(), 1);
    }

    #[test]
    fn test_capability_validation() {
        assert!(SimulatedCapabilities::FULL.validate().is_ok());
        assert!(SimulatedCapabilities::NONE.validate().is_ok());
        let inconsistent = SimulatedCapabilities {
            has_vibrator: false,
            has_amplitude_control: true,
        };
        assert!(inconsistent.validate().is_err());
    }
}
