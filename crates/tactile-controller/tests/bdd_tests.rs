//! BDD tests for vibration control scenarios.
//!
//! Feature: vibration_control.feature

#![cfg(test)]

use tactile_backend::mock::{BackendCall, RecordingBackend, RecordingProvider};
use tactile_backend::{BackendSelection, SimulatedBackend, SimulatedCapabilities};
use tactile_controller::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

mod vibration_scenarios {
    use super::*;

    /// Scenario: Amplitude waveform is forwarded unchanged
    #[test]
    fn scenario_amplitude_waveform_is_forwarded_unchanged() -> TestResult {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut controller = VibrationController::new(Box::new(backend));

        controller.vibrate_waveform_with_amplitudes(&[0, 200, 100, 300], &[0, 0, 128, 255], -1)?;

        assert_eq!(
            log.commands(),
            vec![BackendCall::WaveformWithAmplitudes {
                timings_ms: vec![0, 200, 100, 300],
                amplitudes: vec![0, 0, 128, 255],
                repeat_index: -1,
            }]
        );
        Ok(())
    }

    /// Scenario: Mismatched amplitudes are rejected before the service
    #[test]
    fn scenario_mismatched_amplitudes_are_rejected_before_the_service() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut controller = VibrationController::new(Box::new(backend));

        let result = controller.vibrate_waveform_with_amplitudes(&[100, 200], &[50], -1);

        assert_eq!(
            result,
            Err(ControllerError::InvalidArgument(
                ValidationError::LengthMismatch {
                    timings: 2,
                    amplitudes: 1
                }
            ))
        );
        assert!(log.commands().is_empty());
    }

    /// Scenario: Click plays on hardware that lacks the effect
    #[test]
    fn scenario_click_plays_on_hardware_that_lacks_the_effect() -> TestResult {
        let backend = SimulatedBackend::with_native_effects(
            SimulatedCapabilities::FULL,
            vec![EffectId::Tick],
        );
        let mut controller = VibrationController::new(Box::new(backend));

        controller.vibrate_effect(EffectId::Click)?;

        assert_eq!(controller.metrics().effect_count, 1);
        Ok(())
    }

    /// Scenario: Disposed controller refuses commands without side effects
    #[test]
    fn scenario_disposed_controller_refuses_commands() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut controller = VibrationController::new(Box::new(backend));

        controller.dispose();
        log.clear();

        assert!(matches!(
            controller.vibrate(100),
            Err(ControllerError::DisposedHandleUsed { .. })
        ));
        assert!(matches!(
            controller.cancel(),
            Err(ControllerError::DisposedHandleUsed { .. })
        ));
        assert!(log.calls().is_empty());
        assert_eq!(controller.state(), HandleState::Disposed);
    }

    /// Scenario: Repeated dispose releases the service once
    #[test]
    fn scenario_repeated_dispose_releases_once() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut controller = VibrationController::new(Box::new(backend));

        controller.dispose();
        controller.dispose();
        controller.dispose();

        assert_eq!(log.release_count(), 1);
    }

    /// Scenario: Cancel is idempotent
    #[test]
    fn scenario_cancel_is_idempotent() -> TestResult {
        let mut controller =
            VibrationController::new(Box::new(SimulatedBackend::new(SimulatedCapabilities::FULL)));

        controller.cancel()?;
        controller.vibrate(500)?;
        controller.cancel()?;
        controller.cancel()?;

        assert_eq!(controller.metrics().cancel_count, 3);
        Ok(())
    }
}

mod lifecycle_scenarios {
    use super::*;

    /// Scenario: Platform without vibration yields no controller
    #[test]
    fn scenario_platform_without_vibration_yields_no_controller() -> TestResult {
        let config = ControllerConfig::builder()
            .backend(BackendSelection::Unsupported)
            .build()?;
        let mut lifecycle = ControllerLifecycle::from_config(config)?;

        assert!(lifecycle.acquire().is_none());
        assert_eq!(lifecycle.state(), LifecycleState::Unavailable);
        Ok(())
    }

    /// Scenario: Device without a motor yields no controller
    #[test]
    fn scenario_device_without_motor_yields_no_controller() -> TestResult {
        let config = ControllerConfig::builder()
            .simulated(SimulatedCapabilities::NONE)
            .build()?;
        let mut lifecycle = ControllerLifecycle::from_config(config)?;

        assert!(lifecycle.acquire().is_none());
        Ok(())
    }

    /// Scenario: Second acquire returns the cached controller
    #[test]
    fn scenario_second_acquire_returns_cached_controller() {
        let provider = RecordingProvider::default();
        let counter = provider.acquisition_counter();
        let mut lifecycle = ControllerLifecycle::new(Box::new(provider), ControllerConfig::default());

        assert!(lifecycle.acquire().is_some());
        assert!(lifecycle.acquire().is_some());

        assert_eq!(counter.load(std::sync::atomic::Ordering::Acquire), 1);
    }

    /// Scenario: Release disposes the controller and ends acquisition
    #[test]
    fn scenario_release_disposes_and_ends_acquisition() {
        let provider = RecordingProvider::default();
        let log = provider.log();
        let mut lifecycle = ControllerLifecycle::new(Box::new(provider), ControllerConfig::default());

        assert!(lifecycle.acquire().is_some());
        lifecycle.release();

        assert_eq!(log.release_count(), 1);
        assert!(lifecycle.acquire().is_none());
        assert_eq!(lifecycle.state(), LifecycleState::Released);
    }

    /// Scenario: On/off motor plays amplitude pattern at default strength
    #[test]
    fn scenario_on_off_motor_plays_pattern_at_default_strength() -> TestResult {
        let config = ControllerConfig::builder()
            .simulated(SimulatedCapabilities::ON_OFF)
            .amplitude_fallback(AmplitudeFallback::DefaultStrength)
            .build()?;
        let provider = RecordingProvider::new(RecordingBackend::with_capabilities(true, false));
        let log = provider.log();
        let mut lifecycle = ControllerLifecycle::new(Box::new(provider), config);

        let controller = lifecycle.acquire().ok_or("controller should be available")?;
        controller.vibrate_waveform_with_amplitudes(&[0, 200, 100, 300], &[0, 0, 128, 255], -1)?;

        assert_eq!(
            log.last_command(),
            Some(BackendCall::Waveform {
                timings_ms: vec![200, 400],
                repeat_index: -1,
            })
        );
        Ok(())
    }
}
