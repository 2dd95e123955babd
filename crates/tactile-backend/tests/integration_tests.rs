//! Integration tests for backend acquisition and simulated playback.

use proptest::prelude::*;
use tactile_backend::prelude::*;
use tactile_command::EffectId;

type TestResult = Result<(), Box<dyn std::error::Error>>;

mod acquisition {
    use super::*;

    #[test]
    fn test_each_acquisition_is_independent() -> TestResult {
        let provider = SimulatedProvider::default();
        let mut first = provider.acquire()?;
        let second = provider.acquire()?;

        first.release();
        assert!(second.has_vibrator());
        Ok(())
    }

    #[test]
    fn test_null_selection_acquires_motorless_backend() -> TestResult {
        let provider = provider_for(BackendSelection::Null, SimulatedCapabilities::FULL);
        let backend = provider.acquire()?;
        assert!(!backend.has_vibrator());
        Ok(())
    }

    #[test]
    fn test_unsupported_selection_fails_without_panicking() {
        let provider = provider_for(BackendSelection::Unsupported, SimulatedCapabilities::FULL);
        let result = provider.acquire();
        assert!(matches!(result, Err(BackendError::Unavailable { .. })));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn test_capabilities_from_yaml_with_defaults() -> TestResult {
        let caps: SimulatedCapabilities = serde_yaml::from_str("has_amplitude_control: false")?;
        assert_eq!(caps, SimulatedCapabilities::ON_OFF);
        Ok(())
    }

    #[test]
    fn test_selection_from_json() -> TestResult {
        let selection: BackendSelection = serde_json::from_str(r#""unsupported""#)?;
        assert_eq!(selection, BackendSelection::Unsupported);
        Ok(())
    }
}

mod playback {
    use super::*;

    #[test]
    fn test_effect_outside_native_table_is_emulated() {
        let mut backend = SimulatedBackend::with_native_effects(
            SimulatedCapabilities::FULL,
            vec![EffectId::Tick, EffectId::HeavyClick],
        );
        backend.predefined_effect(EffectId::DoubleClick.to_raw());
        assert_eq!(
            backend.activity(),
            &MotorActivity::Effect {
                effect_id: 1,
                emulated: true
            }
        );
    }

    #[test]
    fn test_full_capability_keeps_amplitude() {
        let mut backend = SimulatedBackend::new(SimulatedCapabilities::FULL);
        backend.oneshot_with_amplitude(75, 200);
        assert_eq!(
            backend.activity(),
            &MotorActivity::Oneshot {
                duration_ms: 75,
                amplitude: 200
            }
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_last_command_wins(durations in prop::collection::vec(0u64..5_000, 1..20)) {
        let mut backend = SimulatedBackend::default();
        for duration in &durations {
            backend.oneshot(*duration);
        }
        let last = durations.last().copied().unwrap_or_default();
        prop_assert_eq!(
            backend.activity(),
            &MotorActivity::Oneshot { duration_ms: last, amplitude: -1 }
        );
        prop_assert_eq!(backend.commands_issued(), durations.len() as u64);
    }

    #[test]
    fn prop_release_is_terminal(commands_after in 0usize..10) {
        let mut backend = SimulatedBackend::default();
        backend.release();
        for _ in 0..commands_after {
            backend.oneshot(10);
            backend.cancel();
        }
        prop_assert!(backend.is_released());
        prop_assert!(backend.activity().is_idle());
        prop_assert_eq!(backend.commands_issued(), 0);
    }
}
