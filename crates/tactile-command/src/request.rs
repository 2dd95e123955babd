//! Vibration request shapes
//!
//! [`RawVibrationRequest`] is what callers hand in: plain integers, the
//! `-1` sentinels of the platform calling convention and optional fields.
//! [`VibrationRequest`] is what comes out of the
//! [`CommandValidator`](crate::CommandValidator): every invariant is carried
//! by the types, so a backend never sees a malformed request.

use core::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AMPLITUDE, NO_REPEAT};
use crate::effect::EffectId;

/// Strength of a one-shot vibration.
///
/// # Examples
///
/// ```
/// use tactile_command::OneshotAmplitude;
///
/// assert_eq!(OneshotAmplitude::Default.to_raw(), -1);
/// assert_eq!(OneshotAmplitude::fixed(128).map(|a| a.to_raw()), Some(128));
/// assert_eq!(OneshotAmplitude::fixed(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneshotAmplitude {
    /// Device default strength (`-1` on the wire).
    #[default]
    Default,
    /// Explicit strength in `1..=255`.
    Fixed(NonZeroU8),
}

impl OneshotAmplitude {
    /// Explicit strength, `None` for zero.
    #[must_use]
    pub fn fixed(level: u8) -> Option<Self> {
        NonZeroU8::new(level).map(Self::Fixed)
    }

    /// Value passed to the driver.
    #[must_use]
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Default => DEFAULT_AMPLITUDE,
            Self::Fixed(level) => i32::from(level.get()),
        }
    }

    #[must_use]
    pub fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Discriminant of a [`VibrationRequest`], used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Oneshot,
    Waveform,
    PredefinedEffect,
}

impl RequestKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Oneshot => "oneshot",
            Self::Waveform => "waveform",
            Self::PredefinedEffect => "predefined_effect",
        }
    }
}

/// A validated, normalized vibration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VibrationRequest {
    /// Run the motor once for `duration_ms`, then stop.
    Oneshot {
        duration_ms: u64,
        amplitude: OneshotAmplitude,
    },
    /// Alternating off/on pattern.
    ///
    /// Even-indexed timings are off durations, odd-indexed timings are on
    /// durations. When `amplitudes` is present it has one entry per timing
    /// and an amplitude of 0 turns the motor off for that slot.
    Waveform {
        timings_ms: Vec<u64>,
        amplitudes: Option<Vec<u8>>,
        /// Index playback loops back to; `None` plays the pattern once.
        repeat_index: Option<usize>,
    },
    /// Hardware-defined effect.
    PredefinedEffect { effect: EffectId },
}

impl VibrationRequest {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Oneshot { .. } => RequestKind::Oneshot,
            Self::Waveform { .. } => RequestKind::Waveform,
            Self::PredefinedEffect { .. } => RequestKind::PredefinedEffect,
        }
    }

    /// Repeat index in the driver convention (`-1` for no repeat).
    ///
    /// Returns `None` for shapes without a repeat index.
    #[must_use]
    pub fn raw_repeat_index(&self) -> Option<i32> {
        match self {
            Self::Waveform { repeat_index, .. } => Some(
                repeat_index
                    .and_then(|index| i32::try_from(index).ok())
                    .unwrap_or(NO_REPEAT),
            ),
            _ => None,
        }
    }

    /// How long the motor pattern runs, if it terminates on its own.
    ///
    /// Repeating waveforms run until cancelled and predefined effects have a
    /// hardware-defined length, so both yield `None`.
    #[must_use]
    pub fn total_duration_ms(&self) -> Option<u64> {
        match self {
            Self::Oneshot { duration_ms, .. } => Some(*duration_ms),
            Self::Waveform {
                timings_ms,
                repeat_index: None,
                ..
            } => Some(timings_ms.iter().fold(0u64, |acc, t| acc.saturating_add(*t))),
            Self::Waveform { .. } | Self::PredefinedEffect { .. } => None,
        }
    }

    /// True when no segment of the request would drive the motor.
    ///
    /// Silent requests are valid; the driver simply skips every segment.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        match self {
            Self::Oneshot { duration_ms, .. } => *duration_ms == 0,
            Self::Waveform {
                timings_ms,
                amplitudes: Some(amplitudes),
                ..
            } => timings_ms
                .iter()
                .zip(amplitudes)
                .all(|(timing, amplitude)| *timing == 0 || *amplitude == 0),
            Self::Waveform {
                timings_ms,
                amplitudes: None,
                ..
            } => timings_ms.iter().skip(1).step_by(2).all(|timing| *timing == 0),
            Self::PredefinedEffect { .. } => false,
        }
    }
}

/// Unvalidated request as received from a caller.
///
/// Amplitude, repeat index and effect id keep the driver's integer
/// convention so out-of-range values can be reported instead of being
/// truncated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawVibrationRequest {
    Oneshot {
        duration_ms: u64,
        /// Omitted amplitude means the device default.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amplitude: Option<i32>,
    },
    Waveform {
        timings_ms: Vec<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amplitudes: Option<Vec<i32>>,
        #[serde(default = "no_repeat")]
        repeat_index: i32,
    },
    Effect {
        effect_id: i32,
    },
}

fn no_repeat() -> i32 {
    NO_REPEAT
}

impl RawVibrationRequest {
    /// One-shot at default strength.
    #[must_use]
    pub fn oneshot(duration_ms: u64) -> Self {
        Self::Oneshot {
            duration_ms,
            amplitude: None,
        }
    }

    #[must_use]
    pub fn oneshot_with_amplitude(duration_ms: u64, amplitude: i32) -> Self {
        Self::Oneshot {
            duration_ms,
            amplitude: Some(amplitude),
        }
    }

    /// Constant-strength waveform.
    #[must_use]
    pub fn waveform(timings_ms: impl Into<Vec<u64>>, repeat_index: i32) -> Self {
        Self::Waveform {
            timings_ms: timings_ms.into(),
            amplitudes: None,
            repeat_index,
        }
    }

    #[must_use]
    pub fn waveform_with_amplitudes(
        timings_ms: impl Into<Vec<u64>>,
        amplitudes: impl Into<Vec<i32>>,
        repeat_index: i32,
    ) -> Self {
        Self::Waveform {
            timings_ms: timings_ms.into(),
            amplitudes: Some(amplitudes.into()),
            repeat_index,
        }
    }

    #[must_use]
    pub fn effect(effect_id: i32) -> Self {
        Self::Effect { effect_id }
    }
}

impl From<EffectId> for RawVibrationRequest {
    fn from(effect: EffectId) -> Self {
        Self::effect(effect.to_raw())
    }
}

impl From<&VibrationRequest> for RawVibrationRequest {
    fn from(request: &VibrationRequest) -> Self {
        match request {
            VibrationRequest::Oneshot {
                duration_ms,
                amplitude,
            } => Self::Oneshot {
                duration_ms: *duration_ms,
                amplitude: (!amplitude.is_default()).then(|| amplitude.to_raw()),
            },
            VibrationRequest::Waveform {
                timings_ms,
                amplitudes,
                repeat_index,
            } => Self::Waveform {
                timings_ms: timings_ms.clone(),
                amplitudes: amplitudes
                    .as_ref()
                    .map(|values| values.iter().map(|a| i32::from(*a)).collect()),
                // Indices past i32::MAX cannot be valid and must not read as "no repeat".
                repeat_index: repeat_index
                    .map_or(NO_REPEAT, |index| i32::try_from(index).unwrap_or(i32::MAX)),
            },
            VibrationRequest::PredefinedEffect { effect } => Self::from(*effect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_raw_repeat_index() {
        let looping = VibrationRequest::Waveform {
            timings_ms: vec![0, 100, 50, 100],
            amplitudes: None,
            repeat_index: Some(2),
        };
        assert_eq!(looping.raw_repeat_index(), Some(2));

        let once = VibrationRequest::Waveform {
            timings_ms: vec![0, 100],
            amplitudes: None,
            repeat_index: None,
        };
        assert_eq!(once.raw_repeat_index(), Some(-1));

        let effect = VibrationRequest::PredefinedEffect {
            effect: EffectId::Tick,
        };
        assert_eq!(effect.raw_repeat_index(), None);
    }

    #[test]
    fn test_total_duration() {
        let oneshot = VibrationRequest::Oneshot {
            duration_ms: 250,
            amplitude: OneshotAmplitude::Default,
        };
        assert_eq!(oneshot.total_duration_ms(), Some(250));

        let once = VibrationRequest::Waveform {
            timings_ms: vec![0, 200, 100, 300],
            amplitudes: None,
            repeat_index: None,
        };
        assert_eq!(once.total_duration_ms(), Some(600));

        let looping = VibrationRequest::Waveform {
            timings_ms: vec![0, 200],
            amplitudes: None,
            repeat_index: Some(0),
        };
        assert_eq!(looping.total_duration_ms(), None);
    }

    #[test]
    fn test_silence_detection() {
        let off_only = VibrationRequest::Waveform {
            timings_ms: vec![500, 0, 200, 0],
            amplitudes: None,
            repeat_index: None,
        };
        assert!(off_only.is_silent());

        let zero_amplitude = VibrationRequest::Waveform {
            timings_ms: vec![100, 200],
            amplitudes: Some(vec![0, 0]),
            repeat_index: None,
        };
        assert!(zero_amplitude.is_silent());

        let audible = VibrationRequest::Waveform {
            timings_ms: vec![0, 200, 100, 300],
            amplitudes: Some(vec![0, 0, 128, 255]),
            repeat_index: None,
        };
        assert!(!audible.is_silent());
    }

    #[test]
    fn test_raw_request_json_defaults() -> TestResult {
        let request: RawVibrationRequest =
            serde_json::from_str(r#"{"type":"waveform","timings_ms":[0,100]}"#)?;
        assert_eq!(request, RawVibrationRequest::waveform(vec![0, 100], -1));

        let request: RawVibrationRequest =
            serde_json::from_str(r#"{"type":"oneshot","duration_ms":40}"#)?;
        assert_eq!(request, RawVibrationRequest::oneshot(40));
        Ok(())
    }

    #[test]
    fn test_raw_request_rejects_negative_timings() {
        let parsed: Result<RawVibrationRequest, _> =
            serde_json::from_str(r#"{"type":"waveform","timings_ms":[-5,100]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_raw_from_validated_keeps_sentinels() {
        let oneshot = VibrationRequest::Oneshot {
            duration_ms: 30,
            amplitude: OneshotAmplitude::Default,
        };
        assert_eq!(
            RawVibrationRequest::from(&oneshot),
            RawVibrationRequest::oneshot(30)
        );

        let looping = VibrationRequest::Waveform {
            timings_ms: vec![0, 100],
            amplitudes: Some(vec![0, 200]),
            repeat_index: Some(1),
        };
        assert_eq!(
            RawVibrationRequest::from(&looping),
            RawVibrationRequest::waveform_with_amplitudes(vec![0, 100], vec![0, 200], 1)
        );
    }
}
