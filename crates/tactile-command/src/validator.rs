//! Request validation and normalization.

use crate::constants::{DEFAULT_AMPLITUDE, MAX_AMPLITUDE, MIN_ONESHOT_AMPLITUDE, NO_REPEAT};
use crate::effect::EffectId;
use crate::error::{ValidationError, ValidationResult};
use crate::request::{OneshotAmplitude, RawVibrationRequest, VibrationRequest};

/// Turns raw requests into [`VibrationRequest`]s or rejects them.
///
/// Validation is all-or-nothing: a request either passes every check and is
/// returned normalized, or the first failing check is reported and nothing
/// is produced. Shapes are checked, content is not: all-zero timings are
/// accepted since the driver simply skips those segments.
///
/// # Examples
///
/// ```
/// use tactile_command::{CommandValidator, RawVibrationRequest, ValidationError};
///
/// let validator = CommandValidator::new();
///
/// let ok = validator.validate(&RawVibrationRequest::waveform_with_amplitudes(
///     vec![0, 200, 100, 300],
///     vec![0, 0, 128, 255],
///     -1,
/// ));
/// assert!(ok.is_ok());
///
/// let mismatch = validator.validate(&RawVibrationRequest::waveform_with_amplitudes(
///     vec![100, 200],
///     vec![50],
///     -1,
/// ));
/// assert!(matches!(mismatch, Err(ValidationError::LengthMismatch { .. })));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandValidator;

impl CommandValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate any request shape.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the request violates.
    pub fn validate(&self, raw: &RawVibrationRequest) -> ValidationResult<VibrationRequest> {
        match raw {
            RawVibrationRequest::Oneshot {
                duration_ms,
                amplitude,
            } => self.oneshot(*duration_ms, *amplitude),
            RawVibrationRequest::Waveform {
                timings_ms,
                amplitudes,
                repeat_index,
            } => self.waveform(timings_ms, amplitudes.as_deref(), *repeat_index),
            RawVibrationRequest::Effect { effect_id } => self.effect(*effect_id),
        }
    }

    /// Validate a one-shot. `None` amplitude normalizes to the device default.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmplitudeOutOfRange`] unless the amplitude
    /// is `-1` or within `1..=255`.
    pub fn oneshot(
        &self,
        duration_ms: u64,
        amplitude: Option<i32>,
    ) -> ValidationResult<VibrationRequest> {
        let amplitude = match amplitude.unwrap_or(DEFAULT_AMPLITUDE) {
            DEFAULT_AMPLITUDE => OneshotAmplitude::Default,
            value if (MIN_ONESHOT_AMPLITUDE..=MAX_AMPLITUDE).contains(&value) => {
                u8::try_from(value)
                    .ok()
                    .and_then(OneshotAmplitude::fixed)
                    .ok_or_else(|| ValidationError::oneshot_amplitude(value))?
            }
            value => return Err(ValidationError::oneshot_amplitude(value)),
        };

        Ok(VibrationRequest::Oneshot {
            duration_ms,
            amplitude,
        })
    }

    /// Validate a waveform, with or without per-segment amplitudes.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyWaveform`] for an empty timing sequence
    /// - [`ValidationError::LengthMismatch`] when amplitudes and timings differ in length
    /// - [`ValidationError::AmplitudeOutOfRange`] for amplitudes outside `0..=255`
    /// - [`ValidationError::RepeatIndexOutOfRange`] unless the index is `-1` or a valid timing index
    pub fn waveform(
        &self,
        timings_ms: &[u64],
        amplitudes: Option<&[i32]>,
        repeat_index: i32,
    ) -> ValidationResult<VibrationRequest> {
        if timings_ms.is_empty() {
            return Err(ValidationError::EmptyWaveform);
        }

        let amplitudes = match amplitudes {
            Some(values) => Some(normalize_waveform_amplitudes(timings_ms.len(), values)?),
            None => None,
        };

        let repeat_index = normalize_repeat_index(timings_ms.len(), repeat_index)?;

        Ok(VibrationRequest::Waveform {
            timings_ms: timings_ms.to_vec(),
            amplitudes,
            repeat_index,
        })
    }

    /// Validate a predefined effect id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownEffect`] for ids outside the
    /// predefined effect set.
    pub fn effect(&self, effect_id: i32) -> ValidationResult<VibrationRequest> {
        EffectId::from_raw(effect_id)
            .map(|effect| VibrationRequest::PredefinedEffect { effect })
            .ok_or(ValidationError::UnknownEffect(effect_id))
    }
}

fn normalize_waveform_amplitudes(timings: usize, values: &[i32]) -> ValidationResult<Vec<u8>> {
    if values.len() != timings {
        return Err(ValidationError::LengthMismatch {
            timings,
            amplitudes: values.len(),
        });
    }

    values
        .iter()
        .map(|value| {
            u8::try_from(*value).map_err(|_| ValidationError::waveform_amplitude(*value))
        })
        .collect()
}

fn normalize_repeat_index(len: usize, index: i32) -> ValidationResult<Option<usize>> {
    if index == NO_REPEAT {
        return Ok(None);
    }

    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .map(Some)
        .ok_or(ValidationError::RepeatIndexOutOfRange { index, len })
}
