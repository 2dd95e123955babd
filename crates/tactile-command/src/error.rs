//! Validation error types.

/// Reasons a vibration request is rejected before it reaches a backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Amplitude outside the range accepted for the request shape.
    #[error("{shape} amplitude {value} is out of range (expected {expected})")]
    AmplitudeOutOfRange {
        /// Request shape the amplitude belongs to.
        shape: &'static str,
        /// The rejected value.
        value: i32,
        /// Human-readable accepted range.
        expected: &'static str,
    },

    /// Waveform amplitudes do not line up with its timings.
    #[error("waveform has {timings} timings but {amplitudes} amplitudes")]
    LengthMismatch {
        /// Number of timing entries.
        timings: usize,
        /// Number of amplitude entries.
        amplitudes: usize,
    },

    /// Repeat index is neither -1 nor a valid timing index.
    #[error("repeat index {index} is out of range for {len} timings")]
    RepeatIndexOutOfRange {
        /// The rejected index.
        index: i32,
        /// Number of timing entries.
        len: usize,
    },

    /// Effect id is not part of the predefined effect set.
    #[error("unknown predefined effect id {0}")]
    UnknownEffect(i32),

    /// Waveform without any timing entries.
    #[error("waveform must contain at least one timing")]
    EmptyWaveform,
}

impl ValidationError {
    /// Create an amplitude error for a one-shot request.
    #[must_use]
    pub fn oneshot_amplitude(value: i32) -> Self {
        Self::AmplitudeOutOfRange {
            shape: "oneshot",
            value,
            expected: "-1 or 1..=255",
        }
    }

    /// Create an amplitude error for a waveform segment.
    #[must_use]
    pub fn waveform_amplitude(value: i32) -> Self {
        Self::AmplitudeOutOfRange {
            shape: "waveform",
            value,
            expected: "0..=255",
        }
    }

    /// Name of the offending request field, for diagnostics.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::AmplitudeOutOfRange { .. } => "amplitude",
            Self::LengthMismatch { .. } => "amplitudes",
            Self::RepeatIndexOutOfRange { .. } => "repeat_index",
            Self::UnknownEffect(_) => "effect_id",
            Self::EmptyWaveform => "timings_ms",
        }
    }
}

/// A specialized `Result` type for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
