//! Driver calling-convention constants

/// Amplitude sentinel meaning "use the device default strength".
pub const DEFAULT_AMPLITUDE: i32 = -1;

/// Smallest explicit one-shot amplitude. Zero would be a silent one-shot.
pub const MIN_ONESHOT_AMPLITUDE: i32 = 1;

/// Largest amplitude the driver accepts.
pub const MAX_AMPLITUDE: i32 = 255;

/// Waveform amplitude that turns the motor off for a segment.
pub const AMPLITUDE_OFF: u8 = 0;

/// Repeat index sentinel meaning "play the waveform once".
pub const NO_REPEAT: i32 = -1;
