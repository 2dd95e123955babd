//! Amplitude stripping for motors without strength control.

/// Constant-strength equivalent of a waveform with per-segment amplitudes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnOffPattern {
    /// Alternating off/on timings, starting with an off slot.
    pub timings_ms: Vec<u64>,
    /// Repeat index into `timings_ms`, or `None` to play once.
    pub repeat_index: Option<usize>,
}

/// Convert a waveform with amplitudes into an off/on pattern.
///
/// Slots with amplitude 0 become off time and every other slot becomes on
/// time. Adjacent slots in the same state are merged, except at the repeat
/// index: playback must still loop back to the same instant, so the repeated
/// slot always starts a new timing entry (padded with a zero-length slot of
/// the opposite state when the parity would not match).
///
/// Total duration and total on-time are preserved.
#[must_use]
pub fn strip_amplitudes(
    timings_ms: &[u64],
    amplitudes: &[u8],
    repeat_index: Option<usize>,
) -> OnOffPattern {
    let mut timings = Vec::with_capacity(timings_ms.len());
    let mut mapped_repeat = None;
    let mut slot_on = false;
    let mut accumulated = 0u64;

    for (index, (timing, amplitude)) in timings_ms.iter().zip(amplitudes).enumerate() {
        let on = *amplitude != 0;
        let starts_repeat = repeat_index == Some(index);

        if starts_repeat && index > 0 {
            timings.push(accumulated);
            accumulated = 0;
            slot_on = !slot_on;
        }
        if on != slot_on {
            timings.push(accumulated);
            accumulated = 0;
            slot_on = !slot_on;
        }
        if starts_repeat {
            mapped_repeat = Some(timings.len());
        }
        accumulated = accumulated.saturating_add(*timing);
    }
    timings.push(accumulated);

    OnOffPattern {
        timings_ms: timings,
        repeat_index: mapped_repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_slots_in_the_same_state() {
        let pattern = strip_amplitudes(&[0, 200, 100, 300], &[0, 0, 128, 255], None);
        assert_eq!(pattern.timings_ms, vec![200, 400]);
        assert_eq!(pattern.repeat_index, None);
    }

    #[test]
    fn test_leading_on_slot_gets_zero_wait() {
        let pattern = strip_amplitudes(&[50, 50], &[255, 0], None);
        assert_eq!(pattern.timings_ms, vec![0, 50, 50]);
    }

    #[test]
    fn test_repeat_slot_starts_new_entry() {
        // Slots 1 and 2 are both on; the loop must restart at slot 2.
        let pattern = strip_amplitudes(&[10, 20, 30, 40], &[0, 100, 200, 0], Some(2));
        assert_eq!(pattern.timings_ms, vec![10, 20, 0, 30, 40]);
        assert_eq!(pattern.repeat_index, Some(3));
    }

    #[test]
    fn test_repeat_from_start() {
        let pattern = strip_amplitudes(&[100, 100], &[0, 255], Some(0));
        assert_eq!(pattern.timings_ms, vec![100, 100]);
        assert_eq!(pattern.repeat_index, Some(0));

        let pattern = strip_amplitudes(&[100, 100], &[255, 0], Some(0));
        assert_eq!(pattern.timings_ms, vec![0, 100, 100]);
        assert_eq!(pattern.repeat_index, Some(1));
    }
}
