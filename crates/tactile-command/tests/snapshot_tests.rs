//! Snapshot tests for validation error messages.
//!
//! Callers surface these strings directly, so they are pinned here.

use insta::assert_snapshot;
use tactile_command::prelude::*;

#[test]
fn test_oneshot_amplitude_message() {
    assert_snapshot!(
        ValidationError::oneshot_amplitude(0).to_string(),
        @"oneshot amplitude 0 is out of range (expected -1 or 1..=255)"
    );
}

#[test]
fn test_waveform_amplitude_message() {
    assert_snapshot!(
        ValidationError::waveform_amplitude(300).to_string(),
        @"waveform amplitude 300 is out of range (expected 0..=255)"
    );
}

#[test]
fn test_length_mismatch_message() {
    let err = CommandValidator::new().waveform(&[100, 200], Some(&[50]), -1);
    assert_snapshot!(
        err.map_or_else(|e| e.to_string(), |r| format!("{r:?}")),
        @"waveform has 2 timings but 1 amplitudes"
    );
}

#[test]
fn test_repeat_index_message() {
    assert_snapshot!(
        ValidationError::RepeatIndexOutOfRange { index: 7, len: 4 }.to_string(),
        @"repeat index 7 is out of range for 4 timings"
    );
}

#[test]
fn test_unknown_effect_message() {
    assert_snapshot!(
        ValidationError::UnknownEffect(9).to_string(),
        @"unknown predefined effect id 9"
    );
}

#[test]
fn test_empty_waveform_message() {
    assert_snapshot!(
        ValidationError::EmptyWaveform.to_string(),
        @"waveform must contain at least one timing"
    );
}

#[test]
fn test_parse_effect_message() {
    let err = "buzz".parse::<EffectId>();
    assert_snapshot!(
        err.map_or_else(|e| e.to_string(), |e| e.to_string()),
        @"unknown effect name 'buzz' (expected click, double-click, tick or heavy-click)"
    );
}
