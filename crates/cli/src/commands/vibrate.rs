//! Vibration commands

use anyhow::Result;
use tactile_command::RawVibrationRequest;
use tracing::info;

use crate::commands::{EffectArgs, GlobalOptions, OneshotArgs, WaveformArgs, with_controller};
use crate::error::CliError;
use crate::output;

/// Forward a one-shot vibration.
pub fn oneshot(args: &OneshotArgs, options: &GlobalOptions<'_>) -> Result<()> {
    let request = match args.amplitude {
        Some(amplitude) => RawVibrationRequest::oneshot_with_amplitude(args.duration_ms, amplitude),
        None => RawVibrationRequest::oneshot(args.duration_ms),
    };
    submit(&request, options)
}

/// Forward a waveform.
pub fn waveform(args: &WaveformArgs, options: &GlobalOptions<'_>) -> Result<()> {
    let request = RawVibrationRequest::Waveform {
        timings_ms: args.timings.clone(),
        amplitudes: args.amplitudes.clone(),
        repeat_index: args.repeat,
    };
    submit(&request, options)
}

/// Forward a predefined effect by name or raw id.
pub fn effect(args: &EffectArgs, options: &GlobalOptions<'_>) -> Result<()> {
    let request = match (args.name, args.id) {
        (Some(effect), _) => RawVibrationRequest::from(effect),
        (None, Some(id)) => RawVibrationRequest::effect(id),
        (None, None) => {
            return Err(CliError::ValidationError("an effect name or --id is required".into()).into());
        }
    };
    submit(&request, options)
}

/// Stop any active vibration.
pub fn cancel(options: &GlobalOptions<'_>) -> Result<()> {
    let outcome = with_controller(options, |controller| Ok(controller.cancel()?))?;
    info!(backend = outcome.backend, "Vibration cancelled");
    output::print_cancelled(&outcome, options.json)
}

fn submit(request: &RawVibrationRequest, options: &GlobalOptions<'_>) -> Result<()> {
    let outcome = with_controller(options, |controller| Ok(controller.submit(request)?))?;
    output::print_forwarded(std::slice::from_ref(request), &outcome, options.json)
}
