//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use serde::Serialize;
use serde_json::json;
use tactile_command::RawVibrationRequest;
use tactile_controller::Capabilities;

use crate::commands::Outcome;
use crate::error::CliError;

/// Result of a capability probe.
#[derive(Debug, Serialize)]
pub struct CapabilityReport {
    pub available: bool,
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::ValidationError(_)) => "validation",
        Some(CliError::Unsupported(_)) => "unsupported_platform",
        Some(CliError::InvalidConfiguration(_)) => "configuration",
        Some(CliError::Rejected { .. }) => "rejected",
        Some(CliError::Controller(_)) => "controller",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "unknown",
    }
}

/// Print capability report in specified format
pub fn print_capabilities(report: &CapabilityReport, json: bool) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "vibration": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Vibration Capabilities:".bold());
    println!("  Backend: {}", report.backend);
    match (&report.capabilities, &report.reason) {
        (Some(caps), _) => {
            println!("  Vibrator: {}", yes_no(caps.has_vibrator));
            println!("  Amplitude control: {}", yes_no(caps.has_amplitude_control));
        }
        (None, reason) => {
            println!("  Status: {}", "Unavailable".yellow());
            if let Some(reason) = reason {
                println!("  Reason: {}", reason.dimmed());
            }
        }
    }
    Ok(())
}

/// Print forwarded requests in specified format
pub fn print_forwarded(
    requests: &[RawVibrationRequest],
    outcome: &Outcome<()>,
    json: bool,
) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "backend": outcome.backend,
            "requests": requests,
            "metrics": outcome.metrics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for request in requests {
        println!("{} {}", "✓".green(), describe(request));
    }
    println!(
        "Forwarded {} request(s) to {} backend",
        outcome.metrics.forwarded_count(),
        outcome.backend.bold()
    );
    Ok(())
}

/// Print cancel confirmation in specified format
pub fn print_cancelled(outcome: &Outcome<()>, json: bool) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "backend": outcome.backend,
            "cancelled": true,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} Vibration cancelled on {} backend", "✓".green(), outcome.backend.bold());
    }
    Ok(())
}

fn yes_no(value: bool) -> ColoredString {
    if value { "yes".green() } else { "no".red() }
}

/// One-line summary of a request.
fn describe(request: &RawVibrationRequest) -> String {
    match request {
        RawVibrationRequest::Oneshot {
            duration_ms,
            amplitude: None,
        } => format!("oneshot {duration_ms} ms"),
        RawVibrationRequest::Oneshot {
            duration_ms,
            amplitude: Some(amplitude),
        } => format!("oneshot {duration_ms} ms at amplitude {amplitude}"),
        RawVibrationRequest::Waveform {
            timings_ms,
            amplitudes,
            repeat_index,
        } => {
            let shape = if amplitudes.is_some() {
                "amplitude waveform"
            } else {
                "waveform"
            };
            let repeat = if *repeat_index < 0 {
                "once".to_string()
            } else {
                format!("repeat from {repeat_index}")
            };
            format!("{shape} of {} segments, {repeat}", timings_ms.len())
        }
        RawVibrationRequest::Effect { effect_id } => {
            match tactile_command::EffectId::from_raw(*effect_id) {
                Some(effect) => format!("effect {effect}"),
                None => format!("effect #{effect_id}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_requests() {
        assert_eq!(describe(&RawVibrationRequest::oneshot(40)), "oneshot 40 ms");
        assert_eq!(
            describe(&RawVibrationRequest::oneshot_with_amplitude(40, 128)),
            "oneshot 40 ms at amplitude 128"
        );
        assert_eq!(
            describe(&RawVibrationRequest::waveform(vec![0, 100, 50, 100], 1)),
            "waveform of 4 segments, repeat from 1"
        );
        assert_eq!(
            describe(&RawVibrationRequest::waveform_with_amplitudes(
                vec![0, 100],
                vec![0, 255],
                -1
            )),
            "amplitude waveform of 2 segments, once"
        );
        assert_eq!(describe(&RawVibrationRequest::effect(1)), "effect double-click");
    }

    #[test]
    fn test_capability_report_json_skips_empty_fields() -> Result<()> {
        let report = CapabilityReport {
            available: false,
            backend: "unsupported",
            capabilities: None,
            reason: None,
        };
        assert_eq!(
            serde_json::to_string(&report)?,
            r#"{"available":false,"backend":"unsupported"}"#
        );
        Ok(())
    }
}
