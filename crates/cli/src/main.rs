//! tactilectl - Haptic Vibration Control CLI
//!
//! Probe and drive vibration backends from the command line: query
//! capabilities, fire one-shots, waveforms and predefined effects, or replay
//! a file of requests.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tactile_backend::BackendSelection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{EffectArgs, GlobalOptions, OneshotArgs, PlayArgs, WaveformArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tactilectl")]
#[command(about = "Haptic vibration control CLI - Probe and drive vibration backends")]
#[command(version)]
#[command(long_about = "
tactilectl acquires a vibration controller from the configured backend,
issues one command and releases the controller again.

Requests are validated before they reach the backend. Use --json flag for
machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Controller configuration file (.yaml, .yml or .json)
    #[arg(long, global = true, env = "TACTILECTL_CONFIG")]
    config: Option<PathBuf>,

    /// Backend override (simulated, null, unsupported)
    #[arg(long, global = true, env = "TACTILECTL_BACKEND")]
    backend: Option<BackendSelection>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show vibration capabilities of the backend
    Caps,

    /// Vibrate once for a fixed duration
    Oneshot(OneshotArgs),

    /// Play an off/on timing pattern
    Waveform(WaveformArgs),

    /// Play a predefined effect
    Effect(EffectArgs),

    /// Forward every request in a JSON file
    Play(PlayArgs),

    /// Stop any active vibration
    Cancel,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tactilectl={log_level},tactile_controller={log_level},tactile_backend={log_level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let options = GlobalOptions {
        config: cli.config.as_deref(),
        backend: cli.backend,
        json: cli.json,
    };

    match &cli.command {
        Commands::Caps => commands::caps::execute(&options),
        Commands::Oneshot(args) => commands::vibrate::oneshot(args, &options),
        Commands::Waveform(args) => commands::vibrate::waveform(args, &options),
        Commands::Effect(args) => commands::vibrate::effect(args, &options),
        Commands::Play(args) => commands::play::execute(args, &options),
        Commands::Cancel => commands::vibrate::cancel(&options),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tactile_command::EffectId;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_caps_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["tactilectl", "caps"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Caps));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["tactilectl", "caps", "--json", "--backend", "null", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.backend, Some(BackendSelection::Null));
        Ok(())
    }

    #[test]
    fn parse_unknown_backend_fails() {
        assert!(Cli::try_parse_from(["tactilectl", "--backend", "android", "caps"]).is_err());
    }

    // --- Vibration command parsing ---

    #[test]
    fn parse_oneshot_with_default_amplitude_sentinel() -> TestResult {
        let cli = Cli::try_parse_from([
            "tactilectl",
            "oneshot",
            "--duration-ms",
            "200",
            "--amplitude",
            "-1",
        ])?;
        match &cli.command {
            Commands::Oneshot(args) => {
                assert_eq!(args.duration_ms, 200);
                assert_eq!(args.amplitude, Some(-1));
            }
            _ => return Err("expected Oneshot command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_oneshot_rejects_negative_duration() {
        assert!(
            Cli::try_parse_from(["tactilectl", "oneshot", "--duration-ms", "-5"]).is_err()
        );
    }

    #[test]
    fn parse_waveform_lists() -> TestResult {
        let cli = Cli::try_parse_from([
            "tactilectl",
            "waveform",
            "--timings",
            "0,200,100,300",
            "--amplitudes",
            "0,0,128,255",
        ])?;
        match &cli.command {
            Commands::Waveform(args) => {
                assert_eq!(args.timings, vec![0, 200, 100, 300]);
                assert_eq!(args.amplitudes, Some(vec![0, 0, 128, 255]));
                assert_eq!(args.repeat, -1);
            }
            _ => return Err("expected Waveform command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_waveform_repeat() -> TestResult {
        let cli = Cli::try_parse_from(["tactilectl", "waveform", "--timings", "0,50", "--repeat", "0"])?;
        match &cli.command {
            Commands::Waveform(args) => assert_eq!(args.repeat, 0),
            _ => return Err("expected Waveform command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_effect_by_name_and_id() -> TestResult {
        let cli = Cli::try_parse_from(["tactilectl", "effect", "heavy-click"])?;
        match &cli.command {
            Commands::Effect(args) => assert_eq!(args.name, Some(EffectId::HeavyClick)),
            _ => return Err("expected Effect command".into()),
        }

        let cli = Cli::try_parse_from(["tactilectl", "effect", "--id", "7"])?;
        match &cli.command {
            Commands::Effect(args) => {
                assert_eq!(args.name, None);
                assert_eq!(args.id, Some(7));
            }
            _ => return Err("expected Effect command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_effect_requires_name_or_id() {
        assert!(Cli::try_parse_from(["tactilectl", "effect"]).is_err());
        assert!(Cli::try_parse_from(["tactilectl", "effect", "click", "--id", "0"]).is_err());
    }

    #[test]
    fn parse_play_file() -> TestResult {
        let cli = Cli::try_parse_from(["tactilectl", "play", "--file", "requests.json"])?;
        match &cli.command {
            Commands::Play(args) => assert_eq!(args.file, PathBuf::from("requests.json")),
            _ => return Err("expected Play command".into()),
        }
        Ok(())
    }
}
