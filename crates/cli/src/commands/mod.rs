//! Command implementations for tactilectl CLI

pub mod caps;
pub mod play;
pub mod vibrate;

use std::path::{Path, PathBuf};

use clap::Args;
use tactile_backend::BackendSelection;
use tactile_command::EffectId;
use tactile_controller::{
    ControllerConfig, ControllerLifecycle, ControllerMetrics, VibrationController,
};
use tracing::debug;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions<'a> {
    pub config: Option<&'a Path>,
    pub backend: Option<BackendSelection>,
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OneshotArgs {
    /// Vibration length in milliseconds
    #[arg(long)]
    pub duration_ms: u64,

    /// Strength 1-255, or -1 for the device default
    #[arg(long, allow_hyphen_values = true)]
    pub amplitude: Option<i32>,
}

#[derive(Args, Debug)]
pub struct WaveformArgs {
    /// Alternating off/on durations in milliseconds, starting with off
    #[arg(long, value_delimiter = ',', required = true)]
    pub timings: Vec<u64>,

    /// One strength per timing, 0-255
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub amplitudes: Option<Vec<i32>>,

    /// Index to loop back to, -1 to play once
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub repeat: i32,
}

#[derive(Args, Debug)]
pub struct EffectArgs {
    /// Effect name (click, double-click, tick, heavy-click)
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub name: Option<EffectId>,

    /// Raw platform effect id
    #[arg(long, allow_hyphen_values = true)]
    pub id: Option<i32>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// JSON file holding an array of requests
    #[arg(short, long)]
    pub file: PathBuf,
}

/// What a command did with the controller.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub backend: &'static str,
    pub metrics: ControllerMetrics,
}

/// Resolve configuration from `--config` and `--backend`.
pub fn load_config(options: &GlobalOptions<'_>) -> Result<ControllerConfig, CliError> {
    let mut config = match options.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    if let Some(backend) = options.backend {
        config.backend = backend;
    }
    debug!(?config, "Resolved controller configuration");
    Ok(config)
}

/// Acquire the controller, run `f` against it and release it again.
pub fn with_controller<T>(
    options: &GlobalOptions<'_>,
    f: impl FnOnce(&mut VibrationController) -> Result<T, CliError>,
) -> Result<Outcome<T>, CliError> {
    let mut lifecycle = ControllerLifecycle::from_config(load_config(options)?)?;

    let result = match lifecycle.try_acquire() {
        Ok(controller) => f(&mut *controller).map(|value| Outcome {
            value,
            backend: controller.backend_name(),
            metrics: controller.metrics(),
        }),
        Err(error) => Err(error.into()),
    };

    lifecycle.release();
    result
}
