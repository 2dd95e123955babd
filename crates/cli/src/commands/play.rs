//! Request file playback

use std::fs;

use anyhow::{Context, Result};
use tactile_command::RawVibrationRequest;
use tracing::{debug, warn};

use crate::commands::{GlobalOptions, PlayArgs, with_controller};
use crate::error::CliError;
use crate::output;

/// Forward every request in a JSON file, in order.
///
/// Playback stops at the first rejected request; earlier requests have
/// already been forwarded by then.
pub fn execute(args: &PlayArgs, options: &GlobalOptions<'_>) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read request file {}", args.file.display()))?;
    let requests = parse_requests(&contents)?;
    debug!(count = requests.len(), "Loaded request file");

    let outcome = with_controller(options, |controller| {
        for (index, request) in requests.iter().enumerate() {
            if let Err(source) = controller.submit(request) {
                warn!(index, %source, "Stopping playback at rejected request");
                return Err(CliError::Rejected { index, source });
            }
        }
        Ok(())
    })?;

    output::print_forwarded(&requests, &outcome, options.json)
}

fn parse_requests(contents: &str) -> Result<Vec<RawVibrationRequest>, CliError> {
    Ok(serde_json::from_str(contents)?)
}
