//! Capability probe command

use anyhow::Result;
use tactile_controller::ControllerLifecycle;

use crate::commands::{GlobalOptions, load_config};
use crate::output::{self, CapabilityReport};

/// Report what the configured backend can do.
///
/// A platform without vibration is a normal answer here, not an error.
pub fn execute(options: &GlobalOptions<'_>) -> Result<()> {
    let config = load_config(options)?;
    let mut lifecycle = ControllerLifecycle::from_config(config)?;

    let report = match lifecycle.acquire() {
        Some(controller) => CapabilityReport {
            available: true,
            backend: controller.backend_name(),
            capabilities: Some(controller.capabilities()?),
            reason: None,
        },
        None => CapabilityReport {
            available: false,
            backend: lifecycle.provider_name(),
            capabilities: None,
            reason: lifecycle.unavailable_reason().map(str::to_string),
        },
    };
    lifecycle.release();

    output::print_capabilities(&report, options.json)
}
