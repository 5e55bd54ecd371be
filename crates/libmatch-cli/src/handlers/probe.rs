//! Probe command handler.
//!
//! Displays the resolved host profile for diagnostics.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{ProbeReport, print_json};

/// Execute the probe command.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let report = ProbeReport::new(&ctx.host, &ctx.cpu_model, &ctx.lib_dir);
    if json {
        print_json(&report)
    } else {
        report.print_text();
        Ok(())
    }
}
