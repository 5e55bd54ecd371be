//! Select command handler.
//!
//! Prints the artifact `run` would preload, without launching anything.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{SelectionReport, print_json};

/// Execute the select command.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let (selection, advisories) = super::choose(ctx)?;
    let report = SelectionReport::new(
        &ctx.lib_dir,
        &ctx.host,
        &selection.selected,
        selection.candidates,
        &advisories,
    );

    if json {
        print_json(&report)
    } else {
        report.print_text();
        Ok(())
    }
}
