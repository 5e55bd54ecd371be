//! Run command handler.
//!
//! Selects the best artifact and launches the command with it preloaded.

use std::ffi::{OsStr, OsString};

use libmatch_runtime::LaunchPlan;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the run command.
///
/// On Unix a successful launch replaces this process and never returns.
/// Elsewhere the child's exit code is returned for the caller to exit with.
pub fn execute(ctx: &CliContext, command: &OsStr, args: Vec<OsString>) -> Result<i32, CliError> {
    let (selection, _advisories) = super::choose(ctx)?;
    let plan = LaunchPlan::new(command, args, &selection.artifact().path, &ctx.preload_var)?;
    plan.launch().map_err(CliError::from)
}
