//! List command handler.
//!
//! Shows every discovered artifact: compatible ones in rank order, then
//! the ones this host cannot run.

use libmatch_core::discover;
use libmatch_core::selector::{compatible, rank};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{ListReport, ListRow, print_json};

/// Execute the list command.
///
/// Unlike `select`, an empty directory or a directory with nothing
/// compatible is reported rather than treated as an error.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let discovered = discover(ctx.catalog, &ctx.lib_dir.path)?;
    let ranking = rank(&ctx.host, compatible(&ctx.host, discovered.clone()));

    let mut artifacts: Vec<ListRow<'_>> = ranking
        .iter()
        .enumerate()
        .map(|(i, ranked)| ListRow::ranked(i + 1, ranked))
        .collect();
    artifacts.extend(
        discovered
            .iter()
            .filter(|artifact| !ctx.host.supports(artifact.required_cpu()))
            .map(ListRow::incompatible),
    );

    let report = ListReport {
        lib_dir: &ctx.lib_dir,
        host: ctx.host.architecture.name,
        artifacts,
    };

    if json {
        print_json(&report)
    } else {
        report.print_text();
        Ok(())
    }
}
