//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<_, CliError>`
//! - Thin wrappers that:
//!   1. Scan the artifact directory
//!   2. Call the core selection engine
//!   3. Format output for the terminal
//!
//! Handlers should NOT re-probe the host or rank artifacts themselves.

pub mod list;
pub mod probe;
pub mod run;
pub mod select;

use libmatch_core::{Advisory, Selection, advise, discover, select};
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Discover, rank and pick, then log the choice and its advisories.
pub(crate) fn choose(ctx: &CliContext) -> Result<(Selection, Vec<Advisory>), CliError> {
    let dir = &ctx.lib_dir.path;
    let candidates = discover(ctx.catalog, dir)?;
    let selection = select(&ctx.host, candidates, dir)?;

    info!("Selected {}", selection.artifact().file_name);
    let advisories = advise(&ctx.host, selection.artifact());
    for advisory in &advisories {
        warn!("{advisory}");
    }

    Ok((selection, advisories))
}
