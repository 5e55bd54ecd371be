//! Selection error types.
//!
//! Every variant is fatal to the invocation: it is raised before any
//! process is launched. Per-file problems during discovery never surface
//! here; they are logged and the file is skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop artifact selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// No catalog generation is fully supported by this CPU and OS.
    #[error("unsupported cpu: no known architecture generation is fully supported by this host")]
    UnsupportedCpu,

    /// The artifact directory could not be listed.
    #[error("cannot read artifact directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory held no usable artifact at all.
    #[error("no artifacts found in {}", .dir.display())]
    NoArtifacts { dir: PathBuf },

    /// Artifacts exist, but each needs a CPU feature this host lacks.
    #[error(
        "no compatible artifact in {} ({candidates} candidate(s), none supported by {host})",
        .dir.display()
    )]
    NoCompatibleArtifact {
        dir: PathBuf,
        candidates: usize,
        host: &'static str,
    },
}

impl SelectionError {
    /// True for the two "nothing to pick" outcomes.
    pub const fn is_no_artifact(&self) -> bool {
        matches!(
            self,
            Self::NoArtifacts { .. } | Self::NoCompatibleArtifact { .. }
        )
    }
}
