//! Runtime error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while querying the GPU driver.
///
/// None of these is fatal: the probe degrades to an empty inventory.
#[derive(Debug, Error)]
pub enum GpuQueryError {
    #[error("nvidia-smi is not available: {0}")]
    Unavailable(#[source] io::Error),

    #[error("nvidia-smi exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

impl GpuQueryError {
    /// Whether this is the normal outcome on a host without NVIDIA drivers.
    ///
    /// A driver that is installed but fails to answer is worth surfacing.
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Failures while starting the target command.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The bare command name was not found on `PATH`.
    #[error("command not found: {command}")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    /// The loader would split this path at a space or colon.
    #[error("cannot preload {}: path contains a space or ':'", .path.display())]
    UnsplittablePreloadPath { path: PathBuf },

    /// `exec`/spawn failed.
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The child was killed by a signal and has no exit code.
    #[error("{} terminated by signal", .program.display())]
    Signaled { program: PathBuf },
}
