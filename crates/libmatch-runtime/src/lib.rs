//! Runtime adapters for libmatch.
//!
//! - [`system::DefaultHostProbe`] implements the core `HostProbePort` with
//!   CPUID reads, OS feature detection and an `nvidia-smi` query.
//! - [`launch`] builds the preload environment and replaces the current
//!   process with the target command.

#![deny(unused_crate_dependencies)]

pub mod error;
pub mod launch;
pub mod system;

pub use error::{GpuQueryError, LaunchError};
pub use launch::{
    DEFAULT_PRELOAD_VAR, LaunchPlan, PRELOAD_VAR_ENV, check_preload_path, preload_value,
    resolve_program,
};
pub use system::{CpuModel, DefaultHostProbe};

#[cfg(test)]
use tempfile as _;
