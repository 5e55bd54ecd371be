//! Path utilities for the artifact directory.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters decide how to report failures
//! - OS-specific logic is kept private in `platform`

mod error;
mod lib_dir;
mod platform;

#[cfg(test)]
mod test_utils;

// Error type
pub use error::PathError;

// Artifact directory
pub use lib_dir::{
    DEFAULT_LIB_DIR, LIB_DIR_ENV, LibDirResolution, LibDirSource, resolve_lib_dir,
};
