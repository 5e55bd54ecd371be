//! Artifact directory resolution.
//!
//! Provides utilities for resolving the directory that holds the library
//! variants from explicit paths, environment variables, or the default.

use std::env;
use std::path::PathBuf;

use serde::Serialize;

use super::error::PathError;
use super::platform::normalize_user_path;

/// Default location of the library variants.
pub const DEFAULT_LIB_DIR: &str = "/usr/local/lib/libmatch";

/// Environment variable that overrides the default directory.
pub const LIB_DIR_ENV: &str = "LIBMATCH_LIB_DIR";

/// How the artifact directory was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LibDirSource {
    /// The user passed an explicit path (CLI flag).
    Explicit,
    /// The path came from environment variables / `.env`.
    EnvVar,
    /// Fallback default (`/usr/local/lib/libmatch`).
    Default,
}

/// Resolution result for the artifact directory.
#[derive(Debug, Clone, Serialize)]
pub struct LibDirResolution {
    /// The resolved path to the artifact directory.
    pub path: PathBuf,
    /// How the path was determined.
    pub source: LibDirSource,
}

/// Resolve the artifact directory from an explicit override, env var, or default.
///
/// Resolution order:
/// 1. Explicit path provided by caller (highest priority)
/// 2. `LIBMATCH_LIB_DIR` environment variable
/// 3. Default directory (`/usr/local/lib/libmatch`)
pub fn resolve_lib_dir(explicit: Option<&str>) -> Result<LibDirResolution, PathError> {
    if let Some(path_str) = explicit {
        return Ok(LibDirResolution {
            path: normalize_user_path(path_str)?,
            source: LibDirSource::Explicit,
        });
    }

    if let Ok(env_path) = env::var(LIB_DIR_ENV) {
        if !env_path.trim().is_empty() {
            return Ok(LibDirResolution {
                path: normalize_user_path(&env_path)?,
                source: LibDirSource::EnvVar,
            });
        }
    }

    Ok(LibDirResolution {
        path: PathBuf::from(DEFAULT_LIB_DIR),
        source: LibDirSource::Default,
    })
}
