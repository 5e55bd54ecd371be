//! CLI-specific error types and mappings.
//!
//! This module provides the error type for the CLI adapter and maps
//! selection and launch failures to exit codes.

use libmatch_core::{PathError, SelectionError};
use libmatch_runtime::LaunchError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Selection failed before anything was launched.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The target command could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 64-78: Specific error categories (see sysexits.h)
    /// - 126/127: Command found but not executable / command not found
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Selection(err) => match err {
                // EX_UNAVAILABLE
                SelectionError::UnsupportedCpu | SelectionError::NoCompatibleArtifact { .. } => 69,
                // EX_NOINPUT
                SelectionError::DirectoryUnreadable { .. } | SelectionError::NoArtifacts { .. } => 66,
            },
            Self::Launch(err) => match err {
                LaunchError::CommandNotFound { .. } => 127,
                LaunchError::Spawn { .. } => 126,
                LaunchError::Signaled { .. } => 1,
                LaunchError::UnsplittablePreloadPath { .. } => 78,
            },
            Self::Config(_) => 78,        // EX_CONFIG
            Self::Io(_) => 74,            // EX_IOERR
            Self::Serialization(_) => 70, // EX_SOFTWARE
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
