//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::ffi::OsString;

use clap::Subcommand;

/// Available commands.
///
/// Every command resolves the host profile first; `run`, `select` and
/// `list` then scan the artifact directory.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Select the best library variant and run a command with it preloaded
    Run {
        /// Command to launch (looked up on PATH unless it contains a `/`)
        #[arg(value_parser = clap::value_parser!(OsString))]
        command: OsString,
        /// Arguments passed to the command unchanged, including non-UTF-8 ones
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(OsString)
        )]
        args: Vec<OsString>,
    },

    /// Print the path of the variant that would be preloaded
    Select,

    /// List every discovered variant in rank order
    List,

    /// Show the detected CPU generation and GPUs
    Probe,
}
