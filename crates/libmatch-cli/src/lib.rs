//! Command-line adapter for libmatch.
//!
//! Wires the runtime host probe into the core selection engine and exposes
//! `run`, `select`, `list` and `probe` subcommands.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; tempfile is used by tests/
#[cfg(test)]
use tempfile as _;

// Used by the binary target only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
