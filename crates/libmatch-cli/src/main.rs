//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers.

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use libmatch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Send logs to stderr so stdout only carries command output.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(CliConfig::from_cli(&cli))?;

    match cli.command {
        Commands::Run { command, args } => {
            return Ok(handlers::run::execute(&ctx, &command, args)?);
        }
        Commands::Select => handlers::select::execute(&ctx, cli.json)?,
        Commands::List => handlers::list::execute(&ctx, cli.json)?,
        Commands::Probe => handlers::probe::execute(&ctx, cli.json)?,
    }

    Ok(0)
}

fn main() {
    // Load environment variables before clap reads LIBMATCH_* defaults
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            err.downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code)
        }
    };
    process::exit(code);
}
