//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for libmatch.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Debug, Parser)]
#[command(name = "libmatch")]
#[command(about = "Run a program with the library build that best fits this machine")]
#[command(version)]
pub struct Cli {
    /// Directory holding the library variants (overrides LIBMATCH_LIB_DIR)
    #[arg(long = "lib-dir", global = true)]
    pub lib_dir: Option<String>,

    /// Environment variable that receives the selected library path
    #[arg(
        long = "preload-var",
        global = true,
        env = "LIBMATCH_PRELOAD_VAR",
        default_value = "LD_PRELOAD"
    )]
    pub preload_var: String,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "libmatch",
            "--verbose",
            "--lib-dir",
            "/tmp/libs",
            "--preload-var",
            "MY_PRELOAD",
            "select",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.lib_dir, Some("/tmp/libs".to_string()));
        assert_eq!(cli.preload_var, "MY_PRELOAD");
        assert!(matches!(cli.command, Commands::Select));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["libmatch", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_run_keeps_command_arguments_verbatim() {
        let cli = Cli::parse_from(["libmatch", "run", "python3", "-c", "print(1)", "--json"]);
        assert!(!cli.json);
        match cli.command {
            Commands::Run { command, args } => {
                assert_eq!(command, "python3");
                assert_eq!(args, vec!["-c", "print(1)", "--json"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_accepts_non_utf8_arguments() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"data_\xff.bin".to_vec());
        let cli = Cli::try_parse_from([
            OsString::from("libmatch"),
            OsString::from("run"),
            OsString::from("cat"),
            raw.clone(),
        ])
        .unwrap();
        match cli.command {
            Commands::Run { command, args } => {
                assert_eq!(command, "cat");
                assert_eq!(args, vec![raw]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_requires_a_command() {
        assert!(Cli::try_parse_from(["libmatch", "run"]).is_err());
    }
}
