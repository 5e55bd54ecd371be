//! Launching the target command with the selected artifact preloaded.
//!
//! On Unix the current process is replaced, so the target inherits our pid
//! and its exit status is the tool's exit status. Elsewhere the target is
//! spawned and waited on. The command and its arguments are carried as
//! `OsString` and reach the child byte for byte.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::LaunchError;

/// Variable the dynamic loader reads preload paths from.
pub const DEFAULT_PRELOAD_VAR: &str = "LD_PRELOAD";

/// Environment variable that overrides [`DEFAULT_PRELOAD_VAR`].
pub const PRELOAD_VAR_ENV: &str = "LIBMATCH_PRELOAD_VAR";

const PRELOAD_SEPARATOR: &str = ":";

/// Bytes the loader treats as list separators in `LD_PRELOAD`.
const LOADER_SEPARATORS: [u8; 2] = [b':', b' '];

/// Prepend `artifact` to an existing preload list.
pub fn preload_value(artifact: &Path, existing: Option<&OsStr>) -> OsString {
    let mut value = artifact.as_os_str().to_os_string();
    if let Some(existing) = existing.filter(|v| !v.is_empty()) {
        value.push(PRELOAD_SEPARATOR);
        value.push(existing);
    }
    value
}

/// Refuse artifact paths the loader would split into several entries.
pub fn check_preload_path(artifact: &Path) -> Result<(), LaunchError> {
    let bytes = artifact.as_os_str().as_encoded_bytes();
    if bytes.iter().any(|b| LOADER_SEPARATORS.contains(b)) {
        return Err(LaunchError::UnsplittablePreloadPath {
            path: artifact.to_path_buf(),
        });
    }
    Ok(())
}

/// Resolve a command the way a shell would.
///
/// Names containing a path separator are used as given; bare names are
/// looked up on `PATH`.
pub fn resolve_program(command: &OsStr) -> Result<PathBuf, LaunchError> {
    // Separators are ASCII, so a byte scan is exact on every platform
    let has_separator = command
        .as_encoded_bytes()
        .iter()
        .any(|&b| b.is_ascii() && std::path::is_separator(char::from(b)));
    if has_separator {
        return Ok(PathBuf::from(command));
    }
    which::which(command).map_err(|source| LaunchError::CommandNotFound {
        command: command.to_string_lossy().into_owned(),
        source,
    })
}

/// Everything needed to start the target command.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    /// Resolved executable path.
    pub program: PathBuf,
    /// `argv[0]` as the user typed it.
    pub argv0: OsString,
    pub args: Vec<OsString>,
    pub preload_var: String,
    pub preload: OsString,
}

impl LaunchPlan {
    /// Plan to run `command` with `artifact` prepended to `preload_var`.
    ///
    /// The current value of `preload_var` is read from this process's
    /// environment.
    pub fn new(
        command: &OsStr,
        args: Vec<OsString>,
        artifact: &Path,
        preload_var: &str,
    ) -> Result<Self, LaunchError> {
        check_preload_path(artifact)?;
        let program = resolve_program(command)?;
        let existing = env::var_os(preload_var);
        Ok(Self {
            program,
            argv0: command.to_os_string(),
            args,
            preload_var: preload_var.to_string(),
            preload: preload_value(artifact, existing.as_deref()),
        })
    }

    /// Build the `Command` without starting it.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).env(&self.preload_var, &self.preload);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(&self.argv0);
        }
        command
    }

    /// Start the target command.
    ///
    /// On Unix this only returns on failure. Elsewhere it returns the
    /// child's exit code.
    pub fn launch(self) -> Result<i32, LaunchError> {
        let args: Vec<_> = self.args.iter().map(|a| a.to_string_lossy()).collect();
        info!(
            "{}={} {} {}",
            self.preload_var,
            self.preload.to_string_lossy(),
            self.argv0.to_string_lossy(),
            args.join(" ")
        );
        let mut command = self.command();

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            let source = command.exec();
            Err(LaunchError::Spawn {
                program: self.program,
                source,
            })
        }

        #[cfg(not(unix))]
        {
            let status = command.status().map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            status.code().ok_or(LaunchError::Signaled {
                program: self.program,
            })
        }
    }
}
