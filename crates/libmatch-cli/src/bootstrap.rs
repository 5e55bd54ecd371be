//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Artifact directory resolution (via libmatch-core paths)
//! - Host probing (via libmatch-runtime)
//! - Host profile resolution against the built-in catalog
//!
//! The host profile is resolved exactly once here and handed to command
//! handlers frozen inside the [`CliContext`].

use libmatch_core::{
    ArchitectureCatalog, HostProbePort, HostProfile, LibDirResolution, resolve_lib_dir,
};
use libmatch_runtime::{CpuModel, DefaultHostProbe};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// `--lib-dir`, if given.
    pub lib_dir: Option<String>,
    /// Name of the preload environment variable.
    pub preload_var: String,
}

impl CliConfig {
    /// Take the global options from the parsed command line.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            lib_dir: cli.lib_dir.clone(),
            preload_var: cli.preload_var.clone(),
        }
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug)]
pub struct CliContext {
    /// Catalog every lookup is made against.
    pub catalog: &'static ArchitectureCatalog,
    /// The resolved host; never re-probed.
    pub host: HostProfile,
    /// Where artifacts are looked up, and why there.
    pub lib_dir: LibDirResolution,
    /// Name of the preload environment variable.
    pub preload_var: String,
    /// Vendor and brand, when the probe can tell.
    pub cpu_model: CpuModel,
}

fn validate_var_name(name: &str) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::Config(
            "preload variable name cannot be empty".to_string(),
        ));
    }
    if name.contains(['=', '\0']) {
        return Err(CliError::Config(format!(
            "invalid preload variable name: {name:?}"
        )));
    }
    Ok(())
}

/// Bootstrap the CLI against the real machine.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let probe = DefaultHostProbe::new();
    let mut ctx = bootstrap_with(config, &probe)?;
    ctx.cpu_model = probe.cpu_model();
    Ok(ctx)
}

/// Bootstrap with an injected probe (for testing).
pub fn bootstrap_with(
    config: CliConfig,
    probe: &dyn HostProbePort,
) -> Result<CliContext, CliError> {
    let lib_dir = resolve_lib_dir(config.lib_dir.as_deref())?;
    debug!(
        path = %lib_dir.path.display(),
        source = ?lib_dir.source,
        "Resolved artifact directory"
    );

    validate_var_name(&config.preload_var)?;

    let catalog = ArchitectureCatalog::builtin();
    let host = HostProfile::resolve(catalog, probe)?;

    Ok(CliContext {
        catalog,
        host,
        lib_dir,
        preload_var: config.preload_var,
        cpu_model: CpuModel::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_validation() {
        assert!(validate_var_name("LD_PRELOAD").is_ok());
        assert!(validate_var_name("DYLD_INSERT_LIBRARIES").is_ok());
        assert!(matches!(validate_var_name("  "), Err(CliError::Config(_))));
        assert!(matches!(validate_var_name("A=B"), Err(CliError::Config(_))));
    }
}
