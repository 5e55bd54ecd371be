//! Command reports.
//!
//! Each report is serialized as-is for `--json` and has a plain text
//! rendering for terminals.

use std::io::{self, Write};
use std::path::Path;

use libmatch_core::{
    Advisory, Artifact, ComputeCapability, GpuInventory, HostProfile, LibDirResolution,
    OsVectorSupport, RankedArtifact, bundles_in,
};
use libmatch_runtime::CpuModel;
use serde::Serialize;

use super::tables::{format_optional, print_separator, truncate_string};
use crate::error::CliError;

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn gpu_list(supported: &[ComputeCapability]) -> String {
    if supported.is_empty() {
        return "any".to_string();
    }
    supported
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Outcome of `select`.
#[derive(Debug, Serialize)]
pub struct SelectionReport<'a> {
    pub lib_dir: &'a LibDirResolution,
    pub host: &'static str,
    pub path: &'a Path,
    pub cpu_priority: u32,
    pub gpu_priority: usize,
    /// Artifacts discovered before filtering.
    pub candidates: usize,
    pub advisories: &'a [Advisory],
}

impl<'a> SelectionReport<'a> {
    pub fn new(
        lib_dir: &'a LibDirResolution,
        host: &HostProfile,
        selected: &'a RankedArtifact,
        candidates: usize,
        advisories: &'a [Advisory],
    ) -> Self {
        Self {
            lib_dir,
            host: host.architecture.name,
            path: &selected.artifact.path,
            cpu_priority: selected.cpu_priority,
            gpu_priority: selected.gpu_priority,
            candidates,
            advisories,
        }
    }

    /// Only the path goes to stdout, so the output can be captured.
    pub fn print_text(&self) {
        println!("{}", self.path.display());
    }
}

/// One line of `list`.
#[derive(Debug, Serialize)]
pub struct ListRow<'a> {
    /// 1-based rank; absent for artifacts this host cannot run.
    pub rank: Option<usize>,
    pub file_name: &'a str,
    pub requires: &'static str,
    pub gpus: &'a [ComputeCapability],
    pub compatible: bool,
    pub cpu_priority: Option<u32>,
    pub gpu_priority: Option<usize>,
}

impl<'a> ListRow<'a> {
    pub fn ranked(rank: usize, ranked: &'a RankedArtifact) -> Self {
        Self {
            rank: Some(rank),
            file_name: &ranked.artifact.file_name,
            requires: ranked.artifact.architecture.name,
            gpus: ranked.artifact.supported_gpus(),
            compatible: true,
            cpu_priority: Some(ranked.cpu_priority),
            gpu_priority: Some(ranked.gpu_priority),
        }
    }

    pub fn incompatible(artifact: &'a Artifact) -> Self {
        Self {
            rank: None,
            file_name: &artifact.file_name,
            requires: artifact.architecture.name,
            gpus: artifact.supported_gpus(),
            compatible: false,
            cpu_priority: None,
            gpu_priority: None,
        }
    }
}

/// Outcome of `list`.
#[derive(Debug, Serialize)]
pub struct ListReport<'a> {
    pub lib_dir: &'a LibDirResolution,
    pub host: &'static str,
    pub artifacts: Vec<ListRow<'a>>,
}

impl ListReport<'_> {
    pub fn print_text(&self) {
        if self.artifacts.is_empty() {
            println!("No artifacts found in {}", self.lib_dir.path.display());
            return;
        }

        println!(
            "Found {} artifact(s) in {} (host: {}):\n",
            self.artifacts.len(),
            self.lib_dir.path.display(),
            self.host
        );
        println!(
            "{:<5} {:<16} {:<14} {:<6} {:<6} File",
            "Rank", "Requires", "GPUs", "CPU", "GPU"
        );
        print_separator(80);

        for row in &self.artifacts {
            println!(
                "{:<5} {:<16} {:<14} {:<6} {:<6} {}",
                format_optional(row.rank, "-"),
                truncate_string(row.requires, 15),
                truncate_string(&gpu_list(row.gpus), 13),
                format_optional(row.cpu_priority, "-"),
                format_optional(row.gpu_priority, "-"),
                row.file_name
            );
        }
    }
}

/// Outcome of `probe`.
#[derive(Debug, Serialize)]
pub struct ProbeReport<'a> {
    pub generation: &'static str,
    pub alias: Option<&'static str>,
    pub vendor: Option<&'a str>,
    pub brand: Option<&'a str>,
    /// Named bundles the resolved generation offers.
    pub bundles: Vec<&'static str>,
    /// Every usable feature flag, after OS restrictions.
    pub features: Vec<&'static str>,
    pub os: OsVectorSupport,
    pub gpus: &'a GpuInventory,
    pub lib_dir: &'a LibDirResolution,
}

impl<'a> ProbeReport<'a> {
    pub fn new(host: &'a HostProfile, model: &'a CpuModel, lib_dir: &'a LibDirResolution) -> Self {
        Self {
            generation: host.architecture.name,
            alias: host.architecture.alias,
            vendor: model.vendor.as_deref(),
            brand: model.brand.as_deref(),
            bundles: bundles_in(host.cpu()),
            features: host.effective.names(),
            os: host.os,
            gpus: &host.gpus,
            lib_dir,
        }
    }

    pub fn print_text(&self) {
        println!("CPU generation:  {}", self.generation);
        if let Some(alias) = self.alias {
            println!("Alias:           {alias}");
        }
        if let Some(brand) = self.brand.or(self.vendor) {
            println!("Processor:       {brand}");
        }
        println!("Bundles:         {}", self.bundles.join(", "));
        println!(
            "OS vector state: avx={} avx512={}",
            self.os.vector, self.os.wide_vector
        );
        println!("Features:        {}", self.features.join(" "));
        println!(
            "Artifact dir:    {} ({:?})",
            self.lib_dir.path.display(),
            self.lib_dir.source
        );

        if self.gpus.is_empty() {
            println!("GPUs:            none");
            return;
        }
        println!(
            "GPU driver:      {}",
            format_optional(self.gpus.driver_version.as_deref(), "unknown")
        );
        for device in &self.gpus.devices {
            println!(
                "GPU{}:            {} (compute capability {})",
                device.index,
                format_optional(device.name.as_deref(), "unknown"),
                device.compute_capability
            );
        }
    }
}
