//! Host profile resolution.
//!
//! The host profile is the catalog generation that best describes the
//! running CPU, together with the GPU inventory. It is resolved once at
//! start-up and never changes afterwards.

use serde::Serialize;
use tracing::{debug, info};

use crate::capability::{CpuFeatures, GpuInventory, OsVectorSupport};
use crate::catalog::{ArchitectureCatalog, ArchitectureEntry, bundles_in};
use crate::error::SelectionError;
use crate::ports::HostProbePort;

/// Resolved capabilities of the running machine.
#[derive(Debug, Clone, Serialize)]
pub struct HostProfile {
    /// Best fully supported catalog generation.
    pub architecture: ArchitectureEntry,
    /// Physical features with OS-disabled vector tiers removed.
    pub effective: CpuFeatures,
    pub os: OsVectorSupport,
    pub gpus: GpuInventory,
}

impl HostProfile {
    /// Probe the host and resolve it against `catalog`.
    pub fn resolve(
        catalog: &ArchitectureCatalog,
        probe: &dyn HostProbePort,
    ) -> Result<Self, SelectionError> {
        let os = OsVectorSupport {
            vector: probe.os_enabled_vector(),
            wide_vector: probe.os_enabled_wide_vector(),
        };
        let physical = probe.physical_features();
        let effective = physical.restricted_to(os);
        debug!(
            physical = physical.count(),
            effective = effective.count(),
            ?os,
            "Probed CPU features"
        );

        let architecture = best_supported(catalog, effective)
            .ok_or(SelectionError::UnsupportedCpu)?
            .clone();
        info!(
            "CPU: {} {:?}",
            architecture.name,
            bundles_in(architecture.features)
        );

        Ok(Self {
            architecture,
            effective,
            os,
            gpus: probe.enumerate_gpus(),
        })
    }

    /// CPU features the selection engine may rely on.
    pub const fn cpu(&self) -> CpuFeatures {
        self.architecture.features
    }

    /// Does this host satisfy a CPU requirement?
    pub const fn supports(&self, required: CpuFeatures) -> bool {
        required.is_subset_of(self.architecture.features)
    }
}

/// Pick the fully supported entry with the most features.
///
/// Ties go to the entry defined last, so the result never depends on
/// anything but catalog order.
pub fn best_supported(
    catalog: &ArchitectureCatalog,
    effective: CpuFeatures,
) -> Option<&ArchitectureEntry> {
    catalog
        .entries()
        .iter()
        .filter(|entry| entry.features.is_subset_of(effective))
        .fold(None, |best: Option<&ArchitectureEntry>, entry| match best {
            Some(current) if current.feature_count() > entry.feature_count() => Some(current),
            _ => Some(entry),
        })
}
