//! Host probe implementation for libmatch-runtime.
//!
//! This module provides the `DefaultHostProbe` which implements
//! `HostProbePort` from libmatch-core. It reads CPUID directly and asks
//! the NVIDIA driver about installed GPUs.

mod cpu;
mod gpu;

use libmatch_core::{CpuFeatures, GpuInventory, HostProbePort};
use tracing::debug;

pub use cpu::decode_features;
pub use gpu::parse_query_output;

/// Default implementation of `HostProbePort`.
///
/// This struct probes the machine it runs on. It should be constructed
/// in the CLI bootstrap and passed to `HostProfile::resolve`.
///
/// # Example
///
/// ```ignore
/// use libmatch_core::{ArchitectureCatalog, HostProfile};
/// use libmatch_runtime::system::DefaultHostProbe;
///
/// let probe = DefaultHostProbe::new();
/// let host = HostProfile::resolve(ArchitectureCatalog::builtin(), &probe)?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHostProbe;

impl DefaultHostProbe {
    /// Create a new default host probe.
    pub const fn new() -> Self {
        Self
    }

    /// CPU vendor and brand string, for display only.
    pub fn cpu_model(&self) -> CpuModel {
        let (vendor, brand) = cpu::model();
        CpuModel { vendor, brand }
    }
}

/// Human-readable CPU identification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuModel {
    pub vendor: Option<String>,
    pub brand: Option<String>,
}

impl HostProbePort for DefaultHostProbe {
    fn physical_features(&self) -> CpuFeatures {
        let features = cpu::physical_features();
        debug!(features = ?features.names(), "Physical CPU features");
        features
    }

    fn os_enabled_vector(&self) -> bool {
        cpu::os_enabled_vector()
    }

    fn os_enabled_wide_vector(&self) -> bool {
        cpu::os_enabled_wide_vector()
    }

    fn enumerate_gpus(&self) -> GpuInventory {
        gpu::enumerate()
    }
}
