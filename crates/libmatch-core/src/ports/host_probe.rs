//! Host probe port for CPU feature and GPU detection.
//!
//! This port abstracts hardware probing (CPUID, driver queries) from the
//! core domain. Implementations live in adapters (e.g., libmatch-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (CPUID reads, `nvidia-smi`)
//! - CLI injects the probe via main.rs

use crate::capability::{CpuFeatures, GpuInventory};

/// Port for probing the running machine.
///
/// Each method is called at most once per invocation; the answers are
/// frozen into a [`HostProfile`](crate::host::HostProfile).
///
/// # Example
///
/// ```ignore
/// use libmatch_core::ports::HostProbePort;
///
/// fn describe(probe: &dyn HostProbePort) {
///     let physical = probe.physical_features();
///     let gpus = probe.enumerate_gpus();
///     // ...
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait HostProbePort {
    /// Feature bits implemented in silicon, regardless of OS support.
    fn physical_features(&self) -> CpuFeatures;

    /// Whether the OS saves YMM state, making AVX-class instructions usable.
    fn os_enabled_vector(&self) -> bool;

    /// Whether the OS saves ZMM/opmask state, making AVX-512 usable.
    fn os_enabled_wide_vector(&self) -> bool;

    /// Enumerate GPU devices. Probing failures yield an empty inventory.
    fn enumerate_gpus(&self) -> GpuInventory;
}
