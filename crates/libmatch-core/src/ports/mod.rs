//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No CPUID, driver or process details in any signature
//! - Implementations live in adapters (`libmatch-runtime`)

pub mod host_probe;

pub use host_probe::HostProbePort;
