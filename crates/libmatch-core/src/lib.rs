//! Core domain for libmatch.
//!
//! Pure logic for choosing a precompiled library variant: the CPU and GPU
//! capability model, the architecture catalog, artifact naming, host
//! profile resolution, and the two-stage ranking. Hardware access lives
//! behind [`ports::HostProbePort`] and is implemented by `libmatch-runtime`.

#![deny(unused_crate_dependencies)]

pub mod advisory;
pub mod artifact;
pub mod capability;
pub mod catalog;
pub mod error;
pub mod host;
pub mod paths;
pub mod ports;
pub mod selector;

// Re-export commonly used types for convenience
pub use advisory::{Advisory, advise};
pub use artifact::{Artifact, ArtifactError, ArtifactName, ArtifactNameError, discover};
pub use capability::{
    CapabilitySet, ComputeCapability, ComputeCapabilityParseError, CpuFeatures, ExtendedFeatures,
    ExtraFeatures, GpuDevice, GpuInventory, OsVectorSupport, PrimaryFeatures,
};
pub use catalog::{
    ArchitectureCatalog, ArchitectureEntry, FEATURE_BUNDLES, FeatureBundle, Increment, bundles_in,
};
pub use error::SelectionError;
pub use host::{HostProfile, best_supported};
pub use ports::HostProbePort;
pub use selector::{RankedArtifact, Selection, select};

// Re-export path utilities
pub use paths::{
    DEFAULT_LIB_DIR, LIB_DIR_ENV, LibDirResolution, LibDirSource, PathError, resolve_lib_dir,
};
