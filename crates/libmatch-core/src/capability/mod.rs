//! Hardware capability model.
//!
//! A [`CpuFeatures`] value keeps the three CPUID namespaces in separate
//! words so that equal bit positions from different leaves never alias.
//! [`CapabilitySet`] pairs those CPU bits with an optional list of GPU
//! compute capabilities.
//!
//! # Invariant
//!
//! Every comparison is per namespace: a set is satisfied by another only if
//! each of its three words is a subset of the other's corresponding word.

mod features;
mod gpu;

use serde::{Deserialize, Serialize};

pub use features::{ExtendedFeatures, ExtraFeatures, PrimaryFeatures};
pub use gpu::{ComputeCapability, ComputeCapabilityParseError, GpuDevice, GpuInventory};

/// CPU feature bits grouped by probe namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CpuFeatures {
    pub primary: PrimaryFeatures,
    pub extended: ExtendedFeatures,
    pub extra: ExtraFeatures,
}

impl CpuFeatures {
    pub const EMPTY: Self = Self::new(
        PrimaryFeatures::empty(),
        ExtendedFeatures::empty(),
        ExtraFeatures::empty(),
    );

    pub const fn new(
        primary: PrimaryFeatures,
        extended: ExtendedFeatures,
        extra: ExtraFeatures,
    ) -> Self {
        Self {
            primary,
            extended,
            extra,
        }
    }

    pub const fn primary(primary: PrimaryFeatures) -> Self {
        Self::new(primary, ExtendedFeatures::empty(), ExtraFeatures::empty())
    }

    pub const fn extended(extended: ExtendedFeatures) -> Self {
        Self::new(PrimaryFeatures::empty(), extended, ExtraFeatures::empty())
    }

    pub const fn extra(extra: ExtraFeatures) -> Self {
        Self::new(PrimaryFeatures::empty(), ExtendedFeatures::empty(), extra)
    }

    /// Bitwise OR of each namespace.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(
            self.primary.union(other.primary),
            self.extended.union(other.extended),
            self.extra.union(other.extra),
        )
    }

    /// Bits set in `self` but not in `other` (`self &^ other`).
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self::new(
            self.primary.difference(other.primary),
            self.extended.difference(other.extended),
            self.extra.difference(other.extra),
        )
    }

    /// True if every bit of `self` is also set in `other`.
    pub const fn is_subset_of(self, other: Self) -> bool {
        other.primary.contains(self.primary)
            && other.extended.contains(self.extended)
            && other.extra.contains(self.extra)
    }

    pub const fn is_empty(self) -> bool {
        self.primary.is_empty() && self.extended.is_empty() && self.extra.is_empty()
    }

    /// Total number of set bits across all namespaces.
    pub const fn count(self) -> u32 {
        self.primary.bits().count_ones()
            + self.extended.bits().count_ones()
            + self.extra.bits().count_ones()
    }

    /// Remove every vector tier the OS has not enabled.
    ///
    /// Without the narrow (AVX) tier the wide (AVX-512) tier is unusable as
    /// well, whatever the OS reports for it.
    #[must_use]
    pub const fn restricted_to(self, os: OsVectorSupport) -> Self {
        let mut disabled = Self::EMPTY;
        if !os.vector {
            disabled = disabled.union(Self::new(
                PrimaryFeatures::VECTOR_TIER,
                ExtendedFeatures::VECTOR_TIER.union(ExtendedFeatures::WIDE_VECTOR_TIER),
                ExtraFeatures::empty(),
            ));
        } else if !os.wide_vector {
            disabled = Self::extended(ExtendedFeatures::WIDE_VECTOR_TIER);
        }
        self.difference(disabled)
    }

    /// Flag names in namespace order, for diagnostics.
    pub fn names(self) -> Vec<&'static str> {
        self.primary
            .iter_names()
            .map(|(name, _)| name)
            .chain(self.extended.iter_names().map(|(name, _)| name))
            .chain(self.extra.iter_names().map(|(name, _)| name))
            .collect()
    }
}

/// Vector register state the operating system has enabled.
///
/// A CPU may implement AVX or AVX-512 while the kernel (or hypervisor)
/// refuses to save the wider registers; such instructions then fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsVectorSupport {
    /// YMM state (AVX, AVX2, FMA).
    pub vector: bool,
    /// ZMM and opmask state (AVX-512).
    pub wide_vector: bool,
}

impl OsVectorSupport {
    pub const ALL: Self = Self {
        vector: true,
        wide_vector: true,
    };

    pub const NONE: Self = Self {
        vector: false,
        wide_vector: false,
    };
}

/// What an artifact requires, or what a host offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub cpu: CpuFeatures,
    /// Supported GPU generations; empty means GPU-agnostic.
    pub gpu: Vec<ComputeCapability>,
}

impl CapabilitySet {
    pub fn cpu_only(cpu: CpuFeatures) -> Self {
        Self {
            cpu,
            gpu: Vec::new(),
        }
    }

    /// Attach a GPU list, dropping duplicates but keeping first-seen order.
    #[must_use]
    pub fn with_gpu(mut self, gpu: impl IntoIterator<Item = ComputeCapability>) -> Self {
        self.gpu.clear();
        for cc in gpu {
            if !self.gpu.contains(&cc) {
                self.gpu.push(cc);
            }
        }
        self
    }

    pub fn is_gpu_agnostic(&self) -> bool {
        self.gpu.is_empty()
    }
}
