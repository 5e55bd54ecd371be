//! CPU feature detection via CPUID.
//!
//! Register decoding is generic over [`CpuIdReader`] so it can be fed
//! recorded register values in tests. The OS enablement checks rely on
//! the standard library, which consults XGETBV for us.

use libmatch_core::{CpuFeatures, ExtendedFeatures, ExtraFeatures, PrimaryFeatures};
use raw_cpuid::{CpuId, CpuIdReader};
use tracing::debug;

const LEAF_VENDOR: u32 = 0x0;
const LEAF_FEATURES: u32 = 0x1;
const LEAF_EXTENDED_FEATURES: u32 = 0x7;
const LEAF_EXTENDED_MAX: u32 = 0x8000_0000;
const LEAF_EXTRA_FEATURES: u32 = 0x8000_0001;

/// Decode the three feature groups from raw CPUID leaves.
///
/// Leaves beyond the reported maximum are treated as all-zero.
pub fn decode_features<R: CpuIdReader>(reader: &R) -> CpuFeatures {
    let max_basic = reader.cpuid1(LEAF_VENDOR).eax;
    let max_extended = reader.cpuid1(LEAF_EXTENDED_MAX).eax;

    let primary = if max_basic >= LEAF_FEATURES {
        let regs = reader.cpuid1(LEAF_FEATURES);
        PrimaryFeatures::from_registers(regs.ecx, regs.edx)
    } else {
        PrimaryFeatures::empty()
    };

    let extended = if max_basic >= LEAF_EXTENDED_FEATURES {
        let regs = reader.cpuid2(LEAF_EXTENDED_FEATURES, 0);
        ExtendedFeatures::from_registers(regs.ebx, regs.ecx)
    } else {
        ExtendedFeatures::empty()
    };

    let extra = if max_extended >= LEAF_EXTRA_FEATURES {
        let regs = reader.cpuid1(LEAF_EXTRA_FEATURES);
        ExtraFeatures::from_registers(regs.ecx, regs.edx)
    } else {
        ExtraFeatures::empty()
    };

    debug!(max_basic, max_extended, "Decoded CPUID leaves");
    CpuFeatures::new(primary, extended, extra)
}

/// Vendor and brand strings, when the processor reports them.
pub fn describe<R: CpuIdReader>(reader: R) -> (Option<String>, Option<String>) {
    let cpuid = CpuId::with_cpuid_reader(reader);
    let vendor = cpuid.get_vendor_info().map(|v| v.as_str().to_string());
    let brand = cpuid
        .get_processor_brand_string()
        .map(|b| b.as_str().trim().to_string())
        .filter(|b| !b.is_empty());
    (vendor, brand)
}

#[cfg(target_arch = "x86_64")]
mod native {
    use super::{CpuFeatures, decode_features, describe};
    use raw_cpuid::CpuIdReaderNative;

    pub fn physical_features() -> CpuFeatures {
        decode_features(&CpuIdReaderNative)
    }

    pub fn model() -> (Option<String>, Option<String>) {
        describe(CpuIdReaderNative)
    }

    pub fn os_enabled_vector() -> bool {
        std::arch::is_x86_feature_detected!("avx")
    }

    pub fn os_enabled_wide_vector() -> bool {
        std::arch::is_x86_feature_detected!("avx512f")
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod native {
    use super::CpuFeatures;

    pub const fn physical_features() -> CpuFeatures {
        CpuFeatures::EMPTY
    }

    pub const fn model() -> (Option<String>, Option<String>) {
        (None, None)
    }

    pub const fn os_enabled_vector() -> bool {
        false
    }

    pub const fn os_enabled_wide_vector() -> bool {
        false
    }
}

pub use native::{model, os_enabled_vector, os_enabled_wide_vector, physical_features};
