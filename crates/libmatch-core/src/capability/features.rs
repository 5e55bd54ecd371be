//! CPU feature flags, one bitflags type per probe namespace.
//!
//! Bit positions mirror the CPUID registers they are read from so the
//! runtime probe can load raw register values without a translation table.
//! Each namespace packs two 32-bit registers into a single `u64`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// CPUID leaf 1: ECX in the low half, EDX in the high half.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct PrimaryFeatures: u64 {
        const SSE3       = 1 << 0;
        const PCLMULQDQ  = 1 << 1;
        const SSSE3      = 1 << 9;
        const FMA        = 1 << 12;
        const CMPXCHG16B = 1 << 13;
        const SSE4_1     = 1 << 19;
        const SSE4_2     = 1 << 20;
        const MOVBE      = 1 << 22;
        const POPCNT     = 1 << 23;
        const AES        = 1 << 25;
        const XSAVE      = 1 << 26;
        const AVX        = 1 << 28;
        const F16C       = 1 << 29;
        const RDRAND     = 1 << 30;
        const MMX        = 1 << (32 + 23);
        const SSE        = 1 << (32 + 25);
        const SSE2       = 1 << (32 + 26);
    }
}

bitflags! {
    /// CPUID leaf 7 subleaf 0: EBX in the low half, ECX in the high half.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct ExtendedFeatures: u64 {
        const FSGSBASE        = 1 << 0;
        const BMI1            = 1 << 3;
        const AVX2            = 1 << 5;
        const BMI2            = 1 << 8;
        const AVX512F         = 1 << 16;
        const AVX512DQ        = 1 << 17;
        const RDSEED          = 1 << 18;
        const ADX             = 1 << 19;
        const AVX512IFMA      = 1 << 21;
        const CLFLUSHOPT      = 1 << 23;
        const CLWB            = 1 << 24;
        const AVX512CD        = 1 << 28;
        const SHA             = 1 << 29;
        const AVX512BW        = 1 << 30;
        const AVX512VL        = 1 << 31;
        const AVX512VBMI      = 1 << (32 + 1);
        const AVX512VBMI2     = 1 << (32 + 6);
        const GFNI            = 1 << (32 + 8);
        const VAES            = 1 << (32 + 9);
        const VPCLMULQDQ      = 1 << (32 + 10);
        const AVX512VNNI      = 1 << (32 + 11);
        const AVX512BITALG    = 1 << (32 + 12);
        const AVX512VPOPCNTDQ = 1 << (32 + 14);
        const RDPID           = 1 << (32 + 22);
    }
}

bitflags! {
    /// CPUID leaf 0x8000_0001: ECX in the low half, EDX in the high half.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct ExtraFeatures: u64 {
        const LAHF_SAHF = 1 << 0;
        const LZCNT     = 1 << 5;
        const PREFETCHW = 1 << 8;
        const RDTSCP    = 1 << (32 + 27);
    }
}

impl Default for PrimaryFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ExtendedFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ExtraFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pack two 32-bit registers into one namespace word.
pub(crate) const fn pack(low: u32, high: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

impl PrimaryFeatures {
    /// Instructions that need the OS to save YMM state (AVX tier).
    pub const VECTOR_TIER: Self = Self::AVX.union(Self::FMA).union(Self::F16C);

    /// Build from the raw leaf 1 registers, dropping bits we do not model.
    pub const fn from_registers(ecx: u32, edx: u32) -> Self {
        Self::from_bits_truncate(pack(ecx, edx))
    }
}

impl ExtendedFeatures {
    /// AVX tier instructions reported by leaf 7.
    pub const VECTOR_TIER: Self = Self::AVX2.union(Self::VAES).union(Self::VPCLMULQDQ);

    /// Instructions that need the OS to save ZMM and opmask state (AVX-512 tier).
    pub const WIDE_VECTOR_TIER: Self = Self::AVX512F
        .union(Self::AVX512DQ)
        .union(Self::AVX512IFMA)
        .union(Self::AVX512CD)
        .union(Self::AVX512BW)
        .union(Self::AVX512VL)
        .union(Self::AVX512VBMI)
        .union(Self::AVX512VBMI2)
        .union(Self::AVX512VNNI)
        .union(Self::AVX512BITALG)
        .union(Self::AVX512VPOPCNTDQ);

    /// Build from the raw leaf 7 registers, dropping bits we do not model.
    pub const fn from_registers(ebx: u32, ecx: u32) -> Self {
        Self::from_bits_truncate(pack(ebx, ecx))
    }
}

impl ExtraFeatures {
    /// Build from the raw leaf 0x8000_0001 registers, dropping bits we do not model.
    pub const fn from_registers(ecx: u32, edx: u32) -> Self {
        Self::from_bits_truncate(pack(ecx, edx))
    }
}
