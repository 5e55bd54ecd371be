//! Architecture catalog: named CPU generations with cumulative features.
//!
//! Each generation is declared as an increment over its predecessor and
//! folded into an absolute feature set when the catalog is built. The
//! catalog is closed and static; [`ArchitectureCatalog::builtin`] builds it
//! once per process and hands out a shared reference afterwards.
//!
//! # Invariant
//!
//! Entries appear in lineage order and every entry's features are a superset
//! of its predecessor's, so feature counts never decrease along the list.

mod bundles;

use std::sync::LazyLock;

use serde::Serialize;

use crate::capability::{CpuFeatures, ExtendedFeatures, ExtraFeatures, PrimaryFeatures};

pub use bundles::{FEATURE_BUNDLES, FeatureBundle, bundles_in};

/// A named CPU generation with its absolute feature set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureEntry {
    /// Canonical name (gcc `-march` spelling).
    pub name: &'static str,
    /// Short alias, typically the vector tier the generation introduced.
    pub alias: Option<&'static str>,
    pub features: CpuFeatures,
}

impl ArchitectureEntry {
    /// Does `label` name this entry, by canonical name or alias?
    pub fn answers_to(&self, label: &str) -> bool {
        self.name == label || self.alias == Some(label)
    }

    pub const fn feature_count(&self) -> u32 {
        self.features.count()
    }
}

/// The incremental part of a generation definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Increment {
    pub name: Option<&'static str>,
    pub alias: Option<&'static str>,
    pub features: CpuFeatures,
}

impl Increment {
    pub const fn named(name: &'static str, features: CpuFeatures) -> Self {
        Self {
            name: Some(name),
            alias: None,
            features,
        }
    }

    #[must_use]
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }
}

/// Build a generation on top of `base`.
///
/// Features are OR-ed per namespace. Name and alias come from the
/// increment when it sets them and are inherited from `base` otherwise.
pub fn compose(base: &ArchitectureEntry, increment: Increment) -> ArchitectureEntry {
    ArchitectureEntry {
        name: increment.name.unwrap_or(base.name),
        alias: increment.alias.or(base.alias),
        features: base.features.union(increment.features),
    }
}

/// Ordered, immutable list of generations.
#[derive(Debug, Clone)]
pub struct ArchitectureCatalog {
    entries: Vec<ArchitectureEntry>,
}

static BUILTIN: LazyLock<ArchitectureCatalog> = LazyLock::new(|| {
    ArchitectureCatalog::from_lineage(builtin_lineage())
});

impl ArchitectureCatalog {
    /// The process-wide built-in x86-64 catalog.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Fold a lineage of increments into absolute entries.
    ///
    /// The first increment is composed over an empty base, every following
    /// one over the entry before it.
    pub fn from_lineage(lineage: impl IntoIterator<Item = Increment>) -> Self {
        let root = ArchitectureEntry {
            name: "",
            alias: None,
            features: CpuFeatures::EMPTY,
        };
        let entries = lineage
            .into_iter()
            .scan(root, |previous, increment| {
                let entry = compose(previous, increment);
                *previous = entry.clone();
                Some(entry)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ArchitectureEntry] {
        &self.entries
    }

    /// Find a generation by canonical name, falling back to the first alias
    /// match in definition order.
    pub fn lookup(&self, label: &str) -> Option<&ArchitectureEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == label)
            .or_else(|| self.entries.iter().find(|entry| entry.alias == Some(label)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Intel lineage as documented for gcc `-march`.
fn builtin_lineage() -> Vec<Increment> {
    use ExtendedFeatures as Ext;
    use ExtraFeatures as Extra;
    use PrimaryFeatures as P;

    vec![
        // MMX, SSE, SSE2, SSE3, SSSE3, SSE4.1, SSE4.2, POPCNT
        Increment::named(
            "nehalem",
            CpuFeatures::new(
                P::MMX
                    | P::SSE
                    | P::SSE2
                    | P::SSE3
                    | P::SSSE3
                    | P::SSE4_1
                    | P::SSE4_2
                    | P::POPCNT
                    | P::CMPXCHG16B,
                Ext::empty(),
                Extra::LAHF_SAHF,
            ),
        )
        .alias("sse42"),
        Increment::named("westmere", CpuFeatures::primary(P::AES.union(P::PCLMULQDQ))),
        Increment::named("sandybridge", CpuFeatures::primary(P::AVX.union(P::XSAVE))).alias("avx"),
        Increment::named(
            "ivybridge",
            CpuFeatures::new(P::F16C | P::RDRAND, Ext::FSGSBASE, Extra::empty()),
        ),
        Increment::named(
            "haswell",
            CpuFeatures::new(
                P::FMA | P::MOVBE,
                Ext::AVX2 | Ext::BMI1 | Ext::BMI2,
                Extra::LZCNT,
            ),
        )
        .alias("avx2_fma"),
        Increment::named(
            "broadwell",
            CpuFeatures::new(P::empty(), Ext::RDSEED | Ext::ADX, Extra::PREFETCHW),
        ),
        Increment::named("skylake", CpuFeatures::extended(Ext::CLFLUSHOPT)),
        Increment::named(
            "skylake-avx512",
            CpuFeatures::extended(
                Ext::AVX512F | Ext::AVX512VL | Ext::AVX512BW | Ext::AVX512DQ | Ext::AVX512CD,
            ),
        )
        .alias("avx512"),
        Increment::named(
            "cannonlake",
            CpuFeatures::extended(Ext::SHA | Ext::AVX512IFMA | Ext::AVX512VBMI),
        ),
        Increment::named(
            "icelake-client",
            CpuFeatures::extended(
                Ext::AVX512VBMI2
                    | Ext::GFNI
                    | Ext::VAES
                    | Ext::VPCLMULQDQ
                    | Ext::AVX512VNNI
                    | Ext::AVX512BITALG
                    | Ext::AVX512VPOPCNTDQ
                    | Ext::RDPID,
            ),
        ),
    ]
}
