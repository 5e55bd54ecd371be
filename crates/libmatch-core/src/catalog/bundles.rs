//! Coarse named capabilities used in user-facing diagnostics.

use crate::capability::{CpuFeatures, ExtendedFeatures, ExtraFeatures, PrimaryFeatures};

/// A named group of feature bits that matters for library builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureBundle {
    pub name: &'static str,
    pub features: CpuFeatures,
}

/// Bundles from widest to narrowest.
pub const FEATURE_BUNDLES: &[FeatureBundle] = &[
    FeatureBundle {
        name: "avx512",
        features: CpuFeatures::extended(
            ExtendedFeatures::AVX512F
                .union(ExtendedFeatures::AVX512VL)
                .union(ExtendedFeatures::AVX512BW)
                .union(ExtendedFeatures::AVX512DQ)
                .union(ExtendedFeatures::AVX512CD),
        ),
    },
    FeatureBundle {
        name: "avx2",
        features: CpuFeatures::extended(ExtendedFeatures::AVX2),
    },
    FeatureBundle {
        name: "fma",
        features: CpuFeatures::primary(PrimaryFeatures::FMA),
    },
    FeatureBundle {
        name: "avx",
        features: CpuFeatures::primary(PrimaryFeatures::AVX),
    },
    FeatureBundle {
        name: "sse42",
        features: CpuFeatures::new(
            PrimaryFeatures::SSE4_2,
            ExtendedFeatures::empty(),
            ExtraFeatures::empty(),
        ),
    },
];

/// Names of every bundle whose bits are all present in `features`.
pub fn bundles_in(features: CpuFeatures) -> Vec<&'static str> {
    FEATURE_BUNDLES
        .iter()
        .filter(|bundle| bundle.features.is_subset_of(features))
        .map(|bundle| bundle.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArchitectureCatalog;

    #[test]
    fn haswell_offers_everything_below_avx512() {
        let haswell = ArchitectureCatalog::builtin().lookup("haswell").unwrap();
        assert_eq!(
            bundles_in(haswell.features),
            vec!["avx2", "fma", "avx", "sse42"]
        );
    }

    #[test]
    fn partial_avx512_is_not_reported() {
        let partial = CpuFeatures::extended(ExtendedFeatures::AVX512F | ExtendedFeatures::AVX512VL);
        assert!(bundles_in(partial).is_empty());
    }

    #[test]
    fn empty_features_offer_nothing() {
        assert!(bundles_in(CpuFeatures::EMPTY).is_empty());
    }
}
