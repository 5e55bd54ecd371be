//! Artifact ranking and selection.
//!
//! Selection runs in three steps over the discovered candidates:
//!
//! 1. **Filter**: drop artifacts that need a CPU feature the host profile
//!    lacks.
//! 2. **CPU stage**: stable sort by CPU waste, the number of host features
//!    the artifact leaves unused.
//! 3. **GPU stage**: stable sort by GPU mismatch, the number of host devices
//!    the artifact does not support, applied within each run of equal CPU
//!    waste.
//!
//! CPU waste is the primary order and the GPU stage cannot undo it: an
//! artifact that exploits more of the CPU wins even if it supports fewer
//! GPUs. The stages are never merged into a single weighted key.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::artifact::Artifact;
use crate::error::SelectionError;
use crate::host::HostProfile;

/// An artifact with both of its ranking keys.
#[derive(Debug, Clone, Serialize)]
pub struct RankedArtifact {
    pub artifact: Artifact,
    pub cpu_priority: u32,
    pub gpu_priority: usize,
}

/// Host CPU features the artifact's requirement does not mandate.
///
/// Only meaningful for artifacts the host supports, where it equals
/// `host count - required count`.
pub fn cpu_priority(host: &HostProfile, artifact: &Artifact) -> u32 {
    host.cpu().difference(artifact.required_cpu()).count()
}

/// Host GPU devices the artifact does not support; zero when GPU-agnostic.
pub fn gpu_priority(host: &HostProfile, artifact: &Artifact) -> usize {
    host.gpus.unsupported_by(artifact.supported_gpus()).count()
}

/// CPU stage comparator: less waste first.
pub fn by_cpu_waste(a: &RankedArtifact, b: &RankedArtifact) -> Ordering {
    a.cpu_priority.cmp(&b.cpu_priority)
}

/// GPU stage comparator: fewer unsupported devices first.
pub fn by_gpu_mismatch(a: &RankedArtifact, b: &RankedArtifact) -> Ordering {
    a.gpu_priority.cmp(&b.gpu_priority)
}

/// Keep the candidates the host can run, in their original order.
pub fn compatible(host: &HostProfile, candidates: Vec<Artifact>) -> Vec<Artifact> {
    candidates
        .into_iter()
        .filter(|artifact| {
            let ok = host.supports(artifact.required_cpu());
            if !ok {
                debug!(
                    file = %artifact.file_name,
                    needs = artifact.architecture.name,
                    "Artifact not supported by host"
                );
            }
            ok
        })
        .collect()
}

/// Rank host-compatible artifacts, best first.
///
/// Both sorts are stable (`slice::sort_by`), so ties keep the order of the
/// previous stage, and discovery order is the final tie-break.
pub fn rank(host: &HostProfile, compatible: Vec<Artifact>) -> Vec<RankedArtifact> {
    let mut ranked: Vec<RankedArtifact> = compatible
        .into_iter()
        .map(|artifact| RankedArtifact {
            cpu_priority: cpu_priority(host, &artifact),
            gpu_priority: gpu_priority(host, &artifact),
            artifact,
        })
        .collect();

    ranked.sort_by(by_cpu_waste);
    for cpu_tie in ranked.chunk_by_mut(|a, b| a.cpu_priority == b.cpu_priority) {
        cpu_tie.sort_by(by_gpu_mismatch);
    }

    for (position, entry) in ranked.iter().enumerate() {
        debug!(
            position,
            file = %entry.artifact.file_name,
            cpu_priority = entry.cpu_priority,
            gpu_priority = entry.gpu_priority,
            "Ranked artifact"
        );
    }
    ranked
}

/// The outcome of a successful selection.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub selected: RankedArtifact,
    /// Every compatible artifact in rank order, the selected one first.
    pub ranking: Vec<RankedArtifact>,
    /// Candidates discovered before filtering.
    pub candidates: usize,
}

impl Selection {
    pub const fn artifact(&self) -> &Artifact {
        &self.selected.artifact
    }
}

/// Filter, rank and pick the best artifact.
///
/// `dir` is only used to describe failures.
pub fn select(
    host: &HostProfile,
    candidates: Vec<Artifact>,
    dir: &std::path::Path,
) -> Result<Selection, SelectionError> {
    let total = candidates.len();
    if total == 0 {
        return Err(SelectionError::NoArtifacts {
            dir: dir.to_path_buf(),
        });
    }

    let ranking = rank(host, compatible(host, candidates));
    let selected = ranking
        .first()
        .cloned()
        .ok_or_else(|| SelectionError::NoCompatibleArtifact {
            dir: dir.to_path_buf(),
            candidates: total,
            host: host.architecture.name,
        })?;

    Ok(Selection {
        selected,
        ranking,
        candidates: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{
        ComputeCapability, CpuFeatures, GpuDevice, GpuInventory, OsVectorSupport,
        PrimaryFeatures,
    };
    use crate::catalog::{ArchitectureCatalog, Increment};
    use std::path::Path;

    /// G1..G5 where each generation adds one primary bit.
    fn toy_catalog() -> ArchitectureCatalog {
        let bits = [
            PrimaryFeatures::SSE3,
            PrimaryFeatures::SSSE3,
            PrimaryFeatures::SSE4_1,
            PrimaryFeatures::SSE4_2,
            PrimaryFeatures::POPCNT,
        ];
        let names = ["g1", "g2", "g3", "g4", "g5"];
        ArchitectureCatalog::from_lineage(
            names
                .into_iter()
                .zip(bits)
                .map(|(name, bit)| Increment::named(name, CpuFeatures::primary(bit))),
        )
    }

    fn host(catalog: &ArchitectureCatalog, generation: &str, gpus: &[(u32, u32)]) -> HostProfile {
        let architecture = catalog.lookup(generation).unwrap().clone();
        HostProfile {
            effective: architecture.features,
            architecture,
            os: OsVectorSupport::ALL,
            gpus: GpuInventory {
                driver_version: None,
                devices: gpus
                    .iter()
                    .enumerate()
                    .map(|(index, &(major, minor))| GpuDevice {
                        index: u32::try_from(index).unwrap(),
                        name: None,
                        compute_capability: ComputeCapability::new(major, minor),
                    })
                    .collect(),
            },
        }
    }

    fn artifact(catalog: &ArchitectureCatalog, file_name: &str) -> Artifact {
        Artifact::resolve(catalog, Path::new("/lib"), file_name).unwrap()
    }

    fn names(ranking: &[RankedArtifact]) -> Vec<&str> {
        ranking.iter().map(|r| r.artifact.file_name.as_str()).collect()
    }

    #[test]
    fn exact_generation_beats_older_build() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[]);
        let candidates = vec![
            artifact(&catalog, "lib_cpu_g3.so"),
            artifact(&catalog, "lib_cpu_g5.so"),
        ];

        let selection = select(&host, candidates, Path::new("/lib")).unwrap();
        assert_eq!(selection.artifact().file_name, "lib_cpu_g5.so");
        assert_eq!(selection.ranking[0].cpu_priority, 0);
        assert_eq!(selection.ranking[1].cpu_priority, 2);
    }

    #[test]
    fn gpu_stage_breaks_cpu_ties() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[(7, 5), (8, 0)]);
        let candidates = vec![
            artifact(&catalog, "x_gpu_7.5_cpu_g4.so"),
            artifact(&catalog, "y_gpu_7.5,8.0_cpu_g4.so"),
        ];

        let selection = select(&host, candidates, Path::new("/lib")).unwrap();
        assert_eq!(selection.artifact().file_name, "y_gpu_7.5,8.0_cpu_g4.so");
        assert_eq!(selection.ranking[0].gpu_priority, 0);
        assert_eq!(selection.ranking[1].gpu_priority, 1);
        assert_eq!(
            selection.ranking[0].cpu_priority,
            selection.ranking[1].cpu_priority
        );
    }

    #[test]
    fn lower_cpu_waste_wins_over_gpu_coverage() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[(7, 5), (8, 0)]);
        let candidates = vec![
            artifact(&catalog, "y_gpu_7.5,8.0_cpu_g4.so"),
            artifact(&catalog, "x_gpu_7.5_cpu_g5.so"),
        ];

        let selection = select(&host, candidates, Path::new("/lib")).unwrap();
        assert_eq!(selection.artifact().file_name, "x_gpu_7.5_cpu_g5.so");
        assert_eq!(selection.selected.gpu_priority, 1);
    }

    #[test]
    fn gpu_stage_only_reorders_within_cpu_ties() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[(7, 5), (8, 0)]);
        let candidates = vec![
            artifact(&catalog, "a_gpu_7.5_cpu_g4.so"),
            artifact(&catalog, "b_gpu_7.5_cpu_g5.so"),
            artifact(&catalog, "c_gpu_7.5,8.0_cpu_g3.so"),
            artifact(&catalog, "d_gpu_7.5,8.0_cpu_g4.so"),
            artifact(&catalog, "e_cpu_g5.so"),
        ];

        let ranking = rank(&host, candidates);
        assert_eq!(
            names(&ranking),
            vec![
                "e_cpu_g5.so",
                "b_gpu_7.5_cpu_g5.so",
                "d_gpu_7.5,8.0_cpu_g4.so",
                "a_gpu_7.5_cpu_g4.so",
                "c_gpu_7.5,8.0_cpu_g3.so"
            ]
        );
    }

    #[test]
    fn gpu_agnostic_artifacts_never_lose_on_gpu() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[(6, 1), (9, 0)]);
        let agnostic = artifact(&catalog, "lib_cpu_g5.so");
        assert_eq!(gpu_priority(&host, &agnostic), 0);

        let restricted = artifact(&catalog, "lib_gpu_7.5_cpu_g5.so");
        assert_eq!(gpu_priority(&host, &restricted), 2);
    }

    #[test]
    fn nothing_compatible_is_an_error_not_a_default() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g2", &[]);
        let candidates = vec![
            artifact(&catalog, "lib_cpu_g3.so"),
            artifact(&catalog, "lib_cpu_g5.so"),
        ];

        let err = select(&host, candidates, Path::new("/lib")).unwrap_err();
        match err {
            SelectionError::NoCompatibleArtifact {
                candidates, host, ..
            } => {
                assert_eq!(candidates, 2);
                assert_eq!(host, "g2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_candidates_is_distinguished() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[]);
        let err = select(&host, Vec::new(), Path::new("/lib")).unwrap_err();
        assert!(matches!(err, SelectionError::NoArtifacts { .. }));
        assert!(err.is_no_artifact());
    }

    #[test]
    fn filter_excludes_every_missing_bit() {
        // For each generation above the host, removing it from the host must
        // exclude the artifact that needs it.
        let catalog = toy_catalog();
        for (i, entry) in catalog.entries().iter().enumerate() {
            let below = if i == 0 { None } else { Some(&catalog.entries()[i - 1]) };
            let Some(below) = below else { continue };
            let host = host(&catalog, below.name, &[]);
            let needs_bit = artifact(&catalog, &format!("lib_cpu_{}.so", entry.name));
            assert!(compatible(&host, vec![needs_bit]).is_empty(), "{}", entry.name);
        }
    }

    #[test]
    fn filter_checks_every_bit_of_the_builtin_catalog() {
        let catalog = ArchitectureCatalog::builtin();
        let newest = catalog.entries().last().unwrap();
        let candidate = artifact(catalog, &format!("lib_cpu_{}.so", newest.name));

        let mut single_bits: Vec<CpuFeatures> = Vec::new();
        single_bits.extend(newest.features.primary.iter().map(CpuFeatures::primary));
        single_bits.extend(newest.features.extended.iter().map(CpuFeatures::extended));
        single_bits.extend(newest.features.extra.iter().map(CpuFeatures::extra));
        assert_eq!(single_bits.len() as u32, newest.feature_count());

        for bit in single_bits {
            let mut host = host(catalog, newest.name, &[]);
            host.architecture.features = newest.features.difference(bit);
            assert!(
                compatible(&host, vec![candidate.clone()]).is_empty(),
                "{:?}",
                bit.names()
            );
        }
    }

    #[test]
    fn superset_requirement_never_wastes_more() {
        let catalog = ArchitectureCatalog::builtin();
        let host = host(catalog, "icelake-client", &[]);
        let entries = catalog.entries();
        for pair in entries.windows(2) {
            let older = artifact(catalog, &format!("lib_cpu_{}.so", pair[0].name));
            let newer = artifact(catalog, &format!("lib_cpu_{}.so", pair[1].name));
            assert!(cpu_priority(&host, &newer) <= cpu_priority(&host, &older));
        }
    }

    #[test]
    fn cpu_priority_is_count_difference() {
        let catalog = ArchitectureCatalog::builtin();
        let host = host(catalog, "skylake", &[]);
        let candidate = artifact(catalog, "lib_cpu_sandybridge.so");
        assert_eq!(
            cpu_priority(&host, &candidate),
            host.architecture.feature_count() - candidate.architecture.feature_count()
        );
    }

    #[test]
    fn gpu_ties_keep_cpu_order() {
        let catalog = toy_catalog();
        let host = host(&catalog, "g5", &[(8, 0)]);
        let candidates = vec![
            artifact(&catalog, "b_cpu_g3.so"),
            artifact(&catalog, "a_cpu_g5.so"),
            artifact(&catalog, "c_cpu_g3.so"),
            artifact(&catalog, "d_cpu_g4.so"),
        ];
        let ranking = rank(&host, candidates);
        assert_eq!(
            names(&ranking),
            vec!["a_cpu_g5.so", "d_cpu_g4.so", "b_cpu_g3.so", "c_cpu_g3.so"]
        );
    }
}
