//! Non-fatal advisories about the selected artifact.
//!
//! Advisories describe host capabilities the chosen build leaves on the
//! table. They are reported after selection and never change its outcome.

use std::fmt;

use serde::Serialize;

use crate::artifact::Artifact;
use crate::catalog::bundles_in;
use crate::host::HostProfile;

/// Something the host offers that the selected artifact does not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Named CPU bundles the host supports but the build does not require.
    UnexploitedCpuFeatures { bundles: Vec<&'static str> },
    /// GPU devices whose compute capability the build does not support.
    UnsupportedGpus { devices: Vec<u32> },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexploitedCpuFeatures { bundles } => write!(
                f,
                "following CPU features are unsupported in the selected build, \
                 performance can be below optimal: {}",
                bundles.join(", ")
            ),
            Self::UnsupportedGpus { devices } => {
                let names: Vec<String> = devices.iter().map(|i| format!("GPU{i}")).collect();
                write!(
                    f,
                    "following GPU devices are unsupported in the selected build: {}",
                    names.join(", ")
                )
            }
        }
    }
}

/// Compare the selected artifact with the host it will run on.
pub fn advise(host: &HostProfile, selected: &Artifact) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let leftover = host.cpu().difference(selected.required_cpu());
    let bundles = bundles_in(leftover);
    if !bundles.is_empty() {
        advisories.push(Advisory::UnexploitedCpuFeatures { bundles });
    }

    let devices: Vec<u32> = host
        .gpus
        .unsupported_by(selected.supported_gpus())
        .map(|device| device.index)
        .collect();
    if !devices.is_empty() {
        advisories.push(Advisory::UnsupportedGpus { devices });
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ComputeCapability, GpuDevice, GpuInventory, OsVectorSupport};
    use crate::catalog::ArchitectureCatalog;
    use std::path::Path;

    fn host(generation: &str, gpus: &[(u32, u32)]) -> HostProfile {
        let architecture = ArchitectureCatalog::builtin()
            .lookup(generation)
            .unwrap()
            .clone();
        HostProfile {
            effective: architecture.features,
            architecture,
            os: OsVectorSupport::ALL,
            gpus: GpuInventory {
                driver_version: None,
                devices: gpus
                    .iter()
                    .zip(0..)
                    .map(|(&(major, minor), index)| GpuDevice {
                        index,
                        name: None,
                        compute_capability: ComputeCapability::new(major, minor),
                    })
                    .collect(),
            },
        }
    }

    fn artifact(file_name: &str) -> Artifact {
        Artifact::resolve(ArchitectureCatalog::builtin(), Path::new("/lib"), file_name).unwrap()
    }

    #[test]
    fn exact_match_has_nothing_to_report() {
        let advisories = advise(&host("haswell", &[]), &artifact("lib_cpu_haswell.so"));
        assert!(advisories.is_empty());
    }

    #[test]
    fn reports_bundles_the_build_leaves_unused() {
        let advisories = advise(&host("skylake-avx512", &[]), &artifact("lib_cpu_sandybridge.so"));
        assert_eq!(
            advisories,
            vec![Advisory::UnexploitedCpuFeatures {
                bundles: vec!["avx512", "avx2", "fma"]
            }]
        );
    }

    #[test]
    fn non_bundle_leftovers_are_silent() {
        // broadwell adds RDSEED/ADX/PREFETCHW, none of which is a named bundle
        let advisories = advise(&host("broadwell", &[]), &artifact("lib_cpu_haswell.so"));
        assert!(advisories.is_empty());
    }

    #[test]
    fn reports_unsupported_gpu_indices() {
        let host = host("haswell", &[(7, 5), (8, 0), (8, 6)]);
        let advisories = advise(&host, &artifact("lib_gpu_8.0_cpu_haswell.so"));
        assert_eq!(
            advisories,
            vec![Advisory::UnsupportedGpus {
                devices: vec![0, 2]
            }]
        );
        assert_eq!(
            advisories[0].to_string(),
            "following GPU devices are unsupported in the selected build: GPU0, GPU2"
        );
    }

    #[test]
    fn gpu_agnostic_build_never_warns_about_gpus() {
        let host = host("haswell", &[(7, 5), (8, 0)]);
        assert!(advise(&host, &artifact("lib_cpu_haswell.so")).is_empty());
    }
}
