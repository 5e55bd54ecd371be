//! Artifact naming grammar and resolution.
//!
//! A candidate library declares its requirements in its file name:
//!
//! ```text
//! <base-name>[_gpu_<major>.<minor>[,<major>.<minor>...]]_cpu_<generation>.<ext>
//! ```
//!
//! `libtensorflow_gpu_7.5,8.0_cpu_haswell.so` needs a haswell-class CPU and
//! supports GPUs of compute capability 7.5 and 8.0. Without a `_gpu_`
//! segment the artifact is GPU-agnostic.

mod discovery;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::capability::{
    CapabilitySet, ComputeCapability, ComputeCapabilityParseError, CpuFeatures,
};
use crate::catalog::{ArchitectureCatalog, ArchitectureEntry};

pub use discovery::discover;

const CPU_MARKER: &str = "_cpu_";
const GPU_MARKER: &str = "_gpu_";

/// Reasons a file name does not follow the artifact grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactNameError {
    #[error("missing `_cpu_<generation>` segment")]
    MissingCpuSegment,

    #[error("missing file extension")]
    MissingExtension,

    #[error("empty base name")]
    EmptyBaseName,

    #[error("empty cpu generation name")]
    EmptyGeneration,

    #[error(transparent)]
    InvalidGpuList(#[from] ComputeCapabilityParseError),
}

/// Why a well-formed or malformed name could not become an [`Artifact`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    #[error("can't parse artifact name: {0}")]
    Name(#[from] ArtifactNameError),

    #[error("unknown cpu name: {0}")]
    UnknownGeneration(String),
}

/// The components of an artifact file name, before catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub base: String,
    pub gpu: Vec<ComputeCapability>,
    pub generation: String,
    pub extension: String,
}

impl FromStr for ArtifactName {
    type Err = ArtifactNameError;

    fn from_str(file_name: &str) -> Result<Self, Self::Err> {
        let (head, tail) = file_name
            .rsplit_once(CPU_MARKER)
            .ok_or(ArtifactNameError::MissingCpuSegment)?;
        let (generation, extension) = tail
            .split_once('.')
            .ok_or(ArtifactNameError::MissingExtension)?;
        if generation.is_empty() {
            return Err(ArtifactNameError::EmptyGeneration);
        }
        if extension.is_empty() {
            return Err(ArtifactNameError::MissingExtension);
        }

        let (base, gpu) = match head.rsplit_once(GPU_MARKER) {
            Some((base, list)) => (base, ComputeCapability::parse_list(list)?),
            None => (head, Vec::new()),
        };
        if base.is_empty() {
            return Err(ArtifactNameError::EmptyBaseName);
        }

        Ok(Self {
            base: base.to_string(),
            gpu,
            generation: generation.to_string(),
            extension: extension.to_string(),
        })
    }
}

/// A candidate library resolved against the architecture catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub file_name: String,
    pub path: PathBuf,
    /// Minimum CPU generation, as looked up by name or alias.
    pub architecture: ArchitectureEntry,
    pub required: CapabilitySet,
}

impl Artifact {
    /// Parse `file_name` and resolve its generation in `catalog`.
    pub fn resolve(
        catalog: &ArchitectureCatalog,
        dir: &Path,
        file_name: &str,
    ) -> Result<Self, ArtifactError> {
        let name: ArtifactName = file_name.parse()?;
        let architecture = catalog
            .lookup(&name.generation)
            .ok_or_else(|| ArtifactError::UnknownGeneration(name.generation.clone()))?
            .clone();
        let required = CapabilitySet::cpu_only(architecture.features).with_gpu(name.gpu);

        Ok(Self {
            file_name: file_name.to_string(),
            path: dir.join(file_name),
            architecture,
            required,
        })
    }

    pub const fn required_cpu(&self) -> CpuFeatures {
        self.required.cpu
    }

    /// Supported GPU generations; empty means GPU-agnostic.
    pub fn supported_gpus(&self) -> &[ComputeCapability] {
        &self.required.gpu
    }
}
