//! Artifact discovery: one directory scan per invocation.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::Artifact;
use crate::catalog::ArchitectureCatalog;
use crate::error::SelectionError;

/// List every usable artifact in `dir`, ordered by file name.
///
/// Only regular files are considered. Directories, symlinks, names that are
/// not UTF-8, names outside the grammar and unknown generations are logged
/// and skipped. Failing to list the directory itself is fatal.
pub fn discover(
    catalog: &ArchitectureCatalog,
    dir: &Path,
) -> Result<Vec<Artifact>, SelectionError> {
    let read_dir = fs::read_dir(dir).map_err(|source| SelectionError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut artifacts = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        // file_type() does not follow symlinks
        match entry.file_type() {
            Ok(kind) if kind.is_symlink() => {
                warn!("Skipping symbolic link {}", path.display());
                continue;
            }
            Ok(kind) if kind.is_dir() => {
                warn!("Skipping directory {}", path.display());
                continue;
            }
            Ok(kind) if kind.is_file() => {}
            Ok(_) => {
                warn!("Skipping special file {}", path.display());
                continue;
            }
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                continue;
            }
        }

        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };

        match Artifact::resolve(catalog, dir, &file_name) {
            Ok(artifact) => {
                debug!(
                    file = %artifact.file_name,
                    cpu = artifact.architecture.name,
                    gpus = artifact.supported_gpus().len(),
                    "Discovered artifact"
                );
                artifacts.push(artifact);
            }
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }

    artifacts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"\x7fELF").unwrap();
    }

    #[test]
    fn finds_artifacts_in_name_order() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "libtf_cpu_skylake.so");
        touch(temp.path(), "libtf_cpu_haswell.so");
        touch(temp.path(), "libtf_gpu_8.0_cpu_broadwell.so");

        let found = discover(ArchitectureCatalog::builtin(), temp.path()).unwrap();
        let names: Vec<&str> = found.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "libtf_cpu_haswell.so",
                "libtf_cpu_skylake.so",
                "libtf_gpu_8.0_cpu_broadwell.so"
            ]
        );
        assert_eq!(found[0].path, temp.path().join("libtf_cpu_haswell.so"));
    }

    #[test]
    fn skips_bad_names_and_unknown_generations() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "README.txt");
        touch(temp.path(), "libtf_cpu_zen4.so");
        touch(temp.path(), "libtf_gpu_x_cpu_haswell.so");
        touch(temp.path(), "libtf_cpu_nehalem.so");

        let found = discover(ArchitectureCatalog::builtin(), temp.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].architecture.name, "nehalem");
    }

    #[test]
    fn skips_directories() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("libtf_cpu_haswell.so")).unwrap();
        let found = discover(ArchitectureCatalog::builtin(), temp.path()).unwrap();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn skips_symlinks() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "real.so");
        std::os::unix::fs::symlink(
            temp.path().join("real.so"),
            temp.path().join("libtf_cpu_haswell.so"),
        )
        .unwrap();
        let found = discover(ArchitectureCatalog::builtin(), temp.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        let err = discover(ArchitectureCatalog::builtin(), &missing).unwrap_err();
        match err {
            SelectionError::DirectoryUnreadable { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_directory_yields_no_candidates() {
        let temp = tempdir().unwrap();
        assert!(discover(ArchitectureCatalog::builtin(), temp.path()).unwrap().is_empty());
    }
}
