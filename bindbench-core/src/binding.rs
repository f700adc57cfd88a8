//! Binding Variant Interface
//!
//! The callable under test is injected: each binding variant implements
//! [`BindingVariant`], and the import-latency scenario talks to it through the
//! narrower [`ModuleRegistry`] reset/load interface.

use crate::workload::Workload;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised by a binding variant
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    /// Module could not be loaded
    #[error("import failed: {0}")]
    Import(String),
    /// Workload rejected by the binding
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Remesh call failed inside the native code
    #[error("remesh failed: {0}")]
    Remesh(String),
}

/// Output mesh returned by a remesh call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemeshOutput {
    /// Output point coordinates
    pub points: Vec<[f32; 3]>,
    /// Output index triples
    pub triangles: Vec<[u32; 3]>,
}

/// Built distributable of a variant, used for the binary size metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// File name of the artifact
    pub filename: String,
    /// Size in megabytes (1 MB = 1024 * 1024 bytes)
    pub size_mb: f64,
}

impl ArtifactInfo {
    /// Describe a file on disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        })
    }
}

/// Process-wide module cache of a binding
///
/// `evict` drops any cached module state so the next `import` pays the full
/// initialization cost again.
pub trait ModuleRegistry {
    /// Forget the loaded module
    fn evict(&mut self);

    /// Load (or re-load) the module
    fn import(&mut self) -> Result<(), BindingError>;
}

/// One of the two interchangeable implementations under comparison
pub trait BindingVariant: ModuleRegistry {
    /// Variant name used in reports (e.g. "pybind11")
    fn name(&self) -> &str;

    /// Remesh the workload
    fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError>;

    /// Most recent built artifact, if one is available
    fn artifact(&self) -> Option<ArtifactInfo> {
        None
    }
}

/// Find the most recently modified file with `extension` in `dir`
///
/// Returns `Ok(None)` when the directory does not exist or holds no match.
pub fn find_latest_artifact(dir: &Path, extension: &str) -> std::io::Result<Option<ArtifactInfo>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<(std::time::SystemTime, std::path::PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let modified = std::fs::metadata(&path)?.modified()?;
        if latest.as_ref().is_none_or(|(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }

    latest
        .map(|(_, path)| ArtifactInfo::from_path(&path))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_artifact_size_in_mb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkg-0.1.0.whl");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; 512 * 1024]).unwrap();

        let info = ArtifactInfo::from_path(&path).unwrap();
        assert_eq!(info.filename, "pkg-0.1.0.whl");
        assert!((info.size_mb - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_latest_artifact_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("dist");
        assert_eq!(find_latest_artifact(&missing, "whl").unwrap(), None);
    }

    #[test]
    fn test_find_latest_artifact_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        assert_eq!(find_latest_artifact(dir.path(), "whl").unwrap(), None);

        std::fs::write(dir.path().join("pkg.whl"), b"wheel").unwrap();
        let info = find_latest_artifact(dir.path(), "whl").unwrap().unwrap();
        assert_eq!(info.filename, "pkg.whl");
    }

    #[test]
    fn test_find_latest_artifact_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.whl");
        let new = dir.path().join("new.whl");
        std::fs::write(&old, b"old").unwrap();
        std::fs::write(&new, b"new").unwrap();

        let past = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let info = find_latest_artifact(dir.path(), "whl").unwrap().unwrap();
        assert_eq!(info.filename, "new.whl");
    }
}
