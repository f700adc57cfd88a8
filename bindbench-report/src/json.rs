//! JSON Output
//!
//! Pretty-printed JSON for both per-variant results and comparison reports,
//! plus loaders so a comparison can be rebuilt from files saved by earlier runs.

use crate::report::{ComparisonReport, VariantResults};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read or write a report file
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading or writing the file failed
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid report
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Serialization failed
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Generate a prettified JSON document for any report value
pub fn generate_json_report<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Serialize `report` to `path`, creating parent directories as needed
pub fn write_json_report<T: Serialize>(report: &T, path: &Path) -> Result<(), ReportError> {
    let json = generate_json_report(report)?;
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)
}

/// Load results previously written for one variant
pub fn load_variant_results(path: &Path) -> Result<VariantResults, ReportError> {
    load_json(path)
}

/// Load a previously written comparison report
pub fn load_comparison_report(path: &Path) -> Result<ComparisonReport, ReportError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
