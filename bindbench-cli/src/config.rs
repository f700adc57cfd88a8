//! Configuration loading from bindbench.toml
//!
//! BindBench configuration can be specified in a `bindbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`BenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "bindbench.toml";

/// BindBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Variant naming
    #[serde(default)]
    pub variants: VariantsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Trial counts and workload sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed imports (module evicted before each)
    #[serde(default = "default_import_iterations")]
    pub import_iterations: usize,
    /// Calls on the minimal tetrahedron
    #[serde(default = "default_call_iterations")]
    pub call_iterations: usize,
    /// Calls on the subdivided cube
    #[serde(default = "default_end_to_end_iterations")]
    pub end_to_end_iterations: usize,
    /// Cells per axis of the end-to-end cube
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
    /// Target vertex count of the call-overhead workload
    #[serde(default = "default_call_target")]
    pub call_target: usize,
    /// Target vertex count of the end-to-end workload
    #[serde(default = "default_end_to_end_target")]
    pub end_to_end_target: usize,
    /// Pin the measuring thread to this core
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            import_iterations: default_import_iterations(),
            call_iterations: default_call_iterations(),
            end_to_end_iterations: default_end_to_end_iterations(),
            subdivisions: default_subdivisions(),
            call_target: default_call_target(),
            end_to_end_target: default_end_to_end_target(),
            pin_cpu: None,
        }
    }
}

fn default_import_iterations() -> usize {
    50
}
fn default_call_iterations() -> usize {
    1000
}
fn default_end_to_end_iterations() -> usize {
    10
}
fn default_subdivisions() -> usize {
    3
}
fn default_call_target() -> usize {
    bindbench_core::MINIMAL_TARGET_VERTICES
}
fn default_end_to_end_target() -> usize {
    bindbench_core::STRUCTURED_TARGET_VERTICES
}

/// Display names overriding what the variants report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantsConfig {
    /// Name shown for the baseline
    #[serde(default)]
    pub baseline: Option<String>,
    /// Name shown for the candidate
    #[serde(default)]
    pub candidate: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "markdown"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory receiving per-variant results and the comparison
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/bindbench".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for a configuration file
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring invalid config"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
