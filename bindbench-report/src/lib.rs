#![warn(missing_docs)]
//! BindBench Report - Result Files and Rendering
//!
//! Generates the output formats of a comparison:
//! - JSON (machine-readable, also the on-disk format of saved runs)
//! - Markdown (standalone comparison document)
//!
//! Human terminal output lives in the CLI.

mod json;
mod markdown;
mod report;

pub use json::{
    ReportError, generate_json_report, load_comparison_report, load_variant_results,
    write_json_report,
};
pub use markdown::{format_difference, generate_markdown_report};
pub use report::{
    ARTIFACT_SIZE_METRIC, ComparisonReport, ReportMeta, SCHEMA_VERSION, ScenarioResult,
    SystemInfo, VariantResults,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full schema
    Json,
    /// Markdown document
    Markdown,
}

impl OutputFormat {
    /// File extension used when writing this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Human => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
