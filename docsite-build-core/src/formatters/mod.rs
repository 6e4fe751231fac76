//! Output formatters for diagnostic collections
//!
//! Each formatter renders a [`DiagnosticCollection`] to a string; callers
//! decide where it is written.

use std::{
    fmt,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    diagnostics::DiagnosticCollection,
    error::BuildResult,
};

pub mod human;
pub mod json;
pub mod markdown;

pub use human::HumanFormatter;
pub use json::{
    JsonFormatter,
    JsonLinesFormatter,
};
pub use markdown::MarkdownFormatter;

/// Output formats for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable format with optional colors
    #[default]
    Human,
    /// Pretty JSON of the whole collection
    Json,
    /// One JSON object per diagnostic, then the summary
    JsonLines,
    /// GitHub-flavored Markdown, e.g. for a PR comment
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "json-lines"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "json-lines" | "jsonl" => Ok(OutputFormat::JsonLines),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "Invalid output format: {}. Valid values: human, json, json-lines, markdown",
                other
            )),
        }
    }
}

/// Renders a diagnostic collection
pub trait OutputFormatter {
    /// Render the whole collection
    fn format_collection(&self, collection: &DiagnosticCollection) -> BuildResult<String>;
}

/// Creates formatters for an [`OutputFormat`]
pub struct FormatterFactory;

impl FormatterFactory {
    /// Create the formatter for `format`; `use_colors` only affects human output
    pub fn create(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Human => Box::new(HumanFormatter::new(use_colors)),
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::JsonLines => Box::new(JsonLinesFormatter),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::for_environment()),
        }
    }
}
