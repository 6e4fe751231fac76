//! JSON and JSON Lines output for tooling and CI

use std::fmt::Write;

use super::OutputFormatter;
use crate::{
    diagnostics::DiagnosticCollection,
    error::BuildResult,
};

/// Pretty-printed JSON of the whole collection
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_collection(&self, collection: &DiagnosticCollection) -> BuildResult<String> {
        let mut out = serde_json::to_string_pretty(collection)?;
        out.push('\n');
        Ok(out)
    }
}

/// One JSON object per diagnostic, followed by a summary record
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesFormatter;

impl OutputFormatter for JsonLinesFormatter {
    fn format_collection(&self, collection: &DiagnosticCollection) -> BuildResult<String> {
        let mut out = String::new();
        for diagnostic in &collection.diagnostics {
            writeln!(out, "{}", serde_json::to_string(diagnostic)?)?;
        }
        let summary = serde_json::json!({
            "type": "summary",
            "command": collection.command,
            "summary": collection.summary,
            "checks": collection.checks,
        });
        writeln!(out, "{}", summary)?;
        Ok(out)
    }
}
