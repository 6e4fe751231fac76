//! Human-readable report output

use std::fmt::Write;

use colored::{
    ColoredString,
    Colorize,
};

use super::OutputFormatter;
use crate::{
    diagnostics::{
        DiagnosticCollection,
        Severity,
    },
    error::BuildResult,
};

/// Terminal formatter with optional ANSI colors
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    use_colors: bool,
}

impl HumanFormatter {
    /// Create a formatter
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors { style(text).to_string() } else { text.to_string() }
    }

    fn severity_marker(&self, severity: Severity) -> String {
        match severity {
            Severity::Error => self.paint("❌", |s| s.bright_red()),
            Severity::Warning => self.paint("⚠️", |s| s.bright_yellow()),
            Severity::Info => self.paint("ℹ️", |s| s.bright_blue()),
            Severity::Hint => self.paint("💡", |s| s.bright_cyan()),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_collection(&self, collection: &DiagnosticCollection) -> BuildResult<String> {
        let mut out = String::new();

        if let Some(checks) = &collection.checks {
            writeln!(
                out,
                "{} {}: {} checked, {} missing, {} excluded ({} ms)",
                self.paint("🔍", |s| s.bright_blue()),
                collection.command,
                checks.checked,
                checks.failed,
                checks.excluded,
                collection.summary.duration_ms
            )?;
        }

        for (file, diagnostics) in collection.group_by_file() {
            writeln!(out, "{} {}", self.severity_marker(diagnostics[0].severity), self.paint(&file, |s| s.bold()))?;
            for diagnostic in diagnostics {
                let code = diagnostic.code.as_deref().map(|c| format!("[{}] ", c)).unwrap_or_default();
                writeln!(out, "   {}{}", self.paint(&code, |s| s.dimmed()), diagnostic.message)?;
            }
        }

        if collection.is_success() {
            writeln!(
                out,
                "{} All documentation files are linked from the sidebar",
                self.paint("✅", |s| s.bright_green())
            )?;
        } else {
            writeln!(
                out,
                "{} {} file(s) missing from the sidebar",
                self.paint("❌", |s| s.bright_red()),
                collection.summary.files_with_diagnostics
            )?;
        }

        Ok(out)
    }
}
