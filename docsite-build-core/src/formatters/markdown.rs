//! Markdown output for sidebar reports
//!
//! Produces GitHub-flavored Markdown suitable for posting as a PR comment or
//! a workflow step summary.

use std::fmt::Write;

use super::OutputFormatter;
use crate::{
    diagnostics::DiagnosticCollection,
    error::BuildResult,
};

/// Markdown formatter for sidebar reports
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    github_flavor:        bool,
    collapsible_sections: bool,
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self {
            github_flavor:        true,
            collapsible_sections: true,
        }
    }
}

impl MarkdownFormatter {
    /// GitHub-flavored output with collapsible failure details
    pub fn github() -> Self {
        Self::default()
    }

    /// Plain Markdown with `###` headings instead of `<details>` blocks
    pub fn standard() -> Self {
        Self {
            github_flavor:        false,
            collapsible_sections: false,
        }
    }

    /// GitHub flavor inside GitHub Actions, plain Markdown elsewhere
    pub fn for_environment() -> Self {
        Self::for_github_actions(std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"))
    }

    fn for_github_actions(github_actions: bool) -> Self {
        if github_actions { Self::github() } else { Self::standard() }
    }

    /// Format content with optional collapsible section
    fn format_section(&self, title: &str, content: &str) -> String {
        if self.collapsible_sections && self.github_flavor {
            format!("<details>\n<summary><b>{}</b></summary>\n\n{}\n</details>\n", title, content)
        } else {
            format!("### {}\n\n{}\n", title, content)
        }
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl OutputFormatter for MarkdownFormatter {
    fn format_collection(&self, collection: &DiagnosticCollection) -> BuildResult<String> {
        let mut out = String::new();
        let status = if collection.is_success() { "✅ passed" } else { "❌ failed" };
        writeln!(out, "## Sidebar check {}\n", status)?;

        if let Some(checks) = &collection.checks {
            writeln!(out, "| Checked | Passed | Missing | Excluded |")?;
            writeln!(out, "|---:|---:|---:|---:|")?;
            writeln!(
                out,
                "| {} | {} | {} | {} |\n",
                checks.checked, checks.passed, checks.failed, checks.excluded
            )?;
        }

        if !collection.diagnostics.is_empty() {
            let mut table = String::new();
            writeln!(table, "| File | Problem |")?;
            writeln!(table, "|---|---|")?;
            for diagnostic in &collection.diagnostics {
                writeln!(
                    table,
                    "| `{}` | {} |",
                    diagnostic.file,
                    escape_cell(&diagnostic.message)
                )?;
            }
            let title = format!("{} file(s) missing from the sidebar", collection.summary.files_with_diagnostics);
            out.push_str(&self.format_section(&title, &table));
        }

        Ok(out)
    }
}
