//! Output rendering for docsite commands
//!
//! Keeps report rendering in one place so every command honors `--output`
//! and color settings the same way. Reports go to stdout; logging and errors
//! go to stderr.

use std::{
    fmt::Write as _,
    io::Write as _,
    path::PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use colored::Colorize;
use docsite_build_core::{
    diagnostics::DiagnosticCollection,
    formatters::{
        FormatterFactory,
        OutputFormat,
    },
    scanner::ScanResult,
    ExpectedReference,
};
use serde::Serialize;

/// One scanned file in `list-docs` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedDoc {
    /// Path relative to the documentation root
    pub path:      PathBuf,
    /// Reference the sidebar must contain
    pub reference: ExpectedReference,
}

/// Full `list-docs` listing
#[derive(Debug, Clone, Serialize)]
pub struct DocListing {
    /// Canonical documentation root
    pub docs_root: PathBuf,
    /// Files subject to the sidebar check
    pub files:     Vec<ListedDoc>,
    /// Files skipped by the exclusion rule
    pub excluded:  Vec<PathBuf>,
}

impl DocListing {
    /// Build a listing from a scan
    pub fn from_scan(scan: &ScanResult) -> Self {
        let files = scan
            .files
            .iter()
            .map(|file| ListedDoc {
                path:      file.relative_path.clone(),
                reference: ExpectedReference::for_file(file, &scan.root_name),
            })
            .collect();
        Self {
            docs_root: scan.root.clone(),
            files,
            excluded: scan.excluded.clone(),
        }
    }
}

/// Output manager configured with format and color settings
#[derive(Debug, Clone)]
pub struct OutputManager {
    format:     OutputFormat,
    use_colors: bool,
}

impl OutputManager {
    /// Create an output manager; colors are off until enabled
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            use_colors: false,
        }
    }

    /// Enable or disable ANSI colors (human output only)
    pub fn with_color(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && matches!(self.format, OutputFormat::Human);
        self
    }

    /// Render a diagnostic collection in the selected format
    pub fn render_report(&self, collection: &DiagnosticCollection) -> Result<String> {
        FormatterFactory::create(self.format, self.use_colors)
            .format_collection(collection)
            .context("Failed to render report")
    }

    /// Render a `list-docs` listing in the selected format
    pub fn render_listing(&self, listing: &DocListing) -> Result<String> {
        let mut out = String::new();
        match self.format {
            OutputFormat::Human => {
                for doc in &listing.files {
                    let reference = if self.use_colors {
                        doc.reference.as_str().bright_cyan().to_string()
                    } else {
                        doc.reference.to_string()
                    };
                    writeln!(out, "{}  {}", reference, doc.path.display())?;
                }
                writeln!(
                    out,
                    "{} file(s) checked, {} excluded under {}",
                    listing.files.len(),
                    listing.excluded.len(),
                    listing.docs_root.display()
                )?;
            },
            OutputFormat::Json => {
                out = serde_json::to_string_pretty(listing)?;
                out.push('\n');
            },
            OutputFormat::JsonLines => {
                for doc in &listing.files {
                    writeln!(out, "{}", serde_json::to_string(doc)?)?;
                }
            },
            OutputFormat::Markdown => {
                writeln!(out, "| Reference | File |")?;
                writeln!(out, "|---|---|")?;
                for doc in &listing.files {
                    writeln!(out, "| `{}` | `{}` |", doc.reference, doc.path.display())?;
                }
            },
        }
        Ok(out)
    }

    /// Write rendered output to stdout
    pub fn emit(&self, rendered: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes()).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")
    }
}
