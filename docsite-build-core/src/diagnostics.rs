//! Unified diagnostic system for LSP-compatible error reporting
//!
//! Check results are reported as diagnostics so that CI annotations, editors
//! and the human formatter all consume the same records. The format follows
//! the Language Server Protocol diagnostic shape.

use std::{
    collections::{
        BTreeMap,
        HashSet,
    },
    fmt,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

/// LSP-compatible diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error that prevents successful completion
    Error,
    /// Warning that should be addressed but doesn't prevent completion
    Warning,
    /// Informational message
    Info,
    /// Hint or suggestion for improvement
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Position within a file (0-indexed, LSP format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line:      u32,
    /// Character offset (0-indexed, UTF-16 code units)
    pub character: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range within a file (LSP format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end:   Position,
}

impl Range {
    /// Create a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at the top of a file, used for whole-file findings
    pub fn file_start() -> Self {
        Self::new(Position::new(0, 0), Position::new(0, 0))
    }
}

/// Related diagnostic information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInfo {
    /// File path relative to the site root
    pub file:    String,
    /// Range within the file
    pub range:   Range,
    /// Related message
    pub message: String,
}

impl RelatedInfo {
    /// Create new related information
    pub fn new(file: String, range: Range, message: String) -> Self {
        Self {
            file,
            range,
            message,
        }
    }
}

/// Individual diagnostic item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File path relative to the site root
    pub file:         String,
    /// Range within the file
    pub range:        Range,
    /// Severity level
    pub severity:     Severity,
    /// Optional diagnostic code
    pub code:         Option<String>,
    /// Human-readable message
    pub message:      String,
    /// Check that produced this diagnostic
    pub source:       String,
    /// Related information, e.g. the manifest that was searched
    pub related_info: Vec<RelatedInfo>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        file: String,
        range: Range,
        severity: Severity,
        message: String,
        source: String,
    ) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message,
            source,
            related_info: Vec::new(),
        }
    }

    /// Set diagnostic code
    pub fn with_code(mut self, code: String) -> Self {
        self.code = Some(code);
        self
    }

    /// Add related information
    pub fn with_related_info(mut self, related: RelatedInfo) -> Self {
        self.related_info.push(related);
        self
    }
}

/// Per-run check counts carried alongside the diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    /// Files checked against the manifest
    pub checked:  usize,
    /// Checks that found their reference
    pub passed:   usize,
    /// Checks that did not
    pub failed:   usize,
    /// Markdown files skipped by the exclusion rule
    pub excluded: usize,
}

/// Summary statistics for a diagnostic collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    /// Total number of diagnostics
    pub total:                  usize,
    /// Number of errors
    pub errors:                 usize,
    /// Number of warnings
    pub warnings:               usize,
    /// Number of info messages
    pub infos:                  usize,
    /// Number of hints
    pub hints:                  usize,
    /// Number of files with diagnostics
    pub files_with_diagnostics: usize,
    /// Duration of operation in milliseconds
    pub duration_ms:            u64,
}

impl DiagnosticSummary {
    /// Create summary from diagnostic collection
    pub fn from_diagnostics(diagnostics: &[Diagnostic], duration_ms: u64) -> Self {
        let mut errors = 0;
        let mut warnings = 0;
        let mut infos = 0;
        let mut hints = 0;
        let mut files = HashSet::new();

        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => infos += 1,
                Severity::Hint => hints += 1,
            }
            files.insert(&diagnostic.file);
        }

        Self {
            total: diagnostics.len(),
            errors,
            warnings,
            infos,
            hints,
            files_with_diagnostics: files.len(),
            duration_ms,
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if operation was successful (no errors)
    pub fn is_success(&self) -> bool {
        !self.has_errors()
    }
}

/// Collection of diagnostics with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticCollection {
    /// Version of diagnostic format
    pub version:     String,
    /// Timestamp when diagnostics were generated
    pub timestamp:   String,
    /// Site root path
    pub site_root:   String,
    /// Command that generated these diagnostics
    pub command:     String,
    /// Individual diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Summary statistics
    pub summary:     DiagnosticSummary,
    /// Check counts, when the collection came from a validation run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks:      Option<CheckStats>,
}

impl DiagnosticCollection {
    /// Create a new diagnostic collection
    pub fn new(site_root: PathBuf, command: String) -> Self {
        Self {
            version: "1.0".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            site_root: site_root.to_string_lossy().to_string(),
            command,
            diagnostics: Vec::new(),
            summary: DiagnosticSummary::default(),
            checks: None,
        }
    }

    /// Add a diagnostic to the collection
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Attach check counts
    pub fn with_checks(mut self, checks: CheckStats) -> Self {
        self.checks = Some(checks);
        self
    }

    /// Finalize the collection with timing information
    pub fn finalize(mut self, duration_ms: u64) -> Self {
        self.summary = DiagnosticSummary::from_diagnostics(&self.diagnostics, duration_ms);
        self
    }

    /// Group diagnostics by file, ordered by path
    pub fn group_by_file(&self) -> BTreeMap<String, Vec<&Diagnostic>> {
        let mut groups = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            groups.entry(diagnostic.file.clone()).or_insert_with(Vec::new).push(diagnostic);
        }
        groups
    }

    /// Check if collection has any errors
    pub fn has_errors(&self) -> bool {
        self.summary.has_errors()
    }

    /// Check if operation was successful
    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }
}
