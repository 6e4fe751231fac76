//! Sidebar completeness validation
//!
//! Drives one run of the check: load the manifest, scan the documentation
//! tree, check every file, and collect the outcomes. Setup problems (missing
//! root, unreadable manifest) abort the run with a [`crate::error::BuildError`]; missing
//! sidebar entries never do, they are all collected so an author can fix
//! every one in a single pass.

use std::{
    path::{
        Path,
        PathBuf,
    },
    time::{
        Duration,
        Instant,
    },
};

use crate::{
    checker::{
        CheckOutcome,
        SidebarChecker,
        SidebarManifest,
    },
    diagnostics::{
        CheckStats,
        Diagnostic,
        DiagnosticCollection,
        Range,
        RelatedInfo,
        Severity,
    },
    error::BuildResult,
    scanner::{
        DocsScanner,
        ScanOptions,
        ScanResult,
    },
};

/// Diagnostic source name for sidebar findings
pub const SIDEBAR_SOURCE: &str = "sidebar";

/// Diagnostic code for a file with no sidebar entry
pub const MISSING_ENTRY_CODE: &str = "sidebar-missing-entry";

/// Validation results
#[derive(Debug, Clone)]
pub struct ValidationResults {
    /// Whether every check passed
    pub success:   bool,
    /// One outcome per checked file, in scan order
    pub outcomes:  Vec<CheckOutcome>,
    /// Markdown files skipped by the exclusion rule
    pub excluded:  Vec<PathBuf>,
    /// Canonical documentation root
    pub docs_root: PathBuf,
    /// Manifest that was searched
    pub manifest:  PathBuf,
    /// Time taken for validation
    pub duration:  Duration,
}

impl ValidationResults {
    /// Outcomes whose reference was not found
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Check counts for this run
    pub fn stats(&self) -> CheckStats {
        let failed = self.failures().count();
        CheckStats {
            checked: self.outcomes.len(),
            passed: self.outcomes.len() - failed,
            failed,
            excluded: self.excluded.len(),
        }
    }

    /// Convert the failures into diagnostics.
    ///
    /// Paths are reported relative to `site_root` where possible.
    pub fn to_diagnostics(&self, site_root: &Path, command: &str) -> DiagnosticCollection {
        let manifest_display = display_relative(&self.manifest, site_root);

        let mut collection = DiagnosticCollection::new(site_root.to_path_buf(), command.to_string());
        for outcome in self.failures() {
            let message = outcome
                .failure_message(Path::new(&manifest_display))
                .unwrap_or_default();
            let diagnostic = Diagnostic::new(
                display_relative(&outcome.file.path, site_root),
                Range::file_start(),
                Severity::Error,
                message,
                SIDEBAR_SOURCE.to_string(),
            )
            .with_code(MISSING_ENTRY_CODE.to_string())
            .with_related_info(RelatedInfo::new(
                manifest_display.clone(),
                Range::file_start(),
                format!("no occurrence of \"{}\"", outcome.expected),
            ));
            collection.add_diagnostic(diagnostic);
        }

        collection
            .with_checks(self.stats())
            .finalize(self.duration.as_millis() as u64)
    }
}

/// Sidebar completeness validator
#[derive(Debug, Clone)]
pub struct SidebarValidator {
    docs_root: PathBuf,
    manifest:  PathBuf,
    options:   ScanOptions,
}

impl SidebarValidator {
    /// Create a validator with default scan options
    pub fn new(docs_root: impl Into<PathBuf>, manifest: impl Into<PathBuf>) -> Self {
        Self {
            docs_root: docs_root.into(),
            manifest:  manifest.into(),
            options:   ScanOptions::default(),
        }
    }

    /// Replace the scan options
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Scan the documentation tree without checking it
    pub fn scan(&self) -> BuildResult<ScanResult> {
        DocsScanner::new(&self.docs_root).with_options(self.options.clone()).scan()
    }

    /// Run the full check
    pub fn run(&self) -> BuildResult<ValidationResults> {
        let start = Instant::now();
        tracing::info!(
            docs_root = %self.docs_root.display(),
            manifest = %self.manifest.display(),
            "checking sidebar completeness"
        );

        let manifest = SidebarManifest::load(&self.manifest)?;
        let scan = self.scan()?;
        let checker = SidebarChecker::new(&manifest, &scan.root_name);

        let outcomes = checker.check_all(&scan.files);
        for outcome in &outcomes {
            let file = outcome.file.relative_path.display();
            if outcome.passed {
                tracing::debug!(%file, reference = %outcome.expected, "linked");
            } else {
                tracing::warn!(%file, reference = %outcome.expected, "missing from sidebar");
            }
        }

        let success = outcomes.iter().all(|o| o.passed);
        let results = ValidationResults {
            success,
            outcomes,
            excluded: scan.excluded,
            docs_root: scan.root,
            manifest: self.manifest.clone(),
            duration: start.elapsed(),
        };

        let stats = results.stats();
        tracing::info!(
            checked = stats.checked,
            failed = stats.failed,
            excluded = stats.excluded,
            "sidebar check finished"
        );

        Ok(results)
    }
}

fn display_relative(path: &Path, base: &Path) -> String {
    let base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    pathdiff::diff_paths(&path, &base)
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::BuildError;

    fn site(files: &[&str], manifest: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        for rel in files {
            let path = dir.path().join("docs").join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "# page\n").unwrap();
        }
        fs::write(dir.path().join("sidebars.js"), manifest).unwrap();
        dir
    }

    fn validator(dir: &TempDir) -> SidebarValidator {
        SidebarValidator::new(dir.path().join("docs"), dir.path().join("sidebars.js"))
    }

    #[test]
    fn test_all_linked() {
        let dir = site(
            &["intro.md", "tutorial-basics/installing.md"],
            "['intro', 'tutorial-basics/installing']",
        );
        let results = validator(&dir).run().unwrap();

        assert!(results.success);
        assert_eq!(results.stats().checked, 2);
        assert_eq!(results.failures().count(), 0);
    }

    #[test]
    fn test_every_failure_is_collected() {
        let dir = site(&["intro.md", "a/one.md", "b/two.mdx"], "['intro']");
        let results = validator(&dir).run().unwrap();

        assert!(!results.success);
        let missing: Vec<_> = results.failures().map(|o| o.expected.to_string()).collect();
        assert_eq!(missing, vec!["a/one", "b/two"]);
    }

    #[test]
    fn test_commands_never_checked() {
        let dir = site(&["intro.md", "commands/build.md", "commands/serve.md"], "intro");
        let results = validator(&dir).run().unwrap();

        assert!(results.success);
        assert_eq!(results.stats().excluded, 2);
        assert_eq!(results.stats().checked, 1);
    }

    #[test]
    fn test_missing_manifest_is_setup_error() {
        let dir = site(&["intro.md"], "");
        fs::remove_file(dir.path().join("sidebars.js")).unwrap();
        let err = validator(&dir).run().unwrap_err();
        assert!(matches!(err, BuildError::ManifestNotFound(_)));
    }

    #[test]
    fn test_missing_root_is_setup_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sidebars.js"), "intro").unwrap();
        let err = validator(&dir).run().unwrap_err();
        assert!(matches!(err, BuildError::DocsRootNotFound(_)));
    }

    #[test]
    fn test_diagnostics_use_site_relative_paths() {
        let dir = site(&["guides/deploy.md"], "");
        let results = validator(&dir).run().unwrap();
        let collection = results.to_diagnostics(dir.path(), "check-sidebar");

        assert_eq!(collection.summary.errors, 1);
        let diagnostic = &collection.diagnostics[0];
        assert_eq!(diagnostic.file, "docs/guides/deploy.md");
        assert_eq!(diagnostic.code.as_deref(), Some(MISSING_ENTRY_CODE));
        assert_eq!(diagnostic.related_info[0].file, "sidebars.js");
        assert!(diagnostic.message.contains("\"guides/deploy\""));
        assert_eq!(collection.checks.as_ref().unwrap().failed, 1);
    }
}
