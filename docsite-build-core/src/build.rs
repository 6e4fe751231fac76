//! Core build system implementation

use std::path::PathBuf;

use crate::{
    config::DocsiteConfig,
    diagnostics::DiagnosticCollection,
    error::{
        BuildError,
        BuildResult,
    },
    scanner::ScanResult,
    validation::{
        SidebarValidator,
        ValidationResults,
    },
};

/// Command name recorded in sidebar diagnostic collections
pub const CHECK_SIDEBAR_COMMAND: &str = "check-sidebar";

/// Central build system coordinator
#[derive(Debug, Clone)]
pub struct BuildSystem {
    /// Site root directory
    pub site_root: PathBuf,
    /// Site configuration
    pub config:    DocsiteConfig,
}

/// Outcome of a sidebar check: raw results and their diagnostics
#[derive(Debug, Clone)]
pub struct SidebarReport {
    /// Per-file check outcomes
    pub results:     ValidationResults,
    /// Diagnostics built from the failures
    pub diagnostics: DiagnosticCollection,
}

impl SidebarReport {
    /// Whether every documentation file is linked
    pub fn is_success(&self) -> bool {
        self.results.success
    }
}

impl BuildSystem {
    /// Create a build system for a site root, loading its config file
    pub fn new(site_root: PathBuf) -> BuildResult<Self> {
        if !site_root.is_dir() {
            return Err(BuildError::Workspace(format!(
                "site root is not a directory: {}",
                site_root.display()
            )));
        }
        let config = DocsiteConfig::load(&site_root)?;
        Ok(Self { site_root, config })
    }

    /// Create build system instance for current working directory
    pub fn for_current_dir() -> BuildResult<Self> {
        let site_root = crate::detect_site_root()?;
        Self::new(site_root)
    }

    /// Create build system with custom configuration
    pub fn with_config(site_root: PathBuf, config: DocsiteConfig) -> Self {
        Self { site_root, config }
    }

    /// Resolved documentation root
    pub fn docs_root(&self) -> PathBuf {
        self.config.docs_root_in(&self.site_root)
    }

    /// Resolved sidebar manifest path
    pub fn manifest(&self) -> PathBuf {
        self.config.manifest_in(&self.site_root)
    }

    /// Validator for the configured docs root and manifest
    pub fn sidebar_validator(&self) -> SidebarValidator {
        SidebarValidator::new(self.docs_root(), self.manifest())
            .with_options(self.config.scan_options())
    }

    /// Run the sidebar completeness check
    pub fn check_sidebar(&self) -> BuildResult<SidebarReport> {
        let results = self.sidebar_validator().run()?;
        let diagnostics = results.to_diagnostics(&self.site_root, CHECK_SIDEBAR_COMMAND);
        Ok(SidebarReport {
            results,
            diagnostics,
        })
    }

    /// Scan the documentation tree without checking it
    pub fn list_docs(&self) -> BuildResult<ScanResult> {
        self.sidebar_validator().scan()
    }
}
