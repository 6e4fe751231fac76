//! Docsite Build Core - validation library for the documentation site build
//!
//! The site build itself is delegated to external tools (a task runner and a
//! static-site generator). This crate owns the one check the build runs as a
//! test target: every authored documentation page must be reachable from the
//! sidebar manifest.
//!
//! # Architecture
//!
//! - [`scanner`]: walks the documentation root and yields markdown files,
//!   skipping the generated `commands/` reference
//! - [`checker`]: derives each file's expected sidebar reference and looks it
//!   up in the manifest text
//! - [`validation`]: runs scanner and checker together and collects every
//!   failure
//! - [`diagnostics`] and [`formatters`]: LSP-style report records rendered as
//!   human text, JSON, JSON Lines or Markdown
//! - [`config`]: `docsite.toml` loading
//!
//! # Example
//!
//! ```no_run
//! use docsite_build_core::BuildSystem;
//!
//! let build = BuildSystem::for_current_dir()?;
//! let report = build.check_sidebar()?;
//! for outcome in report.results.failures() {
//!     println!("missing: {}", outcome.expected);
//! }
//! # Ok::<(), docsite_build_core::BuildError>(())
//! ```

#![forbid(unsafe_code)]

pub use std::path::{
    Path,
    PathBuf,
};

pub mod build;
pub mod checker;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formatters;
pub mod scanner;
pub mod validation;

// Public API
pub use build::{
    BuildSystem,
    SidebarReport,
};
pub use checker::{
    ExpectedReference,
    SidebarChecker,
    SidebarManifest,
};
pub use config::DocsiteConfig;
pub use error::{
    BuildError,
    BuildResult,
};
pub use scanner::{
    DocsScanner,
    DocumentationFile,
    ScanOptions,
};
pub use validation::{
    SidebarValidator,
    ValidationResults,
};

/// Build system version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Manifest names that mark a site root when no config file is present
const SITE_MARKERS: [&str; 2] = ["sidebars.js", "sidebars.ts"];

/// Detect the site root from the current directory
pub fn detect_site_root() -> BuildResult<PathBuf> {
    let current = std::env::current_dir()
        .map_err(|e| BuildError::Workspace(format!("failed to get current directory: {}", e)))?;
    detect_site_root_from(&current)
}

/// Walk upward from `start` to the first directory holding a docsite config
/// file or a sidebar manifest
pub fn detect_site_root_from(start: &Path) -> BuildResult<PathBuf> {
    let mut path = start;
    loop {
        let has_config = DocsiteConfig::find_config_file(path).is_some();
        let has_manifest = SITE_MARKERS.iter().any(|name| path.join(name).is_file());
        if has_config || has_manifest {
            return Ok(path.to_path_buf());
        }

        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }

    Err(BuildError::Workspace(format!(
        "could not find site root (docsite.toml or sidebars.js) above {}",
        start.display()
    )))
}
