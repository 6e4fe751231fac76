//! Global argument propagation helper
//!
//! Resolves the global CLI flags once (site root, configuration file, output
//! format, colors) so every subcommand sees the same settings.

use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use atty::Stream;
use docsite_build_core::{
    formatters::OutputFormat,
    BuildSystem,
    DocsiteConfig,
};

use super::OutputManager;
use crate::Cli;

/// Per-command overrides of configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Documentation root, relative to the current directory
    pub docs_root:    Option<PathBuf>,
    /// Sidebar manifest, relative to the current directory
    pub manifest:     Option<PathBuf>,
    /// Replacement list of excluded directory names
    pub exclude_dirs: Vec<String>,
    /// Replacement list of extensions
    pub extensions:   Vec<String>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut DocsiteConfig) -> Result<()> {
        if let Some(docs_root) = &self.docs_root {
            config.docs_root = absolute(docs_root)?;
        }
        if let Some(manifest) = &self.manifest {
            config.sidebar_manifest = absolute(manifest)?;
        }
        if !self.exclude_dirs.is_empty() {
            config.exclude_dirs = self.exclude_dirs.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}

/// Global arguments that should be propagated to all commands
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    pub verbose:       bool,
    /// Site root directory
    pub site_root:     PathBuf,
    /// Loaded configuration (before per-command overrides)
    pub config:        DocsiteConfig,
    /// Output format for reports
    pub output_format: OutputFormat,
    /// Output manager configured with format and color settings
    pub output:        OutputManager,
}

impl GlobalArgs {
    /// Create GlobalArgs from CLI struct
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let site_root = resolve_site_root(cli.site_root.as_deref())?;

        let config = match &cli.config {
            Some(path) => DocsiteConfig::load_from(path)?,
            None => DocsiteConfig::load(&site_root)?,
        };

        let output_format = match (cli.output, &config.output) {
            (Some(arg), _) => arg.into(),
            (None, Some(name)) => name
                .parse::<OutputFormat>()
                .map_err(anyhow::Error::msg)
                .context("Invalid `output` in configuration")?,
            (None, None) => OutputFormat::Human,
        };

        let use_colors =
            !cli.no_color && matches!(output_format, OutputFormat::Human) && atty::is(Stream::Stdout);
        let output = OutputManager::new(output_format).with_color(use_colors);

        Ok(Self {
            verbose: cli.verbose,
            site_root,
            config,
            output_format,
            output,
        })
    }

    /// Build system for this invocation with command overrides applied
    pub fn build_system(&self, overrides: &ConfigOverrides) -> Result<BuildSystem> {
        let mut config = self.config.clone();
        overrides.apply(&mut config)?;
        Ok(BuildSystem::with_config(self.site_root.clone(), config))
    }
}

/// Explicit `--site-root`, else upward detection, else the current directory
fn resolve_site_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        anyhow::ensure!(root.is_dir(), "Site root is not a directory: {}", root.display());
        return absolute(root);
    }

    match docsite_build_core::detect_site_root() {
        Ok(root) => Ok(root),
        Err(e) => {
            tracing::debug!(error = %e, "site root detection failed, using current directory");
            std::env::current_dir().context("Failed to get current directory")
        },
    }
}
