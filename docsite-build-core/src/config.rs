//! Configuration management for the docsite build system

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    error::{
        BuildError,
        BuildResult,
    },
    scanner::ScanOptions,
};

/// Config file names searched under the site root, in order
pub const CONFIG_FILE_NAMES: [&str; 3] =
    ["docsite.toml", ".docsite.toml", ".config/docsite.toml"];

/// Default documentation root, relative to the site root
pub const DEFAULT_DOCS_ROOT: &str = "docs";

/// Default sidebar manifest, relative to the site root
pub const DEFAULT_SIDEBAR_MANIFEST: &str = "sidebars.js";

/// Site configuration, as read from `docsite.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsiteConfig {
    /// Documentation root directory
    pub docs_root:        PathBuf,
    /// Sidebar manifest file
    pub sidebar_manifest: PathBuf,
    /// Directory names whose direct children are never checked
    pub exclude_dirs:     Vec<String>,
    /// Markdown-family extensions to scan, without the leading dot
    pub extensions:       Vec<String>,
    /// Default output format name (human, json, json-lines, markdown)
    pub output:           Option<String>,
}

impl Default for DocsiteConfig {
    fn default() -> Self {
        let scan = ScanOptions::default();
        Self {
            docs_root:        PathBuf::from(DEFAULT_DOCS_ROOT),
            sidebar_manifest: PathBuf::from(DEFAULT_SIDEBAR_MANIFEST),
            exclude_dirs:     scan.exclude_dirs,
            extensions:       scan.extensions,
            output:           None,
        }
    }
}

impl DocsiteConfig {
    /// Load configuration from the first config file found under `site_root`.
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load(site_root: &Path) -> BuildResult<Self> {
        match Self::find_config_file(site_root) {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!(site_root = %site_root.display(), "no config file, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> BuildResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BuildError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| BuildError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Locate the config file under a site root, if any
    pub fn find_config_file(site_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| site_root.join(name))
            .find(|path| path.is_file())
    }

    /// Documentation root resolved against the site root
    pub fn docs_root_in(&self, site_root: &Path) -> PathBuf {
        resolve(site_root, &self.docs_root)
    }

    /// Sidebar manifest resolved against the site root
    pub fn manifest_in(&self, site_root: &Path) -> PathBuf {
        resolve(site_root, &self.sidebar_manifest)
    }

    /// Scanner options derived from this configuration.
    ///
    /// Extensions may be written with or without a leading dot.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions:   self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            exclude_dirs: self.exclude_dirs.clone(),
        }
    }
}

fn resolve(site_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { site_root.join(path) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocsiteConfig::default();
        assert_eq!(config.docs_root, PathBuf::from("docs"));
        assert_eq!(config.sidebar_manifest, PathBuf::from("sidebars.js"));
        assert_eq!(config.exclude_dirs, vec!["commands"]);
        assert_eq!(config.extensions, vec!["md", "mdx"]);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = DocsiteConfig::parse(
            r#"
docs_root = "website/docs"
exclude_dirs = ["commands", "generated"]
"#,
        )
        .unwrap();

        assert_eq!(config.docs_root, PathBuf::from("website/docs"));
        assert_eq!(config.sidebar_manifest, PathBuf::from("sidebars.js"));
        assert_eq!(config.exclude_dirs, vec!["commands", "generated"]);
        assert_eq!(config.extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_dotted_extensions_are_normalized() {
        let config = DocsiteConfig::parse("extensions = [\".md\", \"mdx\"]\n").unwrap();
        assert_eq!(config.scan_options().extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(DocsiteConfig::parse("docs_rot = \"docs\"").is_err());
    }

    #[test]
    fn test_paths_resolve_against_site_root() {
        let config = DocsiteConfig::default();
        let root = Path::new("/site");
        assert_eq!(config.docs_root_in(root), PathBuf::from("/site/docs"));
        assert_eq!(config.manifest_in(root), PathBuf::from("/site/sidebars.js"));

        let config = DocsiteConfig {
            sidebar_manifest: PathBuf::from("/elsewhere/sidebars.ts"),
            ..DocsiteConfig::default()
        };
        assert_eq!(config.manifest_in(root), PathBuf::from("/elsewhere/sidebars.ts"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocsiteConfig::load(dir.path()).unwrap();
        assert_eq!(config, DocsiteConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("docsite.toml"), "docs_root = [").unwrap();
        let err = DocsiteConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }
}
