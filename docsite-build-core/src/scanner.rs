//! Documentation tree scanning
//!
//! Walks a documentation root and collects every markdown-family file that is
//! subject to the sidebar check. Files whose immediate parent directory is an
//! excluded name (by default `commands`, the generated command reference) are
//! counted but not returned for checking.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use walkdir::WalkDir;

use crate::error::{
    BuildError,
    BuildResult,
};

/// Options controlling which files the scanner yields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// File extensions to include, without the leading dot
    pub extensions:   Vec<String>,
    /// Parent directory names whose files are skipped
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions:   vec!["md".to_string(), "mdx".to_string()],
            exclude_dirs: vec!["commands".to_string()],
        }
    }
}

impl ScanOptions {
    fn has_doc_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == dir_name)
    }
}

/// A documentation source file discovered under the documentation root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationFile {
    /// Full path to the file
    pub path:          PathBuf,
    /// Path relative to the documentation root
    pub relative_path: PathBuf,
    /// Name of the immediate containing directory
    pub dir_name:      String,
    /// File name without its extension
    pub base_name:     String,
}

impl DocumentationFile {
    fn from_path(root: &Path, path: &Path) -> Self {
        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        Self {
            path: path.to_path_buf(),
            relative_path,
            dir_name,
            base_name,
        }
    }
}

/// Outcome of a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Canonical documentation root that was walked
    pub root:      PathBuf,
    /// Directory name of the documentation root
    pub root_name: String,
    /// Files subject to the sidebar check, in traversal order
    pub files:     Vec<DocumentationFile>,
    /// Markdown files skipped by the exclusion rule
    pub excluded:  Vec<PathBuf>,
}

/// Recursive, read-only scanner over a documentation root
#[derive(Debug, Clone)]
pub struct DocsScanner {
    root:    PathBuf,
    options: ScanOptions,
}

impl DocsScanner {
    /// Create a scanner with default options
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:    root.into(),
            options: ScanOptions::default(),
        }
    }

    /// Replace the scan options
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Walk the documentation root.
    ///
    /// Fails if the root is missing or any entry cannot be read. Traversal is
    /// sorted by file name so repeated scans of an unchanged tree return the
    /// same order. Symbolic links are followed and reported under the link's
    /// own path; a link cycle is a walk error.
    pub fn scan(&self) -> BuildResult<ScanResult> {
        if !self.root.is_dir() {
            return Err(BuildError::DocsRootNotFound(self.root.clone()));
        }
        let root = self.root.canonicalize()?;
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut files = Vec::new();
        let mut excluded = Vec::new();

        for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| BuildError::Walk {
                root: root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() || !self.options.has_doc_extension(entry.path()) {
                continue;
            }

            let file = DocumentationFile::from_path(&root, entry.path());
            if self.options.is_excluded_dir(&file.dir_name) {
                tracing::trace!(file = %file.relative_path.display(), "excluded");
                excluded.push(file.relative_path);
                continue;
            }
            files.push(file);
        }

        tracing::debug!(
            root = %root.display(),
            files = files.len(),
            excluded = excluded.len(),
            "scanned documentation tree"
        );

        Ok(ScanResult {
            root,
            root_name,
            files,
            excluded,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn scan_docs(root: &Path) -> BuildResult<ScanResult> {
        DocsScanner::new(root).scan()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# page\n").unwrap();
    }

    fn docs_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        touch(&docs, "intro.md");
        touch(&docs, "tutorial-basics/installing.md");
        touch(&docs, "tutorial-basics/congrats.mdx");
        touch(&docs, "commands/build.md");
        touch(&docs, "img/logo.png");
        touch(&docs, "guides/README.MD");
        dir
    }

    #[test]
    fn test_scan_collects_markdown_family() {
        let dir = docs_tree();
        let result = scan_docs(&dir.path().join("docs")).unwrap();

        let rel: Vec<_> = result.files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("guides/README.MD"),
                PathBuf::from("intro.md"),
                PathBuf::from("tutorial-basics/congrats.mdx"),
                PathBuf::from("tutorial-basics/installing.md"),
            ]
        );
        assert_eq!(result.root_name, "docs");
    }

    #[test]
    fn test_commands_dir_excluded() {
        let dir = docs_tree();
        let result = scan_docs(&dir.path().join("docs")).unwrap();

        assert!(result.files.iter().all(|f| f.dir_name != "commands"));
        assert_eq!(result.excluded, vec![PathBuf::from("commands/build.md")]);
    }

    #[test]
    fn test_exclusion_only_applies_to_immediate_parent() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        touch(&docs, "commands/nested/deep.md");

        let result = scan_docs(&docs).unwrap();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].dir_name, "nested");
        assert!(result.excluded.is_empty());
    }

    #[test]
    fn test_file_attributes() {
        let dir = docs_tree();
        let result = scan_docs(&dir.path().join("docs")).unwrap();
        let installing = result
            .files
            .iter()
            .find(|f| f.base_name == "installing")
            .unwrap();

        assert_eq!(installing.dir_name, "tutorial-basics");
        assert!(installing.path.is_absolute());
        assert!(installing.path.ends_with("tutorial-basics/installing.md"));
    }

    #[test]
    fn test_empty_root_yields_no_files() {
        let dir = TempDir::new().unwrap();
        let result = scan_docs(dir.path()).unwrap();
        assert!(result.files.is_empty());
        assert!(result.excluded.is_empty());
    }

    #[test]
    fn test_missing_root_is_setup_error() {
        let dir = TempDir::new().unwrap();
        let err = scan_docs(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BuildError::DocsRootNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_pages_and_sections_are_scanned() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared");
        touch(&shared, "faq.md");
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("guides")).unwrap();
        symlink(shared.join("faq.md"), docs.join("guides/faq.md")).unwrap();
        symlink(&shared, docs.join("shared")).unwrap();

        let result = scan_docs(&docs).unwrap();
        let rel: Vec<_> = result.files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("guides/faq.md"), PathBuf::from("shared/faq.md")]
        );
        assert_eq!(result.files[0].dir_name, "guides");
        assert_eq!(result.files[1].dir_name, "shared");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_walk_error() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        touch(&docs, "guides/intro.md");
        symlink(&docs, docs.join("guides/loop")).unwrap();

        let err = scan_docs(&docs).unwrap_err();
        assert!(matches!(err, BuildError::Walk { .. }));
    }

    #[test]
    fn test_custom_options() {
        let dir = docs_tree();
        let options = ScanOptions {
            extensions:   vec!["mdx".to_string()],
            exclude_dirs: vec!["tutorial-basics".to_string()],
        };
        let result = DocsScanner::new(dir.path().join("docs")).with_options(options).scan().unwrap();

        assert!(result.files.is_empty());
        assert_eq!(
            result.excluded,
            vec![PathBuf::from("tutorial-basics/congrats.mdx")]
        );
    }
}
