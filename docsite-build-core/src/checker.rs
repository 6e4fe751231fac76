//! Sidebar reference checking
//!
//! The sidebar manifest is treated as opaque text. A documentation file is
//! linked when its expected reference occurs anywhere in that text as a
//! literal substring. This accepts any manifest syntax (arrays, nested
//! categories, generated sidebar objects) but cannot tell a real entry from
//! a comment or an unrelated string that happens to match.

use std::{
    fmt,
    path::{
        Path,
        PathBuf,
    },
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
    scanner::DocumentationFile,
};

/// Text of the sidebar manifest
#[derive(Debug, Clone)]
pub struct SidebarManifest {
    path:    PathBuf,
    content: String,
}

impl SidebarManifest {
    /// Read a manifest from disk.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; only a missing or
    /// unreadable file is an error.
    pub fn load(path: &Path) -> BuildResult<Self> {
        if !path.is_file() {
            return Err(BuildError::ManifestNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| BuildError::ManifestUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(manifest = %path.display(), bytes = bytes.len(), "loaded sidebar manifest");
        Ok(Self::from_text(path, String::from_utf8_lossy(&bytes)))
    }

    /// Build a manifest from text already in memory
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path:    path.into(),
            content: content.into(),
        }
    }

    /// Manifest file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `reference` occurs anywhere in the manifest text
    pub fn references(&self, reference: &ExpectedReference) -> bool {
        self.content.contains(reference.as_str())
    }
}

/// The string a documentation file must appear as inside the manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedReference(String);

impl ExpectedReference {
    /// Derive the reference for a file.
    ///
    /// A file whose containing directory carries the documentation root's
    /// own name is referenced by base name alone; any other file is
    /// referenced as `<dir>/<base>`. The comparison is by name, not by path.
    pub fn for_file(file: &DocumentationFile, root_name: &str) -> Self {
        if file.dir_name == root_name {
            Self(file.base_name.clone())
        } else {
            Self(format!("{}/{}", file.dir_name, file.base_name))
        }
    }

    /// Reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpectedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of checking one documentation file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// File that was checked
    pub file:     DocumentationFile,
    /// Reference looked up in the manifest
    pub expected: ExpectedReference,
    /// Whether the reference was found
    pub passed:   bool,
}

impl CheckOutcome {
    /// Human-readable failure message, `None` when the check passed
    pub fn failure_message(&self, manifest: &Path) -> Option<String> {
        if self.passed {
            return None;
        }
        Some(format!(
            "{} is not linked from the sidebar: expected \"{}\" in {}",
            self.file.relative_path.display(),
            self.expected,
            manifest.display()
        ))
    }
}

/// Checks documentation files against one manifest
#[derive(Debug, Clone, Copy)]
pub struct SidebarChecker<'a> {
    manifest:  &'a SidebarManifest,
    root_name: &'a str,
}

impl<'a> SidebarChecker<'a> {
    /// Create a checker for files scanned under a root named `root_name`
    pub fn new(manifest: &'a SidebarManifest, root_name: &'a str) -> Self {
        Self {
            manifest,
            root_name,
        }
    }

    /// Check a single file
    pub fn check(&self, file: &DocumentationFile) -> CheckOutcome {
        let expected = ExpectedReference::for_file(file, self.root_name);
        let passed = self.manifest.references(&expected);
        CheckOutcome {
            file: file.clone(),
            expected,
            passed,
        }
    }

    /// Check every file; one failure never stops the rest
    pub fn check_all<'f>(
        &self,
        files: impl IntoIterator<Item = &'f DocumentationFile>,
    ) -> Vec<CheckOutcome> {
        files.into_iter().map(|file| self.check(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(dir: &str, base: &str) -> DocumentationFile {
        DocumentationFile {
            path:          PathBuf::from(format!("/site/docs/{dir}/{base}.md")),
            relative_path: PathBuf::from(format!("{dir}/{base}.md")),
            dir_name:      dir.to_string(),
            base_name:     base.to_string(),
        }
    }

    fn root_doc(base: &str) -> DocumentationFile {
        DocumentationFile {
            path:          PathBuf::from(format!("/site/docs/{base}.md")),
            relative_path: PathBuf::from(format!("{base}.md")),
            dir_name:      "docs".to_string(),
            base_name:     base.to_string(),
        }
    }

    #[test]
    fn test_root_file_reference_is_base_name() {
        let reference = ExpectedReference::for_file(&root_doc("intro"), "docs");
        assert_eq!(reference.as_str(), "intro");
    }

    #[test]
    fn test_nested_file_reference_has_dir() {
        let reference = ExpectedReference::for_file(&doc("tutorial-basics", "installing"), "docs");
        assert_eq!(reference.as_str(), "tutorial-basics/installing");
    }

    #[test]
    fn test_subdir_sharing_root_name_uses_base_name() {
        let reference = ExpectedReference::for_file(&doc("docs", "nested"), "docs");
        assert_eq!(reference.as_str(), "nested");
    }

    #[test]
    fn test_substring_match_tolerates_any_syntax() {
        let manifest = SidebarManifest::from_text(
            "sidebars.js",
            r#"module.exports = { tutorialSidebar: ['intro', {type: 'category', items: ['tutorial-basics/installing']}] };"#,
        );
        let checker = SidebarChecker::new(&manifest, "docs");

        assert!(checker.check(&root_doc("intro")).passed);
        assert!(checker.check(&doc("tutorial-basics", "installing")).passed);
        assert!(!checker.check(&doc("tutorial-basics", "congrats")).passed);
    }

    #[test]
    fn test_commented_reference_still_counts() {
        let manifest = SidebarManifest::from_text("sidebars.js", "// 'guides/deploy'\n");
        let checker = SidebarChecker::new(&manifest, "docs");
        assert!(checker.check(&doc("guides", "deploy")).passed);
    }

    #[test]
    fn test_empty_manifest_fails_everything() {
        let manifest = SidebarManifest::from_text("sidebars.js", "");
        let checker = SidebarChecker::new(&manifest, "docs");
        let files = vec![root_doc("intro"), doc("guides", "deploy"), doc("blog", "post")];

        let outcomes = checker.check_all(&files);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| !o.passed));
    }

    #[test]
    fn test_failure_message_names_file_and_reference() {
        let manifest = SidebarManifest::from_text("sidebars.js", "");
        let outcome = SidebarChecker::new(&manifest, "docs").check(&doc("guides", "deploy"));

        let message = outcome.failure_message(Path::new("sidebars.js")).unwrap();
        assert!(message.contains("guides/deploy.md"));
        assert!(message.contains("\"guides/deploy\""));
        assert!(message.contains("sidebars.js"));
    }

    #[test]
    fn test_passing_outcome_has_no_message() {
        let manifest = SidebarManifest::from_text("sidebars.js", "intro");
        let outcome = SidebarChecker::new(&manifest, "docs").check(&root_doc("intro"));
        assert!(outcome.failure_message(manifest.path()).is_none());
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = SidebarManifest::load(&dir.path().join("sidebars.js")).unwrap_err();
        assert!(matches!(err, BuildError::ManifestNotFound(_)));
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebars.js");
        let mut bytes = b"// \xff\xfe legacy header\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, 0x80]);
        bytes.extend_from_slice(b"\nmodule.exports = ['intro', 'guides/deploy'];\n");
        std::fs::write(&path, bytes).unwrap();

        let manifest = SidebarManifest::load(&path).unwrap();
        let checker = SidebarChecker::new(&manifest, "docs");
        assert!(checker.check(&root_doc("intro")).passed);
        assert!(checker.check(&doc("guides", "deploy")).passed);
        assert!(!checker.check(&doc("guides", "rollback")).passed);
    }
}
