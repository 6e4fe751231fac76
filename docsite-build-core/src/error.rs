//! Error types for the docsite build system
//!
//! Every variant here is a setup or infrastructure failure: the run cannot
//! proceed. A documentation file that is missing from the sidebar is not an
//! error at this level, it is a failed check reported through
//! [`crate::validation::ValidationResults`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by build system operations
#[derive(Debug, Error)]
pub enum BuildError {
    /// The documentation root does not exist or is not a directory
    #[error("documentation root not found: {}", .0.display())]
    DocsRootNotFound(PathBuf),

    /// The sidebar manifest does not exist
    #[error("sidebar manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// The sidebar manifest exists but could not be read
    #[error("failed to read sidebar manifest {}: {source}", path.display())]
    ManifestUnreadable {
        /// Manifest path
        path:   PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Traversal of the documentation tree failed part way
    #[error("failed to walk documentation tree under {}: {source}", root.display())]
    Walk {
        /// Documentation root being walked
        root:   PathBuf,
        /// Underlying walkdir failure
        #[source]
        source: walkdir::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Site root detection or layout problem
    #[error("workspace error: {0}")]
    Workspace(String),

    /// Report serialization failed
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report text could not be written
    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),

    /// Any other I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the build core
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = BuildError::DocsRootNotFound(PathBuf::from("site/docs"));
        assert!(err.to_string().contains("site/docs"));

        let err = BuildError::ManifestNotFound(PathBuf::from("sidebars.js"));
        assert_eq!(err.to_string(), "sidebar manifest not found: sidebars.js");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BuildError = io.into();
        assert!(matches!(err, BuildError::Io(_)));
    }

    #[test]
    fn test_fmt_conversion() {
        let err: BuildError = std::fmt::Error.into();
        assert!(matches!(err, BuildError::Format(_)));
        assert!(err.to_string().starts_with("failed to format report"));
    }
}
