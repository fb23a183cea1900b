//! Errors of workspace and file loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a document or directory from being loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error while reading `path`.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace root is missing or not a directory.
    #[error("Directory not found: {0}")]
    NotADirectory(PathBuf),

    /// The file is not a robot document.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(PathBuf),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for LoadError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        Self::io(path, err.into())
    }
}
