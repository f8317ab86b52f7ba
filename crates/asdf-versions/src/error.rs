//! Declaration file error types.

use std::path::PathBuf;

/// Errors from reading or writing declaration files.
///
/// Parsing itself never fails; only I/O does.
#[derive(Debug, thiserror::Error)]
pub enum VersionsError {
    /// The declaration file could not be read.
    #[error("unable to read {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The declaration file could not be written.
    #[error("unable to write {}: {source}", path.display())]
    Write {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl VersionsError {
    /// Whether this error was caused by a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            },
        }
    }
}

/// Result type for declaration file operations.
pub type VersionsResult<T> = Result<T, VersionsError>;
