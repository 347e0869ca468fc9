//! Origin trait and error type.
//!
//! All path parameters are logical document paths relative to the origin
//! root, using `/` separators (e.g. `"guide/intro.rst"`). Backends map them
//! to their own storage layout.

use thiserror::Error;

/// Error reading from an [`Origin`].
#[derive(Debug, Error)]
pub enum OriginError {
    /// The file does not exist in the origin.
    #[error("source file not found: {path}")]
    NotFound {
        /// Logical path that was requested.
        path: String,
    },
    /// The path is malformed or escapes the origin root.
    #[error("invalid source path: {path}")]
    InvalidPath {
        /// Logical path that was requested.
        path: String,
    },
    /// The backend failed to read the file.
    #[error("failed to read source file: {path}")]
    Io {
        /// Logical path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl OriginError {
    /// The logical path the failing operation was given.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::InvalidPath { path } | Self::Io { path, .. } => path,
        }
    }
}

/// Read-only access to the source files a document set is compiled from.
///
/// Injected into each document's environment at construction. The compiler
/// only ever reads through this trait; implementations must tolerate
/// concurrent readers if documents are compiled in parallel.
pub trait Origin: Send + Sync {
    /// Read the full contents of a source file.
    ///
    /// # Errors
    ///
    /// Returns [`OriginError::NotFound`] if the file does not exist and
    /// [`OriginError::Io`] for backend read failures.
    fn read(&self, path: &str) -> Result<String, OriginError>;

    /// Check whether a source file exists.
    ///
    /// Returns `false` on errors (treats errors as "does not exist").
    fn exists(&self, path: &str) -> bool;
}
