//! Filesystem origin implementation.
//!
//! Provides [`FsOrigin`] for reading source files from a directory tree.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::origin::{Origin, OriginError};

/// Filesystem origin rooted at a source directory.
///
/// Logical paths are resolved against the root. Paths containing parent
/// directory components are rejected so a document cannot read outside the
/// source tree (e.g. `../../etc/passwd`).
///
/// # Example
///
/// ```ignore
/// use guides_storage::{FsOrigin, Origin};
///
/// let origin = FsOrigin::new("docs");
/// let text = origin.read("guide/intro.rst")?;
/// ```
#[derive(Debug)]
pub struct FsOrigin {
    /// Root directory containing the source files.
    root: PathBuf,
}

impl FsOrigin {
    /// Create a new filesystem origin rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory this origin reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a logical path does not escape the root.
    fn validate(path: &str) -> Result<(), OriginError> {
        let has_parent_dir = Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(OriginError::InvalidPath {
                path: path.to_owned(),
            });
        }
        Ok(())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Origin for FsOrigin {
    fn read(&self, path: &str) -> Result<String, OriginError> {
        Self::validate(path)?;

        fs::read_to_string(self.resolve(path)).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                OriginError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                OriginError::Io {
                    path: path.to_owned(),
                    source,
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate(path).is_ok() && self.resolve(path).is_file()
    }
}
