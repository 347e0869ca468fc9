//! In-memory origin implementation for testing.

use std::collections::HashMap;

use crate::origin::{Origin, OriginError};

/// In-memory origin for testing.
///
/// Stores file contents in a map. Use the builder methods to configure the
/// origin with test data; it is immutable once built.
///
/// # Example
///
/// ```ignore
/// use guides_storage::{MemoryOrigin, Origin};
///
/// let origin = MemoryOrigin::new()
///     .with_file("guide/intro.rst", "Intro\n=====\n");
///
/// assert!(origin.exists("guide/intro.rst"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryOrigin {
    files: HashMap<String, String>,
}

impl MemoryOrigin {
    /// Create a new empty in-memory origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given logical path and content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Origin for MemoryOrigin {
    fn read(&self, path: &str) -> Result<String, OriginError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| OriginError::NotFound {
                path: path.to_owned(),
            })
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
