//! Build configuration for the Guides documentation compiler.
//!
//! Parses `guides.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. All fields have
//! defaults, so an empty file (or no file at all, via
//! [`GuidesConfig::default`]) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "guides.toml";

/// Error loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found during discovery.
    #[error("no guides.toml found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration.
    #[error("invalid configuration in {}", path.display())]
    Parse {
        /// Path of the invalid file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Compiler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GuidesConfig {
    /// Directory the document sources are rooted at.
    pub source_dir: PathBuf,
    /// Heading depth documents are embedded at. 1 renders top-level
    /// headings as `<h1>`; a larger value nests guides under an outer page.
    pub initial_header_level: usize,
    /// Output format name, interpreted by the renderer layer
    /// (e.g. "html", "latex").
    pub output_format: String,
}

impl Default for GuidesConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            initial_header_level: 1,
            output_format: "html".to_owned(),
        }
    }
}

impl GuidesConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML or has unexpected
    /// field types.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find and load a `guides.toml`, searching `start_dir` and its parents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no configuration file exists in
    /// `start_dir` or any ancestor, otherwise the errors of
    /// [`load`](Self::load).
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        Err(ConfigError::NotFound(start_dir.to_path_buf()))
    }
}
