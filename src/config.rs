//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find an mdindex.toml, and if present we load settings from there.
//! This provides the table of contents depth and the Markdown naming conventions.

use facet::Facet;
use std::fs;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "mdindex.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from mdindex.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 3)]
    /// Deepest heading level listed in a document's table of contents.
    pub toc_max_level: usize,
    #[facet(default = "md".to_string())]
    /// File suffix identifying Markdown documents.
    pub extension: String,
    #[facet(default = "README.md".to_string())]
    /// File name of the document representing its directory.
    pub root_document: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toc_max_level: 3,
            extension: "md".to_string(),
            root_document: "README.md".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mdindex.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from the given file, using defaults if it is absent or invalid.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
            tracing::warn!("Ignoring unreadable config {}", path.display());
        }
        Self::default()
    }

    #[must_use]
    /// Whether a file name carries the Markdown extension.
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
