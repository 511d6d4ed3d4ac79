//! Filesystem object model: directories of Markdown documents loaded into a tree.
//!
//! A directory is represented by its root document (`README.md`) and its sorted entries.
//! Entries are loaded in parallel; anything that turns out to hold no Markdown is pruned after
//! recursion so that emptiness propagates up through nested directories.

use crate::config::Config;
use crate::document::Document;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A directory or a document, the unit the indexer recurses over.
pub enum FsObject {
    /// A directory with its own entries.
    Directory(Directory),
    /// A single Markdown document.
    Document(Document),
}

/// A directory holding Markdown documents and subdirectories.
pub struct Directory {
    /// Path of the directory.
    pub filename: PathBuf,
    /// Title of the root document, or the directory basename.
    pub title: String,
    /// Non-empty entries sorted by name, root document excluded.
    pub entries: Vec<FsObject>,
    /// The directory's own `README.md`, if present.
    pub root_document: Option<Document>,
}

impl FsObject {
    #[must_use]
    /// Display title used in links to this object.
    pub fn title(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.title,
            Self::Document(doc) => &doc.title,
        }
    }

    #[must_use]
    /// Path of this object on disk.
    pub fn filename(&self) -> &Path {
        match self {
            Self::Directory(dir) => &dir.filename,
            Self::Document(doc) => &doc.filename,
        }
    }

    #[must_use]
    /// Whether this object is worth listing: a Markdown document, or a directory with a root
    /// document or at least one entry.
    pub fn has_content(&self, config: &Config) -> bool {
        match self {
            Self::Directory(dir) => dir.root_document.is_some() || !dir.entries.is_empty(),
            Self::Document(doc) => config.is_markdown(&doc.filename),
        }
    }
}

/// Load a path as a directory tree or as a single document.
///
/// # Errors
///
/// Returns an error if any directory or file cannot be read.
pub fn load(path: &Path, config: &Config) -> io::Result<FsObject> {
    if fs::metadata(path)?.is_dir() {
        load_directory(path, config).map(FsObject::Directory)
    } else {
        Document::load(path).map(FsObject::Document)
    }
}

/// Recursively load a directory, its root document and its Markdown entries.
///
/// # Errors
///
/// Returns an error if any directory or file cannot be read.
pub fn load_directory(dirname: &Path, config: &Config) -> io::Result<Directory> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dirname)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name == config.root_document || name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort_by(|a, b| locale_cmp(a, b));

    let root_path = dirname.join(&config.root_document);
    let root_document = if file_exists(&root_path)? {
        Some(Document::load(&root_path)?)
    } else {
        None
    };

    let loaded = names
        .par_iter()
        .map(|name| load_entry(&dirname.join(name), config))
        .collect::<io::Result<Vec<_>>>()?;
    let entries: Vec<FsObject> = loaded
        .into_iter()
        .flatten()
        .filter(|entry| entry.has_content(config))
        .collect();

    let title = root_document.as_ref().map_or_else(
        || {
            dirname.file_name().map_or_else(
                || dirname.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
        },
        |doc| doc.title.clone(),
    );

    tracing::debug!(
        "Loaded directory {} ({} entries)",
        dirname.display(),
        entries.len()
    );

    Ok(Directory {
        filename: dirname.to_path_buf(),
        title,
        entries,
        root_document,
    })
}

/// Load one directory entry; files without the Markdown extension are skipped unread.
fn load_entry(path: &Path, config: &Config) -> io::Result<Option<FsObject>> {
    if fs::metadata(path)?.is_dir() {
        load_directory(path, config).map(|dir| Some(FsObject::Directory(dir)))
    } else if config.is_markdown(path) {
        Document::load(path).map(|doc| Some(FsObject::Document(doc)))
    } else {
        Ok(None)
    }
}

/// Probe for an optional file; only "not found" counts as absent.
fn file_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Approximate locale-aware ordering.
///
/// Characters compare by class first (whitespace, punctuation and symbols, digits, letters),
/// then case-insensitively. Names equal under that ordering put lowercase before uppercase.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(collation_key)
        .cmp(b.chars().map(collation_key))
        .then_with(|| b.cmp(a))
}

fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
