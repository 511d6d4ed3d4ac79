//! The edit plan manages document modifications as line-range splices.
//!
//! This module defines the transformation that an indexing pass manifests as actual edits on
//! disk. Mutations within a file are applied bottom-up so that every span still refers to the
//! line numbers of the original text, and files are written in parallel since no two
//! mutations ever target different files' contents.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Half-open range of lines targeted by a mutation.
pub struct Span {
    /// First line to replace, or the line to insert before (1-based).
    pub start_line: usize,
    /// Line after the last replaced line (exclusive, 1-based); absent for a pure insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

impl Span {
    #[must_use]
    /// Zero-width span inserting before `line`.
    pub fn insert(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: None,
        }
    }

    #[must_use]
    /// Span replacing lines `start..end`.
    pub fn replace(start: usize, end: usize) -> Self {
        Self {
            start_line: start,
            end_line: Some(end),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Replacement of a line span with a block of text.
pub struct Mutation {
    /// Lines being replaced.
    #[serde(flatten)]
    pub span: Span,
    /// Full replacement block, delimiter lines included.
    pub new_content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// All mutations targeting one file.
pub struct FileMutation {
    /// Target file path for these modifications.
    pub filename: PathBuf,
    /// Non-overlapping mutations, in any order.
    pub mutations: Vec<Mutation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable collection of file modifications produced by one indexing pass.
pub struct EditPlan {
    /// Per-file mutation groups; each file appears at most once.
    pub files: Vec<FileMutation>,
}

impl EditPlan {
    /// Apply every file's mutations, writing the files in parallel.
    ///
    /// The first failure aborts the run; files already written are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or written.
    pub fn apply(&self) -> io::Result<()> {
        self.files
            .par_iter()
            .try_for_each(|file| mutate_file(&file.filename, &file.mutations))?;
        tracing::info!("Updated {} files", self.files.len());
        Ok(())
    }
}

/// Rewrite a single file with its mutations applied.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn mutate_file(filename: &Path, mutations: &[Mutation]) -> io::Result<()> {
    let content = fs::read_to_string(filename)?;
    let updated = apply_mutations(&content, mutations);
    if updated == content {
        tracing::debug!("{} is up to date", filename.display());
    } else {
        tracing::info!("Writing {}", filename.display());
    }
    fs::write(filename, updated)
}

#[must_use]
/// Splice mutations into `content`, assuming their spans do not overlap.
///
/// Spans are applied in descending start order so that earlier spans keep referring to the
/// original line numbers. Spans reaching past the end of the text are clamped to it.
pub fn apply_mutations(content: &str, mutations: &[Mutation]) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();

    let mut ordered: Vec<&Mutation> = mutations.iter().collect();
    ordered.sort_by(|a, b| b.span.start_line.cmp(&a.span.start_line));

    for mutation in ordered {
        let start_line = mutation.span.start_line.max(1);
        let end_line = mutation.span.end_line.unwrap_or(start_line).max(start_line);
        let start = (start_line - 1).min(lines.len());
        let end = (end_line - 1).min(lines.len());
        lines.splice(start..end, [mutation.new_content.as_str()]);
    }

    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
