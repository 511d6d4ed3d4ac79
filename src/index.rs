//! The indexer walks the filesystem object model and computes per-file mutations.
//!
//! Every document receives a table of contents and a navigation row. Each is placed either over
//! the region it occupied on a previous run or, on the first run, at a fallback location. A
//! directory's root document lists the directory's entries instead of its own sections, and its
//! navigation reflects the directory's position among its siblings.

use crate::config::Config;
use crate::document::{begin_marker, end_marker, Document};
use crate::edit_plan::{FileMutation, Mutation, Span};
use crate::input::{Directory, FsObject};
use crate::section::Section;
use std::path::{Component, Path};

/// Marker name of the table of contents region.
pub const TOC_MARKER: &str = "TOC";
/// Marker name of the navigation region.
pub const NAV_MARKER: &str = "NAV";

const TOC_FALLBACKS: &[InsertLocation] = &[InsertLocation::H2, InsertLocation::Bottom];
const NAV_FALLBACKS: &[InsertLocation] = &[InsertLocation::Top];

#[derive(Clone, Copy, Default)]
/// Neighbourhood of the object being indexed, passed down during the walk.
pub struct IndexOptions<'a> {
    /// Previous sibling in the parent's entry order.
    pub prev: Option<&'a FsObject>,
    /// Next sibling in the parent's entry order.
    pub next: Option<&'a FsObject>,
    /// Root document of the nearest enclosing directory.
    pub up: Option<&'a Document>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where a region goes when the document does not contain it yet.
pub enum InsertLocation {
    /// Before the first line.
    Top,
    /// Before the first level-2 heading.
    H2,
    /// After the last line.
    Bottom,
}

/// Computes table of contents and navigation mutations for a loaded tree.
pub struct Indexer<'c> {
    config: &'c Config,
}

impl<'c> Indexer<'c> {
    #[must_use]
    /// Create an indexer rendering with the given preferences.
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Index a directory tree or a single document.
    #[must_use]
    pub fn index_object(&self, object: &FsObject, options: IndexOptions<'_>) -> Vec<FileMutation> {
        match object {
            FsObject::Directory(dir) => self.index_directory(dir, options),
            FsObject::Document(doc) => vec![self.index_document(doc, options)],
        }
    }

    /// Index every entry of a directory, then its root document.
    ///
    /// Entries see this directory's root document as `up` and their neighbours as `prev` and
    /// `next`; the root document itself is indexed with the options given for the directory.
    #[must_use]
    pub fn index_directory(&self, dir: &Directory, options: IndexOptions<'_>) -> Vec<FileMutation> {
        let mut ret = Vec::new();

        for (i, entry) in dir.entries.iter().enumerate() {
            let entry_options = IndexOptions {
                prev: i.checked_sub(1).and_then(|p| dir.entries.get(p)),
                next: dir.entries.get(i + 1),
                up: dir.root_document.as_ref(),
            };
            ret.extend(self.index_object(entry, entry_options));
        }

        if let Some(root) = &dir.root_document {
            let toc = self.render_file_toc(&root.filename, &dir.entries);
            let nav = self.render_nav(&root.filename, options);
            let mutations = vec![
                make_mutation(root, TOC_MARKER, &toc, TOC_FALLBACKS),
                make_mutation(root, NAV_MARKER, &nav, NAV_FALLBACKS),
            ];
            ret.push(FileMutation {
                filename: root.filename.clone(),
                mutations,
            });
        }

        ret
    }

    /// Compute the table of contents and navigation mutations of one document.
    #[must_use]
    pub fn index_document(&self, doc: &Document, options: IndexOptions<'_>) -> FileMutation {
        let toc = render_section_toc(&doc.sections, self.config.toc_max_level);
        let nav = self.render_nav(&doc.filename, options);
        let mutations = vec![
            make_mutation(doc, TOC_MARKER, &toc, TOC_FALLBACKS),
            make_mutation(doc, NAV_MARKER, &nav, NAV_FALLBACKS),
        ];
        tracing::debug!("Indexed {}", doc.filename.display());
        FileMutation {
            filename: doc.filename.clone(),
            mutations,
        }
    }

    /// List a directory's entries as links relative to its root document.
    fn render_file_toc(&self, filename: &Path, entries: &[FsObject]) -> String {
        if entries.is_empty() {
            return String::new();
        }

        let mut ret = vec![
            "---".to_string(),
            "In this directory".to_string(),
            String::new(),
        ];
        for entry in entries {
            ret.push(format!(
                "- {}",
                self.fs_link(filename, entry.title(), entry.filename())
            ));
        }
        ret.push("---".to_string());
        ret.join("\n")
    }

    /// Render the previous / up / next table, or nothing when there are no neighbours.
    fn render_nav(&self, filename: &Path, options: IndexOptions<'_>) -> String {
        if options.prev.is_none() && options.next.is_none() && options.up.is_none() {
            return String::new();
        }

        let prev_link = options
            .prev
            .map(|obj| self.fs_link(filename, obj.title(), obj.filename()))
            .unwrap_or_default();
        let up_link = options
            .up
            .map(|doc| self.fs_link(filename, &doc.title, &doc.filename))
            .unwrap_or_default();
        let next_link = options
            .next
            .map(|obj| self.fs_link(filename, obj.title(), obj.filename()))
            .unwrap_or_default();

        let prev_title = if prev_link.is_empty() { "" } else { "← Previous" };
        let up_title = if up_link.is_empty() { "" } else { "↑ Up" };
        let next_title = if next_link.is_empty() { "" } else { "Next →" };

        [
            format!("| {prev_title} | {up_title} | {next_title} |"),
            "|:--|:-:|--:|".to_string(),
            format!("| {prev_link} | {up_link} | {next_link} |"),
        ]
        .join("\n")
    }

    /// Markdown link from the document at `filename` to `target`.
    fn fs_link(&self, filename: &Path, title: &str, target: &Path) -> String {
        let base = filename.parent().unwrap_or_else(|| Path::new(""));
        let mut link = relative_path(base, target);
        if link.is_empty() {
            link.clone_from(&self.config.root_document);
        }
        format!("[{title}]({link})")
    }
}

#[must_use]
/// Render a document's sections as a nested link list, down to `max_level`.
pub fn render_section_toc(sections: &[Section], max_level: usize) -> String {
    if sections.is_empty() {
        return String::new();
    }

    let mut visited = Vec::new();
    for section in sections {
        section.visit(max_level, &mut visited);
    }

    let mut ret = vec![
        "---".to_string(),
        "Table of Contents".to_string(),
        String::new(),
    ];
    for section in visited {
        ret.push(format!(
            "{}- [{}]({})",
            "  ".repeat(section.level.saturating_sub(2)),
            section.title,
            section.anchor
        ));
    }
    ret.push("---".to_string());
    ret.join("\n")
}

/// Build the mutation writing `content` into the `marker` region of `doc`.
///
/// An existing region is replaced in place. Otherwise the fallback locations are tried in
/// order, and the end of the document is used if none of them applies.
#[must_use]
pub fn make_mutation(
    doc: &Document,
    marker: &str,
    content: &str,
    fallbacks: &[InsertLocation],
) -> Mutation {
    let mut span = doc.find_marker(marker);
    for location in fallbacks {
        if span.is_some() {
            break;
        }
        span = find_insert_location(doc, *location);
    }
    let span = span.unwrap_or_else(|| doc.end_span());

    let mut lines = vec![begin_marker(marker)];
    if !content.is_empty() {
        lines.push(content.to_string());
    }
    lines.push(end_marker(marker));

    Mutation {
        span,
        new_content: lines.join("\n"),
    }
}

fn find_insert_location(doc: &Document, location: InsertLocation) -> Option<Span> {
    match location {
        InsertLocation::Top => Some(doc.start_span()),
        InsertLocation::H2 => doc.first_heading_line(2).map(Span::insert),
        InsertLocation::Bottom => Some(doc.end_span()),
    }
}

#[must_use]
/// `/`-separated path leading from directory `base` to `target`; empty when they coincide.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base: Vec<Component<'_>> = base
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target: Vec<Component<'_>> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); base.len() - common];
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

#[cfg(test)]
#[path = "tests/index.rs"]
mod tests;
