//! Section representation for tree-sitter parsed documents.
//!
//! A section represents a hierarchical division of a document, corresponding to a heading in
//! markdown. Headings are first collected as a flat, level-tagged sequence in document order and
//! then folded into a forest where every section owns the deeper headings that follow it.

use std::iter::Peekable;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading as it appears in the flat, document-ordered heading sequence.
pub struct Heading {
    /// Heading depth, 1 for a title.
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Line of the heading in the source (1-based).
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Hierarchical document division used to render tables of contents.
pub struct Section {
    /// Nesting depth in the document hierarchy (1 for a title).
    pub level: usize,
    /// Section heading text without markup symbols.
    pub title: String,
    /// In-page link target derived from the title, including the leading `#`.
    pub anchor: String,
    /// Source file containing this section.
    pub filename: PathBuf,
    /// Directly nested subsections, all strictly deeper than this one.
    pub children: Vec<Section>,
}

impl Section {
    /// Depth-first walk over this section and its descendants, skipping any subtree rooted
    /// deeper than `max_level`.
    pub fn visit<'a>(&'a self, max_level: usize, out: &mut Vec<&'a Section>) {
        if self.level > max_level {
            return;
        }
        out.push(self);
        for child in &self.children {
            child.visit(max_level, out);
        }
    }
}

#[must_use]
/// Derive the in-page anchor for a heading title.
///
/// Every maximal run of characters outside `[a-zA-Z0-9]` collapses to a single hyphen, the
/// result is lowercased and stripped of leading and trailing hyphens. Duplicate titles yield
/// duplicate anchors.
pub fn anchor_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    format!("#{}", slug.trim_matches('-'))
}

#[must_use]
/// Fold a document-ordered heading sequence into a section forest.
///
/// Each heading adopts the headings that follow it for as long as they are strictly deeper;
/// the first heading at the same or a shallower level closes it (and possibly several
/// enclosing sections at once).
pub fn build_sections(filename: &Path, headings: Vec<Heading>) -> Vec<Section> {
    let mut headings = headings.into_iter().peekable();
    let mut sections = Vec::new();
    while let Some(heading) = headings.next() {
        sections.push(build_one(filename, heading, &mut headings));
    }
    sections
}

fn build_one<I>(filename: &Path, current: Heading, rest: &mut Peekable<I>) -> Section
where
    I: Iterator<Item = Heading>,
{
    let mut children = Vec::new();
    while let Some(next) = rest.next_if(|h| h.level > current.level) {
        children.push(build_one(filename, next, rest));
    }

    Section {
        level: current.level,
        anchor: anchor_from_title(&current.title),
        title: current.title,
        filename: filename.to_path_buf(),
        children,
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
