//! Document loading: parse a Markdown file once and keep what the indexer needs.
//!
//! Loading discovers the regions this tool manages (`<!-- BEGIN X -->` ... `<!-- END X -->`),
//! blanks them out so they never contribute headings, collects the heading sequence, peels off
//! the title and folds the rest into sections. The heading sequence is kept for placement
//! lookups; the tree-sitter tree is not.

use crate::edit_plan::Span;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::section::{build_sections, Heading, Section};
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A marker-delimited block previously written into the document.
pub struct ManagedRegion {
    /// Marker name, such as `TOC` or `NAV`.
    pub marker: String,
    /// Line holding the begin marker (1-based).
    pub begin_line: usize,
    /// Line holding the end marker (1-based).
    pub end_line: usize,
}

/// A parsed Markdown file with its heading structure.
pub struct Document {
    /// Path of the source file.
    pub filename: PathBuf,
    /// First level-1 heading, or the file stem when the document has none.
    pub title: String,
    /// Top-level sections, excluding the title heading.
    pub sections: Vec<Section>,
    headings: Vec<Heading>,
    regions: Vec<ManagedRegion>,
    line_count: usize,
}

#[must_use]
/// Render the line opening a managed region.
pub fn begin_marker(marker: &str) -> String {
    format!("<!-- BEGIN {marker} -->")
}

#[must_use]
/// Render the line closing a managed region.
pub fn end_marker(marker: &str) -> String {
    format!("<!-- END {marker} -->")
}

impl Document {
    /// Read and parse a Markdown file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(filename: &Path) -> io::Result<Self> {
        let source = fs::read_to_string(filename)?;
        let document = Self::parse(filename, &source)?;
        tracing::debug!(
            "Loaded {} ({} sections)",
            filename.display(),
            document.sections.len()
        );
        Ok(document)
    }

    /// Parse Markdown source belonging to `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or a query fails to compile.
    pub fn parse(filename: &Path, source: &str) -> io::Result<Self> {
        let format = MarkdownFormat;

        let tree = parse_tree(&format, source)?;
        let code = code_lines(&format, &tree, source)?;
        let regions = managed_regions(source, &code);

        let headings = if regions.is_empty() {
            collect_headings(&format, &tree, source)?
        } else {
            let masked = mask_regions(source, &regions);
            let tree = parse_tree(&format, &masked)?;
            collect_headings(&format, &tree, &masked)?
        };

        let (title, body) = match headings.split_first() {
            Some((first, rest)) if first.level == 1 => (first.title.clone(), rest),
            _ => (
                filename
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                headings.as_slice(),
            ),
        };

        Ok(Self {
            filename: filename.to_path_buf(),
            title,
            sections: build_sections(filename, body.to_vec()),
            line_count: source.lines().count(),
            headings,
            regions,
        })
    }

    #[must_use]
    /// Span covering an existing managed region, from its begin line through its end line.
    pub fn find_marker(&self, marker: &str) -> Option<Span> {
        self.regions
            .iter()
            .find(|region| region.marker == marker)
            .map(|region| Span::replace(region.begin_line, region.end_line + 1))
    }

    #[must_use]
    /// Line of the first heading at `level`, if the document has one.
    pub fn first_heading_line(&self, level: usize) -> Option<usize> {
        self.headings
            .iter()
            .find(|heading| heading.level == level)
            .map(|heading| heading.line)
    }

    #[must_use]
    /// Zero-width span at the very start of the document.
    pub fn start_span(&self) -> Span {
        Span::insert(1)
    }

    #[must_use]
    /// Zero-width span one line past the last line of the document.
    pub fn end_span(&self) -> Span {
        Span::insert(self.line_count + 1)
    }
}

fn parse_tree(format: &impl Format, text: &str) -> io::Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(io::Error::other)?;
    parser
        .parse(text, None)
        .ok_or_else(|| io::Error::other("markdown parse was aborted"))
}

/// Run `query` over `tree` and hand every captured node to `f`, in document order.
fn for_each_capture<F>(
    format: &impl Format,
    query: &str,
    tree: &Tree,
    text: &str,
    mut f: F,
) -> io::Result<()>
where
    F: FnMut(Node<'_>) -> io::Result<()>,
{
    let query = Query::new(&format.language(), query).map_err(io::Error::other)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            f(capture.node)?;
        }
    }
    Ok(())
}

fn collect_headings(format: &impl Format, tree: &Tree, text: &str) -> io::Result<Vec<Heading>> {
    let mut headings = Vec::new();
    for_each_capture(format, format.heading_query(), tree, text, |node| {
        if let Some(level) = format.heading_level(node) {
            headings.push(Heading {
                level,
                title: format.heading_text(node, text)?,
                line: node.start_position().row + 1,
            });
        }
        Ok(())
    })?;
    Ok(headings)
}

/// 1-based line ranges covered by code blocks.
fn code_lines(
    format: &impl Format,
    tree: &Tree,
    text: &str,
) -> io::Result<Vec<RangeInclusive<usize>>> {
    let mut lines = Vec::new();
    for_each_capture(format, format.code_query(), tree, text, |node| {
        let start = node.start_position().row + 1;
        let end = node.end_position();
        // A node ending at column 0 stops at the newline of the previous line.
        let last = if end.column == 0 { end.row } else { end.row + 1 };
        lines.push(start..=last.max(start));
        Ok(())
    })?;
    Ok(lines)
}

/// Pair up `BEGIN`/`END` marker lines that sit outside code blocks.
fn managed_regions(source: &str, code: &[RangeInclusive<usize>]) -> Vec<ManagedRegion> {
    let mut open: Vec<(String, usize)> = Vec::new();
    let mut regions = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        if code.iter().any(|range| range.contains(&line_no)) {
            continue;
        }
        let line = line.trim();
        if let Some(marker) = parse_marker(line, "BEGIN") {
            if !open.iter().any(|(name, _)| name == marker) {
                open.push((marker.to_string(), line_no));
            }
        } else if let Some(marker) = parse_marker(line, "END") {
            if let Some(pos) = open.iter().position(|(name, _)| name == marker) {
                let (marker, begin_line) = open.remove(pos);
                regions.push(ManagedRegion {
                    marker,
                    begin_line,
                    end_line: line_no,
                });
            }
        }
    }

    regions.sort_by_key(|region| region.begin_line);
    regions
}

fn parse_marker<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let marker = line
        .strip_prefix("<!-- ")?
        .strip_prefix(keyword)?
        .strip_prefix(' ')?
        .strip_suffix(" -->")?;
    (!marker.is_empty() && !marker.contains(char::is_whitespace)).then_some(marker)
}

/// Blank every line inside a managed region, keeping the line count intact.
fn mask_regions(source: &str, regions: &[ManagedRegion]) -> String {
    source
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let line_no = index + 1;
            if regions
                .iter()
                .any(|r| (r.begin_line..=r.end_line).contains(&line_no))
            {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
