//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents and extracting
//! heading structure from both ATX-style (# syntax) and setext-style (underlined) headings.
//! Heading labels are run through the inline grammar so that emphasis, code spans and link
//! syntax are dropped while their text survives.

use crate::formats::Format;
use std::io;
use std::ops::Range;
use tree_sitter::{Node, Parser};

/// Inline nodes that are pure syntax and never contribute text.
const MARKUP_NODES: &[&str] = &[
    "emphasis_delimiter",
    "code_span_delimiter",
    "link_destination",
    "link_title",
    "link_label",
    "html_tag",
    "hard_line_break",
];

/// Inline nodes whose anonymous children (brackets, parentheses, `!`) are link syntax.
const LINK_NODES: &[&str] = &[
    "inline_link",
    "image",
    "full_reference_link",
    "collapsed_reference_link",
    "shortcut_link",
];

/// Tree-sitter queries for ATX and setext markdown headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn code_query(&self) -> &'static str {
        "[(fenced_code_block) (indented_code_block)] @code"
    }

    fn heading_level(&self, node: Node<'_>) -> Option<usize> {
        node.children(&mut node.walk())
            .find_map(|child| match child.kind() {
                "atx_h1_marker" | "setext_h1_underline" => Some(1),
                "atx_h2_marker" | "setext_h2_underline" => Some(2),
                "atx_h3_marker" => Some(3),
                "atx_h4_marker" => Some(4),
                "atx_h5_marker" => Some(5),
                "atx_h6_marker" => Some(6),
                _ => None,
            })
    }

    fn heading_text(&self, node: Node<'_>, source: &str) -> io::Result<String> {
        let mut cursor = node.walk();
        let content = node
            .children(&mut cursor)
            .find(|child| matches!(child.kind(), "inline" | "paragraph"));
        let Some(content) = content else {
            return Ok(String::new());
        };

        let raw = content
            .utf8_text(source.as_bytes())
            .map_err(io::Error::other)?
            .trim();
        let raw = if node.kind() == "atx_heading" {
            strip_closing_sequence(raw)
        } else {
            raw
        };
        plain_text(raw)
    }
}

/// Drop an optional ATX closing sequence (`## Title ##`).
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        text
    } else if without.is_empty() || without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

/// Reduce inline markdown to its literal text pieces joined by single spaces.
///
/// Markup separates pieces. Escapes, character references and autolinks are replaced in place
/// by the text they stand for.
///
/// # Errors
///
/// Returns an error if the inline grammar cannot be loaded or the parse is aborted.
pub fn plain_text(raw: &str) -> io::Result<String> {
    let language: tree_sitter::Language = tree_sitter_md::INLINE_LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language).map_err(io::Error::other)?;
    let tree = parser
        .parse(raw, None)
        .ok_or_else(|| io::Error::other("inline markdown parse was aborted"))?;

    let mut edits = Vec::new();
    collect_edits(tree.root_node(), raw, &mut edits)?;

    let mut text = String::with_capacity(raw.len());
    let mut pos = 0;
    for (range, replacement) in edits {
        if let Some(piece) = raw.get(pos..range.start) {
            text.push_str(piece);
        }
        match replacement {
            Some(replacement) => text.push_str(&replacement),
            None => text.push('\n'),
        }
        pos = pos.max(range.end);
    }
    if let Some(rest) = raw.get(pos..) {
        text.push_str(rest);
    }

    Ok(text
        .split('\n')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Source range of an inline node and its replacement; `None` marks syntax that breaks pieces.
type Edit = (Range<usize>, Option<String>);

/// Collect edits depth-first in source order.
fn collect_edits(node: Node<'_>, raw: &str, out: &mut Vec<Edit>) -> io::Result<()> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let is_markup = if child.is_named() {
            MARKUP_NODES.contains(&child.kind())
        } else {
            LINK_NODES.contains(&node.kind())
        };
        if is_markup {
            out.push((child.byte_range(), None));
            continue;
        }

        let source = child.utf8_text(raw.as_bytes()).map_err(io::Error::other)?;
        let replacement = match child.kind() {
            "backslash_escape" => source.strip_prefix('\\').unwrap_or(source).to_string(),
            "entity_reference" | "numeric_character_reference" => {
                html_escape::decode_html_entities(source).into_owned()
            }
            "uri_autolink" | "email_autolink" => source
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string(),
            _ => {
                collect_edits(child, raw, out)?;
                continue;
            }
        };
        out.push((child.byte_range(), Some(replacement)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
