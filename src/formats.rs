//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the parser behind a document:
//! the tree-sitter grammar, the queries locating headings and code blocks, and how a heading
//! node is read back into a level and a plain-text label.

use std::io;
use tree_sitter::Node;

pub mod markdown;

/// Parser-specific knowledge needed to load a document.
pub trait Format {
    /// Block-level grammar the document is parsed with.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node.
    fn heading_query(&self) -> &str;
    /// Query capturing every code block node, whose lines never hold markers.
    fn code_query(&self) -> &str;
    /// Heading depth of a captured heading node.
    fn heading_level(&self, node: Node<'_>) -> Option<usize>;
    /// Plain-text label of a captured heading node, with inline markup discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading content cannot be parsed.
    fn heading_text(&self, node: Node<'_>, source: &str) -> io::Result<String>;
}
