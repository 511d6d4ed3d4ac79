//! mdindex: tables of contents and navigation links for trees of Markdown files.
//!
//! Documents are parsed with tree-sitter, their heading structure is folded into a
//! section tree, and the indexer computes line-range mutations that the edit plan
//! writes back to disk. Only marker-delimited regions are ever rewritten.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod document;
pub mod edit_plan;
pub mod formats;
pub mod index;
pub mod input;
pub mod section;
