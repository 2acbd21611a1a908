//! Markdown rendering for project documents.
//!
//! This module provides a small line-oriented Markdown renderer covering
//! the subset used in READMEs and contributing guides: fenced code blocks,
//! pipe tables, headings, flat lists, inline emphasis, code and links, and
//! paragraphs. Rendering is a fixed sequence of string passes, with code
//! blocks held out of every pass behind placeholder tokens.

mod blocks;
mod classes;
mod code;
mod inline;
mod renderer;
mod table;

pub use classes::ClassMap;
pub use renderer::MarkdownRenderer;
pub use table::Table;
