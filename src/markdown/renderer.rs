//! Markdown to HTML rendering pipeline.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use super::ClassMap;
use super::blocks::{render_headings, render_lists, wrap_paragraphs};
use super::classes::class_attr;
use super::code::{CodeBlocks, escape_html, sanitize};
use super::table::render_tables;
use crate::highlight::Highlighter;

/// Renders Markdown documents to HTML fragments.
///
/// Supports fenced code blocks, pipe tables, ATX headings, flat ordered and
/// unordered lists, `**bold**`, `` `code` ``, `[links](url)` and paragraphs.
/// Text outside code blocks is trusted and emitted without escaping; code
/// block content is always escaped and never reinterpreted as Markdown.
pub struct MarkdownRenderer {
    classes: ClassMap,
    highlighter: Option<Highlighter>,
    annotate_columns: bool,
}

impl MarkdownRenderer {
    /// Creates renderer emitting bare tags without highlighting.
    pub fn new() -> Self {
        Self {
            classes: ClassMap::plain(),
            highlighter: None,
            annotate_columns: false,
        }
    }

    /// Attaches the given classes to every rendered element.
    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.classes = classes;
        self
    }

    /// Enables syntect highlighting for code blocks in known languages.
    ///
    /// Blocks in unknown languages, or blocks syntect fails on, fall back
    /// to escaped plain text.
    pub fn with_highlighting(mut self) -> Self {
        self.highlighter = Some(Highlighter::new());
        self
    }

    /// Adds a `data-type` attribute with the inferred column type to each
    /// table header cell.
    pub fn with_column_annotation(mut self, annotate: bool) -> Self {
        self.annotate_columns = annotate;
        self
    }

    /// Classes used by this renderer.
    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    /// Renders markdown content to an HTML string.
    ///
    /// Never fails: malformed or partial syntax is left as literal text.
    /// Passes run in a fixed order. Code blocks are swapped for
    /// placeholders first, then tables, headings, lists and paragraphs are
    /// rendered, and the code blocks are put back last.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML fragment, empty for empty or blank input
    pub fn render(&self, content: &str) -> String {
        let content = sanitize(content);

        let (text, code_blocks) =
            CodeBlocks::extract(&content, |language, code| self.render_code_block(language, code));

        let text = render_tables(&text, &self.classes, self.annotate_columns);
        let text = render_headings(&text, &self.classes);
        let text = render_lists(&text, &self.classes);
        let html = wrap_paragraphs(&text, &self.classes);

        debug!(
            "Rendered {} bytes of markdown with {} code blocks",
            content.len(),
            code_blocks.len()
        );

        code_blocks.restore(&html)
    }

    /// Renders one fenced block to its final `<pre><code>` HTML.
    fn render_code_block(&self, language: &str, code: &str) -> String {
        let body = self
            .highlight(language, code)
            .unwrap_or_else(|| escape_html(code));

        let code_class = if self.classes.code_block.is_empty() {
            format!("language-{}", language)
        } else {
            format!("language-{} {}", language, self.classes.code_block)
        };

        format!(
            "<pre{}><code class=\"{}\">{}</code></pre>",
            class_attr(&self.classes.pre),
            code_class,
            body
        )
    }

    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let highlighter = self.highlighter.as_ref()?;
        if !highlighter.supports(language) {
            debug!("No syntax for {:?} block, emitting plain text", language);
            return None;
        }
        match highlighter.highlight(code, language) {
            Ok(html) => html,
            Err(e) => {
                debug!("Highlighting {} block failed: {:#}", language, e);
                None
            }
        }
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read as UTF-8 text.
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file {}", path.display()))?;
        Ok(self.render(&content))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
