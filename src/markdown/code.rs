//! Fenced code block extraction and placeholder restoration.
//!
//! Code blocks are pulled out of the document before any other pass runs
//! and replaced with opaque tokens. The tokens are built from private use
//! code points which are stripped from the input beforehand, so no later
//! pass (and no user content) can ever produce or match one by accident.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Opens a placeholder token.
const TOKEN_OPEN: char = '\u{E000}';

/// Closes a placeholder token.
const TOKEN_CLOSE: char = '\u{E001}';

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([\w+#.-]*)[ \t]*\n(.*?)```").expect("fence pattern is valid")
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{TOKEN_OPEN}([0-9]+){TOKEN_CLOSE}")).expect("token pattern is valid")
});

/// Rendered code blocks indexed by placeholder number.
#[derive(Debug, Default)]
pub(super) struct CodeBlocks {
    blocks: Vec<String>,
}

impl CodeBlocks {
    /// Replaces every fenced block with a placeholder token.
    ///
    /// `render` receives the language tag (empty if absent) and the raw,
    /// unescaped block content, and returns the final HTML for the block.
    /// Unterminated fences are left in place as literal text.
    pub(super) fn extract<F>(markdown: &str, render: F) -> (String, Self)
    where
        F: Fn(&str, &str) -> String,
    {
        let mut store = Self::default();
        let text = FENCE.replace_all(markdown, |caps: &Captures| {
            let language = caps.get(1).map_or("", |m| m.as_str());
            let html = render(language, trim_code(&caps[2]));
            store.push(html)
        });

        (text.into_owned(), store)
    }

    fn push(&mut self, html: String) -> String {
        let token = placeholder(self.blocks.len());
        self.blocks.push(html);
        token
    }

    /// Number of extracted blocks.
    pub(super) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Substitutes each token with its stored block by exact index.
    pub(super) fn restore(&self, html: &str) -> String {
        if self.blocks.is_empty() {
            return html.to_string();
        }

        TOKEN
            .replace_all(html, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.blocks.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Builds the placeholder token for a block index.
pub(super) fn placeholder(index: usize) -> String {
    format!("{TOKEN_OPEN}{index}{TOKEN_CLOSE}")
}

/// Returns true if the text begins with a placeholder token.
pub(super) fn starts_with_placeholder(text: &str) -> bool {
    text.starts_with(TOKEN_OPEN)
}

/// Normalises line endings and strips token code points from user input.
pub(super) fn sanitize(markdown: &str) -> Cow<'_, str> {
    if !markdown.contains(['\r', TOKEN_OPEN, TOKEN_CLOSE]) {
        return Cow::Borrowed(markdown);
    }

    Cow::Owned(
        markdown
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace([TOKEN_OPEN, TOKEN_CLOSE], "\u{FFFD}"),
    )
}

/// Drops leading blank lines and trailing whitespace, keeping indentation.
fn trim_code(code: &str) -> &str {
    let mut code = code.trim_end();
    while let Some(newline) = code.find('\n') {
        if !code[..newline].trim().is_empty() {
            break;
        }
        code = &code[newline + 1..];
    }

    if code.trim().is_empty() { "" } else { code }
}

/// Escapes HTML special characters.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(language: &str, code: &str) -> String {
        format!("[{}:{}]", language, escape_html(code))
    }

    #[test]
    fn test_extract_replaces_block_with_token() {
        // Arrange
        let markdown = "before\n```rust\nfn main() {}\n```\nafter";

        // Act
        let (text, store) = CodeBlocks::extract(markdown, plain);

        // Assert
        assert_eq!(store.len(), 1);
        assert_eq!(text, format!("before\n{}\nafter", placeholder(0)));
        assert!(!text.contains("fn main"), "Code must leave the document");
    }

    #[test]
    fn test_extract_without_language() {
        // Arrange
        let markdown = "```\nplain\n```";

        // Act
        let (text, store) = CodeBlocks::extract(markdown, plain);

        // Assert
        assert_eq!(store.restore(&text), "[:plain]");
    }

    #[test]
    fn test_extract_unterminated_fence_stays_literal() {
        // Arrange
        let markdown = "```rust\nfn main() {}\n";

        // Act
        let (text, store) = CodeBlocks::extract(markdown, plain);

        // Assert
        assert_eq!(store.len(), 0);
        assert_eq!(text, markdown);
    }

    #[test]
    fn test_restore_by_index() {
        // Arrange
        let markdown = "```a\none\n```\n\n```b\ntwo\n```";
        let (text, store) = CodeBlocks::extract(markdown, plain);

        // Act
        let restored = store.restore(&text);

        // Assert
        assert_eq!(restored, "[a:one]\n\n[b:two]");
    }

    #[test]
    fn test_restore_survives_reordering() {
        // Arrange
        let (_, store) = CodeBlocks::extract("```\nfirst\n```\n```\nsecond\n```", plain);
        let shuffled = format!("{} then {}", placeholder(1), placeholder(0));

        // Act
        let restored = store.restore(&shuffled);

        // Assert
        assert_eq!(restored, "[:second] then [:first]");
    }

    #[test]
    fn test_sanitize_strips_token_characters() {
        // Arrange
        let markdown = format!("look {} here", placeholder(0));

        // Act
        let cleaned = sanitize(&markdown);

        // Assert
        assert!(!starts_with_placeholder(&cleaned[5..]));
        assert_eq!(cleaned, "look \u{FFFD}0\u{FFFD} here");
    }

    #[test]
    fn test_sanitize_normalises_line_endings() {
        // Arrange & Act
        let cleaned = sanitize("a\r\nb\rc");

        // Assert
        assert_eq!(cleaned, "a\nb\nc");
    }

    #[test]
    fn test_trim_code_keeps_indentation() {
        // Arrange
        let code = "\n  \n    indented\n  next\n\n";

        // Act
        let trimmed = trim_code(code);

        // Assert
        assert_eq!(trimmed, "    indented\n  next");
    }

    #[test]
    fn test_escape_html() {
        // Arrange & Act
        let escaped = escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#);

        // Assert
        assert_eq!(
            escaped,
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
