//! Syntax highlighting of fenced code blocks with syntect.

use anyhow::{Context, Result, anyhow};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Prefix for every CSS class emitted by the highlighter.
pub const CLASS_PREFIX: &str = "hljs-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// Syntax highlighter producing HTML with CSS class names.
///
/// Uses ClassedHTMLGenerator so the colours live in a stylesheet generated
/// by [`theme_css`] rather than in inline styles.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    /// Loads the default syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Returns true if a syntax definition exists for the language tag.
    pub fn supports(&self, language: &str) -> bool {
        !language.is_empty()
            && (self.syntax_set.find_syntax_by_token(language).is_some()
                || self.syntax_set.find_syntax_by_extension(language).is_some())
    }

    /// Highlights code for the given language tag.
    ///
    /// # Arguments
    ///
    /// * `code`: Raw, unescaped source code
    /// * `language`: Language token or file extension (rust, py, etc)
    ///
    /// # Returns
    ///
    /// `None` when the language is unknown, otherwise HTML with
    /// `<span class="hljs-*">` tags. All code text in the output is escaped.
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails to parse a line.
    pub fn highlight(&self, code: &str, language: &str) -> Result<Option<String>> {
        if language.is_empty() {
            return Ok(None);
        }

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
        else {
            return Ok(None);
        };

        if code.is_empty() {
            return Ok(Some(String::new()));
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(Some(generator.finalize()))
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the bundled highlighting themes.
pub fn theme_names() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Generates the stylesheet for a bundled theme using the highlighter's
/// class names.
///
/// # Errors
///
/// Returns error if the theme does not exist or CSS generation fails.
pub fn theme_css(theme_name: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let theme = themes.themes.get(theme_name).ok_or_else(|| {
        anyhow!(
            "Unknown highlighting theme: {} (available: {})",
            theme_name,
            themes.themes.keys().cloned().collect::<Vec<_>>().join(", ")
        )
    })?;

    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .with_context(|| format!("Failed to generate CSS for theme {}", theme_name))
}
