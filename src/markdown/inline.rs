//! Inline formatting: strong emphasis, inline code and links.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::classes::{ClassMap, class_attr};

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

static CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern is valid"));

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid")
});

/// Applies the inline rules to a run of text.
///
/// Rules run once each, in order: `**bold**`, `` `code` ``, then
/// `[label](url)`. Unmatched markers stay literal. Placeholder tokens
/// contain none of the marker characters and pass through untouched.
pub(super) fn format_inline(text: &str, classes: &ClassMap) -> String {
    let bold = BOLD.replace_all(text, |caps: &Captures| {
        format!(
            "<strong{}>{}</strong>",
            class_attr(&classes.strong),
            &caps[1]
        )
    });

    let code = CODE.replace_all(&bold, |caps: &Captures| {
        format!(
            "<code{}>{}</code>",
            class_attr(&classes.inline_code),
            &caps[1]
        )
    });

    LINK.replace_all(&code, |caps: &Captures| {
        format!(
            "<a href=\"{}\"{}>{}</a>",
            caps[2].replace('"', "&quot;"),
            class_attr(&classes.link),
            &caps[1]
        )
    })
    .into_owned()
}
