//! Page layout wrapper component

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::footer::footer;

/// Wraps a rendered Markdown fragment in a standalone HTML document
///
/// Provides DOCTYPE, charset, viewport, stylesheet and script loading, and
/// the shared footer. The fragment is inserted without escaping: it is the
/// output of [`crate::MarkdownRenderer`], which already escapes code.
///
/// # Arguments
///
/// * `title`: Page title text
/// * `stylesheets`: CSS file paths to include, relative to the page
/// * `scripts`: Script URLs to load in the head
/// * `fragment`: Rendered HTML body content
///
/// # Returns
///
/// Complete HTML document
pub fn page_wrapper(
    title: &str,
    stylesheets: &[&str],
    scripts: &[&str],
    fragment: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @for script in scripts {
                    script src=(script) {}
                }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                main class="container markdown-body" {
                    (PreEscaped(fragment))
                }
                (footer())
            }
        }
    }
}
