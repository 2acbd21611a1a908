//! Page footer component

use maud::{Markup, html};

/// Renders the generator credit shown under every page.
pub fn footer() -> Markup {
    html! {
        footer class="page-footer" {
            "Generated by "
            a href="https://crates.io/crates/mdpage" { "mdpage" }
            " " (env!("CARGO_PKG_VERSION"))
        }
    }
}
