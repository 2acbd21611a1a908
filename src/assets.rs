//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::highlight::theme_css;

const BASE: &str = include_str!("../assets/base.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Writes bundled CSS assets to the assets directory
///
/// Always writes `markdown.css`. With a highlighting theme, also writes
/// `highlight.css` generated from that theme.
///
/// # Arguments
///
/// * `assets_dir`: Directory to write into (must exist)
/// * `highlight_theme`: Syntect theme name, if code highlighting is on
///
/// # Returns
///
/// File names written, in the order they should be linked
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written
pub fn write_css_assets(assets_dir: &Path, highlight_theme: Option<&str>) -> Result<Vec<String>> {
    let mut written = vec![write_bundled(assets_dir, "markdown.css", &[BASE, MARKDOWN])?];

    if let Some(theme) = highlight_theme {
        let css = theme_css(theme)?;
        written.push(write_bundled(assets_dir, "highlight.css", &[&css])?);
    }

    Ok(written)
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<String> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(name.to_string())
}
