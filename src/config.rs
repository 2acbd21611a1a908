//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::highlight::theme_names;
use crate::markdown::{ClassMap, MarkdownRenderer};

/// Tailwind CDN build loaded by pages using the tailwind class preset.
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Class preset applied to rendered elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassPreset {
    /// Bare tags styled by the bundled stylesheet
    Plain,
    /// Tailwind utility classes, styled by the Tailwind CDN
    Tailwind,
}

impl ClassPreset {
    /// Class map for this preset.
    pub fn class_map(&self) -> ClassMap {
        match self {
            ClassPreset::Plain => ClassMap::plain(),
            ClassPreset::Tailwind => ClassMap::tailwind(),
        }
    }

    /// Scripts the page must load for the classes to take effect.
    pub fn scripts(&self) -> &'static [&'static str] {
        match self {
            ClassPreset::Plain => &[],
            ClassPreset::Tailwind => &[TAILWIND_CDN],
        }
    }
}

/// Command line configuration for mdpage.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdpage", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render
    #[arg(default_value = "README.md")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Page title (defaults to the input file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Class preset for rendered elements
    #[arg(long, value_enum, default_value_t = ClassPreset::Plain)]
    pub classes: ClassPreset,

    /// Syntax highlight fenced code blocks
    #[arg(long)]
    pub highlight: bool,

    /// Highlighting theme (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Annotate table headers with inferred column types
    #[arg(long)]
    pub annotate_columns: bool,

    /// Print the rendered HTML fragment to stdout instead of writing a page
    #[arg(long)]
    pub fragment: bool,

    /// Do not open the generated page in a browser
    #[arg(long)]
    pub no_open: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, or if highlighting is
    /// enabled with a theme that is not bundled.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if self.highlight && !theme_names().contains(&self.theme) {
            bail!(
                "Unknown highlighting theme: {} (available: {})",
                self.theme,
                theme_names().join(", ")
            );
        }

        Ok(())
    }

    /// Returns page title from configuration or the input file name.
    ///
    /// # Errors
    ///
    /// Returns error if the input path has no file name or contains invalid UTF8.
    pub fn page_title(&self) -> Result<String> {
        if let Some(title) = &self.title {
            return Ok(title.clone());
        }

        self.input
            .file_stem()
            .and_then(|n| n.to_str())
            .with_context(|| {
                format!(
                    "Cannot extract page title from path: {}",
                    self.input.display()
                )
            })
            .map(String::from)
    }

    /// Builds the renderer described by this configuration.
    pub fn renderer(&self) -> MarkdownRenderer {
        let renderer = MarkdownRenderer::new()
            .with_classes(self.classes.class_map())
            .with_column_annotation(self.annotate_columns);

        if self.highlight {
            renderer.with_highlighting()
        } else {
            renderer
        }
    }

    /// Highlighting theme to bundle, if highlighting is enabled.
    pub fn highlight_theme(&self) -> Option<&str> {
        self.highlight.then_some(self.theme.as_str())
    }
}
