//! Markdown document renderer and static page generator.

mod assets;
pub mod columns;
pub mod components;
mod config;
mod highlight;
mod markdown;

pub use assets::write_css_assets;
pub use columns::{
    ColumnType, DatePart, FilterOperator, FilterRule, FilterValue, infer_column_type, operators_for,
};
pub use components::layout::page_wrapper;
pub use config::{ClassPreset, Config};
pub use highlight::{Highlighter, theme_css, theme_names};
pub use markdown::{ClassMap, MarkdownRenderer, Table};
