//! Reusable HTML components for page generation
//!
//! Maud component functions that turn a rendered Markdown fragment into a
//! complete document: the page wrapper with head, stylesheets and scripts,
//! and the shared footer.

pub mod footer;
pub mod layout;
