//! Infrastructure services for folio-tui.
//!
//! This module contains:
//! - ContentSource: Project loading from markdown content files
//! - LinkLauncher: Opening external project links

mod content;
mod launcher;

pub use content::{split_frontmatter, ContentSource, MarkdownContentSource};
pub use launcher::LinkLauncher;
