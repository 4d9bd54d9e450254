//! Domain entities for folio-tui.
//!
//! This module contains the core business entities:
//! - ProjectRecord: One portfolio entry
//! - ListSelection: Which entries to show, in which order
//! - CardProps: What one card shows
//! - Site: The portfolio checkout being browsed

mod card;
mod project;
mod selection;
mod site;

pub use card::{
    project_href, slug_from_href, CardProps, CardSlots, CASE_STUDY_LABEL, EXTERNAL_LINK_LABEL,
};
pub use project::{parse_published_at, ProjectMetadata, ProjectRecord, TeamMember};
pub use selection::{
    count_visible, filter_excluded, reserved_height, select, slice_range,
    sort_by_published_desc, DisplayRange, ListSelection, Selection,
    DEFAULT_ESTIMATED_CARD_HEIGHT,
};
pub use site::Site;
