//! Card properties and slot presence rules.
//!
//! A card always reserves room for every optional slot. This module only
//! decides which slots carry content; the widget decides where they go.

use super::ProjectRecord;

/// Label of the case-study call to action
pub const CASE_STUDY_LABEL: &str = "Read case study";
/// Label of the external link call to action
pub const EXTERNAL_LINK_LABEL: &str = "View project";

/// Build the href of a project's case study page
pub fn project_href(route_prefix: &str, slug: &str) -> String {
    format!("{}/{}", route_prefix.trim_end_matches('/'), slug)
}

/// Resolve an href produced by [`project_href`] back to its slug
pub fn slug_from_href<'a>(route_prefix: &str, href: &'a str) -> Option<&'a str> {
    let rest = href.strip_prefix(route_prefix.trim_end_matches('/'))?;
    let slug = rest.strip_prefix('/')?;
    if slug.is_empty() || slug.contains('/') {
        None
    } else {
        Some(slug)
    }
}

/// Inputs of one project card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProps {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub avatars: Vec<String>,
    pub link: Option<String>,
}

impl CardProps {
    /// Pass a record's fields through to a card
    pub fn from_record(record: &ProjectRecord, route_prefix: &str) -> Self {
        Self {
            slug: record.slug.clone(),
            href: project_href(route_prefix, &record.slug),
            title: record.title.clone(),
            images: record.images.clone(),
            description: record.summary.clone(),
            content: record.content.clone(),
            avatars: record.avatars(),
            link: record.link.clone(),
        }
    }

    /// Which slots have something to show
    pub fn slots(&self) -> CardSlots {
        CardSlots {
            media: !self.images.is_empty(),
            avatars: !self.avatars.is_empty(),
            description: is_present(self.description.as_deref()),
            case_study: is_present(self.content.as_deref()),
            external_link: is_present(self.link.as_deref()),
        }
    }

    /// External link, when the slot is present
    pub fn external_link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Presence of each optional card slot. Slots are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardSlots {
    pub media: bool,
    pub avatars: bool,
    pub description: bool,
    pub case_study: bool,
    pub external_link: bool,
}

/// A text slot is present when defined and non-blank
fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
