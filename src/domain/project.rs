//! Project record entity and its frontmatter metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One member of a project's team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// Avatar image reference
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub linked_in: Option<String>,
}

/// Metadata block read from a project file's frontmatter.
///
/// Every field is optional on disk; missing values become empty/absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub team: Option<Vec<TeamMember>>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One portfolio entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Unique identifier, used as display key and exclusion key
    pub slug: String,
    /// Publication time; `None` when missing or unparsable
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub summary: Option<String>,
    pub images: Vec<String>,
    pub team: Option<Vec<TeamMember>>,
    pub link: Option<String>,
    /// Long-form markdown body
    pub content: Option<String>,
}

impl ProjectRecord {
    /// Create a bare record with only a slug and title
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            published_at: None,
            title: title.into(),
            summary: None,
            images: Vec::new(),
            team: None,
            link: None,
            content: None,
        }
    }

    /// Build a record from parsed frontmatter and the file body
    pub fn from_metadata(slug: impl Into<String>, metadata: ProjectMetadata, body: &str) -> Self {
        let slug = slug.into();
        let published_at = match metadata.published_at.as_deref() {
            Some(raw) => {
                let parsed = parse_published_at(raw);
                if parsed.is_none() {
                    tracing::warn!("Unparsable publishedAt {:?} for {}", raw, slug);
                }
                parsed
            }
            None => None,
        };

        Self {
            slug,
            published_at,
            title: metadata.title,
            summary: metadata.summary,
            images: metadata.images,
            team: metadata.team,
            link: metadata.link,
            content: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    /// Set the publication time from a date string
    pub fn published(mut self, raw: &str) -> Self {
        self.published_at = parse_published_at(raw);
        self
    }

    /// Avatar references of the team, in team order
    pub fn avatars(&self) -> Vec<String> {
        self.team
            .as_ref()
            .map(|team| team.iter().map(|member| member.avatar.clone()).collect())
            .unwrap_or_default()
    }
}

/// Parse a `publishedAt` value.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_published_at("2024-01-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_published_at("2024-03-05T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_published_at("last tuesday").is_none());
        assert!(parse_published_at("").is_none());
    }

    #[test]
    fn test_avatars_follow_team_order() {
        let mut record = ProjectRecord::new("p", "Project");
        assert!(record.avatars().is_empty());

        record.team = Some(vec![
            TeamMember {
                name: "Ada".to_string(),
                avatar: "/images/avatar-ada.jpg".to_string(),
                ..Default::default()
            },
            TeamMember {
                name: "Lin".to_string(),
                avatar: "/images/avatar-lin.jpg".to_string(),
                ..Default::default()
            },
        ]);
        assert_eq!(
            record.avatars(),
            vec!["/images/avatar-ada.jpg", "/images/avatar-lin.jpg"]
        );
    }

    #[test]
    fn test_from_metadata_empty_body_has_no_content() {
        let metadata = ProjectMetadata {
            title: "Site".to_string(),
            published_at: Some("2023-06-01".to_string()),
            ..Default::default()
        };
        let record = ProjectRecord::from_metadata("site", metadata, "");
        assert_eq!(record.slug, "site");
        assert!(record.published_at.is_some());
        assert!(record.content.is_none());
    }
}
