//! Content service for loading project entries from markdown files.

use crate::domain::{ProjectMetadata, ProjectRecord};
use crate::error::{ContentError, ContentResult};
use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File extensions recognised as project content
const CONTENT_EXTENSIONS: &[&str] = &["mdx", "md"];

/// Source of project records
pub trait ContentSource {
    /// Load the full collection of project records
    fn load_projects(&self) -> ContentResult<Vec<ProjectRecord>>;
}

/// Loads projects from a directory of `.mdx`/`.md` files with YAML frontmatter
pub struct MarkdownContentSource {
    directory: PathBuf,
}

impl MarkdownContentSource {
    /// Create a new MarkdownContentSource
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Parse a single project file
    pub fn load_file(path: &Path) -> ContentResult<ProjectRecord> {
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ContentError::InvalidFileName(path.to_path_buf()))?
            .to_string();

        let raw = fs::read_to_string(path)?;
        let (frontmatter, body) = split_frontmatter(&raw)
            .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

        let metadata: ProjectMetadata = if frontmatter.trim().is_empty() {
            ProjectMetadata::default()
        } else {
            serde_yaml::from_str(frontmatter).map_err(|e| ContentError::Frontmatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Ok(ProjectRecord::from_metadata(slug, metadata, body))
    }
}

impl ContentSource for MarkdownContentSource {
    fn load_projects(&self) -> ContentResult<Vec<ProjectRecord>> {
        if !self.directory.is_dir() {
            return Err(ContentError::DirectoryNotFound(self.directory.clone()));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.is_file() && has_content_extension(&path) {
                paths.push(path);
            }
        }
        // Directory iteration order is platform-defined
        paths.sort();
        let paths = dedupe_stems(paths);

        let mut projects = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::load_file(&path) {
                Ok(project) => projects.push(project),
                Err(e) => {
                    // Log error but continue with other files
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!(
            "Loaded {} projects from {}",
            projects.len(),
            self.directory.display()
        );

        Ok(projects)
    }
}

/// Fixed in-memory collection, handy for embedding and tests
impl ContentSource for Vec<ProjectRecord> {
    fn load_projects(&self) -> ContentResult<Vec<ProjectRecord>> {
        Ok(self.clone())
    }
}

/// Keep one file per stem so slugs stay unique; `.mdx` wins over `.md`
fn dedupe_stems(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut kept: Vec<PathBuf> = Vec::with_capacity(paths.len());
    let mut by_stem: HashMap<OsString, usize> = HashMap::new();

    for path in paths {
        let Some(stem) = path.file_stem().map(OsString::from) else {
            kept.push(path);
            continue;
        };
        match by_stem.get(&stem) {
            Some(&idx) => {
                let (winner, loser) = if extension_rank(&path) < extension_rank(&kept[idx]) {
                    (path, std::mem::take(&mut kept[idx]))
                } else {
                    (std::mem::take(&mut kept[idx]), path)
                };
                tracing::warn!(
                    "Skipping {}: slug already provided by {}",
                    loser.display(),
                    winner.display()
                );
                kept[idx] = winner;
            }
            None => {
                by_stem.insert(stem, kept.len());
                kept.push(path);
            }
        }
    }

    kept
}

/// Position of the file's extension in `CONTENT_EXTENSIONS`
fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| CONTENT_EXTENSIONS.iter().position(|c| *c == ext))
        .unwrap_or(CONTENT_EXTENSIONS.len())
}

fn has_content_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

fn frontmatter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\A(?:\x{FEFF})?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("frontmatter pattern is valid")
    })
}

/// Split a document into its frontmatter block and body.
///
/// Returns `None` when the document does not open with a `---` fence.
pub fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let captures = frontmatter_pattern().captures(raw)?;
    let whole = captures.get(0)?;
    let frontmatter = captures.get(1).map_or("", |m| m.as_str());
    let body = raw[whole.end()..].trim();
    Some((frontmatter, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORBIT: &str = r#"---
title: "Orbit design system"
publishedAt: "2024-04-08"
summary: "Components for a satellite dashboard."
images:
  - "/images/projects/orbit/cover-01.jpg"
  - "/images/projects/orbit/cover-02.jpg"
team:
  - name: "Ada Park"
    role: "Design Engineer"
    avatar: "/images/avatar.jpg"
    linkedIn: "https://www.linkedin.com/in/ada/"
link: "https://orbit.example.com"
---

## Overview

Orbit started as a side project.
"#;

    fn create_content_dir() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("projects");
        fs::create_dir_all(&dir).unwrap();

        fs::write(dir.join("orbit.mdx"), ORBIT).unwrap();
        fs::write(
            dir.join("notes.md"),
            "---\ntitle: Notes\npublishedAt: 2023-01-02\n---\n",
        )
        .unwrap();
        fs::write(dir.join("broken.mdx"), "---\ntitle: [unclosed\n---\nbody").unwrap();
        fs::write(dir.join("readme.txt"), "not content").unwrap();

        (temp, dir)
    }

    #[test]
    fn test_load_projects_skips_broken_and_foreign_files() {
        let (_temp, dir) = create_content_dir();
        let source = MarkdownContentSource::new(dir);

        let projects = source.load_projects().unwrap();
        let slugs: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["notes", "orbit"]);
    }

    #[test]
    fn test_same_stem_loads_once_preferring_mdx() {
        let (_temp, dir) = create_content_dir();
        fs::write(
            dir.join("orbit.md"),
            "---\ntitle: Orbit notes\npublishedAt: 2024-04-09\n---\nDraft",
        )
        .unwrap();
        fs::write(dir.join("atlas.md"), "---\ntitle: Atlas (md)\n---\n").unwrap();
        fs::write(dir.join("atlas.mdx"), "---\ntitle: Atlas\n---\n").unwrap();

        let projects = MarkdownContentSource::new(dir).load_projects().unwrap();
        let slugs: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["atlas", "notes", "orbit"]);

        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Atlas", "Notes", "Orbit design system"]);
    }

    #[test]
    fn test_load_file_reads_metadata_and_body() {
        let (_temp, dir) = create_content_dir();
        let project = MarkdownContentSource::load_file(&dir.join("orbit.mdx")).unwrap();

        assert_eq!(project.slug, "orbit");
        assert_eq!(project.title, "Orbit design system");
        assert_eq!(project.images.len(), 2);
        assert_eq!(project.avatars(), vec!["/images/avatar.jpg"]);
        assert_eq!(project.link.as_deref(), Some("https://orbit.example.com"));
        assert!(project.published_at.is_some());
        let content = project.content.unwrap();
        assert!(content.starts_with("## Overview"));
    }

    #[test]
    fn test_frontmatter_only_file_has_no_content() {
        let (_temp, dir) = create_content_dir();
        let project = MarkdownContentSource::load_file(&dir.join("notes.md")).unwrap();
        assert_eq!(project.title, "Notes");
        assert!(project.content.is_none());
        assert!(project.summary.is_none());
        assert!(project.team.is_none());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let source = MarkdownContentSource::new(temp.path().join("nope"));
        assert!(matches!(
            source.load_projects(),
            Err(ContentError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_missing_frontmatter_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plain.md");
        fs::write(&path, "# Just markdown").unwrap();
        assert!(matches!(
            MarkdownContentSource::load_file(&path),
            Err(ContentError::MissingFrontmatter(_))
        ));
    }

    #[test]
    fn test_split_frontmatter() {
        assert_eq!(
            split_frontmatter("---\ntitle: A\n---\nBody\n"),
            Some(("title: A", "Body"))
        );
        assert_eq!(split_frontmatter("---\n---\n"), Some(("", "")));
        assert_eq!(split_frontmatter("no fence"), None);
    }

    #[test]
    fn test_in_memory_source() {
        let records = vec![ProjectRecord::new("a", "A")];
        assert_eq!(records.load_projects().unwrap().len(), 1);
    }
}
