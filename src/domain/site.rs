//! Site entity representing the portfolio checkout being browsed.

use crate::config::{FolioConfig, SITE_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Represents the portfolio site context
#[derive(Debug, Clone)]
pub struct Site {
    /// Site root path
    pub root_path: PathBuf,
    /// Directory containing project content (absolute path)
    pub content_directory: PathBuf,
    /// Loaded configuration
    pub config: FolioConfig,
}

impl Site {
    /// Create a new Site from a root path and configuration
    pub fn new(root_path: PathBuf, config: FolioConfig) -> Self {
        let content_directory = root_path.join(&config.content.directory);

        Self {
            root_path,
            content_directory,
            config,
        }
    }

    /// Discover the site root by walking up from `start_path`.
    ///
    /// The first directory holding a `.folio.toml` or `.git` entry wins.
    pub fn discover(start_path: Option<PathBuf>) -> Option<PathBuf> {
        let start = start_path
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut current = start.as_path();
        loop {
            if is_site_root(current) {
                return Some(current.to_path_buf());
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Check if the content directory exists
    pub fn has_content_directory(&self) -> bool {
        self.content_directory.is_dir()
    }
}

fn is_site_root(dir: &Path) -> bool {
    dir.join(SITE_CONFIG_FILE).exists() || dir.join(".git").exists()
}
