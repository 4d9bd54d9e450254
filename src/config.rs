//! Configuration management for folio-tui.
//!
//! Supports layered configuration: defaults → site → user → env

use crate::domain::{DisplayRange, ListSelection, DEFAULT_ESTIMATED_CARD_HEIGHT};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-site configuration file
pub const SITE_CONFIG_FILE: &str = ".folio.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl FolioConfig {
    /// Load configuration with hierarchy: defaults → site → user → env
    pub fn load(site_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Site-specific config (.folio.toml in site root)
        if let Some(root) = site_root {
            let site_config = root.join(SITE_CONFIG_FILE);
            if site_config.exists() {
                builder = builder.add_source(File::from(site_config).required(false));
            }
        }

        // 3. User config (~/.config/folio/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "folio", "folio") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (FOLIO__*)
        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("list.exclude")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the list selector cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list.estimated_card_height == 0 {
            return Err(ConfigError::Invalid(
                "list.estimated_card_height must be positive".to_string(),
            ));
        }
        if self.list.page_size == Some(0) {
            return Err(ConfigError::Invalid(
                "list.page_size must be positive when set".to_string(),
            ));
        }
        if self.list.range_end.is_some() && self.list.range_start.is_none() {
            return Err(ConfigError::Invalid(
                "list.range_end requires list.range_start".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where project content lives and how it is addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory containing project files (relative to site root)
    #[serde(default = "default_content_directory")]
    pub directory: PathBuf,
    /// Route prefix used to build each project's href
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            directory: default_content_directory(),
            route_prefix: default_route_prefix(),
        }
    }
}

fn default_content_directory() -> PathBuf {
    PathBuf::from("src/app/work/projects")
}

fn default_route_prefix() -> String {
    "/work".to_string()
}

/// Project list selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Slugs never shown in the list
    #[serde(default)]
    pub exclude: Vec<String>,
    /// First entry to show (1-indexed)
    #[serde(default)]
    pub range_start: Option<i64>,
    /// Last entry bound (1-indexed); open when unset
    #[serde(default)]
    pub range_end: Option<i64>,
    /// Number of cards to reserve vertical space for
    #[serde(default)]
    pub reserve_count: i64,
    /// Assumed height of one card when reserving space
    #[serde(default = "default_estimated_card_height")]
    pub estimated_card_height: u32,
    /// Cards per page; pagination is off when unset
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            range_start: None,
            range_end: None,
            reserve_count: 0,
            estimated_card_height: default_estimated_card_height(),
            page_size: None,
        }
    }
}

impl ListConfig {
    /// Build the selector options described by this section
    pub fn to_selection(&self) -> ListSelection {
        ListSelection {
            exclude: self.exclude.iter().cloned().collect(),
            range: self.range_start.map(|start| DisplayRange {
                start,
                end: self.range_end,
            }),
            reserve_count: self.reserve_count,
            estimated_card_height: self.estimated_card_height,
        }
    }
}

fn default_estimated_card_height() -> u32 {
    DEFAULT_ESTIMATED_CARD_HEIGHT
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
    /// Command used to open external links instead of the platform opener
    #[serde(default)]
    pub browser_command: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
            browser_command: None,
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(
            config.content.directory,
            PathBuf::from("src/app/work/projects")
        );
        assert_eq!(config.content.route_prefix, "/work");
        assert!(config.list.exclude.is_empty());
        assert_eq!(config.list.reserve_count, 0);
        assert_eq!(config.list.estimated_card_height, 520);
        assert_eq!(config.list.page_size, None);
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
    }

    #[test]
    fn test_list_config_to_selection() {
        let list = ListConfig {
            exclude: vec!["draft".to_string()],
            range_start: Some(2),
            range_end: None,
            reserve_count: 3,
            ..Default::default()
        };

        let selection = list.to_selection();
        assert!(selection.exclude.contains("draft"));
        assert_eq!(selection.range, Some(DisplayRange { start: 2, end: None }));
        assert_eq!(selection.reserve_count, 3);
        assert_eq!(selection.estimated_card_height, 520);
    }

    #[test]
    fn test_site_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(SITE_CONFIG_FILE),
            "[list]\nexclude = [\"secret\"]\nrange_start = 2\npage_size = 4\n\n[content]\nroute_prefix = \"/projects\"\n",
        )
        .unwrap();

        let config = FolioConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.list.exclude, vec!["secret".to_string()]);
        assert_eq!(config.list.range_start, Some(2));
        assert_eq!(config.list.page_size, Some(4));
        assert_eq!(config.content.route_prefix, "/projects");
        // Untouched keys keep their defaults
        assert_eq!(config.list.estimated_card_height, 520);
    }

    #[test]
    fn test_validate_rejects_zero_card_height() {
        let mut config = FolioConfig::default();
        config.list.estimated_card_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_end_without_start() {
        let mut config = FolioConfig::default();
        config.list.range_end = Some(3);
        assert!(config.validate().is_err());
    }
}
