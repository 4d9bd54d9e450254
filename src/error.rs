//! Unified error types for the folio-tui application.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors raised while loading project content from disk
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Missing frontmatter in {0}")]
    MissingFrontmatter(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when handing an external link to the platform opener
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Not an http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("No opener available for this platform")]
    NoOpener,

    #[error("Failed to spawn opener: {0}")]
    SpawnFailed(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for content loading
pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Result type alias for link launching
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
