//! folio-tui: Terminal browser for a portfolio's projects
//!
//! This crate loads project entries from a site's markdown content, selects
//! and orders them for display, and renders each one as a fixed-size card.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::FolioConfig;
pub use error::{AppError, Result};
