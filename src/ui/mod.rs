//! UI components for folio-tui.
//!
//! This module contains:
//! - layout: Main layout rendering
//! - input: Keyboard input handling
//! - markdown: Case-study markdown rendering
//! - widgets: Reusable UI widgets

pub mod input;
pub mod layout;
pub mod markdown;
pub mod widgets;
