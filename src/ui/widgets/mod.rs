//! Reusable UI widgets for folio.

pub mod carousel;
pub mod case_study;
pub mod help;
pub mod project_card;
pub mod project_list;
