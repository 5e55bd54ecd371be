//! Shared CLI presentation utilities.
//!
//! This module provides the report types printed by the commands, in
//! both text and JSON form.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no selection logic
//! - Reports borrow from the selection result instead of copying it

pub mod report;
pub mod tables;

// Re-export commonly used items
pub use report::{ListReport, ListRow, ProbeReport, SelectionReport, print_json};
pub use tables::{format_optional, print_separator, truncate_string};
