//! TUI widgets for BookScape.
//!
//! Contains reusable UI components.

pub mod analytics;
pub mod header;
pub mod input;
pub mod results;
pub mod sidebar;
pub mod table;
