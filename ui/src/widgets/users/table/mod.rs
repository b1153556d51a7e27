//! Table components for the user activity table.
//!
//! - `columns`: column definitions and heights
//! - `header`: table header rendering
//! - `row`: one row per user
//! - `cells`: cell rendering and the tone rules for the day counters

pub mod cells;
pub mod columns;
pub mod header;
pub mod row;
