//! User activity table widget.
//!
//! - `panel`: loading indicator, MFA filter selector and the table itself
//! - `table`: table rendering components (columns, header, row, cells)

mod panel;
pub mod table;

pub use panel::users_table;
