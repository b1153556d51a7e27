//! Column definitions for the user activity table.

use egui_extras::Column;

pub const NAME_WIDTH: f32 = 160.0;
pub const DATE_WIDTH: f32 = 110.0;
pub const DAYS_WIDTH: f32 = 190.0;
pub const MFA_WIDTH: f32 = 90.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Columns in display order:
/// Name, Create Date, Password Changed, Days Since Password Change,
/// Last Access, Days Since Last Access, MFA.
#[inline]
pub fn table_columns() -> Vec<Column> {
    vec![
        Column::initial(NAME_WIDTH).at_least(100.0), // Name
        Column::exact(DATE_WIDTH),                   // Create Date
        Column::exact(DATE_WIDTH),                   // Password Changed
        Column::initial(DAYS_WIDTH).at_least(60.0),  // Days Since Password Change
        Column::exact(DATE_WIDTH),                   // Last Access
        Column::initial(DAYS_WIDTH).at_least(60.0),  // Days Since Last Access
        Column::remainder().at_least(MFA_WIDTH),     // MFA
    ]
}
