use activity_business::DisplayRecord;
use egui_extras::TableRow;

use super::cells::{
    access_age_tone, password_age_tone, render_days_cell, render_mfa_cell, render_text_cell,
};

/// Renders one user: raw dates as received, day counters toned by age.
#[inline]
pub fn render_user_row(row: &mut TableRow<'_, '_>, record: &DisplayRecord) {
    let raw = &record.raw;

    row.col(|ui| render_text_cell(ui, &raw.name));
    row.col(|ui| render_text_cell(ui, &raw.create_date));
    row.col(|ui| render_text_cell(ui, raw.password_changed_date.as_str()));
    row.col(|ui| {
        let days = record.days_since_password_change;
        render_days_cell(ui, days, password_age_tone(days));
    });
    row.col(|ui| render_text_cell(ui, raw.last_access_date.as_str()));
    row.col(|ui| {
        let days = record.days_since_last_access;
        render_days_cell(ui, days, access_age_tone(days));
    });
    row.col(|ui| render_mfa_cell(ui, record.mfa_enabled()));
}
