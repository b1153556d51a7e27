use egui::Ui;
use egui_extras::TableRow;

pub const HEADERS: [&str; 7] = [
    "Name",
    "Create Date",
    "Password Changed",
    "Days Since Password Change",
    "Last Access",
    "Days Since Last Access",
    "MFA",
];

/// Renders the table header with bold labels.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>) {
    for label in HEADERS {
        header.col(|ui| {
            render_header_cell(ui, label);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.strong(label);
}
