//! The user activity panel: a spinner until the fetch settles, then the MFA filter
//! selector above the table.

use activity_business::{
    DisplayRecord, FILTER_LABEL, FilteredUsersCompute, MfaFilter, UsersCompute,
};
use activity_states::StateCtx;
use egui::{Align, Layout, Response, Ui};
use egui_extras::TableBuilder;

use super::table::columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use super::table::header::render_table_header;
use super::table::row::render_user_row;

pub fn users_table(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let is_loading = state_ctx
        .cached::<UsersCompute>()
        .is_none_or(UsersCompute::is_loading);

    if is_loading {
        return ui.vertical_centered(|ui| ui.spinner()).inner;
    }

    ui.vertical(|ui| {
        mfa_filter_selector(state_ctx, ui);
        ui.add_space(8.0);

        let (Some(users), Some(filtered)) = (
            state_ctx.cached::<UsersCompute>(),
            state_ctx.cached::<FilteredUsersCompute>(),
        ) else {
            return;
        };
        let rows: Vec<&DisplayRecord> = filtered.records(users).collect();
        render_table(ui, &rows);
    })
    .response
}

fn mfa_filter_selector(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let current = *state_ctx.state::<MfaFilter>();
    let mut selected = current;

    ui.horizontal(|ui| {
        ui.label(FILTER_LABEL);
        egui::ComboBox::from_id_salt("mfa_filter")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for option in MfaFilter::ALL {
                    ui.selectable_value(&mut selected, option, option.label());
                }
            });
    });

    if selected != current {
        log::debug!("MFA filter changed to {selected:?}");
        state_ctx.update::<MfaFilter>(|filter| *filter = selected);
        // Rows drawn below must already follow the new filter.
        state_ctx.run_all_dirty();
    }
}

fn render_table(ui: &mut Ui, rows: &[&DisplayRecord]) {
    let mut table = TableBuilder::new(ui)
        .id_salt("users_table")
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns() {
        table = table.column(column);
    }

    table
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                if let Some(record) = rows.get(row.index()) {
                    render_user_row(&mut row, record);
                }
            });
        });
}
