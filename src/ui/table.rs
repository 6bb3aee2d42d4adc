use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::grid::GridColumn;
use crate::outputs::TableOutput;
use crate::state::UiEvent;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 46.0;

// ---------------------------------------------------------------------------
// Data grid with per-column filter boxes
// ---------------------------------------------------------------------------

/// Render the penguin data grid. Typing in a header's filter box emits a
/// [`UiEvent::SetGridQuery`].
pub fn data_grid(ui: &mut Ui, table: &TableOutput, events: &mut Vec<UiEvent>) {
    let mut caption = format!("{} of {} rows", table.visible_len(), table.total());
    if table.has_column_filters() {
        caption.push_str(" (column filters active)");
    }
    ui.label(caption);

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for _ in GridColumn::ALL {
        builder = builder.column(Column::auto().at_least(80.0).clip(true));
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            for column in GridColumn::ALL {
                header.col(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        ui.strong(column.header());
                        let mut query = table.query(column).to_owned();
                        let hint = if column.is_numeric() { "e.g. 3000..4000" } else { "filter" };
                        let edit = egui::TextEdit::singleline(&mut query)
                            .hint_text(hint)
                            .desired_width(80.0);
                        if ui.add(edit).changed() {
                            events.push(UiEvent::SetGridQuery(column, query));
                        }
                    });
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.visible_len(), |mut row| {
                let Some(grid_row) = table.visible_row(row.index()) else {
                    return;
                };
                for column in GridColumn::ALL {
                    row.col(|ui: &mut Ui| {
                        ui.label(grid_row.cell(column));
                    });
                }
            });
        });
}
