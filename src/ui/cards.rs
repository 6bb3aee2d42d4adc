use eframe::egui::{self, RichText, Ui};

use crate::outputs::SummaryOutput;

// ---------------------------------------------------------------------------
// Value cards (top row)
// ---------------------------------------------------------------------------

/// Three value boxes: penguin count and the two bill means.
pub fn value_cards(ui: &mut Ui, output: &SummaryOutput) {
    let summary = &output.summary;
    let cards = [
        ("🐧", "Number of penguins", summary.count_text()),
        ("↔", "Average bill length", summary.bill_length_text()),
        ("↕", "Average bill depth", summary.bill_depth_text()),
    ];

    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, (icon, title, value)) in columns.iter_mut().zip(cards) {
            value_card(ui, icon, title, &value);
        }
    });
}

fn value_card(ui: &mut Ui, icon: &str, title: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(icon).size(28.0));
                ui.vertical(|ui: &mut Ui| {
                    ui.label(title);
                    ui.label(RichText::new(value).size(22.0).strong());
                });
            });
        });
}

/// A titled card filling its column; used for the chart and the grid.
pub fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.strong(title);
            ui.separator();
            add_contents(ui);
        });
}
