use eframe::egui::{self, Ui};

use crate::state::{AppState, UiEvent};
use crate::ui::{cards, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashboardApp {
    pub state: AppState,
}

impl PenguinDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.theme.apply(ctx);

        // Widgets only record input; it is applied after the frame is laid out.
        let mut events: Vec<UiEvent> = Vec::new();

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut events);
            });

        // ---- Central panel: value cards, chart and grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::value_cards(ui, &self.state.summary);
            ui.add_space(8.0);

            let state = &self.state;
            ui.columns(2, |columns: &mut [Ui]| {
                cards::card(&mut columns[0], "Bill length and depth", |ui: &mut Ui| {
                    plot::scatter_plot(ui, &state.chart, &state.colors);
                });
                cards::card(&mut columns[1], "Penguin data", |ui: &mut Ui| {
                    table::data_grid(ui, &state.table, &mut events);
                });
            });
        });

        if !events.is_empty() {
            self.state.apply_all(events);
            ctx.request_repaint();
        }
    }
}
