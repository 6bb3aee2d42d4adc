use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Species;
use crate::state::{AppState, UiEvent};

/// Sidebar links: (label, url).
const LINKS: [(&str, &str); 6] = [
    ("GitHub Source", "https://github.com/denisecase/cintel-07-tdash"),
    ("GitHub App", "https://denisecase.github.io/cintel-07-tdash/"),
    ("GitHub Issues", "https://github.com/denisecase/cintel-07-tdash/issues"),
    ("PyShiny", "https://shiny.posit.co/py/"),
    ("Template: Basic Dashboard", "https://shiny.posit.co/py/templates/dashboard/"),
    ("See also", "https://github.com/denisecase/pyshiny-penguins-dashboard-express"),
];

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    ui.heading("Filter controls");
    ui.label(format!("{} penguins loaded", state.session.dataset().len()));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            mass_slider(ui, state, events);
            ui.add_space(8.0);
            species_checkboxes(ui, state, events);
            ui.add_space(8.0);
            dark_mode_toggle(ui, state, events);

            ui.separator();
            ui.label(RichText::new("Links").strong().small());
            for (label, url) in LINKS {
                ui.hyperlink_to(label, url);
            }
        });
}

fn mass_slider(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    let range = state.mass_range;
    let mut bound = state.session.filters().mass_bound;

    ui.strong("Mass");
    let slider = egui::Slider::new(&mut bound, range.min..=range.max)
        .step_by(1.0)
        .suffix(" g");
    if ui.add(slider).changed() {
        events.push(UiEvent::SetMassBound(bound));
    }
}

fn species_checkboxes(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    let selected = &state.session.filters().species;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Species");
        if ui.small_button("All").clicked() {
            events.push(UiEvent::SelectAllSpecies);
        }
        if ui.small_button("None").clicked() {
            events.push(UiEvent::SelectNoSpecies);
        }
    });

    for species in Species::ALL {
        let mut checked = selected.contains(&species);
        let text = RichText::new(species.label()).color(state.colors.color_for(species));
        if ui.checkbox(&mut checked, text).changed() {
            events.push(UiEvent::SetSpecies(species, checked));
        }
    }
}

fn dark_mode_toggle(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    let current = state.theme.current().is_dark();
    let mut dark = current;

    ui.strong("Dark mode");
    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut dark, true, "Yes");
        ui.radio_value(&mut dark, false, "No");
    });
    if dark != current {
        events.push(UiEvent::SetDarkMode(dark));
    }
}
