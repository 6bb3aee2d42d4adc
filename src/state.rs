use std::sync::Arc;

use crate::color::SpeciesColors;
use crate::config::DashboardConfig;
use crate::data::filter::{compute_filtered, FilterState, FilteredDataset, MassRange};
use crate::data::grid::GridColumn;
use crate::data::model::{Dataset, Species};
use crate::outputs::{ChartOutput, Output, SummaryOutput, TableOutput};
use crate::reactive::Memo;
use crate::theme::{ThemeMode, ThemeSwitch};

// ---------------------------------------------------------------------------
// Session: filter inputs and the memoized filtered view
// ---------------------------------------------------------------------------

/// Per-user reactive state. The dataset is shared; the filter state and the
/// cache belong to this session alone.
#[derive(Debug)]
pub struct Session {
    dataset: Arc<Dataset>,
    filters: FilterState,
    filtered: Memo<FilteredDataset>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, filters: FilterState) -> Self {
        Session {
            dataset,
            filters,
            filtered: Memo::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Mutate the filter state. `change` reports whether anything actually
    /// changed; only then is the cached view invalidated.
    pub fn update(&mut self, change: impl FnOnce(&mut FilterState) -> bool) -> bool {
        let changed = change(&mut self.filters);
        if changed {
            self.filtered.invalidate();
        }
        changed
    }

    /// The filtered view for the current state, computed at most once per
    /// state change.
    pub fn filtered(&mut self) -> Arc<FilteredDataset> {
        let Session {
            dataset,
            filters,
            filtered,
        } = self;
        filtered.get_or_compute(|| {
            let view = compute_filtered(dataset, filters.mass_bound, &filters.species);
            log::debug!(
                "Filtered {} of {} penguins (mass < {}, species {:?})",
                view.len(),
                dataset.len(),
                filters.mass_bound,
                filters.species
            );
            view
        })
    }

    pub fn recomputations(&self) -> u64 {
        self.filtered.computations()
    }
}

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// A single user interaction, collected while widgets render and applied
/// afterwards, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SetMassBound(f64),
    SetSpecies(Species, bool),
    SelectAllSpecies,
    SelectNoSpecies,
    SetGridQuery(GridColumn, String),
    SetDarkMode(bool),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub mass_range: MassRange,
    pub summary: SummaryOutput,
    pub chart: ChartOutput,
    pub table: TableOutput,
    pub colors: SpeciesColors,
    pub theme: ThemeSwitch,
}

impl AppState {
    /// Build the dashboard around a loaded dataset and publish the initial
    /// snapshot to every output.
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let mass_range = MassRange::fit(config.mass_min, config.mass_max, &dataset);
        let filters = FilterState::new(mass_range.max);

        let mut state = AppState {
            session: Session::new(dataset, filters),
            mass_range,
            summary: SummaryOutput::default(),
            chart: ChartOutput::default(),
            table: TableOutput::default(),
            colors: SpeciesColors::default(),
            theme: ThemeSwitch::new(ThemeMode::from_dark_mode(config.dark_mode)),
        };
        state.publish();
        state
    }

    /// Apply one event to completion.
    pub fn apply(&mut self, event: UiEvent) {
        let filters_changed = match event {
            UiEvent::SetMassBound(bound) => {
                let bound = bound.clamp(self.mass_range.min, self.mass_range.max);
                self.session.update(|f| f.set_mass_bound(bound))
            }
            UiEvent::SetSpecies(species, selected) => self
                .session
                .update(|f| f.set_species_selected(species, selected)),
            UiEvent::SelectAllSpecies => self.session.update(FilterState::select_all_species),
            UiEvent::SelectNoSpecies => self.session.update(FilterState::clear_species),
            UiEvent::SetGridQuery(column, query) => {
                self.table.set_query(column, query);
                false
            }
            UiEvent::SetDarkMode(dark) => {
                self.theme.set_dark_mode(dark);
                false
            }
        };

        if filters_changed {
            self.publish();
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = UiEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Read the filtered view once and hand the same snapshot to every output.
    fn publish(&mut self) {
        let snapshot = self.session.filtered();
        if snapshot.is_empty() {
            log::debug!("Current filters exclude every penguin");
        }

        let mut outputs: [&mut dyn Output; 3] =
            [&mut self.summary, &mut self.chart, &mut self.table];
        for output in outputs.iter_mut() {
            output.refresh(&snapshot);
        }
        debug_assert!(outputs
            .iter()
            .all(|o| o.snapshot().is_some_and(|s| Arc::ptr_eq(s, &snapshot))));
        log::debug!(
            "Published snapshot {} ({} rows)",
            self.session.recomputations(),
            snapshot.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Penguin;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_penguins(vec![
            Penguin::measured(Species::Adelie, "Torgersen", 39.1, 18.7, 3000.0),
            Penguin::measured(Species::Gentoo, "Biscoe", 46.5, 14.8, 5000.0),
            Penguin::measured(Species::Chinstrap, "Dream", 49.0, 19.5, 3950.0),
        ]))
    }

    fn app() -> AppState {
        AppState::new(dataset(), &DashboardConfig::default())
    }

    fn assert_consistent(state: &AppState) {
        let s = state.summary.snapshot().unwrap();
        let c = state.chart.snapshot().unwrap();
        let t = state.table.snapshot().unwrap();
        assert!(Arc::ptr_eq(s, c) && Arc::ptr_eq(c, t));
        assert_eq!(state.summary.summary.count, s.len());
        assert_eq!(state.table.total(), s.len());
    }

    #[test]
    fn initial_state_shows_everything() {
        let state = app();
        assert_eq!(state.mass_range, MassRange { min: 2000.0, max: 6000.0 });
        assert_eq!(state.session.filters().mass_bound, 6000.0);
        assert_eq!(state.summary.summary.count, 3);
        assert_eq!(state.session.recomputations(), 1);
        assert_consistent(&state);
    }

    #[test]
    fn one_recomputation_per_change() {
        let mut state = app();
        state.apply(UiEvent::SetMassBound(4000.0));
        assert_eq!(state.session.recomputations(), 2);
        assert_eq!(state.summary.summary.count, 2);
        assert_consistent(&state);

        // Re-reading within the same state reuses the cached view.
        let a = state.session.filtered();
        let b = state.session.filtered();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(state.session.recomputations(), 2);

        // No-op events do not invalidate.
        state.apply(UiEvent::SetMassBound(4000.0));
        state.apply(UiEvent::SelectAllSpecies);
        assert_eq!(state.session.recomputations(), 2);
    }

    #[test]
    fn scenario_adelie_only() {
        let mut state = app();
        state.apply_all([
            UiEvent::SetSpecies(Species::Gentoo, false),
            UiEvent::SetSpecies(Species::Chinstrap, false),
        ]);
        assert_eq!(state.summary.summary.count_text(), "1");
        assert_eq!(state.summary.summary.bill_length_text(), "39.1 mm");
        assert_eq!(state.chart.point_count(), 1);
        assert_consistent(&state);
    }

    #[test]
    fn clearing_species_degrades_gracefully() {
        let mut state = app();
        state.apply(UiEvent::SelectNoSpecies);
        assert_eq!(state.summary.summary.count, 0);
        assert_eq!(state.summary.summary.bill_depth_text(), "N/A");
        assert!(state.chart.series.is_empty());
        assert_eq!(state.table.visible_len(), 0);

        state.apply(UiEvent::SelectAllSpecies);
        assert_eq!(state.summary.summary.count, 3);
    }

    #[test]
    fn grid_and_theme_events_leave_the_filtered_view_alone() {
        let mut state = app();
        state.apply(UiEvent::SetGridQuery(GridColumn::Species, "gen".into()));
        state.apply(UiEvent::SetDarkMode(true));

        assert_eq!(state.session.recomputations(), 1);
        assert_eq!(state.summary.summary.count, 3);
        assert_eq!(state.table.visible_len(), 1);
        assert!(state.theme.current().is_dark());
    }

    #[test]
    fn mass_bound_is_clamped_to_slider_range() {
        let mut state = app();
        state.apply(UiEvent::SetMassBound(100.0));
        assert_eq!(state.session.filters().mass_bound, 2000.0);
        assert_eq!(state.summary.summary.count, 0);
    }

    #[test]
    fn sessions_share_data_but_not_state() {
        let ds = dataset();
        let config = DashboardConfig::default();
        let mut a = AppState::new(Arc::clone(&ds), &config);
        let b = AppState::new(Arc::clone(&ds), &config);

        a.apply(UiEvent::SelectNoSpecies);
        assert_eq!(a.summary.summary.count, 0);
        assert_eq!(b.summary.summary.count, 3);
        assert!(Arc::ptr_eq(a.session.dataset(), b.session.dataset()));
    }
}
