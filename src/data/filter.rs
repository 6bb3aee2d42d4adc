use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Dataset, Penguin, Species};

// ---------------------------------------------------------------------------
// Filter state: the two user-controlled inputs
// ---------------------------------------------------------------------------

/// Current filter inputs: an exclusive upper bound on body mass and the
/// set of selected species.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub mass_bound: f64,
    pub species: BTreeSet<Species>,
}

impl FilterState {
    /// All species selected, mass bounded by `mass_bound`.
    pub fn new(mass_bound: f64) -> Self {
        FilterState {
            mass_bound,
            species: Species::ALL.into_iter().collect(),
        }
    }

    /// Each setter returns whether the state actually changed, so callers
    /// only invalidate derived values on a real transition.
    pub fn set_mass_bound(&mut self, bound: f64) -> bool {
        if self.mass_bound == bound {
            return false;
        }
        self.mass_bound = bound;
        true
    }

    pub fn set_species_selected(&mut self, species: Species, selected: bool) -> bool {
        if selected {
            self.species.insert(species)
        } else {
            self.species.remove(&species)
        }
    }

    pub fn select_all_species(&mut self) -> bool {
        let before = self.species.len();
        self.species.extend(Species::ALL);
        self.species.len() != before
    }

    pub fn clear_species(&mut self) -> bool {
        let changed = !self.species.is_empty();
        self.species.clear();
        changed
    }
}

// ---------------------------------------------------------------------------
// Mass slider range
// ---------------------------------------------------------------------------

/// Range of the body-mass slider. The default bound is `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRange {
    pub min: f64,
    pub max: f64,
}

impl MassRange {
    /// Fit the configured range to the data: if the heaviest penguin is at
    /// or above `max`, widen `max` to the next multiple of 100 strictly
    /// above it so the default state keeps every record. A non-finite
    /// maximum leaves the range as configured.
    pub fn fit(min: f64, max: f64, dataset: &Dataset) -> Self {
        let max = match dataset.max_body_mass() {
            Some(heaviest) if heaviest.is_finite() && heaviest >= max => {
                (heaviest / 100.0).floor() * 100.0 + 100.0
            }
            _ => max,
        };
        MassRange { min, max }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of the shared dataset passing the current filters, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl FilteredDataset {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Penguin> + '_ {
        self.indices
            .iter()
            .filter_map(move |&i| self.dataset.get(i))
    }
}

/// Select the penguins whose species is in `species` and whose body mass is
/// strictly below `mass_bound`. Records without a mass never pass.
pub fn compute_filtered(
    dataset: &Arc<Dataset>,
    mass_bound: f64,
    species: &BTreeSet<Species>,
) -> FilteredDataset {
    let indices = dataset
        .penguins()
        .iter()
        .enumerate()
        .filter(|(_, p)| species.contains(&p.species))
        .filter(|(_, p)| p.body_mass_g.is_some_and(|m| m < mass_bound))
        .map(|(i, _)| i)
        .collect();

    FilteredDataset {
        dataset: Arc::clone(dataset),
        indices,
    }
}
