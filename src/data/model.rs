use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Species – the closed category domain
// ---------------------------------------------------------------------------

/// The three penguin species of the Palmer Archipelago study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    /// All species, in the order the filter controls list them.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn label(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Chinstrap => "Chinstrap",
            Species::Gentoo => "Gentoo",
        }
    }
}

impl FromStr for Species {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Adelie" => Ok(Species::Adelie),
            "Chinstrap" => Ok(Species::Chinstrap),
            "Gentoo" => Ok(Species::Gentoo),
            other => Err(DataError::UnknownSpecies(other.to_string())),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the dataset
// ---------------------------------------------------------------------------

/// One measured individual.
///
/// Measurements are optional because the published dataset contains `NA`
/// cells. A missing body mass never passes a mass filter and missing
/// lengths are skipped by the summary means. Island and sex follow the
/// same rule: a missing cell is `None` whatever the file format.
#[derive(Debug, Clone, PartialEq)]
pub struct Penguin {
    pub species: Species,
    pub island: Option<String>,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<String>,
    pub year: Option<i64>,
}

#[cfg(test)]
impl Penguin {
    /// A record with only the fields the dashboard outputs care about.
    pub fn measured(
        species: Species,
        island: &str,
        bill_length_mm: f64,
        bill_depth_mm: f64,
        body_mass_g: f64,
    ) -> Self {
        Penguin {
            species,
            island: Some(island.to_string()),
            bill_length_mm: Some(bill_length_mm),
            bill_depth_mm: Some(bill_depth_mm),
            flipper_length_mm: None,
            body_mass_g: Some(body_mass_g),
            sex: None,
            year: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded dataset. Never mutated after construction; shared through
/// `Arc<Dataset>` by every session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    penguins: Vec<Penguin>,
}

impl Dataset {
    pub fn from_penguins(penguins: Vec<Penguin>) -> Self {
        Dataset { penguins }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.penguins.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.penguins.is_empty()
    }

    pub fn penguins(&self) -> &[Penguin] {
        &self.penguins
    }

    pub fn get(&self, index: usize) -> Option<&Penguin> {
        self.penguins.get(index)
    }

    /// Largest body mass present in the data, if any record has one.
    pub fn max_body_mass(&self) -> Option<f64> {
        self.penguins
            .iter()
            .filter_map(|p| p.body_mass_g)
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))))
    }

    /// Species that occur at least once.
    pub fn species_present(&self) -> BTreeSet<Species> {
        self.penguins.iter().map(|p| p.species).collect()
    }
}
