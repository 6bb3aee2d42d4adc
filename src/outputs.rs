use std::sync::Arc;

use crate::data::filter::FilteredDataset;
use crate::data::grid::{GridColumn, GridFilters, GridRow};
use crate::data::model::Species;
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Output consumers of the filtered snapshot
// ---------------------------------------------------------------------------

/// A read-only consumer re-invoked with the new snapshot after every filter
/// change. Rendering reads the consumer's cached projection each frame.
pub trait Output {
    fn refresh(&mut self, snapshot: &Arc<FilteredDataset>);

    /// The snapshot this output last derived from.
    fn snapshot(&self) -> Option<&Arc<FilteredDataset>>;
}

/// Count plus the two bill means.
#[derive(Debug, Default)]
pub struct SummaryOutput {
    snapshot: Option<Arc<FilteredDataset>>,
    pub summary: Summary,
}

impl Output for SummaryOutput {
    fn refresh(&mut self, snapshot: &Arc<FilteredDataset>) {
        self.summary = Summary::of(snapshot);
        self.snapshot = Some(Arc::clone(snapshot));
    }

    fn snapshot(&self) -> Option<&Arc<FilteredDataset>> {
        self.snapshot.as_ref()
    }
}

/// Scatter points for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesSeries {
    pub species: Species,
    /// `[bill_length_mm, bill_depth_mm]`
    pub points: Vec<[f64; 2]>,
}

/// Bill length vs. bill depth, grouped by species.
#[derive(Debug, Default)]
pub struct ChartOutput {
    snapshot: Option<Arc<FilteredDataset>>,
    pub series: Vec<SpeciesSeries>,
}

impl ChartOutput {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

impl Output for ChartOutput {
    fn refresh(&mut self, snapshot: &Arc<FilteredDataset>) {
        self.series = Species::ALL
            .into_iter()
            .map(|species| SpeciesSeries {
                species,
                points: snapshot
                    .rows()
                    .filter(|p| p.species == species)
                    .filter_map(|p| Some([p.bill_length_mm?, p.bill_depth_mm?]))
                    .collect(),
            })
            .filter(|s| !s.points.is_empty())
            .collect();
        self.snapshot = Some(Arc::clone(snapshot));
    }

    fn snapshot(&self) -> Option<&Arc<FilteredDataset>> {
        self.snapshot.as_ref()
    }
}

/// The data grid: projected rows plus column filters local to the grid.
#[derive(Debug, Default)]
pub struct TableOutput {
    snapshot: Option<Arc<FilteredDataset>>,
    rows: Vec<GridRow>,
    filters: GridFilters,
    visible: Vec<usize>,
}

impl TableOutput {
    /// Total rows in the filtered snapshot, before column filters.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// The `n`th row passing the column filters, in dataset order.
    pub fn visible_row(&self, n: usize) -> Option<&GridRow> {
        self.visible.get(n).map(|&i| &self.rows[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn query(&self, column: GridColumn) -> &str {
        self.filters.query(column)
    }

    pub fn has_column_filters(&self) -> bool {
        self.filters.is_active()
    }

    pub fn set_query(&mut self, column: GridColumn, query: String) {
        if self.filters.set_query(column, query) {
            self.apply_filters();
        }
    }

    fn apply_filters(&mut self) {
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.filters.matches(row))
            .map(|(i, _)| i)
            .collect();
    }
}

impl Output for TableOutput {
    fn refresh(&mut self, snapshot: &Arc<FilteredDataset>) {
        self.rows = snapshot.rows().map(GridRow::from_penguin).collect();
        self.apply_filters();
        self.snapshot = Some(Arc::clone(snapshot));
    }

    fn snapshot(&self) -> Option<&Arc<FilteredDataset>> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::compute_filtered;
    use crate::data::model::{Dataset, Penguin};

    fn snapshot(species: &[Species]) -> Arc<FilteredDataset> {
        let mut no_bill = Penguin::measured(Species::Adelie, "Dream", 0.0, 0.0, 3300.0);
        no_bill.bill_depth_mm = None;
        let ds = Arc::new(Dataset::from_penguins(vec![
            Penguin::measured(Species::Adelie, "Torgersen", 39.1, 18.7, 3000.0),
            Penguin::measured(Species::Gentoo, "Biscoe", 46.5, 14.8, 5000.0),
            no_bill,
            Penguin::measured(Species::Chinstrap, "Dream", 49.0, 19.5, 3950.0),
        ]));
        let set: BTreeSet<_> = species.iter().copied().collect();
        Arc::new(compute_filtered(&ds, 6000.0, &set))
    }

    #[test]
    fn chart_groups_by_species_and_skips_incomplete_points() {
        let mut chart = ChartOutput::default();
        chart.refresh(&snapshot(&Species::ALL));
        assert_eq!(chart.point_count(), 3);
        let adelie = chart.series.iter().find(|s| s.species == Species::Adelie).unwrap();
        assert_eq!(adelie.points, vec![[39.1, 18.7]]);
    }

    #[test]
    fn empty_snapshot_gives_empty_outputs() {
        let empty = snapshot(&[]);
        let mut summary = SummaryOutput::default();
        let mut chart = ChartOutput::default();
        let mut table = TableOutput::default();
        summary.refresh(&empty);
        chart.refresh(&empty);
        table.refresh(&empty);

        assert_eq!(summary.summary.count, 0);
        assert!(chart.series.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.visible_len(), 0);
    }

    #[test]
    fn table_keeps_column_filters_across_refreshes() {
        let mut table = TableOutput::default();
        table.refresh(&snapshot(&Species::ALL));
        assert_eq!(table.total(), 4);

        table.set_query(GridColumn::Island, "dream".into());
        let species: Vec<_> = (0..table.visible_len())
            .filter_map(|n| table.visible_row(n))
            .map(|r| r.cell(GridColumn::Species).to_string())
            .collect();
        assert_eq!(species, ["Adelie", "Chinstrap"]);

        table.refresh(&snapshot(&[Species::Chinstrap, Species::Gentoo]));
        assert_eq!(table.total(), 2);
        assert_eq!(table.visible_len(), 1);
        assert_eq!(
            table.visible_row(0).map(|r| r.cell(GridColumn::BodyMass)),
            Some("3950")
        );
        assert_eq!(table.query(GridColumn::Island), "dream");
    }
}
