use super::filter::FilteredDataset;

/// Placeholder shown for a mean over zero values.
pub const MISSING_MEAN: &str = "N/A";

/// Scalar summaries of a filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_bill_length_mm: Option<f64>,
    pub mean_bill_depth_mm: Option<f64>,
}

impl Summary {
    pub fn of(filtered: &FilteredDataset) -> Self {
        Summary {
            count: filtered.len(),
            mean_bill_length_mm: mean(filtered.rows().filter_map(|p| p.bill_length_mm)),
            mean_bill_depth_mm: mean(filtered.rows().filter_map(|p| p.bill_depth_mm)),
        }
    }

    pub fn count_text(&self) -> String {
        self.count.to_string()
    }

    pub fn bill_length_text(&self) -> String {
        format_mm(self.mean_bill_length_mm)
    }

    pub fn bill_depth_text(&self) -> String {
        format_mm(self.mean_bill_depth_mm)
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// `"39.1 mm"`, or [`MISSING_MEAN`] when there is nothing to average.
pub fn format_mm(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1} mm"),
        None => MISSING_MEAN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::compute_filtered;
    use crate::data::model::{Dataset, Penguin, Species};

    fn dataset() -> Arc<Dataset> {
        let mut no_bill = Penguin::measured(Species::Chinstrap, "Dream", 0.0, 0.0, 3600.0);
        no_bill.bill_length_mm = None;
        no_bill.bill_depth_mm = None;
        Arc::new(Dataset::from_penguins(vec![
            Penguin::measured(Species::Adelie, "Torgersen", 39.1, 18.7, 3000.0),
            Penguin::measured(Species::Gentoo, "Biscoe", 46.5, 14.8, 5000.0),
            Penguin::measured(Species::Adelie, "Dream", 40.0, 18.0, 3800.0),
            no_bill,
        ]))
    }

    #[test]
    fn scenario_adelie_only() {
        let ds = Arc::new(Dataset::from_penguins(dataset().penguins()[..2].to_vec()));
        let filtered = compute_filtered(&ds, 6000.0, &BTreeSet::from([Species::Adelie]));
        let summary = Summary::of(&filtered);
        assert_eq!(summary.count_text(), "1");
        assert_eq!(summary.bill_length_text(), "39.1 mm");
        assert_eq!(summary.bill_depth_text(), "18.7 mm");
    }

    #[test]
    fn count_matches_rows_and_means_skip_missing() {
        let ds = dataset();
        let all: BTreeSet<_> = Species::ALL.into_iter().collect();
        let filtered = compute_filtered(&ds, 6000.0, &all);
        let summary = Summary::of(&filtered);
        assert_eq!(summary.count, filtered.len());
        assert_eq!(summary.count, 4);

        let expected = (39.1 + 46.5 + 40.0) / 3.0;
        let got = summary.mean_bill_length_mm.unwrap();
        assert!((got - expected).abs() < 1e-9);
        assert_eq!(summary.bill_length_text(), format!("{expected:.1} mm"));
    }

    #[test]
    fn empty_selection_degrades_to_placeholders() {
        let ds = dataset();
        let filtered = compute_filtered(&ds, 6000.0, &BTreeSet::new());
        let summary = Summary::of(&filtered);
        assert_eq!(summary.count_text(), "0");
        assert_eq!(summary.bill_length_text(), MISSING_MEAN);
        assert_eq!(summary.bill_depth_text(), MISSING_MEAN);
    }

    #[test]
    fn rows_without_bills_give_placeholder_but_still_count() {
        let ds = dataset();
        let filtered = compute_filtered(&ds, 6000.0, &BTreeSet::from([Species::Chinstrap]));
        let summary = Summary::of(&filtered);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean_bill_length_mm, None);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([2.0, 4.0].into_iter()), Some(3.0));
    }
}
