use std::ops::Bound;

use super::model::Penguin;

// ---------------------------------------------------------------------------
// Grid columns: the fixed projection shown in the data table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumn {
    Species,
    Island,
    BillLength,
    BillDepth,
    BodyMass,
}

impl GridColumn {
    pub const ALL: [GridColumn; 5] = [
        GridColumn::Species,
        GridColumn::Island,
        GridColumn::BillLength,
        GridColumn::BillDepth,
        GridColumn::BodyMass,
    ];

    pub fn header(self) -> &'static str {
        match self {
            GridColumn::Species => "species",
            GridColumn::Island => "island",
            GridColumn::BillLength => "bill_length_mm",
            GridColumn::BillDepth => "bill_depth_mm",
            GridColumn::BodyMass => "body_mass_g",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, GridColumn::Species | GridColumn::Island)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Text shown for a missing cell.
pub const MISSING_CELL: &str = "NA";

/// One projected row, pre-rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    cells: [String; 5],
    numbers: [Option<f64>; 5],
}

impl GridRow {
    pub fn from_penguin(p: &Penguin) -> Self {
        let numbers = [
            None,
            None,
            p.bill_length_mm,
            p.bill_depth_mm,
            p.body_mass_g,
        ];
        GridRow {
            cells: [
                p.species.to_string(),
                p.island.clone().unwrap_or_else(|| MISSING_CELL.to_string()),
                format_number(p.bill_length_mm, 1),
                format_number(p.bill_depth_mm, 1),
                format_number(p.body_mass_g, 0),
            ],
            numbers,
        }
    }

    pub fn cell(&self, column: GridColumn) -> &str {
        &self.cells[column.index()]
    }

    pub fn number(&self, column: GridColumn) -> Option<f64> {
        self.numbers[column.index()]
    }
}

fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => MISSING_CELL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Column filters
// ---------------------------------------------------------------------------

/// A parsed per-column query.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    Any,
    /// Case-insensitive substring, stored lowercased.
    Contains(String),
    Range(Bound<f64>, Bound<f64>),
}

impl ColumnFilter {
    /// Parse the text typed into a column's filter box.
    ///
    /// Numeric columns understand `lo..hi` (inclusive, either side may be
    /// omitted), `<x`, `<=x`, `>x`, `>=x` and `=x`. Anything else, and every
    /// query on a text column, is a substring match.
    pub fn parse(query: &str, column: GridColumn) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return ColumnFilter::Any;
        }
        if column.is_numeric() {
            if let Some(filter) = parse_numeric(query) {
                return filter;
            }
        }
        ColumnFilter::Contains(query.to_lowercase())
    }

    pub fn matches(&self, text: &str, number: Option<f64>) -> bool {
        match self {
            ColumnFilter::Any => true,
            ColumnFilter::Contains(needle) => text.to_lowercase().contains(needle.as_str()),
            ColumnFilter::Range(lower, upper) => {
                number.is_some_and(|v| above(v, *lower) && below(v, *upper))
            }
        }
    }
}

fn above(v: f64, lower: Bound<f64>) -> bool {
    match lower {
        Bound::Included(lo) => v >= lo,
        Bound::Excluded(lo) => v > lo,
        Bound::Unbounded => true,
    }
}

fn below(v: f64, upper: Bound<f64>) -> bool {
    match upper {
        Bound::Included(hi) => v <= hi,
        Bound::Excluded(hi) => v < hi,
        Bound::Unbounded => true,
    }
}

fn parse_numeric(query: &str) -> Option<ColumnFilter> {
    let number = |s: &str| s.trim().parse::<f64>().ok();

    // Two-character operators first so "<=" is not read as "<" + "=5".
    if let Some(rest) = query.strip_prefix("<=") {
        return Some(ColumnFilter::Range(Bound::Unbounded, Bound::Included(number(rest)?)));
    }
    if let Some(rest) = query.strip_prefix(">=") {
        return Some(ColumnFilter::Range(Bound::Included(number(rest)?), Bound::Unbounded));
    }
    if let Some(rest) = query.strip_prefix('<') {
        return Some(ColumnFilter::Range(Bound::Unbounded, Bound::Excluded(number(rest)?)));
    }
    if let Some(rest) = query.strip_prefix('>') {
        return Some(ColumnFilter::Range(Bound::Excluded(number(rest)?), Bound::Unbounded));
    }
    if let Some(rest) = query.strip_prefix('=') {
        let v = number(rest)?;
        return Some(ColumnFilter::Range(Bound::Included(v), Bound::Included(v)));
    }
    if let Some((lo, hi)) = query.split_once("..") {
        let side = |s: &str| -> Option<Bound<f64>> {
            if s.trim().is_empty() {
                Some(Bound::Unbounded)
            } else {
                number(s).map(Bound::Included)
            }
        };
        return Some(ColumnFilter::Range(side(lo)?, side(hi)?));
    }
    None
}

/// Filter text and parsed queries for every grid column.
#[derive(Debug, Clone)]
pub struct GridFilters {
    queries: [String; 5],
    parsed: [ColumnFilter; 5],
}

impl Default for GridFilters {
    fn default() -> Self {
        GridFilters {
            queries: Default::default(),
            parsed: std::array::from_fn(|_| ColumnFilter::Any),
        }
    }
}

impl GridFilters {
    pub fn query(&self, column: GridColumn) -> &str {
        &self.queries[column.index()]
    }

    /// Replace a column's query. Returns whether the text changed.
    pub fn set_query(&mut self, column: GridColumn, query: String) -> bool {
        let i = column.index();
        if self.queries[i] == query {
            return false;
        }
        self.parsed[i] = ColumnFilter::parse(&query, column);
        self.queries[i] = query;
        true
    }

    pub fn is_active(&self) -> bool {
        self.parsed.iter().any(|f| *f != ColumnFilter::Any)
    }

    pub fn matches(&self, row: &GridRow) -> bool {
        GridColumn::ALL
            .iter()
            .all(|&c| self.parsed[c.index()].matches(row.cell(c), row.number(c)))
    }
}
