use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::DataError;
use super::model::{Dataset, Penguin, Species};

const SPECIES: &str = "species";
const ISLAND: &str = "island";
const BILL_LENGTH: &str = "bill_length_mm";
const BILL_DEPTH: &str = "bill_depth_mm";
const FLIPPER_LENGTH: &str = "flipper_length_mm";
const BODY_MASS: &str = "body_mass_g";
const SEX: &str = "sex";
const YEAR: &str = "year";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the penguin dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – columns named as in the published `penguins.csv`
/// * `.json`    – `[{ "species": "Adelie", "island": ..., ... }, ...]`
/// * `.csv`     – header row, `NA` or empty cells for missing values
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} penguins ({:?}) from {}",
        dataset.len(),
        dataset.species_present(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell helpers shared by the text formats
// ---------------------------------------------------------------------------

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell == "NA" || cell.eq_ignore_ascii_case("nan")
}

/// Measurements must be finite; `inf` parses as an `f64` but is not a mass.
fn parse_measurement(column: &str, cell: &str) -> Result<Option<f64>, DataError> {
    if is_missing(cell) {
        return Ok(None);
    }
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DataError::BadNumber {
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

fn finite(column: &str, value: Option<f64>) -> Result<Option<f64>, DataError> {
    match value {
        Some(v) if !v.is_finite() => Err(DataError::BadNumber {
            column: column.to_string(),
            value: v.to_string(),
        }),
        _ => Ok(value),
    }
}

fn parse_year(cell: &str) -> Result<Option<i64>, DataError> {
    if is_missing(cell) {
        return Ok(None);
    }
    cell.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| DataError::BadNumber {
            column: YEAR.to_string(),
            value: cell.to_string(),
        })
}

fn parse_text(cell: &str) -> Option<String> {
    (!is_missing(cell)).then(|| cell.trim().to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions located from the CSV header.
struct CsvColumns {
    species: usize,
    island: usize,
    bill_length: usize,
    bill_depth: usize,
    body_mass: usize,
    flipper_length: Option<usize>,
    sex: Option<usize>,
    year: Option<usize>,
}

impl CsvColumns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.into()));

        Ok(CsvColumns {
            species: require(SPECIES)?,
            island: require(ISLAND)?,
            bill_length: require(BILL_LENGTH)?,
            bill_depth: require(BILL_DEPTH)?,
            body_mass: require(BODY_MASS)?,
            flipper_length: find(FLIPPER_LENGTH),
            sex: find(SEX),
            year: find(YEAR),
        })
    }

    fn parse(&self, record: &csv::StringRecord) -> Result<Penguin, DataError> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("");

        Ok(Penguin {
            species: cell(self.species).parse()?,
            island: parse_text(cell(self.island)),
            bill_length_mm: parse_measurement(BILL_LENGTH, cell(self.bill_length))?,
            bill_depth_mm: parse_measurement(BILL_DEPTH, cell(self.bill_depth))?,
            flipper_length_mm: parse_measurement(FLIPPER_LENGTH, optional(self.flipper_length))?,
            body_mass_g: parse_measurement(BODY_MASS, cell(self.body_mass))?,
            sex: parse_text(optional(self.sex)),
            year: parse_year(optional(self.year))?,
        })
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = CsvColumns::locate(&headers)?;

    let mut penguins = Vec::new();
    // Rows count from 1; the header is line 1 of the file.
    for (idx, result) in reader.records().enumerate() {
        let row_no = idx + 1;
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let line = record.position().map_or(row_no as u64 + 1, |pos| pos.line());
        let penguin = columns
            .parse(&record)
            .with_context(|| format!("CSV row {row_no} (line {line})"))?;
        penguins.push(penguin);
    }

    Ok(Dataset::from_penguins(penguins))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One element of a records-oriented JSON export
/// (`df.to_json(orient="records")`). `null` becomes `None`.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    species: String,
    #[serde(default)]
    island: Option<String>,
    bill_length_mm: Option<f64>,
    bill_depth_mm: Option<f64>,
    #[serde(default)]
    flipper_length_mm: Option<f64>,
    body_mass_g: Option<f64>,
    #[serde(default)]
    sex: Option<String>,
    #[serde(default)]
    year: Option<i64>,
}

impl TryFrom<JsonRecord> for Penguin {
    type Error = DataError;

    fn try_from(rec: JsonRecord) -> Result<Self, Self::Error> {
        Ok(Penguin {
            species: rec.species.parse()?,
            island: rec.island,
            bill_length_mm: finite(BILL_LENGTH, rec.bill_length_mm)?,
            bill_depth_mm: finite(BILL_DEPTH, rec.bill_depth_mm)?,
            flipper_length_mm: finite(FLIPPER_LENGTH, rec.flipper_length_mm)?,
            body_mass_g: finite(BODY_MASS, rec.body_mass_g)?,
            sex: rec.sex,
            year: rec.year,
        })
    }
}

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<JsonRecord> =
        serde_json::from_str(&text).context("parsing JSON (expected an array of records)")?;

    let penguins = records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| Penguin::try_from(rec).with_context(|| format!("JSON record {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_penguins(penguins))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Columns are cast up front: measurements to Float64, `year` to Int64 and
/// text columns to Utf8, so dictionary-encoded categoricals and integer
/// masses are accepted. Numeric columns stored as text are rejected rather
/// than parsed.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut penguins = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut penguins)?;
    }

    Ok(Dataset::from_penguins(penguins))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<Penguin>) -> Result<()> {
    let species = required(batch, SPECIES, &DataType::Utf8)?;
    let island = required(batch, ISLAND, &DataType::Utf8)?;
    let bill_length = required(batch, BILL_LENGTH, &DataType::Float64)?;
    let bill_depth = required(batch, BILL_DEPTH, &DataType::Float64)?;
    let body_mass = required(batch, BODY_MASS, &DataType::Float64)?;
    let flipper_length = optional(batch, FLIPPER_LENGTH, &DataType::Float64)?;
    let sex = optional(batch, SEX, &DataType::Utf8)?;
    let year = optional(batch, YEAR, &DataType::Int64)?;

    for row in 0..batch.num_rows() {
        let penguin = Penguin {
            species: text_at(&species, row)
                .ok_or_else(|| DataError::UnknownSpecies("<null>".into()))?
                .parse()?,
            island: text_at(&island, row),
            bill_length_mm: measurement_at(&bill_length, BILL_LENGTH, row)?,
            bill_depth_mm: measurement_at(&bill_depth, BILL_DEPTH, row)?,
            flipper_length_mm: match &flipper_length {
                Some(c) => measurement_at(c, FLIPPER_LENGTH, row)?,
                None => None,
            },
            body_mass_g: measurement_at(&body_mass, BODY_MASS, row)?,
            sex: sex.as_ref().and_then(|c| text_at(c, row)),
            year: year.as_ref().and_then(|c| i64_at(c, row)),
        };
        out.push(penguin);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn required(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    optional(batch, name, to)?.ok_or_else(|| DataError::MissingColumn(name.into()).into())
}

fn optional(batch: &RecordBatch, name: &str, to: &DataType) -> Result<Option<ArrayRef>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    if col.data_type() == to {
        return Ok(Some(Arc::clone(col)));
    }
    let unsupported = || DataError::UnsupportedType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    };
    if to.is_numeric() && !col.data_type().is_numeric() {
        return Err(unsupported().into());
    }
    // Unsafe cast: a value that does not fit fails instead of becoming null.
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let cast_col = cast_with_options(col, to, &options).map_err(|_| unsupported())?;
    Ok(Some(cast_col))
}

fn text_at(col: &ArrayRef, row: usize) -> Option<String> {
    (!col.is_null(row)).then(|| col.as_string::<i32>().value(row).to_string())
}

/// NaN is how Pandas writes a missing float; infinities are errors.
fn measurement_at(col: &ArrayRef, name: &str, row: usize) -> Result<Option<f64>, DataError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = col.as_primitive::<Float64Type>().value(row);
    if v.is_nan() {
        return Ok(None);
    }
    finite(name, Some(v))
}

fn i64_at(col: &ArrayRef, row: usize) -> Option<i64> {
    (!col.is_null(row)).then(|| col.as_primitive::<Int64Type>().value(row))
}
