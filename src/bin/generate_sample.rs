//! Writes a synthetic Palmer-like penguin dataset to `data/penguins.parquet`.
//!
//! The numbers are drawn from per-species normal distributions; they are not
//! the published measurements. Point `PENGUINS_DATA` at the real
//! `penguins.csv` to use those instead.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const OUTPUT_PATH: &str = "data/penguins.parquet";

/// Per-species sampling parameters: (mean, std-dev) for each measurement.
struct SpeciesProfile {
    name: &'static str,
    count: usize,
    islands: &'static [&'static str],
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper_length: (f64, f64),
    body_mass: (f64, f64),
}

const PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        count: 152,
        islands: &["Torgersen", "Biscoe", "Dream"],
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
    },
    SpeciesProfile {
        name: "Gentoo",
        count: 124,
        islands: &["Biscoe"],
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.0, 6.5),
        body_mass: (5076.0, 504.0),
    },
    SpeciesProfile {
        name: "Chinstrap",
        count: 68,
        islands: &["Dream"],
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (196.0, 7.1),
        body_mass: (3733.0, 384.0),
    },
];

const YEARS: [i64; 3] = [2007, 2008, 2009];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, (mean, std_dev): (f64, f64)) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One rounded measurement, or `None` for an unmeasured bird.
fn sample(rng: &mut SimpleRng, measured: bool, params: (f64, f64), step: f64) -> Option<f64> {
    measured.then(|| (rng.gauss(params) / step).round() * step)
}

#[derive(Default)]
struct Columns {
    species: Vec<&'static str>,
    island: Vec<&'static str>,
    bill_length: Vec<Option<f64>>,
    bill_depth: Vec<Option<f64>>,
    flipper_length: Vec<Option<f64>>,
    body_mass: Vec<Option<f64>>,
    sex: Vec<Option<&'static str>>,
    year: Vec<i64>,
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();

    for profile in &PROFILES {
        for i in 0..profile.count {
            // One unmeasured bird per species, like the field data.
            let measured = i != 3;

            cols.species.push(profile.name);
            cols.island.push(*rng.pick(profile.islands));
            cols.bill_length.push(sample(rng, measured, profile.bill_length, 0.1));
            cols.bill_depth.push(sample(rng, measured, profile.bill_depth, 0.1));
            cols.flipper_length.push(sample(rng, measured, profile.flipper_length, 1.0));
            cols.body_mass.push(sample(rng, measured, profile.body_mass, 25.0));
            cols.sex.push(measured.then(|| *rng.pick(&["female", "male"])));
            cols.year.push(*rng.pick(&YEARS));
        }
    }
    cols
}

fn write_parquet(path: &Path, cols: Columns) -> Result<usize> {
    let rows = cols.species.len();
    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.species)),
            Arc::new(StringArray::from(cols.island)),
            Arc::new(Float64Array::from(cols.bill_length)),
            Arc::new(Float64Array::from(cols.bill_depth)),
            Arc::new(Float64Array::from(cols.flipper_length)),
            Arc::new(Float64Array::from(cols.body_mass)),
            Arc::new(StringArray::from(cols.sex)),
            Arc::new(Int64Array::from(cols.year)),
        ],
    )
    .context("building record batch")?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);
    let rows = write_parquet(Path::new(OUTPUT_PATH), cols)?;

    log::info!("Wrote {rows} synthetic penguins to {OUTPUT_PATH}");
    println!("Wrote {rows} synthetic penguins to {OUTPUT_PATH}");
    Ok(())
}
