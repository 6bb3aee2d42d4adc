use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DATA_ENV: &str = "PENGUINS_DATA";
pub const DARK_MODE_ENV: &str = "PENGUINS_DARK_MODE";
pub const MASS_MIN_ENV: &str = "PENGUINS_MASS_MIN";
pub const MASS_MAX_ENV: &str = "PENGUINS_MASS_MAX";

/// Startup settings. Defaults can be overridden through environment
/// variables, the same way `RUST_LOG` drives the logger.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Dataset file (`.parquet`, `.json` or `.csv`).
    pub data_path: PathBuf,
    /// Start in dark mode.
    pub dark_mode: bool,
    /// Body-mass slider range in grams.
    pub mass_min: f64,
    pub mass_max: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/penguins.parquet"),
            dark_mode: false,
            mass_min: 2000.0,
            mass_max: 6000.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup(DARK_MODE_ENV) {
            config.dark_mode = parse_flag(DARK_MODE_ENV, &flag)?;
        }
        if let Some(v) = lookup(MASS_MIN_ENV) {
            config.mass_min = parse_grams(MASS_MIN_ENV, &v)?;
        }
        if let Some(v) = lookup(MASS_MAX_ENV) {
            config.mass_max = parse_grams(MASS_MAX_ENV, &v)?;
        }
        if config.mass_min >= config.mass_max {
            bail!(
                "{MASS_MIN_ENV} ({}) must be below {MASS_MAX_ENV} ({})",
                config.mass_min,
                config.mass_max
            );
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{key}: expected yes/no, got '{other}'"),
    }
}

fn parse_grams(key: &str, value: &str) -> Result<f64> {
    let v: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("{key}: '{value}' is not a number"))?;
    if !v.is_finite() || v < 0.0 {
        bail!("{key}: {v} is not a valid mass");
    }
    Ok(v)
}
