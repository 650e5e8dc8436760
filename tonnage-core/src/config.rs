//! Engine defaults read from the environment.

use anyhow::{Context, Result, anyhow};

use crate::volume::{RoundingMethod, VolumeOptions, WeightUnit};

pub const UNIT_VAR: &str = "TONNAGE_UNIT";
pub const PRECISION_VAR: &str = "TONNAGE_PRECISION";
pub const ROUNDING_VAR: &str = "TONNAGE_ROUNDING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub default_unit: WeightUnit,
    pub options: VolumeOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads configuration through `get` instead of the process environment,
    /// so tests never touch global state. Unset values keep their defaults;
    /// set but malformed values are errors.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(unit) = get(UNIT_VAR) {
            config.default_unit = unit
                .parse::<WeightUnit>()
                .with_context(|| format!("{} is not a weight unit", UNIT_VAR))?;
        }
        if let Some(precision) = get(PRECISION_VAR) {
            config.options.precision = precision
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{}={:?} is not a precision", PRECISION_VAR, precision))?;
        }
        if let Some(rounding) = get(ROUNDING_VAR) {
            config.options.rounding_method = rounding
                .parse::<RoundingMethod>()
                .map_err(|e| anyhow!("{}: {}", ROUNDING_VAR, e))?;
        }

        Ok(config)
    }
}
