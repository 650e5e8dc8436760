//! Engine functions exported to the client tier, so UI running totals and
//! server-persisted totals come from the same code.

pub mod errors;
pub mod logging;
pub mod objects;

use crate::config::Config;
use crate::stats::{self, DateWindow, SessionVolume};
use crate::volume::{self, Set, VolumeOptions};
use errors::TonnageError;
use objects::{FfiSessionVolume, FfiSet, FfiVolumeOptions, FfiVolumeStats, FfiWeightUnit};

fn options_or_default(options: Option<FfiVolumeOptions>) -> VolumeOptions {
    options.map(VolumeOptions::from).unwrap_or_default()
}

#[uniffi::export]
pub fn convert_weight(weight: f64, from_unit: FfiWeightUnit, to_unit: FfiWeightUnit) -> f64 {
    volume::convert_weight(weight, from_unit.into(), to_unit.into())
}

#[uniffi::export]
pub fn calculate_set_volume(weight: f64, reps: u32) -> Result<f64, TonnageError> {
    Ok(volume::calculate_set_volume(weight, reps)?)
}

#[uniffi::export]
pub fn calculate_total_volume(
    sets: Vec<FfiSet>,
    target_unit: FfiWeightUnit,
    options: Option<FfiVolumeOptions>,
) -> Result<f64, TonnageError> {
    let sets: Vec<Set> = sets.into_iter().map(Set::from).collect();
    Ok(volume::calculate_total_volume(
        &sets,
        target_unit.into(),
        &options_or_default(options),
    )?)
}

#[uniffi::export]
pub fn normalize_volume(
    value: f64,
    options: Option<FfiVolumeOptions>,
) -> Result<f64, TonnageError> {
    Ok(volume::normalize_volume(value, &options_or_default(options))?)
}

/// `from`/`to` are inclusive `YYYY-MM-DD` bounds; `None` leaves that end open.
#[uniffi::export]
pub fn summarize_sessions(
    sessions: Vec<FfiSessionVolume>,
    from: Option<String>,
    to: Option<String>,
    unit: FfiWeightUnit,
    options: Option<FfiVolumeOptions>,
) -> Result<FfiVolumeStats, TonnageError> {
    let sessions = sessions
        .into_iter()
        .map(SessionVolume::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let window = DateWindow {
        from: from.as_deref().map(parse_date).transpose()?,
        to: to.as_deref().map(parse_date).transpose()?,
    };
    let summary = stats::summarize(&sessions, &window, unit.into(), &options_or_default(options))?;
    Ok(summary.into())
}

/// Options configured through the environment of the host process.
#[uniffi::export]
pub fn default_volume_options() -> Result<FfiVolumeOptions, TonnageError> {
    Ok(Config::from_env()?.options.into())
}

fn parse_date(date: &str) -> Result<chrono::NaiveDate, TonnageError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| TonnageError::with_display(format!("{}: {}", date, e)))
}
