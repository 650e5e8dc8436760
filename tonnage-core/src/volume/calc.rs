use log::{debug, trace};

use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::normalize::{VolumeOptions, normalize_volume};
use crate::volume::sets::{RawSet, Set, check_weight, validate_set};
use crate::volume::units::{WeightUnit, convert_weight};

/// Volume of a single set. `weight` must already be in the unit the caller
/// wants the volume expressed in.
pub fn calculate_set_volume(weight: f64, reps: u32) -> VolumeResult<f64> {
    check_weight(weight)?;
    let volume = weight * f64::from(reps);
    if !volume.is_finite() {
        return Err(VolumeError::InvalidVolume(format!(
            "{} x {} overflows",
            weight, reps
        )));
    }
    Ok(volume)
}

/// Sums the volume of `sets` in `target` units, in input order, then
/// normalizes the total. The first invalid set aborts the whole calculation.
pub fn calculate_total_volume(
    sets: &[Set],
    target: WeightUnit,
    options: &VolumeOptions,
) -> VolumeResult<f64> {
    let mut total = 0.0;
    for (idx, set) in sets.iter().enumerate() {
        validate_set(set)?;
        let weight = convert_weight(set.weight, set.unit, target);
        let volume = calculate_set_volume(weight, set.reps)?;
        trace!("set {}: {} -> {:.4}{}", idx, set, volume, target);
        total += volume;
    }
    if !total.is_finite() {
        return Err(VolumeError::InvalidVolume(format!(
            "sum of {} sets overflows",
            sets.len()
        )));
    }

    let normalized = normalize_volume(total, options)?;
    debug!(
        "calculate_total_volume: {} sets -> {}{} ({} decimals, {})",
        sets.len(),
        normalized,
        target,
        options.precision,
        options.rounding_method
    );
    Ok(normalized)
}

/// Boundary variant of [`calculate_total_volume`] for sets that have not been
/// parsed yet.
pub fn calculate_total_volume_raw(
    raw_sets: &[RawSet],
    target: WeightUnit,
    options: &VolumeOptions,
) -> VolumeResult<f64> {
    let sets = raw_sets
        .iter()
        .cloned()
        .map(RawSet::into_set)
        .collect::<VolumeResult<Vec<_>>>()?;
    calculate_total_volume(&sets, target, options)
}
