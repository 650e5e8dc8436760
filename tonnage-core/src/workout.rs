//! Recording a submitted workout together with its stored total volume.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::SessionVolume;
use crate::volume::{
    RawSet, Set, VolumeOptions, VolumeResult, WeightUnit, calculate_total_volume,
    normalize_volume,
};

/// A workout as persisted: its sets plus the total volume in the user's
/// preferred unit, carrying two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub name: Option<String>,
    pub performed_on: NaiveDate,
    pub unit: WeightUnit,
    pub sets: Vec<Set>,
    pub total_volume: f64,
}

impl WorkoutRecord {
    pub fn record(
        name: Option<String>,
        performed_on: NaiveDate,
        preferred_unit: WeightUnit,
        sets: Vec<Set>,
    ) -> VolumeResult<Self> {
        let total_volume =
            calculate_total_volume(&sets, preferred_unit, &VolumeOptions::default())?;
        info!(
            "recorded workout {:?} on {}: {} sets, {}{}",
            name,
            performed_on,
            sets.len(),
            total_volume,
            preferred_unit
        );
        Ok(Self {
            name,
            performed_on,
            unit: preferred_unit,
            sets,
            total_volume,
        })
    }

    /// Parses submitted sets in order and records them; the first invalid set
    /// rejects the whole workout.
    pub fn from_raw(
        name: Option<String>,
        performed_on: NaiveDate,
        preferred_unit: WeightUnit,
        raw_sets: Vec<RawSet>,
    ) -> VolumeResult<Self> {
        let sets = raw_sets
            .into_iter()
            .map(RawSet::into_set)
            .collect::<VolumeResult<Vec<_>>>()?;
        Self::record(name, performed_on, preferred_unit, sets)
    }

    pub fn session_volume(&self) -> SessionVolume {
        SessionVolume {
            performed_on: self.performed_on,
            total_volume: self.total_volume,
            unit: self.unit,
        }
    }

    pub fn total_volume_in(&self, unit: WeightUnit) -> VolumeResult<f64> {
        normalize_volume(
            self.unit.convert(self.total_volume, unit),
            &VolumeOptions::default(),
        )
    }
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("Workout on {}", self.performed_on.format("%Y-%m-%d")));
        write!(
            f,
            "{}: {:.2} {} over {} sets",
            name,
            self.total_volume,
            self.unit,
            self.sets.len()
        )
    }
}
