use chrono::NaiveDate;
use log::debug;

use crate::stats::{SessionVolume, VolumeStats};
use crate::uniffi_interface::errors::TonnageError;
use crate::volume::{RoundingMethod, Set, VolumeOptions, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiWeightUnit {
    Kg,
    Lb,
}

impl From<FfiWeightUnit> for WeightUnit {
    fn from(u: FfiWeightUnit) -> Self {
        match u {
            FfiWeightUnit::Kg => WeightUnit::Kg,
            FfiWeightUnit::Lb => WeightUnit::Lb,
        }
    }
}

impl From<WeightUnit> for FfiWeightUnit {
    fn from(u: WeightUnit) -> Self {
        match u {
            WeightUnit::Kg => FfiWeightUnit::Kg,
            WeightUnit::Lb => FfiWeightUnit::Lb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRoundingMethod {
    Floor,
    Ceil,
    Round,
}

impl From<FfiRoundingMethod> for RoundingMethod {
    fn from(m: FfiRoundingMethod) -> Self {
        match m {
            FfiRoundingMethod::Floor => RoundingMethod::Floor,
            FfiRoundingMethod::Ceil => RoundingMethod::Ceil,
            FfiRoundingMethod::Round => RoundingMethod::Round,
        }
    }
}

impl From<RoundingMethod> for FfiRoundingMethod {
    fn from(m: RoundingMethod) -> Self {
        match m {
            RoundingMethod::Floor => FfiRoundingMethod::Floor,
            RoundingMethod::Ceil => FfiRoundingMethod::Ceil,
            RoundingMethod::Round => FfiRoundingMethod::Round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct FfiVolumeOptions {
    pub precision: u32,
    pub rounding_method: FfiRoundingMethod,
}

impl From<FfiVolumeOptions> for VolumeOptions {
    fn from(o: FfiVolumeOptions) -> Self {
        VolumeOptions::new(o.precision, o.rounding_method.into())
    }
}

impl From<VolumeOptions> for FfiVolumeOptions {
    fn from(o: VolumeOptions) -> Self {
        FfiVolumeOptions {
            precision: o.precision,
            rounding_method: o.rounding_method.into(),
        }
    }
}

/// A set as edited in the UI. Validation happens when it reaches the engine.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiSet {
    pub weight: f64,
    pub reps: u32,
    pub unit: FfiWeightUnit,
    pub notes: Option<String>,
}

impl From<FfiSet> for Set {
    fn from(s: FfiSet) -> Self {
        Set {
            weight: s.weight,
            reps: s.reps,
            unit: s.unit.into(),
            notes: s.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiSessionVolume {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_volume: f64,
    pub unit: FfiWeightUnit,
}

impl TryFrom<FfiSessionVolume> for SessionVolume {
    type Error = TonnageError;
    fn try_from(s: FfiSessionVolume) -> Result<Self, TonnageError> {
        debug!("session volume {} {:?} dated {}", s.total_volume, s.unit, s.date);
        let performed_on = NaiveDate::parse_from_str(&s.date, "%Y-%m-%d")
            .map_err(|e| TonnageError::with_display(format!("{}: {}", s.date, e)))?;
        Ok(SessionVolume {
            performed_on,
            total_volume: s.total_volume,
            unit: s.unit.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiVolumeStats {
    pub sessions: u64,
    pub sum: f64,
    pub average: f64,
    pub max: f64,
    pub percent_change: Option<f64>,
    pub unit: FfiWeightUnit,
}

impl From<VolumeStats> for FfiVolumeStats {
    fn from(s: VolumeStats) -> Self {
        FfiVolumeStats {
            sessions: s.sessions as u64,
            sum: s.sum,
            average: s.average,
            max: s.max,
            percent_change: s.percent_change,
            unit: s.unit.into(),
        }
    }
}
