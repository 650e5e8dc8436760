use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::units::WeightUnit;

/// A number as it arrives from a form field or JSON body: either already
/// numeric or still text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Coerces to `f64`. Text is trimmed first; anything unparsable is `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumericInput::Number(n) => Some(*n),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Number(n)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{}", n),
            NumericInput::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub weight: f64,
    pub reps: u32,
    #[serde(default)]
    pub unit: WeightUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Set {
    pub fn new(weight: f64, reps: u32, unit: WeightUnit) -> VolumeResult<Self> {
        let set = Set {
            weight,
            reps,
            unit,
            notes: None,
        };
        validate_set(&set)?;
        Ok(set)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes_str = self
            .notes
            .as_deref()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default();
        write!(
            f,
            "{:.1}{} x {} reps{}",
            self.weight, self.unit, self.reps, notes_str
        )
    }
}

/// Unvalidated set as submitted by a client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSet {
    #[serde(default)]
    pub weight: Option<NumericInput>,
    #[serde(default)]
    pub reps: Option<NumericInput>,
    #[serde(default)]
    pub unit: WeightUnit,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RawSet {
    pub fn new(
        weight: impl Into<NumericInput>,
        reps: impl Into<NumericInput>,
        unit: WeightUnit,
    ) -> Self {
        RawSet {
            weight: Some(weight.into()),
            reps: Some(reps.into()),
            unit,
            notes: None,
        }
    }

    /// Parses and validates into a typed [`Set`]. Weight is checked before reps.
    pub fn into_set(self) -> VolumeResult<Set> {
        let weight = match &self.weight {
            Some(w) => parse_weight(w)?,
            None => return Err(VolumeError::InvalidWeight("weight is missing".into())),
        };
        let reps = match &self.reps {
            Some(r) => parse_reps(r)?,
            None => return Err(VolumeError::InvalidReps("reps is missing".into())),
        };
        let set = Set {
            weight,
            reps,
            unit: self.unit,
            notes: self.notes,
        };
        validate_set(&set)?;
        Ok(set)
    }
}

impl TryFrom<RawSet> for Set {
    type Error = VolumeError;

    fn try_from(raw: RawSet) -> Result<Self, Self::Error> {
        raw.into_set()
    }
}

pub fn parse_weight(input: &NumericInput) -> VolumeResult<f64> {
    let Some(weight) = input.to_f64() else {
        warn!("rejecting non-numeric weight {}", input);
        return Err(VolumeError::InvalidWeight(format!(
            "{} is not a number",
            input
        )));
    };
    check_weight(weight)?;
    Ok(weight)
}

pub fn parse_reps(input: &NumericInput) -> VolumeResult<u32> {
    let Some(reps) = input.to_f64() else {
        warn!("rejecting non-numeric reps {}", input);
        return Err(VolumeError::InvalidReps(format!("{} is not a number", input)));
    };
    if !reps.is_finite() {
        return Err(VolumeError::InvalidReps(format!("{} is not finite", reps)));
    }
    if reps < 0.0 {
        return Err(VolumeError::InvalidReps(format!("{} is negative", reps)));
    }
    if reps.fract() != 0.0 {
        return Err(VolumeError::InvalidReps(format!(
            "{} is not a whole number",
            reps
        )));
    }
    if reps > u32::MAX as f64 {
        return Err(VolumeError::InvalidReps(format!("{} is too large", reps)));
    }
    Ok(reps as u32)
}

pub(crate) fn check_weight(weight: f64) -> VolumeResult<()> {
    if !weight.is_finite() {
        return Err(VolumeError::InvalidWeight(format!(
            "{} is not finite",
            weight
        )));
    }
    if weight < 0.0 {
        return Err(VolumeError::InvalidWeight(format!(
            "{} is negative",
            weight
        )));
    }
    Ok(())
}

/// Checks that a set can take part in a volume calculation.
pub fn validate_set(set: &Set) -> VolumeResult<()> {
    trace!("validating set {}", set);
    check_weight(set.weight)
}

/// Reads a JSON array of raw sets without validating them.
pub fn parse_raw_sets(json: &str) -> Result<Vec<RawSet>, serde_json::Error> {
    serde_json::from_str(json)
}
