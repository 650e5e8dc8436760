use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::volume::errors::VolumeError;

pub const LB_PER_KG: f64 = 2.20462;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn convert(self, weight: f64, to: WeightUnit) -> f64 {
        convert_weight(weight, self, to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            other => Err(VolumeError::InvalidWeight(format!(
                "unknown weight unit {:?}",
                other
            ))),
        }
    }
}

/// Converts `weight` between units. Same-unit conversions return the input
/// untouched; no validation happens here.
pub fn convert_weight(weight: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lb) => weight * LB_PER_KG,
        (WeightUnit::Lb, WeightUnit::Kg) => weight / LB_PER_KG,
        _ => weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::{VolumeOptions, normalize_volume};

    #[test]
    fn identity_is_exact() {
        for w in [0.0, 0.1, 1.0 / 3.0, 100.0, 220.462, 1e12] {
            assert_eq!(convert_weight(w, WeightUnit::Kg, WeightUnit::Kg), w);
            assert_eq!(convert_weight(w, WeightUnit::Lb, WeightUnit::Lb), w);
        }
    }

    #[test]
    fn kg_to_lb_and_back() {
        let lb = convert_weight(100.0, WeightUnit::Kg, WeightUnit::Lb);
        assert!((lb - 220.462).abs() < 1e-9);
        let kg = convert_weight(220.462, WeightUnit::Lb, WeightUnit::Kg);
        assert!((kg - 100.0).abs() < 1e-9);
        let opts = VolumeOptions::default();
        for w in [0.0, 2.5, 61.23, 100.0, 142.5, 315.0] {
            let lb = convert_weight(w, WeightUnit::Kg, WeightUnit::Lb);
            let back = WeightUnit::Lb.convert(lb, WeightUnit::Kg);
            let back = normalize_volume(back, &opts).unwrap();
            assert!((back - w).abs() <= 0.01, "{} -> {} -> {}", w, lb, back);
        }
    }

    #[test]
    fn no_validation_on_conversion() {
        assert!(convert_weight(-10.0, WeightUnit::Kg, WeightUnit::Lb) < 0.0);
        assert!(convert_weight(f64::NAN, WeightUnit::Lb, WeightUnit::Kg).is_nan());
        assert!(convert_weight(f64::INFINITY, WeightUnit::Kg, WeightUnit::Lb).is_infinite());
    }

    #[test]
    fn parse_and_serialize() {
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!(" lbs ".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert!("stone".parse::<WeightUnit>().is_err());
        assert_eq!(serde_json::to_string(&WeightUnit::Lb).unwrap(), "\"lb\"");
        let unit: WeightUnit = serde_json::from_str("\"kg\"").unwrap();
        assert_eq!(unit, WeightUnit::Kg);
        assert_eq!(WeightUnit::Lb.to_string(), "lb");
    }
}
