use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::sets::NumericInput;

pub const DEFAULT_PRECISION: u32 = 2;

// From 2^53 up every f64 is a whole number, so there is nothing left to round.
const INTEGRAL_FROM: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMethod {
    Floor,
    Ceil,
    #[default]
    Round,
}

impl RoundingMethod {
    fn apply(self, scaled: f64) -> f64 {
        match self {
            RoundingMethod::Round => scaled.round(),
            RoundingMethod::Floor => scaled.floor(),
            RoundingMethod::Ceil => scaled.ceil(),
        }
    }
}

impl fmt::Display for RoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMethod::Floor => write!(f, "floor"),
            RoundingMethod::Ceil => write!(f, "ceil"),
            RoundingMethod::Round => write!(f, "round"),
        }
    }
}

impl FromStr for RoundingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "floor" => Ok(RoundingMethod::Floor),
            "ceil" => Ok(RoundingMethod::Ceil),
            "round" => Ok(RoundingMethod::Round),
            other => Err(format!(
                "unknown rounding method {:?} (expected floor, ceil or round)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeOptions {
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub rounding_method: RoundingMethod,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding_method: RoundingMethod::default(),
        }
    }
}

impl VolumeOptions {
    pub fn new(precision: u32, rounding_method: RoundingMethod) -> Self {
        Self {
            precision,
            rounding_method,
        }
    }
}

/// Rounds a volume figure to `options.precision` decimal places.
///
/// This is the only place the number of decimals a volume carries is
/// decided; aggregates, recorded workouts and chart statistics all end here.
/// A precision finer than `f64` can resolve for `volume` leaves it unchanged.
pub fn normalize_volume(volume: f64, options: &VolumeOptions) -> VolumeResult<f64> {
    if !volume.is_finite() {
        return Err(VolumeError::InvalidVolume(format!(
            "{} is not finite",
            volume
        )));
    }
    if volume < 0.0 {
        return Err(VolumeError::InvalidVolume(format!(
            "{} is negative",
            volume
        )));
    }

    let factor = 10f64.powi(options.precision.min(i32::MAX as u32) as i32);
    let scaled = volume * factor;
    if !scaled.is_finite() || scaled >= INTEGRAL_FROM {
        return Ok(volume + 0.0);
    }

    // `+ 0.0` folds a negative zero into positive zero.
    let normalized = options.rounding_method.apply(scaled) / factor + 0.0;
    if !normalized.is_finite() {
        return Err(VolumeError::InvalidVolume(format!(
            "{} normalized to a non-finite value",
            volume
        )));
    }
    Ok(normalized)
}

/// Boundary variant of [`normalize_volume`] for values that may still be text.
pub fn normalize_volume_input(
    input: &NumericInput,
    options: &VolumeOptions,
) -> VolumeResult<f64> {
    let volume = input
        .to_f64()
        .ok_or_else(|| VolumeError::InvalidVolume(format!("{} is not a number", input)))?;
    normalize_volume(volume, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(precision: u32, rounding_method: RoundingMethod) -> VolumeOptions {
        VolumeOptions::new(precision, rounding_method)
    }

    #[test]
    fn defaults() {
        let o = VolumeOptions::default();
        assert_eq!(o.precision, 2);
        assert_eq!(o.rounding_method, RoundingMethod::Round);
        let parsed: VolumeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, o);
        let parsed: VolumeOptions =
            serde_json::from_str(r#"{"precision":1,"rounding_method":"ceil"}"#).unwrap();
        assert_eq!(parsed, opts(1, RoundingMethod::Ceil));
    }

    #[test]
    fn rounds_to_precision() {
        let d = VolumeOptions::default();
        assert_eq!(normalize_volume(1650.0, &d).unwrap(), 1650.0);
        assert_eq!(normalize_volume(123.456, &d).unwrap(), 123.46);
        assert_eq!(normalize_volume(0.125, &d).unwrap(), 0.13);
        let whole = opts(0, RoundingMethod::Round);
        assert_eq!(normalize_volume(123.456, &whole).unwrap(), 123.0);
        let one_place = opts(1, RoundingMethod::Round);
        assert_eq!(normalize_volume(123.456, &one_place).unwrap(), 123.5);
    }

    #[test]
    fn rounding_method_selection() {
        let floor = normalize_volume(1.005, &opts(2, RoundingMethod::Floor)).unwrap();
        let ceil = normalize_volume(1.005, &opts(2, RoundingMethod::Ceil)).unwrap();
        assert_eq!(floor, 1.0);
        assert_eq!(ceil, 1.01);

        let floor = normalize_volume(1.006, &opts(2, RoundingMethod::Floor)).unwrap();
        let round = normalize_volume(1.006, &VolumeOptions::default()).unwrap();
        assert_eq!(floor, 1.0);
        assert_eq!(round, 1.01);
        assert_ne!(floor, round);
    }

    #[test]
    fn idempotent_with_default_rounding() {
        let values = [
            0.0,
            0.29,
            0.1 + 0.2,
            1.005,
            1.006,
            99.999,
            123.456789,
            1650.0,
            1e9 + 0.123,
        ];
        let o = VolumeOptions::default();
        for v in values {
            let once = normalize_volume(v, &o).unwrap();
            let twice = normalize_volume(once, &o).unwrap();
            assert_eq!(once, twice, "{}", v);
        }
    }

    #[test]
    fn floor_and_ceil_apply_to_scaled_value() {
        let floor = opts(2, RoundingMethod::Floor);
        let ceil = opts(2, RoundingMethod::Ceil);
        // 0.29 * 100 is 28.999999999999996
        assert_eq!(normalize_volume(0.29, &floor).unwrap(), 0.28);
        assert_eq!(normalize_volume(0.28, &floor).unwrap(), 0.28);

        let just_below_one = 0.999999999999999;
        let floored = normalize_volume(just_below_one, &floor).unwrap();
        assert_eq!(floored, 0.99);
        assert!(floored <= just_below_one);

        let just_above_one = 1.000000000000001;
        let ceiled = normalize_volume(just_above_one, &ceil).unwrap();
        assert_eq!(ceiled, 1.01);
        assert!(ceiled >= just_above_one);
    }

    #[test]
    fn precision_beyond_f64_is_a_no_op() {
        let fine = opts(400, RoundingMethod::Round);
        assert_eq!(normalize_volume(0.0, &fine).unwrap(), 0.0);
        assert_eq!(normalize_volume(1650.25, &fine).unwrap(), 1650.25);
        let floor = opts(20, RoundingMethod::Floor);
        assert_eq!(normalize_volume(123.456, &floor).unwrap(), 123.456);
        assert_eq!(
            normalize_volume(f64::MAX, &VolumeOptions::default()).unwrap(),
            f64::MAX
        );
    }

    #[test]
    fn rejects_invalid_volumes() {
        let d = VolumeOptions::default();
        for bad in [-0.01, -100.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                normalize_volume(bad, &d),
                Err(VolumeError::InvalidVolume(_))
            ));
        }
    }

    #[test]
    fn negative_zero_becomes_positive() {
        let v = normalize_volume(-0.0, &VolumeOptions::default()).unwrap();
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn coerces_text() {
        let d = VolumeOptions::default();
        assert_eq!(normalize_volume_input(&"12.3456".into(), &d).unwrap(), 12.35);
        assert_eq!(normalize_volume_input(&NumericInput::Number(12.0), &d).unwrap(), 12.0);
        assert!(matches!(
            normalize_volume_input(&"twelve".into(), &d),
            Err(VolumeError::InvalidVolume(_))
        ));
        assert!(matches!(
            normalize_volume_input(&"-3".into(), &d),
            Err(VolumeError::InvalidVolume(_))
        ));
    }

    #[test]
    fn parses_method_names() {
        assert_eq!(
            "FLOOR".parse::<RoundingMethod>().unwrap(),
            RoundingMethod::Floor
        );
        assert!("truncate".parse::<RoundingMethod>().is_err());
        assert_eq!(RoundingMethod::Ceil.to_string(), "ceil");
    }
}
