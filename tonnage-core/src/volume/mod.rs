//! Volume engine: unit conversion, set validation and volume aggregation.
//!
//! Everything here is pure and synchronous. Boundary values (form fields,
//! JSON bodies) enter through [`RawSet`] / [`NumericInput`] and are parsed
//! once into [`Set`]; the calculators only ever see typed values. Every
//! volume figure leaves through [`normalize_volume`].

mod calc;
mod errors;
mod normalize;
mod sets;
mod units;

pub use calc::{calculate_set_volume, calculate_total_volume, calculate_total_volume_raw};
pub use errors::{VolumeError, VolumeResult};
pub use normalize::{
    DEFAULT_PRECISION, RoundingMethod, VolumeOptions, normalize_volume, normalize_volume_input,
};
pub use sets::{NumericInput, RawSet, Set, parse_raw_sets, parse_reps, parse_weight, validate_set};
pub use units::{LB_PER_KG, WeightUnit, convert_weight};
