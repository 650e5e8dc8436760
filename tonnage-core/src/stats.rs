//! Progress statistics over recorded sessions, as shown on volume charts.

use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::volume::{VolumeOptions, VolumeResult, WeightUnit, normalize_volume};

/// One point on a progress chart: the stored total of a recorded workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionVolume {
    pub performed_on: NaiveDate,
    pub total_volume: f64,
    #[serde(default)]
    pub unit: WeightUnit,
}

/// Inclusive date range; an open end means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// The `days` days ending on (and including) `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .and_then(|d| d.succ_opt());
        Self {
            from,
            to: Some(today),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub sessions: usize,
    pub sum: f64,
    pub average: f64,
    pub max: f64,
    /// Change from the first to the last session in the window, in percent.
    pub percent_change: Option<f64>,
    pub unit: WeightUnit,
}

impl VolumeStats {
    fn empty(unit: WeightUnit) -> Self {
        Self {
            sessions: 0,
            sum: 0.0,
            average: 0.0,
            max: 0.0,
            percent_change: None,
            unit,
        }
    }
}

pub fn summarize(
    sessions: &[SessionVolume],
    window: &DateWindow,
    unit: WeightUnit,
    options: &VolumeOptions,
) -> VolumeResult<VolumeStats> {
    let mut in_window: Vec<&SessionVolume> = sessions
        .iter()
        .filter(|s| window.contains(s.performed_on))
        .collect();
    in_window.sort_by_key(|s| s.performed_on);

    let totals = in_window
        .iter()
        .map(|s| normalize_volume(s.unit.convert(s.total_volume, unit), options))
        .collect::<VolumeResult<Vec<f64>>>()?;

    let (Some(&first), Some(&last)) = (totals.first(), totals.last()) else {
        debug!("summarize: no sessions in {:?}", window);
        return Ok(VolumeStats::empty(unit));
    };

    let sum = totals.iter().sum::<f64>();
    let max = totals.iter().copied().fold(0.0, f64::max);
    let average = sum / totals.len() as f64;

    let percent_change = if totals.len() >= 2 && first > 0.0 {
        Some(signed_normalize((last - first) / first * 100.0, options)?)
    } else {
        None
    };

    let stats = VolumeStats {
        sessions: totals.len(),
        sum: normalize_volume(sum, options)?,
        average: normalize_volume(average, options)?,
        max,
        percent_change,
        unit,
    };
    debug!("summarize: {:?}", stats);
    Ok(stats)
}

// Normalizes the magnitude and keeps the sign, so drops stay negative.
fn signed_normalize(value: f64, options: &VolumeOptions) -> VolumeResult<f64> {
    let magnitude = normalize_volume(value.abs(), options)?;
    if magnitude == 0.0 {
        Ok(0.0)
    } else {
        Ok(magnitude.copysign(value))
    }
}
