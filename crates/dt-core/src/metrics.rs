//! Metrics derived from the day ledger and the user profile.
//!
//! Every function here is pure: it reads the ledger and profile as they are at
//! call time and never mutates them. Time-dependent metrics take `now` explicitly.
//!
//! # BAC models
//!
//! Two estimates exist and exactly one is used per [`MetricsConfig`]:
//!
//! - [`BacModel::Widmark`] (default): `(grams * 0.8) / (weight * body_factor) / 10`,
//!   minus `0.015` per hour elapsed since the first drink, floored at zero.
//! - [`BacModel::Simple`]: `grams / (weight * 0.7) * 100`, with no sex factor and no decay.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::DayLedger;
use crate::profile::UserProfile;
use crate::types::round_to;

/// Fraction of BAC eliminated per hour in the Widmark model.
pub const WIDMARK_ELIMINATION_PER_HOUR: f64 = 0.015;

/// BAC at or below which the user is considered sober.
pub const SOBER_THRESHOLD: f64 = 0.05;

/// Minimum recommended water intake once any alcohol is consumed.
pub const MIN_RECOMMENDED_WATER_ML: f64 = 300.0;

/// Water recommended per gram of pure alcohol.
pub const WATER_ML_PER_ALCOHOL_G: f64 = 12.0;

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Which BAC estimate to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BacModel {
    /// Sex-factored estimate with linear elimination.
    #[default]
    Widmark,
    /// Legacy estimate without sex factor or elimination.
    Simple,
}

/// Tunable constants for metric derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub bac_model: BacModel,
    /// BAC percentage points metabolised per hour, used for the sober-time estimate.
    /// Default: 0.15.
    pub metabolism_rate_per_hour: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            bac_model: BacModel::Widmark,
            metabolism_rate_per_hour: 0.15,
        }
    }
}

/// Total pure alcohol in grams.
pub fn total_alcohol_grams(ledger: &DayLedger) -> f64 {
    round_to(ledger.drinks.iter().map(|d| d.pure_alcohol_g).sum(), 1)
}

/// Total water in ml.
pub fn total_water_ml(ledger: &DayLedger) -> f64 {
    ledger.water.iter().map(|w| w.amount_ml).sum()
}

/// Water-to-alcohol ratio rounded to one decimal, `None` when no alcohol was consumed.
#[expect(clippy::float_cmp, reason = "totals are rounded to one decimal")]
pub fn water_alcohol_ratio(ledger: &DayLedger) -> Option<f64> {
    let alcohol = total_alcohol_grams(ledger);
    if alcohol == 0.0 {
        return None;
    }
    Some(round_to(total_water_ml(ledger) / alcohol, 1))
}

/// Renders a ratio as `X:1`, or `-` when there is none.
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "-".to_string(), |r| format!("{r}:1"))
}

fn first_drink_at(ledger: &DayLedger) -> Option<DateTime<Utc>> {
    ledger
        .first_drink_at
        .or_else(|| ledger.drinks.first().map(|d| d.timestamp))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans within a day fit exactly in f64"
)]
fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_MINUTE
}

/// Average minutes per drink since the first drink, `None` with fewer than two drinks.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "pace is a small rounded minute count"
)]
pub fn current_pace_minutes(ledger: &DayLedger, now: DateTime<Utc>) -> Option<i64> {
    if ledger.drinks.len() < 2 {
        return None;
    }
    let first = first_drink_at(ledger)?;
    let pace = minutes_between(first, now) / ledger.drinks.len() as f64;
    Some(pace.round() as i64)
}

/// Renders a pace as `N min/drink`, or `-` when there is none.
pub fn format_pace(pace: Option<i64>) -> String {
    pace.map_or_else(|| "-".to_string(), |p| format!("{p} min/drink"))
}

/// Estimated blood alcohol content in percent, rounded to two decimals.
pub fn blood_alcohol_content(
    ledger: &DayLedger,
    profile: &UserProfile,
    config: &MetricsConfig,
    now: DateTime<Utc>,
) -> f64 {
    if ledger.drinks.is_empty() {
        return 0.0;
    }
    let grams = total_alcohol_grams(ledger);
    let bac = match config.bac_model {
        BacModel::Widmark => {
            let initial =
                (grams * 0.8) / (profile.body_weight_kg * profile.sex.body_factor()) / 10.0;
            let elapsed_hours = first_drink_at(ledger).map_or(0.0, |first| {
                (minutes_between(first, now) * MS_PER_MINUTE / MS_PER_HOUR).max(0.0)
            });
            (initial - WIDMARK_ELIMINATION_PER_HOUR * elapsed_hours).max(0.0)
        }
        BacModel::Simple => (grams / (profile.body_weight_kg * 0.7)) * 100.0,
    };
    round_to(bac, 2)
}

/// Severity tiers for an estimated BAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BacStatus {
    Normal,
    Mild,
    Tipsy,
    DrunkInitial,
    DrunkPeak,
    DangerousHeavy,
    DangerousComa,
}

/// Half-open `[lower, upper)` intervals, checked in order.
const BAC_TIERS: [(f64, f64, BacStatus); 7] = [
    (0.0, 0.02, BacStatus::Normal),
    (0.02, 0.05, BacStatus::Mild),
    (0.05, 0.11, BacStatus::Tipsy),
    (0.11, 0.16, BacStatus::DrunkInitial),
    (0.16, 0.31, BacStatus::DrunkPeak),
    (0.31, 0.41, BacStatus::DangerousHeavy),
    (0.41, f64::INFINITY, BacStatus::DangerousComa),
];

impl BacStatus {
    /// Classifies a BAC. Values matching no tier fall into the last one.
    pub fn classify(bac: f64) -> Self {
        BAC_TIERS
            .iter()
            .find(|(lower, upper, _)| bac >= *lower && bac < *upper)
            .map_or(Self::DangerousComa, |(_, _, status)| *status)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "sober",
            Self::Mild => "mildly buzzed",
            Self::Tipsy => "tipsy",
            Self::DrunkInitial => "drunk (early)",
            Self::DrunkPeak => "drunk (peak)",
            Self::DangerousHeavy => "dangerously drunk",
            Self::DangerousComa => "risk of coma",
        }
    }
}

impl fmt::Display for BacStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time remaining until BAC drops to [`SOBER_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoberEstimate {
    pub hours: f64,
}

impl SoberEstimate {
    pub fn is_sober(&self) -> bool {
        self.hours <= 0.0
    }
}

impl fmt::Display for SoberEstimate {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "estimates are bounded by a day of drinking"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sober() {
            return f.write_str("0 hours");
        }
        if self.hours < 1.0 {
            return write!(f, "{} minutes", (self.hours * 60.0).round() as i64);
        }
        let mut hours = self.hours.floor() as i64;
        let mut minutes = ((self.hours - self.hours.floor()) * 60.0).round() as i64;
        if minutes == 60 {
            hours += 1;
            minutes = 0;
        }
        if minutes > 0 {
            write!(f, "{hours} hours {minutes} minutes")
        } else {
            write!(f, "{hours} hours")
        }
    }
}

/// Hours until BAC falls to the sober threshold at the configured metabolism rate.
pub fn sober_time_estimate(
    ledger: &DayLedger,
    profile: &UserProfile,
    config: &MetricsConfig,
    now: DateTime<Utc>,
) -> SoberEstimate {
    let bac = blood_alcohol_content(ledger, profile, config, now);
    if bac <= SOBER_THRESHOLD || config.metabolism_rate_per_hour <= 0.0 {
        return SoberEstimate { hours: 0.0 };
    }
    SoberEstimate {
        hours: (bac - SOBER_THRESHOLD) / config.metabolism_rate_per_hour,
    }
}

/// Recommended water in ml: zero without alcohol, otherwise the largest of
/// 12 ml per gram, the total drink volume, and 300 ml.
#[expect(
    clippy::cast_possible_truncation,
    reason = "recommended volumes are small positive integers"
)]
#[expect(clippy::float_cmp, reason = "totals are rounded to one decimal")]
pub fn recommended_water_ml(ledger: &DayLedger) -> i64 {
    let grams = total_alcohol_grams(ledger);
    if grams == 0.0 {
        return 0;
    }
    let drink_volume: f64 = ledger.drinks.iter().map(|d| d.volume_ml).sum();
    (grams * WATER_ML_PER_ALCOHOL_G)
        .max(drink_volume)
        .max(MIN_RECOMMENDED_WATER_ML)
        .round() as i64
}

/// Grams left before the daily limit, floored at zero.
pub fn remaining_daily_allowance(ledger: &DayLedger, profile: &UserProfile) -> f64 {
    round_to((profile.daily_limit_g - total_alcohol_grams(ledger)).max(0.0), 1)
}

/// Share of the daily limit consumed, capped at 100.
pub fn progress_percent(ledger: &DayLedger, profile: &UserProfile) -> f64 {
    (total_alcohol_grams(ledger) / profile.daily_limit_g * 100.0).min(100.0)
}

/// Visual severity of the daily-limit progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressSeverity {
    Normal,
    Warning,
    Danger,
}

impl ProgressSeverity {
    pub fn classify(percent: f64) -> Self {
        if percent >= 100.0 {
            Self::Danger
        } else if percent >= 80.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Every derived metric at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub drink_count: usize,
    pub toilet_count: usize,
    pub total_alcohol_g: f64,
    pub total_water_ml: f64,
    pub water_alcohol_ratio: Option<f64>,
    pub current_pace_min: Option<i64>,
    pub bac: f64,
    pub bac_status: BacStatus,
    pub sober_in: SoberEstimate,
    pub recommended_water_ml: i64,
    pub remaining_allowance_g: f64,
    pub progress_percent: f64,
    pub progress_severity: ProgressSeverity,
    pub limit_exceeded: bool,
}

impl Metrics {
    pub fn compute(
        ledger: &DayLedger,
        profile: &UserProfile,
        config: &MetricsConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let total_alcohol_g = total_alcohol_grams(ledger);
        let bac = blood_alcohol_content(ledger, profile, config, now);
        let progress = progress_percent(ledger, profile);
        Self {
            drink_count: ledger.drinks.len(),
            toilet_count: ledger.toilet.len(),
            total_alcohol_g,
            total_water_ml: total_water_ml(ledger),
            water_alcohol_ratio: water_alcohol_ratio(ledger),
            current_pace_min: current_pace_minutes(ledger, now),
            bac,
            bac_status: BacStatus::classify(bac),
            sober_in: sober_time_estimate(ledger, profile, config, now),
            recommended_water_ml: recommended_water_ml(ledger),
            remaining_allowance_g: remaining_daily_allowance(ledger, profile),
            progress_percent: progress,
            progress_severity: ProgressSeverity::classify(progress),
            limit_exceeded: total_alcohol_g > profile.daily_limit_g,
        }
    }
}
