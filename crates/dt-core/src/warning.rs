//! Advisory warnings raised after a drink is recorded.
//!
//! Each rule is evaluated independently, so a single drink can raise several
//! warnings. Warnings are notifications only; they never change ledger state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ledger::DayLedger;
use crate::metrics::{MetricsConfig, blood_alcohol_content, total_alcohol_grams};
use crate::ports::Severity;
use crate::profile::UserProfile;

/// BAC at or above which a danger alert is raised.
pub const HIGH_BAC_THRESHOLD: f64 = 0.15;

/// Gap between the last two drinks, as a fraction of target pace, below which
/// the "too fast" warning fires.
pub const RECENT_PACE_FACTOR: f64 = 0.7;

/// Average pace, as a fraction of target pace, below which the overall pace
/// warning fires.
pub const OVERALL_PACE_FACTOR: f64 = 0.8;

/// A single advisory warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum Warning {
    /// Total alcohol is over the daily limit.
    LimitExceeded { total_g: f64, limit_g: f64 },
    /// Estimated BAC is at or above [`HIGH_BAC_THRESHOLD`].
    HighBac { bac: f64 },
    /// The last two drinks were closer together than the target pace allows.
    DrinkingTooFast { target_pace_min: f64 },
    /// Average pace across the day is faster than the target.
    OverallPaceTooFast,
}

impl Warning {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::HighBac { .. } => Severity::Danger,
            Self::LimitExceeded { .. } | Self::DrinkingTooFast { .. } | Self::OverallPaceTooFast => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitExceeded { .. } => f.write_str("You have exceeded your daily alcohol limit!"),
            Self::HighBac { .. } => f.write_str("Your blood alcohol content is getting high!"),
            Self::DrinkingTooFast { target_pace_min } => write!(
                f,
                "You are drinking too fast! Target: {target_pace_min} min/drink"
            ),
            Self::OverallPaceTooFast => {
                f.write_str("Your overall pace is on the fast side. Remember to drink water!")
            }
        }
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarningReport {
    pub warnings: Vec<Warning>,
    /// Whether the persistent limit-exceeded indicator should be shown.
    /// Cleared whenever the total falls back within the limit.
    pub limit_exceeded: bool,
}

impl WarningReport {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// The most severe level among the warnings, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.warnings.iter().map(Warning::severity).max()
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans and drink counts fit exactly in f64"
)]
fn minutes(span: chrono::Duration) -> f64 {
    span.num_milliseconds() as f64 / 60_000.0
}

/// Evaluates every warning rule against the ledger as it stands at `now`.
pub fn evaluate(
    ledger: &DayLedger,
    profile: &UserProfile,
    config: &MetricsConfig,
    now: DateTime<Utc>,
) -> WarningReport {
    let mut report = WarningReport::default();

    let total_g = total_alcohol_grams(ledger);
    if total_g > profile.daily_limit_g {
        report.limit_exceeded = true;
        report.warnings.push(Warning::LimitExceeded {
            total_g,
            limit_g: profile.daily_limit_g,
        });
    }

    let bac = blood_alcohol_content(ledger, profile, config, now);
    if bac >= HIGH_BAC_THRESHOLD {
        report.warnings.push(Warning::HighBac { bac });
    }

    if let [.., previous, last] = ledger.drinks.as_slice() {
        let gap = minutes(last.timestamp - previous.timestamp);
        if gap < profile.target_pace_min * RECENT_PACE_FACTOR {
            report.warnings.push(Warning::DrinkingTooFast {
                target_pace_min: profile.target_pace_min,
            });
        }
    }

    if ledger.drinks.len() >= 3 {
        let first = ledger
            .first_drink_at
            .unwrap_or_else(|| ledger.drinks[0].timestamp);
        #[expect(clippy::cast_precision_loss, reason = "drink counts are small")]
        let average = minutes(now - first) / ledger.drinks.len() as f64;
        if average < profile.target_pace_min * OVERALL_PACE_FACTOR {
            report.warnings.push(Warning::OverallPaceTooFast);
        }
    }

    if !report.is_empty() {
        tracing::debug!(count = report.warnings.len(), "warnings raised");
    }
    report
}
