//! Core type definitions with validation.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for user-supplied values.
///
/// Every variant is recoverable: the operation is rejected and no state changes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The value must be strictly greater than zero.
    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// The value must not be negative.
    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// The value was NaN or infinite.
    #[error("{field} must be a number")]
    NotFinite { field: &'static str },

    /// The biological-sex factor was not one of the supported constants.
    #[error("unsupported body factor {value}, expected 0.7 or 0.6")]
    InvalidSexFactor { value: f64 },

    /// Invalid biological sex string.
    #[error("invalid biological sex: {value}")]
    InvalidSex { value: String },

    /// The tag does not name a preset drink.
    #[error("{tag} is not a preset drink")]
    NotAPreset { tag: String },

    /// A timestamp fell on a different calendar day than the ledger.
    #[error("timestamp falls on {date}, outside the current day")]
    OutsideDay { date: NaiveDate },

    /// A timestamp was later than the current time.
    #[error("timestamp {at} is in the future")]
    InFuture { at: DateTime<Utc> },
}

/// Requires a finite value strictly greater than zero.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

/// Requires a finite value greater than or equal to zero.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Rounds half away from zero to the given number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Identifier of a ledger event.
///
/// Derived from the creation time in milliseconds, bumped when two events
/// would otherwise share a millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Biological sex, selecting the Widmark distribution factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    /// Female or any other selection; uses the lower distribution factor.
    Female,
}

impl BiologicalSex {
    pub const MALE_FACTOR: f64 = 0.7;
    pub const FEMALE_FACTOR: f64 = 0.6;

    /// The body-water distribution constant for this selection.
    pub const fn body_factor(self) -> f64 {
        match self {
            Self::Male => Self::MALE_FACTOR,
            Self::Female => Self::FEMALE_FACTOR,
        }
    }

    /// Maps a raw distribution factor back to a selection.
    #[expect(
        clippy::float_cmp,
        reason = "factors are exact constants, not computed values"
    )]
    pub fn from_factor(value: f64) -> Result<Self, ValidationError> {
        if value == Self::MALE_FACTOR {
            Ok(Self::Male)
        } else if value == Self::FEMALE_FACTOR {
            Ok(Self::Female)
        } else {
            Err(ValidationError::InvalidSexFactor { value })
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" | "other" => Ok(Self::Female),
            _ => Err(ValidationError::InvalidSex {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive("volume", 350.0).is_ok());
        assert_eq!(
            require_positive("volume", 0.0),
            Err(ValidationError::NotPositive {
                field: "volume",
                value: 0.0
            })
        );
        assert_eq!(
            require_positive("volume", f64::NAN),
            Err(ValidationError::NotFinite { field: "volume" })
        );
    }

    #[test]
    fn require_non_negative_accepts_zero() {
        assert!(require_non_negative("abv", 0.0).is_ok());
        assert!(require_non_negative("abv", -0.5).is_err());
        assert!(require_non_negative("abv", f64::INFINITY).is_err());
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "rounded values are exact decimal representations"
    )]
    fn round_to_matches_decimal_places() {
        assert_eq!(round_to(14.04, 1), 14.0);
        assert_eq!(round_to(16.96, 1), 17.0);
        assert_eq!(round_to(0.123_456, 2), 0.12);
    }

    #[test]
    fn event_id_serializes_as_number() {
        let id = EventId::new(1_700_000_000_000);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1700000000000");
        assert_eq!("42".parse::<EventId>().unwrap(), EventId::new(42));
    }

    #[test]
    fn biological_sex_factors() {
        assert_eq!(BiologicalSex::from_factor(0.7).unwrap(), BiologicalSex::Male);
        assert_eq!(
            BiologicalSex::from_factor(0.6).unwrap(),
            BiologicalSex::Female
        );
        assert!(BiologicalSex::from_factor(0.65).is_err());
    }

    #[test]
    fn biological_sex_from_str() {
        assert_eq!("male".parse::<BiologicalSex>().unwrap(), BiologicalSex::Male);
        assert_eq!(
            "other".parse::<BiologicalSex>().unwrap(),
            BiologicalSex::Female
        );
        assert!("unknown".parse::<BiologicalSex>().is_err());
    }
}
