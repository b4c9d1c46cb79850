//! Events recorded in the day ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::drink_type::DrinkType;
use crate::types::{EventId, ValidationError, require_non_negative, require_positive, round_to};

/// Ethanol density in g/ml.
pub const ETHANOL_DENSITY: f64 = 0.8;

/// Grams of pure alcohol in a serving, rounded to one decimal.
pub fn pure_alcohol_grams(volume_ml: f64, abv_percent: f64) -> f64 {
    round_to(volume_ml * abv_percent * ETHANOL_DENSITY / 100.0, 1)
}

/// An alcoholic drink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkEvent {
    pub id: EventId,
    pub drink_type: DrinkType,
    pub volume_ml: f64,
    pub abv_percent: f64,
    /// Derived at creation from volume and ABV.
    pub pure_alcohol_g: f64,
    pub timestamp: DateTime<Utc>,
}

impl DrinkEvent {
    /// Validates the serving and derives its pure-alcohol content.
    pub fn new(
        id: EventId,
        drink_type: DrinkType,
        volume_ml: f64,
        abv_percent: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let volume_ml = require_positive("volume", volume_ml)?;
        let abv_percent = require_non_negative("ABV", abv_percent)?;
        Ok(Self {
            id,
            drink_type,
            volume_ml,
            abv_percent,
            pure_alcohol_g: pure_alcohol_grams(volume_ml, abv_percent),
            timestamp,
        })
    }
}

/// A glass of water.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEvent {
    pub id: EventId,
    pub amount_ml: f64,
    pub timestamp: DateTime<Utc>,
}

impl WaterEvent {
    pub fn new(
        id: EventId,
        amount_ml: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let amount_ml = require_positive("water amount", amount_ml)?;
        Ok(Self {
            id,
            amount_ml,
            timestamp,
        })
    }
}

/// A bathroom visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToiletEvent {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
}

/// Which ledger collection an event lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Drink,
    Water,
    Toilet,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drink => "drink",
            Self::Water => "water",
            Self::Toilet => "toilet",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drink" => Ok(Self::Drink),
            "water" => Ok(Self::Water),
            "toilet" => Ok(Self::Toilet),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

/// Error type for unknown event kind strings.
#[derive(Debug, Clone)]
pub struct UnknownEventKind(String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

/// One row of the merged, display-only history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LedgerEntry {
    Drink(DrinkEvent),
    Water(WaterEvent),
    Toilet(ToiletEvent),
}

impl LedgerEntry {
    pub const fn id(&self) -> EventId {
        match self {
            Self::Drink(e) => e.id,
            Self::Water(e) => e.id,
            Self::Toilet(e) => e.id,
        }
    }

    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Drink(_) => EventKind::Drink,
            Self::Water(_) => EventKind::Water,
            Self::Toilet(_) => EventKind::Toilet,
        }
    }

    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Drink(e) => e.timestamp,
            Self::Water(e) => e.timestamp,
            Self::Toilet(e) => e.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "values are rounded to one decimal")]
    fn pure_alcohol_examples() {
        assert_eq!(pure_alcohol_grams(350.0, 5.0), 14.0);
        assert_eq!(pure_alcohol_grams(300.0, 7.0), 16.8);
        assert_eq!(pure_alcohol_grams(180.0, 15.0), 21.6);
        assert_eq!(pure_alcohol_grams(30.0, 40.0), 9.6);
        assert_eq!(pure_alcohol_grams(500.0, 0.0), 0.0);
    }

    #[test]
    fn drink_event_rejects_invalid_servings() {
        let now = Utc::now();
        let id = EventId::new(1);
        assert!(DrinkEvent::new(id, DrinkType::Custom, 0.0, 5.0, now).is_err());
        assert!(DrinkEvent::new(id, DrinkType::Custom, -10.0, 5.0, now).is_err());
        assert!(DrinkEvent::new(id, DrinkType::Custom, 100.0, -1.0, now).is_err());
        assert!(DrinkEvent::new(id, DrinkType::Custom, f64::NAN, 5.0, now).is_err());
        assert!(DrinkEvent::new(id, DrinkType::Custom, 100.0, 0.0, now).is_ok());
    }

    #[test]
    fn water_event_rejects_non_positive_amount() {
        let now = Utc::now();
        assert!(WaterEvent::new(EventId::new(1), 0.0, now).is_err());
        assert!(WaterEvent::new(EventId::new(1), 200.0, now).is_ok());
    }

    #[test]
    fn event_kind_parses() {
        assert_eq!("water".parse::<EventKind>().unwrap(), EventKind::Water);
        assert!("snack".parse::<EventKind>().is_err());
    }

    #[test]
    fn ledger_entry_serializes_with_kind_tag() {
        let entry = LedgerEntry::Toilet(ToiletEvent {
            id: EventId::new(7),
            timestamp: "2024-01-01T20:00:00Z".parse().unwrap(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "toilet");
        assert_eq!(json["id"], 7);
        assert_eq!(json["timestamp"], "2024-01-01T20:00:00Z");
    }
}
