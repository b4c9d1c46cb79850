//! The day ledger: every drink, water intake and bathroom visit for one calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drink_type::DrinkType;
use crate::event::{DrinkEvent, EventKind, LedgerEntry, ToiletEvent, WaterEvent};
use crate::types::{EventId, ValidationError};

/// Ledger mutation errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// The input was rejected; nothing was recorded.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// No event with that id exists in the collection.
    #[error("no {kind} event with id {id}")]
    NotFound { kind: EventKind, id: EventId },
}

/// Events for a single calendar day.
///
/// Each collection is kept sorted by timestamp. Events recorded at the same
/// instant keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLedger {
    /// The calendar day every event belongs to.
    pub date: NaiveDate,
    #[serde(default)]
    pub drinks: Vec<DrinkEvent>,
    #[serde(default)]
    pub water: Vec<WaterEvent>,
    #[serde(default)]
    pub toilet: Vec<ToiletEvent>,
    /// Set by the first drink of the day, cleared when the last drink is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_drink_at: Option<DateTime<Utc>>,
}

impl DayLedger {
    /// Creates an empty ledger for the given day.
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            drinks: Vec::new(),
            water: Vec::new(),
            toilet: Vec::new(),
            first_drink_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty() && self.water.is_empty() && self.toilet.is_empty()
    }

    /// Allocates an id derived from `at`, strictly greater than any id in the ledger.
    fn next_id(&self, at: DateTime<Utc>) -> EventId {
        let max_existing = self
            .drinks
            .iter()
            .map(|e| e.id)
            .chain(self.water.iter().map(|e| e.id))
            .chain(self.toilet.iter().map(|e| e.id))
            .max();
        let candidate = at.timestamp_millis();
        match max_existing {
            Some(max) if max.value() >= candidate => EventId::new(max.value() + 1),
            _ => EventId::new(candidate),
        }
    }

    /// Records a drink. Rejects non-positive volume and negative ABV.
    pub fn add_drink(
        &mut self,
        drink_type: DrinkType,
        volume_ml: f64,
        abv_percent: f64,
        at: DateTime<Utc>,
    ) -> Result<DrinkEvent, LedgerError> {
        let event = DrinkEvent::new(self.next_id(at), drink_type, volume_ml, abv_percent, at)?;
        self.first_drink_at = Some(self.first_drink_at.map_or(at, |first| first.min(at)));
        let pos = self.drinks.partition_point(|e| e.timestamp <= at);
        self.drinks.insert(pos, event.clone());
        tracing::debug!(id = %event.id, %drink_type, grams = event.pure_alcohol_g, "drink recorded");
        Ok(event)
    }

    /// Records a water intake. Rejects non-positive amounts.
    pub fn add_water(&mut self, amount_ml: f64, at: DateTime<Utc>) -> Result<WaterEvent, LedgerError> {
        let event = WaterEvent::new(self.next_id(at), amount_ml, at)?;
        let pos = self.water.partition_point(|e| e.timestamp <= at);
        self.water.insert(pos, event.clone());
        tracing::debug!(id = %event.id, amount_ml, "water recorded");
        Ok(event)
    }

    /// Records a bathroom visit.
    pub fn add_toilet(&mut self, at: DateTime<Utc>) -> ToiletEvent {
        let event = ToiletEvent {
            id: self.next_id(at),
            timestamp: at,
        };
        let pos = self.toilet.partition_point(|e| e.timestamp <= at);
        self.toilet.insert(pos, event.clone());
        tracing::debug!(id = %event.id, "toilet visit recorded");
        event
    }

    /// Removes an event by id.
    ///
    /// Deleting the last drink clears the first-drink marker.
    pub fn delete_event(&mut self, kind: EventKind, id: EventId) -> Result<LedgerEntry, LedgerError> {
        let not_found = LedgerError::NotFound { kind, id };
        let removed = match kind {
            EventKind::Drink => {
                let pos = self.drinks.iter().position(|e| e.id == id).ok_or(not_found)?;
                let removed = self.drinks.remove(pos);
                if self.drinks.is_empty() {
                    self.first_drink_at = None;
                }
                LedgerEntry::Drink(removed)
            }
            EventKind::Water => {
                let pos = self.water.iter().position(|e| e.id == id).ok_or(not_found)?;
                LedgerEntry::Water(self.water.remove(pos))
            }
            EventKind::Toilet => {
                let pos = self.toilet.iter().position(|e| e.id == id).ok_or(not_found)?;
                LedgerEntry::Toilet(self.toilet.remove(pos))
            }
        };
        tracing::debug!(%kind, %id, "event deleted");
        Ok(removed)
    }

    /// Empties all three collections and the first-drink marker. The date is kept.
    pub fn clear(&mut self) {
        self.drinks.clear();
        self.water.clear();
        self.toilet.clear();
        self.first_drink_at = None;
    }

    /// All events merged and sorted by timestamp, for display.
    pub fn merged_chronological(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .drinks
            .iter()
            .cloned()
            .map(LedgerEntry::Drink)
            .chain(self.water.iter().cloned().map(LedgerEntry::Water))
            .chain(self.toilet.iter().cloned().map(LedgerEntry::Toilet))
            .collect();
        // Stable sort keeps insertion order for identical timestamps.
        entries.sort_by_key(LedgerEntry::timestamp);
        entries
    }
}
