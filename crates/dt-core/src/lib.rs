//! Core domain logic for the drink tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Ledger: the drinks, water and bathroom visits recorded for one day
//! - Metrics: alcohol totals, pace, BAC estimation and sobering time
//! - Warnings: limit, pace and BAC alerts raised after each drink
//! - Tracker: the application state, driven by [`Command`]s through the ports
//!
//! Nothing here performs I/O. Storage, notifications and haptics go through
//! the traits in [`ports`].

pub mod catalog;
mod drink_type;
pub mod event;
pub mod favorites;
pub mod ledger;
pub mod metrics;
pub mod ports;
pub mod profile;
pub mod reminder;
pub mod rollover;
mod tracker;
mod types;
pub mod warning;

pub use catalog::DrinkPreset;
pub use drink_type::{DrinkType, UnknownDrinkType};
pub use event::{DrinkEvent, EventKind, LedgerEntry, ToiletEvent, UnknownEventKind, WaterEvent};
pub use favorites::{FavoritesSet, Toggle};
pub use ledger::{DayLedger, LedgerError};
pub use metrics::{BacModel, BacStatus, Metrics, MetricsConfig, ProgressSeverity, SoberEstimate};
pub use ports::{
    FeedbackUnavailable, HapticIntensity, HapticPort, MemoryStore, NoHaptics, NotificationPort,
    PersistencePort, Severity,
};
pub use profile::{ProfileUpdate, UserProfile};
pub use reminder::ReminderSchedule;
pub use tracker::{Command, Outcome, Tracker, TrackerError};
pub use types::{BiologicalSex, EventId, ValidationError, require_non_negative, require_positive};
pub use warning::{Warning, WarningReport};
