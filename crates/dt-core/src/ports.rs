//! Boundaries between the core and its shell.
//!
//! The core never touches storage, screens or vibration motors directly. It
//! calls these traits and the shell decides what they mean on its platform.

use std::convert::Infallible;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::favorites::FavoritesSet;
use crate::ledger::DayLedger;
use crate::profile::UserProfile;

/// Notification level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Haptic feedback intent. The shell maps it to whatever its platform offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HapticIntensity {
    Light,
    Medium,
    Heavy,
    PatternSuccess,
    PatternWarning,
    PatternError,
}

/// Haptics could not be delivered. Never surfaced past the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackUnavailable {
    #[error("haptic feedback is not supported on this platform")]
    Unsupported,
    #[error("haptic feedback failed: {0}")]
    Failed(String),
}

/// Snapshot storage for the ledger, profile, favorites and last-seen date.
///
/// Loads return `Ok(None)` when nothing was stored. A malformed snapshot
/// should surface as `Err`; the caller falls back to defaults.
pub trait PersistencePort {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save_ledger(&mut self, ledger: &DayLedger) -> Result<(), Self::Error>;
    fn load_ledger(&self) -> Result<Option<DayLedger>, Self::Error>;

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), Self::Error>;
    fn load_profile(&self) -> Result<Option<UserProfile>, Self::Error>;

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<(), Self::Error>;
    fn load_favorites(&self) -> Result<Option<FavoritesSet>, Self::Error>;

    fn save_last_seen_date(&mut self, date: NaiveDate) -> Result<(), Self::Error>;
    fn load_last_seen_date(&self) -> Result<Option<NaiveDate>, Self::Error>;
}

/// Fire-and-forget user notifications.
pub trait NotificationPort {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Best-effort haptic feedback.
pub trait HapticPort {
    fn feedback(&mut self, intensity: HapticIntensity) -> Result<(), FeedbackUnavailable>;
}

/// Holds every snapshot in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub ledger: Option<DayLedger>,
    pub profile: Option<UserProfile>,
    pub favorites: Option<FavoritesSet>,
    pub last_seen_date: Option<NaiveDate>,
}

impl PersistencePort for MemoryStore {
    type Error = Infallible;

    fn save_ledger(&mut self, ledger: &DayLedger) -> Result<(), Self::Error> {
        self.ledger = Some(ledger.clone());
        Ok(())
    }

    fn load_ledger(&self) -> Result<Option<DayLedger>, Self::Error> {
        Ok(self.ledger.clone())
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), Self::Error> {
        self.profile = Some(profile.clone());
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, Self::Error> {
        Ok(self.profile.clone())
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<(), Self::Error> {
        self.favorites = Some(favorites.clone());
        Ok(())
    }

    fn load_favorites(&self) -> Result<Option<FavoritesSet>, Self::Error> {
        Ok(self.favorites.clone())
    }

    fn save_last_seen_date(&mut self, date: NaiveDate) -> Result<(), Self::Error> {
        self.last_seen_date = Some(date);
        Ok(())
    }

    fn load_last_seen_date(&self) -> Result<Option<NaiveDate>, Self::Error> {
        Ok(self.last_seen_date)
    }
}

/// Drops every haptic intent, reporting the capability as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticPort for NoHaptics {
    fn feedback(&mut self, _intensity: HapticIntensity) -> Result<(), FeedbackUnavailable> {
        Err(FeedbackUnavailable::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_level() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Danger);
        assert_eq!(Severity::Danger.to_string(), "danger");
    }

    #[test]
    fn haptic_intensity_tags() {
        let json = serde_json::to_string(&HapticIntensity::PatternSuccess).unwrap();
        assert_eq!(json, "\"pattern-success\"");
    }

    #[test]
    fn memory_store_roundtrips_snapshots() {
        let mut store = MemoryStore::default();
        assert!(store.load_ledger().unwrap().is_none());

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store.save_ledger(&DayLedger::new(date)).unwrap();
        store.save_last_seen_date(date).unwrap();
        assert_eq!(store.load_ledger().unwrap().unwrap().date, date);
        assert_eq!(store.load_last_seen_date().unwrap(), Some(date));
    }
}
