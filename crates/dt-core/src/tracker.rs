//! Application state and command dispatch.
//!
//! [`Tracker`] owns the day ledger, the profile and the favorites, plus the
//! three ports. The shell turns raw input into a [`Command`] and hands it to
//! [`Tracker::dispatch`]; every mutation is persisted before dispatch returns.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

use crate::catalog::{self, DrinkPreset};
use crate::drink_type::DrinkType;
use crate::event::{DrinkEvent, EventKind, LedgerEntry, ToiletEvent, WaterEvent};
use crate::favorites::{self, FavoritesSet, Toggle};
use crate::ledger::{DayLedger, LedgerError};
use crate::metrics::{Metrics, MetricsConfig, total_alcohol_grams};
use crate::ports::{HapticIntensity, HapticPort, NotificationPort, PersistencePort, Severity};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::reminder::{self, ReminderSchedule};
use crate::rollover;
use crate::types::{EventId, ValidationError};
use crate::warning::{self, WarningReport};

/// Errors returned from [`Tracker::dispatch`]. None of them leave state changed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("no {kind} event with id {id}")]
    NotFound { kind: EventKind, id: EventId },
}

impl From<LedgerError> for TrackerError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidInput(e) => Self::InvalidInput(e),
            LedgerError::NotFound { kind, id } => Self::NotFound { kind, id },
        }
    }
}

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddDrink {
        drink_type: DrinkType,
        volume_ml: f64,
        abv_percent: f64,
    },
    /// Adds a drink using the preset's volume and ABV.
    AddPreset(DrinkType),
    AddWater {
        amount_ml: f64,
    },
    AddToilet,
    DeleteEvent {
        kind: EventKind,
        id: EventId,
    },
    ToggleFavorite(String),
    UpdateProfile(ProfileUpdate),
    ClearHistory,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    DrinkAdded {
        event: DrinkEvent,
        report: WarningReport,
    },
    WaterAdded(WaterEvent),
    ToiletAdded(ToiletEvent),
    Deleted(LedgerEntry),
    FavoriteToggled {
        tag: String,
        toggle: Toggle,
    },
    ProfileUpdated {
        /// The reminder interval changed; the shell must restart its timer.
        restart_reminder: bool,
    },
    Cleared,
}

/// The whole application state for one session.
pub struct Tracker<S, N, H> {
    store: S,
    notifier: N,
    haptics: H,
    config: MetricsConfig,
    ledger: DayLedger,
    profile: UserProfile,
    favorites: FavoritesSet,
    limit_exceeded: bool,
}

/// Unwraps a load, treating a read failure as "nothing stored".
fn recover<T, E: std::error::Error>(result: Result<Option<T>, E>, what: &str) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load {what}, falling back to defaults");
            None
        }
    }
}

impl<S, N, H> Tracker<S, N, H>
where
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    /// Loads every snapshot and applies the day rollover for `today`.
    ///
    /// Malformed or unreadable snapshots are replaced by defaults.
    pub fn open(store: S, notifier: N, haptics: H, config: MetricsConfig, today: NaiveDate) -> Self {
        let profile = recover(store.load_profile(), "profile")
            .filter(|p| p.validate().is_ok())
            .unwrap_or_default();
        let favorites = recover(store.load_favorites(), "favorites").unwrap_or_default();
        let last_seen = recover(store.load_last_seen_date(), "last seen date");
        let stored = recover(store.load_ledger(), "ledger");

        let (ledger, reset) = rollover::resolve_startup_ledger(stored, last_seen, today);
        let limit_exceeded = total_alcohol_grams(&ledger) > profile.daily_limit_g;

        let mut tracker = Self {
            store,
            notifier,
            haptics,
            config,
            ledger,
            profile,
            favorites,
            limit_exceeded,
        };
        if reset {
            tracker.persist_ledger();
        }
        tracker
    }

    pub const fn ledger(&self) -> &DayLedger {
        &self.ledger
    }

    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub const fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub const fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Whether the persistent limit-exceeded indicator is showing.
    pub const fn limit_exceeded(&self) -> bool {
        self.limit_exceeded
    }

    pub fn metrics(&self, now: DateTime<Utc>) -> Metrics {
        Metrics::compute(&self.ledger, &self.profile, &self.config, now)
    }

    pub fn history(&self) -> Vec<LedgerEntry> {
        self.ledger.merged_chronological()
    }

    /// Favorites for the quick-add strip.
    pub fn favorite_presets(&self) -> Vec<&'static DrinkPreset> {
        self.favorites.list(favorites::DISPLAY_LIMIT)
    }

    pub const fn reminder_schedule(&self) -> ReminderSchedule {
        ReminderSchedule::from_profile(&self.profile)
    }

    /// Runs a command with the event timestamped at `now`.
    pub fn dispatch(
        &mut self,
        command: Command,
        now: DateTime<FixedOffset>,
    ) -> Result<Outcome, TrackerError> {
        self.dispatch_at(command, now, now.with_timezone(&Utc))
    }

    /// Runs a command, recording any new event at `at`.
    ///
    /// `now` supplies the wall clock and the local calendar day; `at` must fall
    /// on that same day, no later than `now`.
    pub fn dispatch_at(
        &mut self,
        command: Command,
        now: DateTime<FixedOffset>,
        at: DateTime<Utc>,
    ) -> Result<Outcome, TrackerError> {
        let today = now.date_naive();
        if rollover::ensure_current(&mut self.ledger, today) {
            self.refresh_limit_indicator();
            self.persist_ledger();
        }

        match command {
            Command::AddDrink {
                drink_type,
                volume_ml,
                abv_percent,
            } => self.add_drink(drink_type, volume_ml, abv_percent, now, at),
            Command::AddPreset(drink_type) => {
                let preset = catalog::lookup(drink_type).ok_or_else(|| {
                    ValidationError::NotAPreset {
                        tag: drink_type.to_string(),
                    }
                })?;
                self.add_drink(drink_type, preset.volume_ml, preset.abv_percent, now, at)
            }
            Command::AddWater { amount_ml } => {
                Self::require_same_day(at, now)?;
                let event = self.ledger.add_water(amount_ml, at)?;
                self.persist_ledger();
                self.haptic(HapticIntensity::Light);
                Ok(Outcome::WaterAdded(event))
            }
            Command::AddToilet => {
                Self::require_same_day(at, now)?;
                let event = self.ledger.add_toilet(at);
                self.persist_ledger();
                self.haptic(HapticIntensity::Light);
                Ok(Outcome::ToiletAdded(event))
            }
            Command::DeleteEvent { kind, id } => {
                let removed = self.ledger.delete_event(kind, id)?;
                self.refresh_limit_indicator();
                self.persist_ledger();
                self.haptic(HapticIntensity::Light);
                Ok(Outcome::Deleted(removed))
            }
            Command::ToggleFavorite(tag) => {
                if catalog::lookup_tag(&tag).is_none() && !self.favorites.contains(&tag) {
                    return Err(ValidationError::NotAPreset { tag }.into());
                }
                let toggle = self.favorites.toggle(&tag);
                if let Err(err) = self.store.save_favorites(&self.favorites) {
                    tracing::warn!(error = %err, "failed to save favorites");
                }
                self.haptic(match toggle {
                    Toggle::Added => HapticIntensity::PatternSuccess,
                    Toggle::Removed => HapticIntensity::Light,
                });
                Ok(Outcome::FavoriteToggled { tag, toggle })
            }
            Command::UpdateProfile(update) => {
                let previous = self.profile.clone();
                self.profile.apply(&update)?;
                if let Err(err) = self.store.save_profile(&self.profile) {
                    tracing::warn!(error = %err, "failed to save profile");
                }
                self.refresh_limit_indicator();
                let restart_reminder = reminder::restart_required(&previous, &self.profile);
                tracing::debug!(restart_reminder, "profile updated");
                Ok(Outcome::ProfileUpdated { restart_reminder })
            }
            Command::ClearHistory => {
                self.ledger.clear();
                self.refresh_limit_indicator();
                self.persist_ledger();
                Ok(Outcome::Cleared)
            }
        }
    }

    fn add_drink(
        &mut self,
        drink_type: DrinkType,
        volume_ml: f64,
        abv_percent: f64,
        now: DateTime<FixedOffset>,
        at: DateTime<Utc>,
    ) -> Result<Outcome, TrackerError> {
        Self::require_same_day(at, now)?;
        let event = self.ledger.add_drink(drink_type, volume_ml, abv_percent, at)?;
        self.persist_ledger();
        self.haptic(HapticIntensity::Medium);

        let report = warning::evaluate(
            &self.ledger,
            &self.profile,
            &self.config,
            now.with_timezone(&Utc),
        );
        self.limit_exceeded = report.limit_exceeded;
        for warning in &report.warnings {
            self.notifier.notify(&warning.to_string(), warning.severity());
        }
        match report.max_severity() {
            Some(Severity::Danger) => self.haptic(HapticIntensity::PatternError),
            Some(_) => self.haptic(HapticIntensity::PatternWarning),
            None => {}
        }
        Ok(Outcome::DrinkAdded { event, report })
    }

    fn require_same_day(at: DateTime<Utc>, now: DateTime<FixedOffset>) -> Result<(), ValidationError> {
        if at > now {
            return Err(ValidationError::InFuture { at });
        }
        let date = at.with_timezone(now.offset()).date_naive();
        if date == now.date_naive() {
            Ok(())
        } else {
            Err(ValidationError::OutsideDay { date })
        }
    }

    fn refresh_limit_indicator(&mut self) {
        self.limit_exceeded = total_alcohol_grams(&self.ledger) > self.profile.daily_limit_g;
    }

    /// Writes the ledger and the last-seen date. Failures are logged, not returned.
    fn persist_ledger(&mut self) {
        if let Err(err) = self.store.save_ledger(&self.ledger) {
            tracing::warn!(error = %err, "failed to save ledger");
        }
        if let Err(err) = self.store.save_last_seen_date(self.ledger.date) {
            tracing::warn!(error = %err, "failed to save last seen date");
        }
    }

    fn haptic(&mut self, intensity: HapticIntensity) {
        if !self.profile.vibration_enabled {
            return;
        }
        if let Err(err) = self.haptics.feedback(intensity) {
            tracing::debug!(error = %err, ?intensity, "haptic feedback unavailable");
        }
    }
}
