//! Storage layer for the drink tracker.
//!
//! Persists the core's snapshots (day ledger, profile, favorites and the
//! last-seen date) using `rusqlite`.
//!
//! # Thread Safety
//!
//! [`Store`] wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Move it between threads freely; wrap it in a `Mutex` to share it.
//!
//! # Schema
//!
//! A single key-value table. Each snapshot is one row whose `value` column
//! holds the JSON form of the core type, overwritten whole on every save.
//! `updated_at` is an ISO 8601 UTC timestamp with millisecond precision.
//!
//! Evolving snapshot payloads:
//! - Adding fields: give them a serde default so old rows still load
//! - Removing or renaming fields: old rows fail to parse and the core falls
//!   back to defaults for that snapshot

use std::path::Path;

use chrono::{NaiveDate, SecondsFormat, Utc};
use dt_core::{DayLedger, FavoritesSet, PersistencePort, UserProfile};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const LEDGER_KEY: &str = "ledger";
const PROFILE_KEY: &str = "profile";
const FAVORITES_KEY: &str = "favorites";
const LAST_SEEN_KEY: &str = "last_seen_date";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored snapshot could not be encoded or parsed.
    #[error("invalid {key} snapshot")]
    Snapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory database. Nothing survives the connection.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Idempotent schema setup.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Replaces the snapshot stored under `key`.
    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let json = serde_json::to_string(value).map_err(|source| DbError::Snapshot {
            key: key.to_string(),
            source,
        })?;
        self.conn.execute(
            "
            INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, json, format_timestamp()],
        )?;
        tracing::debug!(key, bytes = json.len(), "snapshot saved");
        Ok(())
    }

    /// Reads the snapshot under `key`, or `None` if nothing was stored.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        json.map(|json| {
            serde_json::from_str(&json).map_err(|source| DbError::Snapshot {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }
}

fn format_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl PersistencePort for Store {
    type Error = DbError;

    fn save_ledger(&mut self, ledger: &DayLedger) -> Result<(), DbError> {
        self.put(LEDGER_KEY, ledger)
    }

    fn load_ledger(&self) -> Result<Option<DayLedger>, DbError> {
        self.get(LEDGER_KEY)
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), DbError> {
        self.put(PROFILE_KEY, profile)
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, DbError> {
        self.get(PROFILE_KEY)
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<(), DbError> {
        self.put(FAVORITES_KEY, favorites)
    }

    fn load_favorites(&self) -> Result<Option<FavoritesSet>, DbError> {
        self.get(FAVORITES_KEY)
    }

    fn save_last_seen_date(&mut self, date: NaiveDate) -> Result<(), DbError> {
        self.put(LAST_SEEN_KEY, &date)
    }

    fn load_last_seen_date(&self) -> Result<Option<NaiveDate>, DbError> {
        self.get(LAST_SEEN_KEY)
    }
}
