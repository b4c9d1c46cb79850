//! Day rollover: a ledger only ever holds today's events.

use chrono::NaiveDate;

use crate::ledger::DayLedger;

/// Whether a stored ledger still belongs to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    /// The ledger's date is today.
    Fresh,
    /// The ledger is from another day, or no date was ever stored.
    Stale,
}

/// Compares the last-known date against today.
pub fn assess(last_seen: Option<NaiveDate>, today: NaiveDate) -> DayState {
    match last_seen {
        Some(date) if date == today => DayState::Fresh,
        _ => DayState::Stale,
    }
}

/// Moves a stale ledger onto `today`, clearing every event.
///
/// Returns `true` when the ledger was reset and must be persisted.
pub fn ensure_current(ledger: &mut DayLedger, today: NaiveDate) -> bool {
    if assess(Some(ledger.date), today) == DayState::Fresh {
        return false;
    }
    tracing::debug!(from = %ledger.date, to = %today, "day rollover, clearing ledger");
    ledger.clear();
    ledger.date = today;
    true
}

/// Picks the ledger to start the session with.
///
/// A stored ledger is kept only when both it and the last-seen date are today.
pub fn resolve_startup_ledger(
    stored: Option<DayLedger>,
    last_seen: Option<NaiveDate>,
    today: NaiveDate,
) -> (DayLedger, bool) {
    match stored {
        Some(ledger)
            if assess(last_seen, today) == DayState::Fresh
                && assess(Some(ledger.date), today) == DayState::Fresh =>
        {
            (ledger, false)
        }
        Some(mut ledger) => {
            ensure_current(&mut ledger, today);
            (ledger, true)
        }
        None => (DayLedger::new(today), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    use crate::drink_type::DrinkType;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stored_ledger(day: &str) -> DayLedger {
        let mut ledger = DayLedger::new(date(day));
        let at: DateTime<Utc> = format!("{day}T20:00:00Z").parse().unwrap();
        ledger.add_drink(DrinkType::Beer, 350.0, 5.0, at).unwrap();
        ledger.add_water(200.0, at).unwrap();
        ledger
    }

    #[test]
    fn assess_states() {
        let today = date("2024-01-02");
        assert_eq!(assess(Some(today), today), DayState::Fresh);
        assert_eq!(assess(Some(date("2024-01-01")), today), DayState::Stale);
        assert_eq!(assess(None, today), DayState::Stale);
    }

    #[test]
    fn next_day_load_yields_empty_ledger() {
        let (ledger, reset) = resolve_startup_ledger(
            Some(stored_ledger("2024-01-01")),
            Some(date("2024-01-01")),
            date("2024-01-02"),
        );
        assert!(reset);
        assert!(ledger.is_empty());
        assert!(ledger.first_drink_at.is_none());
        assert_eq!(ledger.date, date("2024-01-02"));
    }

    #[test]
    fn same_day_load_keeps_events() {
        let (ledger, reset) = resolve_startup_ledger(
            Some(stored_ledger("2024-01-02")),
            Some(date("2024-01-02")),
            date("2024-01-02"),
        );
        assert!(!reset);
        assert_eq!(ledger.drinks.len(), 1);
    }

    #[test]
    fn missing_last_seen_date_is_stale() {
        let (ledger, reset) =
            resolve_startup_ledger(Some(stored_ledger("2024-01-02")), None, date("2024-01-02"));
        assert!(reset);
        assert!(ledger.is_empty());
    }

    #[test]
    fn nothing_stored_starts_fresh_ledger() {
        let (ledger, reset) = resolve_startup_ledger(None, None, date("2024-01-02"));
        assert!(reset);
        assert_eq!(ledger, DayLedger::new(date("2024-01-02")));
    }

    #[test]
    fn ensure_current_is_idempotent() {
        let mut ledger = stored_ledger("2024-01-01");
        assert!(ensure_current(&mut ledger, date("2024-01-02")));
        assert!(!ensure_current(&mut ledger, date("2024-01-02")));
    }
}
