//! CLI subcommand implementations.
//!
//! Each command takes the open [`dt_core::Tracker`] and the current local time,
//! and writes its report to the given writer. Warnings raised by the core go
//! through the tracker's notifier instead.

pub mod clear;
pub mod delete;
pub mod drink;
pub mod favorites;
pub mod history;
pub mod presets;
pub mod profile;
pub mod remind;
pub mod status;
pub mod toilet;
pub mod util;
pub mod water;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, FixedOffset};
    use dt_core::{MemoryStore, MetricsConfig, NoHaptics, Tracker, UserProfile};

    use crate::shell::TerminalNotifier;

    pub type TestTracker = Tracker<MemoryStore, TerminalNotifier<Vec<u8>>, NoHaptics>;

    /// 19:00 on 2024-01-01 at +09:00.
    pub fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-01T19:00:00+09:00").unwrap()
    }

    pub fn tracker_with(profile: UserProfile) -> TestTracker {
        let store = MemoryStore {
            profile: Some(profile),
            ..MemoryStore::default()
        };
        Tracker::open(
            store,
            TerminalNotifier::new(Vec::new()),
            NoHaptics,
            MetricsConfig::default(),
            now().date_naive(),
        )
    }

    pub fn tracker() -> TestTracker {
        tracker_with(UserProfile::default())
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
