//! Hydration reminder schedule.
//!
//! The timer itself belongs to the shell. The core only says how often it
//! fires and when a settings change means it must be restarted.

use chrono::{DateTime, Duration, Utc};

use crate::ports::Severity;
use crate::profile::UserProfile;

pub const REMINDER_MESSAGE: &str = "💧 Time to drink some water!";
pub const REMINDER_SEVERITY: Severity = Severity::Info;

/// Fixed-interval reminder schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSchedule {
    interval_min: u32,
}

impl ReminderSchedule {
    pub const fn from_profile(profile: &UserProfile) -> Self {
        Self {
            interval_min: profile.water_reminder_interval_min,
        }
    }

    pub const fn interval_minutes(&self) -> u32 {
        self.interval_min
    }

    pub fn interval(&self) -> Duration {
        Duration::minutes(i64::from(self.interval_min))
    }

    /// The interval as a std duration, for shell timers.
    pub fn period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.interval_min) * 60)
    }

    /// When the reminder fires next, given when it was started or last fired.
    pub fn next_due(&self, last: DateTime<Utc>) -> DateTime<Utc> {
        last + self.interval()
    }
}

/// Whether a running reminder must be stopped and restarted after a profile change.
pub fn restart_required(old: &UserProfile, new: &UserProfile) -> bool {
    old.water_reminder_interval_min != new.water_reminder_interval_min
}
