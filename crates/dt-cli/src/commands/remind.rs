//! Hydration reminder loop.

use std::future::Future;

use anyhow::{Result, ensure};
use dt_core::NotificationPort;
use dt_core::ReminderSchedule;
use dt_core::reminder::{REMINDER_MESSAGE, REMINDER_SEVERITY};
use tokio::select;
use tokio::time::{Instant, interval_at};
use tracing::{instrument, trace};

/// Emits a reminder every interval until `shutdown` resolves.
///
/// The first reminder fires one full interval after start. Returns how many fired.
#[instrument(skip(notifier, shutdown))]
pub async fn run<N, F>(notifier: &mut N, schedule: ReminderSchedule, shutdown: F) -> Result<u64>
where
    N: NotificationPort,
    F: Future<Output = ()>,
{
    let period = schedule.period();
    ensure!(!period.is_zero(), "reminder interval must be greater than 0");

    let mut ticker = interval_at(Instant::now() + period, period);
    tokio::pin!(shutdown);

    let mut fired = 0;
    loop {
        select! {
            _ = ticker.tick() => {
                notifier.notify(REMINDER_MESSAGE, REMINDER_SEVERITY);
                fired += 1;
                trace!(fired, "reminder fired");
            },
            () = &mut shutdown => {
                trace!(fired, "reminder stopped");
                return Ok(fired);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use dt_core::UserProfile;

    use crate::commands::testing::output;
    use crate::shell::TerminalNotifier;

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_interval_until_shutdown() {
        let schedule = ReminderSchedule::from_profile(&UserProfile::default());
        let mut notifier = TerminalNotifier::new(Vec::new());

        // Default interval is 20 minutes; stop just after the third.
        let shutdown = tokio::time::sleep(Duration::from_secs(61 * 60));
        let fired = run(&mut notifier, schedule, shutdown).await.unwrap();

        assert_eq!(fired, 3);
        assert_eq!(
            output(notifier.into_inner()),
            "💧 Time to drink some water!\n".repeat(3)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_first_interval() {
        let schedule = ReminderSchedule::from_profile(&UserProfile {
            water_reminder_interval_min: 30,
            ..UserProfile::default()
        });
        let mut notifier = TerminalNotifier::new(Vec::new());

        let shutdown = tokio::time::sleep(Duration::from_secs(29 * 60));
        let fired = run(&mut notifier, schedule, shutdown).await.unwrap();

        assert_eq!(fired, 0);
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let schedule = ReminderSchedule::from_profile(&UserProfile {
            water_reminder_interval_min: 0,
            ..UserProfile::default()
        });
        let mut notifier = TerminalNotifier::new(Vec::new());
        assert!(run(&mut notifier, schedule, async {}).await.is_err());
    }
}
