//! Clear command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use dt_core::{Command, HapticPort, NotificationPort, PersistencePort, Tracker};

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let removed = tracker.history().len();
    tracker.dispatch(Command::ClearHistory, now)?;
    writeln!(writer, "Cleared {removed} events from today's history")?;
    Ok(())
}
