//! Toilet command.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset};
use clap::Args;
use dt_core::{Command, HapticPort, NotificationPort, Outcome, PersistencePort, Tracker};

use super::util;

#[derive(Debug, Args)]
pub struct ToiletArgs {
    /// When it happened: ISO 8601, HH:MM, or "N minutes ago".
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &ToiletArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let at = util::resolve_at(args.at.as_deref(), now)?;
    let outcome = tracker.dispatch_at(Command::AddToilet, now, at)?;
    let Outcome::ToiletAdded(event) = outcome else {
        bail!("unexpected outcome: {outcome:?}");
    };
    writeln!(
        writer,
        "Recorded 🚻 toilet visit at {} ({} today)",
        util::clock(event.timestamp, now.offset()),
        tracker.ledger().toilet.len()
    )?;
    Ok(())
}
