//! Water command.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use dt_core::{Command, HapticPort, NotificationPort, Outcome, PersistencePort, Tracker};

use super::util;

#[derive(Debug, Args)]
pub struct WaterArgs {
    /// Amount in ml. Defaults to the configured quick amount.
    pub amount: Option<f64>,

    /// When it was drunk: ISO 8601, HH:MM, or "N minutes ago".
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &WaterArgs,
    default_ml: f64,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let at = util::resolve_at(args.at.as_deref(), now)?;
    let amount_ml = args.amount.unwrap_or(default_ml);
    let outcome = tracker.dispatch_at(Command::AddWater { amount_ml }, now, at)?;
    let Outcome::WaterAdded(event) = outcome else {
        bail!("unexpected outcome: {outcome:?}");
    };

    writeln!(
        writer,
        "Added 💧 water at {}: {} ml",
        util::clock(event.timestamp, now.offset()),
        event.amount_ml
    )?;
    let metrics = tracker.metrics(now.with_timezone(&Utc));
    if metrics.recommended_water_ml > 0 {
        writeln!(
            writer,
            "Water today: {} ml of {} ml recommended",
            metrics.total_water_ml, metrics.recommended_water_ml
        )?;
    } else {
        writeln!(writer, "Water today: {} ml", metrics.total_water_ml)?;
    }
    Ok(())
}
