//! Drink commands: preset and custom servings.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use dt_core::{
    Command, DrinkType, HapticPort, NotificationPort, Outcome, PersistencePort, Tracker, catalog,
};

use super::{status, util};

#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Preset to record (see `dt presets`).
    pub drink_type: DrinkType,

    /// When it was drunk: ISO 8601, HH:MM, or "N minutes ago".
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Debug, Args)]
pub struct CustomArgs {
    /// Volume in ml.
    #[arg(long)]
    pub volume: f64,

    /// Alcohol by volume, in percent.
    #[arg(long)]
    pub abv: f64,

    /// When it was drunk: ISO 8601, HH:MM, or "N minutes ago".
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run_preset<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &PresetArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    if args.drink_type == DrinkType::Custom {
        bail!("custom drinks need a volume and ABV, use `dt custom --volume <ml> --abv <pct>`");
    }
    let at = util::resolve_at(args.at.as_deref(), now)?;
    let outcome = tracker.dispatch_at(Command::AddPreset(args.drink_type), now, at)?;
    report(writer, tracker, &outcome, now)
}

pub fn run_custom<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &CustomArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let at = util::resolve_at(args.at.as_deref(), now)?;
    let command = Command::AddDrink {
        drink_type: DrinkType::Custom,
        volume_ml: args.volume,
        abv_percent: args.abv,
    };
    let outcome = tracker.dispatch_at(command, now, at)?;
    report(writer, tracker, &outcome, now)
}

fn report<W, S, N, H>(
    writer: &mut W,
    tracker: &Tracker<S, N, H>,
    outcome: &Outcome,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let Outcome::DrinkAdded { event, .. } = outcome else {
        bail!("unexpected outcome: {outcome:?}");
    };
    writeln!(
        writer,
        "Added {} at {}: {} ml, {}% ABV, {:.1} g alcohol",
        catalog::display_name(event.drink_type),
        util::clock(event.timestamp, now.offset()),
        event.volume_ml,
        event.abv_percent,
        event.pure_alcohol_g
    )?;
    let metrics = tracker.metrics(now.with_timezone(&Utc));
    status::write_progress(writer, &metrics, tracker.profile())?;
    Ok(())
}
