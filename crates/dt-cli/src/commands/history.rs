//! History command: today's events merged in time order.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::Args;
use dt_core::{HapticPort, LedgerEntry, NotificationPort, PersistencePort, Tracker, catalog};

use super::util;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &Tracker<S, N, H>,
    args: &HistoryArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let entries = tracker.history();

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No events recorded today.")?;
        return Ok(());
    }

    for entry in &entries {
        let time = util::clock(entry.timestamp(), now.offset());
        match entry {
            LedgerEntry::Drink(drink) => writeln!(
                writer,
                "{time}  {}  {} ml, {:.1} g  #{}",
                catalog::display_name(drink.drink_type),
                drink.volume_ml,
                drink.pure_alcohol_g,
                drink.id
            )?,
            LedgerEntry::Water(water) => writeln!(
                writer,
                "{time}  💧 Water  {} ml  #{}",
                water.amount_ml, water.id
            )?,
            LedgerEntry::Toilet(visit) => {
                writeln!(writer, "{time}  🚻 Toilet  #{}", visit.id)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, Utc};
    use dt_core::{Command, DrinkType};
    use insta::assert_snapshot;

    use crate::commands::testing::{now, output, tracker};

    #[test]
    fn empty_history() {
        let tracker = tracker();
        let mut buf = Vec::new();
        run(&mut buf, &tracker, &HistoryArgs { json: false }, now()).unwrap();
        assert_snapshot!(output(buf), @"No events recorded today.");
    }

    #[test]
    fn history_is_merged_in_time_order() {
        let mut tracker = tracker();
        let t = |minutes| (now() + Duration::minutes(minutes)).with_timezone(&Utc);
        tracker
            .dispatch_at(Command::AddPreset(DrinkType::Beer), now(), t(0))
            .unwrap();
        tracker
            .dispatch_at(Command::AddToilet, now(), t(-30))
            .unwrap();
        tracker
            .dispatch_at(Command::AddWater { amount_ml: 250.0 }, now(), t(-10))
            .unwrap();

        let mut buf = Vec::new();
        run(&mut buf, &tracker, &HistoryArgs { json: false }, now()).unwrap();

        assert_snapshot!(output(buf), @r"
        18:30  🚻 Toilet  #1704103200001
        18:50  💧 Water  250 ml  #1704103200002
        19:00  🍺 Beer  350 ml, 14.0 g  #1704103200000
        ");
    }

    #[test]
    fn history_json_is_tagged_by_kind() {
        let mut tracker = tracker();
        tracker
            .dispatch(Command::AddPreset(DrinkType::Whiskey), now())
            .unwrap();

        let mut buf = Vec::new();
        run(&mut buf, &tracker, &HistoryArgs { json: true }, now()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(value[0]["kind"], "drink");
        assert_eq!(value[0]["drink_type"], "whiskey");
        assert_eq!(value[0]["pure_alcohol_g"], 9.6);
    }
}
