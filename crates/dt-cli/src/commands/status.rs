//! Status command: today's totals, BAC and limit progress.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::Args;
use dt_core::metrics::{format_pace, format_ratio};
use dt_core::{HapticPort, Metrics, NotificationPort, PersistencePort, Tracker, UserProfile};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    date: NaiveDate,
    metrics: &'a Metrics,
    profile: &'a UserProfile,
}

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &Tracker<S, N, H>,
    args: &StatusArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let metrics = tracker.metrics(now.with_timezone(&Utc));

    if args.json {
        let report = StatusReport {
            date: tracker.ledger().date,
            metrics: &metrics,
            profile: tracker.profile(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(writer, "Drink tracker: {}", tracker.ledger().date)?;
    writeln!(
        writer,
        "Drinks: {}   Water: {} ml   Toilet: {}",
        metrics.drink_count, metrics.total_water_ml, metrics.toilet_count
    )?;
    write_progress(writer, &metrics, tracker.profile())?;
    writeln!(writer, "Remaining: {:.1} g", metrics.remaining_allowance_g)?;
    writeln!(writer, "Pace: {}", format_pace(metrics.current_pace_min))?;
    writeln!(
        writer,
        "Water ratio: {}",
        format_ratio(metrics.water_alcohol_ratio)
    )?;
    writeln!(writer, "BAC: {:.2}% ({})", metrics.bac, metrics.bac_status)?;
    writeln!(writer, "Sober in: {}", metrics.sober_in)?;
    writeln!(
        writer,
        "Recommended water: {} ml",
        metrics.recommended_water_ml
    )?;
    if tracker.limit_exceeded() {
        writeln!(writer, "Daily limit exceeded!")?;
    }
    Ok(())
}

/// One line of progress against the daily limit, shared by the add commands.
pub fn write_progress<W: Write>(
    writer: &mut W,
    metrics: &Metrics,
    profile: &UserProfile,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "Alcohol: {:.1} g of {} g ({:.0}%, {})",
        metrics.total_alcohol_g,
        profile.daily_limit_g,
        metrics.progress_percent,
        metrics.progress_severity.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use dt_core::{BiologicalSex, Command, DrinkType};
    use insta::assert_snapshot;

    use crate::commands::testing::{now, output, tracker, tracker_with};

    #[test]
    fn status_of_empty_day() {
        let tracker = tracker();
        let mut buf = Vec::new();
        run(&mut buf, &tracker, &StatusArgs { json: false }, now()).unwrap();

        assert_snapshot!(output(buf), @r"
        Drink tracker: 2024-01-01
        Drinks: 0   Water: 0 ml   Toilet: 0
        Alcohol: 0.0 g of 20 g (0%, normal)
        Remaining: 20.0 g
        Pace: -
        Water ratio: -
        BAC: 0.00% (sober)
        Sober in: 0 hours
        Recommended water: 0 ml
        ");
    }

    #[test]
    fn status_after_exceeding_limit() {
        let mut tracker = tracker_with(UserProfile {
            body_weight_kg: 70.0,
            sex: BiologicalSex::Male,
            ..UserProfile::default()
        });
        tracker.dispatch(Command::AddPreset(DrinkType::Beer), now()).unwrap();
        let later = now() + Duration::minutes(10);
        tracker
            .dispatch(Command::AddPreset(DrinkType::Highball), later)
            .unwrap();

        let mut buf = Vec::new();
        run(&mut buf, &tracker, &StatusArgs { json: false }, later).unwrap();

        assert_snapshot!(output(buf), @r"
        Drink tracker: 2024-01-01
        Drinks: 2   Water: 0 ml   Toilet: 0
        Alcohol: 30.8 g of 20 g (100%, danger)
        Remaining: 0.0 g
        Pace: 5 min/drink
        Water ratio: -
        BAC: 0.05% (tipsy)
        Sober in: 0 hours
        Recommended water: 650 ml
        Daily limit exceeded!
        ");
    }

    #[test]
    fn status_json_carries_metrics() {
        let mut tracker = tracker();
        tracker
            .dispatch(Command::AddWater { amount_ml: 300.0 }, now())
            .unwrap();
        tracker.dispatch(Command::AddToilet, now()).unwrap();

        let mut buf = Vec::new();
        run(&mut buf, &tracker, &StatusArgs { json: true }, now()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["metrics"]["toilet_count"], 1);
        assert_eq!(value["metrics"]["total_water_ml"], 300.0);
        assert_eq!(value["metrics"]["bac_status"], "normal");
        assert_eq!(value["profile"]["body_weight_kg"], 77.0);
    }
}
