//! Profile command: show or update body and pacing settings.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset};
use clap::Args;
use dt_core::{
    BiologicalSex, Command, HapticPort, NotificationPort, Outcome, PersistencePort, ProfileUpdate,
    Tracker, UserProfile,
};

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Body weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Biological sex: male or female.
    #[arg(long)]
    pub sex: Option<BiologicalSex>,

    /// Daily pure-alcohol limit in grams.
    #[arg(long)]
    pub limit: Option<f64>,

    /// Target minutes per drink.
    #[arg(long)]
    pub pace: Option<f64>,

    /// Hydration reminder interval in minutes.
    #[arg(long)]
    pub reminder: Option<u32>,

    /// Haptic feedback on or off.
    #[arg(long)]
    pub vibration: Option<bool>,
}

impl ProfileArgs {
    fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            body_weight_kg: self.weight,
            sex: self.sex,
            daily_limit_g: self.limit,
            target_pace_min: self.pace,
            water_reminder_interval_min: self.reminder,
            vibration_enabled: self.vibration,
        }
    }
}

pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &ProfileArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let update = args.update();
    if !update.is_empty() {
        let outcome = tracker.dispatch(Command::UpdateProfile(update), now)?;
        let Outcome::ProfileUpdated { restart_reminder } = outcome else {
            bail!("unexpected outcome: {outcome:?}");
        };
        writeln!(writer, "Profile updated.")?;
        if restart_reminder {
            writeln!(
                writer,
                "Reminder interval changed; restart `dt remind` to apply it."
            )?;
        }
    }
    write_profile(writer, tracker.profile())?;
    Ok(())
}

fn write_profile<W: Write>(writer: &mut W, profile: &UserProfile) -> std::io::Result<()> {
    writeln!(writer, "Weight: {} kg", profile.body_weight_kg)?;
    writeln!(writer, "Sex: {}", profile.sex)?;
    writeln!(writer, "Daily limit: {} g", profile.daily_limit_g)?;
    writeln!(writer, "Target pace: {} min/drink", profile.target_pace_min)?;
    writeln!(
        writer,
        "Water reminder: every {} min",
        profile.water_reminder_interval_min
    )?;
    writeln!(
        writer,
        "Vibration: {}",
        if profile.vibration_enabled { "on" } else { "off" }
    )
}
