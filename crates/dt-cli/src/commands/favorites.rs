//! Favorite commands: toggle a preset and list the quick-add strip.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset};
use clap::Args;
use dt_core::{
    Command, DrinkType, HapticPort, NotificationPort, Outcome, PersistencePort, Toggle, Tracker,
    catalog,
};

#[derive(Debug, Args)]
pub struct FavoriteArgs {
    /// Preset to add or remove.
    pub drink_type: DrinkType,
}

pub fn toggle<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &FavoriteArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let command = Command::ToggleFavorite(args.drink_type.to_string());
    let outcome = tracker.dispatch(command, now)?;
    let Outcome::FavoriteToggled { toggle, .. } = outcome else {
        bail!("unexpected outcome: {outcome:?}");
    };
    let name = catalog::display_name(args.drink_type);
    match toggle {
        Toggle::Added => writeln!(writer, "Added {name} to favorites")?,
        Toggle::Removed => writeln!(writer, "Removed {name} from favorites")?,
    }
    Ok(())
}

pub fn list<W, S, N, H>(writer: &mut W, tracker: &Tracker<S, N, H>) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let presets = tracker.favorite_presets();
    if presets.is_empty() {
        writeln!(writer, "No favorites yet. Add one with `dt favorite <type>`.")?;
        return Ok(());
    }
    for preset in presets {
        writeln!(
            writer,
            "{} {} ({}): {}",
            preset.emoji, preset.name, preset.drink_type, preset.info
        )?;
    }
    Ok(())
}
