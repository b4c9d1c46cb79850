//! Presets command: the fixed drink catalog.

use std::io::Write;

use anyhow::Result;
use dt_core::{FavoritesSet, catalog};

pub fn run<W: Write>(writer: &mut W, favorites: &FavoritesSet) -> Result<()> {
    for preset in &catalog::PRESETS {
        write!(
            writer,
            "{} {} ({}): {}",
            preset.emoji, preset.name, preset.drink_type, preset.info
        )?;
        if favorites.contains(preset.drink_type.as_str()) {
            write!(writer, " ★")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
