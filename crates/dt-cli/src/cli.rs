//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{delete, drink, favorites, history, profile, status, toilet, water};

/// Drink tracker.
///
/// Logs drinks, water and bathroom visits for the day and estimates blood
/// alcohol content, pace and time until sober.
#[derive(Debug, Parser)]
#[command(name = "dt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a preset drink.
    Drink(drink::PresetArgs),

    /// Record a drink with a custom volume and strength.
    Custom(drink::CustomArgs),

    /// Record a glass of water.
    Water(water::WaterArgs),

    /// Record a bathroom visit.
    Toilet(toilet::ToiletArgs),

    /// Delete a recorded event.
    Delete(delete::DeleteArgs),

    /// Delete every event recorded today.
    Clear,

    /// Show today's events in order.
    History(history::HistoryArgs),

    /// Show today's totals, BAC and warnings.
    Status(status::StatusArgs),

    /// List the preset drinks.
    Presets,

    /// Add or remove a preset from favorites.
    Favorite(favorites::FavoriteArgs),

    /// List favorite presets.
    Favorites,

    /// Show or update the profile.
    Profile(profile::ProfileArgs),

    /// Run the hydration reminder until interrupted.
    Remind,
}
