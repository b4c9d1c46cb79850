use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::Parser;
use dt_core::{NoHaptics, Tracker};
use dt_db::Store;
use tracing_subscriber::EnvFilter;

use dt_cli::commands::{
    clear, delete, drink, favorites, history, presets, profile, remind, status, toilet, util,
    water,
};
use dt_cli::{Cli, Commands, Config, TerminalNotifier};

type CliTracker = Tracker<Store, TerminalNotifier, NoHaptics>;

/// Load config and open the tracker, ensuring the database directory exists.
fn open_tracker(config_path: Option<&Path>, now: DateTime<FixedOffset>) -> Result<(CliTracker, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let store = Store::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let tracker = Tracker::open(
        store,
        TerminalNotifier::stderr(),
        NoHaptics,
        config.metrics(),
        now.date_naive(),
    );
    Ok((tracker, config))
}

fn run_reminder(tracker: &CliTracker, out: &mut impl Write) -> Result<()> {
    let schedule = tracker.reminder_schedule();
    writeln!(
        out,
        "Reminding you to drink water every {} minutes. Press Ctrl-C to stop.",
        schedule.interval_minutes()
    )?;
    out.flush()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let mut notifier = TerminalNotifier::stderr();
    let fired = runtime.block_on(remind::run(&mut notifier, schedule, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        }
    }))?;
    writeln!(out, "Stopped after {fired} reminders.")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let now = util::local_now();
    let (mut tracker, config) = open_tracker(cli.config.as_deref(), now)?;
    let mut out = io::stdout().lock();

    match command {
        Commands::Drink(args) => drink::run_preset(&mut out, &mut tracker, &args, now)?,
        Commands::Custom(args) => drink::run_custom(&mut out, &mut tracker, &args, now)?,
        Commands::Water(args) => {
            water::run(&mut out, &mut tracker, &args, config.default_water_ml, now)?;
        }
        Commands::Toilet(args) => toilet::run(&mut out, &mut tracker, &args, now)?,
        Commands::Delete(args) => delete::run(&mut out, &mut tracker, &args, now)?,
        Commands::Clear => clear::run(&mut out, &mut tracker, now)?,
        Commands::History(args) => history::run(&mut out, &tracker, &args, now)?,
        Commands::Status(args) => status::run(&mut out, &tracker, &args, now)?,
        Commands::Presets => presets::run(&mut out, tracker.favorites())?,
        Commands::Favorite(args) => favorites::toggle(&mut out, &mut tracker, &args, now)?,
        Commands::Favorites => favorites::list(&mut out, &tracker)?,
        Commands::Profile(args) => profile::run(&mut out, &mut tracker, &args, now)?,
        Commands::Remind => run_reminder(&tracker, &mut out)?,
    }

    Ok(())
}
