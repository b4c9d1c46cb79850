//! Drink tracker CLI library.
//!
//! This crate provides the terminal shell around `dt-core`: argument parsing,
//! configuration, command rendering and the reminder loop.

mod cli;
pub mod commands;
mod config;
mod shell;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use shell::TerminalNotifier;
