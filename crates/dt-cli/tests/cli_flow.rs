//! End-to-end tests driving the `dt` binary against a temporary database.
//!
//! Each test points `--config` at a temp file naming a temp database, and
//! isolates `HOME`/XDG directories so the user's own config is never read.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn dt_binary() -> String {
    env!("CARGO_BIN_EXE_dt").to_string()
}

struct Env {
    temp: TempDir,
    config: PathBuf,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("data/dt.db");
        let config = temp.path().join("config.toml");
        std::fs::write(
            &config,
            format!(
                "database_path = \"{}\"\ndefault_water_ml = 250.0\n",
                db_path.display()
            ),
        )
        .unwrap();
        Self { temp, config }
    }

    fn home(&self) -> &Path {
        self.temp.path()
    }

    fn dt(&self, args: &[&str]) -> Output {
        Command::new(dt_binary())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("XDG_DATA_HOME", self.home().join(".local/share"))
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .expect("failed to run dt")
    }

    fn dt_ok(&self, args: &[&str]) -> (String, String) {
        let output = self.dt(args);
        assert!(
            output.status.success(),
            "dt {args:?} should succeed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        (
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap(),
        )
    }
}

#[test]
fn test_drinks_accumulate_and_warn() {
    let env = Env::new();

    let (stdout, stderr) = env.dt_ok(&["drink", "beer"]);
    assert!(stdout.contains("Added 🍺 Beer"), "stdout: {stdout}");
    assert!(stdout.contains("14.0 g of 20 g"), "stdout: {stdout}");
    assert!(!stderr.contains("exceeded"), "stderr: {stderr}");

    let (stdout, stderr) = env.dt_ok(&["drink", "highball"]);
    assert!(stdout.contains("30.8 g of 20 g"), "stdout: {stdout}");
    assert!(
        stderr.contains("You have exceeded your daily alcohol limit!"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("You are drinking too fast!"), "stderr: {stderr}");

    let (stdout, _) = env.dt_ok(&["status"]);
    assert!(stdout.contains("Drinks: 2"), "stdout: {stdout}");
    assert!(stdout.contains("Daily limit exceeded!"), "stdout: {stdout}");
}

#[test]
fn test_water_uses_configured_default() {
    let env = Env::new();
    env.dt_ok(&["water"]);
    env.dt_ok(&["water", "100"]);
    env.dt_ok(&["toilet"]);

    let (stdout, _) = env.dt_ok(&["status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["metrics"]["total_water_ml"], 350.0);
    assert_eq!(status["metrics"]["toilet_count"], 1);
}

#[test]
fn test_history_and_delete() {
    let env = Env::new();
    env.dt_ok(&["drink", "sake"]);
    env.dt_ok(&["custom", "--volume", "250", "--abv", "4.5"]);

    let (stdout, _) = env.dt_ok(&["history", "--json"]);
    let history: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["drink_type"], "custom");
    let id = history[0]["id"].as_i64().unwrap().to_string();

    let (stdout, _) = env.dt_ok(&["delete", "drink", &id]);
    assert_eq!(stdout.trim(), format!("Deleted drink #{id}"));

    // Deleting again is reported, not an error.
    let (stdout, _) = env.dt_ok(&["delete", "drink", &id]);
    assert!(stdout.contains("Nothing deleted"), "stdout: {stdout}");

    let (stdout, _) = env.dt_ok(&["history"]);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("🍹 Custom"), "stdout: {stdout}");
}

#[test]
fn test_clear_keeps_profile_and_favorites() {
    let env = Env::new();
    env.dt_ok(&["profile", "--weight", "65"]);
    env.dt_ok(&["favorite", "wine"]);
    env.dt_ok(&["drink", "wine"]);

    let (stdout, _) = env.dt_ok(&["clear"]);
    assert!(stdout.contains("Cleared 1 events"), "stdout: {stdout}");

    let (stdout, _) = env.dt_ok(&["history"]);
    assert_eq!(stdout.trim(), "No events recorded today.");

    let (stdout, _) = env.dt_ok(&["profile"]);
    assert!(stdout.contains("Weight: 65 kg"), "stdout: {stdout}");

    let (stdout, _) = env.dt_ok(&["favorites"]);
    assert!(stdout.contains("🍷 Wine (wine)"), "stdout: {stdout}");
}

#[test]
fn test_invalid_input_fails_without_recording() {
    let env = Env::new();

    let output = env.dt(&["custom", "--volume", "0", "--abv", "5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("volume must be greater than 0"));

    let output = env.dt(&["drink", "mead"]);
    assert!(!output.status.success());

    let output = env.dt(&["profile", "--weight", "-70"]);
    assert!(!output.status.success());

    let (stdout, _) = env.dt_ok(&["history"]);
    assert_eq!(stdout.trim(), "No events recorded today.");
    let (stdout, _) = env.dt_ok(&["profile"]);
    assert!(stdout.contains("Weight: 77 kg"), "stdout: {stdout}");
}

#[test]
fn test_presets_lists_catalog() {
    let env = Env::new();
    let (stdout, _) = env.dt_ok(&["presets"]);
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.contains("🍶 Sake (sake): 1 go (15%)"), "stdout: {stdout}");
}
