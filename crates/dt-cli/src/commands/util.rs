//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour)s?\s+ago$").expect("relative time pattern is valid")
});

/// Relative times reach back at most one day; anything older is another day anyway.
const MAX_RELATIVE_MINUTES: i64 = 24 * 60;

/// The current wall-clock time in the local offset.
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Parse an event time relative to `now`.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00+09:00"
/// - Clock time today: "21:45"
/// - Relative: "30 minutes ago", "2 hours ago"
pub fn parse_at(s: &str, now: DateTime<FixedOffset>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M") {
        let local = now
            .offset()
            .from_local_datetime(&now.date_naive().and_time(time))
            .single()
            .with_context(|| format!("ambiguous local time: {s}"))?;
        return Ok(local.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid time: {s}. Use ISO 8601 (e.g., 2026-01-15T21:30:00Z), a clock time (e.g., 21:30) or relative (e.g., '30 minutes ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;
    let minutes = match &caps[2] {
        "minute" => n,
        "hour" => n.saturating_mul(60),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };
    if minutes > MAX_RELATIVE_MINUTES {
        anyhow::bail!("Relative time too far back: {n} {}s", &caps[2]);
    }

    Ok((now - Duration::minutes(minutes)).with_timezone(&Utc))
}

/// The event time for an add command: `--at` when given, otherwise now.
pub fn resolve_at(at: Option<&str>, now: DateTime<FixedOffset>) -> anyhow::Result<DateTime<Utc>> {
    at.map_or_else(|| Ok(now.with_timezone(&Utc)), |s| parse_at(s, now))
}

/// `HH:MM` in the given offset.
pub fn clock(ts: DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%H:%M").to_string()
}
