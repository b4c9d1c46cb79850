//! Terminal implementations of the core's output ports.

use std::io::{self, Write};

use dt_core::{NotificationPort, Severity};

/// Writes notifications as single lines. Warnings and dangers get a marker.
pub struct TerminalNotifier<W = io::Stderr> {
    out: W,
}

impl TerminalNotifier {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

const fn marker(severity: Severity) -> Option<&'static str> {
    match severity {
        Severity::Info => None,
        Severity::Warning => Some("⚠️"),
        Severity::Danger => Some("🚨"),
    }
}

impl<W: Write> NotificationPort for TerminalNotifier<W> {
    fn notify(&mut self, message: &str, severity: Severity) {
        let written = match marker(severity) {
            Some(marker) => writeln!(self.out, "{marker} {message}"),
            None => writeln!(self.out, "{message}"),
        };
        if let Err(err) = written {
            tracing::debug!(error = %err, "failed to write notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_are_marked_by_severity() {
        let mut notifier = TerminalNotifier::new(Vec::new());
        notifier.notify("💧 Time to drink some water!", Severity::Info);
        notifier.notify("You have exceeded your daily alcohol limit!", Severity::Warning);
        notifier.notify("Your blood alcohol content is getting high!", Severity::Danger);

        let output = String::from_utf8(notifier.into_inner()).unwrap();
        insta::assert_snapshot!(output, @r"
        💧 Time to drink some water!
        ⚠️ You have exceeded your daily alcohol limit!
        🚨 Your blood alcohol content is getting high!
        ");
    }
}
