//! Delete command for removing a single recorded event.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::Args;
use dt_core::{
    Command, EventId, EventKind, HapticPort, NotificationPort, PersistencePort, Tracker,
    TrackerError,
};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Event kind: drink, water or toilet.
    pub kind: EventKind,
    /// Event id, as shown by `dt history`.
    pub id: EventId,
}

/// Deletes the event. An unknown id is reported, not treated as a failure.
pub fn run<W, S, N, H>(
    writer: &mut W,
    tracker: &mut Tracker<S, N, H>,
    args: &DeleteArgs,
    now: DateTime<FixedOffset>,
) -> Result<()>
where
    W: Write,
    S: PersistencePort,
    N: NotificationPort,
    H: HapticPort,
{
    let command = Command::DeleteEvent {
        kind: args.kind,
        id: args.id,
    };
    match tracker.dispatch(command, now) {
        Ok(_) => writeln!(writer, "Deleted {} #{}", args.kind, args.id)?,
        Err(err @ TrackerError::NotFound { .. }) => writeln!(writer, "Nothing deleted: {err}")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use dt_core::{DrinkType, Outcome};
    use insta::assert_snapshot;

    use crate::commands::testing::{now, output, tracker};

    #[test]
    fn deletes_recorded_drink() {
        let mut tracker = tracker();
        let Outcome::DrinkAdded { event, .. } = tracker
            .dispatch(Command::AddPreset(DrinkType::Sake), now())
            .unwrap()
        else {
            panic!("expected a drink");
        };

        let mut buf = Vec::new();
        let args = DeleteArgs {
            kind: EventKind::Drink,
            id: event.id,
        };
        run(&mut buf, &mut tracker, &args, now()).unwrap();

        assert!(tracker.ledger().drinks.is_empty());
        assert_snapshot!(output(buf), @"Deleted drink #1704103200000");
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut tracker = tracker();
        let mut buf = Vec::new();
        let args = DeleteArgs {
            kind: EventKind::Water,
            id: EventId::new(42),
        };
        run(&mut buf, &mut tracker, &args, now()).unwrap();

        assert_snapshot!(output(buf), @"Nothing deleted: no water event with id 42");
    }
}
