//! Plain-text rendering of activities for the terminal.

use std::io::Write;

use trailog_core::{
  activity::{Activity, ActivityDetails},
  sink::ActivitySink,
};

/// One list entry: the label and id, then the figures on an indented line.
pub fn format_entry(activity: &Activity) -> String {
  let metric = activity.metric();
  let extra = match activity.details() {
    ActivityDetails::Paced { cadence } => format!("{cadence} spm"),
    ActivityDetails::Climbing { elevation_gain } => format!("{elevation_gain} m"),
  };
  format!(
    "{label}  [{id}]\n  {distance} km · {duration} min · {value:.1} {unit} · {extra}",
    label = activity.label(),
    id = activity.id(),
    distance = activity.distance(),
    duration = activity.duration(),
    value = metric.value(),
    unit = metric.unit(),
  )
}

/// Writes entries to `out`; while muted, entries are dropped.
pub struct TerminalSink<W> {
  out:   W,
  muted: bool,
}

impl<W: Write> TerminalSink<W> {
  pub fn new(out: W) -> Self { Self { out, muted: false } }

  pub fn muted(out: W) -> Self { Self { out, muted: true } }

  pub fn set_muted(&mut self, muted: bool) { self.muted = muted; }

  fn write(&mut self, activity: &Activity) {
    if self.muted {
      return;
    }
    if let Err(e) = writeln!(self.out, "{}", format_entry(activity)) {
      tracing::warn!(error = %e, "failed to write activity");
    }
  }
}

impl<W: Write> ActivitySink for TerminalSink<W> {
  fn render(&mut self, activity: &Activity) { self.write(activity); }
}
