//! `trailog` — log runs and rides from the terminal.
//!
//! # Usage
//!
//! ```
//! trailog add running --at 51.5072,-0.1276 --distance 5 --duration 25 --cadence 180
//! trailog add cycling --distance 10 --duration 30 --elevation 150
//! trailog edit <ID> --distance 6
//! trailog list
//! ```

mod render;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context as _, anyhow};
use clap::{Args, Parser, Subcommand};
use render::{TerminalSink, format_entry};
use settings::{Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use trailog_core::{
  activity::{ActivityDetails, ActivityId, ActivityKind, Location},
  factory::RawFields,
  persist::Persistence,
  tracker::{Command, Outcome, Tracker},
};
use trailog_store_sqlite::SqliteStorage;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "trailog", version, about = "Log runs and rides")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "trailog.toml")]
  config: PathBuf,

  /// SQLite database to use instead of the configured one.
  #[arg(long, env = "TRAILOG_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Action,
}

#[derive(Subcommand)]
enum Action {
  /// Log a new activity.
  Add {
    /// `running` or `cycling`.
    kind: ActivityKind,

    /// Where it happened, as `LAT,LNG`. Falls back to `default_location`.
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    at: Option<Location>,

    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Change the figures of a logged activity. Omitted fields keep their
  /// current value.
  Edit {
    id: String,

    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Show every logged activity, oldest first.
  List,
  /// Show one activity and where it happened.
  Show { id: String },
  /// Delete every logged activity.
  Reset,
}

/// Form fields, kept as text until the core validates them.
#[derive(Args)]
struct FieldArgs {
  /// Distance in kilometres.
  #[arg(long)]
  distance:  Option<String>,
  /// Duration in minutes.
  #[arg(long)]
  duration:  Option<String>,
  /// Steps per minute (running).
  #[arg(long)]
  cadence:   Option<String>,
  /// Elevation gain in metres (cycling).
  #[arg(long, allow_hyphen_values = true)]
  elevation: Option<String>,
}

fn parse_location(raw: &str) -> Result<Location, String> {
  let (lat, lng) = raw
    .split_once(',')
    .ok_or_else(|| format!("expected LAT,LNG, got {raw:?}"))?;
  let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
  let lng = lng.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
  Ok(Location::new(lat, lng))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let store_path = cli
    .store
    .as_deref()
    .map(expand_tilde)
    .unwrap_or_else(|| settings.store_path.clone());

  let storage = SqliteStorage::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let persistence = Persistence::with_key(storage, settings.storage_key.clone());

  // Only `list` shows the restored activities.
  let sink = match &cli.command {
    Action::List => TerminalSink::new(io::stdout()),
    _ => TerminalSink::muted(io::stdout()),
  };
  let mut tracker = Tracker::start(persistence, sink).context("failed to load activities")?;
  tracker.sink_mut().set_muted(false);

  let command = match &cli.command {
    Action::List => {
      if tracker.store().is_empty() {
        println!("No activities logged yet.");
      }
      return Ok(());
    }
    Action::Add { kind, at, fields } => Command::Submit {
      kind:     *kind,
      location: at.or(settings.default_location),
      fields:   new_fields(*kind, fields)?,
    },
    Action::Edit { id, fields } => {
      let id = ActivityId::from(id.as_str());
      let current = tracker.store().find_by_id(&id)?;
      let fields = edited_fields(
        current.details(),
        current.distance(),
        current.duration(),
        fields,
      )?;
      Command::Edit { id, fields }
    }
    Action::Show { id } => Command::Focus {
      id: id.as_str().into(),
    },
    Action::Reset => Command::Reset,
  };

  match tracker.handle(command)? {
    Outcome::Added(_) | Outcome::Edited(_) => {}
    Outcome::Focused(location) => {
      if let Action::Show { id } = &cli.command {
        let activity = tracker.store().find_by_id(&ActivityId::from(id.as_str()))?;
        println!("{}", format_entry(activity));
      }
      println!("  at {location}");
    }
    Outcome::Cleared => println!("All activities deleted."),
  }

  Ok(())
}

// ─── Form assembly ────────────────────────────────────────────────────────────

/// The kind-specific field for `kind`, rejecting the other kind's field.
fn extra_for(kind: ActivityKind, fields: &FieldArgs) -> anyhow::Result<Option<&str>> {
  let (wanted, unwanted, unwanted_name) = match kind {
    ActivityKind::Paced => (&fields.cadence, &fields.elevation, "--elevation"),
    ActivityKind::Climbing => (&fields.elevation, &fields.cadence, "--cadence"),
  };
  if unwanted.is_some() {
    return Err(anyhow!("{unwanted_name} does not apply to {kind} activities"));
  }
  Ok(wanted.as_deref())
}

fn new_fields(kind: ActivityKind, fields: &FieldArgs) -> anyhow::Result<RawFields> {
  let extra = extra_for(kind, fields)?;
  Ok(RawFields::parse(
    fields.distance.as_deref().unwrap_or_default(),
    fields.duration.as_deref().unwrap_or_default(),
    extra.unwrap_or_default(),
  )?)
}

fn edited_fields(
  details: ActivityDetails,
  distance: f64,
  duration: f64,
  fields: &FieldArgs,
) -> anyhow::Result<RawFields> {
  let (kind, current_extra) = match details {
    ActivityDetails::Paced { cadence } => (ActivityKind::Paced, f64::from(cadence)),
    ActivityDetails::Climbing { elevation_gain } => (ActivityKind::Climbing, elevation_gain),
  };
  let extra = extra_for(kind, fields)?;
  Ok(RawFields::parse(
    &fields.distance.clone().unwrap_or_else(|| distance.to_string()),
    &fields.duration.clone().unwrap_or_else(|| duration.to_string()),
    &extra.map_or_else(|| current_extra.to_string(), str::to_owned),
  )?)
}
