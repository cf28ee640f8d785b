//! Activity types — one logged exercise session and its derived metric.
//!
//! An activity's identity (`id`, `created_at`, `location`, kind) is fixed at
//! creation. The derived metric and label are computed from the stored
//! attributes every time an [`Activity`] is assembled, so they can never
//! drift from the values they are derived from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque identifier for an activity, unique within a store.
///
/// Freshly created activities get a UUID, but any string read back from
/// storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
  pub fn generate() -> Self { Self(Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for ActivityId {
  fn from(value: String) -> Self { Self(value) }
}

impl From<&str> for ActivityId {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

impl fmt::Display for ActivityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A geographic coordinate pair. Serialised as `[latitude, longitude]`.
///
/// Equality compares the two components by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Location {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Location {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }
}

impl From<(f64, f64)> for Location {
  fn from((latitude, longitude): (f64, f64)) -> Self {
    Self::new(latitude, longitude)
  }
}

impl From<Location> for (f64, f64) {
  fn from(location: Location) -> Self { (location.latitude, location.longitude) }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
  }
}

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Which family of activity a record belongs to.
///
/// The string form (`running` / `cycling`) is the tag written to storage.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ActivityKind {
  /// Distance-paced; carries a cadence and derives a pace.
  #[serde(rename = "running", alias = "paced")]
  #[strum(to_string = "running", serialize = "paced")]
  Paced,
  /// Elevation-paced; carries an elevation gain and derives a speed.
  #[serde(rename = "cycling", alias = "climbing")]
  #[strum(to_string = "cycling", serialize = "climbing")]
  Climbing,
}

impl ActivityKind {
  /// Human-readable name used in labels.
  pub fn title(self) -> &'static str {
    match self {
      Self::Paced => "Running",
      Self::Climbing => "Cycling",
    }
  }
}

/// The kind-specific stored attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityDetails {
  /// Steps per minute.
  Paced { cadence: u32 },
  /// Metres gained; may be zero or negative for a descent.
  Climbing { elevation_gain: f64 },
}

impl ActivityDetails {
  pub fn kind(&self) -> ActivityKind {
    match self {
      Self::Paced { .. } => ActivityKind::Paced,
      Self::Climbing { .. } => ActivityKind::Climbing,
    }
  }
}

// ─── Derived values ──────────────────────────────────────────────────────────

/// The performance metric derived from distance and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
  /// Minutes per kilometre.
  Pace(f64),
  /// Kilometres per hour.
  Speed(f64),
}

impl Metric {
  pub fn value(self) -> f64 {
    match self {
      Self::Pace(v) | Self::Speed(v) => v,
    }
  }

  pub fn unit(self) -> &'static str {
    match self {
      Self::Pace(_) => "min/km",
      Self::Speed(_) => "km/h",
    }
  }
}

/// Compute the metric for `kind` from `distance` (km) and `duration` (min).
pub fn derive_metric(kind: ActivityKind, distance: f64, duration: f64) -> Metric {
  match kind {
    ActivityKind::Paced => Metric::Pace(duration / distance),
    ActivityKind::Climbing => Metric::Speed(distance / (duration / 60.0)),
  }
}

/// `"Running on April 14"`.
pub fn derive_label(kind: ActivityKind, created_at: DateTime<Utc>) -> String {
  format!("{} on {}", kind.title(), created_at.format("%B %-d"))
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// One logged activity.
///
/// Fields are private so the derived `metric` and `label` can only be set by
/// [`Activity::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
  id:         ActivityId,
  created_at: DateTime<Utc>,
  location:   Location,
  distance:   f64,
  duration:   f64,
  details:    ActivityDetails,
  metric:     Metric,
  label:      String,
}

impl Activity {
  /// Build an activity from its stored attributes, deriving the metric and
  /// label. Performs no validation; see [`crate::factory`] for that.
  pub fn assemble(
    id: ActivityId,
    created_at: DateTime<Utc>,
    location: Location,
    distance: f64,
    duration: f64,
    details: ActivityDetails,
  ) -> Self {
    let kind = details.kind();
    Self {
      metric: derive_metric(kind, distance, duration),
      label: derive_label(kind, created_at),
      id,
      created_at,
      location,
      distance,
      duration,
      details,
    }
  }

  /// Re-derive the metric and label from the stored attributes.
  pub fn rederive(self) -> Self {
    Self::assemble(
      self.id,
      self.created_at,
      self.location,
      self.distance,
      self.duration,
      self.details,
    )
  }

  pub fn id(&self) -> &ActivityId { &self.id }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn location(&self) -> Location { self.location }

  pub fn distance(&self) -> f64 { self.distance }

  pub fn duration(&self) -> f64 { self.duration }

  pub fn kind(&self) -> ActivityKind { self.details.kind() }

  pub fn details(&self) -> ActivityDetails { self.details }

  pub fn metric(&self) -> Metric { self.metric }

  pub fn label(&self) -> &str { &self.label }

  pub fn pace(&self) -> Option<f64> {
    match self.metric {
      Metric::Pace(v) => Some(v),
      Metric::Speed(_) => None,
    }
  }

  pub fn speed(&self) -> Option<f64> {
    match self.metric {
      Metric::Speed(v) => Some(v),
      Metric::Pace(_) => None,
    }
  }

  pub fn cadence(&self) -> Option<u32> {
    match self.details {
      ActivityDetails::Paced { cadence } => Some(cadence),
      ActivityDetails::Climbing { .. } => None,
    }
  }

  pub fn elevation_gain(&self) -> Option<f64> {
    match self.details {
      ActivityDetails::Climbing { elevation_gain } => Some(elevation_gain),
      ActivityDetails::Paced { .. } => None,
    }
  }
}
