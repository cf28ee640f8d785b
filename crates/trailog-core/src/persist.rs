//! Flattening activities to a text blob and restoring them.
//!
//! The blob is a JSON array of flat records. Derived values (`pace`, `speed`,
//! `description`) are written for readers of the raw blob but are ignored on
//! load: the metric and label are always recomputed from the stored
//! attributes.
//!
//! ```json
//! [{"id":"…","type":"running","date":"2026-04-14T08:30:00Z",
//!   "coords":[51.5,-0.12],"distance":5.0,"duration":25.0,
//!   "cadence":180.0,"pace":5.0,"description":"Running on April 14"}]
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  activity::{Activity, ActivityDetails, ActivityId, ActivityKind, Location, Metric},
};

/// The single storage key the whole store is written under by default.
pub const DEFAULT_KEY: &str = "workouts";

// ─── Storage collaborator ────────────────────────────────────────────────────

/// A string-keyed blob store, e.g. browser local storage or a SQLite table.
pub trait KeyValueStorage {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  fn set(&mut self, key: &str, blob: &str) -> Result<(), Self::Error>;

  fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// Process-local storage; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: HashMap<String, String>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStorage for MemoryStorage {
  type Error = std::convert::Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, blob: &str) -> Result<(), Self::Error> {
    self.entries.insert(key.to_owned(), blob.to_owned());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
    self.entries.remove(key);
    Ok(())
  }
}

// ─── Flat record ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct FlatActivity {
  id:          ActivityId,
  #[serde(rename = "type")]
  kind:        ActivityKind,
  date:        DateTime<Utc>,
  coords:      Location,
  distance:    f64,
  duration:    f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  cadence:     Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  elevation:   Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pace:        Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  speed:       Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  description: Option<String>,
}

impl From<&Activity> for FlatActivity {
  fn from(activity: &Activity) -> Self {
    let (pace, speed) = match activity.metric() {
      Metric::Pace(v) => (Some(v), None),
      Metric::Speed(v) => (None, Some(v)),
    };
    Self {
      id: activity.id().clone(),
      kind: activity.kind(),
      date: activity.created_at(),
      coords: activity.location(),
      distance: activity.distance(),
      duration: activity.duration(),
      cadence: activity.cadence().map(f64::from),
      elevation: activity.elevation_gain(),
      pace,
      speed,
      description: Some(activity.label().to_owned()),
    }
  }
}

impl FlatActivity {
  /// Rebuild the activity from its kind tag. Returns `None` when the
  /// kind-specific attribute is missing.
  fn into_activity(self) -> Option<Activity> {
    let details = match self.kind {
      ActivityKind::Paced => ActivityDetails::Paced {
        cadence: self.cadence?.round() as u32,
      },
      ActivityKind::Climbing => ActivityDetails::Climbing {
        elevation_gain: self.elevation?,
      },
    };
    Some(Activity::assemble(
      self.id,
      self.date,
      self.coords,
      self.distance,
      self.duration,
      details,
    ))
  }
}

// ─── Blob codec ──────────────────────────────────────────────────────────────

/// Serialise `activities`, in order, to a text blob.
pub fn to_blob(activities: &[Activity]) -> Result<String> {
  let flat: Vec<FlatActivity> = activities.iter().map(FlatActivity::from).collect();
  Ok(serde_json::to_string(&flat)?)
}

/// Restore activities from a blob. Never fails: a missing blob, or one that
/// is not a JSON array, yields an empty list. Individual records that cannot
/// be read or rebuilt are skipped, so one bad entry never hides the rest.
pub fn from_blob(blob: Option<&str>) -> Vec<Activity> {
  let Some(blob) = blob else {
    return Vec::new();
  };

  let records: Vec<serde_json::Value> = match serde_json::from_str(blob) {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!(error = %e, "discarding unreadable activity data");
      return Vec::new();
    }
  };

  records
    .into_iter()
    .enumerate()
    .filter_map(|(index, value)| {
      let record: FlatActivity = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
          tracing::warn!(index, error = %e, "skipping unreadable stored activity");
          return None;
        }
      };
      let id = record.id.clone();
      let activity = record.into_activity();
      if activity.is_none() {
        tracing::warn!(%id, "skipping stored activity without its kind attribute");
      }
      activity
    })
    .collect()
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Saves and loads the whole activity list under one storage key.
#[derive(Debug)]
pub struct Persistence<S> {
  storage: S,
  key:     String,
}

impl<S: KeyValueStorage> Persistence<S> {
  pub fn new(storage: S) -> Self { Self::with_key(storage, DEFAULT_KEY) }

  pub fn with_key(storage: S, key: impl Into<String>) -> Self {
    Self {
      storage,
      key: key.into(),
    }
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn storage(&self) -> &S { &self.storage }

  pub fn into_storage(self) -> S { self.storage }

  pub fn save(&mut self, activities: &[Activity]) -> Result<()> {
    let blob = to_blob(activities)?;
    self.storage.set(&self.key, &blob).map_err(storage_error)
  }

  /// Load the stored activities. Only a failing storage backend is an error;
  /// absent or corrupt data loads as an empty list.
  pub fn load(&self) -> Result<Vec<Activity>> {
    let blob = self.storage.get(&self.key).map_err(storage_error)?;
    Ok(from_blob(blob.as_deref()))
  }

  pub fn clear(&mut self) -> Result<()> {
    self.storage.remove(&self.key).map_err(storage_error)
  }
}

fn storage_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Storage(Box::new(e))
}
