//! Validation of raw input and construction of new activities.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  activity::{Activity, ActivityDetails, ActivityId, ActivityKind, Location},
};

/// Untrusted numeric fields as entered by the user.
///
/// `extra` is the cadence for [`ActivityKind::Paced`] and the elevation gain
/// for [`ActivityKind::Climbing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFields {
  pub distance: f64,
  pub duration: f64,
  pub extra:    f64,
}

impl RawFields {
  pub fn new(distance: f64, duration: f64, extra: f64) -> Self {
    Self {
      distance,
      duration,
      extra,
    }
  }

  /// Parse the three fields from form text. Empty or non-numeric text is
  /// rejected here; range checks happen in [`validate`].
  pub fn parse(distance: &str, duration: &str, extra: &str) -> Result<Self> {
    Ok(Self {
      distance: parse_number("distance", distance)?,
      duration: parse_number("duration", duration)?,
      extra:    parse_number("extra", extra)?,
    })
  }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(Error::validation(field, "value is required"));
  }
  trimmed
    .parse::<f64>()
    .map_err(|_| Error::validation(field, format!("{trimmed:?} is not a number")))
}

/// Validated business attributes for an activity of a known kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
  pub distance: f64,
  pub duration: f64,
  pub details:  ActivityDetails,
}

/// Check `fields` against the rules for `kind`.
///
/// Distance, duration and cadence must be finite and strictly positive, and
/// cadence must be a whole number. Elevation gain only has to be finite.
pub fn validate(kind: ActivityKind, fields: &RawFields) -> Result<Measurements> {
  let distance = positive("distance", fields.distance)?;
  let duration = positive("duration", fields.duration)?;

  let details = match kind {
    ActivityKind::Paced => {
      let cadence = positive("cadence", fields.extra)?;
      if cadence.fract() != 0.0 {
        return Err(Error::validation("cadence", "must be a whole number"));
      }
      if cadence > f64::from(u32::MAX) {
        return Err(Error::validation("cadence", "is too large"));
      }
      ActivityDetails::Paced {
        cadence: cadence as u32,
      }
    }
    ActivityKind::Climbing => ActivityDetails::Climbing {
      elevation_gain: finite("elevation gain", fields.extra)?,
    },
  };

  Ok(Measurements {
    distance,
    duration,
    details,
  })
}

fn finite(field: &'static str, value: f64) -> Result<f64> {
  if value.is_finite() {
    Ok(value)
  } else {
    Err(Error::validation(field, "must be a finite number"))
  }
}

fn positive(field: &'static str, value: f64) -> Result<f64> {
  let value = finite(field, value)?;
  if value > 0.0 {
    Ok(value)
  } else {
    Err(Error::validation(field, "must be a positive number"))
  }
}

fn check_location(location: Location) -> Result<Location> {
  let Location {
    latitude,
    longitude,
  } = location;
  if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
    return Err(Error::validation("latitude", "must be between -90 and 90"));
  }
  if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
    return Err(Error::validation("longitude", "must be between -180 and 180"));
  }
  Ok(location)
}

/// Validate `fields` and build a new activity with a fresh id, stamped now.
pub fn create(
  kind: ActivityKind,
  location: Location,
  fields: RawFields,
) -> Result<Activity> {
  create_at(kind, location, fields, Utc::now())
}

/// As [`create`], with an explicit creation time.
pub fn create_at(
  kind: ActivityKind,
  location: Location,
  fields: RawFields,
  created_at: DateTime<Utc>,
) -> Result<Activity> {
  let location = check_location(location)?;
  let Measurements {
    distance,
    duration,
    details,
  } = validate(kind, &fields)?;

  Ok(Activity::assemble(
    ActivityId::generate(),
    created_at,
    location,
    distance,
    duration,
    details,
  ))
}
