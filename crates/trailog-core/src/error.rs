//! Error types for `trailog-core`.

use thiserror::Error;

use crate::activity::ActivityId;

#[derive(Debug, Error)]
pub enum Error {
  /// Raw input was malformed or out of range. Nothing was changed.
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("activity not found: {0}")]
  NotFound(ActivityId),

  #[error("activity {0} is already in the store")]
  DuplicateId(ActivityId),

  #[error("unknown activity kind: {0:?}")]
  UnknownKind(String),

  #[error("no location available for the new activity")]
  LocationUnavailable,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation {
      field,
      reason: reason.into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
