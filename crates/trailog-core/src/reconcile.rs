//! Editing an existing activity in place.
//!
//! The edited record keeps the original id, creation time, location and kind;
//! only distance, duration and the kind-specific attribute change, and the
//! metric and label are derived afresh. The stored entry is matched by id.

use crate::{
  Result,
  activity::{Activity, ActivityId},
  factory::{Measurements, RawFields, validate},
  store::ActivityStore,
};

/// Build the edited version of `original` without touching any store.
pub fn edited(original: &Activity, fields: &RawFields) -> Result<Activity> {
  let Measurements {
    distance,
    duration,
    details,
  } = validate(original.kind(), fields)?;

  Ok(Activity::assemble(
    original.id().clone(),
    original.created_at(),
    original.location(),
    distance,
    duration,
    details,
  ))
}

/// Both sides of an applied edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
  pub previous: Activity,
  pub updated:  Activity,
}

/// Apply `fields` to the activity stored under `id`. On error the store is
/// left unchanged.
pub fn reconcile(
  store: &mut ActivityStore,
  id: &ActivityId,
  fields: &RawFields,
) -> Result<Reconciled> {
  let updated = edited(store.find_by_id(id)?, fields)?;
  let previous = store.replace(id, updated.clone())?;
  Ok(Reconciled { previous, updated })
}
