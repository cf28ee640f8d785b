//! [`ActivityStore`] — the ordered, in-memory collection of activities.
//!
//! Insertion order is preserved (most recent last) and every id appears at
//! most once. All lookups key on [`ActivityId`].

use crate::{
  Error, Result,
  activity::{Activity, ActivityId},
};

#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
  activities: Vec<Activity>,
}

impl ActivityStore {
  pub fn new() -> Self { Self::default() }

  fn position(&self, id: &ActivityId) -> Option<usize> {
    self.activities.iter().position(|a| a.id() == id)
  }

  /// Add `activity` at the end. Fails if its id is already present.
  pub fn append(&mut self, activity: Activity) -> Result<()> {
    if self.position(activity.id()).is_some() {
      return Err(Error::DuplicateId(activity.id().clone()));
    }
    self.activities.push(activity);
    Ok(())
  }

  /// All activities in insertion order.
  pub fn all(&self) -> &[Activity] { &self.activities }

  pub fn find_by_id(&self, id: &ActivityId) -> Result<&Activity> {
    self
      .position(id)
      .map(|i| &self.activities[i])
      .ok_or_else(|| Error::NotFound(id.clone()))
  }

  /// Substitute the activity stored under `id`, keeping its position.
  ///
  /// The replacement may carry a different id, as long as that id is not
  /// already used by another entry.
  pub fn replace(&mut self, id: &ActivityId, activity: Activity) -> Result<Activity> {
    let index = self.position(id).ok_or_else(|| Error::NotFound(id.clone()))?;
    if activity.id() != id && self.position(activity.id()).is_some() {
      return Err(Error::DuplicateId(activity.id().clone()));
    }
    Ok(std::mem::replace(&mut self.activities[index], activity))
  }

  /// Replace the whole contents with `activities`, re-deriving each one's
  /// metric and label. Later entries repeating an earlier id are dropped.
  ///
  /// Returns the number of entries dropped.
  pub fn hydrate(&mut self, activities: impl IntoIterator<Item = Activity>) -> usize {
    let mut restored: Vec<Activity> = Vec::new();
    let mut dropped = 0;
    for activity in activities {
      if restored.iter().any(|a| a.id() == activity.id()) {
        tracing::warn!(id = %activity.id(), "dropping activity with duplicate id");
        dropped += 1;
        continue;
      }
      restored.push(activity.rederive());
    }
    self.activities = restored;
    dropped
  }

  /// Remove the most recently appended activity.
  pub(crate) fn pop(&mut self) -> Option<Activity> { self.activities.pop() }

  pub fn clear(&mut self) { self.activities.clear(); }

  pub fn len(&self) -> usize { self.activities.len() }

  pub fn is_empty(&self) -> bool { self.activities.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, Activity> { self.activities.iter() }
}

impl<'a> IntoIterator for &'a ActivityStore {
  type Item = &'a Activity;
  type IntoIter = std::slice::Iter<'a, Activity>;

  fn into_iter(self) -> Self::IntoIter { self.activities.iter() }
}
