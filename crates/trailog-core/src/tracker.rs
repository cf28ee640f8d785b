//! [`Tracker`] — one user session over the store, storage and display.
//!
//! UI events arrive as [`Command`] messages. Each is handled to completion
//! before the next: a successful mutation is saved immediately, then shown.
//! A failed command leaves the store, the stored blob and the display as they
//! were.

use crate::{
  Error, Result,
  activity::{Activity, ActivityId, ActivityKind, Location},
  factory::{self, RawFields},
  persist::{KeyValueStorage, Persistence},
  reconcile::{Reconciled, reconcile},
  sink::ActivitySink,
  store::ActivityStore,
};

// ─── Messages ────────────────────────────────────────────────────────────────

/// A request from the user interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  /// The new-activity form was submitted. `location` is the pending map
  /// position, absent when no position could be obtained.
  Submit {
    kind:     ActivityKind,
    location: Option<Location>,
    fields:   RawFields,
  },
  /// The edit form for an existing activity was submitted.
  Edit { id: ActivityId, fields: RawFields },
  /// An entry in the list was selected.
  Focus { id: ActivityId },
  /// Forget every stored activity.
  Reset,
}

/// The result of a successfully handled [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Added(Activity),
  Edited(Activity),
  /// Where the map should pan to.
  Focused(Location),
  Cleared,
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

pub struct Tracker<S, R> {
  store:       ActivityStore,
  persistence: Persistence<S>,
  sink:        R,
}

impl<S, R> Tracker<S, R>
where
  S: KeyValueStorage,
  R: ActivitySink,
{
  /// Hydrate from `persistence` and render every restored activity.
  pub fn start(persistence: Persistence<S>, mut sink: R) -> Result<Self> {
    let mut store = ActivityStore::new();
    let dropped = store.hydrate(persistence.load()?);
    tracing::info!(
      restored = store.len(),
      dropped,
      key = persistence.key(),
      "loaded activities"
    );
    for activity in &store {
      sink.render(activity);
    }
    Ok(Self {
      store,
      persistence,
      sink,
    })
  }

  pub fn store(&self) -> &ActivityStore { &self.store }

  pub fn sink(&self) -> &R { &self.sink }

  pub fn sink_mut(&mut self) -> &mut R { &mut self.sink }

  pub fn persistence(&self) -> &Persistence<S> { &self.persistence }

  pub fn handle(&mut self, command: Command) -> Result<Outcome> {
    match command {
      Command::Submit {
        kind,
        location,
        fields,
      } => self.submit(kind, location, fields).map(Outcome::Added),
      Command::Edit { id, fields } => self.edit(&id, &fields).map(Outcome::Edited),
      Command::Focus { id } => self.focus(&id).map(Outcome::Focused),
      Command::Reset => self.reset().map(|()| Outcome::Cleared),
    }
  }

  /// Create, store, save and render a new activity.
  pub fn submit(
    &mut self,
    kind: ActivityKind,
    location: Option<Location>,
    fields: RawFields,
  ) -> Result<Activity> {
    let location = location.ok_or(Error::LocationUnavailable)?;
    let activity = factory::create(kind, location, fields)?;
    self.store.append(activity.clone())?;

    if let Err(e) = self.persistence.save(self.store.all()) {
      self.store.pop();
      return Err(e);
    }

    tracing::debug!(id = %activity.id(), kind = %kind, "added activity");
    self.sink.render(&activity);
    Ok(activity)
  }

  /// Apply edited fields to an existing activity, save and re-render it.
  pub fn edit(&mut self, id: &ActivityId, fields: &RawFields) -> Result<Activity> {
    let Reconciled { previous, updated } = reconcile(&mut self.store, id, fields)?;

    if let Err(e) = self.persistence.save(self.store.all()) {
      self.store.replace(id, previous)?;
      return Err(e);
    }

    tracing::debug!(%id, "edited activity");
    self.sink.update(&updated);
    Ok(updated)
  }

  /// The location of the activity with `id`.
  pub fn focus(&self, id: &ActivityId) -> Result<Location> {
    Ok(self.store.find_by_id(id)?.location())
  }

  /// Remove the stored blob and empty the store.
  pub fn reset(&mut self) -> Result<()> {
    self.persistence.clear()?;
    self.store.clear();
    tracing::info!(key = self.persistence.key(), "cleared all activities");
    Ok(())
  }

  pub fn into_parts(self) -> (ActivityStore, Persistence<S>, R) {
    (self.store, self.persistence, self.sink)
  }
}
