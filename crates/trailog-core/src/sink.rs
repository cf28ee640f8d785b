//! The rendering collaborator: whatever shows activities to the user.

use crate::activity::Activity;

/// Receives activities to display, in store order.
pub trait ActivitySink {
  /// Called after an activity is appended, and for each restored activity on
  /// startup.
  fn render(&mut self, activity: &Activity);

  /// Called after an activity has been edited.
  fn update(&mut self, activity: &Activity) { self.render(activity); }
}

/// Collects rendered activities; useful for headless use and tests.
impl ActivitySink for Vec<Activity> {
  fn render(&mut self, activity: &Activity) { self.push(activity.clone()); }

  fn update(&mut self, activity: &Activity) {
    match self.iter_mut().find(|a| a.id() == activity.id()) {
      Some(slot) => *slot = activity.clone(),
      None => self.push(activity.clone()),
    }
  }
}

impl<T: ActivitySink + ?Sized> ActivitySink for &mut T {
  fn render(&mut self, activity: &Activity) { (**self).render(activity); }

  fn update(&mut self, activity: &Activity) { (**self).update(activity); }
}
