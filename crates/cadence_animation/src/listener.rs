//! Update and end listeners shared by every task kind

use cadence_core::EndReason;
use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;

new_key_type! {
    /// Handle returned when registering a listener, used to remove it again
    pub struct ListenerId;
}

/// Called every frame with `(value, velocity)`
pub type UpdateListener = Arc<dyn Fn(f64, f64) + Send + Sync>;

/// Called once when a task stops running
pub type EndListener = Arc<dyn Fn(&AnimationEnd) + Send + Sync>;

/// Final state reported to end listeners
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationEnd {
    pub value: f64,
    pub velocity: f64,
    pub reason: EndReason,
    /// `true` iff the task was stopped by `cancel()`
    pub cancelled: bool,
}

impl AnimationEnd {
    pub fn new(value: f64, velocity: f64, reason: EndReason) -> Self {
        Self {
            value,
            velocity,
            reason,
            cancelled: reason == EndReason::Cancelled,
        }
    }
}

/// Listener registry. Dispatch happens on a snapshot so a listener may
/// add or remove listeners while being called.
pub(crate) struct Listeners<L: Clone> {
    entries: SlotMap<ListenerId, L>,
}

impl<L: Clone> Default for Listeners<L> {
    fn default() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }
}

impl<L: Clone> Listeners<L> {
    pub(crate) fn add(&mut self, listener: L) -> ListenerId {
        self.entries.insert(listener)
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub(crate) fn snapshot(&self) -> Vec<L> {
        self.entries.values().cloned().collect()
    }
}
