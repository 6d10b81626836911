//! Document-level pointer-down listeners.
//!
//! A widget that needs to see presses outside its own bounds registers a
//! listener and receives back a [`ListenerId`]. The id is the only handle to
//! the registration; dropping it on the floor leaks the listener, so widgets
//! keep it until they call [`DocumentListeners::remove`].

use crate::widget::WidgetId;
use std::collections::BTreeMap;

/// Unique ID for a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Host-provided document listener service (`addEventListener`/
/// `removeEventListener` on `document` for `mousedown`).
pub trait DocumentListeners {
    /// Register a pointer-down listener that forwards presses to `owner`.
    fn add_pointer_down(&mut self, owner: WidgetId) -> ListenerId;

    /// Remove a registration. Returns false if it was not registered.
    fn remove(&mut self, id: ListenerId) -> bool;
}

/// In-memory listener registry.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, WidgetId>,
    added: u64,
    removed: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of live registrations for one widget.
    #[must_use]
    pub fn count_for(&self, owner: WidgetId) -> usize {
        self.listeners.values().filter(|w| **w == owner).count()
    }

    /// Total registrations ever added.
    #[must_use]
    pub const fn added_count(&self) -> u64 {
        self.added
    }

    /// Total registrations ever removed.
    #[must_use]
    pub const fn removed_count(&self) -> u64 {
        self.removed
    }
}

impl DocumentListeners for ListenerRegistry {
    fn add_pointer_down(&mut self, owner: WidgetId) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, owner);
        self.added += 1;
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            self.removed += 1;
        }
        removed
    }
}
