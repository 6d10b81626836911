//! Widget trait and the host services a widget talks to.
//!
//! Folio widgets are headless: they hold state and react to events, while
//! the host owns the clock, the document and the layout engine. Every
//! callback receives the host as `&mut dyn Host`.
//!
//! # Examples
//!
//! ```
//! use folio_core::{TypeId, WidgetId};
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::event::Event;
use crate::geometry::{Rect, Size};
use crate::listener::DocumentListeners;
use crate::timer::{TimerId, Timers};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Read-only layout measurements (`getBoundingClientRect`, `innerWidth`).
pub trait LayoutQuery {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Bounding rect of the widget's trigger, if mounted.
    fn trigger_rect(&self, owner: WidgetId) -> Option<Rect>;

    /// Bounding rect of the widget's floating panel, if mounted.
    fn panel_rect(&self, owner: WidgetId) -> Option<Rect>;

    /// Tree containment: `Some(true)` when `target` is the panel of `owner`
    /// or one of its descendants. Hosts without a node tree return `None`
    /// and callers fall back to geometric containment.
    fn panel_owns(&self, owner: WidgetId, target: WidgetId) -> Option<bool> {
        let _ = (owner, target);
        None
    }
}

/// Everything a widget may ask of its environment.
pub trait Host: Timers + DocumentListeners + LayoutQuery {}

impl<T: Timers + DocumentListeners + LayoutQuery> Host for T {}

/// Core widget trait.
///
/// # Lifecycle
///
/// 1. `event`: react to pointer input
/// 2. `timer_fired`: react to a timer the widget scheduled
/// 3. `unmount`: release every timer and listener the widget still holds
pub trait Widget {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Instance identifier used for host lookups.
    fn id(&self) -> WidgetId;

    /// Handle an input event. Returns a message when state changed.
    fn event(&mut self, event: &Event, host: &mut dyn Host) -> Option<Box<dyn Any + Send>>;

    /// Handle a fired timer. Timers the widget does not own are ignored.
    fn timer_fired(&mut self, timer: TimerId, host: &mut dyn Host) -> Option<Box<dyn Any + Send>>;

    /// Tear down: cancel pending timers and detach listeners.
    fn unmount(&mut self, host: &mut dyn Host);

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }
}
