//! Pointer events delivered to widgets.

use crate::geometry::Point;
use crate::widget::WidgetId;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// `PointerEnter`/`PointerLeave` arrive on the widget's own trigger wrapper.
/// `PointerDown` only reaches a widget through a document-level listener it
/// registered with [`DocumentListeners`](crate::DocumentListeners).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer entered the trigger bounds
    PointerEnter,
    /// Pointer left the trigger bounds
    PointerLeave,
    /// Pointer pressed anywhere in the document
    PointerDown {
        /// Position of the press in viewport coordinates
        position: Point,
        /// Innermost widget under the pointer, when the host knows it
        target: Option<WidgetId>,
    },
}

impl Event {
    /// Build a press at `position` with no known target.
    #[must_use]
    pub const fn press(position: Point) -> Self {
        Self::PointerDown {
            position,
            target: None,
        }
    }
}
