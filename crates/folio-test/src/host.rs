//! In-memory host: virtual clock, listener registry and layout tables.

use folio_core::{
    DocumentListeners, LayoutQuery, ListenerId, ListenerRegistry, ManualTimers, Rect, Size,
    TimerId, Timers, WidgetId,
};
use std::collections::HashMap;

/// Host double that records every timer and listener a widget touches.
#[derive(Debug)]
pub struct MockHost {
    timers: ManualTimers,
    listeners: ListenerRegistry,
    viewport: Size,
    triggers: HashMap<WidgetId, Rect>,
    panels: HashMap<WidgetId, Rect>,
    /// Node ids inside each widget's panel, for tree containment
    panel_nodes: HashMap<WidgetId, Vec<WidgetId>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            timers: ManualTimers::new(),
            listeners: ListenerRegistry::new(),
            viewport: Size::new(1280.0, 720.0),
            triggers: HashMap::new(),
            panels: HashMap::new(),
            panel_nodes: HashMap::new(),
        }
    }
}

impl MockHost {
    /// Create a host with a 1280×720 viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size.
    #[must_use]
    pub const fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    /// Mount (or move) a widget's trigger.
    pub fn set_trigger(&mut self, owner: WidgetId, rect: Rect) {
        self.triggers.insert(owner, rect);
    }

    /// Mount (or move) a widget's panel.
    pub fn set_panel(&mut self, owner: WidgetId, rect: Rect) {
        self.panels.insert(owner, rect);
    }

    /// Unmount a widget's panel.
    pub fn clear_panel(&mut self, owner: WidgetId) {
        self.panels.remove(&owner);
    }

    /// Declare the node ids that live inside a widget's panel. Once set,
    /// containment is answered from this list instead of geometry.
    pub fn set_panel_nodes(&mut self, owner: WidgetId, nodes: Vec<WidgetId>) {
        self.panel_nodes.insert(owner, nodes);
    }

    /// Virtual timers.
    #[must_use]
    pub const fn timers(&self) -> &ManualTimers {
        &self.timers
    }

    /// Mutable virtual timers.
    pub fn timers_mut(&mut self) -> &mut ManualTimers {
        &mut self.timers
    }

    /// Listener registry.
    #[must_use]
    pub const fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

impl Timers for MockHost {
    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.timers.schedule(delay_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }
}

impl DocumentListeners for MockHost {
    fn add_pointer_down(&mut self, owner: WidgetId) -> ListenerId {
        self.listeners.add_pointer_down(owner)
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

impl LayoutQuery for MockHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn trigger_rect(&self, owner: WidgetId) -> Option<Rect> {
        self.triggers.get(&owner).copied()
    }

    fn panel_rect(&self, owner: WidgetId) -> Option<Rect> {
        self.panels.get(&owner).copied()
    }

    fn panel_owns(&self, owner: WidgetId, target: WidgetId) -> Option<bool> {
        self.panel_nodes
            .get(&owner)
            .map(|nodes| nodes.contains(&target))
    }
}
