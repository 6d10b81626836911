//! Test harness for driving a widget against a [`MockHost`].

use crate::host::MockHost;
use folio_core::{Event, Point, Rect, Widget, WidgetId};
use std::any::Any;

/// Drives one widget through pointer events and virtual time.
pub struct Harness<W: Widget> {
    widget: W,
    host: MockHost,
    /// Messages returned by the widget, in order
    messages: Vec<Box<dyn Any + Send>>,
}

impl<W: Widget> Harness<W> {
    /// Create a harness with a default host.
    pub fn new(widget: W) -> Self {
        Self::with_host(widget, MockHost::new())
    }

    /// Create a harness around an existing host.
    pub fn with_host(widget: W, host: MockHost) -> Self {
        Self {
            widget,
            host,
            messages: Vec::new(),
        }
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.host.set_viewport(width, height);
        self
    }

    /// Mount the widget's trigger at `rect`.
    #[must_use]
    pub fn trigger(mut self, rect: Rect) -> Self {
        self.host.set_trigger(self.widget.id(), rect);
        self
    }

    /// Mount the widget's panel at `rect`.
    #[must_use]
    pub fn panel(mut self, rect: Rect) -> Self {
        self.host.set_panel(self.widget.id(), rect);
        self
    }

    // === Event Simulation ===

    /// Pointer enters the trigger.
    pub fn enter(&mut self) -> &mut Self {
        self.dispatch(&Event::PointerEnter);
        self
    }

    /// Pointer leaves the trigger.
    pub fn leave(&mut self) -> &mut Self {
        self.dispatch(&Event::PointerLeave);
        self
    }

    /// Advance virtual time, firing every timer that comes due, including
    /// timers scheduled while handling earlier ones.
    pub fn advance(&mut self, ms: u32) -> &mut Self {
        let limit = self.host.timers().now_ms() + u64::from(ms);
        while let Some(timer) = self.host.timers_mut().pop_due(limit) {
            tracing::trace!(timer = timer.0, "timer fired");
            if let Some(msg) = self.widget.timer_fired(timer, &mut self.host) {
                self.messages.push(msg);
            }
        }
        self.host.timers_mut().set_now(limit);
        self
    }

    /// Press somewhere in the document with no known target node.
    pub fn press_at(&mut self, position: Point) -> &mut Self {
        self.press(position, None)
    }

    /// Press on a specific node.
    pub fn press_on(&mut self, position: Point, target: WidgetId) -> &mut Self {
        self.press(position, Some(target))
    }

    /// Tear the widget down.
    pub fn unmount(&mut self) -> &mut Self {
        self.widget.unmount(&mut self.host);
        self
    }

    // === Queries ===

    /// The widget under test.
    pub const fn widget(&self) -> &W {
        &self.widget
    }

    /// Mutable access to the widget under test.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// The host.
    pub const fn host(&self) -> &MockHost {
        &self.host
    }

    /// Mutable access to the host, e.g. to move the panel.
    pub fn host_mut(&mut self) -> &mut MockHost {
        &mut self.host
    }

    /// Current virtual time.
    pub const fn now_ms(&self) -> u64 {
        self.host.timers().now_ms()
    }

    /// Timers still pending on the host.
    pub fn pending_timers(&self) -> usize {
        self.host.timers().pending_count()
    }

    /// Document listeners still registered on the host.
    pub fn listener_count(&self) -> usize {
        self.host.listeners().len()
    }

    /// Every message the widget has returned so far.
    pub fn messages(&self) -> &[Box<dyn Any + Send>] {
        &self.messages
    }

    /// Messages of type `M`, in order.
    pub fn messages_of<M: 'static>(&self) -> Vec<&M> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<M>())
            .collect()
    }

    /// The most recent message of type `M`.
    pub fn last_message<M: 'static>(&self) -> Option<&M> {
        self.messages.iter().rev().find_map(|m| m.downcast_ref::<M>())
    }

    /// Drop recorded messages.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    // === Assertions ===

    /// Assert that no timer is pending and no document listener is attached.
    ///
    /// # Panics
    ///
    /// Panics if the host still holds a timer or listener.
    pub fn assert_no_leaks(&self) -> &Self {
        let timers = self.pending_timers();
        let listeners = self.listener_count();
        assert!(
            timers == 0 && listeners == 0,
            "Expected no leaked resources but found {timers} timer(s) and {listeners} listener(s)"
        );
        self
    }

    // === Internal ===

    fn dispatch(&mut self, event: &Event) {
        if let Some(msg) = self.widget.event(event, &mut self.host) {
            self.messages.push(msg);
        }
    }

    /// Presses only reach the widget through its document listeners.
    fn press(&mut self, position: Point, target: Option<WidgetId>) -> &mut Self {
        let registrations = self.host.listeners().count_for(self.widget.id());
        let event = Event::PointerDown { position, target };
        for _ in 0..registrations {
            self.dispatch(&event);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Host, ListenerId, TimerId, TypeId};

    /// Records what reaches it; holds one listener and one timer on demand.
    #[derive(Default)]
    struct Probe {
        events: Vec<Event>,
        fired: Vec<TimerId>,
        listener: Option<ListenerId>,
        timer: Option<TimerId>,
    }

    impl Widget for Probe {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn id(&self) -> WidgetId {
            WidgetId::new(9)
        }

        fn event(&mut self, event: &Event, host: &mut dyn Host) -> Option<Box<dyn Any + Send>> {
            if *event == Event::PointerEnter {
                self.listener = Some(host.add_pointer_down(WidgetId::new(9)));
                let first = host.schedule(10);
                self.timer = Some(first);
            }
            self.events.push(event.clone());
            Some(Box::new(self.events.len()))
        }

        fn timer_fired(&mut self, timer: TimerId, host: &mut dyn Host) -> Option<Box<dyn Any + Send>> {
            self.fired.push(timer);
            // Chain a second timer from inside the first.
            if self.fired.len() == 1 {
                self.timer = Some(host.schedule(5));
            } else {
                self.timer = None;
            }
            None
        }

        fn unmount(&mut self, host: &mut dyn Host) {
            if let Some(timer) = self.timer.take() {
                host.cancel(timer);
            }
            if let Some(listener) = self.listener.take() {
                host.remove(listener);
            }
        }
    }

    #[test]
    fn test_advance_fires_chained_timers() {
        let mut harness = Harness::new(Probe::default());
        harness.enter().advance(15);
        assert_eq!(harness.widget().fired.len(), 2);
        assert_eq!(harness.now_ms(), 15);
    }

    #[test]
    fn test_press_requires_listener() {
        let mut harness = Harness::new(Probe::default());
        harness.press_at(Point::new(1.0, 1.0));
        assert!(harness.widget().events.is_empty());

        harness.enter().press_at(Point::new(1.0, 1.0));
        assert_eq!(harness.widget().events.len(), 2);
    }

    #[test]
    fn test_messages_recorded() {
        let mut harness = Harness::new(Probe::default());
        harness.enter().leave();
        assert_eq!(harness.messages().len(), 2);
        assert_eq!(harness.last_message::<usize>(), Some(&2));
        assert_eq!(harness.messages_of::<usize>(), vec![&1, &2]);
        harness.clear_messages();
        assert!(harness.messages().is_empty());
    }

    #[test]
    fn test_assert_no_leaks_after_unmount() {
        let mut harness = Harness::new(Probe::default());
        harness.enter().unmount();
        harness.assert_no_leaks();
    }

    #[test]
    #[should_panic(expected = "leaked resources")]
    fn test_assert_no_leaks_detects_listener() {
        let mut harness = Harness::new(Probe::default());
        harness.enter();
        harness.assert_no_leaks();
    }
}
