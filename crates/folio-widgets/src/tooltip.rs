//! Tooltip widget: delayed, viewport-aware hover label.
//!
//! The tooltip walks `Hidden → Armed → Visible`. Pointer-enter arms a show
//! timer and registers a document pointer-down listener; the timer firing
//! mounts the panel and arms a short settle timer, after which geometry is
//! read and the placement adjusted. Pointer-leave, an outside press, or
//! unmount return it to `Hidden` and release every timer and listener.

use crate::config::TooltipSettings;
use crate::placement::Placement;
use crate::positioning::{
    adjust, layout_panel, Adjustment, GeometrySnapshot, PanelLayout, PositioningConfig,
};
use folio_core::{
    Deferred, Event, Host, LayoutQuery, ListenerId, Point, TimerId, TypeId, Widget, WidgetId,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Visibility state of a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Nothing shown, nothing pending
    #[default]
    Hidden,
    /// Show timer pending
    Armed,
    /// Panel mounted
    Visible,
}

/// Why a tooltip went back to `Hidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissReason {
    /// Pointer left the trigger
    PointerLeave,
    /// Pointer pressed outside the panel
    OutsidePress,
    /// Widget torn down
    Unmount,
}

/// Message emitted when the panel mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipShown {
    /// Tooltip that became visible
    pub id: WidgetId,
}

/// Message emitted when a tooltip hides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipDismissed {
    /// Tooltip that hid
    pub id: WidgetId,
    /// State it left
    pub from: Visibility,
    /// Cause
    pub reason: DismissReason,
}

/// Message emitted after geometry was measured and the placement decided.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementAdjusted {
    /// Tooltip that was measured
    pub id: WidgetId,
    /// Caller-requested placement
    pub requested: Placement,
    /// Outcome of the edge rules
    pub adjustment: Adjustment,
}

/// Tooltip widget wrapping a trigger.
#[derive(Debug)]
pub struct Tooltip {
    /// Instance id used for host lookups
    id: WidgetId,
    /// Panel content; `None` or empty keeps the tooltip inert
    content: Option<String>,
    /// Requested placement
    placement: Placement,
    /// Hover delay in milliseconds
    delay_ms: u32,
    /// Styling hook, no behavioral effect
    class_name: Option<String>,
    /// Edge detection and geometry constants
    positioning: PositioningConfig,
    /// Test ID
    test_id_value: Option<String>,
    visibility: Visibility,
    show_timer: Deferred,
    settle_timer: Deferred,
    /// Document pointer-down registration, held while Armed or Visible
    listener: Option<ListenerId>,
    /// Geometry captured for the current show cycle
    snapshot: Option<GeometrySnapshot>,
    adjustment: Option<Adjustment>,
}

impl Tooltip {
    /// Create a tooltip with content.
    #[must_use]
    pub fn new(id: WidgetId, content: impl Into<String>) -> Self {
        Self::empty(id).content(content)
    }

    /// Create a tooltip with no content. It never shows until content is set.
    #[must_use]
    pub fn empty(id: WidgetId) -> Self {
        let settings = TooltipSettings::default();
        Self {
            id,
            content: None,
            placement: settings.placement,
            delay_ms: settings.delay_ms,
            class_name: None,
            positioning: settings.positioning,
            test_id_value: None,
            visibility: Visibility::Hidden,
            show_timer: Deferred::new("show"),
            settle_timer: Deferred::new("settle"),
            listener: None,
            snapshot: None,
            adjustment: None,
        }
    }

    /// Set the content.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the requested placement.
    #[must_use]
    pub const fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the requested placement by name. Unknown names fall back to `top`.
    #[must_use]
    pub fn placement_named(mut self, name: &str) -> Self {
        self.placement = Placement::parse_or_default(name);
        self
    }

    /// Set the hover delay in milliseconds.
    #[must_use]
    pub const fn delay_ms(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Set the styling hook.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the positioning constants.
    #[must_use]
    pub const fn positioning(mut self, positioning: PositioningConfig) -> Self {
        self.positioning = positioning;
        self
    }

    /// Apply loaded settings (placement, delay, positioning).
    #[must_use]
    pub const fn with_settings(mut self, settings: &TooltipSettings) -> Self {
        self.placement = settings.placement;
        self.delay_ms = settings.delay_ms;
        self.positioning = settings.positioning;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the content.
    #[must_use]
    pub fn get_content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Get the requested placement.
    #[must_use]
    pub const fn get_placement(&self) -> Placement {
        self.placement
    }

    /// Get the hover delay in milliseconds.
    #[must_use]
    pub const fn get_delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Get the styling hook.
    #[must_use]
    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Get the positioning constants.
    #[must_use]
    pub const fn get_positioning(&self) -> &PositioningConfig {
        &self.positioning
    }

    /// Current visibility state.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Check if the panel is mounted.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Placement in effect: the adjusted one once geometry was measured,
    /// otherwise the requested one.
    #[must_use]
    pub fn effective_placement(&self) -> Placement {
        self.adjustment.map_or(self.placement, |adj| adj.placement)
    }

    /// Outcome of the last adjustment in this show cycle.
    #[must_use]
    pub const fn adjustment(&self) -> Option<&Adjustment> {
        self.adjustment.as_ref()
    }

    /// Geometry captured in this show cycle.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of timers this tooltip is waiting on.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        usize::from(self.show_timer.is_pending()) + usize::from(self.settle_timer.is_pending())
    }

    /// The held document listener, if any.
    #[must_use]
    pub const fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Compute where the panel should be drawn right now. `None` unless
    /// visible with a mounted trigger and panel.
    pub fn panel_layout<L: LayoutQuery + ?Sized>(&self, layout: &L) -> Option<PanelLayout> {
        if self.visibility != Visibility::Visible {
            return None;
        }
        let trigger = layout.trigger_rect(self.id)?;
        let panel = layout.panel_rect(self.id)?;
        let adjustment = self
            .adjustment
            .unwrap_or_else(|| Adjustment::keep(self.placement));
        Some(layout_panel(
            trigger,
            panel.size(),
            &adjustment,
            layout.viewport(),
            &self.positioning,
        ))
    }

    fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    fn pointer_enter(&mut self, host: &mut dyn Host) {
        if !self.has_content() {
            tracing::trace!(widget = self.id.0, "pointer enter ignored: no content");
            return;
        }
        if self.visibility == Visibility::Visible {
            tracing::trace!(widget = self.id.0, "pointer enter ignored: already visible");
            return;
        }

        self.show_timer.arm(host, self.delay_ms);
        if self.listener.is_none() {
            self.listener = Some(host.add_pointer_down(self.id));
        }
        self.visibility = Visibility::Armed;
        tracing::debug!(widget = self.id.0, delay_ms = self.delay_ms, "tooltip armed");
    }

    fn pointer_down(
        &mut self,
        position: Point,
        target: Option<WidgetId>,
        host: &mut dyn Host,
    ) -> Option<TooltipDismissed> {
        if self.visibility == Visibility::Hidden {
            return None;
        }
        if self.panel_contains(position, target, host) {
            tracing::trace!(widget = self.id.0, "press inside panel");
            return None;
        }
        Some(self.hide(host, DismissReason::OutsidePress))
    }

    /// Tree containment when the host can answer it, geometry otherwise.
    fn panel_contains(&self, position: Point, target: Option<WidgetId>, host: &dyn Host) -> bool {
        if let Some(owned) = target.and_then(|t| host.panel_owns(self.id, t)) {
            return owned;
        }
        host.panel_rect(self.id)
            .is_some_and(|panel| panel.contains_point(&position))
    }

    fn on_show_timer(&mut self, host: &mut dyn Host) -> Option<TooltipShown> {
        if self.visibility != Visibility::Armed {
            return None;
        }
        self.visibility = Visibility::Visible;
        self.settle_timer.arm(host, self.positioning.settle_delay_ms);
        tracing::debug!(widget = self.id.0, "tooltip visible");
        Some(TooltipShown { id: self.id })
    }

    fn on_settle_timer(&mut self, host: &dyn Host) -> Option<PlacementAdjusted> {
        if self.visibility != Visibility::Visible {
            return None;
        }
        let Some(snapshot) = GeometrySnapshot::capture(host, self.id) else {
            tracing::debug!(
                widget = self.id.0,
                placement = %self.placement,
                "geometry unavailable, keeping requested placement"
            );
            return None;
        };

        let adjustment = adjust(self.placement, &snapshot, &self.positioning);
        self.snapshot = Some(snapshot);
        self.adjustment = Some(adjustment);
        tracing::debug!(
            widget = self.id.0,
            requested = %self.placement,
            placement = %adjustment.placement,
            rule = ?adjustment.rule,
            pin = ?adjustment.pin,
            "placement adjusted"
        );
        Some(PlacementAdjusted {
            id: self.id,
            requested: self.placement,
            adjustment,
        })
    }

    /// Return to `Hidden`, releasing both timers and the listener.
    fn hide(&mut self, host: &mut dyn Host, reason: DismissReason) -> TooltipDismissed {
        let from = self.visibility;
        self.show_timer.cancel(host);
        self.settle_timer.cancel(host);
        if let Some(listener) = self.listener.take() {
            host.remove(listener);
        }
        self.visibility = Visibility::Hidden;
        self.snapshot = None;
        self.adjustment = None;
        tracing::debug!(widget = self.id.0, ?from, ?reason, "tooltip hidden");
        TooltipDismissed {
            id: self.id,
            from,
            reason,
        }
    }
}

impl Widget for Tooltip {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn id(&self) -> WidgetId {
        self.id
    }

    fn event(&mut self, event: &Event, host: &mut dyn Host) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::PointerEnter => {
                self.pointer_enter(host);
                None
            }
            Event::PointerLeave => {
                if self.visibility == Visibility::Hidden {
                    return None;
                }
                Some(Box::new(self.hide(host, DismissReason::PointerLeave)))
            }
            Event::PointerDown { position, target } => self
                .pointer_down(*position, *target, host)
                .map(|msg| Box::new(msg) as Box<dyn Any + Send>),
        }
    }

    fn timer_fired(&mut self, timer: TimerId, host: &mut dyn Host) -> Option<Box<dyn Any + Send>> {
        if self.show_timer.claim(timer) {
            return self
                .on_show_timer(host)
                .map(|msg| Box::new(msg) as Box<dyn Any + Send>);
        }
        if self.settle_timer.claim(timer) {
            return self
                .on_settle_timer(host)
                .map(|msg| Box::new(msg) as Box<dyn Any + Send>);
        }
        tracing::trace!(widget = self.id.0, timer = timer.0, "ignoring foreign timer");
        None
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.hide(host, DismissReason::Unmount);
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
