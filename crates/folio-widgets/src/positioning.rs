//! Viewport-aware placement adjustment and panel geometry.
//!
//! [`adjust`] decides which side the panel should sit on given a snapshot of
//! trigger, panel and viewport geometry. [`layout_panel`] turns that decision
//! into concrete rectangles for the panel and its arrow.

use crate::error::WidgetError;
use crate::placement::{Placement, Side};
use folio_core::{LayoutQuery, Point, Rect, Size, WidgetId};
use serde::{Deserialize, Serialize};

/// Tunable constants for edge detection and panel geometry.
///
/// Bands are fractions of the viewport: a trigger whose bottom edge is below
/// `bottom_band * height` counts as "near the bottom", and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositioningConfig {
    /// Top edge band (fraction of viewport height)
    pub top_band: f32,
    /// Bottom edge band (fraction of viewport height)
    pub bottom_band: f32,
    /// Left edge band (fraction of viewport width)
    pub left_band: f32,
    /// Right edge band (fraction of viewport width)
    pub right_band: f32,
    /// Distance kept from the viewport edge when the panel is pinned
    pub edge_margin: f32,
    /// Wait after the panel mounts before measuring it
    pub settle_delay_ms: u32,
    /// Space between trigger and panel
    pub gap: f32,
    /// Arrow half-width and depth
    pub arrow_size: f32,
    /// Inset of the panel from the trigger edge for `top-left`/`top-right`,
    /// and of the arrow from the panel edge for every corner placement
    pub corner_inset: f32,
    /// Inset of the panel from the trigger edge for `bottom-left`/`bottom-right`
    pub bottom_corner_inset: f32,
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            top_band: 0.1,
            bottom_band: 0.9,
            left_band: 0.1,
            right_band: 0.9,
            edge_margin: 10.0,
            settle_delay_ms: 50,
            gap: 4.0,
            arrow_size: 4.0,
            corner_inset: 8.0,
            bottom_corner_inset: 0.0,
        }
    }
}

impl PositioningConfig {
    /// Check that bands are ordered fractions and lengths are non-negative.
    pub fn validate(&self) -> Result<(), WidgetError> {
        for (field, value) in [
            ("top_band", self.top_band),
            ("bottom_band", self.bottom_band),
            ("left_band", self.left_band),
            ("right_band", self.right_band),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WidgetError::invalid(
                    field,
                    format!("{value} is outside [0, 1]"),
                ));
            }
        }
        if self.top_band >= self.bottom_band {
            return Err(WidgetError::invalid(
                "top_band",
                "must be smaller than bottom_band",
            ));
        }
        if self.left_band >= self.right_band {
            return Err(WidgetError::invalid(
                "left_band",
                "must be smaller than right_band",
            ));
        }
        for (field, value) in [
            ("edge_margin", self.edge_margin),
            ("gap", self.gap),
            ("arrow_size", self.arrow_size),
            ("corner_inset", self.corner_inset),
            ("bottom_corner_inset", self.bottom_corner_inset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WidgetError::invalid(field, "must be a non-negative length"));
            }
        }
        Ok(())
    }
}

/// Trigger, panel and viewport geometry captured once per show cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Trigger bounding rect
    pub trigger: Rect,
    /// Panel bounding rect as mounted
    pub panel: Rect,
    /// Viewport size
    pub viewport: Size,
}

impl GeometrySnapshot {
    /// Read the current geometry for `owner`. `None` when either the trigger
    /// or the panel is not mounted.
    pub fn capture<L: LayoutQuery + ?Sized>(layout: &L, owner: WidgetId) -> Option<Self> {
        Some(Self {
            trigger: layout.trigger_rect(owner)?,
            panel: layout.panel_rect(owner)?,
            viewport: layout.viewport(),
        })
    }
}

/// Horizontal override applied on top of the placement's own alignment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum HorizontalPin {
    /// Use the placement's alignment (centering transform for `top`)
    #[default]
    Natural,
    /// Left edge this far from the viewport's left edge, no centering
    Left(f32),
    /// Right edge this far from the viewport's right edge, no centering
    Right(f32),
}

/// Which edge rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeRule {
    /// Trigger bottom below the bottom band: forced `top`
    NearBottom,
    /// Trigger top above the top band: forced `bottom`
    NearTop,
    /// Trigger right edge past the right band: forced `left`
    NearRight,
    /// Trigger left edge before the left band: forced `right`
    NearLeft,
    /// No rule fired; requested placement kept
    None,
}

/// Result of the placement adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Effective placement
    pub placement: Placement,
    /// Horizontal override
    pub pin: HorizontalPin,
    /// Rule that produced this result
    pub rule: EdgeRule,
}

impl Adjustment {
    /// The requested placement, untouched.
    #[must_use]
    pub const fn keep(placement: Placement) -> Self {
        Self {
            placement,
            pin: HorizontalPin::Natural,
            rule: EdgeRule::None,
        }
    }

    /// Whether the effective placement differs from `requested` or a pin
    /// applies.
    #[must_use]
    pub fn changed_from(&self, requested: Placement) -> bool {
        self.placement != requested || self.pin != HorizontalPin::Natural
    }
}

/// Pick the effective placement for `requested`. Rules are evaluated in a
/// fixed order and the first match wins: bottom, top, right, left.
#[must_use]
pub fn adjust(
    requested: Placement,
    snapshot: &GeometrySnapshot,
    config: &PositioningConfig,
) -> Adjustment {
    let trigger = snapshot.trigger;
    let panel_width = snapshot.panel.width;
    let Size {
        width: viewport_width,
        height: viewport_height,
    } = snapshot.viewport;

    if trigger.bottom() > viewport_height * config.bottom_band {
        let margin = config.edge_margin;
        let centered_left = trigger.left() + trigger.width / 2.0 - panel_width / 2.0;
        let pin = if centered_left < margin {
            HorizontalPin::Left(margin)
        } else if centered_left + panel_width > viewport_width - margin {
            HorizontalPin::Right(margin)
        } else {
            HorizontalPin::Natural
        };
        return Adjustment {
            placement: Placement::Top,
            pin,
            rule: EdgeRule::NearBottom,
        };
    }

    let (placement, rule) = if trigger.top() < viewport_height * config.top_band {
        (Placement::Bottom, EdgeRule::NearTop)
    } else if trigger.right() > viewport_width * config.right_band {
        (Placement::Left, EdgeRule::NearRight)
    } else if trigger.left() < viewport_width * config.left_band {
        (Placement::Right, EdgeRule::NearLeft)
    } else {
        (requested, EdgeRule::None)
    };

    Adjustment {
        placement,
        pin: HorizontalPin::Natural,
        rule,
    }
}

/// Concrete viewport-space geometry for a shown panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Effective placement
    pub placement: Placement,
    /// Panel frame
    pub frame: Rect,
    /// Arrow rect on the panel edge facing the trigger
    pub arrow: Rect,
}

/// Position a panel of `panel` size around `trigger`.
#[must_use]
pub fn layout_panel(
    trigger: Rect,
    panel: Size,
    adjustment: &Adjustment,
    viewport: Size,
    config: &PositioningConfig,
) -> PanelLayout {
    let origin = natural_origin(trigger, panel, adjustment.placement, config);
    let x = match adjustment.pin {
        HorizontalPin::Natural => origin.x,
        HorizontalPin::Left(margin) => margin,
        HorizontalPin::Right(margin) => viewport.width - margin - panel.width,
    };
    let frame = Rect::new(x, origin.y, panel.width, panel.height);

    PanelLayout {
        placement: adjustment.placement,
        frame,
        arrow: arrow_rect(frame, adjustment.placement, config),
    }
}

fn natural_origin(
    trigger: Rect,
    panel: Size,
    placement: Placement,
    config: &PositioningConfig,
) -> Point {
    let gap = config.gap;
    let centered_x = trigger.x + (trigger.width - panel.width) / 2.0;
    let centered_y = trigger.y + (trigger.height - panel.height) / 2.0;
    let above = trigger.y - panel.height - gap;
    let below = trigger.bottom() + gap;
    let right_aligned = |inset: f32| trigger.right() - inset - panel.width;
    let left_aligned = |inset: f32| trigger.x + inset;

    match placement {
        Placement::Top => Point::new(centered_x, above),
        Placement::Bottom => Point::new(centered_x, below),
        Placement::Left => Point::new(trigger.x - panel.width - gap, centered_y),
        Placement::Right => Point::new(trigger.right() + gap, centered_y),
        Placement::TopLeft => Point::new(right_aligned(config.corner_inset), above),
        Placement::TopRight => Point::new(left_aligned(config.corner_inset), above),
        Placement::BottomLeft => Point::new(right_aligned(config.bottom_corner_inset), below),
        Placement::BottomRight => Point::new(left_aligned(config.bottom_corner_inset), below),
    }
}

fn arrow_rect(frame: Rect, placement: Placement, config: &PositioningConfig) -> Rect {
    let a = config.arrow_size;
    let cx = match placement {
        Placement::TopLeft | Placement::BottomLeft => frame.right() - config.corner_inset - a,
        Placement::TopRight | Placement::BottomRight => frame.x + config.corner_inset + a,
        _ => frame.center().x,
    };
    let cy = frame.center().y;

    match placement.side() {
        Side::Top => Rect::new(cx - a, frame.bottom(), a * 2.0, a),
        Side::Bottom => Rect::new(cx - a, frame.y - a, a * 2.0, a),
        Side::Left => Rect::new(frame.right(), cy - a, a, a * 2.0),
        Side::Right => Rect::new(frame.x - a, cy - a, a, a * 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Size = Size::new(1024.0, 768.0);

    fn snapshot(trigger: Rect, panel: Size) -> GeometrySnapshot {
        GeometrySnapshot {
            trigger,
            panel: Rect::from_origin_size(Point::ORIGIN, panel),
            viewport: VIEWPORT,
        }
    }

    // ===== Adjustment Tests =====

    #[test]
    fn test_adjust_centered_keeps_every_placement() {
        let snap = snapshot(Rect::new(462.0, 369.0, 100.0, 30.0), Size::new(120.0, 40.0));
        for requested in Placement::ALL {
            let adj = adjust(requested, &snap, &PositioningConfig::default());
            assert_eq!(adj, Adjustment::keep(requested));
        }
    }

    #[test]
    fn test_adjust_near_bottom_forces_top() {
        let snap = snapshot(Rect::new(400.0, 700.0, 100.0, 30.0), Size::new(120.0, 40.0));
        for requested in Placement::ALL {
            let adj = adjust(requested, &snap, &PositioningConfig::default());
            assert_eq!(adj.placement, Placement::Top);
            assert_eq!(adj.rule, EdgeRule::NearBottom);
            assert_eq!(adj.pin, HorizontalPin::Natural);
        }
    }

    #[test]
    fn test_adjust_near_bottom_left_overflow_pins_left() {
        // centered left = 0 + 15 - 60 = -45
        let snap = snapshot(Rect::new(0.0, 720.0, 30.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Right, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Top);
        assert_eq!(adj.pin, HorizontalPin::Left(10.0));
    }

    #[test]
    fn test_adjust_near_bottom_right_overflow_pins_right() {
        // centered left = 990 + 15 - 60 = 945; 945 + 120 > 1014
        let snap = snapshot(Rect::new(990.0, 720.0, 30.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Left, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Top);
        assert_eq!(adj.pin, HorizontalPin::Right(10.0));
    }

    #[test]
    fn test_adjust_left_pin_checked_before_right_pin() {
        // Panel wider than the viewport overflows both sides.
        let snap = snapshot(Rect::new(500.0, 720.0, 20.0, 30.0), Size::new(2000.0, 40.0));
        let adj = adjust(Placement::Top, &snap, &PositioningConfig::default());
        assert_eq!(adj.pin, HorizontalPin::Left(10.0));
    }

    #[test]
    fn test_adjust_near_top_forces_bottom() {
        let snap = snapshot(Rect::new(400.0, 20.0, 100.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Top, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Bottom);
        assert_eq!(adj.rule, EdgeRule::NearTop);
    }

    #[test]
    fn test_adjust_near_right_forces_left() {
        let snap = snapshot(Rect::new(950.0, 300.0, 60.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Top, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Left);
        assert_eq!(adj.rule, EdgeRule::NearRight);
    }

    #[test]
    fn test_adjust_near_left_forces_right() {
        let snap = snapshot(Rect::new(20.0, 300.0, 60.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Bottom, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Right);
        assert_eq!(adj.rule, EdgeRule::NearLeft);
    }

    #[test]
    fn test_adjust_first_match_wins_in_corner() {
        // Top-left corner: top rule beats left rule.
        let snap = snapshot(Rect::new(5.0, 5.0, 30.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Top, &snap, &PositioningConfig::default());
        assert_eq!(adj.placement, Placement::Bottom);

        // Bottom-right corner: bottom rule beats right rule.
        let snap = snapshot(Rect::new(990.0, 740.0, 30.0, 20.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Top, &snap, &PositioningConfig::default());
        assert_eq!(adj.rule, EdgeRule::NearBottom);
    }

    #[test]
    fn test_adjust_uses_configured_bands() {
        let config = PositioningConfig {
            bottom_band: 0.5,
            ..PositioningConfig::default()
        };
        let snap = snapshot(Rect::new(462.0, 369.0, 100.0, 30.0), Size::new(120.0, 40.0));
        let adj = adjust(Placement::Bottom, &snap, &config);
        assert_eq!(adj.placement, Placement::Top);
    }

    #[test]
    fn test_adjustment_changed_from() {
        assert!(!Adjustment::keep(Placement::Left).changed_from(Placement::Left));
        let pinned = Adjustment {
            placement: Placement::Top,
            pin: HorizontalPin::Left(10.0),
            rule: EdgeRule::NearBottom,
        };
        assert!(pinned.changed_from(Placement::Top));
    }

    // ===== Layout Tests =====

    #[test]
    fn test_layout_top_centered_above_trigger() {
        let trigger = Rect::new(400.0, 700.0, 100.0, 30.0);
        let layout = layout_panel(
            trigger,
            Size::new(120.0, 40.0),
            &Adjustment::keep(Placement::Top),
            VIEWPORT,
            &PositioningConfig::default(),
        );
        assert_eq!(layout.frame, Rect::new(390.0, 656.0, 120.0, 40.0));
        // Arrow hangs below the panel, centered.
        assert_eq!(layout.arrow, Rect::new(446.0, 696.0, 8.0, 4.0));
    }

    #[test]
    fn test_layout_sides() {
        let trigger = Rect::new(400.0, 300.0, 100.0, 30.0);
        let panel = Size::new(120.0, 40.0);
        let config = PositioningConfig::default();
        let at = |p| layout_panel(trigger, panel, &Adjustment::keep(p), VIEWPORT, &config).frame;

        assert_eq!(at(Placement::Bottom), Rect::new(390.0, 334.0, 120.0, 40.0));
        assert_eq!(at(Placement::Left), Rect::new(276.0, 295.0, 120.0, 40.0));
        assert_eq!(at(Placement::Right), Rect::new(504.0, 295.0, 120.0, 40.0));
    }

    #[test]
    fn test_layout_corners() {
        let trigger = Rect::new(400.0, 300.0, 100.0, 30.0);
        let panel = Size::new(120.0, 40.0);
        let config = PositioningConfig::default();
        let at = |p| layout_panel(trigger, panel, &Adjustment::keep(p), VIEWPORT, &config).frame;

        assert_eq!(at(Placement::TopLeft), Rect::new(372.0, 256.0, 120.0, 40.0));
        assert_eq!(at(Placement::TopRight), Rect::new(408.0, 256.0, 120.0, 40.0));
        assert_eq!(at(Placement::BottomLeft), Rect::new(380.0, 334.0, 120.0, 40.0));
        assert_eq!(at(Placement::BottomRight), Rect::new(400.0, 334.0, 120.0, 40.0));
    }

    #[test]
    fn test_layout_bottom_corners_flush_with_trigger() {
        let trigger = Rect::new(400.0, 300.0, 100.0, 30.0);
        let panel = Size::new(120.0, 40.0);
        let config = PositioningConfig::default();
        let at = |p| layout_panel(trigger, panel, &Adjustment::keep(p), VIEWPORT, &config);

        let bottom_left = at(Placement::BottomLeft);
        assert_eq!(bottom_left.frame.right(), trigger.right());
        let bottom_right = at(Placement::BottomRight);
        assert_eq!(bottom_right.frame.left(), trigger.left());

        // Top corners keep their inset.
        assert_eq!(at(Placement::TopLeft).frame.right(), trigger.right() - 8.0);
        assert_eq!(at(Placement::TopRight).frame.left(), trigger.left() + 8.0);

        // The arrow sits 8 px in from the panel edge for every corner.
        assert_eq!(bottom_left.arrow.right(), bottom_left.frame.right() - 8.0);
        assert_eq!(bottom_right.arrow.left(), bottom_right.frame.left() + 8.0);
    }

    #[test]
    fn test_layout_bottom_corner_inset_configurable() {
        let config = PositioningConfig {
            bottom_corner_inset: 6.0,
            ..PositioningConfig::default()
        };
        let trigger = Rect::new(400.0, 300.0, 100.0, 30.0);
        let layout = layout_panel(
            trigger,
            Size::new(120.0, 40.0),
            &Adjustment::keep(Placement::BottomRight),
            VIEWPORT,
            &config,
        );
        assert_eq!(layout.frame.x, 406.0);
    }

    #[test]
    fn test_layout_pins() {
        let trigger = Rect::new(0.0, 720.0, 30.0, 30.0);
        let panel = Size::new(120.0, 40.0);
        let config = PositioningConfig::default();

        let left = Adjustment {
            placement: Placement::Top,
            pin: HorizontalPin::Left(10.0),
            rule: EdgeRule::NearBottom,
        };
        assert_eq!(layout_panel(trigger, panel, &left, VIEWPORT, &config).frame.x, 10.0);

        let right = Adjustment {
            pin: HorizontalPin::Right(10.0),
            ..left
        };
        let frame = layout_panel(trigger, panel, &right, VIEWPORT, &config).frame;
        assert_eq!(frame.right(), 1014.0);
    }

    #[test]
    fn test_layout_arrow_faces_trigger() {
        let trigger = Rect::new(400.0, 300.0, 100.0, 30.0);
        let panel = Size::new(120.0, 40.0);
        let config = PositioningConfig::default();

        let left = layout_panel(trigger, panel, &Adjustment::keep(Placement::Left), VIEWPORT, &config);
        assert_eq!(left.arrow.x, left.frame.right());

        let right =
            layout_panel(trigger, panel, &Adjustment::keep(Placement::Right), VIEWPORT, &config);
        assert_eq!(right.arrow.right(), right.frame.x);

        let corner =
            layout_panel(trigger, panel, &Adjustment::keep(Placement::TopRight), VIEWPORT, &config);
        assert_eq!(corner.arrow.x, corner.frame.x + 8.0);
    }

    // ===== Config Tests =====

    #[test]
    fn test_config_default_validates() {
        assert!(PositioningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_out_of_range_band() {
        let config = PositioningConfig {
            right_band: 1.5,
            ..PositioningConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WidgetError::InvalidValue { field, .. }) if field == "right_band"
        ));
    }

    #[test]
    fn test_config_rejects_inverted_bands() {
        let config = PositioningConfig {
            top_band: 0.6,
            bottom_band: 0.4,
            ..PositioningConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_negative_bottom_corner_inset() {
        let config = PositioningConfig {
            bottom_corner_inset: -2.0,
            ..PositioningConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WidgetError::InvalidValue { field, .. }) if field == "bottom_corner_inset"
        ));
    }

    #[test]
    fn test_config_rejects_negative_margin() {
        let config = PositioningConfig {
            edge_margin: -1.0,
            ..PositioningConfig::default()
        };
        assert!(config.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_near_bottom_always_top(
            x in 0.0f32..1000.0,
            y in 692.0f32..760.0,
            panel_w in 10.0f32..400.0,
            requested in 0usize..8,
        ) {
            let snap = snapshot(Rect::new(x, y, 20.0, 8.0), Size::new(panel_w, 30.0));
            let adj = adjust(Placement::ALL[requested], &snap, &PositioningConfig::default());
            prop_assert_eq!(adj.placement, Placement::Top);
        }

        #[test]
        fn prop_pinned_frame_respects_margin(
            x in 0.0f32..1000.0,
            panel_w in 10.0f32..300.0,
        ) {
            let config = PositioningConfig::default();
            let trigger = Rect::new(x, 720.0, 20.0, 30.0);
            let panel = Size::new(panel_w, 30.0);
            let snap = snapshot(trigger, panel);
            let adj = adjust(Placement::Top, &snap, &config);
            let frame = layout_panel(trigger, panel, &adj, VIEWPORT, &config).frame;
            prop_assert!(frame.left() >= config.edge_margin - 0.001);
            prop_assert!(frame.right() <= VIEWPORT.width - config.edge_margin + 0.001);
        }

        #[test]
        fn prop_interior_trigger_keeps_request(
            x in 103.0f32..800.0,
            y in 77.0f32..600.0,
            requested in 0usize..8,
        ) {
            let snap = snapshot(Rect::new(x, y, 20.0, 20.0), Size::new(100.0, 30.0));
            let placement = Placement::ALL[requested];
            let adj = adjust(placement, &snap, &PositioningConfig::default());
            prop_assert_eq!(adj, Adjustment::keep(placement));
        }
    }
}
