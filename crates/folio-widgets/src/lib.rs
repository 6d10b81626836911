//! Widget implementations for Folio.
//!
//! The crate ships one widget, [`Tooltip`], together with the placement
//! engine it uses to stay inside the viewport.

pub mod config;
pub mod error;
pub mod placement;
pub mod positioning;
pub mod tooltip;

pub use config::TooltipSettings;
pub use error::WidgetError;
pub use placement::{Placement, Side};
pub use positioning::{
    adjust, layout_panel, Adjustment, EdgeRule, GeometrySnapshot, HorizontalPin, PanelLayout,
    PositioningConfig,
};
pub use tooltip::{
    DismissReason, PlacementAdjusted, Tooltip, TooltipDismissed, TooltipShown, Visibility,
};
