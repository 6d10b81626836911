//! Tooltip placement relative to its trigger.

use crate::error::WidgetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the panel is anchored around the trigger.
///
/// Serialized in kebab-case (`"top-left"`), the same spelling `FromStr`
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Above the trigger, horizontally centered
    #[default]
    Top,
    /// Below the trigger, horizontally centered
    Bottom,
    /// Left of the trigger, vertically centered
    Left,
    /// Right of the trigger, vertically centered
    Right,
    /// Above, extending towards the left from the trigger's right edge
    TopLeft,
    /// Above, extending towards the right from the trigger's left edge
    TopRight,
    /// Below, extending towards the left from the trigger's right edge
    BottomLeft,
    /// Below, extending towards the right from the trigger's left edge
    BottomRight,
}

/// Trigger side the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above
    Top,
    /// Below
    Bottom,
    /// Left
    Left,
    /// Right
    Right,
}

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// The trigger side the panel sits on.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Side::Top,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Side::Bottom,
            Self::Left => Side::Left,
            Self::Right => Side::Right,
        }
    }

    /// Parse a placement name, falling back to [`Placement::Top`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: WidgetError| {
            tracing::warn!(%err, "falling back to default placement");
            Self::default()
        })
    }
}

impl FromStr for Placement {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| WidgetError::UnknownPlacement(s.to_string()))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
