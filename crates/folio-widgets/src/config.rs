//! Tooltip settings loaded from TOML or YAML.
//!
//! ```toml
//! placement = "bottom-right"
//! delay_ms = 300
//!
//! [positioning]
//! bottom_band = 0.85
//! edge_margin = 12.0
//! ```

use crate::error::WidgetError;
use crate::placement::Placement;
use crate::positioning::PositioningConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default hover delay in milliseconds.
pub const DEFAULT_DELAY_MS: u32 = 200;

/// Shared tooltip defaults. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    /// Requested placement
    pub placement: Placement,
    /// Hover delay in milliseconds
    pub delay_ms: u32,
    /// Edge detection and geometry constants
    pub positioning: PositioningConfig,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            placement: Placement::Top,
            delay_ms: DEFAULT_DELAY_MS,
            positioning: PositioningConfig::default(),
        }
    }
}

impl TooltipSettings {
    /// Parse and validate TOML settings.
    pub fn from_toml_str(source: &str) -> Result<Self, WidgetError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate YAML settings.
    pub fn from_yaml_str(source: &str) -> Result<Self, WidgetError> {
        let settings: Self = serde_yaml_ng::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.toml`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, WidgetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let source = match ext.as_str() {
            "toml" | "yaml" | "yml" => std::fs::read_to_string(path)?,
            _ => return Err(WidgetError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(path = %path.display(), format = %ext, "loading tooltip settings");
        if ext == "toml" {
            Self::from_toml_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), WidgetError> {
        self.positioning.validate()
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, WidgetError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
