//! Error types for folio-widgets.

use thiserror::Error;

/// Errors raised while configuring widgets.
///
/// Runtime event handling never fails; these only come out of parsing and
/// loading configuration.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A placement name outside the eight supported values.
    #[error("Unknown placement: {0:?}")]
    UnknownPlacement(String),

    /// A field holds a value the widget cannot honor.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error while reading a settings file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file extension is neither TOML nor YAML.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),
}

impl WidgetError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
