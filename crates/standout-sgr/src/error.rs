//! Error types for style construction and rendering.

use thiserror::Error;

/// Errors that can occur when building, deriving or rendering styles.
///
/// Every error is reported at the point of the offending operation. There is
/// no fallback style: an unresolvable request always fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// RGB channel out of range or malformed hex color.
    #[error("invalid color {value}: {reason}")]
    InvalidColor { value: String, reason: String },

    /// Color name is not one of the basic colors.
    #[error("unknown color '{0}'")]
    UnknownColor(String),

    /// Scheme reference that neither the registry nor the active color scheme resolves.
    #[error("unknown color scheme entry '{0}'")]
    UnknownScheme(String),

    /// Scheme references nested too deeply, usually a scheme entry referring to itself.
    #[error("color scheme entry '{0}' nests too deeply (cycle?)")]
    SchemeDepthExceeded(String),

    /// Input does not have the shape of any style element.
    #[error("'{0}' is not a valid style element")]
    InvalidStyleElement(String),

    /// No resolution rule matches the requested style.
    #[error("'{0}' is not a defined style")]
    UndefinedStyle(String),

    /// A variant was requested on a compound (list) style.
    #[error("cannot derive a variant of list style '{0}'")]
    NotSingleStyle(String),

    /// A code increment was requested but the code has no numeric field.
    #[error("unexpected code {0:?}: no numeric field to adjust")]
    MalformedCode(String),

    /// An RGB or HSV adjustment was requested on a style without RGB values.
    #[error("style '{0}' has no RGB value to adjust")]
    NoRgb(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse style configuration: {0}")]
    Parse(String),
}

impl StyleError {
    /// Create an invalid color error.
    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for StyleError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;
