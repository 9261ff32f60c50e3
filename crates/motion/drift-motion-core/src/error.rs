//! Error types for the motion engines.

use thiserror::Error;

/// Errors raised while building engines or parsing their configuration.
///
/// Gesture and frame handlers never return these; bad samples are dropped instead.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MotionError {
    /// A configuration field is out of its accepted range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),

    /// A pill rotator needs at least one variant.
    #[error("pill rotator requires at least one variant")]
    EmptyPillVariants,

    /// A value that must be finite was NaN or infinite.
    #[error("non-finite value for {what}")]
    NonFinite { what: &'static str },
}

impl From<serde_json::Error> for MotionError {
    fn from(e: serde_json::Error) -> Self {
        MotionError::Parse(e.to_string())
    }
}
