//! Error types for JSON materialization.
//!
//! Materializing an already-decoded document cannot fail. The only failures are raw
//! input that does not decode into a JSON object, and decoded values of the wrong
//! shape handed to the merge entry points.

use thiserror::Error;

/// Structured error types for JSON decoding and merging.
///
/// Every variant is raised before the target map is touched, so a failed merge
/// leaves the target exactly as it was.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JsonError {
    /// The input was not valid JSON, or its top-level value was not an object
    #[error("Failed to decode JSON object: {source}")]
    Decode { source: serde_json::Error },

    /// A decoded value other than an object was given where an object is required
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl JsonError {
    /// Check if this error was raised while decoding raw input
    pub fn is_decode_error(&self) -> bool {
        matches!(self, JsonError::Decode { .. })
    }

    /// Check if this error is related to the shape of a decoded value
    pub fn is_type_error(&self) -> bool {
        matches!(self, JsonError::NotAnObject { .. })
    }

    /// Get the line and column of a decode failure, when the decoder reported one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            JsonError::Decode { source } if source.line() > 0 => {
                Some((source.line(), source.column()))
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(source: serde_json::Error) -> Self {
        JsonError::Decode { source }
    }
}

// Conversion from JsonError to the main Error type
impl From<JsonError> for crate::Error {
    fn from(err: JsonError) -> Self {
        crate::Error::Json(err)
    }
}

impl From<serde_json::Error> for crate::Error {
    fn from(err: serde_json::Error) -> Self {
        crate::Error::Json(JsonError::from(err))
    }
}
