//!
//! A small concurrent map and a recursive JSON loader built on top of it.
//!
//! ## Core Concepts
//!
//! * **ConcurrentMap (`map::ConcurrentMap`)**: A key-value map guarded by a single
//!   reader/writer lock. Any number of readers may run together; mutators are exclusive.
//! * **Nested maps (`map::Nested`, `map::Plain`)**: Recursive copies of plain nested
//!   mappings, where every inner mapping becomes its own independently locked map.
//! * **JSON materialization (`json`)**: Decoded JSON documents are rebuilt so that every
//!   object becomes a [`JsonMap`], while arrays and scalars stay ordinary values
//!   (requires the "json" feature, enabled by default).

pub mod constants;
#[cfg(feature = "json")]
pub mod json;
pub mod map;

/// Re-export the `ConcurrentMap` struct for easier access.
pub use map::ConcurrentMap;

#[cfg(feature = "json")]
pub use json::{JsonError, JsonMap, Value};

/// Result type used throughout the library.
#[cfg(feature = "json")]
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
///
/// Map operations themselves never fail; errors only arise when decoding external input.
#[cfg(feature = "json")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured JSON errors from the json module
    #[error(transparent)]
    Json(json::JsonError),
}

#[cfg(feature = "json")]
impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Json(_) => "json",
        }
    }

    /// Check if this error was raised while decoding raw input.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::Json(json_err) => json_err.is_decode_error(),
        }
    }

    /// Check if this error indicates a value of the wrong JSON type.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Json(json_err) => json_err.is_type_error(),
        }
    }
}
