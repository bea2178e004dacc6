//! Error types for engine lookups
//!
//! This module defines the error returned by the external engine
//! collaborators (metadata store, statistics cursors).
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for engine lookups
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Failure reported by the storage engine while fetching metadata or statistics
///
/// `NotFound` is kept distinct from every other failure so callers can treat
/// a missing resource as a benign default and anything else as a hard error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No entry exists for the resource
    #[error("unable to find metadata for {uri}")]
    NotFound {
        /// Resource identifier that was looked up
        uri: String,
    },

    /// A cursor over the resource could not be opened
    #[error("unable to open cursor at URI {uri}. reason: {reason}")]
    CursorUnavailable {
        /// Resource identifier the cursor was opened on
        uri: String,
        /// Engine-provided reason
        reason: String,
    },

    /// Any other engine failure, with the engine's return code
    #[error("engine error {code}: {message}")]
    Engine {
        /// Engine return code
        code: i32,
        /// Engine-provided message
        message: String,
    },
}

impl LookupError {
    /// Create a NotFound error
    pub fn not_found(uri: impl Into<String>) -> Self {
        LookupError::NotFound { uri: uri.into() }
    }

    /// Create a CursorUnavailable error
    pub fn cursor_unavailable(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        LookupError::CursorUnavailable {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Create an Engine error
    pub fn engine(code: i32, message: impl Into<String>) -> Self {
        LookupError::Engine {
            code,
            message: message.into(),
        }
    }

    /// Check whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }

    /// Check whether the resource is gone, either as a missing entry or as a
    /// cursor that can no longer be opened
    pub fn is_resource_gone(&self) -> bool {
        matches!(
            self,
            LookupError::NotFound { .. } | LookupError::CursorUnavailable { .. }
        )
    }
}
