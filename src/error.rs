//! Unified error type for the facade

use enginelens_config::ParseError;
use enginelens_core::LookupError;
use enginelens_metadata::{MetadataError, VersionError};
use enginelens_stats::StatError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for facade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error returned by the [`Inspector`](crate::Inspector)
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid inspector configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Metadata string could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Application metadata could not be extracted
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Format version check failed
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Statistics could not be read or grouped
    #[error(transparent)]
    Stats(#[from] StatError),
}

impl Error {
    /// Check whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Lookup(e) => e.is_not_found(),
            Error::Metadata(e) => e.is_not_found(),
            Error::Version(e) => e.is_not_found(),
            Error::Stats(e) => e.is_not_found(),
            Error::Config(_) | Error::Parse(_) => false,
        }
    }
}
