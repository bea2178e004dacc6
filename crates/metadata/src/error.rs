//! Error types for metadata extraction and version checks

use enginelens_config::ParseError;
use enginelens_core::LookupError;
use thiserror::Error;

/// Error returned by application-metadata extraction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// The metadata string could not be parsed
    #[error("failed to parse metadata: {0}")]
    Parse(#[from] ParseError),

    /// `app_metadata` is present but is not a struct
    #[error("app_metadata must be a nested struct, found {found_kind}. Actual value: {rendered}")]
    InvalidMetadataShape {
        /// Kind of the item found instead
        found_kind: &'static str,
        /// The item rendered in configuration syntax
        rendered: String,
    },

    /// A key appears more than once directly inside `app_metadata`
    #[error("app_metadata must not contain duplicate keys. Found multiple instances of key '{key}'.")]
    DuplicateMetadataKey {
        /// The repeated key
        key: String,
    },

    /// The engine lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl MetadataError {
    /// Check whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetadataError::Lookup(e) if e.is_not_found())
    }
}

/// Error returned by format-version validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The metadata string could not be parsed
    #[error("failed to parse metadata: {0}")]
    Parse(#[from] ParseError),

    /// No `app_metadata` entry at all
    #[error("application metadata is missing")]
    MissingMetadata,

    /// `app_metadata` is present but is not a struct
    #[error("app_metadata must be a nested struct, found {found_kind}. Actual value: {rendered}")]
    InvalidMetadataShape {
        /// Kind of the item found instead
        found_kind: &'static str,
        /// The item rendered in configuration syntax
        rendered: String,
    },

    /// `formatVersion` is present but is not a number
    #[error("'formatVersion' in application metadata must be a number. Current value: {rendered}")]
    InvalidVersionType {
        /// The item rendered in configuration syntax
        rendered: String,
    },

    /// The version lies outside the accepted range
    #[error("application metadata has unsupported format version {actual} (supported: {min} to {max})")]
    UnsupportedVersion {
        /// Version found in the metadata
        actual: i64,
        /// Lowest accepted version
        min: i64,
        /// Highest accepted version
        max: i64,
    },

    /// The engine lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl VersionError {
    /// Check whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, VersionError::Lookup(e) if e.is_not_found())
    }
}
