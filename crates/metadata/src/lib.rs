//! Application metadata for Enginelens
//!
//! This crate reads the caller-owned `app_metadata` section of a resource's
//! configuration string:
//! - Extraction: `extract_app_metadata` flattens it into a `Document`,
//!   rejecting duplicate keys
//! - Validation: `check_format_version` checks `formatVersion` against an
//!   inclusive range, defaulting to version 1 when absent
//! - Store lookups: the same operations starting from a resource identifier

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod extract;
pub mod store;
pub mod version;

pub use error::{MetadataError, VersionError};
pub use extract::{app_metadata_from, extract_app_metadata, APP_METADATA_KEY};
pub use store::{
    check_format_version_for, check_format_version_for_with, read_app_metadata,
    read_app_metadata_with,
};
pub use version::{
    check_format_version, check_format_version_in, check_parsed_format_version,
    format_version_from, resolve_format_version, VersionRange, FORMAT_VERSION_KEY,
    LEGACY_FORMAT_VERSION,
};
