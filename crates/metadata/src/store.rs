//! Metadata lookups through the engine's metadata store
//!
//! These functions fetch the raw configuration string for a resource and
//! hand it to extraction or validation. Lookup failures pass through
//! unchanged, so `NotFound` stays distinguishable from malformed data.
//!
//! The plain forms parse with [`ParseLimits::DEFAULT`]; the `_with` forms
//! take explicit limits for engine-supplied text of unknown size.

use enginelens_config::{parse_config_with, ParseLimits};
use enginelens_core::{Document, MetadataStore};

use crate::error::{MetadataError, VersionError};
use crate::extract::app_metadata_from;
use crate::version::{check_parsed_format_version, VersionRange};

/// Fetch and extract the `app_metadata` of `uri`
///
/// # Errors
///
/// Returns `Lookup` if the store fails, otherwise the errors of
/// [`extract_app_metadata`](crate::extract_app_metadata).
pub fn read_app_metadata<S>(store: &S, uri: &str) -> Result<Document, MetadataError>
where
    S: MetadataStore + ?Sized,
{
    read_app_metadata_with(store, uri, &ParseLimits::DEFAULT)
}

/// Fetch and extract the `app_metadata` of `uri`, parsing within `limits`
///
/// # Errors
///
/// Same as [`read_app_metadata`], plus `Parse` when `limits` are exceeded.
pub fn read_app_metadata_with<S>(
    store: &S,
    uri: &str,
    limits: &ParseLimits,
) -> Result<Document, MetadataError>
where
    S: MetadataStore + ?Sized,
{
    let raw = store.fetch_raw_metadata(uri)?;
    parse_config_with(&raw, limits)
        .map_err(MetadataError::from)
        .and_then(|parsed| app_metadata_from(&parsed))
        .map_err(|e| {
            tracing::warn!(uri, error = %e, "failed to extract app_metadata");
            e
        })
}

/// Fetch the metadata of `uri` and check its format version against `range`
///
/// Returns the accepted version.
///
/// # Errors
///
/// Returns `Lookup` if the store fails, otherwise the errors of
/// [`check_format_version_in`](crate::check_format_version_in).
pub fn check_format_version_for<S>(
    store: &S,
    uri: &str,
    range: VersionRange,
) -> Result<i64, VersionError>
where
    S: MetadataStore + ?Sized,
{
    check_format_version_for_with(store, uri, range, &ParseLimits::DEFAULT)
}

/// Like [`check_format_version_for`], parsing within `limits`
///
/// # Errors
///
/// Same as [`check_format_version_for`], plus `Parse` when `limits` are
/// exceeded.
pub fn check_format_version_for_with<S>(
    store: &S,
    uri: &str,
    range: VersionRange,
    limits: &ParseLimits,
) -> Result<i64, VersionError>
where
    S: MetadataStore + ?Sized,
{
    let raw = store.fetch_raw_metadata(uri)?;
    let parsed = parse_config_with(&raw, limits)?;
    let version = check_parsed_format_version(&parsed, range)?;
    tracing::debug!(uri, version, "format version checked");
    Ok(version)
}
