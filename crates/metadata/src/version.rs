//! Format-version validation
//!
//! Callers record the layout version of the data they store in
//! `app_metadata.formatVersion` and refuse to open resources written in a
//! version they do not understand.
//!
//! Resolution rules:
//! - no `app_metadata` entry: `MissingMetadata`
//! - `app_metadata` without `formatVersion`: version 1 (written before the
//!   field existed)
//! - numeric `formatVersion`: that number
//! - anything else: `InvalidVersionType`

use enginelens_config::{parse_config, ConfigItem, ConfigStruct};

use crate::error::VersionError;
use crate::extract::APP_METADATA_KEY;

/// Key of the version field inside `app_metadata`
pub const FORMAT_VERSION_KEY: &str = "formatVersion";

/// Version assumed when `app_metadata` has no `formatVersion`
pub const LEGACY_FORMAT_VERSION: i64 = 1;

/// Inclusive range of accepted format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    /// Lowest accepted version
    pub min: i64,
    /// Highest accepted version
    pub max: i64,
}

impl VersionRange {
    /// Create a range accepting `min..=max`
    pub fn new(min: i64, max: i64) -> Self {
        VersionRange { min, max }
    }

    /// Check whether `version` is accepted
    pub fn contains(&self, version: i64) -> bool {
        self.min <= version && version <= self.max
    }
}

/// Check that the format version in `text` lies in `min..=max`
///
/// # Errors
///
/// Returns `MissingMetadata` when there is no `app_metadata`,
/// `InvalidVersionType` for a non-numeric `formatVersion`, and
/// `UnsupportedVersion` when the version is out of range.
///
/// # Examples
///
/// ```
/// use enginelens_metadata::{check_format_version, VersionError};
///
/// let text = "access_pattern_hint=none,app_metadata=(formatVersion=2,indexName=\"idx1\")";
/// assert!(check_format_version(text, 1, 3).is_ok());
/// assert_eq!(
///     check_format_version(text, 3, 5),
///     Err(VersionError::UnsupportedVersion { actual: 2, min: 3, max: 5 })
/// );
/// ```
pub fn check_format_version(text: &str, min: i64, max: i64) -> Result<(), VersionError> {
    check_format_version_in(text, VersionRange::new(min, max)).map(|_| ())
}

/// Check the format version in `text` against `range`, returning it
///
/// # Errors
///
/// Same as [`check_format_version`].
pub fn check_format_version_in(text: &str, range: VersionRange) -> Result<i64, VersionError> {
    let parsed = parse_config(text)?;
    check_parsed_format_version(&parsed, range)
}

/// Check the format version of an already parsed configuration
///
/// # Errors
///
/// Same as [`check_format_version`], minus parsing.
pub fn check_parsed_format_version(
    parsed: &ConfigStruct<'_>,
    range: VersionRange,
) -> Result<i64, VersionError> {
    let version = format_version_from(parsed)?;
    if range.contains(version) {
        tracing::debug!(version, min = range.min, max = range.max, "format version accepted");
        Ok(version)
    } else {
        tracing::warn!(version, min = range.min, max = range.max, "unsupported format version");
        Err(VersionError::UnsupportedVersion {
            actual: version,
            min: range.min,
            max: range.max,
        })
    }
}

/// Resolve the format version recorded in `text`
///
/// # Errors
///
/// Returns `Parse`, `MissingMetadata` or `InvalidVersionType`.
pub fn resolve_format_version(text: &str) -> Result<i64, VersionError> {
    let parsed = parse_config(text)?;
    format_version_from(&parsed)
}

/// Resolve the format version of an already parsed configuration
///
/// # Errors
///
/// Returns `MissingMetadata` or `InvalidVersionType`.
pub fn format_version_from(parsed: &ConfigStruct<'_>) -> Result<i64, VersionError> {
    let app = match parsed.get(APP_METADATA_KEY) {
        None => return Err(VersionError::MissingMetadata),
        Some(ConfigItem::Struct(app)) => app,
        Some(other) => {
            return Err(VersionError::InvalidMetadataShape {
                found_kind: other.kind_name(),
                rendered: other.to_string(),
            })
        }
    };

    match app.get(FORMAT_VERSION_KEY) {
        None => Ok(LEGACY_FORMAT_VERSION),
        Some(ConfigItem::Num(version)) => Ok(*version),
        Some(other) => Err(VersionError::InvalidVersionType {
            rendered: other.to_string(),
        }),
    }
}
