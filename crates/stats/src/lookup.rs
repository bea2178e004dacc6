//! Single-statistic lookups
//!
//! Reads one statistic by key from a statistics cursor, optionally
//! converting it with the same overflow check the grouper uses.

use enginelens_core::{StatEntry, StatKey, StatisticsSource};

use crate::coerce::cast_statistic;
use crate::error::StatError;

/// Prefix turning a resource uri into its statistics cursor uri
pub const STATISTICS_URI_PREFIX: &str = "statistics:";

/// Cursor options requesting only the inexpensive statistics
pub const FAST_STATISTICS: &str = "statistics=(fast)";

/// Statistics cursor uri for a resource
pub fn statistics_uri(uri: &str) -> String {
    format!("{}{}", STATISTICS_URI_PREFIX, uri)
}

/// Open the cursor at `uri` and search it for `key`
fn find_statistic<S>(source: &S, uri: &str, options: &str, key: StatKey) -> Result<StatEntry, StatError>
where
    S: StatisticsSource + ?Sized,
{
    let mut cursor = source.open_statistics_stream(uri, options)?;
    cursor.search(key)?.ok_or_else(|| StatError::StatisticNotFound {
        uri: uri.to_string(),
        key,
    })
}

/// Read the raw value of statistic `key` from the cursor at `uri`
///
/// # Errors
///
/// Returns `Lookup` if the cursor cannot be opened or searched and
/// `StatisticNotFound` if it has no such key.
pub fn statistic_value<S>(source: &S, uri: &str, options: &str, key: StatKey) -> Result<u64, StatError>
where
    S: StatisticsSource + ?Sized,
{
    Ok(find_statistic(source, uri, options, key)?.value)
}

/// Read statistic `key` from the cursor at `uri` as `T`
///
/// # Errors
///
/// Same as [`statistic_value`], plus `StatisticOverflow` if the value does
/// not fit in `T`.
pub fn statistic_value_as<T, S>(
    source: &S,
    uri: &str,
    options: &str,
    key: StatKey,
) -> Result<T, StatError>
where
    T: TryFrom<u64>,
    S: StatisticsSource + ?Sized,
{
    let entry = find_statistic(source, uri, options, key)?;
    cast_statistic(&entry.label, entry.value)
}

/// On-disk size of the resource `ident_uri`
///
/// Reads statistic `block_size_key` from `statistics:<ident_uri>`. A resource
/// that no longer exists has size 0.
///
/// # Errors
///
/// Any failure other than the resource being gone.
pub fn ident_size<S>(
    source: &S,
    ident_uri: &str,
    options: &str,
    block_size_key: StatKey,
) -> Result<i64, StatError>
where
    S: StatisticsSource + ?Sized,
{
    let uri = statistics_uri(ident_uri);
    match statistic_value_as::<i64, S>(source, &uri, options, block_size_key) {
        Err(StatError::Lookup(e)) if e.is_resource_gone() => {
            tracing::info!(uri = %uri, "ident is gone, reporting size 0");
            Ok(0)
        }
        other => other,
    }
}
