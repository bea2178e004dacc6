//! Checked conversion of raw statistic values
//!
//! Engine counters are unsigned 64-bit. Documents store signed 64-bit
//! integers, so a counter above `i64::MAX` is reported instead of wrapping
//! to a negative number.

use crate::error::StatError;

/// Convert a raw counter to `T`, failing with `StatisticOverflow` if it does not fit
///
/// # Examples
///
/// ```
/// use enginelens_stats::{cast_statistic, StatError};
///
/// assert_eq!(cast_statistic::<i64>("cache: pages evicted", 7), Ok(7));
/// assert!(matches!(
///     cast_statistic::<i64>("cache: pages evicted", u64::MAX),
///     Err(StatError::StatisticOverflow { .. })
/// ));
/// ```
pub fn cast_statistic<T: TryFrom<u64>>(label: &str, value: u64) -> Result<T, StatError> {
    T::try_from(value).map_err(|_| {
        tracing::warn!(label, value, "statistic value out of range");
        StatError::StatisticOverflow {
            label: label.to_string(),
            value,
        }
    })
}
