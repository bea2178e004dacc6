//! Error types for statistics export

use enginelens_core::{LookupError, StatKey};
use thiserror::Error;

/// Error returned while reading or grouping statistics
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatError {
    /// A counter does not fit the target integer type
    #[error("statistic '{label}' has value {value}, which is out of range for its target type")]
    StatisticOverflow {
        /// Label of the statistic
        label: String,
        /// Raw counter value
        value: u64,
    },

    /// The cursor has no statistic with the requested key
    #[error("unable to find key {key} at URI {uri}")]
    StatisticNotFound {
        /// Cursor uri
        uri: String,
        /// Requested key
        key: StatKey,
    },

    /// The cursor failed part way through; nothing read so far is returned
    #[error("statistics cursor failed after {consumed} entries: {source}")]
    StreamInterrupted {
        /// Entries successfully consumed before the failure
        consumed: usize,
        /// Engine failure
        source: LookupError,
    },

    /// The cursor could not be opened or searched
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl StatError {
    /// Check whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StatError::Lookup(e) if e.is_not_found())
    }
}
