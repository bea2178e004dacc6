//! Engine collaborator traits
//!
//! This module defines the two surfaces the rest of the system consumes
//! from the storage engine:
//! - MetadataStore: raw configuration strings keyed by resource identifier
//! - StatisticsSource: cursors over (label, value) statistics
//!
//! Implementations own session and cursor lifecycles. A cursor handed out by
//! [`StatisticsSource::open_statistics_stream`] is released when dropped.

use std::fmt;

use crate::error::LookupResult;

/// Numeric key identifying one statistic inside a statistics cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatKey(pub i32);

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for StatKey {
    fn from(k: i32) -> Self {
        StatKey(k)
    }
}

/// One statistic read from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    /// Human-readable description, e.g. `"cache: pages evicted"`
    pub label: String,
    /// Raw counter value
    pub value: u64,
}

impl StatEntry {
    /// Create a new entry
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        StatEntry {
            label: label.into(),
            value,
        }
    }
}

/// Source of raw metadata strings
///
/// Thread safety: implementations are shared across callers (requires Send + Sync).
pub trait MetadataStore: Send + Sync {
    /// Fetch the engine's configuration string for a resource
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` when the resource has no metadata entry,
    /// and another variant for any other engine failure.
    fn fetch_raw_metadata(&self, uri: &str) -> LookupResult<String>;
}

/// Source of statistics cursors
pub trait StatisticsSource: Send + Sync {
    /// Open a statistics cursor on `uri` with engine cursor options
    ///
    /// # Errors
    ///
    /// Returns `LookupError::CursorUnavailable` when the cursor cannot be opened.
    fn open_statistics_stream<'a>(
        &'a self,
        uri: &str,
        options: &str,
    ) -> LookupResult<Box<dyn StatCursor + 'a>>;
}

/// An open statistics cursor
pub trait StatCursor {
    /// Advance to the next statistic
    ///
    /// Returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails mid-iteration.
    fn next_entry(&mut self) -> LookupResult<Option<StatEntry>>;

    /// Position on a single statistic by key
    ///
    /// Returns `Ok(None)` if the cursor has no such key.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails while searching.
    fn search(&mut self, key: StatKey) -> LookupResult<Option<StatEntry>>;
}
