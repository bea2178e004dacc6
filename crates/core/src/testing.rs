//! In-memory engine for tests
//!
//! `InMemoryEngine` implements both [`MetadataStore`] and [`StatisticsSource`]
//! over plain maps, with fault injection for the failure paths callers must
//! handle:
//!
//! - metadata lookups that fail with a chosen error
//! - statistics cursors that cannot be opened
//! - statistics cursors that fail after yielding N entries
//!
//! # Example
//!
//! ```
//! use enginelens_core::testing::InMemoryEngine;
//! use enginelens_core::{MetadataStore, StatCursor, StatisticsSource};
//!
//! let engine = InMemoryEngine::new()
//!     .with_metadata("table:a", "app_metadata=(formatVersion=1)")
//!     .with_statistics("statistics:table:a", [("cache: pages evicted", 7)]);
//!
//! assert!(engine.fetch_raw_metadata("table:a").is_ok());
//! let mut cursor = engine.open_statistics_stream("statistics:table:a", "").unwrap();
//! assert_eq!(cursor.next_entry().unwrap().unwrap().value, 7);
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{LookupError, LookupResult};
use crate::source::{MetadataStore, StatCursor, StatEntry, StatKey, StatisticsSource};

/// Return code used for injected cursor failures
pub const INJECTED_FAILURE_CODE: i32 = -31802;

#[derive(Debug, Clone, Default)]
struct StatTable {
    entries: Vec<(StatKey, StatEntry)>,
    fail_after: Option<usize>,
}

/// Map-backed engine implementing the collaborator traits
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    metadata: HashMap<String, String>,
    metadata_errors: HashMap<String, LookupError>,
    statistics: HashMap<String, StatTable>,
}

impl InMemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metadata string for `uri`
    pub fn with_metadata(mut self, uri: impl Into<String>, config: impl Into<String>) -> Self {
        self.metadata.insert(uri.into(), config.into());
        self
    }

    /// Make metadata lookups for `uri` fail with `err`
    pub fn with_metadata_error(mut self, uri: impl Into<String>, err: LookupError) -> Self {
        self.metadata_errors.insert(uri.into(), err);
        self
    }

    /// Register a statistics cursor for `uri`
    ///
    /// Entries get the lowest keys (0, 1, 2, ...) not already registered
    /// for the same uri.
    pub fn with_statistics<L, I>(mut self, uri: impl Into<String>, entries: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, u64)>,
    {
        let table = self.statistics.entry(uri.into()).or_default();
        let used: HashSet<StatKey> = table.entries.iter().map(|(k, _)| *k).collect();
        let mut next = 0;
        for (label, value) in entries {
            while used.contains(&StatKey(next)) {
                next += 1;
            }
            table.entries.push((StatKey(next), StatEntry::new(label, value)));
            next += 1;
        }
        self
    }

    /// Register a single statistic under an explicit key
    ///
    /// A key that is already registered for `uri` is replaced in place.
    pub fn with_statistic(
        mut self,
        uri: impl Into<String>,
        key: impl Into<StatKey>,
        label: impl Into<String>,
        value: u64,
    ) -> Self {
        let key = key.into();
        let entry = StatEntry::new(label, value);
        let table = self.statistics.entry(uri.into()).or_default();
        match table.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => table.entries.push((key, entry)),
        }
        self
    }

    /// Make cursors on `uri` fail after yielding `count` entries
    pub fn fail_stream_after(mut self, uri: impl Into<String>, count: usize) -> Self {
        self.statistics.entry(uri.into()).or_default().fail_after = Some(count);
        self
    }
}

impl MetadataStore for InMemoryEngine {
    fn fetch_raw_metadata(&self, uri: &str) -> LookupResult<String> {
        if let Some(err) = self.metadata_errors.get(uri) {
            return Err(err.clone());
        }
        self.metadata
            .get(uri)
            .cloned()
            .ok_or_else(|| LookupError::not_found(uri))
    }
}

impl StatisticsSource for InMemoryEngine {
    fn open_statistics_stream<'a>(
        &'a self,
        uri: &str,
        _options: &str,
    ) -> LookupResult<Box<dyn StatCursor + 'a>> {
        match self.statistics.get(uri) {
            Some(table) => Ok(Box::new(MemoryCursor { table, pos: 0 })),
            None => Err(LookupError::cursor_unavailable(uri, "No such file or directory")),
        }
    }
}

struct MemoryCursor<'a> {
    table: &'a StatTable,
    pos: usize,
}

impl MemoryCursor<'_> {
    fn check_injected_failure(&self) -> LookupResult<()> {
        match self.table.fail_after {
            Some(limit) if self.pos >= limit => Err(LookupError::engine(
                INJECTED_FAILURE_CODE,
                "injected cursor failure",
            )),
            _ => Ok(()),
        }
    }
}

impl StatCursor for MemoryCursor<'_> {
    fn next_entry(&mut self) -> LookupResult<Option<StatEntry>> {
        self.check_injected_failure()?;
        let entry = self.table.entries.get(self.pos).map(|(_, e)| e.clone());
        if entry.is_some() {
            self.pos += 1;
        }
        Ok(entry)
    }

    fn search(&mut self, key: StatKey) -> LookupResult<Option<StatEntry>> {
        self.check_injected_failure()?;
        Ok(self
            .table
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, e)| e.clone()))
    }
}
