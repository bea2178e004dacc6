//! Grouping of flat statistics into nested documents
//!
//! The engine describes each statistic with a free-text label such as
//! `"cache: pages evicted"` or `"block-manager: file size in bytes"`.
//! Labels sharing a prefix are grouped under one nested document:
//!
//! ```text
//! cache: bytes currently in the cache = 100      {
//! cache: pages evicted                =   7  =>    "cache": { "bytes currently in the cache": 100, "pages evicted": 7 },
//! block-manager: file size            = 4096       "block-manager": { "file size": 4096 }
//!                                                }
//! ```
//!
//! ## Label splitting
//!
//! - split at the first `:` if there is one, otherwise at the first space
//! - the text before the split is the group, the text after it (with
//!   leading whitespace removed) is the field
//! - a label with neither delimiter, or whose delimiter is its first
//!   character, is a top-level field named by the whole label
//!
//! ## Ordering
//!
//! Top-level fields appear in the order they were read. Groups follow, in
//! the order their first statistic was read; fields inside a group keep
//! read order. A repeated label overwrites the earlier value in place.

use std::collections::HashMap;

use enginelens_core::{Document, StatCursor};

use crate::coerce::cast_statistic;
use crate::error::StatError;

/// How a statistics label is placed in the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSplit<'a> {
    /// Field `field` of the nested document `group`
    Grouped {
        /// Group key
        group: &'a str,
        /// Field key inside the group
        field: &'a str,
    },
    /// Top-level field named by the whole label
    TopLevel(&'a str),
}

/// Split a label into group and field
///
/// # Examples
///
/// ```
/// use enginelens_stats::{split_label, LabelSplit};
///
/// assert_eq!(
///     split_label("cache: pages evicted"),
///     LabelSplit::Grouped { group: "cache", field: "pages evicted" }
/// );
/// assert_eq!(
///     split_label("uptime seconds"),
///     LabelSplit::Grouped { group: "uptime", field: "seconds" }
/// );
/// assert_eq!(split_label("uptime"), LabelSplit::TopLevel("uptime"));
/// ```
pub fn split_label(label: &str) -> LabelSplit<'_> {
    match label.find(':').or_else(|| label.find(' ')) {
        Some(idx) if idx > 0 => LabelSplit::Grouped {
            group: &label[..idx],
            field: label[idx + 1..].trim_start(),
        },
        _ => LabelSplit::TopLevel(label),
    }
}

/// Incremental builder for a grouped statistics document
///
/// Feed it `(label, value)` pairs with [`push`](Self::push) or a whole cursor
/// with [`drain`](Self::drain), then call [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct StatisticsGrouper {
    top: Document,
    groups: Vec<(String, Document)>,
    group_index: HashMap<String, usize>,
    consumed: usize,
}

impl StatisticsGrouper {
    /// Create an empty grouper
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grouper whose output starts with the fields of `prefix`
    pub fn with_document(prefix: Document) -> Self {
        StatisticsGrouper {
            top: prefix,
            ..Self::default()
        }
    }

    /// Number of statistics accepted so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Add one statistic
    ///
    /// # Errors
    ///
    /// Returns `StatisticOverflow` if `value` exceeds `i64::MAX`.
    pub fn push(&mut self, label: &str, value: u64) -> Result<(), StatError> {
        let value: i64 = cast_statistic(label, value)?;
        match split_label(label) {
            LabelSplit::TopLevel(name) => {
                self.top.insert(name, value);
            }
            LabelSplit::Grouped { group, field } => {
                let idx = match self.group_index.get(group) {
                    Some(&idx) => idx,
                    None => {
                        self.groups.push((group.to_string(), Document::new()));
                        self.group_index.insert(group.to_string(), self.groups.len() - 1);
                        self.groups.len() - 1
                    }
                };
                self.groups[idx].1.insert(field, value);
            }
        }
        self.consumed += 1;
        Ok(())
    }

    /// Add every statistic from `cursor` until it is exhausted
    ///
    /// # Errors
    ///
    /// Returns `StreamInterrupted` if the cursor fails part way, or
    /// `StatisticOverflow` for an out-of-range value.
    pub fn drain<C: StatCursor + ?Sized>(&mut self, cursor: &mut C) -> Result<(), StatError> {
        loop {
            match cursor.next_entry() {
                Ok(Some(entry)) => self.push(&entry.label, entry.value)?,
                Ok(None) => return Ok(()),
                Err(source) => {
                    tracing::warn!(
                        consumed = self.consumed,
                        error = %source,
                        "statistics cursor failed mid-iteration"
                    );
                    return Err(StatError::StreamInterrupted {
                        consumed: self.consumed,
                        source,
                    });
                }
            }
        }
    }

    /// Build the document: top-level fields, then groups in first-seen order
    pub fn finish(self) -> Document {
        tracing::debug!(
            statistics = self.consumed,
            groups = self.groups.len(),
            "grouped statistics"
        );
        let mut doc = self.top;
        for (group, fields) in self.groups {
            doc.insert(group, fields);
        }
        doc
    }
}

/// Read `cursor` to the end and group its statistics
///
/// # Errors
///
/// Returns `StreamInterrupted` if the cursor fails part way and
/// `StatisticOverflow` for a value above `i64::MAX`. No partial document is
/// returned in either case.
pub fn group_statistics<C: StatCursor + ?Sized>(cursor: &mut C) -> Result<Document, StatError> {
    let mut grouper = StatisticsGrouper::new();
    grouper.drain(cursor)?;
    Ok(grouper.finish())
}

/// Group an in-memory sequence of `(label, value)` pairs
///
/// # Errors
///
/// Returns `StatisticOverflow` for a value above `i64::MAX`.
pub fn group_entries<I, L>(entries: I) -> Result<Document, StatError>
where
    I: IntoIterator<Item = (L, u64)>,
    L: AsRef<str>,
{
    let mut grouper = StatisticsGrouper::new();
    for (label, value) in entries {
        grouper.push(label.as_ref(), value)?;
    }
    Ok(grouper.finish())
}
