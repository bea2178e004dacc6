//! Statistics export for Enginelens
//!
//! This crate turns the engine's flat statistics cursors into structured
//! documents:
//! - Grouping: `group_statistics` nests `"group: field"` labels by group
//! - Coercion: `cast_statistic` converts counters without wrapping
//! - Lookups: `statistic_value`, `ident_size` for single statistics
//! - Export: `export_table` opens a cursor and groups it in one call

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod error;
pub mod export;
pub mod group;
pub mod lookup;

pub use coerce::cast_statistic;
pub use error::StatError;
pub use export::{export_table, URI_FIELD};
pub use group::{group_entries, group_statistics, split_label, LabelSplit, StatisticsGrouper};
pub use lookup::{
    ident_size, statistic_value, statistic_value_as, statistics_uri, FAST_STATISTICS,
    STATISTICS_URI_PREFIX,
};
