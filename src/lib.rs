//! Enginelens - structured views over a storage engine's metadata and statistics
//!
//! The storage engine describes each resource with a compact configuration
//! string and exposes its counters through flat statistics cursors. This
//! crate turns both into structured documents.
//!
//! # Quick Start
//!
//! ```
//! use enginelens::Inspector;
//! use enginelens_core::testing::InMemoryEngine;
//!
//! let engine = InMemoryEngine::new()
//!     .with_metadata("table:orders", "key_format=u,app_metadata=(formatVersion=1,unique)");
//! let inspector = Inspector::new(engine);
//!
//! let app = inspector.app_metadata("table:orders").unwrap();
//! assert_eq!(app.get("unique").and_then(|v| v.as_bool()), Some(true));
//! ```
//!
//! # Architecture
//!
//! - `enginelens-config`: the configuration-string grammar
//! - `enginelens-metadata`: `app_metadata` extraction and format versions
//! - `enginelens-stats`: statistics grouping and lookups
//! - `enginelens-core`: shared document type and the engine traits
//!
//! The [`Inspector`] ties them to one engine and an [`InspectorConfig`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
mod inspector;

pub use config::{ConfigError, InspectorConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use inspector::Inspector;

pub use enginelens_config::{
    find, parse_config, parse_config_with, ConfigEntry, ConfigItem, ConfigStruct, MalformedReason,
    ParseError, ParseLimits,
};
pub use enginelens_core::{
    DocValue, Document, LookupError, MetadataStore, StatCursor, StatEntry, StatKey,
    StatisticsSource,
};
pub use enginelens_metadata::{
    check_format_version, extract_app_metadata, read_app_metadata, resolve_format_version,
    MetadataError, VersionError, VersionRange,
};
pub use enginelens_stats::{
    cast_statistic, export_table, group_statistics, split_label, statistic_value, LabelSplit,
    StatError,
};
