//! Core types and traits for Enginelens
//!
//! This crate defines the foundational types shared by every layer:
//! - Document / DocValue: ordered structured documents produced by extraction
//! - LookupError: failures reported by the storage engine
//! - Traits: engine collaborators (MetadataStore, StatisticsSource, StatCursor)
//! - StatEntry / StatKey: statistics read through a cursor
//! - Testing: an in-memory engine implementing the collaborator traits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod source;
pub mod testing;

pub use document::{DocValue, Document};
pub use error::{LookupError, LookupResult};
pub use source::{MetadataStore, StatCursor, StatEntry, StatKey, StatisticsSource};
