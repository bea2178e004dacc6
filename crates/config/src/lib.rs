//! Configuration-string grammar for Enginelens
//!
//! The storage engine describes every resource with a compact configuration
//! string such as:
//!
//! ```text
//! access_pattern_hint=none,key_format=u,app_metadata=(formatVersion=2,unique)
//! ```
//!
//! This crate provides:
//! - Parser: `parse_config` / `parse_config_with` turn that string into a typed tree
//! - Items: `ConfigItem` (bool, number, string, struct) and `ConfigStruct`
//! - Accessor: `find` / `ConfigStruct::get`, first-match lookup by key
//! - Rendering: `Display` writes a tree back in the same grammar
//! - Limits: `ParseLimits` bounds input size and nesting depth

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod item;
pub mod parser;
mod render;

pub use error::{MalformedReason, ParseError};
pub use item::{find, ConfigEntry, ConfigItem, ConfigStruct};
pub use parser::{parse_config, parse_config_with, ParseLimits, DEFAULT_MAX_DEPTH};
