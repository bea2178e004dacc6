//! Application-metadata extraction
//!
//! Callers store their own settings under the reserved `app_metadata` key of
//! a resource's configuration string:
//!
//! ```text
//! key_format=u,app_metadata=(formatVersion=2,indexName="idx1",unique)
//! ```
//!
//! Extraction turns the direct children of that struct into a [`Document`].
//! Only one level is flattened: a nested struct below `app_metadata` is kept
//! as the text it was written as.

use std::collections::HashSet;

use enginelens_config::{parse_config, ConfigItem, ConfigStruct};
use enginelens_core::{DocValue, Document};

use crate::error::MetadataError;

/// Reserved top-level key holding caller-defined metadata
pub const APP_METADATA_KEY: &str = "app_metadata";

/// Parse `text` and extract its `app_metadata` struct
///
/// # Errors
///
/// Returns `Parse` for malformed input, `InvalidMetadataShape` when
/// `app_metadata` is not a struct, and `DuplicateMetadataKey` when a key
/// repeats inside it.
///
/// # Examples
///
/// ```
/// use enginelens_core::DocValue;
/// use enginelens_metadata::extract_app_metadata;
///
/// let doc = extract_app_metadata("app_metadata=(formatVersion=2,indexName=\"idx1\")").unwrap();
/// assert_eq!(doc.get("formatVersion"), Some(&DocValue::Int(2)));
/// assert_eq!(doc.get("indexName"), Some(&DocValue::String("idx1".into())));
/// ```
pub fn extract_app_metadata(text: &str) -> Result<Document, MetadataError> {
    let parsed = parse_config(text)?;
    app_metadata_from(&parsed)
}

/// Extract `app_metadata` from an already parsed configuration
///
/// A missing `app_metadata` entry or an empty struct yields an empty document.
///
/// # Errors
///
/// Same as [`extract_app_metadata`], minus parsing.
pub fn app_metadata_from(parsed: &ConfigStruct<'_>) -> Result<Document, MetadataError> {
    let app = match parsed.get(APP_METADATA_KEY) {
        None => return Ok(Document::new()),
        Some(ConfigItem::Struct(app)) => app,
        Some(other) => {
            tracing::warn!(found = other.kind_name(), "app_metadata is not a struct");
            return Err(MetadataError::InvalidMetadataShape {
                found_kind: other.kind_name(),
                rendered: other.to_string(),
            });
        }
    };

    let mut doc = Document::with_capacity(app.len());
    let mut seen = HashSet::with_capacity(app.len());
    for (key, item) in app.iter() {
        if !seen.insert(key) {
            tracing::warn!(key, "duplicate key in app_metadata");
            return Err(MetadataError::DuplicateMetadataKey {
                key: key.to_string(),
            });
        }
        doc.insert(key, to_doc_value(item));
    }
    Ok(doc)
}

fn to_doc_value(item: &ConfigItem<'_>) -> DocValue {
    match item {
        ConfigItem::Bool(b) => DocValue::Bool(*b),
        ConfigItem::Num(n) => DocValue::Int(*n),
        ConfigItem::Str(s) => DocValue::String(s.to_string()),
        ConfigItem::Struct(s) => DocValue::String(s.source().to_string()),
    }
}
