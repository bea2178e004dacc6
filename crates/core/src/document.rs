//! Ordered structured documents
//!
//! This module defines:
//! - Document: insertion-ordered mapping from string keys to values
//! - DocValue: the four value kinds a document field can hold
//!
//! ## Ordering
//!
//! Fields keep the position of their first insertion. Replacing an existing
//! key updates the value in place, so a document never holds the same key
//! twice and serializes in a stable order.
//!
//! Equality is order-sensitive: two documents with the same fields in a
//! different order are not equal.
//!
//! Keys are indexed, so `insert` and `get` do not scan the field list.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value stored in a [`Document`] field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocValue {
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    String(String),
    /// Nested document
    Document(Document),
}

impl DocValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            DocValue::Bool(_) => "bool",
            DocValue::Int(_) => "int",
            DocValue::String(_) => "string",
            DocValue::Document(_) => "document",
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DocValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &Document if this is a Document value
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            DocValue::Document(d) => Some(d),
            _ => None,
        }
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Bool(b)
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        DocValue::Int(i)
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<Document> for DocValue {
    fn from(d: Document) -> Self {
        DocValue::Document(d)
    }
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocValue::Bool(b) => serializer.serialize_bool(*b),
            DocValue::Int(i) => serializer.serialize_i64(*i),
            DocValue::String(s) => serializer.serialize_str(s),
            DocValue::Document(d) => d.serialize(serializer),
        }
    }
}

/// An insertion-ordered document
///
/// Built incrementally by the metadata extractor and the statistics
/// grouper, then handed to the caller as a finished value.
///
/// # Examples
///
/// ```
/// use enginelens_core::{DocValue, Document};
///
/// let mut doc = Document::new();
/// doc.insert("formatVersion", 2i64);
/// doc.insert("unique", true);
/// assert_eq!(doc.get("formatVersion"), Some(&DocValue::Int(2)));
/// assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["formatVersion", "unique"]);
/// ```
#[derive(Clone, Default)]
pub struct Document {
    fields: Vec<(String, DocValue)>,
    // key -> position in `fields`
    index: HashMap<String, usize>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Document {
            fields: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a field
    ///
    /// A new key is appended at the end. An existing key keeps its position
    /// and its previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Option<DocValue> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.fields[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.fields.len());
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.index.get(key).map(|&pos| &self.fields[pos].1)
    }

    /// Get a mutable reference to a field by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocValue> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.fields[pos].1),
            None => None,
        }
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Consume the document and return its fields in insertion order
    pub fn into_fields(self) -> Vec<(String, DocValue)> {
        self.fields
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>, V: Into<DocValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
