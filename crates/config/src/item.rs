//! Typed configuration items
//!
//! A parsed configuration string is a [`ConfigStruct`]: an ordered list of
//! `(key, ConfigItem)` entries. Values are one of four kinds:
//!
//! | Kind | Written as | Example |
//! |------|------------|---------|
//! | `Bool` | bare key, `true`, `false` | `unique`, `sparse=false` |
//! | `Num` | optional sign and digits | `formatVersion=2`, `leaf_page_max=-1` |
//! | `Str` | bare word or quoted string | `block_compressor=snappy`, `name="a b"` |
//! | `Struct` | parenthesized list | `app_metadata=(formatVersion=1)` |
//!
//! Keys within a struct are not required to be unique; callers that need
//! uniqueness check it themselves. Lookups by key return the first match.
//!
//! Strings and keys borrow from the input when no escape had to be decoded.

use std::borrow::Cow;

/// One `(key, value)` entry of a struct
pub type ConfigEntry<'a> = (Cow<'a, str>, ConfigItem<'a>);

/// A typed value from a configuration string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigItem<'a> {
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Num(i64),
    /// String value, bare or quoted
    Str(Cow<'a, str>),
    /// Nested struct
    Struct(ConfigStruct<'a>),
}

impl<'a> ConfigItem<'a> {
    /// Name of the item's kind: `"bool"`, `"number"`, `"string"` or `"struct"`
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigItem::Bool(_) => "bool",
            ConfigItem::Num(_) => "number",
            ConfigItem::Str(_) => "string",
            ConfigItem::Struct(_) => "struct",
        }
    }

    /// Get as bool if this is a Bool item
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigItem::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is a Num item
    pub fn as_num(&self) -> Option<i64> {
        match self {
            ConfigItem::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as &str if this is a Str item
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigItem::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &ConfigStruct if this is a Struct item
    pub fn as_struct(&self) -> Option<&ConfigStruct<'a>> {
        match self {
            ConfigItem::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Detach the item from the input it was parsed from
    pub fn into_owned(self) -> ConfigItem<'static> {
        match self {
            ConfigItem::Bool(b) => ConfigItem::Bool(b),
            ConfigItem::Num(n) => ConfigItem::Num(n),
            ConfigItem::Str(s) => ConfigItem::Str(Cow::Owned(s.into_owned())),
            ConfigItem::Struct(s) => ConfigItem::Struct(s.into_owned()),
        }
    }
}

/// Find the first entry named `key`
///
/// Keys are compared exactly (case-sensitive). Entries are scanned in order,
/// so a duplicated key resolves to its first occurrence.
pub fn find<'s, 'a>(entries: &'s [ConfigEntry<'a>], key: &str) -> Option<&'s ConfigItem<'a>> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// An ordered list of configuration entries
///
/// Both the top level of a configuration string and every parenthesized
/// value are structs. A struct remembers the text it was parsed from,
/// available through [`ConfigStruct::source`].
///
/// Equality compares entries only, so the same tree parsed from differently
/// spaced text compares equal.
#[derive(Debug, Clone, Eq)]
pub struct ConfigStruct<'a> {
    entries: Vec<ConfigEntry<'a>>,
    source: Cow<'a, str>,
}

impl<'a> ConfigStruct<'a> {
    pub(crate) fn parsed(entries: Vec<ConfigEntry<'a>>, source: &'a str) -> Self {
        ConfigStruct {
            entries,
            source: Cow::Borrowed(source),
        }
    }

    /// Build a struct from entries
    ///
    /// The source text is the parenthesized rendering of the entries.
    pub fn from_entries(entries: Vec<ConfigEntry<'a>>) -> Self {
        let mut built = ConfigStruct {
            entries,
            source: Cow::Borrowed(""),
        };
        built.source = Cow::Owned(format!("({})", built));
        built
    }

    /// Find the first entry named `key`
    pub fn get(&self, key: &str) -> Option<&ConfigItem<'a>> {
        find(&self.entries, key)
    }

    /// All entries in order
    pub fn entries(&self) -> &[ConfigEntry<'a>] {
        &self.entries
    }

    /// Iterate over `(key, item)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigItem<'a>)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_ref())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the struct has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text this struct was parsed from
    ///
    /// For a nested struct this includes the enclosing parentheses.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Consume the struct and return its entries
    pub fn into_entries(self) -> Vec<ConfigEntry<'a>> {
        self.entries
    }

    /// Detach the struct from the input it was parsed from
    pub fn into_owned(self) -> ConfigStruct<'static> {
        ConfigStruct {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                .collect(),
            source: Cow::Owned(self.source.into_owned()),
        }
    }
}

impl PartialEq for ConfigStruct<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
