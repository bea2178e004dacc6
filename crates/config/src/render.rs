//! Rendering items back into the configuration grammar
//!
//! `Display` for [`ConfigItem`] and [`ConfigStruct`] produces text that parses
//! back to an equal tree:
//!
//! - bools as `true` / `false`, numbers in decimal
//! - strings bare when the bare word would parse back as the same string,
//!   otherwise quoted with `"` and `\` escaped
//! - a [`ConfigStruct`] as its comma-separated body, a struct item as `(body)`

use std::fmt;

use crate::item::{ConfigItem, ConfigStruct};
use crate::parser::{is_numeric_literal, is_word_byte};

/// Check whether `s` can be written without quotes
fn renders_bare(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(is_word_byte)
        && s != "true"
        && s != "false"
        && !is_numeric_literal(s)
}

fn write_text(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if renders_bare(s) {
        return f.write_str(s);
    }
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Keys are always read as words, so only the character set decides quoting
fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if !key.is_empty() && key.bytes().all(is_word_byte) {
        f.write_str(key)
    } else {
        write_text(f, key)
    }
}

impl fmt::Display for ConfigItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigItem::Bool(b) => write!(f, "{}", b),
            ConfigItem::Num(n) => write!(f, "{}", n),
            ConfigItem::Str(s) => write_text(f, s),
            ConfigItem::Struct(s) => write!(f, "({})", s),
        }
    }
}

impl fmt::Display for ConfigStruct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, item)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_key(f, key)?;
            f.write_str("=")?;
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config;

    #[test]
    fn test_render_scalars() {
        assert_eq!(ConfigItem::Bool(false).to_string(), "false");
        assert_eq!(ConfigItem::Num(-3).to_string(), "-3");
        assert_eq!(ConfigItem::Str("snappy".into()).to_string(), "snappy");
    }

    #[test]
    fn test_render_quotes_when_needed() {
        assert_eq!(ConfigItem::Str("a b".into()).to_string(), r#""a b""#);
        assert_eq!(ConfigItem::Str("".into()).to_string(), r#""""#);
        assert_eq!(ConfigItem::Str("true".into()).to_string(), r#""true""#);
        assert_eq!(ConfigItem::Str("42".into()).to_string(), r#""42""#);
        assert_eq!(ConfigItem::Str("a,b".into()).to_string(), r#""a,b""#);
        assert_eq!(
            ConfigItem::Str(r#"q"\"#.into()).to_string(),
            r#""q\"\\""#
        );
    }

    #[test]
    fn test_render_struct() {
        let parsed = parse_config(r#"key_format=u, app_metadata=( formatVersion=2, unique )"#).unwrap();
        assert_eq!(
            parsed.to_string(),
            "key_format=u,app_metadata=(formatVersion=2,unique=true)"
        );
    }

    #[test]
    fn test_render_keys() {
        let parsed = parse_config(r#""a b"=1,true=2,"="=3"#).unwrap();
        assert_eq!(parsed.to_string(), r#""a b"=1,true=2,"="=3"#);
        assert_eq!(parse_config(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn test_render_reparses_to_same_tree() {
        let text = r#"a=1,b="x \"y\"",c=(d=false,e=(f=-9)),g=10MB,h="""#;
        let parsed = parse_config(text).unwrap();
        let rendered = parsed.to_string();
        assert_eq!(parse_config(&rendered).unwrap(), parsed);
    }
}
