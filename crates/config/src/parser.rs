//! Recursive-descent parser for configuration strings
//!
//! ## Grammar
//!
//! ```text
//! body   := [ element { "," element } [ "," ] ]
//! element:= key [ "=" value ]
//! key    := word | quoted
//! value  := number | "true" | "false" | word | quoted | "(" body ")"
//! number := [ "+" | "-" ] digit { digit }
//! quoted := '"' { char | '\"' | '\\' } '"'
//! word   := one or more characters other than whitespace and , = ( ) " [ ] { }
//! ```
//!
//! A bare key with no `=` is `Bool(true)`. A word is a number only when the
//! whole word is a numeric literal; `10MB` is a string. Whitespace between
//! tokens is ignored.
//!
//! The parser makes a single pass with one byte of lookahead. All delimiters
//! are ASCII, so every slice boundary it takes is a UTF-8 character boundary.

use std::borrow::Cow;

use crate::error::{MalformedReason, ParseError};
use crate::item::{ConfigEntry, ConfigItem, ConfigStruct};

/// Nesting depth accepted by [`parse_config`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds applied before and during parsing
///
/// Nesting is always bounded, since each struct level recurses. The default
/// allows [`DEFAULT_MAX_DEPTH`] levels and any input length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum input length in bytes
    pub max_input_len: Option<usize>,
    /// Maximum struct nesting depth (top level is depth 0)
    pub max_depth: usize,
}

impl ParseLimits {
    /// Default bounds: any length, [`DEFAULT_MAX_DEPTH`] levels
    pub const DEFAULT: ParseLimits = ParseLimits {
        max_input_len: None,
        max_depth: DEFAULT_MAX_DEPTH,
    };

    /// Bound both input length and nesting depth
    pub fn new(max_input_len: usize, max_depth: usize) -> Self {
        ParseLimits {
            max_input_len: Some(max_input_len),
            max_depth,
        }
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parse a configuration string into its top-level struct
///
/// # Errors
///
/// Returns `MalformedConfig` with the offending byte offset if the input
/// does not follow the grammar, `NumericOverflow` for an integer literal
/// outside the i64 range, or `NestingTooDeep` for structs nested more than
/// [`DEFAULT_MAX_DEPTH`] levels. Nothing is returned on failure.
///
/// # Examples
///
/// ```
/// use enginelens_config::{parse_config, ConfigItem};
///
/// let parsed = parse_config("access_pattern_hint=none,app_metadata=(formatVersion=2)").unwrap();
/// let app = parsed.get("app_metadata").and_then(ConfigItem::as_struct).unwrap();
/// assert_eq!(app.get("formatVersion"), Some(&ConfigItem::Num(2)));
/// ```
pub fn parse_config(text: &str) -> Result<ConfigStruct<'_>, ParseError> {
    parse_config_with(text, &ParseLimits::DEFAULT)
}

/// Parse a configuration string, enforcing `limits`
///
/// # Errors
///
/// Same as [`parse_config`], plus `InputTooLarge` (checked before scanning)
/// and `NestingTooDeep`.
pub fn parse_config_with<'a>(
    text: &'a str,
    limits: &ParseLimits,
) -> Result<ConfigStruct<'a>, ParseError> {
    if let Some(max) = limits.max_input_len {
        if text.len() > max {
            return Err(ParseError::InputTooLarge {
                len: text.len(),
                max,
            });
        }
    }

    let mut parser = Parser::new(text, limits);
    let entries = parser.parse_body(None)?;
    tracing::trace!(entries = entries.len(), len = text.len(), "parsed configuration");
    Ok(ConfigStruct::parsed(entries, text))
}

/// Check whether `word` is an optionally signed run of ASCII digits
pub(crate) fn is_numeric_literal(word: &str) -> bool {
    let digits = word
        .strip_prefix('-')
        .or_else(|| word.strip_prefix('+'))
        .unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check whether `b` may appear in an unquoted word
pub(crate) fn is_word_byte(b: u8) -> bool {
    !b.is_ascii_whitespace()
        && !matches!(
            b,
            b',' | b'=' | b'(' | b')' | b'"' | b'[' | b']' | b'{' | b'}'
        )
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, limits: &ParseLimits) -> Self {
        Parser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth: limits.max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn malformed(&self, offset: usize, reason: MalformedReason) -> ParseError {
        ParseError::MalformedConfig { offset, reason }
    }

    /// Character at the current position, for error reporting
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Parse entries up to end of input (top level) or up to the `)` closing
    /// the struct opened at `open`. The closing `)` is left unconsumed.
    fn parse_body(&mut self, open: Option<usize>) -> Result<Vec<ConfigEntry<'a>>, ParseError> {
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            match (self.peek(), open) {
                (None, None) => return Ok(entries),
                (None, Some(open)) => {
                    return Err(self.malformed(open, MalformedReason::UnmatchedOpenParen))
                }
                (Some(b')'), Some(_)) => return Ok(entries),
                (Some(b')'), None) => {
                    return Err(self.malformed(self.pos, MalformedReason::UnmatchedCloseParen))
                }
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            let value = if self.peek() == Some(b'=') {
                self.pos += 1;
                self.skip_whitespace();
                self.parse_value()?
            } else {
                ConfigItem::Bool(true)
            };
            entries.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                None | Some(b')') => {}
                Some(_) => return Err(self.malformed(self.pos, MalformedReason::ExpectedSeparator)),
            }
        }
    }

    fn parse_key(&mut self) -> Result<Cow<'a, str>, ParseError> {
        match self.peek() {
            Some(b'"') => self.parse_quoted(),
            Some(b) if is_word_byte(b) => Ok(Cow::Borrowed(self.parse_word())),
            _ => Err(self.malformed(
                self.pos,
                MalformedReason::UnexpectedCharacter(self.current_char()),
            )),
        }
    }

    fn parse_value(&mut self) -> Result<ConfigItem<'a>, ParseError> {
        match self.peek() {
            None | Some(b',') | Some(b')') => {
                Err(self.malformed(self.pos, MalformedReason::MissingValue))
            }
            Some(b'"') => Ok(ConfigItem::Str(self.parse_quoted()?)),
            Some(b'(') => self.parse_struct(),
            Some(b) if is_word_byte(b) => {
                let start = self.pos;
                let word = self.parse_word();
                classify_word(word, start)
            }
            Some(_) => Err(self.malformed(
                self.pos,
                MalformedReason::UnexpectedCharacter(self.current_char()),
            )),
        }
    }

    fn parse_struct(&mut self) -> Result<ConfigItem<'a>, ParseError> {
        let open = self.pos;
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset: open,
                max: self.max_depth,
            });
        }
        self.pos += 1;

        let entries = self.parse_body(Some(open))?;
        // parse_body only returns Ok inside a struct when positioned on ')'
        self.pos += 1;
        self.depth -= 1;

        Ok(ConfigItem::Struct(ConfigStruct::parsed(
            entries,
            &self.input[open..self.pos],
        )))
    }

    fn parse_word(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if is_word_byte(b)) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Parse a quoted string starting at `"`. Borrows from the input unless
    /// an escape sequence had to be decoded.
    fn parse_quoted(&mut self) -> Result<Cow<'a, str>, ParseError> {
        let open = self.pos;
        self.pos += 1;
        let mut run_start = self.pos;
        let mut decoded: Option<String> = None;

        while let Some(b) = self.peek() {
            match b {
                b'"' => {
                    let tail = &self.input[run_start..self.pos];
                    self.pos += 1;
                    return Ok(match decoded {
                        Some(mut s) => {
                            s.push_str(tail);
                            Cow::Owned(s)
                        }
                        None => Cow::Borrowed(tail),
                    });
                }
                b'\\' => match self.bytes.get(self.pos + 1) {
                    Some(&escaped @ (b'"' | b'\\')) => {
                        let s = decoded.get_or_insert_with(String::new);
                        s.push_str(&self.input[run_start..self.pos]);
                        s.push(escaped as char);
                        self.pos += 2;
                        run_start = self.pos;
                    }
                    _ => self.pos += 1,
                },
                _ => self.pos += 1,
            }
        }

        Err(self.malformed(open, MalformedReason::UnterminatedString))
    }
}

fn classify_word(word: &str, offset: usize) -> Result<ConfigItem<'_>, ParseError> {
    match word {
        "true" => Ok(ConfigItem::Bool(true)),
        "false" => Ok(ConfigItem::Bool(false)),
        _ if is_numeric_literal(word) => {
            word.parse::<i64>()
                .map(ConfigItem::Num)
                .map_err(|_| ParseError::NumericOverflow {
                    offset,
                    literal: word.to_string(),
                })
        }
        _ => Ok(ConfigItem::Str(Cow::Borrowed(word))),
    }
}
