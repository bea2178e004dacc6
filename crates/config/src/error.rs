//! Parse errors for configuration strings

use std::fmt;

use thiserror::Error;

/// Why a configuration string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// A `"` was opened and never closed
    UnterminatedString,
    /// A `(` was opened and never closed
    UnmatchedOpenParen,
    /// A `)` appeared with no open struct
    UnmatchedCloseParen,
    /// `=` was followed by a separator or end of input
    MissingValue,
    /// An element was not followed by `,`, `)` or end of input
    ExpectedSeparator,
    /// A character that cannot start a key or value
    UnexpectedCharacter(char),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::UnterminatedString => write!(f, "unterminated quoted string"),
            MalformedReason::UnmatchedOpenParen => write!(f, "unmatched '('"),
            MalformedReason::UnmatchedCloseParen => write!(f, "unmatched ')'"),
            MalformedReason::MissingValue => write!(f, "expected value after '='"),
            MalformedReason::ExpectedSeparator => write!(f, "expected ',' or ')'"),
            MalformedReason::UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
        }
    }
}

/// Error type for configuration string parsing
///
/// Offsets are byte offsets into the input string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not follow the grammar
    #[error("malformed configuration at offset {offset}: {reason}")]
    MalformedConfig {
        /// Byte offset of the offending character
        offset: usize,
        /// What was wrong
        reason: MalformedReason,
    },

    /// A numeric literal does not fit in an i64
    #[error("numeric literal '{literal}' at offset {offset} overflows a 64-bit integer")]
    NumericOverflow {
        /// Byte offset where the literal starts
        offset: usize,
        /// The literal as written
        literal: String,
    },

    /// The input exceeds the configured size bound
    #[error("configuration is {len} bytes (max {max})")]
    InputTooLarge {
        /// Input length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Structs are nested deeper than the configured bound
    #[error("nesting deeper than {max} levels at offset {offset}")]
    NestingTooDeep {
        /// Byte offset of the `(` that crossed the bound
        offset: usize,
        /// Configured maximum depth
        max: usize,
    },
}

impl ParseError {
    /// Byte offset associated with the error, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::MalformedConfig { offset, .. }
            | ParseError::NumericOverflow { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => Some(*offset),
            ParseError::InputTooLarge { .. } => None,
        }
    }
}
