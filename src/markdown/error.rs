//! Error types for the conversion pipeline.
//!
//!     Two failure kinds exist: the lexer found no rule match at an offset,
//!     or the grammar could not shift/reduce the current token. Both abort
//!     the conversion; there is no recovery and no partial output. The core
//!     never prints; errors propagate to the caller, which decides
//!     presentation.

use crate::markdown::token::TokenKind;
use std::fmt;

/// No lexical rule matched at the given offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte offset into the source where scanning stopped.
    pub offset: usize,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub column: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no lexical rule matches at line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

impl std::error::Error for LexError {}

/// The grammar could not accept the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token with no shift or reduce action in the current state.
    UnexpectedToken {
        kind: TokenKind,
        line: usize,
        column: usize,
    },
    /// Input ended with an incomplete construct on the stack, e.g. an
    /// unclosed emphasis delimiter.
    UnexpectedEndOfInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { kind, line, column } => {
                write!(
                    f,
                    "unexpected {} token at line {}, column {}",
                    kind, line, column
                )
            }
            ParseError::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Either failure a `convert` call can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Lex(e) => write!(f, "lexing failed: {}", e),
            ConvertError::Parse(e) => write!(f, "parsing failed: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Lex(e) => Some(e),
            ConvertError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for ConvertError {
    fn from(e: LexError) -> Self {
        ConvertError::Lex(e)
    }
}

impl From<ParseError> for ConvertError {
    fn from(e: ParseError) -> Self {
        ConvertError::Parse(e)
    }
}
