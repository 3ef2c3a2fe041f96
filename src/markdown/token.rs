//! Token types shared across the lexer, parser, and tooling.
//!
//!     Tokens carry their classification, the raw source slice, and a 1-based
//!     line/column position. No escaping or decoration happens at lex time;
//!     the raw text stays on the token and the grammar's reduction actions
//!     decide how (and whether) to transform it.
//!
//! Disambiguation
//!
//!     Several kinds share a surface character. A `*` or `_` is always lexed
//!     as the generic `EmphasisMarker`; whether it acts as an italic
//!     delimiter, a list bullet, or part of literal text is decided entirely
//!     by the grammar, guided by the precedence groups declared in
//!     [`precedence`]. A `-`/`+` is a `ListBullet` only with trailing
//!     whitespace; otherwise it lexes as `Text`.

use std::fmt;

/// All token kinds the lexer can produce. Closed set; `EndOfInput` is the
/// terminating marker every stream ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Heading,
    Bold,
    EmphasisMarker,
    Strikethrough,
    CodeBlock,
    InlineCode,
    LinkOpen,
    LinkClose,
    Image,
    Url,
    OpenParen,
    CloseParen,
    ListBullet,
    ListNumber,
    Blockquote,
    Newline,
    Text,
    EndOfInput,
}

impl TokenKind {
    /// Check if this kind opens or closes a paired inline span.
    pub fn is_inline_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::Bold | TokenKind::EmphasisMarker | TokenKind::Strikethrough
        )
    }

    /// Check if this kind starts a block construct at the head of a line.
    pub fn is_block_marker(&self) -> bool {
        matches!(
            self,
            TokenKind::ListBullet | TokenKind::ListNumber | TokenKind::Blockquote
        )
    }

    /// Check if this kind is a verbatim code span.
    pub fn is_code(&self) -> bool {
        matches!(self, TokenKind::CodeBlock | TokenKind::InlineCode)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Heading => "Heading",
            TokenKind::Bold => "Bold",
            TokenKind::EmphasisMarker => "EmphasisMarker",
            TokenKind::Strikethrough => "Strikethrough",
            TokenKind::CodeBlock => "CodeBlock",
            TokenKind::InlineCode => "InlineCode",
            TokenKind::LinkOpen => "LinkOpen",
            TokenKind::LinkClose => "LinkClose",
            TokenKind::Image => "Image",
            TokenKind::Url => "Url",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::ListBullet => "ListBullet",
            TokenKind::ListNumber => "ListNumber",
            TokenKind::Blockquote => "Blockquote",
            TokenKind::Newline => "Newline",
            TokenKind::Text => "Text",
            TokenKind::EndOfInput => "EndOfInput",
        };
        f.write_str(name)
    }
}

/// A classified, positioned slice of source text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// Associativity of a precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Declared precedence level and associativity for a token kind, or `None`
/// for kinds outside the precedence table. Consulted only when the parser
/// tables have a genuine shift/reduce conflict. Groups, highest to lowest:
/// inline emphasis delimiters, link/image tokens, code spans, block markers,
/// newline. All groups are left-associative.
pub fn precedence(kind: TokenKind) -> Option<(u8, Assoc)> {
    let level = match kind {
        TokenKind::Bold | TokenKind::EmphasisMarker => 5,
        TokenKind::LinkOpen | TokenKind::LinkClose | TokenKind::Image | TokenKind::Url => 4,
        TokenKind::CodeBlock | TokenKind::InlineCode => 3,
        TokenKind::Blockquote | TokenKind::ListBullet | TokenKind::ListNumber => 2,
        TokenKind::Newline => 1,
        _ => return None,
    };
    Some((level, Assoc::Left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_delimiter_classification() {
        assert!(TokenKind::Bold.is_inline_delimiter());
        assert!(TokenKind::EmphasisMarker.is_inline_delimiter());
        assert!(TokenKind::Strikethrough.is_inline_delimiter());
        assert!(!TokenKind::Text.is_inline_delimiter());
        assert!(!TokenKind::CodeBlock.is_inline_delimiter());
    }

    #[test]
    fn test_block_marker_classification() {
        assert!(TokenKind::ListBullet.is_block_marker());
        assert!(TokenKind::ListNumber.is_block_marker());
        assert!(TokenKind::Blockquote.is_block_marker());
        assert!(!TokenKind::Newline.is_block_marker());
    }

    #[test]
    fn test_precedence_ordering() {
        let (emphasis, _) = precedence(TokenKind::Bold).unwrap();
        let (link, _) = precedence(TokenKind::LinkOpen).unwrap();
        let (code, _) = precedence(TokenKind::InlineCode).unwrap();
        let (block, _) = precedence(TokenKind::ListBullet).unwrap();
        let (newline, _) = precedence(TokenKind::Newline).unwrap();
        assert!(emphasis > link);
        assert!(link > code);
        assert!(code > block);
        assert!(block > newline);
    }

    #[test]
    fn test_precedence_gaps() {
        // Text, Heading and EndOfInput carry no precedence; conflicts against
        // them fall back to the engine's defaults.
        assert_eq!(precedence(TokenKind::Text), None);
        assert_eq!(precedence(TokenKind::Heading), None);
        assert_eq!(precedence(TokenKind::EndOfInput), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TokenKind::EmphasisMarker.to_string(), "EmphasisMarker");
        assert_eq!(TokenKind::EndOfInput.to_string(), "EndOfInput");
    }
}
