//! Ordered lexical rules and the lexer implementation.
//!
//!     The lexer is a data-driven table of anchored regex rules tried at the
//!     current offset. The longest match wins; declaration order breaks
//!     exact-length ties (earlier rule wins). Runs of spaces and tabs
//!     between tokens are elided; `Newline` is significant and never elided.
//!
//! Trailing context
//!
//!     Two rules need lookahead the regex crate cannot express inline: a
//!     `-`/`+` is a list bullet only when followed by whitespace, and `N.`
//!     is a list number only when followed by whitespace or end of input.
//!     These assertions live on the rule as a [`Lookahead`] check applied
//!     after the pattern match; a rule whose check fails simply does not
//!     participate at that offset.
//!
//! Code spans
//!
//!     `CodeBlock` (triple backtick, non-greedy to the next triple backtick)
//!     is declared before `InlineCode` so a fence is captured as one token
//!     rather than three single-backtick spans. Both capture the entire
//!     delimited run, delimiters and inner newlines included; nothing inside
//!     a code span is tokenized as markup.

use crate::markdown::error::LexError;
use crate::markdown::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing-context assertion applied after a rule's pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    /// No constraint on the following character.
    Unrestricted,
    /// The next character must exist and be whitespace.
    Whitespace,
    /// The next character must be whitespace, or the input must end here.
    WhitespaceOrEnd,
}

/// A single lexical rule: pattern, produced kind, trailing-context check,
/// and its declaration index used as the tie-break priority.
pub struct LexRule {
    pub kind: TokenKind,
    pub pattern: Regex,
    pub lookahead: Lookahead,
    pub priority: usize,
}

/// The catch-all text rule. Alternatives keep the classic exclusion set
/// (`# * \n [ ] ` ! ~ _` never appear inside a Text token) while ensuring
/// Text can never out-match a marker rule at the same offset:
/// a run starting with an unclaimed character; `#` with no following space;
/// `-`/`+` glued to a word; a digit run that does not form an `N. ` list
/// marker; a bare `-`/`+` (ties lose to the earlier `ListBullet` rule).
const TEXT_PATTERN: &str = r"^(?:[^#*\n\[\]`!~_+>()0-9-][^#*\n\[\]`!~_]*|#[^ \t\n]+|[-+][^#*\n\[\]`!~_ \t][^#*\n\[\]`!~_]*|[0-9]+(?:\.[^#*\n\[\]`!~_ \t][^#*\n\[\]`!~_]*|[^.#*\n\[\]`!~_][^#*\n\[\]`!~_]*)?|[-+])";

/// Rule table in declaration order. Order is the tie-break when two rules
/// match the same length at an offset.
const RULE_TABLE: &[(TokenKind, &str, Lookahead)] = &[
    (TokenKind::Heading, r"^#{1,6} ", Lookahead::Unrestricted),
    (TokenKind::Bold, r"^(?:\*\*|__)", Lookahead::Unrestricted),
    (TokenKind::EmphasisMarker, r"^[*_]", Lookahead::Unrestricted),
    (TokenKind::Strikethrough, r"^~~", Lookahead::Unrestricted),
    (TokenKind::CodeBlock, r"^```(?s:.*?)```", Lookahead::Unrestricted),
    (TokenKind::InlineCode, r"^`(?s:.*?)`", Lookahead::Unrestricted),
    (TokenKind::LinkOpen, r"^\[", Lookahead::Unrestricted),
    (TokenKind::LinkClose, r"^\]", Lookahead::Unrestricted),
    (TokenKind::Image, r"^!\[", Lookahead::Unrestricted),
    (TokenKind::Url, r"^\([^)]+\)", Lookahead::Unrestricted),
    (TokenKind::OpenParen, r"^\(", Lookahead::Unrestricted),
    (TokenKind::CloseParen, r"^\)", Lookahead::Unrestricted),
    (TokenKind::ListBullet, r"^[+-]", Lookahead::Whitespace),
    (TokenKind::ListNumber, r"^[0-9]+\.", Lookahead::WhitespaceOrEnd),
    (TokenKind::Blockquote, r"^>", Lookahead::Unrestricted),
    (TokenKind::Newline, r"^\n", Lookahead::Unrestricted),
    (TokenKind::Text, TEXT_PATTERN, Lookahead::Unrestricted),
];

/// Process-wide immutable rule table, compiled once before first use.
static LEX_RULES: Lazy<Vec<LexRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .enumerate()
        .map(|(priority, &(kind, pattern, lookahead))| LexRule {
            kind,
            pattern: Regex::new(pattern).unwrap(),
            lookahead,
            priority,
        })
        .collect()
});

/// Lazy, single-pass, non-restartable token stream over a source string.
///
/// Yields `Result<Token, LexError>` and terminates with exactly one
/// `EndOfInput` token. After an error or end of input the iterator is done.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Elide a run of spaces and tabs at the current offset.
    fn skip_insignificant(&mut self) {
        let rest = &self.source[self.offset..];
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        self.offset += skipped;
        self.column += skipped;
    }

    fn advance(&mut self, text: &str) {
        self.offset += text.len();
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn lookahead_holds(&self, lookahead: Lookahead, end: usize) -> bool {
        let next = self.source[end..].chars().next();
        match lookahead {
            Lookahead::Unrestricted => true,
            Lookahead::Whitespace => matches!(next, Some(c) if c.is_ascii_whitespace()),
            Lookahead::WhitespaceOrEnd => match next {
                None => true,
                Some(c) => c.is_ascii_whitespace(),
            },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_insignificant();
        if self.offset >= self.source.len() {
            self.finished = true;
            return Some(Ok(Token::new(
                TokenKind::EndOfInput,
                "",
                self.line,
                self.column,
            )));
        }

        let source = self.source;
        let rest = &source[self.offset..];
        let mut best: Option<(&LexRule, usize)> = None;
        for rule in LEX_RULES.iter() {
            if let Some(m) = rule.pattern.find(rest) {
                if !self.lookahead_holds(rule.lookahead, self.offset + m.end()) {
                    continue;
                }
                // Longest match wins; on an exact tie the earlier rule stays.
                let longer = match best {
                    Some((_, len)) => m.end() > len,
                    None => true,
                };
                if longer {
                    best = Some((rule, m.end()));
                }
            }
        }

        match best {
            Some((rule, len)) => {
                let (line, column) = (self.line, self.column);
                let text = rest[..len].to_string();
                self.advance(&text);
                Some(Ok(Token::new(rule.kind, text, line, column)))
            }
            None => {
                self.finished = true;
                Some(Err(LexError {
                    offset: self.offset,
                    line: self.line,
                    column: self.column,
                }))
            }
        }
    }
}

/// Tokenize a whole source string into a `Vec`.
///
/// The parser pulls from [`Lexer`] directly; this entry point exists for
/// tests and debugging where the full stream is easier to assert on.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}
