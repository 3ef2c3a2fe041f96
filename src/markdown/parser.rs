//! Canonical LR(1) table construction and the shift/reduce runtime.
//!
//!     Tables are generated once from the production table in
//!     [`grammar`](crate::markdown::grammar) and cached behind a `Lazy`.
//!     Construction is the textbook item-set algorithm: closure over LR(1)
//!     items with computed lookaheads, goto transitions, and state
//!     deduplication on the canonical item sets. The grammar has no empty
//!     productions, which keeps FIRST-set computation free of nullability
//!     bookkeeping.
//!
//! Conflict resolution
//!
//!     Shift/reduce conflicts are resolved through the token precedence
//!     table. When both sides carry a precedence the higher one wins, with
//!     left associativity reducing on ties. When only the production carries
//!     a precedence the reduce wins; when only the token does, or neither
//!     does, the shift wins. Reduce/reduce conflicts pick the production
//!     declared first.

use crate::markdown::error::{ConvertError, LexError, ParseError};
use crate::markdown::grammar::{self, Nt, Sym, PRODUCTIONS};
use crate::markdown::grammar::{Fragment, StackValue};
use crate::markdown::token::{precedence, Assoc, Token, TokenKind};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// An LR(1) item: a production, a dot position, and one lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    prod: usize,
    dot: usize,
    la: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

struct ParseTables {
    action: HashMap<(usize, TokenKind), Action>,
    goto: HashMap<(usize, Nt), usize>,
}

static TABLES: Lazy<ParseTables> = Lazy::new(build_tables);

/// FIRST sets of every nonterminal, by fixpoint iteration. With no empty
/// productions, FIRST of a sequence is FIRST of its leading symbol.
fn first_sets() -> HashMap<Nt, BTreeSet<TokenKind>> {
    let mut first: HashMap<Nt, BTreeSet<TokenKind>> = HashMap::new();
    loop {
        let mut changed = false;
        for prod in PRODUCTIONS {
            let additions: BTreeSet<TokenKind> = match prod.rhs[0] {
                Sym::T(t) => [t].into_iter().collect(),
                Sym::N(n) => first.get(&n).cloned().unwrap_or_default(),
            };
            let entry = first.entry(prod.lhs).or_default();
            for t in additions {
                changed |= entry.insert(t);
            }
        }
        if !changed {
            return first;
        }
    }
}

/// Lookaheads for an expansion at the dot of `item`: FIRST of what follows
/// the expanded nonterminal, or the item's own lookahead at the end.
fn follow_lookaheads(item: Item, first: &HashMap<Nt, BTreeSet<TokenKind>>) -> BTreeSet<TokenKind> {
    match PRODUCTIONS[item.prod].rhs.get(item.dot + 1) {
        Some(Sym::T(t)) => [*t].into_iter().collect(),
        Some(Sym::N(n)) => first[n].clone(),
        None => [item.la].into_iter().collect(),
    }
}

fn closure(
    mut items: BTreeSet<Item>,
    first: &HashMap<Nt, BTreeSet<TokenKind>>,
) -> BTreeSet<Item> {
    let mut queue: Vec<Item> = items.iter().copied().collect();
    while let Some(item) = queue.pop() {
        let next = match PRODUCTIONS[item.prod].rhs.get(item.dot) {
            Some(Sym::N(n)) => *n,
            _ => continue,
        };
        for la in follow_lookaheads(item, first) {
            for (index, prod) in PRODUCTIONS.iter().enumerate() {
                if prod.lhs != next {
                    continue;
                }
                let candidate = Item {
                    prod: index,
                    dot: 0,
                    la,
                };
                if items.insert(candidate) {
                    queue.push(candidate);
                }
            }
        }
    }
    items
}

fn goto_set(
    state: &BTreeSet<Item>,
    sym: Sym,
    first: &HashMap<Nt, BTreeSet<TokenKind>>,
) -> BTreeSet<Item> {
    let kernel: BTreeSet<Item> = state
        .iter()
        .filter(|item| PRODUCTIONS[item.prod].rhs.get(item.dot) == Some(&sym))
        .map(|item| Item {
            prod: item.prod,
            dot: item.dot + 1,
            la: item.la,
        })
        .collect();
    closure(kernel, first)
}

/// Precedence of a production: its rightmost terminal that carries one.
fn production_precedence(prod: usize) -> Option<(u8, Assoc)> {
    PRODUCTIONS[prod].rhs.iter().rev().find_map(|sym| match sym {
        Sym::T(t) => precedence(*t),
        Sym::N(_) => None,
    })
}

/// Decide a shift/reduce conflict: `true` keeps the reduce.
fn prefer_reduce(prod: usize, token: TokenKind) -> bool {
    match (production_precedence(prod), precedence(token)) {
        (Some((pp, assoc)), Some((tp, _))) => {
            pp > tp || (pp == tp && assoc == Assoc::Left)
        }
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn build_tables() -> ParseTables {
    let first = first_sets();
    let start = closure(
        [Item {
            prod: 0,
            dot: 0,
            la: TokenKind::EndOfInput,
        }]
        .into_iter()
        .collect(),
        &first,
    );

    let mut states: Vec<BTreeSet<Item>> = vec![start.clone()];
    let mut ids: HashMap<BTreeSet<Item>, usize> = HashMap::new();
    ids.insert(start, 0);
    let mut transitions: HashMap<(usize, Sym), usize> = HashMap::new();

    let mut cursor = 0;
    while cursor < states.len() {
        let symbols: BTreeSet<Sym> = states[cursor]
            .iter()
            .filter_map(|item| PRODUCTIONS[item.prod].rhs.get(item.dot).copied())
            .collect();
        for sym in symbols {
            let target = goto_set(&states[cursor], sym, &first);
            let id = match ids.get(&target) {
                Some(id) => *id,
                None => {
                    let id = states.len();
                    ids.insert(target.clone(), id);
                    states.push(target);
                    id
                }
            };
            transitions.insert((cursor, sym), id);
        }
        cursor += 1;
    }

    let mut action: HashMap<(usize, TokenKind), Action> = HashMap::new();
    let mut goto: HashMap<(usize, Nt), usize> = HashMap::new();
    for ((state, sym), target) in &transitions {
        match sym {
            Sym::T(t) => {
                action.insert((*state, *t), Action::Shift(*target));
            }
            Sym::N(n) => {
                goto.insert((*state, *n), *target);
            }
        }
    }

    for (state, items) in states.iter().enumerate() {
        for item in items {
            if item.dot < PRODUCTIONS[item.prod].rhs.len() {
                continue;
            }
            if item.prod == 0 {
                action.insert((state, item.la), Action::Accept);
                continue;
            }
            match action.get(&(state, item.la)).copied() {
                None => {
                    action.insert((state, item.la), Action::Reduce(item.prod));
                }
                Some(Action::Shift(_)) => {
                    if prefer_reduce(item.prod, item.la) {
                        action.insert((state, item.la), Action::Reduce(item.prod));
                    }
                }
                Some(Action::Reduce(other)) => {
                    if item.prod < other {
                        action.insert((state, item.la), Action::Reduce(item.prod));
                    }
                }
                Some(Action::Accept) => {}
            }
        }
    }

    ParseTables { action, goto }
}

fn pull<I>(tokens: &mut I) -> Result<Token, ConvertError>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    match tokens.next() {
        Some(Ok(token)) => Ok(token),
        Some(Err(e)) => Err(e.into()),
        // The lexer always terminates the stream with EndOfInput, and
        // EndOfInput is never shifted.
        None => unreachable!("token stream ended without EndOfInput"),
    }
}

/// Run the parser over a token stream, producing the rendered body HTML.
pub fn parse<I>(tokens: I) -> Result<String, ConvertError>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
{
    let tables = &*TABLES;
    let mut tokens = tokens.into_iter();
    let mut stack: Vec<(usize, StackValue)> = Vec::new();
    let mut lookahead = pull(&mut tokens)?;

    loop {
        let state = stack.last().map_or(0, |(s, _)| *s);
        match tables.action.get(&(state, lookahead.kind)) {
            Some(Action::Shift(target)) => {
                let token = std::mem::replace(&mut lookahead, pull(&mut tokens)?);
                stack.push((*target, StackValue::Token(token)));
            }
            Some(Action::Reduce(prod)) => {
                let production = &PRODUCTIONS[*prod];
                let split = stack.len() - production.rhs.len();
                let values = stack.split_off(split).into_iter().map(|(_, v)| v).collect();
                let fragment = grammar::reduce(production.id, values);
                let base = stack.last().map_or(0, |(s, _)| *s);
                let target = tables.goto[&(base, production.lhs)];
                stack.push((target, StackValue::Fragment(fragment)));
            }
            Some(Action::Accept) => {
                return match stack.pop() {
                    Some((_, StackValue::Fragment(Fragment::Html(html)))) => Ok(html),
                    _ => unreachable!("accept state without a document fragment"),
                };
            }
            None => {
                let error = if lookahead.kind == TokenKind::EndOfInput {
                    ParseError::UnexpectedEndOfInput
                } else {
                    ParseError::UnexpectedToken {
                        kind: lookahead.kind,
                        line: lookahead.line,
                        column: lookahead.column,
                    }
                };
                return Err(error.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::lexer::Lexer;

    fn parse_source(source: &str) -> Result<String, ConvertError> {
        parse(Lexer::new(source))
    }

    #[test]
    fn test_tables_build_without_panicking() {
        let tables = &*TABLES;
        assert!(!tables.action.is_empty());
        assert!(!tables.goto.is_empty());
    }

    #[test]
    fn test_parse_plain_paragraph() {
        assert_eq!(parse_source("hello world").unwrap(), "hello world");
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_source("## Section").unwrap(), "<h2>Section </h2>");
    }

    #[test]
    fn test_parse_bold_span() {
        assert_eq!(
            parse_source("**weight**").unwrap(),
            "<strong>weight</strong> "
        );
    }

    #[test]
    fn test_emphasis_then_text_prefers_the_span() {
        // The trailing marker could also open a star bullet; precedence
        // resolves the conflict toward closing the span.
        assert_eq!(parse_source("*a* b").unwrap(), "<em>a</em> b");
    }

    #[test]
    fn test_star_bullet_starts_a_list_at_line_head() {
        assert_eq!(
            parse_source("* one\n* two\n").unwrap(),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_parse_bulleted_list_in_source_order() {
        assert_eq!(
            parse_source("- a\n- b\n").unwrap(),
            "<ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn test_list_without_trailing_newline_is_incomplete() {
        assert_eq!(
            parse_source("- a\n- b"),
            Err(ConvertError::Parse(ParseError::UnexpectedEndOfInput))
        );
    }

    #[test]
    fn test_unclosed_emphasis_is_incomplete() {
        assert_eq!(
            parse_source("*oops"),
            Err(ConvertError::Parse(ParseError::UnexpectedEndOfInput))
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(
            parse_source(""),
            Err(ConvertError::Parse(ParseError::UnexpectedEndOfInput))
        );
    }

    #[test]
    fn test_single_newline_renders_nothing() {
        assert_eq!(parse_source("a\nb").unwrap(), "ab");
    }

    #[test]
    fn test_blank_line_renders_break() {
        assert_eq!(parse_source("a\n\nb").unwrap(), "a<br>b");
    }

    #[test]
    fn test_nested_emphasis_single_level() {
        assert_eq!(
            parse_source("**_x_**").unwrap(),
            "<strong><em>x</em> </strong> "
        );
    }
}
