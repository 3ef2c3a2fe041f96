//! Grammar productions and their reduction actions.
//!
//!     The grammar is data, not code: a static table of productions in
//!     declaration order, interpreted by the automaton in
//!     [`parser`](crate::markdown::parser). Each production carries a tagged
//!     id; [`reduce`] dispatches on that id to emit an HTML fragment
//!     directly. No syntax tree is built; the "tree" exists only implicitly
//!     as the parser's reduction stack.
//!
//! Accumulation
//!
//!     Lists and blockquotes are right-recursive, so the tail of a list is
//!     reduced before its head. Grow reductions push the head item onto the
//!     tail sequence and the wrapping reduction reverses once, which keeps
//!     items in source order without per-item prepending.

use crate::markdown::html;
use crate::markdown::token::{Token, TokenKind};

/// Nonterminal symbols of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nt {
    Start,
    Document,
    Elements,
    Element,
    Separators,
    Separator,
    TextContents,
    TextContent,
    BulletedListItem,
    NumberedListItem,
    BulletedList,
    NumberedList,
    QuoteLine,
    Quote,
}

/// A grammar symbol: terminal token kind or nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sym {
    T(TokenKind),
    N(Nt),
}

/// Tagged production identifier, used to dispatch reduction actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProdId {
    Start,
    Document,
    ElementsMany,
    ElementsOne,
    HeadingElement,
    ParagraphElement,
    SeparatorElement,
    BulletedListElement,
    NumberedListElement,
    BlockquoteElement,
    CodeBlockElement,
    InlineCodeElement,
    ImageElement,
    SeparatorsOne,
    SeparatorsMany,
    SeparatorNewline,
    TextContentsMany,
    TextContentsOne,
    PlainText,
    BoldSpan,
    EmphasisSpan,
    StrikethroughSpan,
    LinkSpan,
    EmptyLinkSpan,
    BulletedItem,
    StarBulletedItem,
    NumberedItem,
    BulletedListGrow,
    BulletedListStart,
    NumberedListGrow,
    NumberedListStart,
    QuoteLineBody,
    QuoteGrow,
    QuoteStart,
}

/// One production: tagged id, left-hand nonterminal, right-hand symbols.
pub struct Production {
    pub id: ProdId,
    pub lhs: Nt,
    pub rhs: &'static [Sym],
}

/// The full production table in declaration order. Index 0 is the augmented
/// start production; declaration order is the reduce/reduce tie-break.
pub static PRODUCTIONS: &[Production] = &[
    Production {
        id: ProdId::Start,
        lhs: Nt::Start,
        rhs: &[Sym::N(Nt::Document)],
    },
    Production {
        id: ProdId::Document,
        lhs: Nt::Document,
        rhs: &[Sym::N(Nt::Elements)],
    },
    Production {
        id: ProdId::ElementsMany,
        lhs: Nt::Elements,
        rhs: &[Sym::N(Nt::Element), Sym::N(Nt::Elements)],
    },
    Production {
        id: ProdId::ElementsOne,
        lhs: Nt::Elements,
        rhs: &[Sym::N(Nt::Element)],
    },
    Production {
        id: ProdId::HeadingElement,
        lhs: Nt::Element,
        rhs: &[Sym::T(TokenKind::Heading), Sym::N(Nt::TextContent)],
    },
    Production {
        id: ProdId::ParagraphElement,
        lhs: Nt::Element,
        rhs: &[Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::SeparatorElement,
        lhs: Nt::Element,
        rhs: &[Sym::N(Nt::Separators)],
    },
    Production {
        id: ProdId::BulletedListElement,
        lhs: Nt::Element,
        rhs: &[Sym::N(Nt::BulletedList)],
    },
    Production {
        id: ProdId::NumberedListElement,
        lhs: Nt::Element,
        rhs: &[Sym::N(Nt::NumberedList)],
    },
    Production {
        id: ProdId::BlockquoteElement,
        lhs: Nt::Element,
        rhs: &[Sym::N(Nt::Quote)],
    },
    Production {
        id: ProdId::CodeBlockElement,
        lhs: Nt::Element,
        rhs: &[Sym::T(TokenKind::CodeBlock)],
    },
    Production {
        id: ProdId::InlineCodeElement,
        lhs: Nt::Element,
        rhs: &[Sym::T(TokenKind::InlineCode)],
    },
    Production {
        id: ProdId::ImageElement,
        lhs: Nt::Element,
        rhs: &[
            Sym::T(TokenKind::Image),
            Sym::T(TokenKind::Text),
            Sym::T(TokenKind::LinkClose),
            Sym::T(TokenKind::Url),
        ],
    },
    Production {
        id: ProdId::SeparatorsOne,
        lhs: Nt::Separators,
        rhs: &[Sym::N(Nt::Separator)],
    },
    Production {
        id: ProdId::SeparatorsMany,
        lhs: Nt::Separators,
        rhs: &[Sym::N(Nt::Separator), Sym::N(Nt::Separators)],
    },
    Production {
        id: ProdId::SeparatorNewline,
        lhs: Nt::Separator,
        rhs: &[Sym::T(TokenKind::Newline)],
    },
    Production {
        id: ProdId::TextContentsMany,
        lhs: Nt::TextContents,
        rhs: &[Sym::N(Nt::TextContent), Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::TextContentsOne,
        lhs: Nt::TextContents,
        rhs: &[Sym::N(Nt::TextContent)],
    },
    Production {
        id: ProdId::PlainText,
        lhs: Nt::TextContent,
        rhs: &[Sym::T(TokenKind::Text)],
    },
    Production {
        id: ProdId::BoldSpan,
        lhs: Nt::TextContent,
        rhs: &[
            Sym::T(TokenKind::Bold),
            Sym::N(Nt::TextContent),
            Sym::T(TokenKind::Bold),
        ],
    },
    Production {
        id: ProdId::EmphasisSpan,
        lhs: Nt::TextContent,
        rhs: &[
            Sym::T(TokenKind::EmphasisMarker),
            Sym::N(Nt::TextContent),
            Sym::T(TokenKind::EmphasisMarker),
        ],
    },
    Production {
        id: ProdId::StrikethroughSpan,
        lhs: Nt::TextContent,
        rhs: &[
            Sym::T(TokenKind::Strikethrough),
            Sym::N(Nt::TextContent),
            Sym::T(TokenKind::Strikethrough),
        ],
    },
    Production {
        id: ProdId::LinkSpan,
        lhs: Nt::TextContent,
        rhs: &[
            Sym::T(TokenKind::LinkOpen),
            Sym::N(Nt::TextContent),
            Sym::T(TokenKind::LinkClose),
            Sym::T(TokenKind::Url),
        ],
    },
    Production {
        id: ProdId::EmptyLinkSpan,
        lhs: Nt::TextContent,
        rhs: &[
            Sym::T(TokenKind::LinkOpen),
            Sym::N(Nt::TextContent),
            Sym::T(TokenKind::LinkClose),
            Sym::T(TokenKind::OpenParen),
            Sym::T(TokenKind::CloseParen),
        ],
    },
    Production {
        id: ProdId::BulletedItem,
        lhs: Nt::BulletedListItem,
        rhs: &[Sym::T(TokenKind::ListBullet), Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::StarBulletedItem,
        lhs: Nt::BulletedListItem,
        rhs: &[Sym::T(TokenKind::EmphasisMarker), Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::NumberedItem,
        lhs: Nt::NumberedListItem,
        rhs: &[Sym::T(TokenKind::ListNumber), Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::BulletedListGrow,
        lhs: Nt::BulletedList,
        rhs: &[
            Sym::N(Nt::BulletedListItem),
            Sym::N(Nt::Separators),
            Sym::N(Nt::BulletedList),
        ],
    },
    Production {
        id: ProdId::BulletedListStart,
        lhs: Nt::BulletedList,
        rhs: &[Sym::N(Nt::BulletedListItem), Sym::N(Nt::Separators)],
    },
    Production {
        id: ProdId::NumberedListGrow,
        lhs: Nt::NumberedList,
        rhs: &[
            Sym::N(Nt::NumberedListItem),
            Sym::N(Nt::Separators),
            Sym::N(Nt::NumberedList),
        ],
    },
    Production {
        id: ProdId::NumberedListStart,
        lhs: Nt::NumberedList,
        rhs: &[Sym::N(Nt::NumberedListItem), Sym::N(Nt::Separators)],
    },
    Production {
        id: ProdId::QuoteLineBody,
        lhs: Nt::QuoteLine,
        rhs: &[Sym::T(TokenKind::Blockquote), Sym::N(Nt::TextContents)],
    },
    Production {
        id: ProdId::QuoteGrow,
        lhs: Nt::Quote,
        rhs: &[
            Sym::N(Nt::QuoteLine),
            Sym::N(Nt::Separators),
            Sym::N(Nt::Quote),
        ],
    },
    Production {
        id: ProdId::QuoteStart,
        lhs: Nt::Quote,
        rhs: &[Sym::N(Nt::QuoteLine), Sym::N(Nt::Separators)],
    },
];

/// The value a reduction produces: either a ready-to-emit HTML string, or
/// an ordered sequence of fragments awaiting a final join (lists, quotes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Html(String),
    Items(Vec<String>),
}

/// A value on the parser's stack: a shifted token or a reduced fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackValue {
    Token(Token),
    Fragment(Fragment),
}

/// Cursor over the right-hand-side values of a reduction, consumed left to
/// right. Shapes are guaranteed by the production table.
struct Rhs(std::vec::IntoIter<StackValue>);

impl Rhs {
    fn next(&mut self) -> StackValue {
        match self.0.next() {
            Some(value) => value,
            None => unreachable!("production arity mismatch"),
        }
    }

    fn html(&mut self) -> String {
        match self.next() {
            StackValue::Fragment(Fragment::Html(s)) => s,
            other => unreachable!("expected html fragment, got {:?}", other),
        }
    }

    fn items(&mut self) -> Vec<String> {
        match self.next() {
            StackValue::Fragment(Fragment::Items(items)) => items,
            other => unreachable!("expected item sequence, got {:?}", other),
        }
    }

    fn token(&mut self) -> Token {
        match self.next() {
            StackValue::Token(token) => token,
            other => unreachable!("expected token, got {:?}", other),
        }
    }

    fn skip(&mut self) {
        self.next();
    }
}

/// Strip the surrounding parentheses of a `Url` token's text.
fn url_target(token: &Token) -> &str {
    &token.text[1..token.text.len() - 1]
}

/// Apply the reduction action for a production, turning its right-hand-side
/// values into one fragment.
pub fn reduce(id: ProdId, values: Vec<StackValue>) -> Fragment {
    let mut rhs = Rhs(values.into_iter());
    match id {
        ProdId::Start => unreachable!("augmented start production is never reduced"),
        ProdId::Document
        | ProdId::ElementsOne
        | ProdId::ParagraphElement
        | ProdId::SeparatorElement
        | ProdId::SeparatorsOne
        | ProdId::TextContentsOne => Fragment::Html(rhs.html()),
        ProdId::ElementsMany | ProdId::TextContentsMany => {
            let head = rhs.html();
            let tail = rhs.html();
            Fragment::Html(head + &tail)
        }
        ProdId::HeadingElement => {
            let marker = rhs.token();
            let content = rhs.html();
            let level = marker.text.chars().take_while(|c| *c == '#').count();
            Fragment::Html(format!("<h{level}>{content} </h{level}>"))
        }
        ProdId::SeparatorsMany => Fragment::Html("<br>".to_string()),
        ProdId::SeparatorNewline => Fragment::Html(String::new()),
        ProdId::PlainText => Fragment::Html(rhs.token().text),
        ProdId::BoldSpan => {
            rhs.skip();
            let inner = rhs.html();
            Fragment::Html(format!("<strong>{inner}</strong> "))
        }
        ProdId::EmphasisSpan => {
            rhs.skip();
            let inner = rhs.html();
            Fragment::Html(format!("<em>{inner}</em> "))
        }
        ProdId::StrikethroughSpan => {
            rhs.skip();
            let inner = rhs.html();
            Fragment::Html(format!("<del>{inner}</del> "))
        }
        ProdId::LinkSpan => {
            rhs.skip();
            let inner = rhs.html();
            rhs.skip();
            let url = rhs.token();
            Fragment::Html(format!(r#"<a href="{}">{}</a>"#, url_target(&url), inner))
        }
        ProdId::EmptyLinkSpan => {
            rhs.skip();
            let inner = rhs.html();
            Fragment::Html(format!(r#"<a href="">{inner}</a> "#))
        }
        ProdId::ImageElement => {
            rhs.skip();
            let alt = rhs.token();
            rhs.skip();
            let url = rhs.token();
            Fragment::Html(format!(
                r#"<img src="{}" alt="{}">"#,
                url_target(&url),
                alt.text
            ))
        }
        ProdId::CodeBlockElement => {
            let token = rhs.token();
            let inner = &token.text[3..token.text.len() - 3];
            Fragment::Html(format!("<pre><code>{}</code></pre>", html::escape(inner)))
        }
        ProdId::InlineCodeElement => {
            let token = rhs.token();
            let inner = &token.text[1..token.text.len() - 1];
            Fragment::Html(format!("<code>{}</code>", html::escape(inner)))
        }
        ProdId::BulletedItem | ProdId::StarBulletedItem | ProdId::NumberedItem => {
            rhs.skip();
            let content = rhs.html();
            Fragment::Html(format!("<li>{content}</li>"))
        }
        ProdId::BulletedListGrow | ProdId::NumberedListGrow | ProdId::QuoteGrow => {
            let head = rhs.html();
            rhs.skip();
            let mut tail = rhs.items();
            tail.push(head);
            Fragment::Items(tail)
        }
        ProdId::BulletedListStart | ProdId::NumberedListStart | ProdId::QuoteStart => {
            let head = rhs.html();
            Fragment::Items(vec![head])
        }
        ProdId::BulletedListElement => {
            let items = rhs.items();
            let body: String = items.iter().rev().map(String::as_str).collect();
            Fragment::Html(format!("<ul>{body}</ul>"))
        }
        ProdId::NumberedListElement => {
            let items = rhs.items();
            let body: String = items.iter().rev().map(String::as_str).collect();
            Fragment::Html(format!("<ol>{body}</ol>"))
        }
        ProdId::BlockquoteElement => {
            let lines = rhs.items();
            let body = lines
                .iter()
                .rev()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("<br>");
            Fragment::Html(format!("<blockquote>{body}</blockquote>"))
        }
        ProdId::QuoteLineBody => {
            rhs.skip();
            Fragment::Html(rhs.html())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_token(text: &str) -> StackValue {
        StackValue::Token(Token::new(TokenKind::Text, text, 1, 1))
    }

    fn html(text: &str) -> StackValue {
        StackValue::Fragment(Fragment::Html(text.to_string()))
    }

    #[test]
    fn test_table_starts_with_augmented_production() {
        assert_eq!(PRODUCTIONS[0].lhs, Nt::Start);
        assert_eq!(PRODUCTIONS[0].rhs, &[Sym::N(Nt::Document)]);
    }

    #[test]
    fn test_heading_reduction_counts_hashes() {
        let marker = StackValue::Token(Token::new(TokenKind::Heading, "### ", 1, 1));
        let fragment = reduce(ProdId::HeadingElement, vec![marker, html("Title")]);
        assert_eq!(fragment, Fragment::Html("<h3>Title </h3>".to_string()));
    }

    #[test]
    fn test_inline_spans_append_trailing_space() {
        let bold = StackValue::Token(Token::new(TokenKind::Bold, "**", 1, 1));
        let fragment = reduce(
            ProdId::BoldSpan,
            vec![bold.clone(), html("weight"), bold],
        );
        assert_eq!(
            fragment,
            Fragment::Html("<strong>weight</strong> ".to_string())
        );
    }

    #[test]
    fn test_link_reduction_strips_url_parens() {
        let open = StackValue::Token(Token::new(TokenKind::LinkOpen, "[", 1, 1));
        let close = StackValue::Token(Token::new(TokenKind::LinkClose, "]", 1, 3));
        let url = StackValue::Token(Token::new(TokenKind::Url, "(http://x)", 1, 4));
        let fragment = reduce(ProdId::LinkSpan, vec![open, html("t"), close, url]);
        assert_eq!(
            fragment,
            Fragment::Html(r#"<a href="http://x">t</a>"#.to_string())
        );
    }

    #[test]
    fn test_code_reduction_escapes_content() {
        let token = StackValue::Token(Token::new(TokenKind::InlineCode, "`a<b`", 1, 1));
        let fragment = reduce(ProdId::InlineCodeElement, vec![token]);
        assert_eq!(fragment, Fragment::Html("<code>a&lt;b</code>".to_string()));
    }

    #[test]
    fn test_plain_text_is_not_escaped() {
        let fragment = reduce(ProdId::PlainText, vec![text_token("a < b")]);
        assert_eq!(fragment, Fragment::Html("a < b".to_string()));
    }

    #[test]
    fn test_list_accumulation_restores_source_order() {
        // Right recursion reduces the tail first; grow pushes the head and
        // the wrap reverses once.
        let tail = reduce(
            ProdId::BulletedListStart,
            vec![html("<li>b</li>"), html("")],
        );
        let grown = reduce(
            ProdId::BulletedListGrow,
            vec![
                html("<li>a</li>"),
                html(""),
                StackValue::Fragment(tail),
            ],
        );
        let wrapped = reduce(ProdId::BulletedListElement, vec![StackValue::Fragment(grown)]);
        assert_eq!(
            wrapped,
            Fragment::Html("<ul><li>a</li><li>b</li></ul>".to_string())
        );
    }

    #[test]
    fn test_quote_lines_join_with_breaks() {
        let tail = reduce(ProdId::QuoteStart, vec![html("second"), html("")]);
        let grown = reduce(
            ProdId::QuoteGrow,
            vec![html("first"), html(""), StackValue::Fragment(tail)],
        );
        let wrapped = reduce(ProdId::BlockquoteElement, vec![StackValue::Fragment(grown)]);
        assert_eq!(
            wrapped,
            Fragment::Html("<blockquote>first<br>second</blockquote>".to_string())
        );
    }
}
