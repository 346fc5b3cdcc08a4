use crate::span::Span;
use logos::Logos;
use siteswap_core::alphabet_value;

/// Tokens of the siteswap alphabet.
///
/// The lexer runs over preprocessed text (whitespace stripped,
/// lowercased), so uppercase letters never reach it. Braced literals
/// are one token and only admit decimal digits inside the braces;
/// `{a}` fails here rather than in the parser. Letters past `o` (other
/// than the `x` crossing marker) are reserved and fail the same way.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"[0-9]", alphabet_token)]
    Digit(i64),

    #[regex(r"[a-o]", alphabet_token)]
    Letter(i64),

    #[regex(r"\{-?[0-9]+\}", braced_token)]
    Braced(i64),

    #[token("x")]
    Cross,

    #[token("-")]
    Minus,

    #[token("^")]
    Caret,

    #[token("!")]
    Bang,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    // Anything the grammar has no use for
    Error,
}

fn alphabet_token(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    alphabet_value(lex.slice().chars().next()?)
}

fn braced_token(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    let slice = lex.slice();
    slice[1..slice.len() - 1].parse().ok()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Digit(n) | Token::Letter(n) => {
                write!(f, "{}", siteswap_core::render_integer(*n))
            }
            Token::Braced(n) => write!(f, "{{{}}}", n),
            Token::Cross => write!(f, "x"),
            Token::Minus => write!(f, "-"),
            Token::Caret => write!(f, "^"),
            Token::Bang => write!(f, "!"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Error => write!(f, "unrecognised input"),
        }
    }
}

/// Lexer wrapper with one token of lookahead.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<Option<(Token, Span)>>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }
        let token = self.inner.next()?;
        let span = Span::from(self.inner.span());
        Some((token.unwrap_or(Token::Error), span))
    }

    pub fn peek_token(&mut self) -> Option<(Token, Span)> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token());
        }
        self.peeked.unwrap_or(None)
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }
}
