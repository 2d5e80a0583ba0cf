//! Textual filter expressions exchanged with the inventory backend.
//!
//! Grammar:
//!
//! ```text
//! expr  := or
//! or    := and ("OR" and)*
//! and   := unary ("AND" unary)*
//! unary := "NOT" unary | "(" expr ")" | term
//! term  := "has" "(" path ")" | path op value
//! op    := "=" | "!=" | "<" | "<=" | ">" | ">="
//! value := "quoted string" | number | bare word
//! ```
//!
//! `=` against a string supports `*` wildcards. This module only tokenizes;
//! producers rewrite tokens and evaluators parse them.

use std::fmt;

use thiserror::Error;

/// Predicate matching every resource.
pub const MATCH_ALL: &str = "has(resource_id)";

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const NOT: &str = "NOT";
pub const HAS: &str = "has";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Field path, keyword or bare word.
    Ident(String),
    /// Unescaped contents of a quoted string.
    Str(String),
    Number(String),
    Op(CompareOp),
    LParen,
    RParen,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Ident(w) if w == AND || w == OR || w == NOT)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(w) | Token::Number(w) => f.write_str(w),
            Token::Str(s) => f.write_str(&quote(s)),
            Token::Op(op) => f.write_str(op.as_str()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unterminated string literal starting at offset {0}")]
    Unterminated(usize),

    #[error("unexpected character {ch:?} at offset {at}")]
    Unexpected { ch: char, at: usize },

    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Quote `value` as a string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(at, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        match ch {
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, escaped)) => value.push(escaped),
                            None => break,
                        },
                        '"' => {
                            closed = true;
                            break;
                        }
                        other => value.push(other),
                    }
                }
                if !closed {
                    return Err(QueryError::Unterminated(at));
                }
                tokens.push(Token::Str(value));
            }
            '=' => {
                chars.next();
                tokens.push(Token::Op(CompareOp::Eq));
            }
            '!' | '<' | '>' => {
                chars.next();
                let followed_by_eq = matches!(chars.peek(), Some(&(_, '=')));
                if followed_by_eq {
                    chars.next();
                }
                let op = match (ch, followed_by_eq) {
                    ('!', true) => CompareOp::Ne,
                    ('<', false) => CompareOp::Lt,
                    ('<', true) => CompareOp::Le,
                    ('>', false) => CompareOp::Gt,
                    ('>', true) => CompareOp::Ge,
                    _ => return Err(QueryError::Unexpected { ch, at }),
                };
                tokens.push(Token::Op(op));
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut number = String::new();
                number.push(c);
                chars.next();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        number.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if number == "-" {
                    return Err(QueryError::Unexpected { ch, at });
                }
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&(_, w)) = chars.peek() {
                    if w.is_ascii_alphanumeric() || w == '_' || w == '.' {
                        word.push(w);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(word));
            }
            other => return Err(QueryError::Unexpected { ch: other, at }),
        }
    }

    Ok(tokens)
}

/// Render tokens back into expression text.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for token in tokens {
        let glue = match (prev, token) {
            (None, _) => false,
            (Some(Token::LParen), _) | (_, Token::RParen) => false,
            (Some(Token::Ident(w)), Token::LParen) if w == HAS => false,
            _ => true,
        };
        if glue {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        prev = Some(token);
    }
    out
}
