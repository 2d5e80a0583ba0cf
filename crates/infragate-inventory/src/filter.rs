//! Evaluation of filter and ordering expressions against stored bodies.
//!
//! Expressions are parsed from [`infragate_core::query`] tokens into a small
//! AST and evaluated row by row. Paths address nested body fields with dots
//! (`site.resource_id`); a stored edge is a `{resource_id}` stub, so only
//! the target id of an edge is addressable.

use std::cmp::Ordering;

use infragate_core::query::{self, CompareOp, QueryError, Token};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Has(String),
    Compare {
        path: String,
        op: CompareOp,
        value: Literal,
    },
}

/// A parsed filter expression. The empty expression matches every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    expr: Option<Expr>,
}

impl Predicate {
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let tokens = query::tokenize(text)?;
        if tokens.is_empty() {
            return Ok(Self { expr: None });
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_or()?;
        if let Some(extra) = parser.peek() {
            return Err(QueryError::Syntax(format!("unexpected token `{extra}`")));
        }
        Ok(Self { expr: Some(expr) })
    }

    pub fn matches(&self, body: &Value) -> bool {
        self.expr.as_ref().is_none_or(|e| eval(e, body))
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(w)) if w == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), QueryError> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(QueryError::Syntax(format!(
                "expected `{expected}`, found `{token}`"
            ))),
            None => Err(QueryError::Syntax(format!(
                "expected `{expected}`, found end of input"
            ))),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, QueryError> {
        let mut lhs = self.parse_and()?;
        while self.eat_keyword(query::OR) {
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, QueryError> {
        let mut lhs = self.parse_unary()?;
        while self.eat_keyword(query::AND) {
            let rhs = self.parse_unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, QueryError> {
        if self.eat_keyword(query::NOT) {
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        if matches!(self.peek(), Some(Token::LParen)) {
            self.pos += 1;
            let inner = self.parse_or()?;
            self.expect(Token::RParen)?;
            return Ok(inner);
        }
        self.parse_term()
    }

    fn parse_term(&mut self) -> Result<Expr, QueryError> {
        let path = match self.next() {
            Some(token @ Token::Ident(_)) if token.is_keyword() => {
                return Err(QueryError::Syntax(format!("unexpected keyword `{token}`")));
            }
            Some(Token::Ident(path)) => path,
            Some(token) => {
                return Err(QueryError::Syntax(format!(
                    "expected a field path, found `{token}`"
                )));
            }
            None => return Err(QueryError::Syntax("unexpected end of input".into())),
        };

        if path == query::HAS && matches!(self.peek(), Some(Token::LParen)) {
            self.pos += 1;
            let target = match self.next() {
                Some(Token::Ident(target)) => target,
                _ => return Err(QueryError::Syntax("has() expects a field path".into())),
            };
            self.expect(Token::RParen)?;
            return Ok(Expr::Has(target));
        }

        let op = match self.next() {
            Some(Token::Op(op)) => op,
            _ => {
                return Err(QueryError::Syntax(format!(
                    "expected a comparison after `{path}`"
                )));
            }
        };

        let value = match self.next() {
            Some(Token::Str(s)) => Literal::Text(s),
            Some(Token::Number(n)) => n
                .parse::<f64>()
                .map(Literal::Number)
                .map_err(|_| QueryError::Syntax(format!("invalid number `{n}`")))?,
            Some(token @ Token::Ident(_)) if !token.is_keyword() => {
                Literal::Text(token.to_string())
            }
            _ => {
                return Err(QueryError::Syntax(format!(
                    "expected a value after `{path} {}`",
                    op.as_str()
                )));
            }
        };

        Ok(Expr::Compare { path, op, value })
    }
}

fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, segment| value.get(segment))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn eval(expr: &Expr, body: &Value) -> bool {
    match expr {
        Expr::And(lhs, rhs) => eval(lhs, body) && eval(rhs, body),
        Expr::Or(lhs, rhs) => eval(lhs, body) || eval(rhs, body),
        Expr::Not(inner) => !eval(inner, body),
        Expr::Has(path) => lookup(body, path).is_some_and(is_present),
        Expr::Compare { path, op, value } => match lookup(body, path) {
            Some(field) => compare(field, *op, value),
            None => *op == CompareOp::Ne,
        },
    }
}

fn compare(field: &Value, op: CompareOp, literal: &Literal) -> bool {
    let ordering = match (field, literal) {
        (Value::String(s), Literal::Text(pattern)) if pattern.contains('*') => {
            return match op {
                CompareOp::Eq => wildcard_match(pattern, s),
                CompareOp::Ne => !wildcard_match(pattern, s),
                _ => false,
            };
        }
        (Value::String(s), Literal::Text(t)) => Some(s.as_str().cmp(t.as_str())),
        (Value::String(s), Literal::Number(n)) => Some(s.as_str().cmp(n.to_string().as_str())),
        (Value::Number(num), Literal::Number(n)) => num.as_f64().and_then(|v| v.partial_cmp(n)),
        (Value::Number(num), Literal::Text(t)) => match (num.as_f64(), t.parse::<f64>()) {
            (Some(v), Ok(n)) => v.partial_cmp(&n),
            _ => None,
        },
        (Value::Bool(b), Literal::Text(t)) => t.parse::<bool>().ok().map(|v| b.cmp(&v)),
        _ => None,
    };

    match ordering {
        Some(ord) => match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        },
        None => op == CompareOp::Ne,
    }
}

/// Match `text` against a pattern where `*` stands for any run of characters.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let (first, rest_parts) = match parts.split_first() {
        Some(split) => split,
        None => return text.is_empty(),
    };
    let Some(rest) = text.strip_prefix(first) else {
        return false;
    };
    let Some((last, middle)) = rest_parts.split_last() else {
        return rest.is_empty();
    };

    let mut remaining = rest;
    for part in middle {
        match remaining.find(part) {
            Some(at) => remaining = &remaining[at + part.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last)
}

/// A parsed `field [asc|desc], ...` ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    terms: Vec<(String, bool)>,
}

impl OrderBy {
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let mut terms = Vec::new();
        for clause in text.split(',') {
            let mut words = clause.split_whitespace();
            let Some(path) = words.next() else {
                continue;
            };
            let descending = match words.next().map(str::to_ascii_lowercase).as_deref() {
                None | Some("asc") => false,
                Some("desc") => true,
                Some(other) => {
                    return Err(QueryError::Syntax(format!(
                        "invalid sort direction `{other}` for `{path}`"
                    )));
                }
            };
            if let Some(extra) = words.next() {
                return Err(QueryError::Syntax(format!(
                    "unexpected `{extra}` in order clause"
                )));
            }
            terms.push((path.to_owned(), descending));
        }
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compare two bodies. Missing fields sort first.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for (path, descending) in &self.terms {
            let ord = compare_fields(lookup(a, path), lookup(b, path));
            let ord = if *descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
