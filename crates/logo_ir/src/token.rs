//! What the parser emits and the evaluator consumes.
//!
//! A superset of `Value` plus structural markers, modelled as a tagged
//! variant: `Atom`, `Number`, `ListLit`, `Group`, `SpecialForm`. The
//! post-parse pass that flattens delayed infix-arithmetic nodes into
//! prefix `sum`/`difference`/`product`/`quotient` calls is a constructor
//! on this type (`Token::from_infix`, in `logo_parse`).

use crate::span::Span;
use crate::value::{Number, Value};

/// An atom's lexical flavor, distinguished at parse time so the evaluator
/// doesn't need to re-inspect the first character on every dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomKind {
    /// A bare command name or operator atom (`fd`, `+`, `<>`, ...).
    Command,
    /// `"word` — a quoted literal.
    QuotedWord,
    /// `:name` — a variable reference.
    VarRef,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A word atom: command name, `:var`, `"literal`, or bare text.
    /// `text` excludes the leading sigil (`"`/`:`) for `QuotedWord`/`VarRef`.
    Atom {
        kind: AtomKind,
        text: String,
        span: Span,
    },
    /// A numeric literal, already resolved.
    Number { value: Number, span: Span },
    /// `[ ... ]` — a literal list of tokens, content-fixed; evaluates to
    /// itself (after recursively stripping any further structure markers
    /// inside, since nested lists are quoted-mode too).
    ListLit { items: Vec<Token>, span: Span },
    /// `( ... )` where the first token is NOT a known command name —
    /// a parenthesised arithmetic/comparison expression.
    Group { items: Vec<Token>, span: Span },
    /// `( name ... )` where `name` is a command name — variable-arity
    /// call consuming everything inside the parens.
    SpecialForm {
        name: String,
        args: Vec<Token>,
        span: Span,
    },
}

impl Token {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Token::Atom { span, .. }
            | Token::Number { span, .. }
            | Token::ListLit { span, .. }
            | Token::Group { span, .. }
            | Token::SpecialForm { span, .. } => *span,
        }
    }

    #[must_use]
    pub fn command(text: impl Into<String>, span: Span) -> Self {
        Token::Atom {
            kind: AtomKind::Command,
            text: text.into(),
            span,
        }
    }

    #[must_use]
    pub fn quoted_word(text: impl Into<String>, span: Span) -> Self {
        Token::Atom {
            kind: AtomKind::QuotedWord,
            text: text.into(),
            span,
        }
    }

    #[must_use]
    pub fn var_ref(text: impl Into<String>, span: Span) -> Self {
        Token::Atom {
            kind: AtomKind::VarRef,
            text: text.into(),
            span,
        }
    }

    /// `?N` rewritten to the special form `(?, N)`.
    #[must_use]
    pub fn placeholder(n: u32, span: Span) -> Self {
        Token::SpecialForm {
            name: "?".to_string(),
            args: vec![Token::Number {
                value: Number::Int(i64::from(n)),
                span,
            }],
            span,
        }
    }

    /// `true` iff this token, read verbatim in quoted mode, already is a
    /// literal `Value` (a list-type Token may always be read as a List
    /// Value, per the §3 invariant).
    #[must_use]
    pub fn as_literal_value(&self) -> Option<Value> {
        match self {
            Token::Number { value, .. } => Some(Value::number(*value)),
            Token::Atom {
                kind: AtomKind::QuotedWord,
                text,
                ..
            } => Some(Value::word(text.as_str())),
            Token::Atom {
                kind: AtomKind::Command,
                text,
                ..
            } => Some(Value::word(text.as_str())),
            Token::ListLit { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(item.as_literal_value()?);
                }
                Some(Value::list(values))
            }
            Token::Atom {
                kind: AtomKind::VarRef,
                ..
            }
            | Token::Group { .. }
            | Token::SpecialForm { .. } => None,
        }
    }

    #[must_use]
    pub fn is_infix_operator(&self) -> bool {
        matches!(self, Token::Atom { kind: AtomKind::Command, text, .. }
            if matches!(text.as_str(), "+" | "-" | "*" | "/" | "=" | "<>" | "<" | "<=" | ">" | ">="))
    }
}
