//! Parse-time errors.
//!
//! `ExpectedEndError` is a distinguished subcase (not just another
//! variant buried in a generic "parse failed" message) so an interactive
//! front end can tell "this input is incomplete, ask for a continuation
//! line" apart from "this input is simply malformed".

use logo_ir::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input{}", context_suffix(.context))]
    UnexpectedEof { context: Option<String> },

    #[error("expected `]` to close the list opened here")]
    UnclosedList { span: Span },

    #[error("expected `)` to close the group opened here")]
    UnclosedGroup { span: Span },

    #[error("expected EOF, but found more input")]
    ExpectedEof { span: Span },

    /// `TO ... END` reached EOF before its matching `END`. An interactive
    /// front end should append further input lines to the same buffer and
    /// retry rather than reporting this as a hard failure.
    #[error("expected END to close the procedure definition `{name}`")]
    ExpectedEnd { name: String, span: Span },

    #[error("malformed numeric literal `{text}`")]
    BadNumber { text: String, span: Span },
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(c) => format!(" while parsing {c}"),
        None => String::new(),
    }
}

impl ParseError {
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedEof { .. } => None,
            ParseError::UnclosedList { span }
            | ParseError::UnclosedGroup { span }
            | ParseError::ExpectedEof { span }
            | ParseError::ExpectedEnd { span, .. }
            | ParseError::BadNumber { span, .. } => Some(*span),
        }
    }

    /// `true` iff this is the distinguished "TO without END" case that an
    /// interactive front end should treat as "needs a continuation line".
    #[must_use]
    pub fn is_expected_end(&self) -> bool {
        matches!(self, ParseError::ExpectedEnd { .. })
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
