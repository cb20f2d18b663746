//! `TO ... END` parsing. Consumes tokens directly from the same stream
//! `process_command` is iterating, so a script that defines a procedure
//! and then calls it in the same instruction list works without a second
//! pass.
//!
//! Optional-parameter defaults are captured as raw tokens
//! (`OptionalParam::default`) rather than evaluated eagerly, so each
//! call re-evaluates a default in the caller's own scope chain.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{AtomKind, Token};
use logo_proc::OptionalParam;

use crate::evaluator::Evaluator;
use crate::token_stream::TokenStream;

pub(crate) fn parse_to(ev: &mut Evaluator, stream: &mut TokenStream) -> LogoResult<()> {
    let Some(name_token) = stream.popleft() else {
        return Err(LogoError::other("TO command requires a procedure name."));
    };
    let procedure_name = match &name_token {
        Token::Atom {
            kind: AtomKind::Command,
            text,
            ..
        } => text.clone(),
        other => {
            return Err(LogoError::bad_input(
                "to",
                &other.as_literal_value().unwrap_or(logo_ir::Value::word("")),
            ))
        }
    };

    let mut required_inputs = Vec::new();
    while let Some(Token::Atom {
        kind: AtomKind::VarRef,
        ..
    }) = stream.peek()
    {
        let Some(Token::Atom { text, .. }) = stream.popleft() else {
            unreachable!()
        };
        required_inputs.push(text);
    }

    let mut optional_inputs = Vec::new();
    loop {
        let is_optional = matches!(
            stream.peek(),
            Some(Token::ListLit { items, .. })
                if items.len() > 1
                    && matches!(items.first(), Some(Token::Atom { kind: AtomKind::VarRef, .. }))
        );
        if !is_optional {
            break;
        }
        let Some(Token::ListLit { items, .. }) = stream.popleft() else {
            unreachable!()
        };
        let mut iter = items.into_iter();
        let Some(Token::Atom { text: opt_name, .. }) = iter.next() else {
            unreachable!()
        };
        let default: Vec<Token> = iter.collect();
        optional_inputs.push(OptionalParam {
            name: opt_name,
            default,
        });
    }

    let mut rest_input = None;
    if let Some(Token::ListLit { items, .. }) = stream.peek() {
        if items.len() == 1 {
            if let Token::Atom {
                kind: AtomKind::VarRef,
                text,
                ..
            } = &items[0]
            {
                rest_input = Some(text.clone());
                stream.popleft();
            }
        }
    }

    let mut default_arity_override = None;
    if let Some(Token::Number {
        value: logo_ir::Number::Int(n),
        ..
    }) = stream.peek()
    {
        default_arity_override = Some(*n);
        stream.popleft();
    }

    let mut body = Vec::new();
    loop {
        let Some(token) = stream.popleft() else {
            return Err(LogoError::other(format!(
                "expected END to close the procedure definition `{procedure_name}`"
            )));
        };
        if is_end_atom(&token) {
            break;
        }
        body.push(token);
    }

    ev.define_user_procedure(
        &procedure_name,
        required_inputs,
        optional_inputs,
        rest_input,
        default_arity_override,
        body,
    );
    Ok(())
}

fn is_end_atom(token: &Token) -> bool {
    matches!(token, Token::Atom { kind: AtomKind::Command, text, .. } if text.eq_ignore_ascii_case("end"))
}

/// Scans a flat top-level token run for a `TO` block that never found its
/// matching `END` — used by `process_instructionlist` to decide whether
/// to buffer a partial definition and wait for a continuation line,
/// mirroring scenario 6's parse-continuation behaviour.
#[must_use]
pub(crate) fn trailing_to_without_end(tokens: &[Token]) -> Option<String> {
    let mut i = 0;
    while i < tokens.len() {
        if is_to_atom(&tokens[i]) {
            let name = match tokens.get(i + 1) {
                Some(Token::Atom {
                    kind: AtomKind::Command,
                    text,
                    ..
                }) => text.clone(),
                _ => return None,
            };
            let mut j = i + 1;
            let mut found_end = false;
            while j < tokens.len() {
                if is_end_atom(&tokens[j]) {
                    found_end = true;
                    break;
                }
                j += 1;
            }
            if !found_end {
                return Some(name);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    None
}

fn is_to_atom(token: &Token) -> bool {
    matches!(token, Token::Atom { kind: AtomKind::Command, text, .. } if text.eq_ignore_ascii_case("to"))
}
