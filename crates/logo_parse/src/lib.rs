//! Turns Logo source text into a tree of `Token`s: atoms, lists, grouped
//! expressions, and special-form tuples, with infix arithmetic constant-
//! folded where possible.
//!
//! `TO ... END` is deliberately NOT a parser concern here — it's a
//! syntactic form the evaluator recognizes when the atom `to` appears in
//! command position, consuming subsequent already-parsed tokens itself.
//! The parser only needs to produce a correctly shaped, generic token
//! tree; `logo_eval` gives that tree procedure-definition meaning.

mod cursor;
mod infix;

use cursor::Cursor;
use logo_diagnostic::{ParseError, ParseResult};
use logo_ir::{AtomKind, Number, Span, Token};
use logo_lexer::LexKind;

pub use infix::fold_constant_infix;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stop {
    Eof,
    Bracket,
    Paren,
}

/// Parse a complete source string into a flat, top-level list of tokens.
pub fn parse(source: &str) -> ParseResult<Vec<Token>> {
    let lexemes = logo_lexer::lex(source);
    let mut cursor = Cursor::new(&lexemes);
    let tokens = parse_sequence(&mut cursor, false, Stop::Eof, None)?;
    if let Some(stray) = cursor.peek() {
        return Err(ParseError::ExpectedEof { span: stray.span });
    }
    Ok(fold_constant_infix(tokens))
}

fn parse_sequence(
    cursor: &mut Cursor<'_>,
    quoted: bool,
    stop: Stop,
    opener_span: Option<Span>,
) -> ParseResult<Vec<Token>> {
    let mut items = Vec::new();
    loop {
        let Some(lexeme) = cursor.peek() else {
            return match stop {
                Stop::Eof => Ok(items),
                Stop::Bracket => Err(ParseError::UnclosedList {
                    span: opener_span.unwrap_or_default(),
                }),
                Stop::Paren => Err(ParseError::UnclosedGroup {
                    span: opener_span.unwrap_or_default(),
                }),
            };
        };

        match &lexeme.kind {
            LexKind::RBracket if stop == Stop::Bracket => {
                cursor.bump();
                return Ok(items);
            }
            LexKind::RParen if stop == Stop::Paren => {
                cursor.bump();
                return Ok(items);
            }
            // A closer that doesn't match our own stop condition belongs to
            // an enclosing frame; leave it for that frame (or the top-level
            // leftover check) to report.
            LexKind::RBracket | LexKind::RParen => return Ok(items),

            LexKind::LBracket => {
                let open_span = lexeme.span;
                cursor.bump();
                let inner = logo_stack::ensure_sufficient_stack(|| {
                    parse_sequence(cursor, true, Stop::Bracket, Some(open_span))
                })?;
                let span = combined_span(open_span, &inner);
                items.push(Token::ListLit { items: inner, span });
            }

            LexKind::LParen => {
                let open_span = lexeme.span;
                cursor.bump();
                let inner = logo_stack::ensure_sufficient_stack(|| {
                    parse_sequence(cursor, false, Stop::Paren, Some(open_span))
                })?;
                let inner = fold_constant_infix(inner);
                let span = combined_span(open_span, &inner);
                items.push(build_group_or_special_form(inner, span));
            }

            LexKind::Op(text) => {
                let text = *text;
                if text == "-" {
                    if let Some(merged) = try_fuse_minus(cursor, lexeme.span, quoted) {
                        items.push(merged);
                        continue;
                    }
                }
                cursor.bump();
                items.push(Token::command(text, lexeme.span));
            }

            LexKind::Word(text) => {
                let text = text.clone();
                let span = lexeme.span;
                cursor.bump();
                items.push(build_atom(&text, span, quoted));
            }
        }
    }
}

/// A `-` with no whitespace before a following word becomes that atom's
/// leading minus, rather than a standalone subtraction operator. Returns
/// `None` (consuming nothing) if the minus isn't immediately followed by
/// a word lexeme.
fn try_fuse_minus(cursor: &mut Cursor<'_>, minus_span: Span, quoted: bool) -> Option<Token> {
    let minus_next = cursor.peek()?;
    debug_assert!(matches!(minus_next.kind, LexKind::Op("-")));
    let next = cursor.peek_at(1)?;
    let LexKind::Word(word_text) = &next.kind else {
        return None;
    };
    if next.span.start != minus_span.end {
        return None;
    }
    let merged_text = format!("-{word_text}");
    let span = minus_span.to(next.span);
    cursor.bump();
    cursor.bump();
    Some(build_atom(&merged_text, span, quoted))
}

fn combined_span(open: Span, inner: &[Token]) -> Span {
    inner
        .last()
        .map_or(open, |last| open.to(last.span()))
}

fn build_group_or_special_form(items: Vec<Token>, span: Span) -> Token {
    match items.first() {
        Some(Token::Atom {
            kind: AtomKind::Command,
            text,
            ..
        }) => Token::SpecialForm {
            name: text.clone(),
            args: items[1..].to_vec(),
            span,
        },
        _ => Token::Group { items, span },
    }
}

/// Classify a raw word's text into the right `Token` shape.
///
/// The `?N` rewrite applies regardless of `quoted`: a
/// template body is itself parsed as a list literal, so `?`/`?N` inside one
/// must still become the placeholder special form. The `"`/`:` sigils, by
/// contrast, are stripped only outside quoted mode — inside a list literal
/// they stay literal text, per "all inner atoms are kept as words/numbers
/// without further evaluation".
fn build_atom(text: &str, span: Span, quoted: bool) -> Token {
    if let Some(rest) = text.strip_prefix('?') {
        if rest.is_empty() {
            return Token::placeholder(1, span);
        }
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = rest.parse::<u32>() {
                return Token::placeholder(n, span);
            }
        }
    }
    if !quoted {
        if let Some(rest) = text.strip_prefix('"') {
            return Token::quoted_word(rest, span);
        }
        if let Some(rest) = text.strip_prefix(':') {
            return Token::var_ref(rest, span);
        }
    }
    match Number::parse(text) {
        Some(value) => Token::Number { value, span },
        None => Token::command(text, span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_ir::Value;

    fn parse_ok(src: &str) -> Vec<Token> {
        parse(src).unwrap_or_else(|e| panic!("parse error on {src:?}: {e}"))
    }

    #[test]
    fn arithmetic_precedence_folds_to_one_number() {
        let tokens = parse_ok("print 2 + 3 * 5");
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            tokens[1],
            Token::Number {
                value: Number::Int(17),
                span: tokens[1].span(),
            }
        );
    }

    #[test]
    fn list_literal_contents_are_not_infix_folded() {
        let tokens = parse_ok("[1 + 2]");
        let Token::ListLit { items, .. } = &tokens[0] else {
            panic!("expected a list literal");
        };
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn quoted_word_and_var_ref_sigils() {
        let tokens = parse_ok(r#"make "x :y"#);
        assert_eq!(
            tokens[1],
            Token::Atom {
                kind: AtomKind::QuotedWord,
                text: "x".into(),
                span: tokens[1].span(),
            }
        );
        assert_eq!(
            tokens[2],
            Token::Atom {
                kind: AtomKind::VarRef,
                text: "y".into(),
                span: tokens[2].span(),
            }
        );
    }

    #[test]
    fn minus_adjacent_to_a_number_is_a_negative_literal() {
        let tokens = parse_ok("fd -5");
        assert_eq!(
            tokens[1],
            Token::Number {
                value: Number::Int(-5),
                span: tokens[1].span(),
            }
        );
    }

    #[test]
    fn standalone_minus_between_whitespace_is_the_operator() {
        let tokens = parse_ok(":n - 1");
        assert!(matches!(&tokens[1], Token::Atom { kind: AtomKind::Command, text, .. } if text == "-"));
    }

    #[test]
    fn qmark_n_rewrites_to_a_placeholder_special_form() {
        let tokens = parse_ok("[? * ?2]");
        let Token::ListLit { items, .. } = &tokens[0] else {
            panic!("expected list literal");
        };
        assert!(matches!(&items[0], Token::SpecialForm { name, .. } if name == "?"));
        assert!(matches!(&items[2], Token::SpecialForm { name, .. } if name == "?"));
    }

    #[test]
    fn parenthesised_command_is_a_special_form() {
        let tokens = parse_ok("(list 1 2 3)");
        assert!(matches!(&tokens[0], Token::SpecialForm { name, args, .. } if name == "list" && args.len() == 3));
    }

    #[test]
    fn parenthesised_non_command_is_a_group() {
        let tokens = parse_ok("(1 + 2)");
        // constant-folded inside the group to a single Number, wrapped as a Group.
        let Token::Group { items, .. } = &tokens[0] else {
            panic!("expected group, got {:?}", tokens[0]);
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_literal_value(), Some(Value::int(3)));
    }

    #[test]
    fn unclosed_list_is_a_distinct_parse_error() {
        let err = parse("[1 2").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedList { .. }));
    }

    #[test]
    fn stray_closing_bracket_is_expected_eof() {
        let err = parse("fd 10]").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedEof { .. }));
    }
}
