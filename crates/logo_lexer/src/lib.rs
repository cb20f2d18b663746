//! Lexer for Logo source text, built on `logos`: a small
//! `#[derive(Logos)]` enum for the structural/fixed tokens, with a
//! callback doing manual scanning for the one production that needs
//! more than a regex can express — the generic word run, whose
//! backslash-escape rule (`\` makes the following character literal,
//! even if it would otherwise be a delimiter) isn't expressible as a
//! single regex.
//!
//! Word-characters are letters, digits, and the punctuation
//! ``!'#$%&\,.:<=>?@^_`;`` and `"`. The infix/relational operator
//! characters (`+ - * / = < > <= >= <>`) are lexed as their own tokens
//! rather than fused into a surrounding word run; `logo_parse` performs
//! the one adjacency-sensitive fusion: a `-` with no whitespace before a
//! following word/number becomes that atom's leading minus, not a
//! standalone operator. This is resolved at the parser layer instead of
//! here because the parser already has spans to check adjacency with,
//! so this lexer stays a single, context-free pass.

use logos::Logos;
use logo_ir::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r";[^\n]*")]
enum Raw {
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r#"[A-Za-z0-9_!'#$%&,.:?@^`"\\]"#, lex_word)]
    Word(String),
}

/// One lexeme plus its source span. `Op` carries the canonical spelling of
/// the operator (always one of `+ - * / = <> < <= > >=`).
#[derive(Clone, Debug, PartialEq)]
pub enum LexKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    Op(&'static str),
    Word(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lexeme {
    pub kind: LexKind,
    pub span: Span,
}

/// Tokenize `source` into a flat list of lexemes. Comments and whitespace
/// (including newlines, which carry no significance to the grammar) are
/// dropped; there is no error variant because every byte of input either
/// matches a rule above or is folded into a word run by `lex_word` — an
/// unmatched byte can only be whitespace/control noise, which `logos`
/// already skips via the crate-level `skip` patterns.
#[must_use]
pub fn lex(source: &str) -> Vec<Lexeme> {
    let mut out = Vec::new();
    let mut lexer = Raw::lexer(source);
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let Ok(raw) = result else { continue };
        let kind = match raw {
            Raw::LBracket => LexKind::LBracket,
            Raw::RBracket => LexKind::RBracket,
            Raw::LParen => LexKind::LParen,
            Raw::RParen => LexKind::RParen,
            Raw::LtEq => LexKind::Op("<="),
            Raw::GtEq => LexKind::Op(">="),
            Raw::NotEq => LexKind::Op("<>"),
            Raw::Lt => LexKind::Op("<"),
            Raw::Gt => LexKind::Op(">"),
            Raw::Eq => LexKind::Op("="),
            Raw::Plus => LexKind::Op("+"),
            Raw::Minus => LexKind::Op("-"),
            Raw::Star => LexKind::Op("*"),
            Raw::Slash => LexKind::Op("/"),
            Raw::Word(text) => LexKind::Word(text),
        };
        out.push(Lexeme { kind, span });
    }
    out
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '!' | '\'' | '#' | '$' | '%' | '&' | ',' | '.' | ':' | '?' | '@' | '^' | '`' | '"'
        )
}

fn lex_word(lex: &mut logos::Lexer<Raw>) -> String {
    let mut text = String::new();
    let first = lex.slice().chars().next().unwrap_or('\0');
    if first == '\\' {
        if let Some(c) = lex.remainder().chars().next() {
            lex.bump(c.len_utf8());
            text.push(c);
        }
    } else {
        text.push(first);
    }
    loop {
        let rem = lex.remainder();
        let Some(c) = rem.chars().next() else { break };
        if c == '\\' {
            let rest = &rem[c.len_utf8()..];
            if let Some(escaped) = rest.chars().next() {
                lex.bump(c.len_utf8() + escaped.len_utf8());
                text.push(escaped);
            } else {
                lex.bump(c.len_utf8());
                text.push(c);
            }
        } else if is_word_continue(c) {
            lex.bump(c.len_utf8());
            text.push(c);
        } else {
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<LexKind> {
        lex(src).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn splits_brackets_and_parens() {
        assert_eq!(
            kinds("[ 1 2 ] (fd 10)"),
            vec![
                LexKind::LBracket,
                LexKind::Word("1".into()),
                LexKind::Word("2".into()),
                LexKind::RBracket,
                LexKind::LParen,
                LexKind::Word("fd".into()),
                LexKind::Word("10".into()),
                LexKind::RParen,
            ]
        );
    }

    #[test]
    fn recognizes_quote_and_colon_sigils_as_part_of_the_word() {
        assert_eq!(
            kinds(r#"make "x :y"#),
            vec![
                LexKind::Word("make".into()),
                LexKind::Word("\"x".into()),
                LexKind::Word(":y".into()),
            ]
        );
    }

    #[test]
    fn backslash_escapes_a_space_into_the_word() {
        assert_eq!(kinds(r"a\ b"), vec![LexKind::Word("a b".into())]);
    }

    #[test]
    fn semicolon_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("fd 10 ; go forward\nrt 90"),
            vec![
                LexKind::Word("fd".into()),
                LexKind::Word("10".into()),
                LexKind::Word("rt".into()),
                LexKind::Word("90".into()),
            ]
        );
    }

    #[test]
    fn operators_are_distinct_tokens() {
        assert_eq!(
            kinds("2 + 3 * 5"),
            vec![
                LexKind::Word("2".into()),
                LexKind::Op("+"),
                LexKind::Word("3".into()),
                LexKind::Op("*"),
                LexKind::Word("5".into()),
            ]
        );
    }

    #[test]
    fn relational_two_char_operators_win_over_one_char() {
        assert_eq!(kinds("<="), vec![LexKind::Op("<=")]);
        assert_eq!(kinds("<>"), vec![LexKind::Op("<>")]);
    }
}
