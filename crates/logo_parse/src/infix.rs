//! Parse-time constant folding for infix arithmetic.
//!
//! The parser folds immediately when both operands are numeric constants
//! and otherwise leaves the flat token sequence for the evaluator's own
//! term-accumulating infix loop to resolve at run time — operands may be
//! command invocations, so the parser can't always fold. This pass only
//! ever merges two ADJACENT `Token::Number` literals straddling one of
//! `+ - * /`; it never reaches across a non-constant operand, and it
//! leaves division-by-zero for the evaluator to raise as a `LogoError`
//! rather than failing at parse time.
//!
//! Two passes, tightest precedence first (`* /` before `+ -`), matching
//! standard arithmetic precedence.

use logo_ir::{AtomKind, Number, Token};

#[must_use]
pub fn fold_constant_infix(tokens: Vec<Token>) -> Vec<Token> {
    let tokens = fold_pass(tokens, &["*", "/"]);
    fold_pass(tokens, &["+", "-"])
}

fn fold_pass(tokens: Vec<Token>, ops: &[&str]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let Token::Number { value, span } = tokens[i] else {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        };
        let mut acc = value;
        let mut acc_span = span;
        let mut j = i + 1;
        loop {
            let Some(op) = op_at(&tokens, j, ops) else { break };
            let Some(&Token::Number { value: rhs, span: rspan }) = tokens.get(j + 1) else {
                break;
            };
            let Some(folded) = apply_op(acc, op, rhs) else { break };
            acc = folded;
            acc_span = acc_span.to(rspan);
            j += 2;
        }
        out.push(Token::Number {
            value: acc,
            span: acc_span,
        });
        i = j;
    }
    out
}

fn op_at<'a>(tokens: &'a [Token], idx: usize, ops: &[&str]) -> Option<&'a str> {
    match tokens.get(idx) {
        Some(Token::Atom {
            kind: AtomKind::Command,
            text,
            ..
        }) if ops.contains(&text.as_str()) => Some(text.as_str()),
        _ => None,
    }
}

fn apply_op(lhs: Number, op: &str, rhs: Number) -> Option<Number> {
    match op {
        "+" => Some(int_preserving(lhs, rhs, |a, b| a.checked_add(b), |a, b| a + b)),
        "-" => Some(int_preserving(lhs, rhs, |a, b| a.checked_sub(b), |a, b| a - b)),
        "*" => Some(int_preserving(lhs, rhs, |a, b| a.checked_mul(b), |a, b| a * b)),
        "/" => {
            if rhs.is_zero() {
                None
            } else {
                Some(Number::Float(lhs.as_f64() / rhs.as_f64()))
            }
        }
        _ => None,
    }
}

/// `Int op Int -> Int` (falling back to `Float` on overflow), otherwise
/// `Float`.
fn int_preserving(
    lhs: Number,
    rhs: Number,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Number {
    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        if let Some(r) = int_op(a, b) {
            return Number::Int(r);
        }
    }
    Number::Float(float_op(lhs.as_f64(), rhs.as_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_ir::Span;

    fn num(n: i64) -> Token {
        Token::Number {
            value: Number::Int(n),
            span: Span::default(),
        }
    }

    fn op(text: &str) -> Token {
        Token::command(text, Span::default())
    }

    #[test]
    fn folds_precedence_correctly() {
        // 2 + 3 * 5 -> 2 + 15 -> 17
        let tokens = vec![num(2), op("+"), num(3), op("*"), num(5)];
        let folded = fold_constant_infix(tokens);
        assert_eq!(
            folded,
            vec![Token::Number {
                value: Number::Int(17),
                span: Span::default(),
            }]
        );
    }

    #[test]
    fn leaves_non_constant_operands_untouched() {
        let command = Token::command("fd", Span::default());
        let tokens = vec![num(2), op("+"), command.clone()];
        let folded = fold_constant_infix(tokens);
        assert_eq!(folded, vec![num(2), op("+"), command]);
    }

    #[test]
    fn division_by_zero_is_left_for_the_evaluator() {
        let tokens = vec![num(6), op("/"), num(0)];
        let folded = fold_constant_infix(tokens);
        assert_eq!(folded, vec![num(6), op("/"), num(0)]);
    }
}
