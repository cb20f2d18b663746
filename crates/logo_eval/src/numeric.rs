//! Arithmetic for the infix accumulator in `evaluate`. Deliberately
//! separate from `logo_parse::infix`'s constant folding (same int/float
//! promotion rules, different layer): parse-time folding and the
//! run-time term loop both reimplement `+ - * /` independently.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Number;

pub(crate) fn add(a: Number, b: Number) -> Number {
    int_preserving(a, b, i64::checked_add, |x, y| x + y)
}

pub(crate) fn sub(a: Number, b: Number) -> Number {
    int_preserving(a, b, i64::checked_sub, |x, y| x - y)
}

pub(crate) fn mul(a: Number, b: Number) -> Number {
    int_preserving(a, b, i64::checked_mul, |x, y| x * y)
}

pub(crate) fn negate(a: Number) -> Number {
    match a {
        Number::Int(i) => Number::Int(-i),
        Number::Float(f) => Number::Float(-f),
    }
}

/// `/` always performs true division, matching `QUOTIENT`.
pub(crate) fn div_true(command: &str, a: Number, b: Number) -> LogoResult<Number> {
    if b.is_zero() {
        return Err(LogoError::division_by_zero(command));
    }
    Ok(Number::Float(a.as_f64() / b.as_f64()))
}

pub(crate) fn sum_all(terms: &[Number]) -> Number {
    terms.iter().copied().fold(Number::Int(0), add)
}

fn int_preserving(
    a: Number,
    b: Number,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Number {
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        if let Some(r) = int_op(x, y) {
            return Number::Int(r);
        }
    }
    Number::Float(float_op(a.as_f64(), b.as_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_int() {
        assert_eq!(add(Number::Int(2), Number::Int(3)), Number::Int(5));
    }

    #[test]
    fn add_promotes_to_float() {
        assert_eq!(
            add(Number::Int(2), Number::Float(0.5)),
            Number::Float(2.5)
        );
    }

    #[test]
    fn div_true_is_always_float() {
        let q = div_true("quotient", Number::Int(6), Number::Int(3)).unwrap();
        assert_eq!(q, Number::Float(2.0));
    }

    #[test]
    fn div_true_rejects_zero() {
        assert!(div_true("quotient", Number::Int(1), Number::Int(0)).is_err());
    }

    #[test]
    fn overflow_promotes_to_float() {
        let r = mul(Number::Int(i64::MAX), Number::Int(2));
        assert!(matches!(r, Number::Float(_)));
    }
}
