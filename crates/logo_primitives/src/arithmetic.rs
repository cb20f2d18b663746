//! SUM, DIFFERENCE, PRODUCT, QUOTIENT, REMAINDER, MODULO, POWER, EXP,
//! LOG10, LN, SQRT, INT, ROUND, FLOAT, RANDOM, RSEQ, ISEQ.
//!
//! `QUOTIENT` always true-divides; the rest promote `Int op Int -> Int`
//! via `logo_ir::Number`'s own arithmetic. These primitives compute with
//! `f64` throughout, so results that happen to be whole numbers are
//! re-expressed as `Int`.

use rand::Rng;

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{Number, Value};
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{integer, number, require_arity};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("sum", 2, -1, 2, sum);
    table.define_native("difference", 2, 2, 2, difference);
    table.define_native("product", 2, -1, 2, product);
    table.define_native("quotient", 2, 2, 2, quotient);
    table.define_native("remainder", 2, 2, 2, remainder);
    table.define_native("modulo", 2, 2, 2, modulo);
    table.define_native("power", 2, 2, 2, power);
    table.define_native("exp", 1, 1, 1, exp);
    table.define_native("log10", 1, 1, 1, log10);
    table.define_native("ln", 1, 1, 1, ln);
    table.define_native("sqrt", 1, 1, 1, sqrt);
    table.define_native("int", 1, 1, 1, int);
    table.define_native("round", 1, 1, 1, round);
    table.define_native("float", 1, 1, 1, float);
    table.define_native("random", 1, 2, 1, random);
    table.define_native("rseq", 3, 3, 3, rseq);
    table.define_native("iseq", 2, 2, 2, iseq);
}

/// Re-expresses a `f64` result as `Int` when it's whole, the way
/// `Number`'s own `Display` collapses whole floats -- keeps `(sum 2 3)`
/// printing `5` rather than `5.0`.
fn from_f64(x: f64) -> Number {
    if x.fract() == 0.0 && x.is_finite() && x.abs() < 1e15 {
        Number::Int(x as i64)
    } else {
        Number::Float(x)
    }
}

fn sum(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    let mut total = 0.0;
    for arg in &args {
        total += number("sum", arg)?.as_f64();
    }
    Ok(EvalOutcome::Value(Value::number(from_f64(total))))
}

fn difference(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("difference", &args, 2, Some(2))?;
    let a = number("difference", &args[0])?;
    let b = number("difference", &args[1])?;
    Ok(EvalOutcome::Value(Value::number(from_f64(a.as_f64() - b.as_f64()))))
}

fn product(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    let mut total = 1.0;
    for arg in &args {
        total *= number("product", arg)?.as_f64();
    }
    Ok(EvalOutcome::Value(Value::number(from_f64(total))))
}

fn quotient(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("quotient", &args, 2, Some(2))?;
    let a = number("quotient", &args[0])?;
    let b = number("quotient", &args[1])?;
    if b.is_zero() {
        return Err(LogoError::division_by_zero("quotient"));
    }
    Ok(EvalOutcome::Value(Value::float(a.as_f64() / b.as_f64())))
}

/// `abs(num1 % num2)`, sign following `num1` -- Rust's `%` (like
/// Python's) follows the divisor's sign, so the sign is fixed up
/// explicitly rather than relying on either language's native operator.
fn remainder(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("remainder", &args, 2, Some(2))?;
    let a = number("remainder", &args[0])?.as_f64();
    let b = number("remainder", &args[1])?.as_f64();
    if b == 0.0 {
        return Err(LogoError::division_by_zero("remainder"));
    }
    let absval = (a % b).abs();
    let signed = if a < 0.0 { -absval } else { absval };
    Ok(EvalOutcome::Value(Value::number(from_f64(signed))))
}

/// `abs(num1 % num2)`, sign following `num2` this time -- the one
/// difference from `REMAINDER`.
fn modulo(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("modulo", &args, 2, Some(2))?;
    let a = number("modulo", &args[0])?.as_f64();
    let b = number("modulo", &args[1])?.as_f64();
    if b == 0.0 {
        return Err(LogoError::division_by_zero("modulo"));
    }
    let absval = (a % b).abs();
    let signed = if b < 0.0 { -absval } else { absval };
    Ok(EvalOutcome::Value(Value::number(from_f64(signed))))
}

fn power(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("power", &args, 2, Some(2))?;
    let a = number("power", &args[0])?.as_f64();
    let b = number("power", &args[1])?.as_f64();
    let result = a.powf(b);
    if result.is_nan() {
        return Err(LogoError::bad_input("power", &args[0]));
    }
    Ok(EvalOutcome::Value(Value::number(from_f64(result))))
}

fn exp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("exp", &args, 1, Some(1))?;
    let n = number("exp", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(n.exp())))
}

fn log10(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("log10", &args, 1, Some(1))?;
    let n = number("log10", &args[0])?.as_f64();
    if n <= 0.0 {
        return Err(LogoError::bad_input("log10", &args[0]));
    }
    Ok(EvalOutcome::Value(Value::float(n.log10())))
}

fn ln(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("ln", &args, 1, Some(1))?;
    let n = number("ln", &args[0])?.as_f64();
    if n <= 0.0 {
        return Err(LogoError::bad_input("ln", &args[0]));
    }
    Ok(EvalOutcome::Value(Value::float(n.ln())))
}

fn sqrt(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("sqrt", &args, 1, Some(1))?;
    let n = number("sqrt", &args[0])?.as_f64();
    if n < 0.0 {
        return Err(LogoError::bad_input("sqrt", &args[0]));
    }
    Ok(EvalOutcome::Value(Value::float(n.sqrt())))
}

fn int(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("int", &args, 1, Some(1))?;
    let n = number("int", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::int(n.trunc() as i64)))
}

/// Rounds half to even (banker's rounding), not half away from zero --
/// `ROUND 2.5` gives `2`, `ROUND 0.5` gives `0`.
fn round(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("round", &args, 1, Some(1))?;
    let n = number("round", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::int(n.round_ties_even() as i64)))
}

fn float(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("float", &args, 1, Some(1))?;
    let n = number("float", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(n)))
}

/// One argument: a random integer in `[0, n)`. Two arguments: a random
/// integer in `[a, b]`, inclusive on both ends.
fn random(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("random", &args, 1, Some(2))?;
    let mut rng = rand::thread_rng();
    if args.len() == 1 {
        let n = integer("random", &args[0])?;
        if n <= 0 {
            return Err(LogoError::bad_input("random", &args[0]));
        }
        Ok(EvalOutcome::Value(Value::int(rng.gen_range(0..n))))
    } else {
        let a = integer("random", &args[0])?;
        let b = integer("random", &args[1])?;
        if a > b {
            return Err(LogoError::bad_input("random", &args[1]));
        }
        Ok(EvalOutcome::Value(Value::int(rng.gen_range(a..=b))))
    }
}

/// `count` evenly spaced samples from `frm` to `to` inclusive, via
/// linear interpolation rather than repeated addition (avoids drift).
fn rseq(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("rseq", &args, 3, Some(3))?;
    let frm = number("rseq", &args[0])?.as_f64();
    let to = number("rseq", &args[1])?.as_f64();
    let count = integer("rseq", &args[2])?;
    if count < 1 {
        return Err(LogoError::bad_input("rseq", &args[2]));
    }
    if count == 1 {
        return Ok(EvalOutcome::Value(Value::list(vec![Value::number(from_f64(frm))])));
    }
    let denom = (count - 1) as f64;
    let items = (0..count)
        .map(|i| {
            let i = i as f64;
            Value::number(from_f64((to * i + frm * (denom - i)) / denom))
        })
        .collect();
    Ok(EvalOutcome::Value(Value::list(items)))
}

/// Integer range inclusive of `to`, direction from `sign(to - frm)`.
fn iseq(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("iseq", &args, 2, Some(2))?;
    let frm = integer("iseq", &args[0])?;
    let to = integer("iseq", &args[1])?;
    let items = if frm <= to {
        (frm..=to).map(Value::int).collect()
    } else {
        (to..=frm).rev().map(Value::int).collect()
    };
    Ok(EvalOutcome::Value(Value::list(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn sum_promotes_to_float_only_when_needed() {
        let mut ctx = TestCtx::new();
        let out = sum(&mut ctx, vec![Value::int(2), Value::int(3)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::int(5)));
    }

    #[test]
    fn quotient_always_true_divides() {
        let mut ctx = TestCtx::new();
        let out = quotient(&mut ctx, vec![Value::int(6), Value::int(3)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::float(2.0)));
    }

    #[test]
    fn quotient_by_zero_is_an_error() {
        let mut ctx = TestCtx::new();
        assert!(quotient(&mut ctx, vec![Value::int(1), Value::int(0)]).is_err());
    }

    #[test]
    fn remainder_follows_dividend_sign() {
        let mut ctx = TestCtx::new();
        let out = remainder(&mut ctx, vec![Value::int(-7), Value::int(3)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::int(-1)));
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        let mut ctx = TestCtx::new();
        let out = modulo(&mut ctx, vec![Value::int(7), Value::int(-3)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::int(-2)));
    }

    #[test]
    fn round_breaks_ties_to_even() {
        let mut ctx = TestCtx::new();
        let out = round(&mut ctx, vec![Value::float(2.5)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::int(2)));
        let out = round(&mut ctx, vec![Value::float(0.5)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::int(0)));
    }

    #[test]
    fn iseq_counts_down_when_to_is_smaller() {
        let mut ctx = TestCtx::new();
        let out = iseq(&mut ctx, vec![Value::int(3), Value::int(1)]).unwrap();
        assert_eq!(
            out,
            EvalOutcome::Value(Value::list(vec![Value::int(3), Value::int(2), Value::int(1)]))
        );
    }

    #[test]
    fn rseq_interpolates_linearly() {
        let mut ctx = TestCtx::new();
        let out = rseq(&mut ctx, vec![Value::int(0), Value::int(10), Value::int(3)]).unwrap();
        assert_eq!(
            out,
            EvalOutcome::Value(Value::list(vec![Value::int(0), Value::int(5), Value::int(10)]))
        );
    }
}
