//! SIN, COS, ARCTAN, RADSIN, RADCOS, RADARCTAN.
//!
//! `ARCTAN`/`RADARCTAN`: both the 1-argument and 2-argument forms reduce
//! to the standard inverse tangent -- the 2-argument form takes the
//! ratio `y / x`, with its `x == 0` cases spelled out explicitly.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{number, require_arity};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("sin", 1, 1, 1, sin);
    table.define_native("cos", 1, 1, 1, cos);
    table.define_native("arctan", 1, 2, 1, arctan);
    table.define_native("radsin", 1, 1, 1, radsin);
    table.define_native("radcos", 1, 1, 1, radcos);
    table.define_native("radarctan", 1, 2, 1, radarctan);
}

fn sin(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("sin", &args, 1, Some(1))?;
    let degrees = number("sin", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float((degrees * std::f64::consts::PI / 180.0).sin())))
}

fn cos(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("cos", &args, 1, Some(1))?;
    let degrees = number("cos", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float((degrees * std::f64::consts::PI / 180.0).cos())))
}

fn radsin(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("radsin", &args, 1, Some(1))?;
    let radians = number("radsin", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(radians.sin())))
}

fn radcos(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("radcos", &args, 1, Some(1))?;
    let radians = number("radcos", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(radians.cos())))
}

/// One argument: `atan(x)`, result in degrees. Two arguments (`x`, `y`):
/// `atan(y / x)` in degrees, except `x == 0` is special-cased to ±90 by
/// `y`'s sign, and `x == 0, y == 0` is a division-by-zero error.
fn arctan(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("arctan", &args, 1, Some(2))?;
    let degrees = arctan_degrees("arctan", &args)?;
    Ok(EvalOutcome::Value(Value::float(degrees)))
}

fn radarctan(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("radarctan", &args, 1, Some(2))?;
    let degrees = arctan_degrees("radarctan", &args)?;
    Ok(EvalOutcome::Value(Value::float(degrees.to_radians())))
}

fn arctan_degrees(command: &str, args: &[Value]) -> LogoResult<f64> {
    let x = number(command, &args[0])?.as_f64();
    if args.len() == 1 {
        return Ok(x.atan().to_degrees());
    }
    let y = number(command, &args[1])?.as_f64();
    if x == 0.0 {
        if y < 0.0 {
            return Ok(-90.0);
        } else if y > 0.0 {
            return Ok(90.0);
        }
        return Err(LogoError::division_by_zero(command));
    }
    Ok((y / x).atan().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;
    use pretty_assertions::assert_eq;

    #[test]
    fn sin_of_ninety_degrees_is_one() {
        let mut ctx = TestCtx::new();
        let EvalOutcome::Value(v) = sin(&mut ctx, vec![Value::int(90)]).unwrap() else {
            panic!("expected a value");
        };
        assert!((v.as_number().unwrap().as_f64() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn arctan_one_arg_matches_standard_atan() {
        let mut ctx = TestCtx::new();
        let EvalOutcome::Value(v) = arctan(&mut ctx, vec![Value::int(1)]).unwrap() else {
            panic!("expected a value");
        };
        assert!((v.as_number().unwrap().as_f64() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn arctan_two_arg_x_zero_y_positive_is_ninety() {
        let mut ctx = TestCtx::new();
        let out = arctan(&mut ctx, vec![Value::int(0), Value::int(5)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::float(90.0)));
    }

    #[test]
    fn arctan_two_arg_negative_x_uses_ratio_not_atan2() {
        let mut ctx = TestCtx::new();
        let EvalOutcome::Value(v) = arctan(&mut ctx, vec![Value::int(-1), Value::int(1)]).unwrap()
        else {
            panic!("expected a value");
        };
        // atan(1 / -1) = -45°, not atan2(1, -1) = 135°.
        assert!((v.as_number().unwrap().as_f64() - -45.0).abs() < 1e-9);
    }

    #[test]
    fn arctan_two_arg_x_zero_y_zero_is_division_by_zero() {
        let mut ctx = TestCtx::new();
        assert!(arctan(&mut ctx, vec![Value::int(0), Value::int(0)]).is_err());
    }
}
