//! AND, OR, NOT. These are plain boolean combinators over already-evaluated
//! arguments -- the control-flow short-circuit templates used by
//! `IF`/`IFELSE` are the evaluator's job, not these primitives'.

use logo_diagnostic::LogoResult;
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{boolean, bool_value, require_arity};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("and", 2, 2, 2, and);
    table.define_native("or", 2, 2, 2, or);
    table.define_native("not", 1, 1, 1, not);
}

fn and(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("and", &args, 2, Some(2))?;
    let a = boolean("and", &args[0])?;
    let b = boolean("and", &args[1])?;
    Ok(EvalOutcome::Value(bool_value(a && b)))
}

fn or(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("or", &args, 2, Some(2))?;
    let a = boolean("or", &args[0])?;
    let b = boolean("or", &args[1])?;
    Ok(EvalOutcome::Value(bool_value(a || b)))
}

fn not(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("not", &args, 1, Some(1))?;
    let a = boolean("not", &args[0])?;
    Ok(EvalOutcome::Value(bool_value(!a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn and_is_strict_conjunction() {
        let mut ctx = TestCtx::new();
        let out = and(&mut ctx, vec![Value::boolean(true), Value::boolean(false)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(bool_value(false)));
    }

    #[test]
    fn not_flips_booleans() {
        let mut ctx = TestCtx::new();
        let out = not(&mut ctx, vec![Value::boolean(false)]).unwrap();
        assert_eq!(out, EvalOutcome::Value(bool_value(true)));
    }
}
