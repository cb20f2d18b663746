//! EQUALP, NOTEQUALP, LESSP, LESSEQUALP, GREATERP, GREATEREQUALP,
//! EMPTYP, LISTP, WORDP, NUMBERP, MEMBERP, SUBSTRINGP, BEFOREP, SHOWNP,
//! PENDOWNP, `.EQ`. Every predicate returns `true`/`false` as a `Value`
//! word.

use logo_diagnostic::LogoResult;
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{bool_value, number, require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native(".eq", 2, 2, 2, dot_eq);
    table.define_native("equalp", 2, 2, 2, equalp);
    table.define_native("equal?", 2, 2, 2, equalp);
    table.define_native("notequalp", 2, 2, 2, notequalp);
    table.define_native("notequal?", 2, 2, 2, notequalp);
    table.define_native("lessp", 2, 2, 2, lessp);
    table.define_native("less?", 2, 2, 2, lessp);
    table.define_native("lessequalp", 2, 2, 2, lessequalp);
    table.define_native("lessequal?", 2, 2, 2, lessequalp);
    table.define_native("greaterp", 2, 2, 2, greaterp);
    table.define_native("greater?", 2, 2, 2, greaterp);
    table.define_native("greaterequalp", 2, 2, 2, greaterequalp);
    table.define_native("greaterequal?", 2, 2, 2, greaterequalp);
    table.define_native("emptyp", 1, 1, 1, emptyp);
    table.define_native("empty?", 1, 1, 1, emptyp);
    table.define_native("listp", 1, 1, 1, listp);
    table.define_native("list?", 1, 1, 1, listp);
    table.define_native("wordp", 1, 1, 1, wordp);
    table.define_native("word?", 1, 1, 1, wordp);
    table.define_native("numberp", 1, 1, 1, numberp);
    table.define_native("number?", 1, 1, 1, numberp);
    table.define_native("memberp", 2, 2, 2, memberp);
    table.define_native("member?", 2, 2, 2, memberp);
    table.define_native("substringp", 2, 2, 2, substringp);
    table.define_native("substring?", 2, 2, 2, substringp);
    table.define_native("beforep", 2, 2, 2, beforep);
    table.define_native("before?", 2, 2, 2, beforep);
    table.define_native("shownp", 0, 0, 0, shownp);
    table.define_native("shown?", 0, 0, 0, shownp);
    table.define_native("pendownp", 0, 0, 0, pendownp);
    table.define_native("pendown?", 0, 0, 0, pendownp);
}

/// Reference identity for lists (`Rc::ptr_eq`); plain value equality for
/// words, since Logo words have no separate identity from their value.
fn dot_eq(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity(".eq", &args, 2, Some(2))?;
    let same = match (&args[0], &args[1]) {
        (Value::List(a), Value::List(b)) => a.ptr_eq(b),
        (a, b) => a == b,
    };
    Ok(EvalOutcome::Value(bool_value(same)))
}

fn equalp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("equalp", &args, 2, Some(2))?;
    Ok(EvalOutcome::Value(bool_value(args[0] == args[1])))
}

fn notequalp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("notequalp", &args, 2, Some(2))?;
    Ok(EvalOutcome::Value(bool_value(args[0] != args[1])))
}

fn lessp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("lessp", &args, 2, Some(2))?;
    let a = number("lessp", &args[0])?.as_f64();
    let b = number("lessp", &args[1])?.as_f64();
    Ok(EvalOutcome::Value(bool_value(a < b)))
}

fn lessequalp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("lessequalp", &args, 2, Some(2))?;
    let a = number("lessequalp", &args[0])?.as_f64();
    let b = number("lessequalp", &args[1])?.as_f64();
    Ok(EvalOutcome::Value(bool_value(a <= b)))
}

fn greaterp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("greaterp", &args, 2, Some(2))?;
    let a = number("greaterp", &args[0])?.as_f64();
    let b = number("greaterp", &args[1])?.as_f64();
    Ok(EvalOutcome::Value(bool_value(a > b)))
}

fn greaterequalp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("greaterequalp", &args, 2, Some(2))?;
    let a = number("greaterequalp", &args[0])?.as_f64();
    let b = number("greaterequalp", &args[1])?.as_f64();
    Ok(EvalOutcome::Value(bool_value(a >= b)))
}

fn emptyp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("emptyp", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(bool_value(args[0].is_empty())))
}

fn listp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("listp", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(bool_value(args[0].is_list())))
}

fn wordp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("wordp", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(bool_value(args[0].is_word())))
}

fn numberp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("numberp", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(bool_value(args[0].is_number())))
}

/// `thing1` inside `thing2`: for two words, substring presence; for a
/// word and a list, element presence -- `process_memberp`.
fn memberp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("memberp", &args, 2, Some(2))?;
    let found = match &args[1] {
        Value::List(l) => l.borrow().iter().any(|item| *item == args[0]),
        Value::Word(w) => {
            let needle = word("memberp", &args[0])?;
            w.as_str().contains(&needle)
        }
    };
    Ok(EvalOutcome::Value(bool_value(found)))
}

fn substringp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("substringp", &args, 2, Some(2))?;
    let a = word("substringp", &args[0])?;
    let b = word("substringp", &args[1])?;
    Ok(EvalOutcome::Value(bool_value(b.contains(&a))))
}

fn beforep(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("beforep", &args, 2, Some(2))?;
    let a = word("beforep", &args[0])?;
    let b = word("beforep", &args[1])?;
    Ok(EvalOutcome::Value(bool_value(a < b)))
}

fn shownp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("shownp", &args, 0, Some(0))?;
    Ok(EvalOutcome::Value(bool_value(ctx.turtle().is_shown())))
}

fn pendownp(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("pendownp", &args, 0, Some(0))?;
    Ok(EvalOutcome::Value(bool_value(ctx.turtle().is_pen_down())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn dot_eq_is_pointer_identity_for_lists() {
        let mut ctx = TestCtx::new();
        let list = Value::list(vec![Value::int(1)]);
        let alias = list.clone();
        let distinct = Value::list(vec![Value::int(1)]);
        assert_eq!(
            dot_eq(&mut ctx, vec![list.clone(), alias]).unwrap(),
            EvalOutcome::Value(bool_value(true))
        );
        assert_eq!(
            dot_eq(&mut ctx, vec![list, distinct]).unwrap(),
            EvalOutcome::Value(bool_value(false))
        );
    }

    #[test]
    fn memberp_checks_list_elements() {
        let mut ctx = TestCtx::new();
        let data = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert_eq!(
            memberp(&mut ctx, vec![Value::int(2), data.clone()]).unwrap(),
            EvalOutcome::Value(bool_value(true))
        );
        assert_eq!(
            memberp(&mut ctx, vec![Value::int(9), data]).unwrap(),
            EvalOutcome::Value(bool_value(false))
        );
    }

    #[test]
    fn beforep_is_lexicographic() {
        let mut ctx = TestCtx::new();
        let out = beforep(&mut ctx, vec![Value::word("apple"), Value::word("banana")]).unwrap();
        assert_eq!(out, EvalOutcome::Value(bool_value(true)));
    }
}
