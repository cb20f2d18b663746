//! CHAR, UNICODE, LOWERCASE, UPPERCASE, QUOTED, DEC.STR.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{integer, require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("char", 1, 1, 1, char_cmd);
    table.define_native("unicode", 1, 1, 1, unicode);
    table.define_native("lowercase", 1, 1, 1, lowercase);
    table.define_native("uppercase", 1, 1, 1, uppercase);
    table.define_native("quoted", 1, 1, 1, quoted);
    table.define_native("dec.str", 1, 1, 1, dec_str);
}

fn char_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("char", &args, 1, Some(1))?;
    let code = integer("char", &args[0])?;
    let code = u32::try_from(code).map_err(|_| LogoError::bad_input("char", &args[0]))?;
    let c = char::from_u32(code).ok_or_else(|| LogoError::bad_input("char", &args[0]))?;
    Ok(EvalOutcome::Value(Value::word(c.to_string())))
}

fn unicode(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("unicode", &args, 1, Some(1))?;
    let w = word("unicode", &args[0])?;
    let mut chars = w.chars();
    let c = chars.next().ok_or_else(|| LogoError::bad_input("unicode", &args[0]))?;
    if chars.next().is_some() {
        return Err(LogoError::bad_input("unicode", &args[0]));
    }
    Ok(EvalOutcome::Value(Value::int(i64::from(u32::from(c)))))
}

fn lowercase(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("lowercase", &args, 1, Some(1))?;
    let w = word("lowercase", &args[0])?;
    Ok(EvalOutcome::Value(Value::word(w.to_lowercase())))
}

fn uppercase(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("uppercase", &args, 1, Some(1))?;
    let w = word("uppercase", &args[0])?;
    Ok(EvalOutcome::Value(Value::word(w.to_uppercase())))
}

/// Words get a leading `"` (the literal-word spelling); lists pass through
/// unchanged -- `process_quoted`.
fn quoted(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("quoted", &args, 1, Some(1))?;
    let out = match &args[0] {
        Value::Word(w) => Value::word(format!("\"{}", w.as_str())),
        Value::List(_) => args[0].clone(),
    };
    Ok(EvalOutcome::Value(out))
}

/// Renders a numeric word in its canonical decimal spelling; a non-numeric
/// word passes through unchanged -- `process_dec_str`.
fn dec_str(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("dec.str", &args, 1, Some(1))?;
    let w = args[0].as_word().ok_or_else(|| LogoError::wrong_kind("dec.str", &args[0], "word"))?;
    let out = match w.number() {
        Some(n) => Value::word(n.to_string()),
        None => args[0].clone(),
    };
    Ok(EvalOutcome::Value(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn char_and_unicode_round_trip() {
        let mut ctx = TestCtx::new();
        let c = char_cmd(&mut ctx, vec![Value::int(65)]).unwrap();
        assert_eq!(c, EvalOutcome::Value(Value::word("A")));
        let code = unicode(&mut ctx, vec![Value::word("A")]).unwrap();
        assert_eq!(code, EvalOutcome::Value(Value::int(65)));
    }

    #[test]
    fn quoted_prefixes_words_only() {
        let mut ctx = TestCtx::new();
        let q = quoted(&mut ctx, vec![Value::word("hello")]).unwrap();
        assert_eq!(q, EvalOutcome::Value(Value::word("\"hello")));
        let list = Value::list(vec![Value::int(1)]);
        let q2 = quoted(&mut ctx, vec![list.clone()]).unwrap();
        assert_eq!(q2, EvalOutcome::Value(list));
    }
}
