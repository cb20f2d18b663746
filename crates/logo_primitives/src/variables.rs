//! MAKE, LOCAL, LOCALMAKE, THING.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("make", 2, 2, 2, make);
    table.define_native("local", 1, -1, 1, local);
    table.define_native("localmake", 2, 2, 2, localmake);
    table.define_native("thing", 1, 1, 1, thing);
}

/// `MAKE` searches existing scopes innermost-first and falls back to
/// global; `LOCALMAKE` always writes to the innermost scope. The split
/// is resolved at the `Environment` layer.
fn make(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("make", &args, 2, Some(2))?;
    let name = word("make", &args[0])?;
    ctx.env().set_variable(&name, args[1].clone());
    Ok(EvalOutcome::Value(Value::word("")))
}

fn localmake(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("localmake", &args, 2, Some(2))?;
    let name = word("localmake", &args[0])?;
    ctx.env().localmake(&name, args[1].clone());
    Ok(EvalOutcome::Value(Value::word("")))
}

/// A single word, a single list of words, or several bare words -- each
/// name is declared unbound in the innermost scope -- `process_local`.
fn local(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("local", &args, 1, None)?;
    let names: Vec<String> = if args.len() == 1 {
        match &args[0] {
            Value::Word(w) => vec![w.as_str().to_string()],
            Value::List(l) => l
                .borrow()
                .iter()
                .map(|v| word("local", v))
                .collect::<LogoResult<Vec<String>>>()?,
        }
    } else {
        args.iter().map(|v| word("local", v)).collect::<LogoResult<Vec<String>>>()?
    };
    for name in names {
        ctx.env().local(&name);
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn thing(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("thing", &args, 1, Some(1))?;
    let name = word("thing", &args[0])?;
    let value = ctx.env().get_variable(&name).map_err(|_| LogoError::no_value(&name))?;
    Ok(EvalOutcome::Value(value))
}
