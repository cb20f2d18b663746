//! Control flow and the higher-order template primitives: IF, IFELSE,
//! COND, CASE, RUN, RUNRESULT, STOP, OUTPUT, IGNORE, WAIT, REPEAT, FOR,
//! WHILE, UNTIL, DO.WHILE, DO.UNTIL, CASCADE, FOREACH, MAP, MAP.SE,
//! FILTER, FIND, REDUCE.
//!
//! Every body argument is a `Value::List` run through
//! `PrimitiveContext::run_value_as_instructions`, the same round trip
//! the whole family shares.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{unwrap_outcome, EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{boolean, integer, list, number, require_arity, word};
use crate::templates::create_template;
use crate::words_lists::sentence_flatten;

pub fn register(table: &mut ProcedureTable) {
    table.define_native("if", 2, 3, 2, if_cmd);
    table.define_native("ifelse", 3, 3, 3, ifelse);
    table.define_native("cond", 1, 1, 1, cond);
    table.define_native("case", 2, 2, 2, case);
    table.define_native("run", 1, 1, 1, run);
    table.define_native("runresult", 1, 1, 1, runresult);
    table.define_native("stop", 0, 0, 0, stop);
    table.define_native("output", 1, 1, 1, output);
    table.define_native("op", 1, 1, 1, output);
    table.define_native("ignore", 1, 1, 1, ignore);
    table.define_native("wait", 1, 1, 1, wait);
    table.define_native("repeat", 2, 2, 2, repeat);
    table.define_native("for", 2, 2, 2, for_cmd);
    table.define_native("while", 2, 2, 2, while_cmd);
    table.define_native("until", 2, 2, 2, until);
    table.define_native("do.while", 2, 2, 2, do_while);
    table.define_native("do.until", 2, 2, 2, do_until);
    table.define_native("cascade", 2, -1, 2, cascade);
    table.define_native("foreach", 2, -1, 2, foreach);
    table.define_native("map", 2, -1, 2, map_cmd);
    table.define_native("map.se", 2, -1, 2, map_se);
    table.define_native("filter", 2, 2, 2, filter_cmd);
    table.define_native("find", 2, 2, 2, find_cmd);
    table.define_native("reduce", 2, 2, 2, reduce_cmd);
}

/// `tf` may itself be a list to evaluate, or a plain `true`/`false` word --
/// shared by `IF`/`IFELSE`/`WHILE`/`UNTIL`/`DO.WHILE`/`DO.UNTIL`.
fn resolve_bool(ctx: &mut dyn PrimitiveContext, command: &str, tf: &Value) -> LogoResult<EvalOutcome> {
    if tf.is_list() {
        ctx.run_value_as_instructions(tf)
    } else {
        Ok(EvalOutcome::Value(tf.clone()))
    }
}

fn if_cmd(ctx: &mut dyn PrimitiveContext, mut args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("if", &args, 2, Some(3))?;
    let else_branch = if args.len() == 3 { Some(args.remove(2)) } else { None };
    let then_branch = args.remove(1);
    let tf_value = unwrap_outcome!(resolve_bool(ctx, "if", &args[0])?);
    let tf = boolean("if", &tf_value)?;
    if tf {
        ctx.run_value_as_instructions(&then_branch)
    } else if let Some(branch) = else_branch {
        ctx.run_value_as_instructions(&branch)
    } else {
        Ok(EvalOutcome::Value(Value::word("")))
    }
}

fn ifelse(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("ifelse", &args, 3, Some(3))?;
    let tf_value = unwrap_outcome!(resolve_bool(ctx, "ifelse", &args[0])?);
    let tf = boolean("ifelse", &tf_value)?;
    if tf {
        ctx.run_value_as_instructions(&args[1])
    } else {
        ctx.run_value_as_instructions(&args[2])
    }
}

/// Runs the first clause whose guard is `true` or whose guard word is
/// `else` -- `process_cond`.
fn cond(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("cond", &args, 1, Some(1))?;
    let clauses = list("cond", &args[0])?;
    for clause in clauses.borrow().iter() {
        let items = list("cond", clause)?;
        let items = items.borrow();
        if items.len() < 2 {
            return Err(LogoError::bad_input("cond", clause));
        }
        let guard = &items[0];
        let matched = match guard.as_word() {
            Some(w) if w.as_str().eq_ignore_ascii_case("else") => true,
            _ => {
                let result = unwrap_outcome!(resolve_bool(ctx, "cond", guard)?);
                boolean("cond", &result)?
            }
        };
        if matched {
            let body = Value::list(items[1..].to_vec());
            return ctx.run_value_as_instructions(&body);
        }
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// Returns the matched clause's second member verbatim -- not run --
/// `process_case`.
fn case(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("case", &args, 2, Some(2))?;
    let value = &args[0];
    let clauses = list("case", &args[1])?;
    for clause in clauses.borrow().iter() {
        let items = list("case", clause)?;
        let items = items.borrow();
        if items.len() != 2 {
            return Err(LogoError::bad_input("case", clause));
        }
        let guard = &items[0];
        let matched = match guard {
            Value::Word(w) if w.as_str().eq_ignore_ascii_case("else") => true,
            Value::List(l) => l.borrow().iter().any(|item| item == value),
            _ => false,
        };
        if matched {
            return Ok(EvalOutcome::Value(items[1].clone()));
        }
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn run(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("run", &args, 1, Some(1))?;
    ctx.run_value_as_instructions(&args[0])
}

/// `RUN`, wrapped so an `OUTPUT` becomes a singleton list and "nothing"
/// becomes an empty list -- `process_runresult`.
fn runresult(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("runresult", &args, 1, Some(1))?;
    let outcome = ctx.run_value_as_instructions(&args[0])?;
    let wrapped = match outcome {
        EvalOutcome::Value(_) => Value::list(vec![]),
        EvalOutcome::Output(v) => Value::list(vec![v]),
        signal @ (EvalOutcome::Stop | EvalOutcome::Halt) => return Ok(signal),
    };
    Ok(EvalOutcome::Value(wrapped))
}

fn stop(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("stop", &args, 0, Some(0))?;
    Ok(EvalOutcome::Stop)
}

fn output(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("output", &args, 1, Some(1))?;
    Ok(EvalOutcome::Output(args[0].clone()))
}

fn ignore(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("ignore", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(Value::word("")))
}

fn wait(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("wait", &args, 1, Some(1))?;
    let ticks = number("wait", &args[0])?.as_f64();
    let deadline = std::time::Duration::from_secs_f64((ticks / 60.0).max(0.0));
    let start = std::time::Instant::now();
    loop {
        ctx.turtle().process_events();
        if start.elapsed() >= deadline {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10).min(deadline.saturating_sub(start.elapsed())));
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn repeat(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("repeat", &args, 2, Some(2))?;
    let count = integer("repeat", &args[0])?;
    let body = &args[1];
    if !body.is_list() {
        return Err(LogoError::not_a_list("repeat", body));
    }
    ctx.env().push_repcount(0);
    let result = (|| {
        for n in 1..=count {
            ctx.env().set_repcount(n);
            unwrap_outcome!(ctx.run_value_as_instructions(body)?);
        }
        Ok(EvalOutcome::Value(Value::word("")))
    })();
    ctx.env().pop_repcount();
    result
}

/// `[counter start limit step?]` -- `process_for`.
fn for_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("for", &args, 2, Some(2))?;
    let control = list("for", &args[0])?;
    let body = &args[1];
    if !body.is_list() {
        return Err(LogoError::not_a_list("for", body));
    }
    let control = control.borrow();
    if control.len() != 3 && control.len() != 4 {
        return Err(LogoError::bad_input("for", &args[0]));
    }
    let counter = word("for", &control[0])?;
    let start = number("for", &unwrap_outcome!(resolve_bool(ctx, "for", &control[1])?))?.as_f64();
    let limit = number("for", &unwrap_outcome!(resolve_bool(ctx, "for", &control[2])?))?.as_f64();
    let step = if control.len() == 4 {
        number("for", &unwrap_outcome!(resolve_bool(ctx, "for", &control[3])?))?.as_f64()
    } else if start <= limit {
        1.0
    } else {
        -1.0
    };
    drop(control);
    ctx.env().push_scope();
    let mut current = start;
    let result = (|| {
        loop {
            let done = if step >= 0.0 { current > limit } else { current < limit };
            if done {
                break;
            }
            ctx.env().localmake(&counter, Value::float(current));
            unwrap_outcome!(ctx.run_value_as_instructions(body)?);
            current += step;
        }
        Ok(EvalOutcome::Value(Value::word("")))
    })();
    ctx.env().pop_scope();
    result
}

fn while_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("while", &args, 2, Some(2))?;
    loop {
        let tf = unwrap_outcome!(resolve_bool(ctx, "while", &args[0])?);
        if !boolean("while", &tf)? {
            break;
        }
        unwrap_outcome!(ctx.run_value_as_instructions(&args[1])?);
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn until(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("until", &args, 2, Some(2))?;
    loop {
        let tf = unwrap_outcome!(resolve_bool(ctx, "until", &args[0])?);
        if boolean("until", &tf)? {
            break;
        }
        unwrap_outcome!(ctx.run_value_as_instructions(&args[1])?);
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn do_while(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("do.while", &args, 2, Some(2))?;
    loop {
        unwrap_outcome!(ctx.run_value_as_instructions(&args[0])?);
        let tf = unwrap_outcome!(resolve_bool(ctx, "do.while", &args[1])?);
        if !boolean("do.while", &tf)? {
            break;
        }
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

fn do_until(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("do.until", &args, 2, Some(2))?;
    loop {
        unwrap_outcome!(ctx.run_value_as_instructions(&args[0])?);
        let tf = unwrap_outcome!(resolve_bool(ctx, "do.until", &args[1])?);
        if boolean("do.until", &tf)? {
            break;
        }
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `endtest` `[template startvalue]...` [finaltemplate] -- each round binds
/// `?1..?k` to the running values and re-runs every template, until
/// `endtest` (an integer repetition count or a `[...]` test) is satisfied
/// -- `process_cascade`.
fn cascade(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("cascade", &args, 2, None)?;
    let endtest = args[0].clone();
    let rest = &args[1..];
    let (pairs, final_template) = if rest.len() % 2 == 1 {
        (&rest[..rest.len() - 1], Some(rest.last().expect("odd-length checked above").clone()))
    } else {
        (rest, None)
    };
    let templates: Vec<Value> = pairs.iter().step_by(2).cloned().collect();
    let mut results: Vec<Value> = pairs.iter().skip(1).step_by(2).cloned().collect();

    ctx.env().push_repcount(0);
    let outcome = (|| {
        let mut repcount: i64 = 0;
        loop {
            repcount += 1;
            ctx.env().set_repcount(repcount);
            let done = match &endtest {
                Value::Word(_) => repcount > integer("cascade", &endtest)?,
                Value::List(_) => boolean("cascade", &unwrap_outcome!(resolve_bool(ctx, "cascade", &endtest)?))?,
            };
            if done {
                break;
            }
            let snapshot = results.clone();
            ctx.env().push_placeholders(snapshot);
            for (slot, template) in results.iter_mut().zip(&templates) {
                *slot = unwrap_outcome!(ctx.run_value_as_instructions(template)?);
            }
            ctx.env().pop_placeholders();
        }
        match final_template {
            None => Ok(EvalOutcome::Value(results.into_iter().next().unwrap_or_else(|| Value::word("")))),
            Some(template) => {
                ctx.env().push_placeholders(results);
                let result = ctx.run_value_as_instructions(&template);
                ctx.env().pop_placeholders();
                result
            }
        }
    })();
    ctx.env().pop_repcount();
    outcome
}

fn data_lists<'a>(command: &str, args: &'a [Value]) -> LogoResult<(&'a Value, Vec<Vec<Value>>)> {
    let template = &args[0];
    let lists: LogoResult<Vec<Vec<Value>>> =
        args[1..].iter().map(|v| list(command, v).map(|l| l.borrow().clone())).collect();
    let lists = lists?;
    if let Some(len) = lists.first().map(Vec::len) {
        if lists.iter().any(|l| l.len() != len) {
            return Err(LogoError::mismatched_list_lengths(command));
        }
    }
    Ok((template, lists))
}

fn foreach(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("foreach", &args, 2, None)?;
    let template_arg = args.last().expect("checked arity above").clone();
    let list_args = &args[..args.len() - 1];
    let lists: LogoResult<Vec<Vec<Value>>> = list_args.iter().map(|v| list("foreach", v).map(|l| l.borrow().clone())).collect();
    let lists = lists?;
    let len = lists.first().map_or(0, Vec::len);
    if lists.iter().any(|l| l.len() != len) {
        return Err(LogoError::mismatched_list_lengths("foreach"));
    }
    let template = create_template("foreach", ctx, lists.len(), &template_arg)?;
    let mut last = Value::word("");
    ctx.env().push_repcount(0);
    let result = (|| {
        for n in 0..len {
            ctx.env().set_repcount((n + 1) as i64);
            let tuple: Vec<Value> = lists.iter().map(|l| l[n].clone()).collect();
            last = unwrap_outcome!(template.call(ctx, tuple)?);
        }
        Ok(EvalOutcome::Value(last.clone()))
    })();
    ctx.env().pop_repcount();
    result
}

fn map_like(command: &str, ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<Vec<Value>> {
    require_arity(command, &args, 2, None)?;
    let (template_arg, lists) = data_lists(command, &args)?;
    let template_arg = template_arg.clone();
    let len = lists.first().map_or(0, Vec::len);
    let template = create_template(command, ctx, lists.len(), &template_arg)?;
    let mut out = Vec::with_capacity(len);
    ctx.env().push_repcount(0);
    let result: LogoResult<()> = (|| {
        for n in 0..len {
            ctx.env().set_repcount((n + 1) as i64);
            let tuple: Vec<Value> = lists.iter().map(|l| l[n].clone()).collect();
            match template.call(ctx, tuple)? {
                EvalOutcome::Value(v) | EvalOutcome::Output(v) => out.push(v),
                EvalOutcome::Stop | EvalOutcome::Halt => break,
            }
        }
        Ok(())
    })();
    ctx.env().pop_repcount();
    result?;
    Ok(out)
}

fn map_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let out = map_like("map", ctx, args)?;
    Ok(EvalOutcome::Value(Value::list(out)))
}

fn map_se(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let out = map_like("map.se", ctx, args)?;
    Ok(EvalOutcome::Value(sentence_flatten(out)))
}

fn filter_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("filter", &args, 2, Some(2))?;
    let items = list("filter", &args[1])?.borrow().clone();
    let template = create_template("filter", ctx, 1, &args[0])?;
    let mut out = Vec::new();
    for (n, item) in items.into_iter().enumerate() {
        ctx.env().push_repcount(0);
        ctx.env().set_repcount((n + 1) as i64);
        let outcome = template.call(ctx, vec![item.clone()]);
        ctx.env().pop_repcount();
        match unwrap_outcome!(outcome?) {
            v if v == Value::boolean(true) => out.push(item),
            v if v == Value::boolean(false) => {}
            _ => return Err(LogoError::other("FILTER template must return either true or false.")),
        }
    }
    Ok(EvalOutcome::Value(Value::list(out)))
}

fn find_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("find", &args, 2, Some(2))?;
    let items = list("find", &args[1])?.borrow().clone();
    let template = create_template("find", ctx, 1, &args[0])?;
    for (n, item) in items.into_iter().enumerate() {
        ctx.env().push_repcount(0);
        ctx.env().set_repcount((n + 1) as i64);
        let outcome = template.call(ctx, vec![item.clone()]);
        ctx.env().pop_repcount();
        match unwrap_outcome!(outcome?) {
            v if v == Value::boolean(true) => return Ok(EvalOutcome::Value(item)),
            v if v == Value::boolean(false) => {}
            _ => return Err(LogoError::other("FIND template must return either true or false.")),
        }
    }
    Ok(EvalOutcome::Value(Value::list(vec![])))
}

fn reduce_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("reduce", &args, 2, Some(2))?;
    let items = list("reduce", &args[1])?.borrow().clone();
    if items.len() == 1 {
        return Ok(EvalOutcome::Value(items.into_iter().next().expect("checked len == 1 above")));
    }
    let template = create_template("reduce", ctx, 2, &args[0])?;
    let mut items = items.into_iter();
    let mut accumulator = items.next().ok_or_else(|| LogoError::empty_input("reduce"))?;
    for item in items {
        accumulator = unwrap_outcome!(template.call(ctx, vec![item, accumulator])?);
    }
    Ok(EvalOutcome::Value(accumulator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn if_runs_then_branch_when_true() {
        let mut ctx = TestCtx::new();
        let out = if_cmd(
            &mut ctx,
            vec![Value::boolean(true), Value::list(vec![Value::word("output"), Value::int(1)])],
        );
        assert!(out.is_err());
    }

    #[test]
    fn case_returns_matched_value_unrun() {
        let mut ctx = TestCtx::new();
        let clauses = Value::list(vec![
            Value::list(vec![Value::list(vec![Value::int(1)]), Value::word("one")]),
            Value::list(vec![Value::word("else"), Value::word("other")]),
        ]);
        let out = case(&mut ctx, vec![Value::int(1), clauses]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::word("one")));
    }

    #[test]
    fn stop_and_output_surface_as_signals() {
        let mut ctx = TestCtx::new();
        assert_eq!(stop(&mut ctx, vec![]).unwrap(), EvalOutcome::Stop);
        assert_eq!(output(&mut ctx, vec![Value::int(5)]).unwrap(), EvalOutcome::Output(Value::int(5)));
    }

    #[test]
    fn repeat_requires_a_list_body() {
        let mut ctx = TestCtx::new();
        assert!(repeat(&mut ctx, vec![Value::int(3), Value::word("not-a-list")]).is_err());
    }
}
