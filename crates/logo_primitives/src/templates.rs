//! The four shapes a higher-order primitive's template argument can
//! take: a bare procedure name, a qmark-form instruction list (run with
//! `?`/`?2`/... bound), a lambda form `[[names...] body]`, and a full
//! procedure-text form `[[required [opt default]... rest] body...]`.
//!
//! Every variant ultimately runs its body through
//! `PrimitiveContext::run_value_as_instructions`, so this module needs no
//! dependency on `logo_parse`'s token types.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{ListValue, Value};
use logo_proc::{EvalOutcome, PrimitiveContext, Procedure};

#[derive(Clone, Debug)]
pub enum Template {
    NamedProcedure(Procedure),
    Qmark(Value),
    Lambda(Vec<String>, Value),
    ProcedureText {
        required: Vec<String>,
        optional: Vec<(String, Value)>,
        rest: Option<String>,
        body: Value,
    },
}

/// Concatenates each item's contents (flattening one level for list items,
/// keeping word items as-is) into a single instruction-list `Value` --
/// `__extendlst`'s fold, generalized to the lambda-form's single-body case.
fn flatten_instruction_items(items: &[Value]) -> Value {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::List(l) => out.extend(l.borrow().iter().cloned()),
            Value::Word(_) => out.push(item.clone()),
        }
    }
    Value::List(ListValue::snapshot(out))
}

fn extract_define_inputs(command: &str, spec: &Value) -> LogoResult<(Vec<String>, Vec<(String, Value)>, Option<String>)> {
    let items = spec.as_list().ok_or_else(|| LogoError::wrong_kind(command, spec, "list"))?;
    let items = items.borrow();
    let mut idx = 0;
    let mut required = Vec::new();
    while idx < items.len() {
        match &items[idx] {
            Value::Word(w) => {
                required.push(w.as_str().to_string());
                idx += 1;
            }
            Value::List(_) => break,
        }
    }
    let mut optional = Vec::new();
    while idx < items.len() {
        match &items[idx] {
            Value::List(pair) if pair.len() == 2 => {
                let name = pair.borrow()[0]
                    .as_word()
                    .ok_or_else(|| LogoError::bad_input(command, &items[idx]))?
                    .as_str()
                    .to_string();
                let default = pair.borrow()[1].clone();
                optional.push((name, default));
                idx += 1;
            }
            _ => break,
        }
    }
    let rest = if idx < items.len() {
        match &items[idx] {
            Value::Word(w) => {
                idx += 1;
                Some(w.as_str().to_string())
            }
            other => return Err(LogoError::bad_input(command, other)),
        }
    } else {
        None
    };
    if idx != items.len() {
        return Err(LogoError::bad_input(command, spec));
    }
    Ok((required, optional, rest))
}

/// Builds a [`Template`] from a primitive's template argument, checking it
/// against `arg_count` (the number of data lists a caller will zip
/// together per call) the way `_create_template` validates lambda-form
/// named-slot counts and named-procedure arity.
pub fn create_template(command: &str, ctx: &mut dyn PrimitiveContext, arg_count: usize, template: &Value) -> LogoResult<Template> {
    match template {
        Value::Word(w) => {
            let name = w.as_str();
            let proc = ctx
                .procedures_ref()
                .get(name)
                .cloned()
                .ok_or_else(|| LogoError::unknown_command(name))?;
            if (arg_count as i64) < proc.min_arity() {
                return Err(LogoError::wrong_arity(command, format!("at least {}", proc.min_arity()), arg_count));
            }
            let max = proc.max_arity();
            if max != -1 && arg_count as i64 > max {
                return Err(LogoError::wrong_arity(command, format!("at most {max}"), arg_count));
            }
            Ok(Template::NamedProcedure(proc))
        }
        Value::List(items) => {
            let borrowed = items.borrow();
            if borrowed.is_empty() {
                return Err(LogoError::bad_input(command, template));
            }
            let all_sublists = borrowed.iter().all(Value::is_list);
            if all_sublists && borrowed.len() >= 2 {
                let (required, optional, rest) = extract_define_inputs(command, &borrowed[0])?;
                let body = flatten_instruction_items(&borrowed[1..]);
                return Ok(Template::ProcedureText { required, optional, rest, body });
            }
            if let Value::List(names) = &borrowed[0] {
                if names.len() != arg_count {
                    return Err(LogoError::bad_input(command, template));
                }
                let varnames: LogoResult<Vec<String>> = names
                    .borrow()
                    .iter()
                    .map(|v| v.as_word().map(|w| w.as_str().to_string()).ok_or_else(|| LogoError::bad_input(command, v)))
                    .collect();
                let body = flatten_instruction_items(&borrowed[1..]);
                return Ok(Template::Lambda(varnames?, body));
            }
            Ok(Template::Qmark(template.clone()))
        }
    }
}

impl Template {
    /// Runs the template once against one positional tuple of arguments,
    /// returning whatever `?`/named-slot-bound/procedure-call evaluation
    /// produces.
    pub fn call(&self, ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
        match self {
            Template::NamedProcedure(proc) => ctx.call_procedure(proc, args),
            Template::Qmark(body) => {
                ctx.env().push_placeholders(args);
                let result = ctx.run_value_as_instructions(body);
                ctx.env().pop_placeholders();
                result
            }
            Template::Lambda(names, body) => {
                ctx.env().push_scope();
                for (name, value) in names.iter().zip(args) {
                    ctx.env().localmake(name, value);
                }
                let result = ctx.run_value_as_instructions(body);
                ctx.env().pop_scope();
                result
            }
            Template::ProcedureText { required, optional, rest, body } => {
                ctx.env().push_scope();
                let mut iter = args.into_iter();
                for name in required {
                    let value = iter.next().ok_or_else(|| LogoError::wrong_arity("template", format!("at least {}", required.len()), 0))?;
                    ctx.env().localmake(name, value);
                }
                for (name, default) in optional {
                    let value = iter.next().unwrap_or_else(|| default.clone());
                    ctx.env().localmake(name, value);
                }
                if let Some(rest_name) = rest {
                    let remaining: Vec<Value> = iter.collect();
                    ctx.env().localmake(rest_name, Value::list(remaining));
                }
                let result = ctx.run_value_as_instructions(body);
                ctx.env().pop_scope();
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn flatten_concatenates_sublist_contents() {
        let a = Value::list(vec![Value::int(1), Value::int(2)]);
        let b = Value::list(vec![Value::int(3)]);
        let out = flatten_instruction_items(&[a, b]);
        assert_eq!(out, Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]));
    }

    #[test]
    fn qmark_template_runs_against_placeholders_via_support_stub() {
        let mut ctx = TestCtx::new();
        let body = Value::list(vec![Value::word("?")]);
        let tmpl = Template::Qmark(body);
        assert!(tmpl.call(&mut ctx, vec![Value::int(1)]).is_err());
    }
}
