//! PUSH, POP, QUEUE, DEQUEUE -- list-valued variables used as LIFO stacks
//! (`PUSH`/`POP`) or FIFO queues (`QUEUE`/`DEQUEUE`). Both add at the
//! front; they differ only in which end they remove from, per
//! `process_push`/`process_pop`/`process_queue`/`process_dequeue`.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("push", 2, 2, 2, push);
    table.define_native("pop", 1, 1, 1, pop);
    table.define_native("queue", 2, 2, 2, queue);
    table.define_native("dequeue", 1, 1, 1, dequeue);
}

fn resolve_stack(ctx: &mut dyn PrimitiveContext, command: &str, name_value: &Value) -> LogoResult<Value> {
    let name = word(command, name_value)?;
    ctx.env()
        .get_variable(&name)
        .map_err(|_| LogoError::no_value(&name))
        .and_then(|v| if v.is_list() { Ok(v) } else { Err(LogoError::not_a_list(command, &v)) })
}

fn push(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("push", &args, 2, Some(2))?;
    let stack = resolve_stack(ctx, "push", &args[0])?;
    stack.as_list().expect("checked is_list above").borrow_mut().insert(0, args[1].clone());
    Ok(EvalOutcome::Value(Value::word("")))
}

fn pop(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("pop", &args, 1, Some(1))?;
    let stack = resolve_stack(ctx, "pop", &args[0])?;
    let list = stack.as_list().expect("checked is_list above");
    if list.is_empty() {
        return Err(LogoError::empty_input("pop"));
    }
    Ok(EvalOutcome::Value(list.borrow_mut().remove(0)))
}

fn queue(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("queue", &args, 2, Some(2))?;
    let stack = resolve_stack(ctx, "queue", &args[0])?;
    stack.as_list().expect("checked is_list above").borrow_mut().insert(0, args[1].clone());
    Ok(EvalOutcome::Value(Value::word("")))
}

fn dequeue(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("dequeue", &args, 1, Some(1))?;
    let stack = resolve_stack(ctx, "dequeue", &args[0])?;
    let list = stack.as_list().expect("checked is_list above");
    if list.is_empty() {
        return Err(LogoError::empty_input("dequeue"));
    }
    let popped = list.borrow_mut().pop().expect("checked non-empty above");
    Ok(EvalOutcome::Value(popped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn push_then_pop_is_lifo() {
        let mut ctx = TestCtx::new();
        ctx.env().set_variable("s", Value::list(vec![]));
        push(&mut ctx, vec![Value::word("s"), Value::int(1)]).unwrap();
        push(&mut ctx, vec![Value::word("s"), Value::int(2)]).unwrap();
        assert_eq!(pop(&mut ctx, vec![Value::word("s")]).unwrap(), EvalOutcome::Value(Value::int(2)));
        assert_eq!(pop(&mut ctx, vec![Value::word("s")]).unwrap(), EvalOutcome::Value(Value::int(1)));
    }

    #[test]
    fn queue_then_dequeue_is_fifo() {
        let mut ctx = TestCtx::new();
        ctx.env().set_variable("q", Value::list(vec![]));
        queue(&mut ctx, vec![Value::word("q"), Value::int(1)]).unwrap();
        queue(&mut ctx, vec![Value::word("q"), Value::int(2)]).unwrap();
        assert_eq!(dequeue(&mut ctx, vec![Value::word("q")]).unwrap(), EvalOutcome::Value(Value::int(1)));
        assert_eq!(dequeue(&mut ctx, vec![Value::word("q")]).unwrap(), EvalOutcome::Value(Value::int(2)));
    }
}
