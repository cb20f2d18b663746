//! FIRST, FIRSTS, LAST, BUTFIRST, BUTFIRSTS, BUTLAST, ITEM, COUNT, MEMBER.
//! These work uniformly over words (by character) and lists (by element).

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{ListValue, Value};
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{integer, list, non_empty, require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("first", 1, 1, 1, first);
    table.define_native("firsts", 1, 1, 1, firsts);
    table.define_native("last", 1, 1, 1, last);
    table.define_native("butfirst", 1, 1, 1, butfirst);
    table.define_native("bf", 1, 1, 1, butfirst);
    table.define_native("butfirsts", 1, 1, 1, butfirsts);
    table.define_native("bfs", 1, 1, 1, butfirsts);
    table.define_native("butlast", 1, 1, 1, butlast);
    table.define_native("bl", 1, 1, 1, butlast);
    table.define_native("item", 2, 2, 2, item);
    table.define_native("count", 1, 1, 1, count);
    table.define_native("member", 2, 2, 2, member);
}

fn first_of(command: &str, v: &Value) -> LogoResult<Value> {
    non_empty(command, v)?;
    match v {
        Value::Word(w) => {
            let c = w.as_str().chars().next().expect("checked non-empty above");
            Ok(Value::word(c.to_string()))
        }
        Value::List(l) => Ok(l.borrow()[0].clone()),
    }
}

fn last_of(command: &str, v: &Value) -> LogoResult<Value> {
    non_empty(command, v)?;
    match v {
        Value::Word(w) => {
            let c = w.as_str().chars().last().expect("checked non-empty above");
            Ok(Value::word(c.to_string()))
        }
        Value::List(l) => Ok(l.borrow().last().expect("checked non-empty above").clone()),
    }
}

fn butfirst_of(command: &str, v: &Value) -> LogoResult<Value> {
    non_empty(command, v)?;
    match v {
        Value::Word(w) => {
            let rest: String = w.as_str().chars().skip(1).collect();
            Ok(Value::word(rest))
        }
        Value::List(l) => Ok(Value::List(ListValue::snapshot(l.borrow().iter().skip(1).cloned()))),
    }
}

fn butlast_of(command: &str, v: &Value) -> LogoResult<Value> {
    non_empty(command, v)?;
    match v {
        Value::Word(w) => {
            let chars: Vec<char> = w.as_str().chars().collect();
            let rest: String = chars[..chars.len() - 1].iter().collect();
            Ok(Value::word(rest))
        }
        Value::List(l) => {
            let borrowed = l.borrow();
            let n = borrowed.len();
            Ok(Value::List(ListValue::snapshot(borrowed[..n - 1].iter().cloned())))
        }
    }
}

fn first(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("first", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(first_of("first", &args[0])?))
}

fn firsts(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("firsts", &args, 1, Some(1))?;
    let items = list("firsts", &args[0])?;
    let out: LogoResult<Vec<Value>> = items.borrow().iter().map(|item| first_of("firsts", item)).collect();
    Ok(EvalOutcome::Value(Value::List(ListValue::snapshot(out?))))
}

fn last(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("last", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(last_of("last", &args[0])?))
}

fn butfirst(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("butfirst", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(butfirst_of("butfirst", &args[0])?))
}

fn butfirsts(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("butfirsts", &args, 1, Some(1))?;
    let items = list("butfirsts", &args[0])?;
    let out: LogoResult<Vec<Value>> =
        items.borrow().iter().map(|item| butfirst_of("butfirsts", item)).collect();
    Ok(EvalOutcome::Value(Value::List(ListValue::snapshot(out?))))
}

fn butlast(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("butlast", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(butlast_of("butlast", &args[0])?))
}

fn item(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("item", &args, 2, Some(2))?;
    let index = integer("item", &args[0])?;
    if index < 1 {
        return Err(LogoError::index_out_of_range("item", index));
    }
    let i = (index - 1) as usize;
    let out = match &args[1] {
        Value::Word(w) => w
            .as_str()
            .chars()
            .nth(i)
            .map(|c| Value::word(c.to_string()))
            .ok_or_else(|| LogoError::index_out_of_range("item", index))?,
        Value::List(l) => l.borrow().get(i).cloned().ok_or_else(|| LogoError::index_out_of_range("item", index))?,
    };
    Ok(EvalOutcome::Value(out))
}

fn count(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("count", &args, 1, Some(1))?;
    Ok(EvalOutcome::Value(Value::int(args[0].len() as i64)))
}

/// `thing1` located inside `thing2`: for two words, the suffix of `thing2`
/// starting at `thing1` (empty word if absent); for a word and a list, the
/// sublist from the matching element onward (empty list if absent) --
/// `process_member`.
fn member(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("member", &args, 2, Some(2))?;
    let out = match (&args[0], &args[1]) {
        (Value::Word(_), Value::Word(w2)) => {
            let needle = word("member", &args[0])?;
            match w2.as_str().find(&needle) {
                Some(idx) => Value::word(&w2.as_str()[idx..]),
                None => Value::word(""),
            }
        }
        (_, Value::Word(_)) => Value::word(""),
        (_, Value::List(l)) => {
            let borrowed = l.borrow();
            match borrowed.iter().position(|item| *item == args[0]) {
                Some(idx) => Value::List(ListValue::snapshot(borrowed[idx..].iter().cloned())),
                None => Value::list(vec![]),
            }
        }
    };
    Ok(EvalOutcome::Value(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn first_and_last_on_words_and_lists() {
        let mut ctx = TestCtx::new();
        assert_eq!(first(&mut ctx, vec![Value::word("hello")]).unwrap(), EvalOutcome::Value(Value::word("h")));
        let l = Value::list(vec![Value::int(1), Value::int(2)]);
        assert_eq!(last(&mut ctx, vec![l]).unwrap(), EvalOutcome::Value(Value::int(2)));
    }

    #[test]
    fn butfirst_and_butlast_on_words() {
        let mut ctx = TestCtx::new();
        assert_eq!(butfirst(&mut ctx, vec![Value::word("hello")]).unwrap(), EvalOutcome::Value(Value::word("ello")));
        assert_eq!(butlast(&mut ctx, vec![Value::word("hello")]).unwrap(), EvalOutcome::Value(Value::word("hell")));
    }

    #[test]
    fn item_is_one_indexed() {
        let mut ctx = TestCtx::new();
        let l = Value::list(vec![Value::int(10), Value::int(20), Value::int(30)]);
        assert_eq!(item(&mut ctx, vec![Value::int(2), l]).unwrap(), EvalOutcome::Value(Value::int(20)));
    }

    #[test]
    fn item_zero_or_negative_is_out_of_range() {
        let mut ctx = TestCtx::new();
        let l = Value::list(vec![Value::int(10)]);
        assert!(item(&mut ctx, vec![Value::int(0), l]).is_err());
    }

    #[test]
    fn member_on_word_returns_suffix() {
        let mut ctx = TestCtx::new();
        let out = member(&mut ctx, vec![Value::word("lo"), Value::word("hello")]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::word("lo")));
    }

    #[test]
    fn member_on_list_returns_sublist_from_match() {
        let mut ctx = TestCtx::new();
        let l = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        let out = member(&mut ctx, vec![Value::int(2), l]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::list(vec![Value::int(2), Value::int(3)])));
    }
}
