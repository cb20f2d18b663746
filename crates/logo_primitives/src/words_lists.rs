//! WORD, LIST, SENTENCE, FPUT, LPUT, COMBINE, REVERSE, REMOVE, REMDUP, PICK.

use rand::Rng;

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{ListValue, Value};
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};

use crate::helpers::{non_empty, require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("word", 0, -1, 0, word_cmd);
    table.define_native("list", 0, -1, 0, list_cmd);
    table.define_native("sentence", 0, -1, 0, sentence);
    table.define_native("se", 0, -1, 0, sentence);
    table.define_native("fput", 2, 2, 2, fput);
    table.define_native("lput", 2, 2, 2, lput);
    table.define_native("combine", 2, 2, 2, combine);
    table.define_native("reverse", 1, 1, 1, reverse);
    table.define_native("remove", 2, 2, 2, remove);
    table.define_native("remdup", 1, 1, 1, remdup);
    table.define_native("pick", 1, 1, 1, pick);
}

fn word_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    let mut out = String::new();
    for arg in &args {
        out.push_str(&word("word", arg)?);
    }
    Ok(EvalOutcome::Value(Value::word(out)))
}

fn list_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    Ok(EvalOutcome::Value(Value::list(args)))
}

/// Flattens list arguments one level, keeps words as single elements --
/// shared with `MAP.SE`, which runs ordinary `MAP` and then sentences the
/// results together.
pub(crate) fn sentence_flatten(args: Vec<Value>) -> Value {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Value::List(l) => out.extend(l.borrow().iter().cloned()),
            Value::Word(_) => out.push(arg),
        }
    }
    Value::list(out)
}

fn sentence(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    Ok(EvalOutcome::Value(sentence_flatten(args)))
}

fn fput(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("fput", &args, 2, Some(2))?;
    let mut items = vec![args[0].clone()];
    items.extend(args[1].as_list().ok_or_else(|| LogoError::not_a_list("fput", &args[1]))?.borrow().iter().cloned());
    Ok(EvalOutcome::Value(Value::list(items)))
}

fn lput(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("lput", &args, 2, Some(2))?;
    let mut items: Vec<Value> =
        args[1].as_list().ok_or_else(|| LogoError::not_a_list("lput", &args[1]))?.borrow().iter().cloned().collect();
    items.push(args[0].clone());
    Ok(EvalOutcome::Value(Value::list(items)))
}

fn combine(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("combine", &args, 2, Some(2))?;
    if args[1].is_list() {
        fput(ctx, args)
    } else {
        word_cmd(ctx, args)
    }
}

fn reverse(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("reverse", &args, 1, Some(1))?;
    let out = match &args[0] {
        Value::Word(w) => Value::word(w.as_str().chars().rev().collect::<String>()),
        Value::List(l) => Value::List(ListValue::snapshot(l.borrow().iter().rev().cloned())),
    };
    Ok(EvalOutcome::Value(out))
}

/// Every occurrence of `thing` removed: substring removal for words,
/// element removal for lists -- `process_remove`.
fn remove(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("remove", &args, 2, Some(2))?;
    let out = match &args[1] {
        Value::List(l) => Value::List(ListValue::snapshot(l.borrow().iter().filter(|item| **item != args[0]).cloned())),
        Value::Word(w) => {
            let needle = word("remove", &args[0])?;
            Value::word(w.as_str().replace(&needle, ""))
        }
    };
    Ok(EvalOutcome::Value(out))
}

/// First-occurrence-order deduplication, over characters for a word or
/// elements for a list -- `process_remdup`.
fn remdup(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("remdup", &args, 1, Some(1))?;
    let out = match &args[0] {
        Value::List(l) => {
            let mut seen: Vec<Value> = Vec::new();
            for item in l.borrow().iter() {
                if !seen.contains(item) {
                    seen.push(item.clone());
                }
            }
            Value::List(ListValue::snapshot(seen))
        }
        Value::Word(w) => {
            let mut seen = String::new();
            for c in w.as_str().chars() {
                if !seen.contains(c) {
                    seen.push(c);
                }
            }
            Value::word(seen)
        }
    };
    Ok(EvalOutcome::Value(out))
}

fn pick(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("pick", &args, 1, Some(1))?;
    non_empty("pick", &args[0])?;
    let mut rng = rand::thread_rng();
    let out = match &args[0] {
        Value::List(l) => {
            let borrowed = l.borrow();
            let idx = rng.gen_range(0..borrowed.len());
            borrowed[idx].clone()
        }
        Value::Word(w) => {
            let chars: Vec<char> = w.as_str().chars().collect();
            let idx = rng.gen_range(0..chars.len());
            Value::word(chars[idx].to_string())
        }
    };
    Ok(EvalOutcome::Value(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;
    use proptest::prelude::*;

    #[test]
    fn word_concatenates_words() {
        let mut ctx = TestCtx::new();
        let out = word_cmd(&mut ctx, vec![Value::word("foo"), Value::word("bar")]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::word("foobar")));
    }

    #[test]
    fn sentence_flattens_one_level() {
        let mut ctx = TestCtx::new();
        let out = sentence(
            &mut ctx,
            vec![Value::list(vec![Value::int(1), Value::int(2)]), Value::word("x")],
        )
        .unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::list(vec![Value::int(1), Value::int(2), Value::word("x")])));
    }

    #[test]
    fn fput_and_lput() {
        let mut ctx = TestCtx::new();
        let lst = Value::list(vec![Value::int(2), Value::int(3)]);
        assert_eq!(
            fput(&mut ctx, vec![Value::int(1), lst.clone()]).unwrap(),
            EvalOutcome::Value(Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]))
        );
        assert_eq!(
            lput(&mut ctx, vec![Value::int(4), lst]).unwrap(),
            EvalOutcome::Value(Value::list(vec![Value::int(2), Value::int(3), Value::int(4)]))
        );
    }

    #[test]
    fn remove_deletes_all_occurrences() {
        let mut ctx = TestCtx::new();
        let out = remove(&mut ctx, vec![Value::word("l"), Value::word("hello")]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::word("heo")));
    }

    #[test]
    fn remdup_keeps_first_occurrence_order() {
        let mut ctx = TestCtx::new();
        let lst = Value::list(vec![Value::int(1), Value::int(2), Value::int(1), Value::int(3)]);
        let out = remdup(&mut ctx, vec![lst]).unwrap();
        assert_eq!(out, EvalOutcome::Value(Value::list(vec![Value::int(1), Value::int(2), Value::int(3)])));
    }

    proptest::proptest! {
        /// `REVERSE(REVERSE(xs)) == xs` for any list of integers.
        #[test]
        fn reverse_is_involutive(xs in proptest::collection::vec(any::<i64>(), 0..16)) {
            let mut ctx = TestCtx::new();
            let list = Value::list(xs.iter().map(|n| Value::int(*n)).collect());
            let once = reverse(&mut ctx, vec![list]).unwrap().value().unwrap();
            let twice = reverse(&mut ctx, vec![once]).unwrap().value().unwrap();
            let expected = Value::list(xs.into_iter().map(Value::int).collect());
            prop_assert_eq!(twice, expected);
        }

        /// `FIRST(FPUT e xs) == e` and `BUTFIRST(FPUT e xs) == xs` for any
        /// element and any list.
        #[test]
        fn fput_first_and_butfirst_undo_each_other(
            e in any::<i64>(),
            xs in proptest::collection::vec(any::<i64>(), 0..16),
        ) {
            let mut ctx = TestCtx::new();
            let list = Value::list(xs.iter().map(|n| Value::int(*n)).collect());
            let combined = fput(&mut ctx, vec![Value::int(e), list]).unwrap().value().unwrap();
            let items = combined.as_list().unwrap().borrow().clone();
            prop_assert_eq!(items.first().cloned(), Some(Value::int(e)));
            let rest: Vec<Value> = items[1..].to_vec();
            let expected: Vec<Value> = xs.into_iter().map(Value::int).collect();
            prop_assert_eq!(rest, expected);
        }
    }
}
