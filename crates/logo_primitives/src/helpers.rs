//! Small argument-coercion helpers shared by every category module, so
//! each primitive's body reads as "check inputs, do the thing" instead of
//! repeating `match`es over `Value`'s two shapes.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{ListValue, Number, Value};

pub fn number(command: &str, v: &Value) -> LogoResult<Number> {
    v.as_number().ok_or_else(|| LogoError::wrong_type(command, v))
}

pub fn integer(command: &str, v: &Value) -> LogoResult<i64> {
    match number(command, v)? {
        Number::Int(i) => Ok(i),
        Number::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        Number::Float(_) => Err(LogoError::wrong_kind(command, v, "integer")),
    }
}

pub fn word(command: &str, v: &Value) -> LogoResult<String> {
    v.as_word()
        .map(|w| w.as_str().to_string())
        .ok_or_else(|| LogoError::wrong_kind(command, v, "word"))
}

pub fn list(command: &str, v: &Value) -> LogoResult<ListValue> {
    v.as_list().cloned().ok_or_else(|| LogoError::not_a_list(command, v))
}

/// Logo boolean-in-context parsing: the literal words `true`/`false`,
/// matched case-insensitively; anything else is a type error.
pub fn boolean(command: &str, v: &Value) -> LogoResult<bool> {
    match v.as_word() {
        Some(w) if w.is_true() => Ok(true),
        Some(w) if w.is_false() => Ok(false),
        _ => Err(LogoError::wrong_kind(command, v, "boolean")),
    }
}

#[must_use]
pub fn bool_value(b: bool) -> Value {
    Value::boolean(b)
}

pub fn require_arity(command: &str, args: &[Value], min: usize, max: Option<usize>) -> LogoResult<()> {
    let n = args.len();
    let ok = n >= min && max.map_or(true, |m| n <= m);
    if ok {
        Ok(())
    } else {
        let expected = match max {
            Some(m) if m == min => format!("{min}"),
            Some(m) => format!("{min}-{m}"),
            None => format!("at least {min}"),
        };
        Err(LogoError::wrong_arity(command, expected, n))
    }
}

pub fn non_empty<'a>(command: &str, v: &'a Value) -> LogoResult<&'a Value> {
    if v.is_empty() {
        Err(LogoError::empty_input(command))
    } else {
        Ok(v)
    }
}
