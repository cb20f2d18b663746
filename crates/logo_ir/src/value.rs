//! The universal Logo data carrier: `Word` and `List`.
//!
//! Lists are reference-identity containers (`Rc<RefCell<Vec<Value>>>`) so
//! that `PUSH`/`POP`/`QUEUE`/`DEQUEUE` mutate through every alias of the
//! same list. This is the standard single-threaded interior-mutability
//! pattern for a shared, mutable handle in a tree-walking interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A numeric word's resolved value. Arithmetic promotes `Int op Int -> Int`
/// except `QUOTIENT`, which always performs floating-point division.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// Parse a Logo numeric literal: optional leading `-`, digits, optional
    /// `.` followed by digits. A `.` anywhere in the source spelling makes
    /// the literal a `Float`; otherwise it's an `Int`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Number> {
        if s.is_empty() {
            return None;
        }
        if s.contains('.') || s.contains(['e', 'E']) {
            s.parse::<f64>().ok().map(Number::Float)
        } else {
            s.parse::<i64>().ok().map(Number::Int)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() && x.abs() < 1e15 {
                    write!(f, "{x:.0}")
                } else {
                    write!(f, "{x}")
                }
            }
        }
    }
}

/// A Logo Word: a string that may carry a cached numeric identity.
///
/// Booleans are the literal words `true`/`false`, matched case-insensitively
/// wherever a command expects a boolean, but word equality itself
/// (`EQUALP`, list-element comparisons) is case-sensitive plain string
/// comparison when the operands are not both numeric.
#[derive(Clone, Debug)]
pub struct Word {
    text: Rc<str>,
    number: Option<Number>,
}

impl Word {
    #[must_use]
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        let text = text.into();
        let number = Number::parse(&text);
        Word { text, number }
    }

    #[must_use]
    pub fn from_number(n: Number) -> Self {
        let text: Rc<str> = n.to_string().into();
        Word { text, number: Some(n) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn number(&self) -> Option<Number> {
        self.number
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.number.is_some()
    }

    #[must_use]
    pub fn is_true(&self) -> bool {
        self.text.eq_ignore_ascii_case("true")
    }

    #[must_use]
    pub fn is_false(&self) -> bool {
        self.text.eq_ignore_ascii_case("false")
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.is_true() || self.is_false()
    }

    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
            _ => self.text == other.text,
        }
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Word::new(s)
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Word::new(s)
    }
}

impl From<bool> for Word {
    fn from(b: bool) -> Self {
        Word::new(if b { "true" } else { "false" })
    }
}

/// A Logo list is a shared, mutable, ordered sequence of `Value`s.
///
/// The handle is cheap to clone; cloning a `ListValue` aliases the same
/// backing `Vec`, which is exactly what `MAKE`-then-`PUSH`-through-another-
/// reference requires.
#[derive(Clone, Debug, Default)]
pub struct ListValue(Rc<RefCell<Vec<Value>>>);

impl ListValue {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        ListValue(Rc::new(RefCell::new(items)))
    }

    #[must_use]
    pub fn borrow(&self) -> std::cell::Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    #[must_use]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// A new, independently-owned list with the same elements — used by
    /// non-mutating primitives (`FPUT`, `LPUT`, `REVERSE`, `REMOVE`, ...)
    /// that must NOT alias the source list.
    #[must_use]
    pub fn snapshot(items: impl IntoIterator<Item = Value>) -> Self {
        ListValue::new(items.into_iter().collect())
    }

    /// `true` iff both handles alias the exact same backing `Vec` — the
    /// identity comparison `.EQ` needs for list operands.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        *self.0.borrow() == *other.0.borrow()
    }
}

/// What every Logo expression produces.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Word(Word),
    List(ListValue),
}

impl Value {
    #[must_use]
    pub fn word(s: impl Into<Rc<str>>) -> Self {
        Value::Word(Word::new(s))
    }

    #[must_use]
    pub fn number(n: Number) -> Self {
        Value::Word(Word::from_number(n))
    }

    #[must_use]
    pub fn int(i: i64) -> Self {
        Value::number(Number::Int(i))
    }

    #[must_use]
    pub fn float(f: f64) -> Self {
        Value::number(Number::Float(f))
    }

    #[must_use]
    pub fn boolean(b: bool) -> Self {
        Value::Word(Word::from(b))
    }

    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    #[must_use]
    pub fn datatype(&self) -> &'static str {
        match self {
            Value::Word(_) => "word",
            Value::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Value::Word(w) => Some(w),
            Value::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(l) => Some(l),
            Value::Word(_) => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        self.as_word().and_then(Word::number)
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.as_word().is_some_and(Word::is_number)
    }

    #[must_use]
    pub fn is_word(&self) -> bool {
        matches!(self, Value::Word(_))
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Value::Word(w) => w.len_chars(),
            Value::List(l) => l.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Word(w) => w.as_str().is_empty(),
            Value::List(l) => l.is_empty(),
        }
    }

    /// The printing convention used by `PRINT`/`SHOW`/`TYPE`/`SAVE`.
    ///
    /// Words print as-is; lists print space-separated, optionally
    /// bracketed. When `escape` is set, whitespace/`;`/`\`/`[`/`]` inside a
    /// word are backslash-escaped (the source-round-trip form `SAVE` uses).
    #[must_use]
    pub fn list_repr(&self, with_braces: bool, escape: bool) -> String {
        match self {
            Value::Word(w) => {
                if escape {
                    escape_word_chars(w.as_str())
                } else {
                    w.as_str().to_string()
                }
            }
            Value::List(l) => {
                let inner = l
                    .borrow()
                    .iter()
                    .map(|v| v.list_repr(true, escape))
                    .collect::<Vec<_>>()
                    .join(" ");
                if with_braces {
                    format!("[{inner}]")
                } else {
                    inner
                }
            }
        }
    }
}

fn escape_word_chars(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, ' ' | ';' | '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_words_compare_numerically_regardless_of_spelling() {
        assert_eq!(Value::word("3"), Value::word("3.0"));
        assert_eq!(Value::word("3").as_word().unwrap().number(), Some(Number::Int(3)));
    }

    #[test]
    fn non_numeric_word_equality_is_case_sensitive() {
        assert_ne!(Value::word("Hello"), Value::word("hello"));
    }

    #[test]
    fn true_false_booleans_are_case_insensitive() {
        assert!(Word::new("TRUE").is_true());
        assert!(Word::new("False").is_false());
    }

    #[test]
    fn list_values_alias_through_clone() {
        let list = ListValue::new(vec![Value::int(1)]);
        let alias = list.clone();
        alias.borrow_mut().push(Value::int(2));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn list_repr_escapes_delimiters() {
        let v = Value::word("a b;c");
        assert_eq!(v.list_repr(true, true), r"a\ b\;c");
    }

    #[test]
    fn reverse_is_involutive_via_snapshot() {
        let xs = ListValue::new(vec![Value::int(1), Value::int(2), Value::int(3)]);
        let reversed: Vec<Value> = xs.borrow().iter().rev().cloned().collect();
        let rev = ListValue::snapshot(reversed);
        let rev_rev: Vec<Value> = rev.borrow().iter().rev().cloned().collect();
        assert_eq!(*xs.borrow(), rev_rev);
    }

    proptest::proptest! {
        /// Every `i64` round-trips through `Number::Int`'s `Display` and
        /// back through `Number::parse` -- the identity the `SAVE`/`LOAD`
        /// round trip and `list_repr` both lean on.
        #[test]
        fn int_display_parse_round_trips(n in any::<i64>()) {
            let rendered = Number::Int(n).to_string();
            prop_assert_eq!(Number::parse(&rendered), Some(Number::Int(n)));
        }

        /// A word built from an integer always compares numerically equal
        /// to one built from its float spelling with a trailing `.0`,
        /// regardless of sign or magnitude.
        #[test]
        fn numeric_word_equality_ignores_int_vs_float_spelling(n in -1_000_000i64..1_000_000) {
            let as_int = Value::word(n.to_string());
            let as_float = Value::word(format!("{n}.0"));
            prop_assert_eq!(as_int, as_float);
        }
    }
}
