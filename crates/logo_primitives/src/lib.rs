//! The ~160 built-in commands, grouped one module per category instead
//! of one flat file. Every primitive here is a plain `fn` matching
//! `logo_proc::NativeFn`; [`register_all`] is the one place that wires
//! names (and short aliases) to functions, a single builder pass rather
//! than scattered `lazy_static`s.

mod arithmetic;
mod conversion;
mod control;
mod helpers;
mod logical;
mod meta;
mod predicates;
mod selection;
mod stacks;
mod templates;
mod trig;
mod turtle;
mod variables;
mod words_lists;

use logo_proc::ProcedureTable;

/// Registers every built-in under its canonical name and its short
/// aliases (`fd` for `forward`, `bf` for `butfirst`, ...).
pub fn register_all(table: &mut ProcedureTable) {
    arithmetic::register(table);
    trig::register(table);
    predicates::register(table);
    words_lists::register(table);
    selection::register(table);
    conversion::register(table);
    logical::register(table);
    variables::register(table);
    stacks::register(table);
    control::register(table);
    meta::register(table);
    turtle::register(table);
}
