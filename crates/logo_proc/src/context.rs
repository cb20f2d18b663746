//! The seam that breaks the natural `logo_eval` ↔ `logo_primitives` cycle:
//! both crates need each other's types (`logo_eval::Evaluator` drives
//! dispatch; `logo_primitives` supplies the native functions the table
//! calls), so the shared vocabulary — `PrimitiveContext`, `EvalOutcome`,
//! `NativeFn` — lives here instead, one layer below both, independent of
//! any one consumer crate.

use logo_diagnostic::LogoResult;
use logo_env::Environment;
use logo_ir::{Token, Value};
use logo_turtle::TurtleBackend;

use crate::procedure::Procedure;
use crate::table::ProcedureTable;

/// What evaluating a command or a command sequence produces: an ordinary
/// value, or one of the three control-flow signals (`Stop`, `Output`,
/// `Halt`).
/// Modelled as a sum type threaded through every evaluation entry point
/// rather than as panics or a second `Result` error channel — only
/// genuine failures travel through `LogoResult`'s `Err` side.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalOutcome {
    Value(Value),
    Stop,
    Output(Value),
    Halt,
}

impl EvalOutcome {
    #[must_use]
    pub fn is_signal(&self) -> bool {
        !matches!(self, EvalOutcome::Value(_))
    }

    /// The carried value, for the two outcomes that have one.
    #[must_use]
    pub fn value(self) -> Option<Value> {
        match self {
            EvalOutcome::Value(v) | EvalOutcome::Output(v) => Some(v),
            EvalOutcome::Stop | EvalOutcome::Halt => None,
        }
    }
}

/// Unwraps an `EvalOutcome`, propagating any signal out of the enclosing
/// function unchanged. The Rust idiom for "a `StopSignal`/`OutputSignal`/
/// `HaltSignal` unwinds through ordinary evaluation to its nearest
/// handler" without literally using panics for control flow.
#[macro_export]
macro_rules! unwrap_outcome {
    ($outcome:expr) => {
        match $outcome {
            $crate::EvalOutcome::Value(v) => v,
            other => return Ok(other),
        }
    };
}

pub type NativeFn = fn(&mut dyn PrimitiveContext, Vec<Value>) -> LogoResult<EvalOutcome>;

/// Everything a native primitive function needs from the running
/// interpreter. Implemented by `logo_eval::Evaluator`; primitives in
/// `logo_primitives` are written against this trait alone, so
/// `logo_primitives` never needs to depend on `logo_eval`.
pub trait PrimitiveContext {
    fn env(&mut self) -> &mut Environment;
    fn env_ref(&self) -> &Environment;

    fn procedures(&mut self) -> &mut ProcedureTable;
    fn procedures_ref(&self) -> &ProcedureTable;

    fn turtle(&mut self) -> &mut dyn TurtleBackend;

    fn script_folders(&self) -> &[String];

    fn debug_tokens(&self) -> bool;
    fn debug_primitives(&self) -> bool;
    fn debug_procs(&self) -> bool;

    /// Runs a parsed command sequence to completion -- the loop
    /// `execute_procedure` uses to run a user-defined procedure's own
    /// body. Exposed for primitives that already hold tokens rather than
    /// a `Value::List`.
    fn run_tokens(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome>;

    /// Runs a `Value::List` as code: re-renders it to source text and
    /// re-parses, then drives it through the `evaluate`-loop
    /// (`process_instructionlist`). Used by
    /// `IF`/`IFELSE`/`WHILE`/`REPEAT`/the other iteration constructs and
    /// every `?`-template and lambda-template body -- deliberately *not*
    /// `run_tokens`'s `process_commands` loop, since a bare-expression
    /// body like `[? * ?]` has no command at its head for that loop to
    /// dispatch on.
    fn run_value_as_instructions(&mut self, list: &Value) -> LogoResult<EvalOutcome>;

    /// `evaluate` over a fresh token stream built from `tokens` -- one
    /// value, honouring infix.
    fn evaluate_tokens(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome>;

    /// `execute_procedure`: dispatch to a primitive or run a user-defined
    /// procedure's body with `args` bound to its formal parameters.
    fn call_procedure(&mut self, proc: &Procedure, args: Vec<Value>) -> LogoResult<EvalOutcome>;

    /// Blocking read of one line of input, for `READLIST`. `None` at EOF.
    fn read_input_line(&mut self) -> LogoResult<Option<String>>;

    /// Parses and runs `text` as a whole script, for `LOAD`.
    fn run_source_text(&mut self, text: &str) -> LogoResult<EvalOutcome>;

    /// Parses one line of input as a quoted-mode list, for `READLIST`:
    /// wraps `text` in brackets and evaluates it the way a literal `[...]`
    /// token would be.
    fn read_list_value(&mut self, text: &str) -> LogoResult<Value>;
}
