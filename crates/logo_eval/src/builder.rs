//! Fluent builder for `Evaluator`, in the style of `InterpreterBuilder`:
//! `Option<T>` fields with `#[must_use]` setters, resolved to defaults in
//! `build()`.

use std::io::{self, BufRead};

use logo_env::Environment;
use logo_proc::ProcedureTable;
use logo_turtle::{NullBackend, TurtleBackend};

use crate::evaluator::Evaluator;

pub struct EvaluatorBuilder {
    env: Option<Environment>,
    procedures: Option<ProcedureTable>,
    turtle: Option<Box<dyn TurtleBackend>>,
    script_folders: Vec<String>,
    input: Option<Box<dyn BufRead>>,
    debug_tokens: bool,
    debug_primitives: bool,
    debug_procs: bool,
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        EvaluatorBuilder {
            env: None,
            procedures: None,
            turtle: None,
            script_folders: Vec::new(),
            input: None,
            debug_tokens: false,
            debug_primitives: false,
            debug_procs: false,
        }
    }

    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub fn procedures(mut self, procedures: ProcedureTable) -> Self {
        self.procedures = Some(procedures);
        self
    }

    #[must_use]
    pub fn turtle(mut self, turtle: Box<dyn TurtleBackend>) -> Self {
        self.turtle = Some(turtle);
        self
    }

    #[must_use]
    pub fn script_folders(mut self, folders: Vec<String>) -> Self {
        self.script_folders = folders;
        self
    }

    #[must_use]
    pub fn input(mut self, input: Box<dyn BufRead>) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn debug_tokens(mut self, value: bool) -> Self {
        self.debug_tokens = value;
        self
    }

    #[must_use]
    pub fn debug_primitives(mut self, value: bool) -> Self {
        self.debug_primitives = value;
        self
    }

    #[must_use]
    pub fn debug_procs(mut self, value: bool) -> Self {
        self.debug_procs = value;
        self
    }

    #[must_use]
    pub fn build(self) -> Evaluator {
        let procedures = self.procedures.unwrap_or_else(|| {
            let mut table = ProcedureTable::new();
            logo_primitives::register_all(&mut table);
            table
        });
        Evaluator::from_parts(
            self.env.unwrap_or_default(),
            procedures,
            self.turtle
                .unwrap_or_else(|| Box::new(NullBackend::new())),
            self.script_folders,
            self.input
                .unwrap_or_else(|| Box::new(io::BufReader::new(io::stdin()))),
            self.debug_tokens,
            self.debug_primitives,
            self.debug_procs,
        )
    }
}
