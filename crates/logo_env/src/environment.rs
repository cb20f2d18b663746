//! The interpreter's three independent stacks: scopes, `REPCOUNT` frames,
//! and template placeholder tuples.
//!
//! Modelled as a plain `Vec<Scope>` searched innermost-first: a flat
//! vector never needs two scopes to share identity, which is exactly the
//! "never reuse map identity across frames" requirement dynamic scoping
//! needs.

use crate::scope::Scope;
use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;

pub struct Environment {
    scopes: Vec<Scope>,
    repcount_stack: Vec<i64>,
    placeholder_stack: Vec<Vec<Value>>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new()],
            repcount_stack: Vec::new(),
            placeholder_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pops the innermost scope. The global scope at index 0 is never
    /// popped, per the scope-stack invariant.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// `get_variable`: search innermost to outermost; missing or
    /// explicitly unbound (via `LOCAL`) is a "no value" error.
    pub fn get_variable(&self, name: &str) -> LogoResult<Value> {
        for scope in self.scopes.iter().rev() {
            if let Some(slot) = scope.get(name) {
                return slot.clone().ok_or_else(|| LogoError::no_value(name));
            }
        }
        Err(LogoError::no_value(name))
    }

    /// `MAKE`: overwrite the binding in whichever scope already has it
    /// (bound or not), searching innermost-first; otherwise create it in
    /// the global scope.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.contains(name) {
                scope.set_bound(name, value);
                return;
            }
        }
        self.scopes[0].set_bound(name, value);
    }

    /// `LOCALMAKE`: always write to the innermost scope, shadowing any
    /// outer binding of the same name.
    pub fn localmake(&mut self, name: &str, value: Value) {
        self.innermost_mut().set_bound(name, value);
    }

    /// `LOCAL`: declare `name` in the innermost scope, unbound until a
    /// later `MAKE`/`LOCALMAKE` gives it a value.
    pub fn local(&mut self, name: &str) {
        self.innermost_mut().set_unbound(name);
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        self.scopes
            .last_mut()
            .expect("global scope is never popped")
    }

    pub fn push_repcount(&mut self, n: i64) {
        self.repcount_stack.push(n);
    }

    pub fn pop_repcount(&mut self) {
        self.repcount_stack.pop();
    }

    pub fn set_repcount(&mut self, n: i64) {
        if let Some(top) = self.repcount_stack.last_mut() {
            *top = n;
        }
    }

    /// Current `REPCOUNT`, or -1 if no frame is active.
    #[must_use]
    pub fn repcount(&self) -> i64 {
        self.repcount_stack.last().copied().unwrap_or(-1)
    }

    pub fn push_placeholders(&mut self, values: Vec<Value>) {
        self.placeholder_stack.push(values);
    }

    pub fn pop_placeholders(&mut self) {
        self.placeholder_stack.pop();
    }

    /// `?N` (0-based `index`) against the innermost placeholder frame.
    pub fn placeholder(&self, index: usize) -> LogoResult<Value> {
        let frame = self
            .placeholder_stack
            .last()
            .ok_or(LogoError::NoPlaceholder { index })?;
        frame
            .get(index)
            .cloned()
            .ok_or(LogoError::NoPlaceholder { index })
    }

    /// `true` iff every stack is back at its rest state: one (global)
    /// scope, no `REPCOUNT` frames, no placeholder frames. Checked on
    /// every top-level instruction-list boundary.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.scopes.len() == 1 && self.repcount_stack.is_empty() && self.placeholder_stack.is_empty()
    }

    /// Every bound global variable, for `SAVE`'s `; VARIABLES` section.
    /// The global scope is always `scopes[0]`, regardless of nesting depth.
    pub fn global_bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.scopes[0].bound_entries()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
