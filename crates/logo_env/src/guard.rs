//! RAII guards over `Environment`'s three stacks — push on construction,
//! pop on `Drop`, so every early return, `?`, or control-flow signal
//! still balances the stack: every push has a matching pop on every
//! exit path.

use std::ops::{Deref, DerefMut};

use crate::Environment;
use logo_ir::Value;

pub struct ScopeGuard<'env> {
    env: &'env mut Environment,
}

impl<'env> ScopeGuard<'env> {
    pub fn new(env: &'env mut Environment) -> Self {
        env.push_scope();
        ScopeGuard { env }
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.env.pop_scope();
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

pub struct RepcountGuard<'env> {
    env: &'env mut Environment,
}

impl<'env> RepcountGuard<'env> {
    pub fn new(env: &'env mut Environment, initial: i64) -> Self {
        env.push_repcount(initial);
        RepcountGuard { env }
    }
}

impl Drop for RepcountGuard<'_> {
    fn drop(&mut self) {
        self.env.pop_repcount();
    }
}

impl Deref for RepcountGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for RepcountGuard<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

pub struct PlaceholderGuard<'env> {
    env: &'env mut Environment,
}

impl<'env> PlaceholderGuard<'env> {
    pub fn new(env: &'env mut Environment, values: Vec<Value>) -> Self {
        env.push_placeholders(values);
        PlaceholderGuard { env }
    }
}

impl Drop for PlaceholderGuard<'_> {
    fn drop(&mut self) {
        self.env.pop_placeholders();
    }
}

impl Deref for PlaceholderGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for PlaceholderGuard<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_guard_pops_on_drop() {
        let mut env = Environment::new();
        assert_eq!(env.scope_depth(), 1);
        {
            let mut guard = ScopeGuard::new(&mut env);
            guard.localmake("x", Value::int(1));
            assert_eq!(guard.scope_depth(), 2);
        }
        assert_eq!(env.scope_depth(), 1);
    }

    #[test]
    fn scope_guard_pops_on_unwind() {
        use std::panic::{catch_unwind, AssertUnwindSafe};
        let mut env = Environment::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = ScopeGuard::new(&mut env);
            panic!("unwind through the guard");
        }));
        assert!(result.is_err());
        assert_eq!(env.scope_depth(), 1);
    }

    #[test]
    fn repcount_guard_pops_on_drop() {
        let mut env = Environment::new();
        {
            let guard = RepcountGuard::new(&mut env, 1);
            assert_eq!(guard.repcount(), 1);
        }
        assert_eq!(env.repcount(), -1);
    }

    #[test]
    fn placeholder_guard_pops_on_drop() {
        let mut env = Environment::new();
        {
            let guard = PlaceholderGuard::new(&mut env, vec![Value::int(9)]);
            assert_eq!(guard.placeholder(0).unwrap(), Value::int(9));
        }
        assert!(env.placeholder(0).is_err());
    }
}
