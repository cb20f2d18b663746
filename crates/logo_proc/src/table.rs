//! One registry for both primitives and `TO`-defined procedures, keyed
//! case-insensitively on the lower-cased name, with `FxHashMap`-backed
//! lookup.

use rustc_hash::FxHashMap;

use crate::context::NativeFn;
use crate::procedure::{OptionalParam, Procedure};
use logo_ir::Token;

#[derive(Debug, Default)]
pub struct ProcedureTable {
    entries: FxHashMap<String, Procedure>,
}

impl ProcedureTable {
    #[must_use]
    pub fn new() -> Self {
        ProcedureTable {
            entries: FxHashMap::default(),
        }
    }

    /// Registers or replaces a procedure under its own (lower-cased) name.
    pub fn define(&mut self, procedure: Procedure) {
        self.entries.insert(procedure.name.to_ascii_lowercase(), procedure);
    }

    pub fn define_native(&mut self, name: &str, min_arity: i64, max_arity: i64, default_arity: i64, func: NativeFn) {
        self.define(Procedure::native(name, min_arity, max_arity, default_arity, func));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_user(
        &mut self,
        name: &str,
        required_inputs: Vec<String>,
        optional_inputs: Vec<OptionalParam>,
        rest_input: Option<String>,
        default_arity_override: Option<i64>,
        body: Vec<Token>,
    ) {
        self.define(Procedure::user_defined(
            name,
            required_inputs,
            optional_inputs,
            rest_input,
            default_arity_override,
            body,
        ));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<Procedure> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of every user-defined procedure, for `POTS`/`SAVE`.
    pub fn user_defined_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|p| !p.is_native())
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EvalOutcome;
    use logo_diagnostic::LogoResult;
    use logo_ir::Value;

    fn dummy(_ctx: &mut dyn crate::context::PrimitiveContext, _args: Vec<Value>) -> LogoResult<EvalOutcome> {
        Ok(EvalOutcome::Value(Value::int(0)))
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut table = ProcedureTable::new();
        table.define_native("Forward", 1, 1, 1, dummy);
        assert!(table.contains("FORWARD"));
        assert!(table.contains("forward"));
        assert!(table.get("fOrWaRd").is_some());
    }

    #[test]
    fn defining_twice_replaces_the_entry() {
        let mut table = ProcedureTable::new();
        table.define_native("fd", 1, 1, 1, dummy);
        assert_eq!(table.len(), 1);
        table.define_user("fd", vec!["x".to_string()], vec![], None, None, vec![]);
        assert_eq!(table.len(), 1);
        assert!(!table.get("fd").unwrap().is_native());
    }

    #[test]
    fn user_defined_names_excludes_natives() {
        let mut table = ProcedureTable::new();
        table.define_native("fd", 1, 1, 1, dummy);
        table.define_user("square", vec![], vec![], None, None, vec![]);
        let names: Vec<&str> = table.user_defined_names().collect();
        assert_eq!(names, vec!["square"]);
    }
}
