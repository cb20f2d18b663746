//! The unified procedure record: every name in the
//! [`crate::ProcedureTable`] — primitive or `TO`-defined — is one
//! `Procedure`, differing only in what its `body` carries.

use logo_ir::Token;

use crate::context::NativeFn;

/// `[:name default-tokens]` from a `TO` parameter list. The default is
/// captured verbatim and re-evaluated at call time in the *caller's*
/// scope chain.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionalParam {
    pub name: String,
    pub default: Vec<Token>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProcedureBody {
    Native {
        min_arity: i64,
        max_arity: i64,
        default_arity: i64,
        func: NativeFn,
    },
    UserDefined {
        required_inputs: Vec<String>,
        optional_inputs: Vec<OptionalParam>,
        rest_input: Option<String>,
        default_arity_override: Option<i64>,
        body: Vec<Token>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Procedure {
    pub name: String,
    pub body: ProcedureBody,
}

impl Procedure {
    #[must_use]
    pub fn native(name: impl Into<String>, min_arity: i64, max_arity: i64, default_arity: i64, func: NativeFn) -> Self {
        Procedure {
            name: name.into(),
            body: ProcedureBody::Native {
                min_arity,
                max_arity,
                default_arity,
                func,
            },
        }
    }

    #[must_use]
    pub fn user_defined(
        name: impl Into<String>,
        required_inputs: Vec<String>,
        optional_inputs: Vec<OptionalParam>,
        rest_input: Option<String>,
        default_arity_override: Option<i64>,
        body: Vec<Token>,
    ) -> Self {
        Procedure {
            name: name.into(),
            body: ProcedureBody::UserDefined {
                required_inputs,
                optional_inputs,
                rest_input,
                default_arity_override,
                body,
            },
        }
    }

    #[must_use]
    pub fn min_arity(&self) -> i64 {
        match &self.body {
            ProcedureBody::Native { min_arity, .. } => *min_arity,
            ProcedureBody::UserDefined { required_inputs, .. } => required_inputs.len() as i64,
        }
    }

    /// -1 means unbounded (a `rest_input`, or a native varargs primitive).
    #[must_use]
    pub fn max_arity(&self) -> i64 {
        match &self.body {
            ProcedureBody::Native { max_arity, .. } => *max_arity,
            ProcedureBody::UserDefined {
                required_inputs,
                optional_inputs,
                rest_input,
                ..
            } => {
                if rest_input.is_some() {
                    -1
                } else {
                    (required_inputs.len() + optional_inputs.len()) as i64
                }
            }
        }
    }

    #[must_use]
    pub fn default_arity(&self) -> i64 {
        match &self.body {
            ProcedureBody::Native { default_arity, .. } => *default_arity,
            ProcedureBody::UserDefined {
                required_inputs,
                default_arity_override,
                ..
            } => default_arity_override.unwrap_or(required_inputs.len() as i64),
        }
    }

    #[must_use]
    pub fn accepts_arity(&self, n: usize) -> bool {
        let n = n as i64;
        let max = self.max_arity();
        n >= self.min_arity() && (max == -1 || n <= max)
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self.body, ProcedureBody::Native { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EvalOutcome;
    use logo_diagnostic::LogoResult;
    use logo_ir::Value;

    fn dummy(_ctx: &mut dyn crate::context::PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
        Ok(EvalOutcome::Value(args.into_iter().next().unwrap_or(Value::int(0))))
    }

    #[test]
    fn native_arity_comes_straight_from_its_fields() {
        let p = Procedure::native("sum", 0, -1, 2, dummy);
        assert_eq!(p.min_arity(), 0);
        assert_eq!(p.max_arity(), -1);
        assert_eq!(p.default_arity(), 2);
        assert!(p.accepts_arity(50));
    }

    #[test]
    fn user_defined_without_rest_has_bounded_max_arity() {
        let p = Procedure::user_defined(
            "greet",
            vec!["name".to_string()],
            vec![OptionalParam {
                name: "greeting".to_string(),
                default: vec![],
            }],
            None,
            None,
            vec![],
        );
        assert_eq!(p.min_arity(), 1);
        assert_eq!(p.max_arity(), 2);
        assert_eq!(p.default_arity(), 1);
        assert!(p.accepts_arity(1));
        assert!(p.accepts_arity(2));
        assert!(!p.accepts_arity(3));
    }

    #[test]
    fn user_defined_with_rest_input_is_unbounded() {
        let p = Procedure::user_defined("variadic", vec![], vec![], Some("rest".to_string()), None, vec![]);
        assert_eq!(p.max_arity(), -1);
        assert!(p.accepts_arity(1000));
    }

    #[test]
    fn default_arity_override_wins_over_required_count() {
        let p = Procedure::user_defined(
            "p",
            vec!["a".to_string(), "b".to_string()],
            vec![],
            None,
            Some(0),
            vec![],
        );
        assert_eq!(p.default_arity(), 0);
    }
}
