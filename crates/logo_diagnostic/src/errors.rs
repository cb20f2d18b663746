//! Runtime error taxonomy.
//!
//! All runtime errors (unknown command, wrong arity, wrong type,
//! arithmetic failure, out-of-range index, missing variable, empty input
//! for `FIRST`/`LAST`/`BUTFIRST`, ...) are one `LogoError` enum rather
//! than a family of ad hoc strings. Messages name the offending
//! primitive and include the offending value.

use logo_ir::Value;
use thiserror::Error;

fn show(v: &Value) -> String {
    v.list_repr(true, false)
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LogoError {
    #[error("I don't know how to {0}.")]
    UnknownCommand(String),

    #[error("{command} doesn't like {got} as input, it wants a number.")]
    WrongType { command: String, got: String },

    #[error("{command} doesn't like {got} as input, it wants a {wanted}.")]
    WrongKind {
        command: String,
        got: String,
        wanted: &'static str,
    },

    #[error("{command} expected {expected} inputs, but got {got}.")]
    WrongArity {
        command: String,
        expected: String,
        got: usize,
    },

    #[error("{command} doesn't like {value} as input.")]
    BadInput { command: String, value: String },

    #[error("{varname} has no value.")]
    NoValue { varname: String },

    #[error("division by zero in {command}.")]
    DivisionByZero { command: String },

    #[error("{command} index {index} out of range.")]
    IndexOutOfRange { command: String, index: i64 },

    #[error("{command} was expecting a list, but got {got} instead.")]
    NotAList { command: String, got: String },

    #[error("{command} was asked to operate on an empty list.")]
    EmptyInput { command: String },

    #[error("the data lists given to {command} are not all the same length.")]
    MismatchedListLengths { command: String },

    #[error("REPCOUNT has no frame active.")]
    NoRepcountFrame,

    #[error("? has no placeholder bound at index {index}.")]
    NoPlaceholder { index: usize },

    #[error("expected a command, but got {got} instead.")]
    ExpectedCommand { got: String },

    #[error("{command} received a null value for argument {index}.")]
    NullArgument { command: String, index: usize },

    #[error("{message}")]
    Other { message: String },
}

impl LogoError {
    #[must_use]
    pub fn unknown_command(name: &str) -> Self {
        LogoError::UnknownCommand(name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn wrong_type(command: &str, got: &Value) -> Self {
        LogoError::WrongType {
            command: command.to_ascii_uppercase(),
            got: show(got),
        }
    }

    #[must_use]
    pub fn wrong_arity(command: &str, expected: impl Into<String>, got: usize) -> Self {
        LogoError::WrongArity {
            command: command.to_ascii_uppercase(),
            expected: expected.into(),
            got,
        }
    }

    #[must_use]
    pub fn wrong_kind(command: &str, got: &Value, wanted: &'static str) -> Self {
        LogoError::WrongKind {
            command: command.to_ascii_uppercase(),
            got: show(got),
            wanted,
        }
    }

    #[must_use]
    pub fn bad_input(command: &str, value: &Value) -> Self {
        LogoError::BadInput {
            command: command.to_ascii_uppercase(),
            value: show(value),
        }
    }

    #[must_use]
    pub fn no_value(varname: &str) -> Self {
        LogoError::NoValue {
            varname: varname.to_string(),
        }
    }

    #[must_use]
    pub fn division_by_zero(command: &str) -> Self {
        LogoError::DivisionByZero {
            command: command.to_ascii_uppercase(),
        }
    }

    #[must_use]
    pub fn index_out_of_range(command: &str, index: i64) -> Self {
        LogoError::IndexOutOfRange {
            command: command.to_ascii_uppercase(),
            index,
        }
    }

    #[must_use]
    pub fn not_a_list(command: &str, got: &Value) -> Self {
        LogoError::NotAList {
            command: command.to_ascii_uppercase(),
            got: show(got),
        }
    }

    #[must_use]
    pub fn empty_input(command: &str) -> Self {
        LogoError::EmptyInput {
            command: command.to_ascii_uppercase(),
        }
    }

    #[must_use]
    pub fn mismatched_list_lengths(command: &str) -> Self {
        LogoError::MismatchedListLengths {
            command: command.to_ascii_uppercase(),
        }
    }

    #[must_use]
    pub fn expected_command(got: &Value) -> Self {
        LogoError::ExpectedCommand { got: show(got) }
    }

    #[must_use]
    pub fn null_argument(command: &str, index: usize) -> Self {
        LogoError::NullArgument {
            command: command.to_ascii_uppercase(),
            index,
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        LogoError::Other {
            message: message.into(),
        }
    }
}

pub type LogoResult<T> = Result<T, LogoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_names_the_primitive() {
        let err = LogoError::unknown_command("frobnicate");
        assert_eq!(err.to_string(), "I don't know how to FROBNICATE.");
    }

    #[test]
    fn wrong_type_includes_offending_value() {
        let err = LogoError::wrong_type("sum", &Value::word("banana"));
        assert!(err.to_string().contains("banana"));
        assert!(err.to_string().contains("SUM"));
    }
}
