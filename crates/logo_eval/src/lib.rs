//! The tree-walking evaluator: dynamic scoping, procedures, control
//! flow, and templates. `Evaluator` is built through
//! [`EvaluatorBuilder`] and implements `logo_proc::PrimitiveContext`, the
//! seam every `logo_primitives` native function is written against.

mod builder;
mod evaluator;
mod numeric;
mod to_parser;
mod token_stream;

pub use builder::EvaluatorBuilder;
pub use evaluator::{is_nothing, nothing, Evaluator, RunError};
pub use token_stream::TokenStream;
