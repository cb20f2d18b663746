//! Value model, token tree, and source spans shared by the lexer, parser,
//! and evaluator crates.

mod span;
mod token;
mod value;

pub use span::Span;
pub use token::{AtomKind, Token};
pub use value::{ListValue, Number, Value, Word};
