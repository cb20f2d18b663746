//! Dynamic scoping and the two auxiliary stacks (`REPCOUNT`, template
//! placeholders) that ride alongside it.

mod environment;
mod guard;
mod scope;

pub use environment::Environment;
pub use guard::{PlaceholderGuard, RepcountGuard, ScopeGuard};
pub use scope::Scope;
