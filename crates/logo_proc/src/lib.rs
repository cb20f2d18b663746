//! The procedure record, the combined primitives/user-procedures table,
//! and the `PrimitiveContext` seam that lets `logo_primitives` and
//! `logo_eval` depend on each other's vocabulary without depending on
//! each other's crates.

mod context;
mod procedure;
mod table;

pub use context::{EvalOutcome, NativeFn, PrimitiveContext};
pub use procedure::{OptionalParam, Procedure, ProcedureBody};
pub use table::ProcedureTable;
