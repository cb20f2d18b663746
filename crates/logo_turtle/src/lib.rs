//! The Turtle-Backend capability trait and a no-op implementation. The
//! evaluator and primitives never talk to a graphics device directly;
//! they go through this seam, keeping the concrete backend behind a
//! trait rather than linking a concrete target into the core.

mod backend;
mod color;
mod null;

pub use backend::{TextAlign, TurtleBackend};
pub use color::Color;
pub use null::NullBackend;
