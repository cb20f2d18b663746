//! The capability the evaluator delegates all turtle-graphics and I/O
//! operations through -- the core performs no I/O to the graphics device
//! itself. Every drawing, streaming, and lifecycle operation a primitive
//! might need crosses this one seam, isolating the concrete backend
//! behind a trait rather than baking it into the evaluator.
//!
//! No-op implementations of every method are acceptable; see
//! [`crate::NullBackend`].

use rustc_hash::FxHashMap;

use logo_ir::Value;

use crate::color::Color;

/// Text alignment for [`TurtleBackend::write`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

pub trait TurtleBackend {
    /// One-time setup, called with whatever keyword configuration the
    /// driver passed to `create_interpreter`/`install_backend`.
    fn initialize(&mut self, kwargs: &FxHashMap<String, Value>);

    /// Block until any outstanding asynchronous drawing has finished.
    fn wait_complete(&mut self);

    /// Pump the backend's event loop; called between every command so an
    /// interactive backend can repaint and poll for the halt flag.
    fn process_events(&mut self);

    fn write_stdout(&mut self, text: &str);
    fn write_stderr(&mut self, text: &str);

    fn halt_requested(&self) -> bool;
    fn set_halt_requested(&mut self, value: bool);

    /// Converts a Logo (compass) heading in degrees to Cartesian degrees.
    fn cartesian_heading(&self, theta: f64) -> f64;
    /// The inverse of [`TurtleBackend::cartesian_heading`].
    fn turtle_heading_from_cartesian_heading(&self, theta: f64) -> f64;

    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn is_pen_down(&self) -> bool;
    fn set_pen_color(&mut self, color: Color);
    fn set_pen_size(&mut self, size: f64);
    fn set_fill_color(&mut self, color: Color);
    fn begin_fill(&mut self);
    fn end_fill(&mut self);
    fn begin_unfilled(&mut self);
    fn end_unfilled(&mut self);

    fn forward(&mut self, distance: f64);
    fn backward(&mut self, distance: f64);
    fn left(&mut self, angle: f64);
    fn right(&mut self, angle: f64);
    fn setpos(&mut self, x: f64, y: f64);
    fn home(&mut self);
    fn setheading(&mut self, angle: f64);
    fn heading(&self) -> f64;
    fn pos(&self) -> (f64, f64);
    fn xcor(&self) -> f64;
    fn ycor(&self) -> f64;
    fn towards(&self, x: f64, y: f64) -> f64;

    fn circle(&mut self, radius: f64, angle: f64, steps: Option<u32>);
    fn ellipse(&mut self, major: f64, minor: f64, angle: f64, direction: f64);
    fn write(&mut self, text: &str, align: TextAlign, font: &str);

    fn show_turtle(&mut self);
    fn hide_turtle(&mut self);
    fn is_shown(&self) -> bool;

    fn set_speed(&mut self, speed: f64);

    fn clear(&mut self);
    fn undo(&mut self);
    fn undo_buffer_entries(&self) -> i64;
}
