//! A backend that tracks just enough turtle state (position, heading, pen)
//! to answer queries truthfully, but draws nothing. Used by tests and by
//! `logoc` when no graphics backend is linked in.

use rustc_hash::FxHashMap;

use logo_ir::Value;

use crate::backend::{TextAlign, TurtleBackend};
use crate::color::Color;

#[derive(Debug)]
pub struct NullBackend {
    x: f64,
    y: f64,
    heading: f64,
    pen_down: bool,
    shown: bool,
    speed: f64,
    halt: bool,
}

impl NullBackend {
    #[must_use]
    pub fn new() -> Self {
        NullBackend {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
            shown: true,
            speed: 5.0,
            halt: false,
        }
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TurtleBackend for NullBackend {
    fn initialize(&mut self, _kwargs: &FxHashMap<String, Value>) {}

    fn wait_complete(&mut self) {}

    fn process_events(&mut self) {}

    fn write_stdout(&mut self, _text: &str) {}

    fn write_stderr(&mut self, _text: &str) {}

    fn halt_requested(&self) -> bool {
        self.halt
    }

    fn set_halt_requested(&mut self, value: bool) {
        self.halt = value;
    }

    fn cartesian_heading(&self, theta: f64) -> f64 {
        (90.0 - theta).rem_euclid(360.0)
    }

    fn turtle_heading_from_cartesian_heading(&self, theta: f64) -> f64 {
        (90.0 - theta).rem_euclid(360.0)
    }

    fn pen_up(&mut self) {
        self.pen_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    fn set_pen_color(&mut self, _color: Color) {}

    fn set_pen_size(&mut self, _size: f64) {}

    fn set_fill_color(&mut self, _color: Color) {}

    fn begin_fill(&mut self) {}

    fn end_fill(&mut self) {}

    fn begin_unfilled(&mut self) {}

    fn end_unfilled(&mut self) {}

    fn forward(&mut self, distance: f64) {
        let rad = self.heading.to_radians();
        self.x += distance * rad.sin();
        self.y += distance * rad.cos();
    }

    fn backward(&mut self, distance: f64) {
        self.forward(-distance);
    }

    fn left(&mut self, angle: f64) {
        self.heading = (self.heading - angle).rem_euclid(360.0);
    }

    fn right(&mut self, angle: f64) {
        self.heading = (self.heading + angle).rem_euclid(360.0);
    }

    fn setpos(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn home(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.heading = 0.0;
    }

    fn setheading(&mut self, angle: f64) {
        self.heading = angle.rem_euclid(360.0);
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn pos(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn xcor(&self) -> f64 {
        self.x
    }

    fn ycor(&self) -> f64 {
        self.y
    }

    fn towards(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }

    fn circle(&mut self, _radius: f64, _angle: f64, _steps: Option<u32>) {}

    fn ellipse(&mut self, _major: f64, _minor: f64, _angle: f64, _direction: f64) {}

    fn write(&mut self, _text: &str, _align: TextAlign, _font: &str) {}

    fn show_turtle(&mut self) {
        self.shown = true;
    }

    fn hide_turtle(&mut self) {
        self.shown = false;
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    fn clear(&mut self) {}

    fn undo(&mut self) {}

    fn undo_buffer_entries(&self) -> i64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_at_heading_zero_moves_along_y() {
        let mut backend = NullBackend::new();
        backend.forward(10.0);
        let (x, y) = backend.pos();
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn right_then_forward_moves_along_x() {
        let mut backend = NullBackend::new();
        backend.right(90.0);
        backend.forward(5.0);
        let (x, y) = backend.pos();
        assert!((x - 5.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn home_resets_position_and_heading() {
        let mut backend = NullBackend::new();
        backend.setpos(3.0, 4.0);
        backend.setheading(180.0);
        backend.home();
        assert_eq!(backend.pos(), (0.0, 0.0));
        assert_eq!(backend.heading(), 0.0);
    }

    #[test]
    fn halt_flag_round_trips() {
        let mut backend = NullBackend::new();
        assert!(!backend.halt_requested());
        backend.set_halt_requested(true);
        assert!(backend.halt_requested());
    }
}
