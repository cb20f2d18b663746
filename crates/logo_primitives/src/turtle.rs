//! Turtle delegation: every primitive here just coerces arguments and
//! forwards to the installed [`logo_turtle::TurtleBackend`] -- the core
//! performs no I/O to the graphics device itself. `ARC` and `LABEL` are
//! built from the backend's primitive ops rather than being ops
//! themselves.

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::Value;
use logo_proc::{EvalOutcome, PrimitiveContext, ProcedureTable};
use logo_turtle::{Color, TextAlign};

use crate::helpers::{boolean, integer, number, require_arity};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("forward", 1, 1, 1, forward);
    table.define_native("fd", 1, 1, 1, forward);
    table.define_native("back", 1, 1, 1, back);
    table.define_native("bk", 1, 1, 1, back);
    table.define_native("left", 1, 1, 1, left);
    table.define_native("lt", 1, 1, 1, left);
    table.define_native("right", 1, 1, 1, right);
    table.define_native("rt", 1, 1, 1, right);
    table.define_native("setpos", 1, 1, 1, setpos);
    table.define_native("setxy", 2, 2, 2, setxy);
    table.define_native("home", 0, 0, 0, home);
    table.define_native("setheading", 1, 1, 1, setheading);
    table.define_native("seth", 1, 1, 1, setheading);
    table.define_native("heading", 0, 0, 0, heading);
    table.define_native("pos", 0, 0, 0, pos);
    table.define_native("xcor", 0, 0, 0, xcor);
    table.define_native("ycor", 0, 0, 0, ycor);
    table.define_native("towards", 1, 1, 1, towards);
    table.define_native("cartesian.heading", 1, 1, 1, cartesian_heading);
    table.define_native("turtle.heading", 1, 1, 1, turtle_heading);

    table.define_native("penup", 0, 0, 0, penup);
    table.define_native("pu", 0, 0, 0, penup);
    table.define_native("pendown", 0, 0, 0, pendown);
    table.define_native("pd", 0, 0, 0, pendown);
    table.define_native("setpencolor", 1, 1, 1, setpencolor);
    table.define_native("setpc", 1, 1, 1, setpencolor);
    table.define_native("setpensize", 1, 1, 1, setpensize);
    table.define_native("setfillcolor", 1, 1, 1, setfillcolor);
    table.define_native("setfc", 1, 1, 1, setfillcolor);
    table.define_native("filled", 2, 2, 2, filled);
    table.define_native("ext.unfilled", 1, -1, 1, ext_unfilled);

    table.define_native("circle", 1, 2, 1, circle);
    table.define_native("ext.ellipse", 2, 4, 2, ellipse);
    table.define_native("arc", 2, 2, 2, arc);
    table.define_native("label", 1, 1, 1, label);

    table.define_native("showturtle", 0, 0, 0, showturtle);
    table.define_native("st", 0, 0, 0, showturtle);
    table.define_native("hideturtle", 0, 0, 0, hideturtle);
    table.define_native("ht", 0, 0, 0, hideturtle);
    table.define_native("setspeed", 1, 1, 1, setspeed);

    table.define_native("clean", 0, 0, 0, clean);
    table.define_native("clearscreen", 0, 0, 0, clearscreen);
    table.define_native("cs", 0, 0, 0, clearscreen);
    table.define_native("undo", 0, 0, 0, undo);
    table.define_native("setundobuffer", 1, 1, 1, setundobuffer);
    table.define_native("undobufferentries", 0, 0, 0, undobufferentries);
}

fn forward(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("forward", &args, 1, Some(1))?;
    let dist = number("forward", &args[0])?.as_f64();
    ctx.turtle().forward(dist);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn back(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("back", &args, 1, Some(1))?;
    let dist = number("back", &args[0])?.as_f64();
    ctx.turtle().backward(dist);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn left(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("left", &args, 1, Some(1))?;
    let angle = number("left", &args[0])?.as_f64();
    ctx.turtle().left(angle);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn right(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("right", &args, 1, Some(1))?;
    let angle = number("right", &args[0])?.as_f64();
    ctx.turtle().right(angle);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn xy_from_list(command: &str, v: &Value) -> LogoResult<(f64, f64)> {
    let list = v.as_list().ok_or_else(|| LogoError::not_a_list(command, v))?;
    let items = list.borrow();
    if items.len() != 2 {
        return Err(LogoError::bad_input(command, v));
    }
    Ok((number(command, &items[0])?.as_f64(), number(command, &items[1])?.as_f64()))
}

fn setpos(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setpos", &args, 1, Some(1))?;
    let (x, y) = xy_from_list("setpos", &args[0])?;
    ctx.turtle().setpos(x, y);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn setxy(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setxy", &args, 2, Some(2))?;
    let x = number("setxy", &args[0])?.as_f64();
    let y = number("setxy", &args[1])?.as_f64();
    ctx.turtle().setpos(x, y);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn home(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().home();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn setheading(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setheading", &args, 1, Some(1))?;
    let angle = number("setheading", &args[0])?.as_f64();
    ctx.turtle().setheading(angle);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn heading(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().heading())))
}

fn pos(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    let (x, y) = ctx.turtle().pos();
    Ok(EvalOutcome::Value(Value::list(vec![Value::float(x), Value::float(y)])))
}

fn xcor(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().xcor())))
}

fn ycor(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().ycor())))
}

fn towards(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("towards", &args, 1, Some(1))?;
    let (x, y) = xy_from_list("towards", &args[0])?;
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().towards(x, y))))
}

fn cartesian_heading(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("cartesian.heading", &args, 1, Some(1))?;
    let theta = number("cartesian.heading", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().cartesian_heading(theta))))
}

fn turtle_heading(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("turtle.heading", &args, 1, Some(1))?;
    let theta = number("turtle.heading", &args[0])?.as_f64();
    Ok(EvalOutcome::Value(Value::float(ctx.turtle().turtle_heading_from_cartesian_heading(theta))))
}

fn penup(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().pen_up();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn pendown(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().pen_down();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn color_arg(command: &str, v: &Value) -> LogoResult<Color> {
    Color::from_value(v).ok_or_else(|| LogoError::bad_input(command, v))
}

fn setpencolor(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setpencolor", &args, 1, Some(1))?;
    let color = color_arg("setpencolor", &args[0])?;
    ctx.turtle().set_pen_color(color);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn setpensize(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setpensize", &args, 1, Some(1))?;
    let size = number("setpensize", &args[0])?.as_f64();
    ctx.turtle().set_pen_size(size);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn setfillcolor(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setfillcolor", &args, 1, Some(1))?;
    let color = color_arg("setfillcolor", &args[0])?;
    ctx.turtle().set_fill_color(color);
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `FILLED color instructions`: sets the fill colour, runs `instructions`
/// between `begin_fill`/`end_fill` -- `process_filled`.
fn filled(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("filled", &args, 2, Some(2))?;
    let color = color_arg("filled", &args[0])?;
    ctx.turtle().set_fill_color(color);
    ctx.turtle().begin_fill();
    let outcome = ctx.run_value_as_instructions(&args[1]);
    ctx.turtle().end_fill();
    outcome
}

/// `EXT.UNFILLED instructions`: runs `instructions` between
/// `begin_unfilled`/`end_unfilled` -- `process_ext_unfilled`.
fn ext_unfilled(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("ext.unfilled", &args, 1, None)?;
    ctx.turtle().begin_unfilled();
    let list = Value::list(args);
    let outcome = ctx.run_value_as_instructions(&list);
    ctx.turtle().end_unfilled();
    outcome
}

fn circle(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("circle", &args, 1, Some(2))?;
    let radius = number("circle", &args[0])?.as_f64();
    let angle = if args.len() > 1 { number("circle", &args[1])?.as_f64() } else { 360.0 };
    ctx.turtle().circle(radius, angle, None);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn ellipse(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("ext.ellipse", &args, 2, Some(4))?;
    let major = number("ext.ellipse", &args[0])?.as_f64();
    let minor = number("ext.ellipse", &args[1])?.as_f64();
    let angle = if args.len() > 2 { number("ext.ellipse", &args[2])?.as_f64() } else { 360.0 };
    let clockwise = if args.len() > 3 { boolean("ext.ellipse", &args[3])? } else { true };
    ctx.turtle().ellipse(major, minor, angle, if clockwise { 1.0 } else { -1.0 });
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `ARC angle radius`: not a backend primitive -- a turtle-state-preserving
/// helper built from `forward`/`circle`.
fn arc(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("arc", &args, 2, Some(2))?;
    let angle = number("arc", &args[0])?.as_f64();
    let radius = number("arc", &args[1])?.as_f64();
    let (x, y) = ctx.turtle().pos();
    let h = ctx.turtle().heading();
    let was_down = ctx.turtle().is_pen_down();
    if !was_down {
        ctx.turtle().pen_down();
    }
    ctx.turtle().circle(radius, angle, None);
    ctx.turtle().setpos(x, y);
    ctx.turtle().setheading(h);
    if !was_down {
        ctx.turtle().pen_up();
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `LABEL text`: delegates to the backend's `write` op with the default
/// left alignment and font -- `process_label`.
fn label(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("label", &args, 1, Some(1))?;
    let text = match &args[0] {
        Value::Word(w) => w.as_str().to_string(),
        Value::List(_) => args[0].list_repr(false, false),
    };
    ctx.turtle().write(&text, TextAlign::Left, "Arial 8 normal");
    Ok(EvalOutcome::Value(Value::word("")))
}

fn showturtle(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().show_turtle();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn hideturtle(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().hide_turtle();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn setspeed(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("setspeed", &args, 1, Some(1))?;
    let speed = number("setspeed", &args[0])?.as_f64();
    ctx.turtle().set_speed(speed);
    Ok(EvalOutcome::Value(Value::word("")))
}

fn clean(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().clear();
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `CLEARSCREEN`: clears the drawing and sends the turtle home --
/// `process_clearscreen`.
fn clearscreen(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().clear();
    ctx.turtle().home();
    Ok(EvalOutcome::Value(Value::word("")))
}

fn undo(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    ctx.turtle().undo();
    Ok(EvalOutcome::Value(Value::word("")))
}

/// The backend owns the undo-buffer capacity itself; the primitive only
/// needs to be accepted and have some arity-checked effect, so it folds
/// into a no-op speed-style setter rather than growing the trait further.
fn setundobuffer(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = ctx;
    require_arity("setundobuffer", &args, 1, Some(1))?;
    integer("setundobuffer", &args[0])?;
    Ok(EvalOutcome::Value(Value::word("")))
}

fn undobufferentries(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    Ok(EvalOutcome::Value(Value::int(ctx.turtle().undo_buffer_entries())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn forward_then_pos_reports_movement() {
        let mut ctx = TestCtx::new();
        forward(&mut ctx, vec![Value::int(10)]).unwrap();
        let EvalOutcome::Value(Value::List(list)) = pos(&mut ctx, vec![]).unwrap() else {
            panic!("expected a list");
        };
        let items = list.borrow();
        assert!((items[1].as_number().unwrap().as_f64() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn right_then_heading_reports_turn() {
        let mut ctx = TestCtx::new();
        right(&mut ctx, vec![Value::int(90)]).unwrap();
        assert_eq!(heading(&mut ctx, vec![]).unwrap(), EvalOutcome::Value(Value::float(90.0)));
    }

    #[test]
    fn home_resets_to_origin() {
        let mut ctx = TestCtx::new();
        setpos(&mut ctx, vec![Value::list(vec![Value::int(3), Value::int(4)])]).unwrap();
        home(&mut ctx, vec![]).unwrap();
        let EvalOutcome::Value(Value::List(list)) = pos(&mut ctx, vec![]).unwrap() else {
            panic!("expected a list");
        };
        let items = list.borrow();
        assert!((items[0].as_number().unwrap().as_f64()).abs() < 1e-9);
        assert!((items[1].as_number().unwrap().as_f64()).abs() < 1e-9);
    }

    #[test]
    fn penup_then_pendown_round_trip_via_turtle() {
        let mut ctx = TestCtx::new();
        penup(&mut ctx, vec![]).unwrap();
        assert!(!ctx.turtle().is_pen_down());
        pendown(&mut ctx, vec![]).unwrap();
        assert!(ctx.turtle().is_pen_down());
    }

    #[test]
    fn setpencolor_rejects_bad_input() {
        let mut ctx = TestCtx::new();
        let bad = Value::list(vec![Value::int(1), Value::int(2)]);
        assert!(setpencolor(&mut ctx, vec![bad]).is_err());
    }
}
