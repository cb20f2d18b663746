//! REPCOUNT, the `?`/`?N` placeholder, PRINT/SHOW/TYPE, PRINTOUT/POT/POTS,
//! SAVE, READLIST, LOAD.

use std::fmt::Write as _;
use std::fs;

use logo_diagnostic::{LogoError, LogoResult};
use logo_ir::{AtomKind, Token, Value};
use logo_proc::{EvalOutcome, Procedure, ProcedureBody, ProcedureTable};
use logo_proc::{OptionalParam, PrimitiveContext};

use crate::helpers::{list, require_arity, word};

pub fn register(table: &mut ProcedureTable) {
    table.define_native("repcount", 0, 0, 0, repcount);
    table.define_native("?", 1, 1, 1, qmark);
    table.define_native("print", 1, -1, 1, print);
    table.define_native("show", 1, -1, 1, show);
    table.define_native("type", 1, -1, 1, type_cmd);
    table.define_native("printout", 1, 1, 1, printout);
    table.define_native("pot", 1, 1, 1, pot);
    table.define_native("pots", 0, 0, 0, pots);
    table.define_native("save", 1, 1, 1, save);
    table.define_native("readlist", 0, 0, 0, readlist);
    table.define_native("rl", 0, 0, 0, readlist);
    table.define_native("load", 1, 1, 1, load);
}

fn repcount(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    Ok(EvalOutcome::Value(Value::int(ctx.env_ref().repcount())))
}

/// `?N`'s rewritten form: `SpecialForm { name: "?", args: [Number(n)] }`
/// always hands this a single resolved 1-based index -- `Token::placeholder`.
fn qmark(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("?", &args, 1, Some(1))?;
    let n = crate::helpers::integer("?", &args[0])?;
    if n < 1 {
        return Err(LogoError::bad_input("?", &args[0]));
    }
    let value = ctx.env_ref().placeholder((n - 1) as usize)?;
    Ok(EvalOutcome::Value(value))
}

/// Joins every argument with a single space; lists render without braces.
fn joined_args(args: &[Value]) -> String {
    args.iter().map(|v| v.list_repr(false, false)).collect::<Vec<_>>().join(" ")
}

fn print(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("print", &args, 1, None)?;
    let line = joined_args(&args);
    ctx.turtle().write_stdout(&line);
    ctx.turtle().write_stdout("\n");
    Ok(EvalOutcome::Value(Value::word("")))
}

/// Like `PRINT`, but lists render with their enclosing brackets.
fn show(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("show", &args, 1, None)?;
    let line = args.iter().map(|v| v.list_repr(true, false)).collect::<Vec<_>>().join(" ");
    ctx.turtle().write_stdout(&line);
    ctx.turtle().write_stdout("\n");
    Ok(EvalOutcome::Value(Value::word("")))
}

/// Like `PRINT`, but no trailing newline.
fn type_cmd(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("type", &args, 1, None)?;
    let line = joined_args(&args);
    ctx.turtle().write_stdout(&line);
    Ok(EvalOutcome::Value(Value::word("")))
}

/// Renders one token back to Logo surface syntax. Good enough for
/// `PRINTOUT`/`POT`/`POTS`/`SAVE` to reproduce a runnable definition;
/// bodies are rendered on a single line.
fn token_repr(token: &Token) -> String {
    match token {
        Token::Atom { kind: AtomKind::Command, text, .. } => text.clone(),
        Token::Atom { kind: AtomKind::QuotedWord, text, .. } => format!("\"{text}"),
        Token::Atom { kind: AtomKind::VarRef, text, .. } => format!(":{text}"),
        Token::Number { value, .. } => value.to_string(),
        Token::ListLit { items, .. } => format!("[{}]", tokens_repr(items)),
        Token::Group { items, .. } => format!("({})", tokens_repr(items)),
        Token::SpecialForm { name, args, .. } => {
            if args.is_empty() {
                format!("({name})")
            } else {
                format!("({name} {})", tokens_repr(args))
            }
        }
    }
}

fn tokens_repr(tokens: &[Token]) -> String {
    tokens.iter().map(token_repr).collect::<Vec<_>>().join(" ")
}

/// `to name :required... [:optional default]... [:rest]` -- mirrors
/// `LogoProcedure.__str__`.
fn procedure_header(proc: &Procedure) -> LogoResult<String> {
    let ProcedureBody::UserDefined {
        required_inputs,
        optional_inputs,
        rest_input,
        ..
    } = &proc.body
    else {
        return Err(LogoError::other(format!("{} is a primitive.", proc.name.to_ascii_uppercase())));
    };
    let mut header = format!("to {}", proc.name);
    for name in required_inputs {
        let _ = write!(header, " :{name}");
    }
    for OptionalParam { name, default } in optional_inputs {
        let _ = write!(header, " [:{name} {}]", tokens_repr(default));
    }
    if let Some(rest_name) = rest_input {
        let _ = write!(header, " [:{rest_name}]");
    }
    Ok(header)
}

/// Prints `name`'s full definition (header, body, `end`, blank line) if
/// it's a user procedure, or a one-line primitive notice -- `process_printout`.
fn printout_one(ctx: &mut dyn PrimitiveContext, name: &str) -> LogoResult<()> {
    match ctx.procedures_ref().get(name).cloned() {
        Some(proc) if !proc.is_native() => {
            let header = procedure_header(&proc)?;
            let ProcedureBody::UserDefined { body, .. } = &proc.body else {
                unreachable!("is_native() was just checked false");
            };
            ctx.turtle().write_stdout(&header);
            ctx.turtle().write_stdout("\n");
            ctx.turtle().write_stdout(&tokens_repr(body));
            ctx.turtle().write_stdout("\n");
            ctx.turtle().write_stdout("end");
            ctx.turtle().write_stdout("\n\n");
            Ok(())
        }
        Some(_) => {
            ctx.turtle().write_stdout(&format!("{} is a primitive.", name.to_ascii_uppercase()));
            ctx.turtle().write_stdout("\n\n");
            Ok(())
        }
        None => Err(LogoError::unknown_command(name)),
    }
}

fn printout(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("printout", &args, 1, Some(1))?;
    let names = list("printout", &args[0])?;
    let names: Vec<String> = names.borrow().iter().map(|v| word("printout", v)).collect::<LogoResult<Vec<_>>>()?;
    for name in names {
        printout_one(ctx, &name)?;
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `POT contentslist`: same full-definition rendering as `PRINTOUT`, one
/// name (or list of names) at a time.
fn pot(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("pot", &args, 1, Some(1))?;
    match &args[0] {
        Value::Word(w) => printout_one(ctx, w.as_str())?,
        Value::List(l) => {
            let names: Vec<String> = l.borrow().iter().map(|v| word("pot", v)).collect::<LogoResult<Vec<_>>>()?;
            for name in names {
                printout_one(ctx, &name)?;
            }
        }
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// `POTS`: every user-defined procedure, sorted by name.
fn pots(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    let mut names: Vec<String> = ctx.procedures_ref().user_defined_names().map(str::to_string).collect();
    names.sort();
    for name in names {
        printout_one(ctx, &name)?;
    }
    Ok(EvalOutcome::Value(Value::word("")))
}

/// Writes `; PROCEDURES` (every user procedure, full definitions) then
/// `; VARIABLES` (every bound global, `make "name value`) -- `process_save`.
fn save(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("save", &args, 1, Some(1))?;
    let filename = word("save", &args[0])?;

    let mut names: Vec<String> = ctx.procedures_ref().user_defined_names().map(str::to_string).collect();
    names.sort();

    let mut out = String::new();
    out.push_str("; PROCEDURES\n\n");
    for name in &names {
        let proc = ctx
            .procedures_ref()
            .get(name)
            .cloned()
            .unwrap_or_else(|| unreachable!("name came from user_defined_names"));
        let header = procedure_header(&proc)?;
        let ProcedureBody::UserDefined { body, .. } = &proc.body else {
            unreachable!("user_defined_names only yields user procedures");
        };
        out.push_str(&header);
        out.push('\n');
        out.push_str(&tokens_repr(body));
        out.push('\n');
        out.push_str("end\n\n");
    }

    out.push_str("; VARIABLES\n\n");
    let mut globals: Vec<(String, Value)> = ctx.env_ref().global_bindings().map(|(n, v)| (n.to_string(), v.clone())).collect();
    globals.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in globals {
        out.push_str(&format!("make \"{name} {}\n", value.list_repr(false, false)));
    }

    fs::write(&filename, out).map_err(|e| LogoError::other(format!("save: {e}")))?;
    Ok(EvalOutcome::Value(Value::word("")))
}

fn readlist(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    let _ = args;
    let line = ctx.read_input_line()?.unwrap_or_default();
    let value = ctx.read_list_value(&line)?;
    Ok(EvalOutcome::Value(value))
}

/// Searches every configured script folder in order and runs the first
/// file found via the same top-level entry a script invocation uses.
fn load(ctx: &mut dyn PrimitiveContext, args: Vec<Value>) -> LogoResult<EvalOutcome> {
    require_arity("load", &args, 1, Some(1))?;
    let filename = word("load", &args[0])?;
    let folders: Vec<String> = ctx.script_folders().to_vec();
    for folder in &folders {
        let path = std::path::Path::new(folder).join(&filename);
        if path.exists() {
            let text = fs::read_to_string(&path).map_err(|e| LogoError::other(format!("load: {e}")))?;
            return ctx.run_source_text(&text);
        }
    }
    Err(LogoError::bad_input("load", &args[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestCtx;

    #[test]
    fn repcount_is_negative_one_outside_any_loop() {
        let mut ctx = TestCtx::new();
        assert_eq!(repcount(&mut ctx, vec![]).unwrap(), EvalOutcome::Value(Value::int(-1)));
    }

    #[test]
    fn repcount_reflects_pushed_frame() {
        let mut ctx = TestCtx::new();
        ctx.env().push_repcount(1);
        ctx.env().set_repcount(4);
        assert_eq!(repcount(&mut ctx, vec![]).unwrap(), EvalOutcome::Value(Value::int(4)));
        ctx.env().pop_repcount();
    }

    #[test]
    fn qmark_resolves_against_innermost_placeholders() {
        let mut ctx = TestCtx::new();
        ctx.env().push_placeholders(vec![Value::int(10), Value::int(20)]);
        assert_eq!(qmark(&mut ctx, vec![Value::int(2)]).unwrap(), EvalOutcome::Value(Value::int(20)));
        ctx.env().pop_placeholders();
    }

    #[test]
    fn qmark_rejects_index_below_one() {
        let mut ctx = TestCtx::new();
        ctx.env().push_placeholders(vec![Value::int(1)]);
        assert!(qmark(&mut ctx, vec![Value::int(0)]).is_err());
        ctx.env().pop_placeholders();
    }

    #[test]
    fn print_joins_args_with_spaces_and_bare_lists() {
        let mut ctx = TestCtx::new();
        let list = Value::list(vec![Value::int(1), Value::int(2)]);
        print(&mut ctx, vec![Value::word("hi"), list]).unwrap();
    }

    #[test]
    fn procedure_header_renders_required_optional_and_rest() {
        let proc = Procedure::user_defined(
            "greet",
            vec!["name".to_string()],
            vec![OptionalParam {
                name: "greeting".to_string(),
                default: vec![Token::quoted_word("hello", logo_ir::Span::default())],
            }],
            Some("extras".to_string()),
            None,
            vec![],
        );
        let header = procedure_header(&proc).unwrap();
        assert_eq!(header, "to greet :name [:greeting \"hello] [:extras]");
    }

    #[test]
    fn save_writes_procedures_and_variables_sections() {
        let mut ctx = TestCtx::new();
        ctx.procedures().define_user("square", vec!["n".to_string()], vec![], None, None, vec![
            Token::command("output", logo_ir::Span::default()),
            Token::command("*", logo_ir::Span::default()),
            Token::var_ref("n", logo_ir::Span::default()),
            Token::var_ref("n", logo_ir::Span::default()),
        ]);
        ctx.env().set_variable("x", Value::int(5));
        let dir = std::env::temp_dir().join(format!("logo_save_test_{}", std::process::id()));
        let path = dir.with_extension("lgo");
        save(&mut ctx, vec![Value::word(path.to_string_lossy().to_string())]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("; PROCEDURES"));
        assert!(contents.contains("to square :n"));
        assert!(contents.contains("; VARIABLES"));
        assert!(contents.contains("make \"x 5"));
        let _ = fs::remove_file(&path);
    }
}
