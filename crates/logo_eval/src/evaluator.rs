//! The tree-walking core: `evaluate`, `evaluate_value`, `process_command`,
//! `process_special_form_or_expression`, `execute_procedure`, and the
//! top-level entry points (`process_instructionlist`, `receive_input`).
//! Control flow is threaded explicitly through an `EvalOutcome` sum type
//! rather than language-level exceptions.

use std::io::BufRead;

use logo_diagnostic::{LogoError, LogoResult, ParseError};
use logo_env::Environment;
use logo_ir::{AtomKind, Number, Span, Token, Value};
use logo_proc::{unwrap_outcome, EvalOutcome, PrimitiveContext, Procedure, ProcedureBody, ProcedureTable};
use logo_turtle::TurtleBackend;

use crate::numeric;
use crate::to_parser;
use crate::token_stream::TokenStream;

/// Errors visible at the top-level driving surface
/// (`process_instructionlist`/`receive_input`): either the text never
/// parsed, or evaluating it raised a genuine `LogoError`.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] LogoError),
}

pub struct Evaluator {
    env: Environment,
    procedures: ProcedureTable,
    turtle: Box<dyn TurtleBackend>,
    script_folders: Vec<String>,
    input: Box<dyn BufRead>,
    debug_tokens: bool,
    debug_primitives: bool,
    debug_procs: bool,
    pending_source: Option<String>,
}

/// The void return value for commands with no meaningful result
/// (`FORWARD`, `PRINT`, `MAKE`, ...) — an empty word, since `Value` has
/// no dedicated "nothing" variant. `receive_input` treats it as "nothing
/// to complain about".
#[must_use]
pub fn nothing() -> Value {
    Value::word("")
}

#[must_use]
pub fn is_nothing(value: &Value) -> bool {
    value.as_word().is_some_and(|w| w.as_str().is_empty())
}

impl Evaluator {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        env: Environment,
        procedures: ProcedureTable,
        turtle: Box<dyn TurtleBackend>,
        script_folders: Vec<String>,
        input: Box<dyn BufRead>,
        debug_tokens: bool,
        debug_primitives: bool,
        debug_procs: bool,
    ) -> Self {
        Evaluator {
            env,
            procedures,
            turtle,
            script_folders,
            input,
            debug_tokens,
            debug_primitives,
            debug_procs,
            pending_source: None,
        }
    }

    #[must_use]
    pub fn procedures(&self) -> &ProcedureTable {
        &self.procedures
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn install_backend(&mut self, turtle: Box<dyn TurtleBackend>) {
        self.turtle = turtle;
    }

    pub fn set_script_folders(&mut self, folders: Vec<String>) {
        self.script_folders = folders;
    }

    pub(crate) fn define_user_procedure(
        &mut self,
        name: &str,
        required_inputs: Vec<String>,
        optional_inputs: Vec<logo_proc::OptionalParam>,
        rest_input: Option<String>,
        default_arity_override: Option<i64>,
        body: Vec<Token>,
    ) {
        if self.debug_procs {
            tracing::debug!(procedure = name, "defined");
        }
        self.procedures.define_user(
            name,
            required_inputs,
            optional_inputs,
            rest_input,
            default_arity_override,
            body,
        );
    }

    /// Parses and runs a whole script: repeated top-level `evaluate()`
    /// calls over the flat token stream. Supports parse continuation: an
    /// unterminated `TO ... END` buffers the source and asks for more
    /// input (`ParseError::ExpectedEnd`) instead of failing.
    pub fn process_instructionlist(&mut self, script: &str) -> Result<Option<Value>, RunError> {
        let combined = match self.pending_source.take() {
            Some(buffered) => format!("{buffered}\n{script}"),
            None => script.to_string(),
        };
        let tokens = logo_parse::parse(&combined)?;
        if let Some(name) = to_parser::trailing_to_without_end(&tokens) {
            let span = tokens.last().map_or(Span::default(), Token::span);
            self.pending_source = Some(combined);
            return Err(RunError::Parse(ParseError::ExpectedEnd { name, span }));
        }
        self.pending_source = None;

        let mut stream = TokenStream::new(tokens);
        let mut result = None;
        while !stream.is_empty() {
            match self.evaluate(&mut stream)? {
                EvalOutcome::Value(v) => result = Some(v),
                signal => {
                    return Err(RunError::Eval(LogoError::other(format!(
                        "a control-flow signal ({signal:?}) escaped the top-level instruction list"
                    ))));
                }
            }
        }
        Ok(result)
    }

    /// The REPL-style entry point: runs `data` as a full command
    /// sequence, resetting `HALT` if it fires, and rejecting a leftover
    /// expression value with "you don't say what to do with X".
    pub fn receive_input(&mut self, data: &str) -> Result<(), RunError> {
        let tokens = logo_parse::parse(data)?;
        let outcome = self.run_tokens_raw(tokens)?;
        match outcome {
            EvalOutcome::Halt => {
                self.turtle.set_halt_requested(false);
                Ok(())
            }
            EvalOutcome::Value(v) if !is_nothing(&v) => Err(RunError::Eval(LogoError::other(
                format!("You don't say what to do with `{}`.", v.list_repr(true, false)),
            ))),
            _ => Ok(()),
        }
    }

    fn run_tokens_raw(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome> {
        let mut stream = TokenStream::new(tokens);
        let mut last = EvalOutcome::Value(nothing());
        while !stream.is_empty() {
            if self.turtle.halt_requested() {
                return Ok(EvalOutcome::Halt);
            }
            last = self.process_command(&mut stream)?;
            self.turtle.process_events();
            if last.is_signal() {
                return Ok(last);
            }
        }
        Ok(last)
    }

    fn run_script_str(&mut self, script: &str) -> LogoResult<EvalOutcome> {
        let tokens = logo_parse::parse(script).map_err(|e| LogoError::other(e.to_string()))?;
        self.run_instructionlist_tokens(tokens)
    }

    /// Runs a token stream via repeated `evaluate()` calls, propagating
    /// any control-flow signal unchanged rather than treating it as an
    /// escape error. This is the loop behind `run_value_as_instructions`
    /// and `run_source_text` (`LOAD`) -- distinct from `run_tokens_raw`,
    /// which is `execute_procedure`'s loop for running a user-defined
    /// procedure's own body. The distinction matters for bodies that
    /// are bare expressions rather than command sequences, e.g. a
    /// `?`-template `[? * ?]`: `*` isn't a command name, so only the
    /// infix-folding `evaluate()` loop handles it.
    fn run_instructionlist_tokens(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome> {
        let mut stream = TokenStream::new(tokens);
        let mut last = EvalOutcome::Value(nothing());
        while !stream.is_empty() {
            if self.turtle.halt_requested() {
                return Ok(EvalOutcome::Halt);
            }
            last = self.evaluate(&mut stream)?;
            self.turtle.process_events();
            if last.is_signal() {
                return Ok(last);
            }
        }
        Ok(last)
    }

    // ---- evaluate -------------------------------------------------

    #[tracing::instrument(level = "trace", skip_all)]
    pub(crate) fn evaluate(&mut self, stream: &mut TokenStream) -> LogoResult<EvalOutcome> {
        logo_stack::ensure_sufficient_stack(|| self.evaluate_uncapped(stream))
    }

    fn evaluate_uncapped(&mut self, stream: &mut TokenStream) -> LogoResult<EvalOutcome> {
        let value = unwrap_outcome!(self.evaluate_value(stream, false)?);
        if let Some(first) = value.as_number() {
            let mut terms = vec![first];
            loop {
                match peek_infix(stream) {
                    Some("-") => {
                        stream.popleft();
                        let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                        let n = require_number("difference", &rhs)?;
                        terms.push(numeric::negate(n));
                    }
                    Some("+") => {
                        stream.popleft();
                        let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                        terms.push(require_number("sum", &rhs)?);
                    }
                    Some("*") => {
                        stream.popleft();
                        let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                        let n = require_number("product", &rhs)?;
                        let last = terms.last_mut().expect("terms is never empty");
                        *last = numeric::mul(*last, n);
                    }
                    Some("/") => {
                        stream.popleft();
                        let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                        let n = require_number("quotient", &rhs)?;
                        let last = terms.last_mut().expect("terms is never empty");
                        *last = numeric::div_true("quotient", *last, n)?;
                    }
                    Some(rel @ ("<" | "<=" | ">" | ">=" | "=" | "<>")) => {
                        stream.popleft();
                        let lhs = Value::number(numeric::sum_all(&terms));
                        let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                        return self.dispatch_relational(rel, lhs, rhs);
                    }
                    _ => break,
                }
            }
            return Ok(EvalOutcome::Value(Value::number(numeric::sum_all(&terms))));
        }
        match peek_infix(stream) {
            Some(rel @ ("=" | "<>")) => {
                stream.popleft();
                let rhs = unwrap_outcome!(self.evaluate_value(stream, false)?);
                self.dispatch_relational(rel, value, rhs)
            }
            _ => Ok(EvalOutcome::Value(value)),
        }
    }

    fn dispatch_relational(&mut self, op: &str, lhs: Value, rhs: Value) -> LogoResult<EvalOutcome> {
        let name = match op {
            "<" => "lessp",
            "<=" => "lessequalp",
            ">" => "greaterp",
            ">=" => "greaterequalp",
            "=" => "equalp",
            "<>" => "notequalp",
            _ => unreachable!("peek_infix only yields known operators"),
        };
        let proc = self
            .procedures
            .get(name)
            .cloned()
            .ok_or_else(|| LogoError::unknown_command(name))?;
        self.execute_procedure(&proc, vec![lhs, rhs])
    }

    // ---- evaluate_value --------------------------------------------

    pub(crate) fn evaluate_value(&mut self, stream: &mut TokenStream, quoted: bool) -> LogoResult<EvalOutcome> {
        logo_stack::ensure_sufficient_stack(|| self.evaluate_value_uncapped(stream, quoted))
    }

    fn evaluate_value_uncapped(&mut self, stream: &mut TokenStream, quoted: bool) -> LogoResult<EvalOutcome> {
        let Some(token) = stream.peek().cloned() else {
            return Err(LogoError::other("expected a value but instead got EOF"));
        };

        if quoted {
            stream.popleft();
            return match token {
                Token::ListLit { items, .. } => Ok(EvalOutcome::Value(self.evaluate_quoted_list(items)?)),
                other => Ok(EvalOutcome::Value(token_to_literal_value(&other))),
            };
        }

        match token {
            Token::ListLit { items, .. } => {
                stream.popleft();
                Ok(EvalOutcome::Value(self.evaluate_quoted_list(items)?))
            }
            Token::SpecialForm { name, args, span } => {
                stream.popleft();
                self.process_special_form_or_expression(name, args, span)
            }
            Token::Group { items, .. } => {
                stream.popleft();
                let mut inner = TokenStream::new(items);
                self.evaluate(&mut inner)
            }
            Token::Number { value, .. } => {
                stream.popleft();
                Ok(EvalOutcome::Value(Value::number(value)))
            }
            Token::Atom {
                kind: AtomKind::QuotedWord,
                text,
                ..
            } => {
                stream.popleft();
                Ok(EvalOutcome::Value(Value::word(text)))
            }
            Token::Atom {
                kind: AtomKind::VarRef,
                text,
                ..
            } => {
                stream.popleft();
                Ok(EvalOutcome::Value(self.env.get_variable(&text)?))
            }
            Token::Atom {
                kind: AtomKind::Command,
                ref text,
                span,
            } if text != "-" && text.starts_with('-') => {
                stream.popleft();
                let rest = text[1..].to_string();
                stream.appendleft(classify_remainder(&rest, span));
                let inner = unwrap_outcome!(self.evaluate(stream)?);
                let n = inner
                    .as_number()
                    .ok_or_else(|| LogoError::wrong_type("-", &inner))?;
                Ok(EvalOutcome::Value(Value::number(numeric::negate(n))))
            }
            Token::Atom {
                kind: AtomKind::Command,
                ..
            } => self.process_command(stream),
        }
    }

    /// Evaluates a bracket list's contents in quoted mode, element by
    /// element — never folding infix (list-literal contents are never
    /// folded, per `logo_parse`) and never dispatching a nested
    /// `?`/`?N` placeholder early (it must stay literal until the list
    /// is later *run* as a template body).
    fn evaluate_quoted_list(&mut self, items: Vec<Token>) -> LogoResult<Value> {
        let mut inner = TokenStream::new(items);
        let mut out = Vec::new();
        while !inner.is_empty() {
            let v = unwrap_outcome!(self.evaluate_value(&mut inner, true)?);
            out.push(v);
        }
        Ok(Value::list(out))
    }

    // ---- process_command -------------------------------------------

    pub(crate) fn process_command(&mut self, stream: &mut TokenStream) -> LogoResult<EvalOutcome> {
        logo_stack::ensure_sufficient_stack(|| self.process_command_uncapped(stream))
    }

    fn process_command_uncapped(&mut self, stream: &mut TokenStream) -> LogoResult<EvalOutcome> {
        let Some(token) = stream.popleft() else {
            return Err(LogoError::other("expected a command but instead got EOF"));
        };
        match token {
            Token::SpecialForm { name, args, span } => self.process_special_form_or_expression(name, args, span),
            Token::Atom {
                kind: AtomKind::Command,
                text,
                ..
            } => {
                let lname = text.to_ascii_lowercase();
                if lname == "to" {
                    to_parser::parse_to(self, stream)?;
                    return Ok(EvalOutcome::Value(nothing()));
                }
                let Some(proc) = self.procedures.get(&lname).cloned() else {
                    return Err(LogoError::unknown_command(&text));
                };
                let arity = usize::try_from(proc.default_arity().max(0)).unwrap_or(0);
                let mut args = Vec::with_capacity(arity);
                while args.len() < arity {
                    let v = unwrap_outcome!(self.evaluate(stream)?);
                    args.push(v);
                }
                self.trace_dispatch(&lname, &proc, &args);
                self.execute_procedure(&proc, args)
            }
            other => Err(LogoError::expected_command(
                &other.as_literal_value().unwrap_or_else(nothing),
            )),
        }
    }

    fn trace_dispatch(&self, name: &str, proc: &Procedure, args: &[Value]) {
        if self.debug_primitives && proc.is_native() {
            tracing::debug!(command = name, ?args, "primitive dispatch");
        }
        if self.debug_procs && !proc.is_native() {
            tracing::debug!(command = name, ?args, "procedure call");
        }
    }

    // ---- process_special_form_or_expression -------------------------

    pub(crate) fn process_special_form_or_expression(
        &mut self,
        name: String,
        args: Vec<Token>,
        span: Span,
    ) -> LogoResult<EvalOutcome> {
        logo_stack::ensure_sufficient_stack(|| self.process_special_form_or_expression_uncapped(name, args, span))
    }

    fn process_special_form_or_expression_uncapped(
        &mut self,
        name: String,
        args: Vec<Token>,
        span: Span,
    ) -> LogoResult<EvalOutcome> {
        let lname = name.to_ascii_lowercase();

        // `(heading * -1 + 90)`: the second token is an infix operator,
        // so this isn't really a command invocation — re-read the whole
        // thing as an ordinary expression starting with `name`.
        let looks_like_expression = args.first().is_some_and(Token::is_infix_operator);
        if looks_like_expression {
            return self.evaluate_rebuilt(name, args, span);
        }

        let Some(proc) = self.procedures.get(&lname).cloned() else {
            return self.evaluate_rebuilt(name, args, span);
        };

        let mut values = Vec::new();
        let mut inner = TokenStream::new(args);
        while !inner.is_empty() {
            let v = unwrap_outcome!(self.evaluate(&mut inner)?);
            values.push(v);
        }

        if !proc.accepts_arity(values.len()) {
            return Err(LogoError::wrong_arity(&name, arity_description(&proc), values.len()));
        }

        self.trace_dispatch(&lname, &proc, &values);
        self.execute_procedure(&proc, values)
    }

    fn evaluate_rebuilt(&mut self, name: String, args: Vec<Token>, span: Span) -> LogoResult<EvalOutcome> {
        let mut rebuilt = Vec::with_capacity(args.len() + 1);
        rebuilt.push(Token::command(name, span));
        rebuilt.extend(args);
        let mut stream = TokenStream::new(rebuilt);
        self.evaluate(&mut stream)
    }

    // ---- execute_procedure ------------------------------------------

    pub(crate) fn execute_procedure(&mut self, proc: &Procedure, args: Vec<Value>) -> LogoResult<EvalOutcome> {
        logo_stack::ensure_sufficient_stack(|| self.execute_procedure_uncapped(proc, args))
    }

    fn execute_procedure_uncapped(&mut self, proc: &Procedure, args: Vec<Value>) -> LogoResult<EvalOutcome> {
        match &proc.body {
            ProcedureBody::Native { func, .. } => func(self, args),
            ProcedureBody::UserDefined {
                required_inputs,
                optional_inputs,
                rest_input,
                body,
                ..
            } => {
                self.env.push_scope();
                let bind_result =
                    self.bind_formal_params(required_inputs, optional_inputs, rest_input.as_deref(), args, &proc.name);
                let outcome = match bind_result {
                    Ok(()) => self.run_tokens_raw(body.clone()),
                    Err(e) => Err(e),
                };
                self.env.pop_scope();
                match outcome {
                    Ok(EvalOutcome::Stop) => Ok(EvalOutcome::Value(nothing())),
                    Ok(EvalOutcome::Output(v)) => Ok(EvalOutcome::Value(v)),
                    other => other,
                }
            }
        }
    }

    fn bind_formal_params(
        &mut self,
        required: &[String],
        optional: &[logo_proc::OptionalParam],
        rest: Option<&str>,
        args: Vec<Value>,
        proc_name: &str,
    ) -> LogoResult<()> {
        let mut args_iter = args.into_iter();
        for name in required {
            match args_iter.next() {
                Some(v) => self.env.localmake(name, v),
                None => {
                    return Err(LogoError::other(format!(
                        "{} has no value for formal parameter `{name}`.",
                        proc_name.to_ascii_uppercase()
                    )))
                }
            }
        }
        for opt in optional {
            match args_iter.next() {
                Some(v) => self.env.localmake(&opt.name, v),
                None => {
                    let mut stream = TokenStream::new(opt.default.clone());
                    let outcome = self.evaluate(&mut stream)?;
                    let v = match outcome {
                        EvalOutcome::Value(v) => v,
                        _ => {
                            return Err(LogoError::other(format!(
                                "default for `{}` produced a control signal instead of a value",
                                opt.name
                            )))
                        }
                    };
                    self.env.localmake(&opt.name, v);
                }
            }
        }
        if let Some(rest_name) = rest {
            let extra: Vec<Value> = args_iter.collect();
            self.env.localmake(rest_name, Value::list(extra));
        } else if let Some(extra) = args_iter.next() {
            let remaining = 1 + args_iter.count();
            return Err(LogoError::bad_input(proc_name, &extra).context_extra_args(remaining));
        }
        Ok(())
    }
}

fn arity_description(proc: &Procedure) -> String {
    let min = proc.min_arity();
    let max = proc.max_arity();
    if max == min {
        min.to_string()
    } else if max == -1 {
        format!("at least {min}")
    } else {
        format!("{min}-{max}")
    }
}

fn require_number(command: &str, value: &Value) -> LogoResult<Number> {
    value.as_number().ok_or_else(|| LogoError::wrong_type(command, value))
}

fn peek_infix(stream: &TokenStream) -> Option<&'static str> {
    match stream.peek() {
        Some(Token::Atom {
            kind: AtomKind::Command,
            text,
            ..
        }) => match text.as_str() {
            "+" => Some("+"),
            "-" => Some("-"),
            "*" => Some("*"),
            "/" => Some("/"),
            "<" => Some("<"),
            "<=" => Some("<="),
            ">" => Some(">"),
            ">=" => Some(">="),
            "=" => Some("="),
            "<>" => Some("<>"),
            _ => None,
        },
        _ => None,
    }
}

/// Re-classifies the remainder of a fused negative literal (`-:x`,
/// `-foo`) the way `logo_parse::build_atom` would have, had it been
/// lexed on its own. Only reached from the minus-prefix rewrite in
/// `evaluate_value`.
fn classify_remainder(text: &str, span: Span) -> Token {
    if let Some(rest) = text.strip_prefix(':') {
        return Token::var_ref(rest, span);
    }
    if let Some(rest) = text.strip_prefix('"') {
        return Token::quoted_word(rest, span);
    }
    if let Ok(n) = Number::parse(text) {
        return Token::Number { value: n, span };
    }
    Token::command(text, span)
}

/// Converts a token to the literal `Value` it represents when read
/// "verbatim" in quoted mode. `Token::as_literal_value` already covers
/// `Number`/`QuotedWord`/`Command`/`ListLit`; this adds the two shapes
/// that only arise from the runtime's own eager `?N` and paren-group
/// parsing (`VarRef`, `Group`, `SpecialForm`), since a quoted list's
/// grammar doesn't parse parens specially.
fn token_to_literal_value(token: &Token) -> Value {
    if let Some(v) = token.as_literal_value() {
        return v;
    }
    match token {
        Token::Atom {
            kind: AtomKind::VarRef,
            text,
            ..
        } => Value::word(format!(":{text}")),
        Token::SpecialForm { name, args, .. } if name == "?" => match args.first() {
            Some(Token::Number {
                value: Number::Int(n),
                ..
            }) if *n != 1 => Value::word(format!("?{n}")),
            _ => Value::word("?"),
        },
        Token::SpecialForm { name, args, .. } => {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(Value::word(name.as_str()));
            items.extend(args.iter().map(token_to_literal_value));
            Value::list(items)
        }
        Token::Group { items, .. } => Value::list(items.iter().map(token_to_literal_value).collect()),
        _ => unreachable!("as_literal_value already handled Number/QuotedWord/Command/ListLit"),
    }
}

impl PrimitiveContext for Evaluator {
    fn env(&mut self) -> &mut Environment {
        &mut self.env
    }

    fn env_ref(&self) -> &Environment {
        &self.env
    }

    fn procedures(&mut self) -> &mut ProcedureTable {
        &mut self.procedures
    }

    fn procedures_ref(&self) -> &ProcedureTable {
        &self.procedures
    }

    fn turtle(&mut self) -> &mut dyn TurtleBackend {
        self.turtle.as_mut()
    }

    fn script_folders(&self) -> &[String] {
        &self.script_folders
    }

    fn debug_tokens(&self) -> bool {
        self.debug_tokens
    }

    fn debug_primitives(&self) -> bool {
        self.debug_primitives
    }

    fn debug_procs(&self) -> bool {
        self.debug_procs
    }

    fn run_tokens(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome> {
        self.run_tokens_raw(tokens)
    }

    fn run_value_as_instructions(&mut self, list: &Value) -> LogoResult<EvalOutcome> {
        let script = list.list_repr(false, false);
        self.run_script_str(&script)
    }

    fn evaluate_tokens(&mut self, tokens: Vec<Token>) -> LogoResult<EvalOutcome> {
        let mut stream = TokenStream::new(tokens);
        self.evaluate(&mut stream)
    }

    fn call_procedure(&mut self, proc: &Procedure, args: Vec<Value>) -> LogoResult<EvalOutcome> {
        self.execute_procedure(proc, args)
    }

    fn read_input_line(&mut self) -> LogoResult<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| LogoError::other(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn run_source_text(&mut self, text: &str) -> LogoResult<EvalOutcome> {
        self.run_script_str(text)
    }

    fn read_list_value(&mut self, text: &str) -> LogoResult<Value> {
        let bracketed = format!("[{text}]");
        let tokens = logo_parse::parse(&bracketed).map_err(|e| LogoError::other(e.to_string()))?;
        match tokens.into_iter().next() {
            Some(Token::ListLit { items, .. }) => self.evaluate_quoted_list(items),
            _ => Err(LogoError::other("readlist: failed to parse input as a list")),
        }
    }
}
