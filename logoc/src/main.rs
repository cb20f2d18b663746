//! Minimal example driver: reads a Logo script (a file path argument, or
//! stdin when none is given), installs a [`logo_turtle::NullBackend`],
//! and runs it through [`logo_eval::Evaluator::process_instructionlist`].
//! Not a general-purpose CLI -- the core exposes
//! `process_instructionlist`/`receive_input`; exit codes and flag set are
//! a driver's own concern.

mod tracing_setup;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use logo_eval::EvaluatorBuilder;
use logo_turtle::NullBackend;

fn main() -> ExitCode {
    tracing_setup::init();

    let mut args = std::env::args().skip(1);
    let mut script_path: Option<PathBuf> = None;
    let mut debug_tokens = false;
    let mut debug_primitives = false;
    let mut debug_procs = false;

    for arg in &mut args {
        match arg.as_str() {
            "--debug-tokens" => debug_tokens = true,
            "--debug-primitives" => debug_primitives = true,
            "--debug-procs" => debug_procs = true,
            other => script_path = Some(PathBuf::from(other)),
        }
    }

    let source = match &script_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("logo: couldn't read {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut text = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                eprintln!("logo: couldn't read stdin: {e}");
                return ExitCode::FAILURE;
            }
            text
        }
    };

    let script_folders = script_path
        .as_ref()
        .and_then(|p| p.parent())
        .map(|dir| vec![dir.to_string_lossy().to_string()])
        .unwrap_or_default();

    let mut evaluator = EvaluatorBuilder::new()
        .turtle(Box::new(NullBackend::new()))
        .script_folders(script_folders)
        .debug_tokens(debug_tokens)
        .debug_primitives(debug_primitives)
        .debug_procs(debug_procs)
        .build();

    match evaluator.process_instructionlist(&source) {
        Ok(Some(value)) => {
            println!("{}", value.list_repr(true, false));
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("logo: {e}");
            ExitCode::FAILURE
        }
    }
}
