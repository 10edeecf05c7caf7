//! Vela command-line driver.
//!
//! Hand-rolled argv dispatch rather than a `clap` dependency, matching the
//! teacher's `oric/src/main.rs` — this CLI has exactly two subcommands and
//! a single flag, which does not earn a parsing framework.

mod diagnostics;
mod tracing_setup;

use std::path::PathBuf;
use std::rc::Rc;

use vela_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use vela_ir::StringInterner;

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let (command, rest) = (args[1].as_str(), &args[2..]);
    match command {
        "run" => run(rest),
        "check" => check(rest),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Vela ({})", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: velac <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>    Evaluate a Vela module and print its result");
    println!("  check <file>  Parse a Vela module without evaluating it");
    println!("  help          Show this help message");
    println!();
    println!("Options:");
    println!("  --color=<auto|always|never>  Control diagnostic colors (default: auto)");
    println!();
    println!("Environment:");
    println!("  VELA_PATH     Colon-separated list of directories searched for imports");
}

struct Invocation {
    path: String,
    color: ColorMode,
}

fn parse_invocation(usage: &str, args: &[String]) -> Invocation {
    let mut path = None;
    let mut color = ColorMode::Auto;

    for arg in args {
        if let Some(mode) = arg.strip_prefix("--color=") {
            color = match mode {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                other => {
                    eprintln!("Unknown --color value: {other}");
                    std::process::exit(1);
                }
            };
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            eprintln!("{usage}");
            std::process::exit(1);
        }
    }

    let Some(path) = path else {
        eprintln!("{usage}");
        std::process::exit(1);
    };
    Invocation { path, color }
}

fn import_search_paths() -> Vec<PathBuf> {
    std::env::var("VELA_PATH")
        .ok()
        .map(|value| std::env::split_paths(&value).collect())
        .unwrap_or_default()
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("error reading '{path}': {err}");
        std::process::exit(1);
    })
}

fn emit(diagnostic: &vela_diagnostic::Diagnostic, source: &str, color: ColorMode) {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::new(std::io::stderr(), color, is_tty);
    emitter.emit(source, diagnostic);
}

fn check(args: &[String]) {
    let invocation = parse_invocation("Usage: velac check <file> [--color=auto|always|never]", args);
    let source = read_source(&invocation.path);
    let interner = Rc::new(StringInterner::new());

    match vela_parse::parse(&source, &interner) {
        Ok(_) => println!("OK: {}", invocation.path),
        Err(err) => {
            emit(&err.to_diagnostic(invocation.path.clone()), &source, invocation.color);
            std::process::exit(1);
        }
    }
}

fn run(args: &[String]) {
    let invocation = parse_invocation("Usage: velac run <file> [--color=auto|always|never]", args);
    let source = read_source(&invocation.path);
    let interner = Rc::new(StringInterner::new());

    let (arena, root) = match vela_parse::parse(&source, &interner) {
        Ok(parsed) => parsed,
        Err(err) => {
            emit(&err.to_diagnostic(invocation.path.clone()), &source, invocation.color);
            std::process::exit(1);
        }
    };

    let ctx = vela_eval::EvalContext::new(interner, import_search_paths(), invocation.path.as_str());
    let env = vela_eval::root_bindings(&ctx);

    let result = vela_eval::evaluate(&arena, root, &env, &ctx).and_then(|value| vela_eval::display_string(value, &ctx));
    let crash = ctx.take_crash_message();

    match result {
        Ok(text) => println!("{text}"),
        Err(err) => {
            let diagnostic = diagnostics::to_diagnostic(&err, &invocation.path);
            emit(&diagnostic, &source, invocation.color);
            if let Some(message) = crash {
                eprintln!("   = crash: {message}");
            }
            std::process::exit(1);
        }
    }
}
