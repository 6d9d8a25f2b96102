//! constfold - compile-time constant expression evaluator
//!
//! Parses a source file of constant declarations and expressions, folds every
//! constant it can and prints the exact values.

use clap::Parser;
use evaluator::{
    fold_constants, report_diagnostics, report_type_name_errors, ErrorReporter, FoldedModule,
    SessionMode,
};
use log::{debug, error, info};
use parser::error::{report_errors, report_lex_error, report_resolve_errors, SourceError};
use parser::module::Module;
use std::fs;
use std::path::PathBuf;
use std::process;
use types::{TypeProvider, TypeRef};

const EXIT_OK: i32 = 0;
const EXIT_FRONTEND: i32 = 1;
const EXIT_DIAGNOSTICS: i32 = 2;
const EXIT_FATAL: i32 = 3;

/// Fold the constants of a source file
#[derive(Parser, Debug)]
#[command(name = "constfold")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Evaluate every item in a fresh session instead of sharing one memo table
    #[arg(long)]
    one_shot: bool,

    /// Only run the lexer and print tokens
    #[arg(long)]
    tokens: bool,

    /// Disable colors in evaluation diagnostics
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    let filename = args.input.display().to_string();
    let source = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", filename, e);
            return EXIT_FRONTEND;
        }
    };
    debug!("read {} bytes from {}", source.len(), filename);

    if args.tokens {
        return print_tokens(&filename, &source);
    }

    let Some(module) = build_module(&filename, &source) else {
        return EXIT_FRONTEND;
    };

    let types = match TypeProvider::for_module(&module) {
        Ok(types) => types,
        Err(errors) => {
            if let Err(io) = report_type_name_errors(&filename, &source, &errors) {
                error!("failed to write diagnostics: {}", io);
            }
            return EXIT_FRONTEND;
        }
    };

    let mode = if args.one_shot {
        SessionMode::OneShot
    } else {
        SessionMode::Shared
    };
    info!("folding {} with {:?} sessions", filename, mode);

    let mut reporter = ErrorReporter::new();
    let folded = fold_constants(&module, &types, &mut reporter, mode);
    print_folded(&module, &source, &folded);

    if let Err(e) = report_diagnostics(&filename, &source, reporter.diagnostics(), !args.no_color) {
        error!("failed to write diagnostics: {}", e);
    }

    if reporter.has_fatal() {
        EXIT_FATAL
    } else if reporter.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_OK
    }
}

fn print_tokens(filename: &str, source: &str) -> i32 {
    match lexer::lex_spanned(source) {
        Ok(tokens) => {
            for (token, span) in tokens {
                println!("{:4}..{:<4} {}", span.start, span.end, token);
            }
            EXIT_OK
        }
        Err(e) => {
            if let Err(io) = report_lex_error(filename, source, &e) {
                error!("failed to write diagnostics: {}", io);
            }
            EXIT_FRONTEND
        }
    }
}

/// Parse and resolve, reporting any failure
fn build_module(filename: &str, source: &str) -> Option<Module> {
    let program = match parser::parse_source(source) {
        Ok(program) => program,
        Err(SourceError::Lex(e)) => {
            if let Err(io) = report_lex_error(filename, source, &e) {
                error!("failed to write diagnostics: {}", io);
            }
            return None;
        }
        Err(SourceError::Parse(errors)) => {
            if let Err(io) = report_errors(filename, source, &errors) {
                error!("failed to write diagnostics: {}", io);
            }
            return None;
        }
    };

    match Module::lower(&program) {
        Ok(module) => Some(module),
        Err(errors) => {
            if let Err(io) = report_resolve_errors(filename, source, &errors) {
                error!("failed to write diagnostics: {}", io);
            }
            None
        }
    }
}

fn describe(value: Option<&TypeRef>) -> Option<String> {
    value
        .and_then(|v| v.as_rational())
        .map(|r| r.to_string())
}

fn print_folded(module: &Module, source: &str, folded: &FoldedModule) {
    for constant in &folded.constants {
        let ty = constant.declared_type.as_ref().or(constant.source_type.as_ref());
        match (describe(constant.value.as_ref()), ty) {
            (Some(value), Some(ty)) => println!("{}: {} = {}", constant.name, ty, value),
            (Some(value), None) => println!("{} = {}", constant.name, value),
            (None, _) => println!("{}: not constant", constant.name),
        }
    }

    for expression in &folded.expressions {
        let span = module.node(expression.expr).span.clone();
        let text = source.get(span).unwrap_or_default();
        match describe(expression.value.as_ref()) {
            Some(value) => println!("{} = {}", text, value),
            None => println!("{}: not constant", text),
        }
    }
}
