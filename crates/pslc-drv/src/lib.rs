//! Command-line entry point: reads one source file, runs it through the
//! lexer, parser and semantic checker, and reports the outcome.
//!
//! Everything here is a thin boundary. All real engineering lives in
//! `pslc-lex`, `pslc-par` and `pslc-sem`; this crate only wires them
//! together and decides what reaches the terminal.

use std::fmt;
use std::path::Path;

use pslc_par::Parser;
use pslc_sem::Analyzer;
use pslc_util::{CompileError, Interner};

mod print;

/// Everything that can terminate the process: a missing argument, a file
/// the OS won't open, or (via [`DriverError::Compile`]) the first
/// `CompileError` raised by the lexer, parser or semantic checker.
///
/// Every internal layer returns a `Result` all the way up to [`run`]; only
/// `main` prints the error and sets the process exit code, per the
/// single-top-level-boundary design this driver follows.
#[derive(Debug)]
pub enum DriverError {
    NoInputFile,
    CantReadInputFile,
    Compile(CompileError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::NoInputFile => write!(f, "parser: no input file."),
            DriverError::CantReadInputFile => write!(f, "Can't read input file!"),
            DriverError::Compile(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<CompileError> for DriverError {
    fn from(e: CompileError) -> Self {
        DriverError::Compile(e)
    }
}

/// Parses `std::env::args()` for the single positional file-path argument.
pub fn run() -> Result<(), DriverError> {
    let path = std::env::args_os()
        .nth(1)
        .ok_or(DriverError::NoInputFile)?;
    compile_file(Path::new(&path))
}

fn compile_file(path: &Path) -> Result<(), DriverError> {
    let source = std::fs::read_to_string(path).map_err(|_| DriverError::CantReadInputFile)?;

    let mut interner = Interner::new();
    let program = compile(&source, &mut interner)?;
    println!("{}", print::program_tree(&program, &interner));
    Ok(())
}

/// Lexes, parses and semantically checks `source`, returning the parsed
/// program on success. A single `CompileError` is the only failure mode —
/// the compiler is fail-fast and never recovers to report a second fault.
fn compile(source: &str, interner: &mut Interner) -> Result<pslc_par::ast::Program, CompileError> {
    let program = Parser::new(source, interner)?.parse_program()?;
    let mut analyzer = Analyzer::new(interner);
    analyzer.check_program(&program)?;
    Ok(program)
}
