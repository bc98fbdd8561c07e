//! Single-pass compiler and stack-based virtual machine for a small
//! dynamically-typed scripting language.

pub mod chunk;
pub mod compiler;
pub mod environment;
pub mod error;
pub mod lexer;
pub mod object;
pub mod table;
pub mod value;
pub mod vm;

use environment::Environment;
use error::{CompileError, RuntimeError};
use log::info;

/// Compiles and immediately runs one source buffer in a fresh environment.
/// Mirrors the library's one public entry point: a binary (or test) hands
/// in source text and gets back either success, a batch of compile
/// diagnostics, or a single fatal runtime error.
pub fn run(source: &str) -> Result<(), Failure> {
    let mut env = Environment::new();

    compiler::compile(source, &mut env).map_err(Failure::Compile)?;
    info!("compiled {} bytes of source", source.len());

    vm::Vm::new(&mut env).run().map_err(Failure::Runtime)?;
    info!("run finished");

    Ok(())
}

/// Either phase can fail; the binary maps each variant to its own exit code.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
