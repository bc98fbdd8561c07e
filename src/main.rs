//! # scriptlang
//!
//! This binary compiles and runs a single source file: lex, compile to
//! bytecode, execute. There is exactly one positional argument; there are
//! no flags beyond `--help`/`--version`, since the CLI surface is itself
//! part of this interpreter's testable contract.

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use simple_logger::SimpleLogger;

use scriptlang::Failure;

/// Sysexits-style `EX_SOFTWARE`, used for a fatal runtime error so scripts
/// that crash at runtime are distinguishable from ones rejected outright.
const EX_SOFTWARE: u8 = 70;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the script to compile and run.
    file: std::path::PathBuf,
}

fn main() -> ExitCode {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Error)
        .env()
        .init()
        .unwrap();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    let source = match fs::read_to_string(&args.file).with_context(|| {
        format!("could not read file '{}'", args.file.to_string_lossy())
    }) {
        Ok(source) => source,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::from(1);
        }
    };

    info!("loaded {}", args.file.to_string_lossy());

    match scriptlang::run(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Compile(err)) => {
            for diagnostic in &err.0 {
                eprintln!("{diagnostic}");
            }
            ExitCode::from(1)
        }
        Err(Failure::Runtime(err)) => {
            eprintln!("{err}");
            ExitCode::from(EX_SOFTWARE)
        }
    }
}
