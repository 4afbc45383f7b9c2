//! `testast`: inspect `.ast` fixtures and check AST dumps against them.

mod lines;
mod logging;
mod show;

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use sectscan::{Fixture, FixtureError, ReaderStream, ScanError, StreamError};
use thiserror::Error;
use tracing::info;

use crate::logging::LogLevel;

const AFTER_HELP: &str = "\
Compares the AST produced by parsing the INPUT section with the EXPECT section of an .ast file.

Example .ast file:

### INPUT
1
### EXPECT
NUM 1.00";

#[derive(Parser)]
#[command(
    name = "testast",
    version,
    about = "Inspect and check .ast test fixtures",
    after_help = AFTER_HELP,
    arg_required_else_help = true
)]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each bounded fill of the INPUT section, then both sections.
    Show {
        file: PathBuf,
        /// Capture buffer size, terminator included.
        #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(2..))]
        chunk: u16,
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Dump every bounded line read of a file.
    Lines {
        file: PathBuf,
        /// Line buffer size, terminator included.
        #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(2..))]
        buffer: u16,
    },
    /// Compare an AST dump with the EXPECT section of a fixture.
    Check { file: PathBuf, actual: PathBuf },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: FixtureError<StreamError>,
    },
    #[error("{}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError<StreamError>,
    },
    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Show { file, chunk, json } => {
            let mut stream = open(&file)?;
            let report = show::inspect(&mut stream, chunk.into()).map_err(|source| {
                CliError::Fixture {
                    path: file.clone(),
                    source,
                }
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Lines { file, buffer } => {
            let mut stream = open(&file)?;
            let dump = lines::dump_lines(&mut stream, buffer.into())
                .map_err(|source| CliError::Scan { path: file, source })?;
            print!("{dump}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file, actual } => check(&file, &actual),
    }
}

fn open(path: &Path) -> Result<ReaderStream<File>, CliError> {
    info!(path = %path.display(), "reading");
    let file = File::open(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok(ReaderStream::new(file))
}

fn check(file: &Path, actual: &Path) -> Result<ExitCode, CliError> {
    let fixture = Fixture::open(file).map_err(|source| CliError::Fixture {
        path: file.to_owned(),
        source,
    })?;
    let dump = fs::read(actual).map_err(|source| CliError::Read {
        path: actual.to_owned(),
        source,
    })?;
    match fixture.first_mismatch(&dump) {
        None => {
            println!("ok: {}", file.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(mismatch) => {
            println!("FAIL: {}", file.display());
            println!("  {mismatch}");
            Ok(ExitCode::FAILURE)
        }
    }
}
