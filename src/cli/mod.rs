//! CLI support for rpal-ast
//!
//! Argument-shape dispatch and the `-ast` pipeline, kept in the library so
//! they can be driven without spawning the binary.

mod ast;

pub use ast::{execute_ast, parse_file};

use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Malformed command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("FILE_NAME expected")]
    MissingFileName,

    #[error("Unidentified switch '{0}'")]
    UnidentifiedSwitch(String),

    #[error("Illegal parameters")]
    IllegalParameters,
}

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error: {0}")]
    Usage(#[from] UsageError),

    #[error("Error: cannot read '{}': {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Syntax error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What a command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No arguments: do nothing.
    Nothing,
    /// `-l`: source listing. Recognised but not produced.
    Listing,
    /// `-ast FILE`: print the syntax tree of FILE.
    Ast(PathBuf),
}

impl Invocation {
    /// Reads the argument shape. Switches are case-insensitive.
    pub fn from_args<A: AsRef<str>>(args: &[A]) -> Result<Self, UsageError> {
        match args {
            [] => Ok(Invocation::Nothing),
            [switch] if switch.as_ref().eq_ignore_ascii_case("-l") => Ok(Invocation::Listing),
            [switch] if switch.as_ref().eq_ignore_ascii_case("-ast") => {
                Err(UsageError::MissingFileName)
            }
            [switch] => Err(UsageError::UnidentifiedSwitch(switch.as_ref().to_string())),
            [switch, file] if switch.as_ref().eq_ignore_ascii_case("-ast") => {
                Ok(Invocation::Ast(PathBuf::from(file.as_ref())))
            }
            _ => Err(UsageError::IllegalParameters),
        }
    }
}

/// Carries out `invocation`, writing any AST listing to `out`.
pub fn run<W: Write>(invocation: &Invocation, out: &mut W) -> Result<(), CliError> {
    match invocation {
        Invocation::Nothing => Ok(()),
        Invocation::Listing => {
            tracing::debug!("listing requested; not produced");
            Ok(())
        }
        Invocation::Ast(path) => execute_ast(path, out),
    }
}
