//! CLI-level errors (wraps application errors)

use std::io;

use clap::error::ErrorKind;
use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Exit code for a failed argument parse: help and version requests
/// succeed, everything else is a usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => crate::exitcode::OK,
        _ => crate::exitcode::USAGE,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::MalformedTree { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::TreeNotFound(_) => crate::exitcode::NOINPUT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { source, .. } => {
                    if source.downcast_ref::<io::Error>().is_some() {
                        crate::exitcode::IOERR
                    } else {
                        crate::exitcode::SOFTWARE
                    }
                }
            },
        }
    }
}
