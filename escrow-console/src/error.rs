//! Console error types.

use std::path::PathBuf;

use escrow_lib::error::FetchError;
use thiserror::Error;

/// Errors that end the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown column kind '{0}'")]
    UnknownColumnKind(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A console command line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number")]
    NotANumber(String),
}
