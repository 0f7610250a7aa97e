//! CLI-level errors (wraps domain and engine errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;
use crate::engine::EngineError;

/// Top-level error type: what gets displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid family file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("a person named '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("person '{0}' does not exist")]
    UnknownName(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
