use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Bad command line input. Nothing has been read or written yet.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing filename argument")]
    MissingInput,

    #[error("PERCENT must be between 0 and 100, got {0}")]
    PercentOutOfRange(i64),

    #[error("number of validation folds can't be negative, got {0}")]
    NegativeFolds(i64),

    #[error("well size must be at least 1")]
    ZeroWellSize,

    #[error(transparent)]
    Splitter(#[from] splitter::Error),
}

/// Failures while splitting. All of them end the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("error opening {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("unable to read input: {0}")]
    Read(#[source] io::Error),

    #[error("unable to open {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("unable to write line to {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Splitter(#[from] splitter::Error),

    #[error("unable to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("unable to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
