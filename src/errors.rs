use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Bring in specific errors from the modules we want to wrap
use crate::config::ConfigError;
use crate::coordinator::AcquireError;
use crate::engine::ExportError;
use crate::fetch::FetchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Acquisition error: {0}")]
    Acquire(#[from] AcquireError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Cannot open {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;
