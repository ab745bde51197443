//! The fetch transport that supplies the startup model.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("fetch worker stopped before answering")]
    Disconnected,
}

/// A completed fetch: the raw payload and the filename, when the transport
/// knows one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub payload: Vec<u8>,
    pub filename: Option<String>,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Completed(Option<FetchResponse>),
    Failed(FetchError),
}

pub trait FetchTransport: Send + 'static {
    /// One request. `Ok(None)` is an empty answer.
    fn fetch(&self) -> Result<Option<FetchResponse>, FetchError>;
}

/// Serves the model from a path on the local file system.
#[derive(Debug, Clone)]
pub struct PathTransport {
    path: PathBuf,
}

impl PathTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FetchTransport for PathTransport {
    fn fetch(&self) -> Result<Option<FetchResponse>, FetchError> {
        let payload = fs::read(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        if payload.is_empty() {
            return Ok(None);
        }
        let filename = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Some(FetchResponse { payload, filename }))
    }
}

/// Runs the transport on a worker thread. The receiver yields one outcome.
pub fn spawn_fetch<T: FetchTransport>(transport: T) -> Receiver<FetchOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = match transport.fetch() {
            Ok(response) => FetchOutcome::Completed(response),
            Err(err) => {
                warn!(error = %err, "fetch failed");
                FetchOutcome::Failed(err)
            }
        };
        if tx.send(outcome).is_err() {
            debug!("fetch outcome receiver dropped");
        }
    });
    rx
}
