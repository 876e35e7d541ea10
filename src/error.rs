//! Error types for the filesift classification engine.
//!
//! Per-file failures (`NotFound`, `Io`) are local to the file that raised
//! them; the walker records them as findings and keeps going. `InvalidDatabase`
//! is fatal at construction time: tie-break determinism assumes a validated
//! database, so the engine refuses to classify with a malformed one.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for filesift operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// The path exists but could not be read (permissions, transient I/O).
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or duplicate entries detected while loading the database.
    #[error("invalid signature database: {0}")]
    InvalidDatabase(String),
}

impl Error {
    /// Map an open/read failure on `path` to the error taxonomy.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { path },
            _ => Error::Io { path, source },
        }
    }

    /// True for errors that are local to a single file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::Io { .. })
    }
}

/// Result type alias for filesift operations.
pub type Result<T> = std::result::Result<T, Error>;
