//! Error types for stamping and verification.

use std::path::PathBuf;

/// Result type for fimark-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Verification only: the file carries no integrity marker at all.
    #[error("no integrity marker found")]
    MarkerNotFound,

    /// Verification only: a marker line is present but its payload is not
    /// exactly eight uppercase hex digits. Stamping treats this as absent.
    #[error("malformed integrity marker payload")]
    MalformedMarker,

    /// Verification only: an empty file cannot carry a marker.
    #[error("cannot verify an empty file")]
    EmptyFile,

    /// The buffer must be able to hold the marker window plus refill space.
    #[error("buffer size {given} too small: must exceed the {minimum}-byte marker window")]
    BufferTooSmall { given: usize, minimum: usize },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
