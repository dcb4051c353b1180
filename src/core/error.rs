//! Error taxonomy for the scan pipeline.
//!
//! Fatal errors (`KeySourceError`, `DiscoveryError`, `OutputWriteError`) abort
//! the run and carry the path that failed. Per-file errors (`FileError`) never
//! leave the aggregator: they are recorded in the tally as `FileFailure`s.

use std::{io, path::PathBuf, str::Utf8Error};

use thiserror::Error;

/// The key-source document could not be turned into a key set.
#[derive(Debug, Error)]
pub enum KeySourceError {
    #[error("failed to read key file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse key file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported key file format {path:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },
}

/// The source tree could not be walked.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("source root does not exist: {0:?}")]
    MissingRoot(PathBuf),

    #[error("source root is not a directory: {0:?}")]
    NotADirectory(PathBuf),
}

/// A single file could not be counted. The file contributes nothing to the tally.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read file: {0}")]
    Read(#[from] io::Error),

    #[error("not a text file: {0}")]
    Decode(#[from] DecodeError),
}

/// File content is not text.
#[derive(Debug, Error)]
#[error("invalid UTF-8 at byte {}", .0.valid_up_to())]
pub struct DecodeError(#[from] pub Utf8Error);

/// The result sink could not be written.
///
/// Raised only after aggregation completed; the writer borrows the tally, so the
/// caller still holds the computed counts.
#[derive(Debug, Error)]
#[error("failed to write output to {destination}")]
pub struct OutputWriteError {
    pub destination: String,
    #[source]
    pub source: io::Error,
}
