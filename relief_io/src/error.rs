//! Error types for relief_io operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading binary STL.
#[derive(Error, Debug)]
pub enum StlError {
    /// Underlying stream or file failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not a well-formed binary STL.
    #[error("invalid STL format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// The triangle count no longer fits the 32-bit count field.
    #[error("triangle count exceeds the binary STL limit of {} records", u32::MAX)]
    TooManyTriangles,

    /// The destination path has no file name to derive a partial file from.
    #[error("invalid output path: {}", .path.display())]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
    },
}

impl StlError {
    pub(crate) fn invalid_format(message: impl Into<String>) -> Self {
        StlError::InvalidFormat {
            message: message.into(),
        }
    }
}

/// Result type alias for relief_io operations.
pub type Result<T> = core::result::Result<T, StlError>;
