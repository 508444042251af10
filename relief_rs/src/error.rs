//! Error types for relief_rs operations.

use relief_core::CoreError;
use relief_io::StlError;
use thiserror::Error;

/// Errors that can occur while carving or exporting a volume.
#[derive(Error, Debug)]
pub enum ReliefError {
    /// Volume access or construction failure (`OutOfBounds`, `InvalidDimensions`).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// STL serialization failure, including I/O.
    #[error(transparent)]
    Stl(#[from] StlError),

    /// Invalid export or carving configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Pixel buffer length does not match the declared image size.
    #[error("image buffer holds {got} pixels, expected {expected}")]
    ImageSize {
        /// `width × height` of the declared image.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}

impl From<std::io::Error> for ReliefError {
    fn from(err: std::io::Error) -> Self {
        ReliefError::Stl(StlError::Io(err))
    }
}

/// Result type alias for relief_rs operations.
pub type Result<T> = core::result::Result<T, ReliefError>;
