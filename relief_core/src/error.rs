//! Error types for relief_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Error types that can occur during relief_core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A voxel coordinate lies outside the volume dimensions.
    OutOfBounds {
        /// Requested X coordinate.
        x: u32,
        /// Requested Y coordinate.
        y: u32,
        /// Requested Z coordinate.
        z: u32,
        /// Volume width.
        width: u32,
        /// Volume height.
        height: u32,
        /// Volume depth.
        depth: u32,
    },
    /// Volume dimensions are zero or their product does not fit in memory.
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Requested depth.
        depth: u32,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::OutOfBounds {
                x,
                y,
                z,
                width,
                height,
                depth,
            } => write!(
                f,
                "voxel ({}, {}, {}) is outside volume {}x{}x{}",
                x, y, z, width, height, depth
            ),
            CoreError::InvalidDimensions {
                width,
                height,
                depth,
            } => write!(
                f,
                "invalid volume dimensions {}x{}x{}",
                width, height, depth
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
