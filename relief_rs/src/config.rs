//! Volume and export configuration types.

use relief_core::{CoreError, Point3};
use relief_io::StlHeader;

use crate::error::{ReliefError, Result};

/// Volume dimensions (immutable after construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeConfig {
    /// Voxels along X.
    pub width: u32,
    /// Voxels along Y.
    pub height: u32,
    /// Voxels along Z.
    pub depth: u32,
}

impl VolumeConfig {
    /// Create a new volume configuration.
    #[inline]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Dimensions as `(width, height, depth)`.
    #[inline]
    pub const fn dims(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    /// Total number of voxels, or `None` if it does not fit `usize`.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth as usize)
    }

    /// Validate the configuration.
    ///
    /// Every dimension must be positive and the voxel count must fit in memory.
    pub fn validate(&self) -> core::result::Result<(), CoreError> {
        let invalid = CoreError::InvalidDimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
        };
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(invalid);
        }
        match self.cell_count() {
            Some(n) if n <= isize::MAX as usize => Ok(()),
            _ => Err(invalid),
        }
    }
}

impl Default for VolumeConfig {
    /// 320×240 capture resolution with 64 depth layers.
    fn default() -> Self {
        Self::new(320, 240, 64)
    }
}

/// Per-axis factors applied to vertex positions before serialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    /// X scale.
    pub x: f32,
    /// Y scale.
    pub y: f32,
    /// Z scale.
    pub z: f32,
}

impl AxisScale {
    /// Identity scale.
    pub const UNIT: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a per-axis scale.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same factor on every axis.
    #[inline]
    pub const fn uniform(s: f32) -> Self {
        Self::new(s, s, s)
    }

    /// As a vector for component-wise multiplication.
    #[inline]
    pub const fn as_point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// True if every factor is finite and strictly positive.
    ///
    /// Zero collapses triangles to zero area and negative factors mirror
    /// the winding against the stored normal.
    #[inline]
    pub fn is_positive_finite(&self) -> bool {
        self.as_point().is_finite() && self.x > 0.0 && self.y > 0.0 && self.z > 0.0
    }
}

impl Default for AxisScale {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Configuration for STL export (fixed for the duration of a sweep).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Iso-threshold for surface extraction (default: 1.0).
    ///
    /// A corner counts as inside when its value is below the threshold.
    pub iso_threshold: f32,
    /// Per-axis vertex scale (default: unit).
    pub scale: AxisScale,
    /// Sweep z-slabs on the rayon pool (default: false).
    pub parallel: bool,
    /// Optional header text, truncated to 80 bytes.
    pub header_text: Option<String>,
}

impl ExportConfig {
    /// Set the iso-threshold.
    pub fn with_iso_threshold(mut self, iso_threshold: f32) -> Self {
        self.iso_threshold = iso_threshold;
        self
    }

    /// Set the per-axis scale.
    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable the parallel sweep.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the STL header text.
    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    /// STL header built from `header_text` (zero-filled when unset).
    pub fn header(&self) -> StlHeader {
        self.header_text
            .as_deref()
            .map(StlHeader::from_text)
            .unwrap_or_default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.iso_threshold.is_finite() {
            return Err(ReliefError::InvalidConfig {
                message: format!("iso_threshold must be finite, got {}", self.iso_threshold),
            });
        }
        if !self.scale.is_positive_finite() {
            return Err(ReliefError::InvalidConfig {
                message: format!("scale factors must be finite and > 0, got {:?}", self.scale),
            });
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            iso_threshold: 1.0,
            scale: AxisScale::UNIT,
            parallel: false,
            header_text: None,
        }
    }
}
