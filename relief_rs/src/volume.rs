//! Dense voxel volume.
//!
//! A fixed-size `W×H×D` grid of `u8` occupancy values laid out x-fastest.
//! Every cell starts as [`SOLID`]; callers carve material away by writing
//! [`CARVED`].

use relief_core::{CoreError, LatticeCoord, VolumeSampler};

use crate::config::VolumeConfig;
use crate::error::Result;

/// Fill value of untouched material.
pub const SOLID: u8 = 1;

/// Value written where material has been removed.
pub const CARVED: u8 = 0;

/// Dense 3D occupancy grid.
///
/// Dimensions are fixed at construction. Coordinate access is bounds-checked
/// and fails with [`CoreError::OutOfBounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelVolume {
    config: VolumeConfig,
    data: Vec<u8>,
}

impl VoxelVolume {
    /// Create a volume with every cell set to [`SOLID`].
    ///
    /// # Errors
    /// Returns `InvalidDimensions` if any dimension is zero or the voxel
    /// count overflows.
    pub fn new(config: VolumeConfig) -> Result<Self> {
        config.validate()?;
        let len = config.cell_count().ok_or(CoreError::InvalidDimensions {
            width: config.width,
            height: config.height,
            depth: config.depth,
        })?;

        log::debug!(
            "allocating {}x{}x{} volume ({} voxels)",
            config.width,
            config.height,
            config.depth,
            len
        );

        Ok(Self {
            config,
            data: vec![SOLID; len],
        })
    }

    /// Shorthand for `VoxelVolume::new(VolumeConfig::new(width, height, depth))`.
    pub fn with_dims(width: u32, height: u32, depth: u32) -> Result<Self> {
        Self::new(VolumeConfig::new(width, height, depth))
    }

    /// Dimensions as `(width, height, depth)`.
    #[inline]
    pub fn dims(&self) -> (u32, u32, u32) {
        self.config.dims()
    }

    /// Number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a volume has at least one voxel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, x: u32, y: u32, z: u32) -> core::result::Result<usize, CoreError> {
        let VolumeConfig {
            width,
            height,
            depth,
        } = self.config;
        if x >= width || y >= height || z >= depth {
            return Err(CoreError::OutOfBounds {
                x,
                y,
                z,
                width,
                height,
                depth,
            });
        }
        Ok(LatticeCoord::new(x, y, z).flat_index(width, height))
    }

    /// Value stored at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Result<u8> {
        let idx = self.index(x, y, z)?;
        Ok(self.data[idx])
    }

    /// Overwrite the value at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: u8) -> Result<()> {
        let idx = self.index(x, y, z)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Reset every cell to [`SOLID`].
    pub fn clear(&mut self) {
        self.fill(SOLID);
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Carve the column at `(x, y)` from `z = 0` up to (not including) `depth`.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `(x, y)` lies outside the volume or `depth`
    /// exceeds the volume depth. Nothing is modified on error.
    pub fn carve_column(&mut self, x: u32, y: u32, depth: u32) -> Result<()> {
        self.index(x, y, 0)?;
        if depth > self.config.depth {
            return Err(CoreError::OutOfBounds {
                x,
                y,
                z: depth - 1,
                width: self.config.width,
                height: self.config.height,
                depth: self.config.depth,
            }
            .into());
        }

        let stride = self.config.width as usize * self.config.height as usize;
        let base = LatticeCoord::new(x, y, 0).flat_index(self.config.width, self.config.height);
        for z in 0..depth as usize {
            self.data[base + z * stride] = CARVED;
        }
        Ok(())
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Raw storage, x-fastest then y then z.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl VolumeSampler for VoxelVolume {
    #[inline]
    fn dims(&self) -> (u32, u32, u32) {
        self.config.dims()
    }

    #[inline]
    fn sample(&self, coord: LatticeCoord) -> Option<f32> {
        self.get(coord.x, coord.y, coord.z).ok().map(f32::from)
    }
}
