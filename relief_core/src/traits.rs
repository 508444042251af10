//! Traits for storage abstraction in relief_core.
//!
//! The polygonizer never touches voxel storage directly. Downstream crates
//! (relief_rs) implement [`VolumeSampler`] for their dense volumes and share
//! the cube sampling and marching cubes code in this crate.

use crate::types::LatticeCoord;

/// Read-only access to a dense scalar volume.
///
/// Implementors expose a `width × height × depth` lattice of scalar values.
pub trait VolumeSampler {
    /// Volume dimensions as `(width, height, depth)`.
    fn dims(&self) -> (u32, u32, u32);

    /// Scalar value at a lattice point.
    ///
    /// # Returns
    /// * `Some(value)` - The value, converted to `f32`
    /// * `None` - If the coordinate lies outside the volume
    fn sample(&self, coord: LatticeCoord) -> Option<f32>;

    /// True if the coordinate lies inside the volume.
    #[inline]
    fn contains(&self, coord: LatticeCoord) -> bool {
        let (w, h, d) = self.dims();
        coord.x < w && coord.y < h && coord.z < d
    }
}

impl<T: VolumeSampler + ?Sized> VolumeSampler for &T {
    #[inline]
    fn dims(&self) -> (u32, u32, u32) {
        (**self).dims()
    }

    #[inline]
    fn sample(&self, coord: LatticeCoord) -> Option<f32> {
        (**self).sample(coord)
    }
}
