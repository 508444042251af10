//! Cube sampling: gathers the 8 corners of a unit cube from a volume.
//!
//! Only cubes whose minimum corner lies in `[0, W-2] × [0, H-2] × [0, D-2]`
//! are complete; the last layer on each axis is never used as a cube origin.

use crate::corner::Corner;
use crate::traits::VolumeSampler;
use crate::types::{LatticeCoord, Point3};

/// One unit cube: 8 corner positions and their scalar values.
///
/// Both arrays are indexed by [`Corner`] order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cube {
    /// Corner positions in model space.
    pub positions: [Point3; 8],
    /// Scalar values at the corners.
    pub values: [f32; 8],
}

impl Cube {
    /// Create a cube from explicit corner positions and values.
    #[inline]
    pub const fn new(positions: [Point3; 8], values: [f32; 8]) -> Self {
        Self { positions, values }
    }

    /// Unit cube at `origin` with the given corner values.
    ///
    /// Corner positions are formed in `f32`, so an origin on the last lattice
    /// coordinate does not overflow.
    pub fn at_origin(origin: LatticeCoord, values: [f32; 8]) -> Self {
        let base = Point3::from(origin);
        let mut positions = [Point3::default(); 8];
        for corner in Corner::ALL {
            let (dx, dy, dz) = corner.offset();
            positions[corner.index()] = base + Point3::new(dx as f32, dy as f32, dz as f32);
        }
        Self { positions, values }
    }

    /// Position of a corner.
    #[inline]
    pub fn position(&self, corner: Corner) -> Point3 {
        self.positions[corner.index()]
    }

    /// Value at a corner.
    #[inline]
    pub fn value(&self, corner: Corner) -> f32 {
        self.values[corner.index()]
    }
}

/// Number of cube origins per axis for a volume of the given dimensions.
///
/// A dimension below 2 yields zero cubes on that axis.
#[inline]
pub const fn cube_extent((w, h, d): (u32, u32, u32)) -> (u32, u32, u32) {
    (w.saturating_sub(1), h.saturating_sub(1), d.saturating_sub(1))
}

/// Total number of complete cubes in a volume.
#[inline]
pub const fn cube_count(dims: (u32, u32, u32)) -> usize {
    let (cx, cy, cz) = cube_extent(dims);
    cx as usize * cy as usize * cz as usize
}

/// Sample the cube whose minimum corner is `origin`.
///
/// # Returns
/// `None` if any of the 8 corners lies outside the volume, which is the case
/// for every origin on the last layer of an axis.
pub fn sample_cube<S: VolumeSampler + ?Sized>(sampler: &S, origin: LatticeCoord) -> Option<Cube> {
    let mut cube = Cube::default();

    for corner in Corner::ALL {
        let coord = origin.checked_offset(corner.offset())?;
        cube.values[corner.index()] = sampler.sample(coord)?;
        cube.positions[corner.index()] = coord.into();
    }

    Some(cube)
}

/// Iterate over the cube origins of one z-slab, x fastest.
pub fn slab_origins(dims: (u32, u32, u32), z: u32) -> impl Iterator<Item = LatticeCoord> {
    let (cx, cy, cz) = cube_extent(dims);
    let rows = if z < cz { cy } else { 0 };
    (0..rows).flat_map(move |y| (0..cx).map(move |x| LatticeCoord::new(x, y, z)))
}

/// Iterate over every cube origin of a volume, z-slab by z-slab.
pub fn cube_origins(dims: (u32, u32, u32)) -> impl Iterator<Item = LatticeCoord> {
    let (_, _, cz) = cube_extent(dims);
    (0..cz).flat_map(move |z| slab_origins(dims, z))
}
