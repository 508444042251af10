//! Marching Cubes polygonization of a single cube.
//!
//! Provides the case index computation, edge interpolation and the
//! table-driven triangle assembly used by the export sweep.

use core::ops::Deref;

use crate::sampler::{sample_cube, Cube};
use crate::traits::VolumeSampler;
use crate::types::{LatticeCoord, Point3, Triangle};

use super::tables::{EDGE_CORNERS, EDGE_TABLE, MAX_TRIANGLES, TRI_END, TRI_TABLE};

/// Interpolate vertex position along an edge where the field crosses the iso-value.
///
/// `t = (iso_value - v0) / (v1 - v0)`, clamped to `[0, 1]`. When the two
/// values are equal within `f32::EPSILON` the first endpoint is returned.
///
/// # Arguments
/// * `p0` - Position of the first corner
/// * `p1` - Position of the second corner
/// * `v0` - Value at the first corner
/// * `v1` - Value at the second corner
/// * `iso_value` - The iso-surface threshold
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_value: f32) -> Point3 {
    let denom = v1 - v0;
    if libm::fabsf(denom) < f32::EPSILON {
        return p0;
    }

    let t = ((iso_value - v0) / denom).clamp(0.0, 1.0);

    p0.lerp(p1, t)
}

/// Compute the cube configuration index from corner values.
///
/// Bit i is set if corner i is inside the surface (value < iso_value).
#[inline]
pub fn compute_cube_index(corner_values: &[f32; 8], iso_value: f32) -> u8 {
    let mut index = 0u8;
    for (i, &val) in corner_values.iter().enumerate() {
        if val < iso_value {
            index |= 1 << i;
        }
    }
    index
}

/// Up to [`MAX_TRIANGLES`] triangles produced by one cube, without allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTriangles {
    triangles: [Triangle; MAX_TRIANGLES],
    len: usize,
}

impl CubeTriangles {
    /// An empty set.
    pub const EMPTY: Self = Self {
        triangles: [[Point3::new(0.0, 0.0, 0.0); 3]; MAX_TRIANGLES],
        len: 0,
    };

    #[inline]
    fn push(&mut self, triangle: Triangle) {
        debug_assert!(self.len < MAX_TRIANGLES, "triangulation row exceeds 5 triangles");
        self.triangles[self.len] = triangle;
        self.len += 1;
    }

    /// The produced triangles in table order.
    #[inline]
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles[..self.len]
    }
}

impl Default for CubeTriangles {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Deref for CubeTriangles {
    type Target = [Triangle];

    #[inline]
    fn deref(&self) -> &[Triangle] {
        self.as_slice()
    }
}

impl IntoIterator for CubeTriangles {
    type Item = Triangle;
    type IntoIter = core::iter::Take<core::array::IntoIter<Triangle, MAX_TRIANGLES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter().take(self.len)
    }
}

impl<'a> IntoIterator for &'a CubeTriangles {
    type Item = &'a Triangle;
    type IntoIter = core::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Polygonize one cube at the given iso-threshold.
///
/// Returns 0 to 5 triangles. Cubes whose corners all lie on the same side of
/// the threshold (case `0x00` or `0xFF`) produce nothing.
pub fn polygonize(cube: &Cube, iso_value: f32) -> CubeTriangles {
    let mut out = CubeTriangles::EMPTY;

    let cube_index = compute_cube_index(&cube.values, iso_value) as usize;

    let edge_flags = EDGE_TABLE[cube_index];
    if edge_flags == 0 {
        return out;
    }

    // Intersection point on every crossed edge
    let mut edge_vertices = [Point3::default(); 12];
    for (edge_idx, &(c0, c1)) in EDGE_CORNERS.iter().enumerate() {
        if (edge_flags & (1 << edge_idx)) != 0 {
            edge_vertices[edge_idx] = interpolate_vertex(
                cube.position(c0),
                cube.position(c1),
                cube.value(c0),
                cube.value(c1),
                iso_value,
            );
        }
    }

    for tri in TRI_TABLE[cube_index].chunks_exact(3) {
        if tri[0] == TRI_END {
            break;
        }
        out.push([
            edge_vertices[tri[0] as usize],
            edge_vertices[tri[1] as usize],
            edge_vertices[tri[2] as usize],
        ]);
    }

    out
}

/// Sample the cube at `origin` and polygonize it.
///
/// Returns an empty set when the cube is incomplete (origin on the last layer
/// of an axis).
pub fn process_cube<S: VolumeSampler + ?Sized>(
    sampler: &S,
    origin: LatticeCoord,
    iso_value: f32,
) -> CubeTriangles {
    match sample_cube(sampler, origin) {
        Some(cube) => polygonize(&cube, iso_value),
        None => CubeTriangles::EMPTY,
    }
}
