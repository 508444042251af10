//! Core types for relief_core.
//!
//! Provides the floating-point vector used for vertices and normals, the
//! integer lattice coordinate used to address voxels, and the triangle alias.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D point or direction in model space.
///
/// Used for interpolated vertex positions, face normals and scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Component-wise product, used to apply per-axis scale factors.
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// True if every component is finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
        }
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<LatticeCoord> for Point3 {
    #[inline]
    fn from(c: LatticeCoord) -> Self {
        Self {
            x: c.x as f32,
            y: c.y as f32,
            z: c.z as f32,
        }
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Integer voxel coordinates in a dense volume.
///
/// Used both to address single voxels and as the minimum corner (origin) of a
/// unit cube during the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LatticeCoord {
    /// X coordinate (0 to width-1).
    pub x: u32,
    /// Y coordinate (0 to height-1).
    pub y: u32,
    /// Z coordinate (0 to depth-1).
    pub z: u32,
}

impl LatticeCoord {
    /// Create a new LatticeCoord.
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Offset by a unit corner offset, returning `None` on `u32` overflow.
    #[inline]
    pub fn checked_offset(&self, (dx, dy, dz): (u32, u32, u32)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// Flat index into an x-fastest array of the given width and height.
    ///
    /// index = x + y * width + z * width * height
    #[inline]
    pub const fn flat_index(&self, width: u32, height: u32) -> usize {
        self.x as usize + self.y as usize * width as usize
            + self.z as usize * width as usize * height as usize
    }
}

/// A triangle as three vertex positions.
///
/// Winding follows the triangulation table; the face normal is
/// `(p1 - p0) × (p2 - p1)`.
pub type Triangle = [Point3; 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point3_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Point3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Point3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_point3_dot_cross() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 0.0);

        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.dot(a), 1.0);
        assert_eq!(a.cross(b), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(b.cross(a), Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_point3_length() {
        assert_eq!(Point3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Point3::splat(0.0).length(), 0.0);
    }

    #[test]
    fn test_mul_elem_applies_axis_scale() {
        let p = Point3::new(2.0, 3.0, 4.0);
        let scale = Point3::new(0.5, 1.0, 2.0);
        assert_eq!(p.mul_elem(scale), Point3::new(1.0, 3.0, 8.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point3::new(1.0, -2.0, 0.0).is_finite());
        assert!(!Point3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_lattice_flat_index() {
        // 4 x 3 x 2 volume
        assert_eq!(LatticeCoord::new(0, 0, 0).flat_index(4, 3), 0);
        assert_eq!(LatticeCoord::new(1, 0, 0).flat_index(4, 3), 1);
        assert_eq!(LatticeCoord::new(0, 1, 0).flat_index(4, 3), 4);
        assert_eq!(LatticeCoord::new(0, 0, 1).flat_index(4, 3), 12);
        assert_eq!(LatticeCoord::new(3, 2, 1).flat_index(4, 3), 23);
    }

    #[test]
    fn test_lattice_to_point() {
        let p: Point3 = LatticeCoord::new(1, 2, 3).into();
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_lattice_checked_offset() {
        assert_eq!(
            LatticeCoord::new(1, 2, 3).checked_offset((1, 0, 1)),
            Some(LatticeCoord::new(2, 2, 4))
        );
        assert_eq!(LatticeCoord::new(u32::MAX, 0, 0).checked_offset((1, 0, 0)), None);
        assert_eq!(
            LatticeCoord::new(u32::MAX, 0, 0).checked_offset((0, 1, 1)),
            Some(LatticeCoord::new(u32::MAX, 1, 1))
        );
    }
}
