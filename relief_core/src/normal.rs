//! Face normals for polygonizer output.
//!
//! A triangle with coincident or collinear vertices has no direction. Such
//! triangles occur legitimately when an iso-threshold equals a corner value,
//! because several edge intersections then collapse onto the same corner.

use crate::types::{Point3, Triangle};

/// Cross-product magnitude below which a triangle counts as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-12;

/// Compute the unit normal of a triangle.
///
/// `edge1 = p1 - p0`, `edge2 = p2 - p1`, normal = `edge1 × edge2 / |edge1 × edge2|`.
///
/// # Returns
/// * `Some(normal)` - A unit vector
/// * `None` - The triangle has zero (or near-zero) area, or non-finite vertices
#[inline]
pub fn compute_normal(triangle: &Triangle) -> Option<Point3> {
    let [p0, p1, p2] = *triangle;
    let edge1 = p1 - p0;
    let edge2 = p2 - p1;
    let n = edge1.cross(edge2);

    let len = n.length();
    if !len.is_finite() || len <= DEGENERATE_EPSILON {
        return None;
    }

    let normal = n / len;
    normal.is_finite().then_some(normal)
}

/// True if [`compute_normal`] would reject the triangle.
#[inline]
pub fn is_degenerate(triangle: &Triangle) -> bool {
    compute_normal(triangle).is_none()
}

/// Area of a triangle (half the cross-product magnitude).
#[inline]
pub fn triangle_area(triangle: &Triangle) -> f32 {
    let [p0, p1, p2] = *triangle;
    (p1 - p0).cross(p2 - p1).length() * 0.5
}
