//! Mesh records produced by the export sweep.

use relief_core::{triangle_area, Point3, Triangle};
use relief_io::{StlMesh, StlRecord};

/// A triangle with its unit facet normal, in output (scaled) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    /// Unit normal, computed before scaling.
    pub normal: Point3,
    /// Scaled vertex positions in table winding.
    pub vertices: Triangle,
}

impl MeshTriangle {
    /// Create a mesh triangle.
    #[inline]
    pub const fn new(normal: Point3, vertices: Triangle) -> Self {
        Self { normal, vertices }
    }
}

impl From<MeshTriangle> for StlRecord {
    #[inline]
    fn from(t: MeshTriangle) -> Self {
        StlRecord::new(t.normal, t.vertices)
    }
}

impl From<StlRecord> for MeshTriangle {
    #[inline]
    fn from(r: StlRecord) -> Self {
        MeshTriangle::new(r.normal, r.vertices)
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices (triangle_count * 3).
    pub vertex_count: usize,
    /// Approximate surface area (sum of triangle areas).
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Statistics of an empty mesh.
    pub const EMPTY: Self = Self {
        triangle_count: 0,
        vertex_count: 0,
        surface_area: 0.0,
        bbox_min: Point3::splat(f32::MAX),
        bbox_max: Point3::splat(f32::MIN),
    };

    /// Fold one triangle into the statistics.
    pub fn push(&mut self, tri: &Triangle) {
        self.triangle_count += 1;
        self.vertex_count += 3;
        for &v in tri {
            self.bbox_min = self.bbox_min.min(v);
            self.bbox_max = self.bbox_max.max(v);
        }
        self.surface_area += triangle_area(tri);
    }

    /// Compute statistics from a set of triangles.
    pub fn from_triangles(triangles: &[MeshTriangle]) -> Self {
        let mut stats = Self::EMPTY;
        for t in triangles {
            stats.push(&t.vertices);
        }
        stats
    }

    /// Compute statistics from a parsed STL file.
    pub fn from_stl(mesh: &StlMesh) -> Self {
        let mut stats = Self::EMPTY;
        for r in &mesh.triangles {
            stats.push(&r.vertices);
        }
        stats
    }

    /// True if no triangle has been folded in.
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Bounding box extent, or zero for an empty mesh.
    pub fn extent(&self) -> Point3 {
        if self.is_empty() {
            Point3::splat(0.0)
        } else {
            self.bbox_max - self.bbox_min
        }
    }
}

impl Default for MeshStats {
    fn default() -> Self {
        Self::EMPTY
    }
}
