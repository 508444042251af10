//! # relief_rs
//!
//! Voxel carving and binary STL export for printable reliefs.
//!
//! This crate ties the relief pipeline together: a dense voxel volume that
//! callers carve, an optional grayscale heightmap carver, and an export
//! sweep that runs marching cubes over every complete cube and writes the
//! surviving triangles as binary STL.
//!
//! ## Quick Start
//!
//! ```ignore
//! use relief_rs::{export_stl_file, ExportConfig, AxisScale, VoxelVolume, CARVED};
//!
//! let mut volume = VoxelVolume::with_dims(320, 240, 64)?;
//!
//! // Carve a pocket
//! for z in 0..10 {
//!     volume.set(100, 100, z, CARVED)?;
//! }
//!
//! let config = ExportConfig::default().with_scale(AxisScale::new(0.2, 0.2, 0.5));
//! let stats = export_stl_file(&volume, "relief.stl", &config)?;
//! println!("{} triangles", stats.triangles_written);
//! ```
//!
//! ## Pipeline
//!
//! 1. **Carve**: `set` / `carve_column` / [`HeightmapCarver`] write [`CARVED`]
//!    into a volume that starts [`SOLID`]
//! 2. **Sweep**: cube origins `[0, W-2] × [0, H-2] × [0, D-2]`, z-slab by z-slab
//! 3. **Polygonize**: 0-5 triangles per cube at the iso-threshold (default 1.0)
//! 4. **Filter**: triangles without a finite unit normal are discarded
//! 5. **Scale**: vertex positions multiplied by the per-axis scale
//! 6. **Write**: binary STL with the triangle count patched after the sweep
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon sweep over z-slabs when
//!   [`ExportConfig::parallel`] is set; output order matches the sequential sweep

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod export;
mod heightmap;
mod mesh;
mod volume;

pub use config::{AxisScale, ExportConfig, VolumeConfig};
pub use error::{ReliefError, Result};
pub use export::{
    export_stl, export_stl_buffered, export_stl_file, extract_triangles, for_each_triangle,
    ExportStats,
};
pub use heightmap::{carve_depth, GrayImage, HeightmapCarver};
pub use mesh::{MeshStats, MeshTriangle};
pub use volume::{VoxelVolume, CARVED, SOLID};

// Re-export core types
pub use relief_core::{CoreError, LatticeCoord, Point3, Triangle, VolumeSampler};
pub use relief_io::{read_stl, read_stl_file, StlError, StlHeader, StlMesh};
