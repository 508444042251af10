//! # relief_core
//!
//! Pure algorithms for turning a dense voxel volume into triangles.
//!
//! This crate holds the parts of the relief pipeline that have no storage and
//! no I/O: the cube corner convention, cube sampling, the marching cubes
//! polygonizer and face normal computation. Storage (the voxel volume) and
//! serialization (binary STL) live in `relief_rs` and `relief_io`.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments; nothing here allocates
//! - **Compile-time tables**: The 256-case edge and triangulation tables are `const`
//! - **Explicit corner order**: [`Corner`] is the single definition shared by the
//!   sampler and the polygonizer
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support (`std::error::Error`)
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, LatticeCoord, Triangle)
//! - [`corner`]: Cube corner numbering
//! - [`traits`]: Volume access abstraction (VolumeSampler)
//! - [`sampler`]: Cube sampling and sweep bounds
//! - [`marching_cubes`]: Polygonization
//! - [`normal`]: Face normals and degeneracy checks
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use relief_core::prelude::*;
//!
//! for origin in cube_origins(volume.dims()) {
//!     for tri in process_cube(&volume, origin, 1.0).iter() {
//!         if let Some(normal) = compute_normal(tri) {
//!             // write normal + tri
//!         }
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod corner;
pub mod error;
pub mod marching_cubes;
pub mod normal;
pub mod sampler;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::corner::{Corner, CORNER_OFFSETS};
    pub use crate::error::CoreError;
    pub use crate::marching_cubes::{
        compute_cube_index, interpolate_vertex, polygonize, process_cube, CubeTriangles,
    };
    pub use crate::normal::{compute_normal, is_degenerate, triangle_area};
    pub use crate::sampler::{cube_count, cube_extent, cube_origins, sample_cube, slab_origins, Cube};
    pub use crate::traits::VolumeSampler;
    pub use crate::types::{LatticeCoord, Point3, Triangle};
}

// Re-export everything at crate root for convenience
pub use corner::{Corner, CORNER_OFFSETS};
pub use error::CoreError;
pub use marching_cubes::{
    compute_cube_index, interpolate_vertex, polygonize, process_cube, CubeTriangles,
};
pub use normal::{compute_normal, is_degenerate, triangle_area, DEGENERATE_EPSILON};
pub use sampler::{cube_count, cube_extent, cube_origins, sample_cube, slab_origins, Cube};
pub use traits::VolumeSampler;
pub use types::{LatticeCoord, Point3, Triangle};
