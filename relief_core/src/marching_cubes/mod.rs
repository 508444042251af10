//! Marching Cubes mesh extraction.
//!
//! This module provides the marching cubes algorithm for extracting triangles
//! from a dense scalar volume. It includes:
//!
//! - Compile-time lookup tables for the 256 cube configurations
//! - Edge interpolation and case index computation
//! - Per-cube polygonization without allocation
//!
//! # Example
//!
//! ```ignore
//! use relief_core::marching_cubes::{polygonize, process_cube};
//! use relief_core::{Cube, LatticeCoord};
//!
//! // Polygonize an explicit cube
//! let tris = polygonize(&cube, 1.0);
//!
//! // Sample from a volume and polygonize in one step
//! let tris = process_cube(&volume, LatticeCoord::new(3, 4, 5), 1.0);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{compute_cube_index, interpolate_vertex, polygonize, process_cube, CubeTriangles};
pub use tables::{EDGE_CORNERS, EDGE_TABLE, MAX_TRIANGLES, TRI_END, TRI_TABLE};
