//! relief_io - binary STL serialization for relief meshes.
//!
//! This crate provides the mesh output layer of the relief pipeline: a
//! streaming binary STL writer that patches the triangle count once the
//! sweep is over, a buffered variant for non-seekable sinks, a reader used
//! to verify written files, and an all-or-nothing file export helper.
//!
//! # Core Types
//!
//! - [`StlWriter`]: Seekable writer with in-place count patching
//! - [`BufferedStlWriter`]: In-memory writer that emits the preamble last
//! - [`StlMesh`]: A parsed STL file
//! - [`StlError`]: Error type for all operations
//!
//! # Example
//!
//! ```ignore
//! use relief_io::{write_stl_file, StlHeader, StlError};
//!
//! let ((), count) = write_stl_file("relief.stl", StlHeader::default(), |w| {
//!     w.write_triangle(normal, &triangle)?;
//!     Ok::<_, StlError>(())
//! })?;
//! ```

pub mod error;
pub mod stl;

// Re-export core types from relief_core
pub use relief_core::{Point3, Triangle};

// Re-export main types
pub use error::{Result, StlError};
pub use stl::{
    compute_file_size, partial_path, read_stl, read_stl_file, write_stl_file, BufferedStlWriter,
    StlHeader, StlMesh, StlRecord, StlWriter, HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE,
};
