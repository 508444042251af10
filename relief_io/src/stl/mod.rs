//! Binary STL format support.
//!
//! This module provides writing and reading of binary STL, the mesh format
//! accepted by slicers for 3D printing.
//!
//! # Format Overview
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 80 | header bytes |
//! | 80 | 4 | triangle count, u32 LE |
//! | 84 + 50·i | 12 | normal of triangle i |
//! | 96 + 50·i | 36 | 3 vertices of triangle i |
//! | 132 + 50·i | 2 | attribute bytes |
//!
//! Total file size is `84 + 50·count`.
//!
//! # Example
//!
//! ```ignore
//! use relief_io::{StlWriter, read_stl_file};
//! use std::fs::File;
//!
//! let mut writer = StlWriter::new(File::create("relief.stl")?)?;
//! writer.write_triangle(normal, &triangle)?;
//! let count = writer.finish()?;
//!
//! let mesh = read_stl_file("relief.stl")?;
//! assert_eq!(mesh.len(), count as usize);
//! ```

mod header;
mod reader;
mod writer;

pub use header::{
    compute_file_size, StlHeader, StlRecord, COUNT_OFFSET, HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE,
};
pub use reader::{read_stl, read_stl_file, StlMesh};
pub use writer::{partial_path, write_stl_file, BufferedStlWriter, StlWriter};
