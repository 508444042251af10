//! Binary STL reader.
//!
//! Parses the streams produced by the writers in this crate back into
//! records, checking the declared count against the stream length.

use std::io::Read;

use relief_core::Point3;

use super::header::{StlHeader, StlRecord, COUNT_OFFSET, HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE};
use crate::error::{Result, StlError};

/// A parsed binary STL file.
#[derive(Debug, Clone, PartialEq)]
pub struct StlMesh {
    /// The 80-byte header.
    pub header: StlHeader,
    /// Triangle records in file order.
    pub triangles: Vec<StlRecord>,
}

impl StlMesh {
    /// Number of triangle records.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over all vertices of all triangles.
    pub fn vertices(&self) -> impl Iterator<Item = Point3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices)
    }
}

/// Read a binary STL stream.
///
/// # Errors
/// Returns `InvalidFormat` if the stream is shorter than the preamble or if
/// the body length disagrees with the declared triangle count.
pub fn read_stl<R: Read>(reader: &mut R) -> Result<StlMesh> {
    let mut preamble = [0u8; PREAMBLE_SIZE];
    reader.read_exact(&mut preamble).map_err(|err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            StlError::invalid_format("stream shorter than the 84-byte preamble")
        } else {
            StlError::Io(err)
        }
    })?;

    let mut header_bytes = [0u8; HEADER_SIZE];
    header_bytes.copy_from_slice(&preamble[..HEADER_SIZE]);
    let header = StlHeader::from_bytes(header_bytes);

    let declared = u32::from_le_bytes([
        preamble[COUNT_OFFSET],
        preamble[COUNT_OFFSET + 1],
        preamble[COUNT_OFFSET + 2],
        preamble[COUNT_OFFSET + 3],
    ]);

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;

    let expected = declared as u64 * RECORD_SIZE as u64;
    if body.len() as u64 != expected {
        return Err(StlError::invalid_format(format!(
            "count field declares {} triangles ({} bytes) but body holds {} bytes",
            declared,
            expected,
            body.len()
        )));
    }

    let mut triangles = Vec::with_capacity(declared as usize);
    for chunk in body.chunks_exact(RECORD_SIZE) {
        let record: &[u8; RECORD_SIZE] = chunk
            .try_into()
            .map_err(|_| StlError::invalid_format("truncated triangle record"))?;
        triangles.push(StlRecord::from_bytes(record));
    }

    log::debug!("read STL with {} triangles", triangles.len());
    Ok(StlMesh { header, triangles })
}

/// Read a binary STL file from a path.
pub fn read_stl_file<P: AsRef<std::path::Path>>(path: P) -> Result<StlMesh> {
    let mut file = std::io::BufReader::new(std::fs::File::open(path)?);
    read_stl(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stl::writer::StlWriter;
    use std::io::Cursor;

    fn write_sample(count: usize) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = StlWriter::with_header(&mut cursor, StlHeader::from_text("sample")).unwrap();
        for i in 0..count {
            let z = i as f32;
            writer
                .write_triangle(
                    Point3::new(0.0, 0.0, -1.0),
                    &[
                        Point3::new(1.0, 0.0, z),
                        Point3::new(0.0, 0.0, z),
                        Point3::new(1.0, 1.0, z),
                    ],
                )
                .unwrap();
        }
        writer.finish().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_read_written_stream() {
        let bytes = write_sample(5);
        let mesh = read_stl(&mut bytes.as_slice()).unwrap();

        assert_eq!(mesh.len(), 5);
        assert_eq!(mesh.header.text(), "sample");
        assert_eq!(mesh.triangles[4].vertices[0].z, 4.0);
        assert_eq!(mesh.triangles[0].normal, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(mesh.vertices().count(), 15);
    }

    #[test]
    fn test_read_empty_stream() {
        let bytes = write_sample(0);
        let mesh = read_stl(&mut bytes.as_slice()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_reject_short_preamble() {
        let bytes = vec![0u8; 40];
        let err = read_stl(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, StlError::InvalidFormat { .. }));
    }

    #[test]
    fn test_reject_count_mismatch() {
        let mut bytes = write_sample(2);
        bytes[80] = 3;
        assert!(matches!(
            read_stl(&mut bytes.as_slice()),
            Err(StlError::InvalidFormat { .. })
        ));

        let mut bytes = write_sample(2);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            read_stl(&mut bytes.as_slice()),
            Err(StlError::InvalidFormat { .. })
        ));
    }
}
