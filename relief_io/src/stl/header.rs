//! Binary STL preamble and record layout.

use relief_core::{Point3, Triangle};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Byte offset of the little-endian `u32` triangle count.
pub const COUNT_OFFSET: usize = HEADER_SIZE;

/// Header plus count field.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record in bytes.
pub const RECORD_SIZE: usize = 50;

/// The 80-byte free-form STL header.
///
/// Zero-filled by default. Text longer than 80 bytes is truncated.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StlHeader {
    bytes: [u8; HEADER_SIZE],
}

impl StlHeader {
    /// A zero-filled header.
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0; HEADER_SIZE],
        }
    }

    /// Header carrying caller text, truncated to 80 bytes.
    pub fn from_text(text: &str) -> Self {
        let mut bytes = [0u8; HEADER_SIZE];
        let src = text.as_bytes();
        let n = src.len().min(HEADER_SIZE);
        bytes[..n].copy_from_slice(&src[..n]);
        Self { bytes }
    }

    /// Header from raw bytes as read from a file.
    pub const fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw header bytes.
    pub const fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    /// Header text up to the first NUL, lossily decoded.
    pub fn text(&self) -> String {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(HEADER_SIZE);
        String::from_utf8_lossy(&self.bytes[..end]).into_owned()
    }

    /// Serialize the header followed by a triangle count.
    pub fn to_preamble(&self, count: u32) -> [u8; PREAMBLE_SIZE] {
        let mut out = [0u8; PREAMBLE_SIZE];
        out[..HEADER_SIZE].copy_from_slice(&self.bytes);
        out[COUNT_OFFSET..PREAMBLE_SIZE].copy_from_slice(&count.to_le_bytes());
        out
    }
}

impl Default for StlHeader {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for StlHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StlHeader").field("text", &self.text()).finish()
    }
}

/// One triangle record: facet normal, three vertices and the attribute word.
///
/// Layout (50 bytes total):
/// - Bytes 0-11: normal (3 × f32 LE)
/// - Bytes 12-47: vertices (9 × f32 LE)
/// - Bytes 48-49: attribute byte count (u16 LE, always 0 when written)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlRecord {
    /// Unit facet normal.
    pub normal: Point3,
    /// Vertex positions.
    pub vertices: Triangle,
    /// Attribute byte count.
    pub attribute: u16,
}

impl StlRecord {
    /// Record with a zero attribute word.
    pub const fn new(normal: Point3, vertices: Triangle) -> Self {
        Self {
            normal,
            vertices,
            attribute: 0,
        }
    }

    /// Serialize the record to a byte array.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];

        let points = [
            self.normal,
            self.vertices[0],
            self.vertices[1],
            self.vertices[2],
        ];
        for (i, p) in points.iter().enumerate() {
            let base = i * 12;
            bytes[base..base + 4].copy_from_slice(&p.x.to_le_bytes());
            bytes[base + 4..base + 8].copy_from_slice(&p.y.to_le_bytes());
            bytes[base + 8..base + 12].copy_from_slice(&p.z.to_le_bytes());
        }
        bytes[48..50].copy_from_slice(&self.attribute.to_le_bytes());

        bytes
    }

    /// Deserialize a record from a byte array.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let f = |o: usize| f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
        let p = |base: usize| Point3::new(f(base), f(base + 4), f(base + 8));

        Self {
            normal: p(0),
            vertices: [p(12), p(24), p(36)],
            attribute: u16::from_le_bytes([bytes[48], bytes[49]]),
        }
    }
}

/// Expected file size for a given triangle count.
pub const fn compute_file_size(triangle_count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + RECORD_SIZE as u64 * triangle_count as u64
}
