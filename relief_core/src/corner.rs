//! Cube corner numbering shared by the sampler and the polygonizer.
//!
//! The triangulation and edge tables are indexed against this order, so it
//! must not be permuted:
//!
//! ```text
//!        7 ─────── 6
//!       /│        /│
//!      4 ─────── 5 │        z
//!      │ 3 ─────│─ 2        │  y
//!      │/       │/          │ /
//!      0 ─────── 1          └──── x
//! ```
//!
//! Corners 0-3 form the bottom face counter-clockwise, corners 4-7 sit directly
//! above 0-3.

/// One of the eight corners of a unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Corner {
    /// (0, 0, 0)
    C0 = 0,
    /// (1, 0, 0)
    C1 = 1,
    /// (1, 1, 0)
    C2 = 2,
    /// (0, 1, 0)
    C3 = 3,
    /// (0, 0, 1)
    C4 = 4,
    /// (1, 0, 1)
    C5 = 5,
    /// (1, 1, 1)
    C6 = 6,
    /// (0, 1, 1)
    C7 = 7,
}

impl Corner {
    /// All corners in table order.
    pub const ALL: [Corner; 8] = [
        Corner::C0,
        Corner::C1,
        Corner::C2,
        Corner::C3,
        Corner::C4,
        Corner::C5,
        Corner::C6,
        Corner::C7,
    ];

    /// Table index of this corner (0-7).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Corner for a table index. The index is masked to 0-7.
    #[inline]
    pub const fn from_index(idx: usize) -> Self {
        Self::ALL[idx & 7]
    }

    /// Unit offset of this corner from the cube origin.
    #[inline]
    pub const fn offset(self) -> (u32, u32, u32) {
        CORNER_OFFSETS[self as usize]
    }
}

/// CORNER_OFFSETS[i] = (dx, dy, dz) for corner index i.
pub const CORNER_OFFSETS: [(u32, u32, u32); 8] = [
    (0, 0, 0),
    (1, 0, 0),
    (1, 1, 0),
    (0, 1, 0),
    (0, 0, 1),
    (1, 0, 1),
    (1, 1, 1),
    (0, 1, 1),
];
