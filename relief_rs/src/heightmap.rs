//! Grayscale heightmap carving.
//!
//! Converts a luminance image into carved columns: dark pixels carve deep,
//! white pixels leave the column untouched. Optionally smooths the image
//! with a 3×3 median filter first and adds a base plate so the printed
//! relief has a closed bottom.

use relief_core::CoreError;

use crate::error::{ReliefError, Result};
use crate::volume::{VoxelVolume, CARVED, SOLID};

/// A row-major 8-bit grayscale image.
#[derive(Debug, Clone, Copy)]
pub struct GrayImage<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> GrayImage<'a> {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    /// Returns `ImageSize` if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ReliefError::ImageSize {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luminance at `(x, y)`, with coordinates clamped to the image.
    #[inline]
    fn at_clamped(&self, x: i64, y: i64) -> u8 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[x + y * self.width as usize]
    }

    /// 3×3 median filter with replicated borders.
    pub fn median3(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        let mut window = [0u8; 9];

        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let mut i = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        window[i] = self.at_clamped(x + dx, y + dy);
                        i += 1;
                    }
                }
                window.sort_unstable();
                out.push(window[4]);
            }
        }

        out
    }
}

/// Carve depth for a pixel in a volume of the given depth.
///
/// `depth - floor(luminance * depth / 255)` in integer arithmetic: black
/// carves the full column, white carves nothing.
///
/// This is the exact quotient. Evaluating `luminance / 255.0 * depth` in
/// `f64` and truncating rounds a few exact multiples down by one, for example
/// `(155, 51)` and `(147, 85)`, which then carve one voxel deeper. No such pair
/// exists for `depth = 64`.
#[inline]
pub const fn carve_depth(luminance: u8, depth: u32) -> u32 {
    depth - (luminance as u64 * depth as u64 / 255) as u32
}

/// Carves a grayscale image into a [`VoxelVolume`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightmapCarver {
    /// Smooth the image with a 3×3 median filter before carving.
    pub median_filter: bool,
    /// Carve `z = 0` and restore `z = 1` under every pixel afterwards.
    pub base_plate: bool,
}

impl HeightmapCarver {
    /// Carver with no smoothing and no base plate.
    pub const fn new() -> Self {
        Self {
            median_filter: false,
            base_plate: false,
        }
    }

    /// Enable or disable median smoothing.
    pub fn with_median_filter(mut self, enabled: bool) -> Self {
        self.median_filter = enabled;
        self
    }

    /// Enable or disable the base plate.
    pub fn with_base_plate(mut self, enabled: bool) -> Self {
        self.base_plate = enabled;
        self
    }

    /// Carve `image` into `volume`, pixel `(x, y)` driving column `(x, y)`.
    ///
    /// The volume is not cleared first. Returns the number of voxels carved
    /// by the heightmap pass (before the base plate).
    ///
    /// # Errors
    /// Returns `OutOfBounds` if the image is wider or taller than the volume,
    /// or if a base plate is requested on a volume shallower than 2 layers.
    pub fn carve(&self, volume: &mut VoxelVolume, image: &GrayImage<'_>) -> Result<u64> {
        let (w, h, d) = volume.dims();
        if image.width > w || image.height > h {
            return Err(CoreError::OutOfBounds {
                x: image.width.saturating_sub(1),
                y: image.height.saturating_sub(1),
                z: 0,
                width: w,
                height: h,
                depth: d,
            }
            .into());
        }
        if self.base_plate && d < 2 {
            return Err(CoreError::OutOfBounds {
                x: 0,
                y: 0,
                z: 1,
                width: w,
                height: h,
                depth: d,
            }
            .into());
        }

        let smoothed;
        let pixels = if self.median_filter {
            smoothed = image.median3();
            smoothed.as_slice()
        } else {
            image.pixels
        };

        let mut carved = 0u64;
        for y in 0..image.height {
            for x in 0..image.width {
                let lum = pixels[(x + y * image.width) as usize];
                let depth = carve_depth(lum, d);
                volume.carve_column(x, y, depth)?;
                carved += depth as u64;
            }
        }

        if self.base_plate {
            for y in 0..image.height {
                for x in 0..image.width {
                    volume.set(x, y, 0, CARVED)?;
                    volume.set(x, y, 1, SOLID)?;
                }
            }
        }

        log::debug!(
            "carved {}x{} heightmap: {} voxels removed",
            image.width,
            image.height,
            carved
        );
        Ok(carved)
    }
}
