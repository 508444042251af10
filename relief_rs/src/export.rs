//! Marching cubes export of a voxel volume.
//!
//! Sweeps every complete cube z-slab by z-slab, polygonizes it, drops
//! degenerate triangles at the normal boundary and scales the survivors.
//! The triangles feed either a caller sink, a `Vec`, or a binary STL stream.
//!
//! Normals are computed in model space and are not rescaled; with a
//! non-uniform [`AxisScale`](crate::AxisScale) they describe the unscaled
//! surface.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use relief_core::{
    compute_normal, cube_count, cube_extent, process_cube, slab_origins, Point3, Triangle,
};
use relief_io::{compute_file_size, write_stl_file, BufferedStlWriter, StlWriter};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::mesh::MeshTriangle;
use crate::volume::VoxelVolume;

/// Counters reported by every export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Triangles that reached the output.
    pub triangles_written: u64,
    /// Zero-area triangles dropped before output.
    pub degenerate_discarded: u64,
    /// Cubes polygonized.
    pub cubes_visited: u64,
    /// Size of the STL stream, or 0 when no stream was written.
    pub bytes_written: u64,
}

impl ExportStats {
    fn absorb(&mut self, slab: SlabCounts) {
        self.triangles_written += slab.kept;
        self.degenerate_discarded += slab.discarded;
        self.cubes_visited += slab.cubes;
    }

    /// Log the export statistics.
    pub fn log(&self, prefix: &str) {
        log::info!(
            "{} triangles={} degenerate={} cubes={} bytes={}",
            prefix,
            self.triangles_written,
            self.degenerate_discarded,
            self.cubes_visited,
            self.bytes_written,
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SlabCounts {
    cubes: u64,
    kept: u64,
    discarded: u64,
}

#[inline]
fn scale_triangle(tri: &Triangle, scale: Point3) -> Triangle {
    tri.map(|v| v.mul_elem(scale))
}

/// Polygonize one z-slab, handing every surviving triangle to `emit`.
fn sweep_slab<E, F>(
    volume: &VoxelVolume,
    z: u32,
    iso: f32,
    scale: Point3,
    mut emit: F,
) -> core::result::Result<SlabCounts, E>
where
    F: FnMut(MeshTriangle) -> core::result::Result<(), E>,
{
    let mut counts = SlabCounts::default();

    for origin in slab_origins(volume.dims(), z) {
        counts.cubes += 1;
        for tri in &process_cube(volume, origin, iso) {
            match compute_normal(tri) {
                Some(normal) => {
                    emit(MeshTriangle::new(normal, scale_triangle(tri, scale)))?;
                    counts.kept += 1;
                }
                None => counts.discarded += 1,
            }
        }
    }

    Ok(counts)
}

/// Sweep all slabs on the rayon pool, returning per-slab output in z order.
#[cfg(feature = "parallel")]
fn sweep_parallel(
    volume: &VoxelVolume,
    slabs: u32,
    iso: f32,
    scale: Point3,
) -> Vec<(Vec<MeshTriangle>, SlabCounts)> {
    use rayon::prelude::*;
    use std::convert::Infallible;

    (0..slabs)
        .into_par_iter()
        .map(|z| {
            let mut triangles = Vec::new();
            let counts = sweep_slab(volume, z, iso, scale, |t| {
                triangles.push(t);
                Ok::<(), Infallible>(())
            })
            .unwrap_or_else(|never| match never {});
            (triangles, counts)
        })
        .collect()
}

/// Run the sweep and hand every surviving triangle to `sink`, in sweep order.
///
/// Cube origins cover `[0, W-2] × [0, H-2] × [0, D-2]`, z-slab by z-slab with
/// x fastest. The parallel sweep produces the same sequence.
///
/// # Errors
/// Returns `InvalidConfig` for a non-finite threshold or a scale factor that
/// is not finite and positive, and stops at the first error returned by `sink`.
pub fn for_each_triangle<F>(
    volume: &VoxelVolume,
    config: &ExportConfig,
    mut sink: F,
) -> Result<ExportStats>
where
    F: FnMut(&MeshTriangle) -> Result<()>,
{
    config.validate()?;

    let dims = volume.dims();
    let (_, _, slabs) = cube_extent(dims);
    let iso = config.iso_threshold;
    let scale = config.scale.as_point();
    let mut stats = ExportStats::default();

    log::info!(
        "Export start: volume {}x{}x{}, {} cubes, iso {}, {}",
        dims.0,
        dims.1,
        dims.2,
        cube_count(dims),
        iso,
        if config.parallel { "parallel" } else { "sequential" },
    );

    if config.parallel {
        #[cfg(feature = "parallel")]
        {
            let per_slab = sweep_parallel(volume, slabs, iso, scale);
            for (z, (triangles, counts)) in per_slab.into_iter().enumerate() {
                for t in &triangles {
                    sink(t)?;
                }
                stats.absorb(counts);
                log::debug!("slab {}/{}: {} triangles", z + 1, slabs, counts.kept);
            }
            finish_log(&stats);
            return Ok(stats);
        }

        #[cfg(not(feature = "parallel"))]
        log::warn!(
            "parallel export requested without the `parallel` feature; sweeping sequentially"
        );
    }

    for z in 0..slabs {
        let counts = sweep_slab(volume, z, iso, scale, |t| sink(&t))?;
        stats.absorb(counts);
        log::debug!("slab {}/{}: {} triangles", z + 1, slabs, counts.kept);
    }

    finish_log(&stats);
    Ok(stats)
}

fn finish_log(stats: &ExportStats) {
    if stats.triangles_written == 0 {
        log::warn!("Export produced no triangles; the volume has no carved surface");
    }
    log::debug!(
        "sweep done: {} triangles kept, {} degenerate discarded",
        stats.triangles_written,
        stats.degenerate_discarded
    );
}

/// Extract all surviving triangles into memory.
///
/// # Example
///
/// ```ignore
/// let (triangles, stats) = extract_triangles(&volume, &ExportConfig::default())?;
/// println!("Generated {} triangles", triangles.len());
/// ```
pub fn extract_triangles(
    volume: &VoxelVolume,
    config: &ExportConfig,
) -> Result<(Vec<MeshTriangle>, ExportStats)> {
    let mut triangles = Vec::new();
    let stats = for_each_triangle(volume, config, |t| {
        triangles.push(*t);
        Ok(())
    })?;
    Ok((triangles, stats))
}

/// Export the volume as binary STL to a seekable stream.
///
/// The count field is written as 0 first and patched after the sweep. On
/// error the stream holds an incomplete file.
pub fn export_stl<W: Write + Seek>(
    volume: &VoxelVolume,
    writer: W,
    config: &ExportConfig,
) -> Result<ExportStats> {
    config.validate()?;
    let mut stl = StlWriter::with_header(writer, config.header())?;
    let mut stats = for_each_triangle(volume, config, |t| {
        stl.write_triangle(t.normal, &t.vertices)?;
        Ok(())
    })?;
    let count = stl.finish()?;

    stats.bytes_written = compute_file_size(count);
    stats.log("Export complete:");
    Ok(stats)
}

/// Export the volume as binary STL to a non-seekable sink.
///
/// Records are buffered in memory and written after the sweep.
pub fn export_stl_buffered<W: Write>(
    volume: &VoxelVolume,
    writer: W,
    config: &ExportConfig,
) -> Result<ExportStats> {
    config.validate()?;
    let mut stl = BufferedStlWriter::with_header(writer, config.header());
    let mut stats = for_each_triangle(volume, config, |t| {
        stl.write_triangle(t.normal, &t.vertices)?;
        Ok(())
    })?;
    let count = stl.finish()?;

    stats.bytes_written = compute_file_size(count);
    stats.log("Export complete:");
    Ok(stats)
}

/// Export the volume as a binary STL file.
///
/// The file is written as `<path>.partial` and renamed on success, so `path`
/// never holds a file with a wrong triangle count. On failure the partial
/// file is removed.
///
/// # Example
///
/// ```ignore
/// let stats = export_stl_file(&volume, "relief.stl", &ExportConfig::default())?;
/// println!("{} triangles", stats.triangles_written);
/// ```
pub fn export_stl_file<P: AsRef<Path>>(
    volume: &VoxelVolume,
    path: P,
    config: &ExportConfig,
) -> Result<ExportStats> {
    let path = path.as_ref();
    config.validate()?;
    let write = |stl: &mut StlWriter<BufWriter<File>>| {
        for_each_triangle(volume, config, |t| {
            stl.write_triangle(t.normal, &t.vertices)?;
            Ok(())
        })
    };
    let (mut stats, count) = write_stl_file(path, config.header(), write)?;

    stats.bytes_written = compute_file_size(count);
    stats.log(&format!("Export complete ({}):", path.display()));
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisScale;
    use crate::error::ReliefError;
    use crate::volume::CARVED;

    fn flat_volume(w: u32, h: u32, d: u32, level: u32) -> VoxelVolume {
        let mut vol = VoxelVolume::with_dims(w, h, d).unwrap();
        for y in 0..h {
            for x in 0..w {
                vol.carve_column(x, y, level).unwrap();
            }
        }
        vol
    }

    #[test]
    fn test_untouched_volume_exports_nothing() {
        let vol = VoxelVolume::with_dims(4, 4, 4).unwrap();
        let (tris, stats) = extract_triangles(&vol, &ExportConfig::default()).unwrap();

        assert!(tris.is_empty());
        assert_eq!(stats.cubes_visited, 27);
        assert_eq!(stats.triangles_written, 0);
    }

    #[test]
    fn test_flat_level_counts() {
        let vol = flat_volume(5, 4, 6, 2);
        let (tris, stats) = extract_triangles(&vol, &ExportConfig::default()).unwrap();

        assert_eq!(tris.len(), 2 * 4 * 3);
        assert_eq!(stats.triangles_written, tris.len() as u64);
        for t in &tris {
            assert_eq!(t.normal, Point3::new(0.0, 0.0, -1.0));
            assert!(t.vertices.iter().all(|v| v.z == 2.0));
        }
    }

    #[test]
    fn test_scale_applied_after_normal() {
        let vol = flat_volume(3, 3, 4, 1);
        let config = ExportConfig::default().with_scale(AxisScale::new(0.5, 2.0, 3.0));
        let (tris, _) = extract_triangles(&vol, &config).unwrap();

        assert!(!tris.is_empty());
        for t in &tris {
            assert_eq!(t.normal, Point3::new(0.0, 0.0, -1.0));
            for v in &t.vertices {
                assert_eq!(v.z, 3.0);
                assert!(v.x <= 1.0 && v.y <= 4.0);
            }
        }
    }

    #[test]
    fn test_degenerate_triangles_are_counted() {
        // One-voxel step between column x=0 (depth 1) and x=1,2 (depth 2)
        let mut vol = VoxelVolume::with_dims(3, 2, 3).unwrap();
        for y in 0..2 {
            vol.carve_column(0, y, 1).unwrap();
            vol.carve_column(1, y, 2).unwrap();
            vol.carve_column(2, y, 2).unwrap();
        }

        let (tris, stats) = extract_triangles(&vol, &ExportConfig::default()).unwrap();

        // At threshold 1 crossings snap to solid corners and collapse
        assert_eq!(stats.degenerate_discarded, 2);
        assert_eq!(stats.triangles_written, 4);
        assert_eq!(tris.len(), 4);
        for t in &tris {
            assert!((t.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sink_error_stops_sweep() {
        let vol = flat_volume(4, 4, 4, 2);
        let mut seen = 0;
        let result = for_each_triangle(&vol, &ExportConfig::default(), |_| {
            seen += 1;
            if seen == 3 {
                Err(ReliefError::InvalidConfig {
                    message: "stop".into(),
                })
            } else {
                Ok(())
            }
        });

        assert!(result.is_err());
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let vol = flat_volume(3, 3, 3, 1);
        let config = ExportConfig::default().with_iso_threshold(f32::NAN);
        assert!(matches!(
            extract_triangles(&vol, &config),
            Err(ReliefError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_non_positive_scale_writes_nothing() {
        let vol = flat_volume(3, 3, 3, 1);
        for scale in [AxisScale::new(0.0, 1.0, 1.0), AxisScale::new(-1.0, 1.0, 1.0)] {
            let config = ExportConfig::default().with_scale(scale);

            let mut cursor = std::io::Cursor::new(Vec::new());
            let err = export_stl(&vol, &mut cursor, &config).unwrap_err();
            assert!(matches!(err, ReliefError::InvalidConfig { .. }));
            assert!(cursor.get_ref().is_empty());

            let mut buffered = Vec::new();
            assert!(export_stl_buffered(&vol, &mut buffered, &config).is_err());
            assert!(buffered.is_empty());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut vol = VoxelVolume::with_dims(7, 6, 8).unwrap();
        for y in 0..6 {
            for x in 0..7 {
                vol.carve_column(x, y, (x * 3 + y * 5) % 8).unwrap();
            }
        }

        let seq = extract_triangles(&vol, &ExportConfig::default()).unwrap();
        let par = extract_triangles(&vol, &ExportConfig::default().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }
}
