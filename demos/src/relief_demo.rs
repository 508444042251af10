//! Relief Export Demo
//!
//! Carves a synthetic grayscale heightmap into a voxel volume and exports
//! the surface as binary STL:
//! 1. Generate a ripple heightmap
//! 2. Carve it with median filter and base plate
//! 3. Export sequentially and in parallel
//! 4. Read the file back and report mesh statistics
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release --bin relief_demo -- output/relief.stl
//! ```

use std::env;
use std::path::Path;

use instant::Instant;

use relief_rs::{
    export_stl_file, extract_triangles, read_stl_file, AxisScale, ExportConfig, GrayImage,
    HeightmapCarver, MeshStats, VolumeConfig, VoxelVolume,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;
const DEPTH: u32 = 64;

/// Concentric ripples fading towards the border, plus a dark notch for salt
/// noise so the median filter has something to do.
fn ripple_image(width: u32, height: u32) -> Vec<u8> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_r = (cx * cx + cy * cy).sqrt();

    let mut pixels: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let r = (dx * dx + dy * dy).sqrt();
                let fade = 1.0 - r / max_r;
                let wave = 0.5 + 0.5 * (r / 8.0).cos();
                (255.0 * (1.0 - 0.8 * fade * wave)).clamp(0.0, 255.0) as u8
            })
        })
        .collect();

    for i in (0..pixels.len()).step_by(997) {
        pixels[i] = 0;
    }
    pixels
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          Relief STL Export Demo");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    let output_path = if args.len() >= 2 {
        args[1].clone()
    } else {
        println!("Usage: {} <output.stl>", args[0]);
        println!();
        println!("Using default: relief.stl");
        "relief.stl".to_string()
    };

    if let Some(parent) = Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // =========================================================================
    // Step 1: Carve heightmap
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Carve Heightmap                                     │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let mut volume = match VoxelVolume::new(VolumeConfig::new(WIDTH, HEIGHT, DEPTH)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error allocating volume: {}", e);
            std::process::exit(1);
        }
    };

    let pixels = ripple_image(WIDTH, HEIGHT);
    let image = match GrayImage::new(WIDTH, HEIGHT, &pixels) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error building image: {}", e);
            std::process::exit(1);
        }
    };

    let carver = HeightmapCarver::new()
        .with_median_filter(true)
        .with_base_plate(true);

    let start = Instant::now();
    let carved = match carver.carve(&mut volume, &image) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error carving volume: {}", e);
            std::process::exit(1);
        }
    };
    let carve_time = start.elapsed();

    println!("  Volume:          {} x {} x {}", WIDTH, HEIGHT, DEPTH);
    println!("  Voxels carved:   {}", carved);
    println!("  Carve time:      {:.3}s", carve_time.as_secs_f64());
    println!();

    // =========================================================================
    // Step 2: Sequential vs parallel sweep
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Marching Cubes Sweep                                │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let scale = AxisScale::new(0.25, 0.25, 0.1);
    let config = ExportConfig::default()
        .with_scale(scale)
        .with_header_text("relief_demo");

    let start = Instant::now();
    let sequential = extract_triangles(&volume, &config);
    let seq_time = start.elapsed();

    let start = Instant::now();
    let parallel = extract_triangles(&volume, &config.clone().with_parallel(true));
    let par_time = start.elapsed();

    match (&sequential, &parallel) {
        (Ok((seq_tris, seq_stats)), Ok((par_tris, _))) => {
            println!("  Triangles:       {}", seq_stats.triangles_written);
            println!("  Degenerate:      {}", seq_stats.degenerate_discarded);
            println!("  Cubes visited:   {}", seq_stats.cubes_visited);
            println!("  Sequential:      {:.3}s", seq_time.as_secs_f64());
            println!("  Parallel:        {:.3}s", par_time.as_secs_f64());
            println!(
                "  Speedup:         {:.2}x",
                seq_time.as_secs_f64() / par_time.as_secs_f64().max(1e-9)
            );
            println!(
                "  Outputs match:   {}",
                if seq_tris == par_tris { "yes" } else { "NO" }
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error during sweep: {}", e);
            std::process::exit(1);
        }
    }
    println!();

    // =========================================================================
    // Step 3: Export STL
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Export STL                                          │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    let stats = match export_stl_file(&volume, &output_path, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error writing '{}': {}", output_path, e);
            std::process::exit(1);
        }
    };
    let export_time = start.elapsed();
    log::info!("relief_demo wrote {} ({} bytes)", output_path, stats.bytes_written);

    println!("  Output file:     {}", output_path);
    println!("  Triangles:       {}", stats.triangles_written);
    println!("  File size:       {} bytes", stats.bytes_written);
    println!("  Export time:     {:.3}s", export_time.as_secs_f64());
    println!();

    // =========================================================================
    // Step 4: Verify
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 4: Read Back                                           │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let mesh = match read_stl_file(&output_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error reading '{}': {}", output_path, e);
            std::process::exit(1);
        }
    };
    let mesh_stats = MeshStats::from_stl(&mesh);
    let extent = mesh_stats.extent();

    println!("  Header:          {:?}", mesh.header.text());
    println!("  Triangles:       {}", mesh_stats.triangle_count);
    println!("  Surface area:    {:.2}", mesh_stats.surface_area);
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        mesh_stats.bbox_min.x,
        mesh_stats.bbox_min.y,
        mesh_stats.bbox_min.z,
        mesh_stats.bbox_max.x,
        mesh_stats.bbox_max.y,
        mesh_stats.bbox_max.z
    );
    println!(
        "  Extent:          {:.2} x {:.2} x {:.2}",
        extent.x, extent.y, extent.z
    );
    println!();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Done.");
    println!("═══════════════════════════════════════════════════════════════");
}
