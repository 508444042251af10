//! Comprehensive Test Suite for relief_core
//!
//! Each section pins down one piece of observable behavior: corner order,
//! sweep bounds, edge interpolation, the 256-case tables, polygonization and
//! face normals. Together they describe what the polygonizer produces for a
//! carved voxel volume.
//!
//! # Test Categories
//!
//! 1. **Corner Convention** - Offsets and edge endpoints
//! 2. **Sweep Bounds** - Which cube origins are visited, and in which order
//! 3. **Interpolation** - Edge crossing placement
//! 4. **Table Invariants** - Marching cubes table correctness
//! 5. **Polygonization** - Triangles emitted for known configurations
//! 6. **Normals** - Orientation and degeneracy
//! 7. **Error Conditions** - Display output
//! 8. **Property Tests** - Randomized invariants (proptest)
//! 9. **Integration** - Whole-volume sweeps over a carved relief

use proptest::prelude::*;
use relief_core::prelude::*;
use relief_core::*;

// =============================================================================
// Test Helpers and Mock Volumes
// =============================================================================

/// Dense u8 volume laid out x-fastest, as the export pipeline stores it.
struct DenseVolume {
    width: u32,
    height: u32,
    depth: u32,
    data: Vec<u8>,
}

impl DenseVolume {
    fn solid(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            data: vec![1; (width * height * depth) as usize],
        }
    }

    fn set(&mut self, x: u32, y: u32, z: u32, v: u8) {
        let idx = LatticeCoord::new(x, y, z).flat_index(self.width, self.height);
        self.data[idx] = v;
    }

    /// Carve every column down to a constant height: z < h becomes 0.
    fn carve_flat(&mut self, h: u32) {
        for z in 0..h {
            for y in 0..self.height {
                for x in 0..self.width {
                    self.set(x, y, z, 0);
                }
            }
        }
    }
}

impl VolumeSampler for DenseVolume {
    fn dims(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    fn sample(&self, c: LatticeCoord) -> Option<f32> {
        if !self.contains(c) {
            return None;
        }
        Some(self.data[c.flat_index(self.width, self.height)] as f32)
    }
}

/// Corner values for a marching cubes case at a binary 0/1 field.
fn case_values(case: u8) -> [f32; 8] {
    let mut values = [1.0f32; 8];
    for (i, v) in values.iter_mut().enumerate() {
        if case & (1 << i) != 0 {
            *v = 0.0;
        }
    }
    values
}

fn unit_cube(values: [f32; 8]) -> Cube {
    Cube::at_origin(LatticeCoord::new(0, 0, 0), values)
}

/// True if `p` lies on one of the 12 edges of the unit cube at the origin.
fn on_unit_cube_edge(p: Point3) -> bool {
    let on_face = |v: f32| v.abs() < 1e-6 || (v - 1.0).abs() < 1e-6;
    let inside = |v: f32| (-1e-6..=1.0 + 1e-6).contains(&v);
    let fixed = [on_face(p.x), on_face(p.y), on_face(p.z)]
        .iter()
        .filter(|&&b| b)
        .count();
    fixed >= 2 && inside(p.x) && inside(p.y) && inside(p.z)
}

// =============================================================================
// SECTION 1: Corner Convention
// =============================================================================

mod corner_tests {
    use super::*;

    #[test]
    fn should_number_bottom_ring_then_top_ring() {
        let expected = [
            (0, 0, 0),
            (1, 0, 0),
            (1, 1, 0),
            (0, 1, 0),
            (0, 0, 1),
            (1, 0, 1),
            (1, 1, 1),
            (0, 1, 1),
        ];
        assert_eq!(CORNER_OFFSETS, expected);
        for corner in Corner::ALL {
            assert_eq!(corner.offset(), expected[corner.index()]);
        }
    }

    #[test]
    fn should_roundtrip_corner_index() {
        for (i, corner) in Corner::ALL.iter().enumerate() {
            assert_eq!(corner.index(), i);
            assert_eq!(Corner::from_index(i), *corner);
        }
    }

    #[test]
    fn should_join_adjacent_corners_on_every_edge() {
        for (edge, &(a, b)) in marching_cubes::EDGE_CORNERS.iter().enumerate() {
            let (ax, ay, az) = a.offset();
            let (bx, by, bz) = b.offset();
            let manhattan = ax.abs_diff(bx) + ay.abs_diff(by) + az.abs_diff(bz);
            assert_eq!(manhattan, 1, "edge {} joins non-adjacent corners", edge);
        }
    }

    #[test]
    fn should_group_edges_as_bottom_top_vertical() {
        for (edge, &(a, b)) in marching_cubes::EDGE_CORNERS.iter().enumerate() {
            let (_, _, az) = a.offset();
            let (_, _, bz) = b.offset();
            match edge {
                0..=3 => assert!(az == 0 && bz == 0, "edge {} not on bottom face", edge),
                4..=7 => assert!(az == 1 && bz == 1, "edge {} not on top face", edge),
                _ => assert!(az == 0 && bz == 1, "edge {} not vertical", edge),
            }
        }
    }
}

// =============================================================================
// SECTION 2: Sweep Bounds
// =============================================================================

mod sweep_tests {
    use super::*;

    #[test]
    fn should_visit_every_complete_cube_once() {
        let dims = (5, 4, 3);
        let origins: Vec<_> = cube_origins(dims).collect();

        assert_eq!(origins.len(), 4 * 3 * 2);
        let mut dedup = origins.clone();
        dedup.sort_by_key(|c| (c.z, c.y, c.x));
        dedup.dedup();
        assert_eq!(dedup.len(), origins.len());
    }

    #[test]
    fn should_visit_x_fastest_within_slab() {
        let origins: Vec<_> = slab_origins((3, 3, 3), 1).collect();
        assert_eq!(
            origins,
            vec![
                LatticeCoord::new(0, 0, 1),
                LatticeCoord::new(1, 0, 1),
                LatticeCoord::new(0, 1, 1),
                LatticeCoord::new(1, 1, 1),
            ]
        );
    }

    #[test]
    fn should_visit_slabs_in_ascending_z() {
        let zs: Vec<u32> = cube_origins((3, 3, 4)).map(|c| c.z).collect();
        let mut sorted = zs.clone();
        sorted.sort();
        assert_eq!(zs, sorted);
    }

    #[test]
    fn should_never_sample_outer_layer_as_origin() {
        let vol = DenseVolume::solid(4, 4, 4);
        for x in 0..4 {
            for y in 0..4 {
                assert!(sample_cube(&vol, LatticeCoord::new(x, y, 3)).is_none());
                assert!(sample_cube(&vol, LatticeCoord::new(3, x, y)).is_none());
                assert!(sample_cube(&vol, LatticeCoord::new(x, 3, y)).is_none());
            }
        }
        assert!(sample_cube(&vol, LatticeCoord::new(2, 2, 2)).is_some());
    }

    #[test]
    fn should_produce_no_cubes_for_thin_volumes() {
        assert_eq!(cube_count((1, 10, 10)), 0);
        assert_eq!(cube_count((10, 1, 10)), 0);
        assert_eq!(cube_count((10, 10, 1)), 0);
        assert_eq!(cube_count((2, 2, 2)), 1);
        assert_eq!(cube_extent((0, 0, 0)), (0, 0, 0));
    }
}

// =============================================================================
// SECTION 3: Interpolation
// =============================================================================

mod interpolation_tests {
    use super::*;

    #[test]
    fn should_place_carved_to_solid_crossing_on_solid_corner() {
        let p0 = Point3::new(0.0, 0.0, 2.0);
        let p1 = Point3::new(0.0, 0.0, 3.0);

        assert_eq!(interpolate_vertex(p0, p1, 0.0, 1.0, 1.0), p1);
        assert_eq!(interpolate_vertex(p1, p0, 1.0, 0.0, 1.0), p1);
    }

    #[test]
    fn should_interpolate_linearly_between_values() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(4.0, 0.0, 0.0);

        let p = interpolate_vertex(p0, p1, 0.0, 4.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn should_return_first_endpoint_for_flat_edge() {
        let p0 = Point3::new(1.0, 1.0, 1.0);
        let p1 = Point3::new(2.0, 1.0, 1.0);
        assert_eq!(interpolate_vertex(p0, p1, 0.5, 0.5, 0.5), p0);
    }

    #[test]
    fn should_never_leave_the_edge() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(0.0, 1.0, 0.0);
        for iso in [-10.0, -0.5, 0.0, 0.3, 1.0, 7.0] {
            let p = interpolate_vertex(p0, p1, 0.0, 1.0, iso);
            assert!((0.0..=1.0).contains(&p.y), "iso {} gave {:?}", iso, p);
        }
    }
}

// =============================================================================
// SECTION 4: Table Invariants
// =============================================================================

mod marching_cubes_table_tests {
    use super::*;
    use relief_core::marching_cubes::{EDGE_CORNERS, EDGE_TABLE, MAX_TRIANGLES, TRI_END, TRI_TABLE};

    #[test]
    fn should_have_empty_uniform_cases() {
        assert_eq!(EDGE_TABLE[0], 0);
        assert_eq!(EDGE_TABLE[255], 0);
        assert_eq!(TRI_TABLE[0][0], TRI_END);
        assert_eq!(TRI_TABLE[255][0], TRI_END);
    }

    #[test]
    fn should_flag_exactly_the_sign_changing_edges() {
        for case in 0..256usize {
            for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
                let ia = case & (1 << a.index()) != 0;
                let ib = case & (1 << b.index()) != 0;
                let flagged = EDGE_TABLE[case] & (1 << edge) != 0;
                assert_eq!(flagged, ia != ib, "case {} edge {}", case, edge);
            }
        }
    }

    #[test]
    fn should_terminate_every_row_within_five_triangles() {
        for (case, row) in TRI_TABLE.iter().enumerate() {
            let used = row.iter().take_while(|&&e| e != TRI_END).count();
            assert_eq!(used % 3, 0, "case {} has a partial triangle", case);
            assert!(used / 3 <= MAX_TRIANGLES);
            assert!(row[used..].iter().all(|&e| e == TRI_END));
        }
    }

    #[test]
    fn should_only_reference_flagged_edges() {
        for (case, row) in TRI_TABLE.iter().enumerate() {
            for &e in row.iter().take_while(|&&e| e != TRI_END) {
                assert!((0..12).contains(&e));
                assert!(
                    EDGE_TABLE[case] & (1 << e) != 0,
                    "case {} uses unflagged edge {}",
                    case,
                    e
                );
            }
        }
    }
}

// =============================================================================
// SECTION 5: Polygonization
// =============================================================================

mod polygonize_tests {
    use super::*;

    #[test]
    fn should_emit_nothing_for_uniform_cubes() {
        assert!(polygonize(&unit_cube([0.0; 8]), 1.0).is_empty());
        assert!(polygonize(&unit_cube([1.0; 8]), 1.0).is_empty());
    }

    #[test]
    fn should_emit_two_triangles_for_half_carved_cube() {
        let tris = polygonize(&unit_cube(case_values(0x0F)), 1.0);
        assert_eq!(tris.len(), 2);
        for tri in tris.iter() {
            for v in tri {
                assert_eq!(v.z, 1.0, "vertex should sit on the solid layer");
            }
        }
    }

    #[test]
    fn should_match_row_length_of_triangulation_table() {
        for case in 0..=255u8 {
            let row = &marching_cubes::TRI_TABLE[case as usize];
            let expected = row.iter().take_while(|&&e| e != marching_cubes::TRI_END).count() / 3;
            let tris = polygonize(&unit_cube(case_values(case)), 0.5);
            assert_eq!(tris.len(), expected, "case {:#04x}", case);
        }
    }

    #[test]
    fn should_translate_with_cube_origin() {
        let values = case_values(0x01);
        let here = polygonize(&unit_cube(values), 0.5);
        let there = polygonize(&Cube::at_origin(LatticeCoord::new(3, 4, 5), values), 0.5);

        let shift = Point3::new(3.0, 4.0, 5.0);
        for (a, b) in here.iter().zip(there.iter()) {
            for i in 0..3 {
                assert_eq!(a[i] + shift, b[i]);
            }
        }
    }

    #[test]
    fn should_read_corners_from_volume() {
        let mut vol = DenseVolume::solid(3, 3, 3);
        vol.set(1, 1, 1, 0);

        // Only the 8 cubes sharing voxel (1,1,1) see a sign change
        let active = cube_origins(vol.dims())
            .filter(|&o| !process_cube(&vol, o, 0.5).is_empty())
            .count();
        assert_eq!(active, 8);
    }
}

// =============================================================================
// SECTION 6: Normals
// =============================================================================

mod normal_tests {
    use super::*;

    #[test]
    fn should_point_toward_carved_side_for_floor_case() {
        let tris = polygonize(&unit_cube(case_values(0x0F)), 0.5);
        for tri in tris.iter() {
            let n = compute_normal(tri).unwrap();
            assert!((n.z + 1.0).abs() < 1e-6, "normal {:?}", n);
            assert!(n.x.abs() < 1e-6 && n.y.abs() < 1e-6);
        }
    }

    #[test]
    fn should_flip_with_winding() {
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let n = compute_normal(&tri).unwrap();
        let m = compute_normal(&[tri[2], tri[1], tri[0]]).unwrap();
        assert_eq!(n, -m);
    }

    #[test]
    fn should_reject_collapsed_triangles() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(1.0, 2.0, 1.0);
        assert!(is_degenerate(&[a, a, b]));
        assert!(is_degenerate(&[a, b, a]));
        assert_eq!(triangle_area(&[a, a, b]), 0.0);
    }

    #[test]
    fn should_reject_tiny_triangles() {
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-7, 0.0, 0.0),
            Point3::new(0.0, 1e-7, 0.0),
        ];
        assert!(compute_normal(&tri).is_none());
    }
}

// =============================================================================
// SECTION 7: Error Conditions
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn should_describe_out_of_bounds_voxel() {
        let err = CoreError::OutOfBounds {
            x: 9,
            y: 0,
            z: 2,
            width: 4,
            height: 4,
            depth: 4,
        };
        assert_eq!(err.to_string(), "voxel (9, 0, 2) is outside volume 4x4x4");
    }

    #[test]
    fn should_describe_invalid_dimensions() {
        let err = CoreError::InvalidDimensions {
            width: 0,
            height: 3,
            depth: 3,
        };
        assert_eq!(err.to_string(), "invalid volume dimensions 0x3x3");
    }

    #[test]
    fn should_be_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::InvalidDimensions {
            width: 0,
            height: 0,
            depth: 0,
        });
    }
}

// =============================================================================
// SECTION 8: Property Tests
// =============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Binary cubes put every vertex on a cube edge
        #[test]
        fn vertices_lie_on_cube_edges(case in any::<u8>(), iso in 0.01f32..1.0) {
            let tris = polygonize(&unit_cube(case_values(case)), iso);
            for tri in tris.iter() {
                for &v in tri {
                    prop_assert!(on_unit_cube_edge(v), "case {:#04x} vertex {:?}", case, v);
                }
            }
        }

        /// Arbitrary corner values keep vertices within the cube
        #[test]
        fn vertices_stay_inside_cube(
            values in prop::array::uniform8(0.0f32..1.0),
            iso in 0.0f32..1.0,
        ) {
            let tris = polygonize(&unit_cube(values), iso);
            prop_assert!(tris.len() <= marching_cubes::MAX_TRIANGLES);
            for tri in tris.iter() {
                for &v in tri {
                    prop_assert!(v.is_finite());
                    prop_assert!(on_unit_cube_edge(v), "vertex {:?}", v);
                }
            }
        }

        /// Uniform cubes emit nothing regardless of the threshold
        #[test]
        fn uniform_cubes_are_silent(v in 0.0f32..2.0, iso in 0.0f32..2.0) {
            prop_assert!(polygonize(&unit_cube([v; 8]), iso).is_empty());
        }

        /// Every accepted normal has unit length
        #[test]
        fn normals_are_unit_length(
            a in prop::array::uniform3(-100.0f32..100.0),
            b in prop::array::uniform3(-100.0f32..100.0),
            c in prop::array::uniform3(-100.0f32..100.0),
        ) {
            let tri = [Point3::from(a), Point3::from(b), Point3::from(c)];
            if let Some(n) = compute_normal(&tri) {
                prop_assert!((n.length() - 1.0).abs() < 1e-4, "normal {:?}", n);
            }
        }

        /// The case index has one bit per carved corner
        #[test]
        fn cube_index_counts_inside_corners(case in any::<u8>()) {
            let index = compute_cube_index(&case_values(case), 0.5);
            prop_assert_eq!(index, case);
        }
    }
}

// =============================================================================
// SECTION 9: Integration
// =============================================================================

mod integration_tests {
    use super::*;

    fn surviving_triangles(vol: &DenseVolume, iso: f32) -> Vec<(Point3, Triangle)> {
        cube_origins(vol.dims())
            .flat_map(|o| process_cube(vol, o, iso))
            .filter_map(|tri| compute_normal(&tri).map(|n| (n, tri)))
            .collect()
    }

    #[test]
    fn should_mesh_flat_relief_as_two_triangles_per_column() {
        let (w, h, d) = (6, 5, 8);
        let level = 3;
        let mut vol = DenseVolume::solid(w, h, d);
        vol.carve_flat(level);

        let tris = surviving_triangles(&vol, 1.0);
        assert_eq!(tris.len(), 2 * (w as usize - 1) * (h as usize - 1));

        for (n, tri) in &tris {
            assert!((n.z + 1.0).abs() < 1e-6);
            for v in tri {
                assert_eq!(v.z, level as f32);
            }
        }
    }

    #[test]
    fn should_mesh_nothing_for_untouched_volume() {
        let vol = DenseVolume::solid(5, 5, 5);
        assert!(surviving_triangles(&vol, 1.0).is_empty());
    }

    #[test]
    fn should_reach_outer_corner_voxel_through_one_cube() {
        let mut vol = DenseVolume::solid(4, 4, 4);
        vol.set(3, 3, 3, 0);

        // The corner voxel belongs to exactly one complete cube
        let active = cube_origins(vol.dims())
            .filter(|&o| !process_cube(&vol, o, 0.5).is_empty())
            .count();
        assert_eq!(active, 1);
    }

    #[test]
    fn should_produce_finite_output_for_carved_column() {
        let mut vol = DenseVolume::solid(4, 4, 4);
        for z in 0..3 {
            vol.set(1, 1, z, 0);
        }

        let tris = surviving_triangles(&vol, 1.0);
        for (n, tri) in &tris {
            assert!(n.is_finite());
            assert!(tri.iter().all(|v| v.is_finite()));
        }
    }
}
