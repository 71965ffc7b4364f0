//! Geometry Generator Tests
//!
//! Tests for:
//! - Mesh validity across all archetypes and parameter ranges
//! - Deterministic generation (bit-identical repeat calls)
//! - Degenerate parameter handling (zero brim, near-zero crown)
//! - Area-weighted vertex normal computation

use milliner::config::HatType;
use milliner::geometry::{Mesh, compute_vertex_normals, generate};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks the structural invariants every generated mesh must satisfy.
fn assert_valid(mesh: &Mesh, context: &str) {
    assert_eq!(
        mesh.positions.len(),
        mesh.normals.len(),
        "{context}: positions/normals must be parallel arrays"
    );
    assert_eq!(
        mesh.indices.len() % 3,
        0,
        "{context}: indices must form whole triangles"
    );
    assert!(
        !mesh.indices.is_empty(),
        "{context}: mesh must contain triangles"
    );

    let vertex_count = mesh.vertex_count();
    for &index in &mesh.indices {
        assert!(
            usize::from(index) < vertex_count,
            "{context}: index {index} out of range ({vertex_count} vertices)"
        );
    }

    for (i, p) in mesh.positions.iter().enumerate() {
        assert!(
            p.iter().all(|c| c.is_finite()),
            "{context}: vertex {i} has non-finite coordinate {p:?}"
        );
    }
    for (i, n) in mesh.normals.iter().enumerate() {
        assert!(
            n.iter().all(|c| c.is_finite()),
            "{context}: normal {i} has non-finite component {n:?}"
        );
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(
            (len - 1.0).abs() < 1e-3,
            "{context}: normal {i} not unit length ({len})"
        );
    }
}

// ============================================================================
// Validity Sweep
// ============================================================================

#[test]
fn all_archetypes_valid_across_parameter_range() {
    for hat in HatType::ALL {
        let params = hat.params();
        let crowns = [
            params.crown_height.min,
            params.crown_height.default,
            params.crown_height.max,
        ];
        let brims = [
            params.brim_size.min,
            params.brim_size.default,
            params.brim_size.max,
        ];
        for crown in crowns {
            for brim in brims {
                let mesh = generate(hat, crown, brim);
                assert_valid(&mesh, &format!("{} crown={crown} brim={brim}", hat.name()));
            }
        }
    }
}

#[test]
fn vertex_counts_fit_u16_indices() {
    for hat in HatType::ALL {
        let params = hat.params();
        let mesh = generate(hat, params.crown_height.max, params.brim_size.max);
        assert!(
            mesh.vertex_count() <= usize::from(u16::MAX),
            "{} exceeds u16 index range",
            hat.name()
        );
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn generation_is_deterministic() {
    for hat in HatType::ALL {
        let params = hat.params();
        let a = generate(hat, params.crown_height.default, params.brim_size.default);
        let b = generate(hat, params.crown_height.default, params.brim_size.default);
        assert_eq!(a.positions, b.positions, "{} positions differ", hat.name());
        assert_eq!(a.normals, b.normals, "{} normals differ", hat.name());
        assert_eq!(a.indices, b.indices, "{} indices differ", hat.name());
    }
}

// ============================================================================
// Degenerate Parameters
// ============================================================================

#[test]
fn zero_brim_still_produces_valid_mesh() {
    // Beanie is the only archetype whose valid range reaches brim = 0.
    let mesh = generate(HatType::Beanie, 1.2, 0.0);
    assert_valid(&mesh, "beanie brim=0");
}

#[test]
fn beanie_fold_band_only_present_with_brim() {
    let without = generate(HatType::Beanie, 1.2, 0.0);
    let with = generate(HatType::Beanie, 1.2, 0.2);
    assert!(
        with.vertex_count() > without.vertex_count(),
        "fold band should add vertices"
    );
}

#[test]
fn near_zero_crown_height_has_no_nan_normals() {
    for hat in HatType::ALL {
        let mesh = generate(hat, 0.0, hat.params().brim_size.default);
        assert_valid(&mesh, &format!("{} crown=0", hat.name()));
    }
}

#[test]
fn out_of_range_parameters_are_clamped_defensively() {
    let mesh = generate(HatType::Fedora, 999.0, -5.0);
    assert_valid(&mesh, "fedora crown=999 brim=-5");
    // Clamped geometry must stay bounded.
    for p in &mesh.positions {
        assert!(
            p.iter().all(|c| c.abs() < 10.0),
            "vertex escaped bounds: {p:?}"
        );
    }
}

#[test]
fn non_finite_parameters_fall_back_to_defaults() {
    let mesh = generate(HatType::Bowler, f32::NAN, f32::INFINITY);
    assert_valid(&mesh, "bowler nan/inf");
}

// ============================================================================
// Vertex Normal Computation
// ============================================================================

#[test]
fn compute_normals_quad_facing_up() {
    // A quad in the XZ plane, wound so the face normal points +Y.
    let positions = [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
    ];
    let indices = [0u16, 1, 2, 0, 2, 3];
    let normals = compute_vertex_normals(&positions, &indices);
    for (i, n) in normals.iter().enumerate() {
        assert!(approx(n[0], 0.0), "normal {i} x: {n:?}");
        assert!(approx(n[1], 1.0), "normal {i} y: {n:?}");
        assert!(approx(n[2], 0.0), "normal {i} z: {n:?}");
    }
}

#[test]
fn compute_normals_degenerate_triangle_falls_back_to_up() {
    // All three vertices coincide: zero-area triangle.
    let positions = [[1.0, 2.0, 3.0]; 3];
    let indices = [0u16, 1, 2];
    let normals = compute_vertex_normals(&positions, &indices);
    for n in &normals {
        assert_eq!(*n, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn compute_normals_unreferenced_vertex_falls_back_to_up() {
    let positions = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [5.0, 5.0, 5.0], // not referenced by any triangle
    ];
    let indices = [0u16, 2, 1];
    let normals = compute_vertex_normals(&positions, &indices);
    assert_eq!(normals[3], [0.0, 1.0, 0.0]);
}

// ============================================================================
// Archetype Shape Properties
// ============================================================================

#[test]
fn crown_height_raises_the_mesh_top() {
    for hat in HatType::ALL {
        let params = hat.params();
        let low = generate(hat, params.crown_height.min, params.brim_size.default);
        let high = generate(hat, params.crown_height.max, params.brim_size.default);
        let top = |mesh: &Mesh| {
            mesh.positions
                .iter()
                .map(|p| p[1])
                .fold(f32::NEG_INFINITY, f32::max)
        };
        assert!(
            top(&high) > top(&low),
            "{}: taller crown should raise the top",
            hat.name()
        );
    }
}

#[test]
fn brim_size_widens_the_mesh() {
    for hat in HatType::ALL {
        let params = hat.params();
        let narrow = generate(hat, params.crown_height.default, params.brim_size.min);
        let wide = generate(hat, params.crown_height.default, params.brim_size.max);
        let extent = |mesh: &Mesh| {
            mesh.positions
                .iter()
                .map(|p| (p[0] * p[0] + p[2] * p[2]).sqrt())
                .fold(0.0, f32::max)
        };
        assert!(
            extent(&wide) > extent(&narrow),
            "{}: larger brim should widen the silhouette",
            hat.name()
        );
    }
}

#[test]
fn baseball_visor_projects_forward() {
    let mesh = generate(HatType::Baseball, 0.7, 1.5);
    let max_z = mesh
        .positions
        .iter()
        .map(|p| p[2])
        .fold(f32::NEG_INFINITY, f32::max);
    // The visor reaches beyond the crown radius along +Z only.
    assert!(max_z > 1.5, "visor should project forward, max_z = {max_z}");
    let max_x = mesh
        .positions
        .iter()
        .map(|p| p[0].abs())
        .fold(0.0, f32::max);
    assert!(
        max_x < 1.2,
        "crown/visor should stay narrow in x, max_x = {max_x}"
    );
}
