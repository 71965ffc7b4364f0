//! The five archetype recipes.
//!
//! Radii and droop constants follow the hat proportions the customizer
//! ships with: crowns sit on y = 0, brims hang just below, and every
//! feature stays within a ~2 unit bounding sphere so one camera distance
//! fits all archetypes.

use glam::Vec3;

use super::surfaces::{annulus, disk, displace, dome, sagging_annulus, torus, visor_plate, wall};
use super::{BRIM_SEGMENTS, DOME_RINGS, Mesh, SEGMENTS, TUBE_SEGMENTS};

/// Floor for crown height; avoids zero-height walls and degenerate dome
/// scales.
pub(crate) const MIN_CROWN_HEIGHT: f32 = 0.05;

/// Cylindrical crown flaring from radius 0.8 at the base to 0.9 at the top,
/// flat top cap, flat annular brim with a thin downward lip at its outer
/// edge.
pub(crate) fn fedora(crown_height: f32, brim_size: f32) -> Mesh {
    let mut mesh = Mesh::default();

    mesh.merge(wall(0.8, 0.9, 0.0, crown_height, SEGMENTS));
    mesh.merge(disk(0.9, crown_height, SEGMENTS, true));
    mesh.merge(disk(0.8, 0.0, SEGMENTS, false));

    let brim_outer = 0.9 + brim_size;
    mesh.merge(annulus(0.8, brim_outer, -0.05, BRIM_SEGMENTS));
    mesh.merge(wall(brim_outer, brim_outer, -0.07, -0.05, BRIM_SEGMENTS));

    mesh
}

/// Dome crown with a curved brim drooping in proportion to the distance
/// from the crown edge, finished with a rolled torus rim.
pub(crate) fn bowler(crown_height: f32, brim_size: f32) -> Mesh {
    let mut mesh = Mesh::default();

    mesh.merge(dome(0.8, crown_height, SEGMENTS, DOME_RINGS));

    let brim_outer = 0.9 + brim_size;
    mesh.merge(sagging_annulus(0.8, brim_outer, -0.02, BRIM_SEGMENTS, 4, |r| {
        (r - 0.8).max(0.0) * 0.3
    }));
    mesh.merge(torus(
        0.9 + brim_size / 2.0,
        0.05,
        -0.05,
        1.0,
        BRIM_SEGMENTS,
        TUBE_SEGMENTS,
    ));

    mesh
}

/// Rounded crown with a forward visor plate curving down away from its
/// centerline.
pub(crate) fn baseball(crown_height: f32, brim_size: f32) -> Mesh {
    let mut mesh = Mesh::default();

    mesh.merge(dome(0.8, crown_height, SEGMENTS, DOME_RINGS));
    // The plate starts slightly inside the crown radius so it tucks under
    // the dome edge.
    mesh.merge(visor_plate(1.6, brim_size, -0.02, 0.78, 16, 8, |x, _z| {
        x.abs() * 0.1
    }));

    mesh
}

/// Soft dome crown with a low-amplitude sinusoidal knit perturbation, plus
/// a fold band at the base when the brim parameter is non-zero.
pub(crate) fn beanie(crown_height: f32, brim_size: f32) -> Mesh {
    let mut mesh = Mesh::default();

    let mut crown = dome(0.8, crown_height, SEGMENTS, DOME_RINGS);
    displace(&mut crown, |p| {
        let noise = ((p.x * 5.0).sin() + (p.z * 5.0).cos()) * 0.02;
        p + Vec3::splat(noise)
    });
    mesh.merge(crown);

    if brim_size > 0.0 {
        mesh.merge(torus(
            0.8,
            0.05,
            -0.05,
            1.0 + brim_size,
            SEGMENTS,
            TUBE_SEGMENTS,
        ));
    }

    mesh
}

/// Tall cylindrical crown tapering from 0.8 at the base to 0.7 at the top,
/// with a wide flat brim slab and a rounded torus edge.
pub(crate) fn tophat(crown_height: f32, brim_size: f32) -> Mesh {
    let mut mesh = Mesh::default();

    mesh.merge(wall(0.8, 0.7, 0.0, crown_height, SEGMENTS));
    mesh.merge(disk(0.7, crown_height, SEGMENTS, true));

    let brim_outer = 0.8 + brim_size;
    mesh.merge(annulus(0.8, brim_outer, 0.0, BRIM_SEGMENTS));
    mesh.merge(disk(brim_outer, -0.05, BRIM_SEGMENTS, false));
    mesh.merge(wall(brim_outer, brim_outer, -0.05, 0.0, BRIM_SEGMENTS));
    mesh.merge(torus(brim_outer, 0.02, -0.025, 1.0, BRIM_SEGMENTS, TUBE_SEGMENTS));

    mesh
}
