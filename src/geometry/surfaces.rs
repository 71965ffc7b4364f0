//! Shared surface parts for the hat recipes.
//!
//! Each builder returns a standalone [`Mesh`] part that the recipes merge
//! into one vertex pool. Analytic surfaces (walls, disks, domes, tori) carry
//! analytic normals; displaced surfaces (sagging brims, the visor plate,
//! perturbed crowns) recompute area-weighted normals from their triangles.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use super::{Mesh, compute_vertex_normals};

// Lower bound for the dome vertical scale; keeps normal computation away
// from a division by zero when the crown height approaches 0.
const MIN_DOME_SCALE: f32 = 0.05;

/// Revolved side wall between two radii. Handles cylinders
/// (`r_bottom == r_top`) and truncated cones; normals follow the slant.
pub(crate) fn wall(r_bottom: f32, r_top: f32, y_bottom: f32, y_top: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();

    let dy = y_top - y_bottom;
    let dr = r_top - r_bottom;
    // Profile normal in the (radial, y) plane, perpendicular to the slant.
    let slant = Vec3::new(dy, -dr, 0.0);
    let (n_radial, n_y) = if slant.length_squared() > 1e-12 {
        let n = slant.normalize();
        (n.x, n.y)
    } else {
        (1.0, 0.0)
    };

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();

        mesh.positions.push([r_bottom * cos, y_bottom, r_bottom * sin]);
        mesh.normals.push([n_radial * cos, n_y, n_radial * sin]);

        mesh.positions.push([r_top * cos, y_top, r_top * sin]);
        mesh.normals.push([n_radial * cos, n_y, n_radial * sin]);
    }

    for i in 0..segments {
        let base = (i * 2) as u16;
        mesh.indices.extend([base, base + 1, base + 2]);
        mesh.indices.extend([base + 1, base + 3, base + 2]);
    }

    mesh
}

/// Flat disk cap at height `y`, triangle fan around a center vertex.
pub(crate) fn disk(radius: f32, y: f32, segments: u32, facing_up: bool) -> Mesh {
    let mut mesh = Mesh::default();
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    mesh.positions.push([0.0, y, 0.0]);
    mesh.normals.push(normal);

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        mesh.positions.push([radius * cos, y, radius * sin]);
        mesh.normals.push(normal);
    }

    for i in 0..segments {
        let a = (i + 1) as u16;
        let b = (i + 2) as u16;
        if facing_up {
            mesh.indices.extend([0, b, a]);
        } else {
            mesh.indices.extend([0, a, b]);
        }
    }

    mesh
}

/// Flat annular ring at height `y` with +Y normals. A zero-width ring
/// (`inner == outer`) still produces valid, zero-area triangles.
pub(crate) fn annulus(inner: f32, outer: f32, y: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();

        mesh.positions.push([inner * cos, y, inner * sin]);
        mesh.normals.push([0.0, 1.0, 0.0]);

        mesh.positions.push([outer * cos, y, outer * sin]);
        mesh.normals.push([0.0, 1.0, 0.0]);
    }

    for i in 0..segments {
        let base = (i * 2) as u16;
        mesh.indices.extend([base, base + 2, base + 1]);
        mesh.indices.extend([base + 1, base + 2, base + 3]);
    }

    mesh
}

/// Annular ring whose surface sags below `y` by `sag(r)`. Used for curved
/// brims; normals are recomputed from the displaced triangles.
pub(crate) fn sagging_annulus(
    inner: f32,
    outer: f32,
    y: f32,
    segments: u32,
    rings: u32,
    sag: impl Fn(f32) -> f32,
) -> Mesh {
    let mut mesh = Mesh::default();
    let stride = segments + 1;

    for ring in 0..=rings {
        let t = ring as f32 / rings as f32;
        let r = inner + (outer - inner) * t;
        let ring_y = y - sag(r);
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            mesh.positions.push([r * cos, ring_y, r * sin]);
        }
    }

    for ring in 0..rings {
        for i in 0..segments {
            let a = (ring * stride + i) as u16;
            let b = a + 1;
            let c = ((ring + 1) * stride + i) as u16;
            let d = c + 1;
            mesh.indices.extend([a, c, b]);
            mesh.indices.extend([b, c, d]);
        }
    }

    mesh.normals = compute_vertex_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Dome crown: a hemisphere of `radius`, scaled by `y_scale` along the
/// vertical axis, seated with its equator at y = 0.
pub(crate) fn dome(radius: f32, y_scale: f32, segments: u32, rings: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let scale = y_scale.max(MIN_DOME_SCALE);
    let stride = segments + 1;

    for ring in 0..=rings {
        // Latitude from equator (0) to pole (PI/2).
        let phi = ring as f32 / rings as f32 * FRAC_PI_2;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let ring_radius = radius * cos_phi;
        let py = radius * sin_phi * scale;

        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();

            mesh.positions.push([ring_radius * cos, py, ring_radius * sin]);

            // Ellipsoid normal: the y component divides by the scale.
            let n = Vec3::new(cos_phi * cos, sin_phi / scale, cos_phi * sin).normalize();
            mesh.normals.push(n.to_array());
        }
    }

    // Pole-row triangles degenerate to zero area and are dropped by the
    // rasterizer, same as an unclamped lat-long sphere.
    for ring in 0..rings {
        for i in 0..segments {
            let a = (ring * stride + i) as u16;
            let b = a + 1;
            let c = ((ring + 1) * stride + i) as u16;
            let d = c + 1;
            mesh.indices.extend([a, b, c]);
            mesh.indices.extend([b, d, c]);
        }
    }

    mesh
}

/// Torus centered on the Y axis at height `y`, with the ring radius scaled
/// by `radial_scale` in x/z (the beanie fold widens with brim size).
pub(crate) fn torus(
    ring_radius: f32,
    tube_radius: f32,
    y: f32,
    radial_scale: f32,
    segments: u32,
    tube_segments: u32,
) -> Mesh {
    let mut mesh = Mesh::default();
    let scale = radial_scale.max(MIN_DOME_SCALE);
    let stride = tube_segments + 1;

    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin_t, cos_t) = theta.sin_cos();

        for j in 0..=tube_segments {
            let alpha = j as f32 / tube_segments as f32 * TAU;
            let (sin_a, cos_a) = alpha.sin_cos();

            let r = ring_radius + tube_radius * cos_a;
            mesh.positions
                .push([r * cos_t * scale, tube_radius * sin_a + y, r * sin_t * scale]);

            // Inverse-transpose of the x/z scale applied to the circular
            // cross-section normal.
            let n = Vec3::new(cos_a * cos_t / scale, sin_a, cos_a * sin_t / scale).normalize();
            mesh.normals.push(n.to_array());
        }
    }

    for i in 0..segments {
        for j in 0..tube_segments {
            let a = (i * stride + j) as u16;
            let b = a + 1;
            let c = ((i + 1) * stride + j) as u16;
            let d = c + 1;
            mesh.indices.extend([a, c, b]);
            mesh.indices.extend([b, c, d]);
        }
    }

    mesh
}

/// Forward-projecting visor plate: a grid spanning `width` in x and
/// `length` in z starting at `z_start`, dropped below `y` by `droop(x, z)`.
/// Normals are recomputed from the curved triangles.
pub(crate) fn visor_plate(
    width: f32,
    length: f32,
    y: f32,
    z_start: f32,
    x_segments: u32,
    z_segments: u32,
    droop: impl Fn(f32, f32) -> f32,
) -> Mesh {
    let mut mesh = Mesh::default();
    let stride = x_segments + 1;

    for zi in 0..=z_segments {
        let z = z_start + length * zi as f32 / z_segments as f32;
        for xi in 0..=x_segments {
            let x = -width / 2.0 + width * xi as f32 / x_segments as f32;
            mesh.positions.push([x, y - droop(x, z), z]);
        }
    }

    for zi in 0..z_segments {
        for xi in 0..x_segments {
            let a = (zi * stride + xi) as u16;
            let b = a + 1;
            let c = ((zi + 1) * stride + xi) as u16;
            let d = c + 1;
            mesh.indices.extend([a, b, c]);
            mesh.indices.extend([b, d, c]);
        }
    }

    mesh.normals = compute_vertex_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Applies a position displacement to every vertex of a part and recomputes
/// its normals.
pub(crate) fn displace(mesh: &mut Mesh, f: impl Fn(Vec3) -> Vec3) {
    for p in &mut mesh.positions {
        *p = f(Vec3::from(*p)).to_array();
    }
    mesh.normals = compute_vertex_normals(&mesh.positions, &mesh.indices);
}
