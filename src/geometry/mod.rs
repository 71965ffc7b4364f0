//! Parametric hat geometry.
//!
//! [`generate`] maps `(archetype, crown height, brim size)` to a triangle
//! [`Mesh`]. Generation is pure and deterministic: identical inputs produce
//! bit-identical vertex and index arrays, which makes meshes cacheable and
//! snapshot-testable. Each archetype recipe composes shared surface parts
//! (revolved walls, domes, annuli, tori, a curved visor plate) and merges
//! them into a single vertex pool with `u16` indices.

mod hats;
mod surfaces;

use glam::Vec3;

use crate::config::HatType;

/// Radial segments for revolved surfaces.
pub(crate) const SEGMENTS: u32 = 32;
/// Latitude rings for dome crowns.
pub(crate) const DOME_RINGS: u32 = 16;
/// Radial segments for brim surfaces.
pub(crate) const BRIM_SEGMENTS: u32 = 32;
/// Cross-section segments for torus parts.
pub(crate) const TUBE_SEGMENTS: u32 = 8;

/// A triangle-list mesh: parallel position/normal arrays plus `u16` indices.
///
/// Invariants: `positions.len() == normals.len()`, `indices.len() % 3 == 0`,
/// and every index is `< positions.len()`. Segment counts keep vertex counts
/// comfortably inside `u16` range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl Mesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends another part, offsetting its indices into this vertex pool.
    pub fn merge(&mut self, part: Mesh) {
        let base = self.positions.len();
        debug_assert!(
            base + part.positions.len() <= usize::from(u16::MAX),
            "merged mesh exceeds u16 index range"
        );
        let offset = base as u16;
        self.positions.extend(part.positions);
        self.normals.extend(part.normals);
        self.indices.extend(part.indices.iter().map(|i| i + offset));
    }
}

/// Generates the mesh for one hat configuration.
///
/// `crown_height` and `brim_size` are expected pre-clamped by
/// [`validate`](crate::config::validate); they are clamped again here so
/// out-of-range input degrades gracefully instead of producing degenerate
/// or inverted geometry.
#[must_use]
pub fn generate(hat_type: HatType, crown_height: f32, brim_size: f32) -> Mesh {
    let crown_height = if crown_height.is_finite() {
        crown_height.clamp(hats::MIN_CROWN_HEIGHT, 4.0)
    } else {
        hat_type.params().crown_height.default
    };
    let brim_size = if brim_size.is_finite() {
        brim_size.clamp(0.0, 4.0)
    } else {
        hat_type.params().brim_size.default
    };

    let mesh = match hat_type {
        HatType::Fedora => hats::fedora(crown_height, brim_size),
        HatType::Bowler => hats::bowler(crown_height, brim_size),
        HatType::Baseball => hats::baseball(crown_height, brim_size),
        HatType::Beanie => hats::beanie(crown_height, brim_size),
        HatType::Tophat => hats::tophat(crown_height, brim_size),
    };

    log::trace!(
        "generated {} mesh: {} vertices, {} triangles (crown {crown_height}, brim {brim_size})",
        hat_type.name(),
        mesh.vertex_count(),
        mesh.triangle_count(),
    );
    mesh
}

/// Computes area-weighted vertex normals from positions and triangle
/// indices. Vertices touched only by degenerate triangles fall back to +Y
/// instead of a NaN normal.
#[must_use]
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u16]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [
            usize::from(tri[0]),
            usize::from(tri[1]),
            usize::from(tri[2]),
        ];
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);
        // Unnormalized cross product weights by triangle area.
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    accum
        .into_iter()
        .map(|n| {
            if n.length_squared() > 1e-12 {
                n.normalize().to_array()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}
