//! Procedural mesh data for the two shapes the scene uses

use std::f32::consts::PI;

use super::vertex::MeshVertex;
use crate::assets::MeshKind;

/// Latitude and longitude bands of the sphere mesh
pub const SPHERE_SEGMENTS: u32 = 30;

/// CPU-side indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Cube => cube(),
            MeshKind::Sphere => sphere(SPHERE_SEGMENTS),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned cube spanning [-1, 1] on every axis.
///
/// Four vertices per face so each face gets a flat normal and full UVs.
/// Scaling by an obstacle's half-extents gives its box exactly.
pub fn cube() -> MeshData {
    // (normal, u axis, v axis)
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u_axis, v_axis) in FACES {
        let base = vertices.len() as u16;
        for (su, sv) in CORNERS {
            let position = [
                normal[0] + u_axis[0] * su + v_axis[0] * sv,
                normal[1] + u_axis[1] * su + v_axis[1] * sv,
                normal[2] + u_axis[2] * su + v_axis[2] * sv,
            ];
            let tex_coord = [(su + 1.0) * 0.5, 1.0 - (sv + 1.0) * 0.5];
            vertices.push(MeshVertex::new(position, normal, tex_coord));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Unit sphere from latitude/longitude bands
pub fn sphere(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

    for lat in 0..=segments {
        let theta = lat as f32 * PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=segments {
            let phi = lon as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let n = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            let uv = [
                1.0 - lon as f32 / segments as f32,
                1.0 - lat as f32 / segments as f32,
            ];
            vertices.push(MeshVertex::new(n, n, uv));
        }
    }

    for lat in 0..segments {
        for lon in 0..segments {
            let first = (lat * (segments + 1) + lon) as u16;
            let second = first + segments as u16 + 1;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    MeshData { vertices, indices }
}
