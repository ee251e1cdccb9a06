//! Deterministic procedural rock shapes for meteors.
//!
//! A UV sphere is displaced per-vertex by a bounded sum of sinusoidal
//! octaves keyed on the seed. Same `(radius, segments, seed)` always
//! yields bit-identical vertex positions — meteors keep their shape across
//! scene rebuilds without storing geometry. The displacement is not
//! statistical noise; callers must not expect a spectral distribution.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Base of the displaced-radius band: factor applied before displacement.
const DISPLACEMENT_BASE: f32 = 0.85;

/// Amplitude of the displacement contribution to the radius factor.
const DISPLACEMENT_AMPLITUDE: f32 = 0.3;

/// Octave frequency multipliers and their blend weights.
const OCTAVES: [(f32, f32); 3] = [(3.0, 0.3), (8.0, 0.15), (15.0, 0.08)];

/// Generated rock geometry, ready for conversion into a [`Mesh`].
#[derive(Clone, Debug)]
pub struct RockGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl RockGeometry {
    /// Generate an irregular rock from a UV sphere.
    ///
    /// # Arguments
    /// * `radius` - Base sphere radius; displaced radii stay within
    ///   `[0.55 * radius, 1.15 * radius]`
    /// * `segments` - Ring and sector count of the base sphere
    /// * `seed` - Shape selector; equal seeds give identical geometry
    ///
    /// # Panics
    /// Panics if `radius` is not positive and finite, or `segments < 3`.
    pub fn generate(radius: f32, segments: u32, seed: u32) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "rock radius must be positive and finite, got {radius}"
        );
        assert!(segments >= 3, "rock needs at least 3 segments, got {segments}");

        let ring_count = segments + 1;
        let vertex_count = (ring_count * ring_count) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for iy in 0..ring_count {
            let v = iy as f32 / segments as f32;
            let polar = v * PI;
            for ix in 0..ring_count {
                let u = ix as f32 / segments as f32;
                let azimuth = u * TAU;

                let dir = Vec3::new(
                    polar.sin() * azimuth.cos(),
                    polar.cos(),
                    polar.sin() * azimuth.sin(),
                );
                let displaced =
                    radius * (DISPLACEMENT_BASE + displacement(dir, seed) * DISPLACEMENT_AMPLITUDE);
                positions.push((dir * displaced).to_array());
                uvs.push([u, v]);
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let k1 = iy * ring_count + ix;
                let k2 = k1 + ring_count;
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
        }

        let normals = compute_normals(&positions, &indices);

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }
}

/// Bounded displacement scalar for a unit direction, in roughly [-1, 1]
/// (hard bound: the sum of octave weights, ±0.53).
fn displacement(dir: Vec3, seed: u32) -> f32 {
    // Spread consecutive seeds far apart in phase space.
    let phase = seed as f32 * 0.618_034;

    OCTAVES
        .iter()
        .enumerate()
        .map(|(octave, &(frequency, weight))| {
            weight * sine_tap(dir, frequency, phase + octave as f32 * 11.7)
        })
        .sum()
}

/// One sinusoidal tap: the average of three phase-shifted sine terms over
/// the direction components, in [-1, 1].
fn sine_tap(dir: Vec3, frequency: f32, phase: f32) -> f32 {
    let a = (dir.x * frequency + phase).sin();
    let b = (dir.y * frequency + phase * 1.3 + 2.1).sin();
    let c = (dir.z * frequency + phase * 1.7 + 4.2).sin();
    (a + b + c) / 3.0
}

/// Area-weighted vertex normals recomputed after displacement.
fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let a = Vec3::from(positions[tri[0] as usize]);
        let b = Vec3::from(positions[tri[1] as usize]);
        let c = Vec3::from(positions[tri[2] as usize]);
        // Unnormalized cross product weights the contribution by face area.
        let face_normal = (b - a).cross(c - a);
        for &index in tri {
            accumulated[index as usize] += face_normal;
        }
    }

    accumulated
        .iter()
        .zip(positions)
        .map(|(normal, position)| {
            // Degenerate pole triangles can cancel out; fall back to the
            // radial direction.
            normal
                .try_normalize()
                .unwrap_or_else(|| Vec3::from(*position).normalize_or(Vec3::Y))
                .to_array()
        })
        .collect()
}

impl From<RockGeometry> for Mesh {
    fn from(geometry: RockGeometry) -> Self {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs)
        .with_inserted_indices(Indices::U32(geometry.indices))
    }
}

/// Convenience wrapper producing a render-ready mesh.
pub fn rock_mesh(radius: f32, segments: u32, seed: u32) -> Mesh {
    RockGeometry::generate(radius, segments, seed).into()
}
