//! Render readback layout

use bytemuck::{Pod, Zeroable};
use particle_physics::Particle;

/// Per-particle data a renderer needs each frame
/// Aligned for WGSL struct compatibility (two vec4<f32>)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xyz = position, w = 1
    pub position: [f32; 4],
    /// RGBA
    pub color: [f32; 4],
}

impl From<&Particle> for ParticleInstance {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position.extend(1.0).to_array(),
            color: particle.color.to_array(),
        }
    }
}

/// View a slice of instances as raw bytes for a vertex/storage buffer upload
pub fn instance_bytes(instances: &[ParticleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
