//! Turn a decoded RGB image into particles, one per pixel
//!
//! Decoding is left to the caller; this only maps pixel coordinates to
//! positions with an affine scale/offset and 8-bit channels to [0, 1] colors.

use crate::SimulationError;
use glam::{Vec3, Vec4};
use particle_physics::Particle;

const CHANNEL_MAX: f32 = 255.0;

/// Affine mapping from pixel grid to world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    /// Alpha given to every generated particle
    pub opacity: f32,
}

impl Default for PixelMapping {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
            x_scale: 0.3,
            y_scale: 0.3,
            opacity: 0.5,
        }
    }
}

impl PixelMapping {
    /// World position of pixel column `i`, row `j`. Rows grow downward.
    pub fn position(&self, i: usize, j: usize) -> Vec3 {
        Vec3::new(
            self.x_offset + i as f32 * self.x_scale,
            self.y_offset - j as f32 * self.y_scale,
            self.z_offset,
        )
    }

    pub fn color(&self, rgb: [u8; 3]) -> Vec4 {
        Vec4::new(
            f32::from(rgb[0]) / CHANNEL_MAX,
            f32::from(rgb[1]) / CHANNEL_MAX,
            f32::from(rgb[2]) / CHANNEL_MAX,
            self.opacity,
        )
    }
}

/// Build one particle per pixel of a row-major `width` x `height` image
///
/// Particles come out in the same row-major order as `pixels`.
pub fn particles_from_pixels(
    width: usize,
    height: usize,
    pixels: &[[u8; 3]],
    mapping: &PixelMapping,
) -> Result<Vec<Particle>, SimulationError> {
    let expected = width * height;
    if pixels.len() != expected {
        return Err(SimulationError::PixelBuffer {
            expected,
            actual: pixels.len(),
        });
    }

    let particles = pixels
        .iter()
        .enumerate()
        .map(|(index, rgb)| {
            let (i, j) = (index % width, index / width);
            let mut particle = Particle::at(mapping.position(i, j));
            particle.set_color(mapping.color(*rgb));
            particle
        })
        .collect::<Vec<_>>();

    log::info!(
        "Generated {} particles from a {}x{} image",
        particles.len(),
        width,
        height
    );
    Ok(particles)
}
