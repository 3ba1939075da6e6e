/// Flat diffuse shading with a single fixed light
use crate::color::Fill;
use crate::math::{normalize, Vec3};

/// A directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    /// The scene light: pointing down -Z, towards an unrotated camera
    pub fn scene() -> Self {
        Self {
            direction: normalize(&Vec3::new(0.0, 0.0, -1.0)),
        }
    }

    /// Cosine between the face normal and the light, unclamped in [-1, 1]
    pub fn intensity(&self, normal: &Vec3) -> f32 {
        normalize(normal).dot(&self.direction)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::scene()
    }
}

/// Scale a base fill by a lighting intensity
///
/// Negative or above-one intensities are applied as-is.
pub fn shade(fill: &Fill, intensity: f32) -> Fill {
    fill.scale(intensity)
}
