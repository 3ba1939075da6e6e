/// Vector aliases and the few vector operations nalgebra leaves undefined
///
/// Addition, subtraction, scaling, dot and cross products are nalgebra's own
/// operators and methods on [`Vec3`].
use nalgebra::{Matrix4, Vector3, Vector4};

pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;
pub type Mat4 = Matrix4<f32>;

/// Lengths below this are treated as zero by [`normalize`]
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// World up axis
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Forward axis of an unrotated camera
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Normalize a vector, returning the zero vector when it has no length
pub fn normalize(v: &Vec3) -> Vec3 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Componentwise division by a scalar
pub fn divide(v: &Vec3, divisor: f32) -> Vec3 {
    v / divisor
}

/// Multiply a point (implicit w = 1) by an affine matrix
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    (matrix * point.push(1.0)).xyz()
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}
