/// World and view transformation matrices
///
/// All matrices use the column-vector convention: a point `p` is transformed
/// as `M * p`, so in a product the rightmost matrix applies first.
use crate::math::{degrees_to_radians, normalize, Mat4, Vec3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Mat4::identity()
    }

    pub fn rotation_x(radians: f32) -> Mat4 {
        Mat4::new_rotation(Vec3::new(radians, 0.0, 0.0))
    }

    pub fn rotation_y(radians: f32) -> Mat4 {
        Mat4::new_rotation(Vec3::new(0.0, radians, 0.0))
    }

    pub fn rotation_z(radians: f32) -> Mat4 {
        Mat4::new_rotation(Vec3::new(0.0, 0.0, radians))
    }

    /// Rotation about X, then Y, then Z (angles in radians)
    pub fn rotation_xyz(radians: &Vec3) -> Mat4 {
        Self::rotation_z(radians.z) * Self::rotation_y(radians.y) * Self::rotation_x(radians.x)
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    /// Object-to-world matrix: rotate X, Y, Z (in degrees), then translate
    pub fn world_matrix(rotation_degrees: &Vec3, translation: &Vec3) -> Mat4 {
        let radians = rotation_degrees.map(degrees_to_radians);
        Self::translation(translation.x, translation.y, translation.z)
            * Self::rotation_xyz(&radians)
            * Self::identity()
    }

    /// World-to-camera matrix: the camera ends up at the origin looking down +Z
    pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        let forward = normalize(&(target - eye));
        let right = normalize(&up.cross(&forward));
        let true_up = forward.cross(&right);

        #[rustfmt::skip]
        let view = Mat4::new(
            right.x,   right.y,   right.z,   -right.dot(eye),
            true_up.x, true_up.y, true_up.z, -true_up.dot(eye),
            forward.x, forward.y, forward.z, -forward.dot(eye),
            0.0,       0.0,       0.0,       1.0,
        );
        view
    }
}
