/// Perspective projection and screen mapping
use crate::math::{Mat4, Vec3};

/// Perspective divides with |w| below this drop the vertex
pub const W_EPSILON: f32 = 1e-6;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Camera-space x and y are used as normalized device coordinates
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn from_flag(perspective: bool) -> Self {
        if perspective {
            ProjectionMode::Perspective
        } else {
            ProjectionMode::Orthographic
        }
    }
}

/// Frustum parameters for a camera looking down +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub height: f32,
    pub width: f32,
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(mode: ProjectionMode, height: f32, width: f32, fov_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            mode,
            height,
            width,
            fov_degrees,
            z_near,
            z_far,
        }
    }

    /// Frustum matrix with aspect = width / height; clip-space w equals view-space z
    pub fn perspective(height: f32, width: f32, fov_degrees: f32, z_near: f32, z_far: f32) -> Mat4 {
        let aspect = width / height;
        let f = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
        let q = z_far / (z_far - z_near);

        #[rustfmt::skip]
        let projection = Mat4::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0,        f,   0.0, 0.0,
            0.0,        0.0, q,   -z_near * q,
            0.0,        0.0, 1.0, 0.0,
        );
        projection
    }

    pub fn matrix(&self) -> Mat4 {
        Self::perspective(self.height, self.width, self.fov_degrees, self.z_near, self.z_far)
    }

    /// Project a camera-space point to normalized device coordinates
    ///
    /// Returns `None` when the perspective divide would blow up.
    pub fn project(&self, matrix: &Mat4, point: &Vec3) -> Option<Vec3> {
        match self.mode {
            ProjectionMode::Orthographic => Some(*point),
            ProjectionMode::Perspective => {
                let clip = matrix * point.push(1.0);
                let w = clip.w;

                // Prevent division by near-zero w
                if w.abs() < W_EPSILON {
                    return None;
                }

                Some(clip.xyz() / w)
            }
        }
    }
}

/// Output surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Map normalized device coordinates in [-1, 1] onto [0, width] x [0, height]
    ///
    /// Depth passes through untouched.
    pub fn to_screen(&self, ndc: &Vec3) -> Vec3 {
        let offset = ndc + Vec3::new(1.0, 1.0, 0.0);
        Vec3::new(offset.x * 0.5 * self.width, offset.y * 0.5 * self.height, offset.z)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}
