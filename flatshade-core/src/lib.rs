/// flatshade core library - the 3D-to-2D projection pipeline
///
/// Turns a mesh of polygonal faces plus one fill per face into shaded,
/// clipped, screen-space polygons ready for vector rendering. Everything here
/// is stateless: call [`render`] again whenever an input changes.

pub mod camera;
pub mod clip;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod shading;
pub mod svg;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, CameraMode, Movement, Orientation};
pub use clip::{clip, Plane};
pub use color::{parse_color, Color, Fill};
pub use config::{ClipPolicy, RenderFlags, SceneConfig};
pub use error::{Error, Result};
pub use geometry::{Mesh, NormalEstimation, Polygon};
pub use math::{Mat4, Vec3, Vec4};
pub use pipeline::{render, RenderOutput, SCENE_OFFSET};
pub use projection::{Projection, ProjectionMode, Viewport};
pub use shading::Light;
pub use transform::Transform;
