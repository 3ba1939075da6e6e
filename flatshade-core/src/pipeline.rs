//! The transform/clip/shade pipeline
//!
//! [`render`] is a pure function of its inputs: every call rebuilds the
//! matrices from the configuration and walks the faces through a fixed
//! sequence of stages:
//!
//! 1. world transform (rotate X, Y, Z, then translate)
//! 2. scene placement ([`SCENE_OFFSET`] in front of the camera)
//! 3. backface culling, recording a lighting intensity per kept face
//! 4. view transform (look-at)
//! 5. near-plane clip
//! 6. shading
//! 7. perspective projection and divide
//! 8. screen mapping
//! 9. viewport clip
//! 10. output, dropping anything too degenerate to draw
//!
//! Each face carries its own fill through the stages, so colors stay aligned
//! with polygons however many faces are dropped along the way.

use log::{debug, trace};

use crate::clip::{clip, clip_sequence, Plane};
use crate::color::{Color, Fill};
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Polygon};
use crate::math::{transform_point, Vec3};
use crate::projection::{Projection, ProjectionMode, Viewport};
use crate::shading::{shade, Light};
use crate::transform::Transform;

/// Offset that places the mesh in front of an unmoved camera
pub const SCENE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// Screen-space polygons and their colors, aligned by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    /// Pixel-space polygons; `z` holds the projected depth
    pub polygons: Vec<Polygon>,
    pub colors: Vec<Color>,
}

impl RenderOutput {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Polygon, &Color)> {
        self.polygons.iter().zip(self.colors.iter())
    }
}

/// A face in flight
#[derive(Debug, Clone)]
struct Face {
    polygon: Polygon,
    fill: Fill,
    intensity: Option<f32>,
}

/// Run the whole pipeline
///
/// Fails only on invalid input; numeric edge cases just make faces vanish.
pub fn render(mesh: &Mesh, fills: &[Fill], config: &SceneConfig) -> Result<RenderOutput> {
    validate(mesh, fills, config)?;

    let faces: Vec<Face> = mesh
        .faces
        .iter()
        .zip(fills.iter())
        .map(|(polygon, fill)| Face {
            polygon: polygon.clone(),
            fill: *fill,
            intensity: None,
        })
        .collect();

    let faces = place_in_world(faces, config);
    let faces = cull_backfaces(faces, config);
    let faces = to_camera_space(faces, config);
    let faces = clip_near_plane(faces, config);
    let shaded = shade_faces(faces, config);
    let shaded = project_to_screen(shaded, config);
    let shaded = clip_to_viewport(shaded, config);

    let mut output = RenderOutput::default();
    for (polygon, color) in shaded {
        if polygon.is_degenerate() {
            trace!("dropping degenerate polygon with {} vertices", polygon.len());
            continue;
        }
        output.polygons.push(polygon);
        output.colors.push(color);
    }
    debug!("rendered {} of {} faces", output.len(), mesh.len());

    Ok(output)
}

fn validate(mesh: &Mesh, fills: &[Fill], config: &SceneConfig) -> Result<()> {
    config.validate()?;
    mesh.validate()?;

    if fills.len() != mesh.len() {
        return Err(Error::FillCountMismatch {
            faces: mesh.len(),
            fills: fills.len(),
        });
    }
    for (index, fill) in fills.iter().enumerate() {
        if ![fill.r, fill.g, fill.b].iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidFill {
                index,
                reason: "color channels must be finite".to_string(),
            });
        }
    }
    Ok(())
}

/// Stages 1 and 2: object space to world space, then in front of the camera
fn place_in_world(faces: Vec<Face>, config: &SceneConfig) -> Vec<Face> {
    let world = Transform::translation(SCENE_OFFSET.x, SCENE_OFFSET.y, SCENE_OFFSET.z)
        * Transform::world_matrix(&config.rotation, &config.translation);

    faces
        .into_iter()
        .map(|face| Face {
            polygon: face.polygon.map(|v| transform_point(&world, v)),
            ..face
        })
        .collect()
}

/// Stage 3: keep faces whose normal points back at the camera
fn cull_backfaces(faces: Vec<Face>, config: &SceneConfig) -> Vec<Face> {
    if !config.flags.backface_culling {
        return faces;
    }

    let light = Light::scene();
    let camera = config.camera.position;
    let before = faces.len();

    let kept: Vec<Face> = faces
        .into_iter()
        .filter_map(|face| {
            let normal = face.polygon.normal(config.normal_estimation);
            let toward_face = face.polygon.vertices[0] - camera;
            if normal.dot(&toward_face) < 0.0 {
                Some(Face {
                    intensity: Some(light.intensity(&normal)),
                    ..face
                })
            } else {
                None
            }
        })
        .collect();

    debug!("backface culling kept {} of {} faces", kept.len(), before);
    kept
}

/// Stage 4
fn to_camera_space(faces: Vec<Face>, config: &SceneConfig) -> Vec<Face> {
    let view = config.camera.view_matrix();
    faces
        .into_iter()
        .map(|face| Face {
            polygon: face.polygon.map(|v| transform_point(&view, v)),
            ..face
        })
        .collect()
}

/// Stage 5
fn clip_near_plane(faces: Vec<Face>, config: &SceneConfig) -> Vec<Face> {
    if !config.clip_policy.clips_near_plane() {
        return faces;
    }

    let near = Plane::new(Vec3::new(0.0, 0.0, config.z_near()), Vec3::z());
    let before = faces.len();
    let kept: Vec<Face> = faces
        .into_iter()
        .map(|face| Face {
            polygon: clip(&face.polygon, &near),
            ..face
        })
        .filter(|face| !face.polygon.is_empty())
        .collect();

    debug!("near-plane clip kept {} of {} faces", kept.len(), before);
    kept
}

/// Stage 6: light the fills and resolve them to display colors
fn shade_faces(faces: Vec<Face>, config: &SceneConfig) -> Vec<(Polygon, Color)> {
    let culling = config.flags.backface_culling;
    let lighting = config.flags.lighting;

    faces
        .into_iter()
        .filter_map(|face| {
            let fill = match (culling, face.intensity) {
                (true, Some(intensity)) if lighting => shade(&face.fill, intensity),
                (true, Some(_)) | (false, _) => face.fill,
                (true, None) => {
                    trace!("dropping culled face without an intensity");
                    return None;
                }
            };
            Some((face.polygon, fill.resolve()))
        })
        .collect()
}

/// Stages 7 and 8: project to normalized device coordinates, then to pixels
fn project_to_screen(shaded: Vec<(Polygon, Color)>, config: &SceneConfig) -> Vec<(Polygon, Color)> {
    let projection = Projection::new(
        ProjectionMode::from_flag(config.flags.perspective),
        config.height as f32 - config.stroke_width * 2.0,
        config.width as f32 - config.stroke_width * 2.0,
        config.field_of_view,
        config.z_near(),
        config.z_far,
    );
    let matrix = projection.matrix();
    let viewport = Viewport::new(config.width, config.height);

    shaded
        .into_iter()
        .map(|(polygon, color)| {
            let vertices = polygon
                .vertices
                .iter()
                .filter_map(|v| {
                    let projected = projection.project(&matrix, v);
                    if projected.is_none() {
                        trace!("dropping vertex {:?} with w near zero", v);
                    }
                    projected
                })
                .map(|ndc| viewport.to_screen(&ndc))
                .collect();
            (Polygon::new(vertices), color)
        })
        .collect()
}

/// Stage 9: clip to the top, bottom, left and right screen edges
fn clip_to_viewport(shaded: Vec<(Polygon, Color)>, config: &SceneConfig) -> Vec<(Polygon, Color)> {
    if !config.clip_policy.clips_screen_edges() {
        return shaded;
    }

    let right = config.width as f32 - 1.0;
    let bottom = config.height as f32 - 1.0;
    let edges = [
        Plane::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)),
        Plane::new(Vec3::new(0.0, bottom, 0.0), Vec3::new(0.0, -1.0, 0.0)),
        Plane::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)),
        Plane::new(Vec3::new(right, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
    ];

    let before = shaded.len();
    let kept: Vec<(Polygon, Color)> = shaded
        .into_iter()
        .map(|(polygon, color)| (clip_sequence(&polygon, &edges), color))
        .filter(|(polygon, _)| !polygon.is_empty())
        .collect();

    debug!("viewport clip kept {} of {} faces", kept.len(), before);
    kept
}
