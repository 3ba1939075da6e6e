//! Scene configuration
//!
//! Everything `render` needs besides the mesh and its fills. All fields have
//! defaults matching the authoring tool's initial state, so partial configs
//! (a TOML file with a single section, a JSON object with one key) are valid.

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraMode};
use crate::color::parse_color;
use crate::error::{Error, Result};
use crate::geometry::NormalEstimation;
use crate::math::Vec3;

/// How much clipping the pipeline does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipPolicy {
    /// Near-plane clip in camera space, then clip to the four screen edges
    #[default]
    PlaneExact,
    /// No clipping; only the projection itself bounds the image
    ProjectionOnly,
}

impl ClipPolicy {
    /// Near distance for both the near-plane clip and the projection matrix
    pub fn z_near(&self) -> f32 {
        match self {
            ClipPolicy::PlaneExact => 0.1,
            ClipPolicy::ProjectionOnly => 0.0,
        }
    }

    pub fn clips_near_plane(&self) -> bool {
        matches!(self, ClipPolicy::PlaneExact)
    }

    pub fn clips_screen_edges(&self) -> bool {
        matches!(self, ClipPolicy::PlaneExact)
    }
}

/// Pipeline stage toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFlags {
    pub perspective: bool,
    pub backface_culling: bool,
    pub lighting: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            perspective: true,
            backface_culling: true,
            lighting: true,
        }
    }
}

/// Scene configuration for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Object rotation about X, Y, Z in degrees
    pub rotation: Vec3,
    /// Object translation, applied after rotation
    pub translation: Vec3,
    pub camera: Camera,
    pub flags: RenderFlags,
    pub clip_policy: ClipPolicy,
    pub normal_estimation: NormalEstimation,
    /// Outline color string
    pub stroke: String,
    pub stroke_width: f32,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Field of view in degrees
    pub field_of_view: f32,
    /// Far plane of the projection
    pub z_far: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::preset(CameraMode::EulerAngles)
    }
}

impl SceneConfig {
    /// Defaults for a camera mode, paired with the clip policy that mode
    /// traditionally used: Euler angles clip exactly, direction vectors rely
    /// on the projection alone
    pub fn preset(mode: CameraMode) -> Self {
        let clip_policy = match mode {
            CameraMode::EulerAngles => ClipPolicy::PlaneExact,
            CameraMode::DirectionVector => ClipPolicy::ProjectionOnly,
        };
        Self {
            rotation: Vec3::zeros(),
            translation: Vec3::zeros(),
            camera: Camera::new(mode),
            flags: RenderFlags::default(),
            clip_policy,
            normal_estimation: NormalEstimation::default(),
            stroke: "black".to_string(),
            stroke_width: 1.0,
            width: 720,
            height: 720,
            field_of_view: 90.0,
            z_far: 1000.0,
        }
    }

    pub fn z_near(&self) -> f32 {
        self.clip_policy.z_near()
    }

    /// Reject configurations that cannot produce a render
    pub fn validate(&self) -> Result<()> {
        let vectors = [
            ("rotation", self.rotation),
            ("translation", self.translation),
            ("camera.position", self.camera.position),
            ("camera direction", self.camera.direction()),
        ];
        for (name, value) in vectors {
            if !value.iter().all(|c| c.is_finite()) {
                return Err(Error::InvalidConfig(format!("{} must be finite, got {:?}", name, value)));
            }
        }

        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "output size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "stroke_width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        let projected_width = self.width as f32 - 2.0 * self.stroke_width;
        let projected_height = self.height as f32 - 2.0 * self.stroke_width;
        if projected_width <= 0.0 || projected_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "stroke_width {} leaves no room in a {}x{} output",
                self.stroke_width, self.width, self.height
            )));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "field_of_view must be between 0 and 180 degrees, got {}",
                self.field_of_view
            )));
        }
        if !(self.z_far.is_finite() && self.z_far > self.z_near()) {
            return Err(Error::InvalidConfig(format!(
                "z_far must be beyond z_near ({}), got {}",
                self.z_near(),
                self.z_far
            )));
        }
        parse_color(&self.stroke)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.width, 720);
        assert_eq!(config.height, 720);
        assert_eq!(config.camera.mode(), CameraMode::EulerAngles);
        assert_eq!(config.clip_policy, ClipPolicy::PlaneExact);
        assert!(config.flags.perspective && config.flags.backface_culling && config.flags.lighting);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_pair_modes_with_clip_policies() {
        let direction = SceneConfig::preset(CameraMode::DirectionVector);
        assert_eq!(direction.clip_policy, ClipPolicy::ProjectionOnly);
        assert_eq!(direction.z_near(), 0.0);
        assert!(!direction.clip_policy.clips_screen_edges());
        assert!(direction.validate().is_ok());

        let euler = SceneConfig::preset(CameraMode::EulerAngles);
        assert!((euler.z_near() - 0.1).abs() < 1e-6);
        assert!(euler.clip_policy.clips_near_plane());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{"rotation": [0, 45, 0], "flags": {"lighting": false}}"#).unwrap();
        assert_eq!(config.rotation, Vec3::new(0.0, 45.0, 0.0));
        assert!(!config.flags.lighting);
        assert!(config.flags.perspective);
        assert_eq!(config.stroke, "black");
    }

    #[test]
    fn test_camera_mode_is_selected_by_tag() {
        let config: SceneConfig = serde_json::from_str(
            r#"{"camera": {"position": [0, 0, -1], "orientation": {"mode": "direction_vector", "direction": [0, 0, 2]}},
                "clip_policy": "projection_only"}"#,
        )
        .unwrap();
        assert_eq!(config.camera.mode(), CameraMode::DirectionVector);
        assert_eq!(config.camera.target(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(config.clip_policy, ClipPolicy::ProjectionOnly);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.width = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SceneConfig::default();
        config.stroke_width = 400.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SceneConfig::default();
        config.field_of_view = 180.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SceneConfig::default();
        config.rotation.x = f32::NAN;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = SceneConfig::default();
        config.stroke = "not a color".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidColor(_))));
    }
}
