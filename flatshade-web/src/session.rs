/// Browser-independent state behind `WebRenderer`
use flatshade_core::{
    input, render, svg, CameraMode, Fill, Mesh, Movement, RenderOutput, Result, SceneConfig,
};
use log::debug;

/// Map a `KeyboardEvent.code` to a camera movement
pub fn movement_for_key(code: &str) -> Option<Movement> {
    Some(match code {
        "KeyW" => Movement::Forward,
        "KeyS" => Movement::Backward,
        "KeyA" => Movement::Left,
        "KeyD" => Movement::Right,
        "KeyQ" => Movement::Down,
        "KeyE" => Movement::Up,
        "ArrowUp" => Movement::PitchUp,
        "ArrowDown" => Movement::PitchDown,
        "ArrowLeft" => Movement::YawLeft,
        "ArrowRight" => Movement::YawRight,
        "KeyZ" => Movement::RollLeft,
        "KeyX" => Movement::RollRight,
        _ => return None,
    })
}

/// Faces, fills and scene settings for one page
#[derive(Debug, Clone, Default)]
pub struct Session {
    mesh: Mesh,
    fills: Vec<Fill>,
    config: SceneConfig,
    output: RenderOutput,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    pub fn set_faces(&mut self, json: &str) -> Result<()> {
        self.mesh = input::parse_mesh(json)?;
        Ok(())
    }

    pub fn set_fills(&mut self, json: &str) -> Result<()> {
        self.fills = input::parse_fills(json)?;
        Ok(())
    }

    /// Replace the scene settings; missing keys take their defaults
    pub fn set_config(&mut self, json: &str) -> Result<()> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Switch camera mode, resetting the camera and clip policy to that mode's preset
    pub fn set_mode(&mut self, mode: CameraMode) {
        let preset = SceneConfig::preset(mode);
        self.config.camera = preset.camera;
        self.config.clip_policy = preset.clip_policy;
    }

    pub fn set_perspective(&mut self, enabled: bool) {
        self.config.flags.perspective = enabled;
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.config.flags.backface_culling = enabled;
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.config.flags.lighting = enabled;
    }

    /// Run the pipeline and return a standalone SVG document
    pub fn render(&mut self) -> Result<String> {
        self.output = render(&self.mesh, &self.fills, &self.config)?;
        debug!("web render produced {} paths", self.output.len());
        Ok(svg::document(&self.output, &self.config))
    }

    /// Apply a key press; returns false for keys without a binding
    pub fn key(&mut self, code: &str) -> bool {
        match movement_for_key(code) {
            Some(movement) => {
                self.config.camera.apply(movement);
                true
            }
            None => false,
        }
    }

    /// Path markup of the last render
    pub fn paths(&self) -> String {
        svg::paths(&self.output, &self.config.stroke, self.config.stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatshade_core::{ClipPolicy, Error, Orientation};

    const QUAD: &str = "[[[-0.5, -0.5, 0], [-0.5, 0.5, 0], [0.5, 0.5, 0], [0.5, -0.5, 0]]]";

    fn quad_session() -> Session {
        let mut session = Session::new();
        session.set_faces(QUAD).unwrap();
        session.set_fills(r#"["blue"]"#).unwrap();
        session
    }

    #[test]
    fn test_render_returns_svg() {
        let mut session = quad_session();
        let svg = session.render().unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r#"fill="rgba(0, 0, 255, 1)""#));
        assert_eq!(session.paths().matches("<path").count(), 1);
    }

    #[test]
    fn test_mismatched_fills_fail() {
        let mut session = quad_session();
        session.set_fills(r#"["blue", "red"]"#).unwrap();
        assert!(matches!(session.render(), Err(Error::FillCountMismatch { .. })));
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let mut session = Session::new();
        assert!(session.set_config(r#"{"field_of_view": 0}"#).is_err());
        assert!(session.set_config("not json").is_err());

        session.set_config(r#"{"stroke": "red", "stroke_width": 3}"#).unwrap();
        assert_eq!(session.config().stroke, "red");
        assert_eq!(session.config().width, 720);
    }

    #[test]
    fn test_flag_setters() {
        let mut session = quad_session();
        session.set_perspective(false);
        session.set_backface_culling(false);
        session.set_lighting(false);
        let flags = session.config().flags;
        assert!(!flags.perspective && !flags.backface_culling && !flags.lighting);
    }

    #[test]
    fn test_mode_switch_uses_preset() {
        let mut session = Session::new();
        session.set_mode(CameraMode::DirectionVector);
        assert_eq!(session.config().camera.mode(), CameraMode::DirectionVector);
        assert_eq!(session.config().clip_policy, ClipPolicy::ProjectionOnly);
    }

    #[test]
    fn test_keys_move_the_camera() {
        let mut session = Session::new();
        assert!(session.key("KeyW"));
        assert!((session.config().camera.position.z - 0.1).abs() < 1e-6);

        assert!(session.key("ArrowRight"));
        match session.config().camera.orientation {
            Orientation::EulerAngles { angles } => assert!((angles.y - 1.0).abs() < 1e-6),
            other => panic!("unexpected orientation {:?}", other),
        }

        assert!(!session.key("Space"));
    }
}
