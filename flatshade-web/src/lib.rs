/// flatshade Web - WASM bindings for the projection pipeline
///
/// Pages hand over faces, fills and scene settings as JSON, get SVG markup
/// back from `render`, and forward `KeyboardEvent.code` values to `key`.
use flatshade_core::CameraMode;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, EventTarget};

pub mod session;

pub use session::{movement_for_key, Session};

/// Event dispatched by `finish` with the path markup as its detail
pub const MESH_GENERATED: &str = "mesh-generated";

fn to_js(error: flatshade_core::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
#[derive(Default)]
pub struct WebRenderer {
    session: Session,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRenderer {
        WebRenderer::default()
    }

    /// Faces as `[[[x, y, z], ...], ...]`
    pub fn set_faces(&mut self, json: &str) -> Result<(), JsValue> {
        self.session.set_faces(json).map_err(to_js)
    }

    /// Fills as color strings or `[r, g, b]` / `[r, g, b, a]` arrays
    pub fn set_fills(&mut self, json: &str) -> Result<(), JsValue> {
        self.session.set_fills(json).map_err(to_js)
    }

    pub fn set_config(&mut self, json: &str) -> Result<(), JsValue> {
        self.session.set_config(json).map_err(to_js)
    }

    /// `true` selects the direction-vector camera, `false` Euler angles
    pub fn set_direction_mode(&mut self, enabled: bool) {
        let mode = if enabled {
            CameraMode::DirectionVector
        } else {
            CameraMode::EulerAngles
        };
        self.session.set_mode(mode);
    }

    pub fn set_perspective(&mut self, enabled: bool) {
        self.session.set_perspective(enabled);
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.session.set_backface_culling(enabled);
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.session.set_lighting(enabled);
    }

    /// Render and return a standalone SVG document
    pub fn render(&mut self) -> Result<String, JsValue> {
        self.session.render().map_err(to_js)
    }

    /// Returns whether the key moved the camera; call `render` afterwards
    pub fn key(&mut self, code: &str) -> bool {
        self.session.key(code)
    }

    /// Dispatch `mesh-generated` on `target` with the last render's paths
    pub fn finish(&self, target: &EventTarget) -> Result<(), JsValue> {
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&self.session.paths()));
        let event = CustomEvent::new_with_event_init_dict(MESH_GENERATED, &init)?;
        target.dispatch_event(&event)?;
        Ok(())
    }
}
