//! Viewer configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FLATSHADE_SECTION__KEY`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use flatshade_core::SceneConfig;
use serde::{Deserialize, Serialize};

/// Main viewer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scene handed to the pipeline on every render
    #[serde(default)]
    pub scene: SceneConfig,
    /// Face and fill sources
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // FLATSHADE_SCENE__WIDTH=640 -> scene.width = 640
        figment = figment.merge(Env::prefixed("FLATSHADE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Where faces and fills come from
///
/// Both are JSON files in the formats `flatshade_core::input` accepts. Without
/// a faces file the viewer shows a unit cube; without a fills file faces cycle
/// through a built-in palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<PathBuf>,
}

/// SVG export target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("flatshade.svg"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Height of a terminal cell relative to its width
    pub cell_aspect: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { cell_aspect: 2.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Show the key help and face count on the last row
    pub show_status: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { show_status: true }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scene.width, 720);
        assert_eq!(config.export.path, PathBuf::from("flatshade.svg"));
        assert!(config.assets.faces.is_none());
        assert!(config.controls.show_status);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("field_of_view"));
        assert!(toml.contains("cell_aspect"));
        assert!(!toml.contains("faces"));
    }
}
