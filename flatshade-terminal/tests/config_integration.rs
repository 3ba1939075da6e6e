//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;

use flatshade_core::{CameraMode, ClipPolicy, Orientation};
use flatshade_terminal::{load_assets, AppConfig, TerminalApp};
use serial_test::serial;

#[test]
#[serial]
fn test_default_toml_matches_defaults() {
    std::env::remove_var("FLATSHADE_SCENE__WIDTH");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.width, 720);
    assert_eq!(config.scene.clip_policy, ClipPolicy::PlaneExact);
    assert_eq!(config.scene.camera.mode(), CameraMode::EulerAngles);
    assert_eq!(config.scene.rotation.y, 45.0);
    assert!(config.scene.flags.lighting);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("FLATSHADE_SCENE__WIDTH", "640");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.width, 640);
    std::env::remove_var("FLATSHADE_SCENE__WIDTH");
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[scene]\nfield_of_view = 90.0\n\n[export]\npath = \"a.svg\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("user.toml"),
        "[scene]\nfield_of_view = 60.0\nclip_policy = \"projection_only\"\n\n[scene.camera]\nposition = [0.0, 0.0, -1.0]\n\n[scene.camera.orientation]\nmode = \"direction_vector\"\ndirection = [0.0, 0.0, 1.0]\n",
    )
    .unwrap();

    let config = AppConfig::load_from(dir.path()).unwrap();
    assert_eq!(config.scene.field_of_view, 60.0);
    assert_eq!(config.scene.clip_policy, ClipPolicy::ProjectionOnly);
    assert_eq!(config.export.path.to_str(), Some("a.svg"));
    assert!(matches!(config.scene.camera.orientation, Orientation::DirectionVector { .. }));
    assert_eq!(config.scene.camera.position.z, -1.0);
}

#[test]
#[serial]
fn test_bad_value_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("default.toml"), "[scene]\nwidth = \"wide\"\n").unwrap();

    let err = AppConfig::load_from(dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_assets_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let faces = dir.path().join("faces.json");
    let fills = dir.path().join("fills.json");
    fs::write(&faces, "[[[-0.5, -0.5, 0], [-0.5, 0.5, 0], [0.5, 0.5, 0], [0.5, -0.5, 0]]]").unwrap();
    fs::write(&fills, r#"["rgb(200, 100, 50)"]"#).unwrap();

    let mut config = AppConfig::load_from(dir.path()).unwrap();
    config.assets.faces = Some(faces);
    config.assets.fills = Some(fills);
    config.export.path = dir.path().join("out.svg");

    let (mesh, loaded) = load_assets(&config).unwrap();
    assert_eq!((mesh.len(), loaded.len()), (1, 1));

    let app = TerminalApp::new(config, mesh, loaded);
    assert_eq!(app.output().len(), 1);

    let path = app.export().unwrap();
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"fill="rgba(200, 100, 50, 1)""#));
}

#[test]
#[serial]
fn test_missing_asset_names_the_file() {
    let mut config = AppConfig::default();
    config.assets.faces = Some("does/not/exist.json".into());
    let err = load_assets(&config).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
