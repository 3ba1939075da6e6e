//! End-to-end scenarios for the render pipeline
//!
//! These drive `render` the way a front end does: parse faces and fills,
//! build a scene configuration, render, and inspect the polygons and colors.

use flatshade_core::clip::{clip, Plane};
use flatshade_core::input::{parse_fills, parse_mesh};
use flatshade_core::projection::{Projection, ProjectionMode, Viewport};
use flatshade_core::{render, Color, Fill, Mesh, Polygon, SceneConfig, Vec3};

fn six_fills() -> Vec<Fill> {
    parse_fills(r#"["red", "green", "blue", "magenta", "yellow", "cyan"]"#).unwrap()
}

fn resolved(fill: &Fill) -> Color {
    fill.resolve()
}

#[test]
fn test_cube_corner_shows_three_faces() {
    // Offset so the front, left and bottom faces all point back at the camera
    let mesh = Mesh::cube(Vec3::new(0.5, 0.5, -0.5), 1.0);
    let fills = six_fills();
    let config = SceneConfig::default();

    let output = render(&mesh, &fills, &config).unwrap();

    assert_eq!(output.polygons.len(), 3);
    assert_eq!(output.colors.len(), 3);

    // Front faces the light head on; left and bottom are edge-on to it
    assert_eq!(output.colors[0], resolved(&fills[0]));
    let black = Color { r: 0, g: 0, b: 0, a: 1.0 };
    assert_eq!(output.colors[1], black);
    assert_eq!(output.colors[2], black);

    for polygon in &output.polygons {
        assert!(polygon.len() >= 3);
        for v in &polygon.vertices {
            assert!((0.0..=720.0).contains(&v.x), "x out of bounds: {:?}", v);
            assert!((0.0..=720.0).contains(&v.y), "y out of bounds: {:?}", v);
        }
    }
}

#[test]
fn test_cube_intensities_stay_in_unit_range() {
    let mesh = Mesh::cube(Vec3::new(-0.5, -0.5, -0.5), 1.0);
    let fills = vec![Fill::rgb(255.0, 255.0, 255.0); 6];
    let mut config = SceneConfig::default();
    config.rotation = Vec3::new(25.0, 40.0, 0.0);

    let output = render(&mesh, &fills, &config).unwrap();

    assert!(!output.is_empty());
    for color in &output.colors {
        // White scaled by an intensity in [0, 1] stays gray
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
    }
}

#[test]
fn test_backface_culling_keeps_facing_side() {
    let mesh = Mesh::cube(Vec3::new(-0.5, -0.5, -0.5), 1.0);
    let fills = six_fills();
    let mut config = SceneConfig::default();
    config.flags.lighting = false;

    let output = render(&mesh, &fills, &config).unwrap();

    // Front (index 0) points at the camera, back (index 2) away from it
    assert!(output.colors.contains(&resolved(&fills[0])));
    assert!(!output.colors.contains(&resolved(&fills[2])));
}

#[test]
fn test_culling_disabled_keeps_every_face() {
    let mesh = Mesh::cube(Vec3::new(-0.5, -0.5, -0.5), 1.0);
    let fills = six_fills();
    let mut config = SceneConfig::default();
    config.flags.backface_culling = false;

    let output = render(&mesh, &fills, &config).unwrap();

    // Unculled faces keep their base fill
    assert_eq!(output.len(), 6);
    assert!(output.colors.contains(&resolved(&fills[0])));
    assert!(output.colors.contains(&resolved(&fills[2])));
}

#[test]
fn test_perspective_foreshortening() {
    let z_near = 0.1;
    let projection = Projection::new(ProjectionMode::Perspective, 720.0, 720.0, 90.0, z_near, 1000.0);
    let matrix = projection.matrix();
    let viewport = Viewport::new(720, 720);
    let (cx, cy) = viewport.center();

    let distance_from_center = |z: f32| {
        let ndc = projection.project(&matrix, &Vec3::new(0.05, 0.03, z)).unwrap();
        let screen = viewport.to_screen(&ndc);
        ((screen.x - cx).powi(2) + (screen.y - cy).powi(2)).sqrt()
    };

    assert!(distance_from_center(2.0 * z_near) < distance_from_center(z_near));
}

#[test]
fn test_flat_quad_is_symmetric_about_center() {
    let mesh = parse_mesh("[[[-0.5, -0.5, 0], [-0.5, 0.5, 0], [0.5, 0.5, 0], [0.5, -0.5, 0]]]").unwrap();
    let mut config = SceneConfig::default();
    config.flags.perspective = false;
    config.flags.backface_culling = false;
    config.flags.lighting = false;

    let output = render(&mesh, &[Fill::rgb(0.0, 0.0, 0.0)], &config).unwrap();

    assert_eq!(output.len(), 1);
    let vertices = &output.polygons[0].vertices;
    assert_eq!(vertices.len(), 4);
    for v in vertices {
        let mirrored = vertices
            .iter()
            .any(|m| (m.x - (720.0 - v.x)).abs() < 1e-3 && (m.y - (720.0 - v.y)).abs() < 1e-3);
        assert!(mirrored, "{:?} has no mirror image", v);
    }
}

#[test]
fn test_degenerate_quad_is_not_drawn() {
    // Three collinear points plus a duplicate, crossing the near plane
    let degenerate = Polygon::new(vec![
        Vec3::new(-1.0, 0.0, -5.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 5.0),
        Vec3::new(1.0, 0.0, 5.0),
    ]);
    let near = Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::z());
    assert!(clip(&degenerate, &near).is_degenerate());

    let visible = Polygon::new(vec![
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
    ]);
    let mesh = Mesh::from(vec![degenerate, visible]);
    let fills = [Fill::rgb(255.0, 0.0, 0.0), Fill::rgb(0.0, 0.0, 255.0)];
    let mut config = SceneConfig::default();
    config.flags.backface_culling = false;

    let output = render(&mesh, &fills, &config).unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output.colors[0], resolved(&fills[1]));
}

#[test]
fn test_json_config_drives_render() {
    let config: SceneConfig = serde_json::from_str(
        r##"{
            "rotation": [30, 45, 0],
            "camera": {"position": [0, 0, -1], "orientation": {"mode": "euler_angles", "angles": [0, 0, 0]}},
            "flags": {"perspective": true, "backface_culling": true, "lighting": true},
            "stroke": "#333",
            "stroke_width": 2
        }"##,
    )
    .unwrap();
    assert_eq!(config.stroke_width, 2.0);

    let mesh = Mesh::cube(Vec3::new(-0.5, -0.5, -0.5), 1.0);
    let output = render(&mesh, &six_fills(), &config).unwrap();
    assert!(!output.is_empty());
    assert!(output.len() <= 3);
}
