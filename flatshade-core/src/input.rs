//! JSON ingestion for meshes and fills
//!
//! Faces arrive as `[[[x, y, z], ...], ...]`. Fills arrive as an array whose
//! entries are either color strings (`"red"`, `"#ff0000"`, `"rgb(255, 0, 0)"`)
//! or 3/4-number arrays; a `null` fourth entry means opaque. Everything is
//! checked here so the pipeline never sees malformed geometry.

use serde_json::Value;

use crate::color::{parse_color, Fill};
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Polygon};
use crate::math::Vec3;

/// Parse and validate a mesh from JSON text
pub fn parse_mesh(json: &str) -> Result<Mesh> {
    let value: Value = serde_json::from_str(json)?;
    mesh_from_value(&value)
}

/// Parse and validate fills from JSON text
pub fn parse_fills(json: &str) -> Result<Vec<Fill>> {
    let value: Value = serde_json::from_str(json)?;
    fills_from_value(&value)
}

pub fn mesh_from_value(value: &Value) -> Result<Mesh> {
    let faces = value.as_array().ok_or_else(|| Error::InvalidMesh {
        face: 0,
        reason: format!("expected an array of faces, found {}", kind(value)),
    })?;

    let mut mesh = Mesh::with_capacity(faces.len());
    for (face, entry) in faces.iter().enumerate() {
        mesh.add_face(face_from_value(face, entry)?);
    }
    Ok(mesh)
}

fn face_from_value(face: usize, value: &Value) -> Result<Polygon> {
    let invalid = |reason: String| Error::InvalidMesh { face, reason };

    let vertices = value
        .as_array()
        .ok_or_else(|| invalid(format!("expected an array of vertices, found {}", kind(value))))?;
    if vertices.len() < 3 {
        return Err(invalid(format!("expected at least 3 vertices, found {}", vertices.len())));
    }

    let mut polygon = Vec::with_capacity(vertices.len());
    for (index, vertex) in vertices.iter().enumerate() {
        let coordinates = numbers(vertex).map_err(|reason| invalid(format!("vertex {}: {}", index, reason)))?;
        match coordinates[..] {
            [Some(x), Some(y), Some(z)] => polygon.push(Vec3::new(x, y, z)),
            [_, _, _] => return Err(invalid(format!("vertex {}: coordinates must be numbers", index))),
            _ => {
                return Err(invalid(format!(
                    "vertex {}: expected 3 coordinates, found {}",
                    index,
                    coordinates.len()
                )))
            }
        }
    }
    Ok(Polygon::new(polygon))
}

pub fn fills_from_value(value: &Value) -> Result<Vec<Fill>> {
    let entries = value.as_array().ok_or_else(|| Error::InvalidFill {
        index: 0,
        reason: format!("expected an array of fills, found {}", kind(value)),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| fill_from_value(index, entry))
        .collect()
}

fn fill_from_value(index: usize, value: &Value) -> Result<Fill> {
    let invalid = |reason: String| Error::InvalidFill { index, reason };

    if let Value::String(text) = value {
        return parse_color(text).map_err(|e| invalid(e.to_string()));
    }

    let channels = numbers(value).map_err(invalid)?;
    let fill = match channels[..] {
        [Some(r), Some(g), Some(b)] => Fill::rgb(r, g, b),
        [Some(r), Some(g), Some(b), Some(a)] => Fill::rgba(r, g, b, a),
        [Some(r), Some(g), Some(b), None] => Fill::rgb(r, g, b),
        [_, _, _] | [_, _, _, _] => return Err(invalid("color channels must be numbers".to_string())),
        _ => {
            return Err(invalid(format!(
                "expected 3 or 4 channels, found {}",
                channels.len()
            )))
        }
    };

    for (name, channel) in [("red", fill.r), ("green", fill.g), ("blue", fill.b)] {
        if !(0.0..=255.0).contains(&channel) {
            return Err(invalid(format!("{} channel {} is outside 0-255", name, channel)));
        }
    }
    if let Some(alpha) = fill.alpha {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid(format!("alpha {} is outside 0-1", alpha)));
        }
    }
    Ok(fill)
}

/// Read an array of JSON values as optional numbers; `None` marks `null`
fn numbers(value: &Value) -> std::result::Result<Vec<Option<f32>>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("expected an array, found {}", kind(value)))?;

    items
        .iter()
        .map(|item| match item {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(|v| Some(v as f32))
                .filter(|v| v.map_or(true, f32::is_finite))
                .ok_or_else(|| format!("{} is out of range", n)),
            other => Err(format!("expected a number, found {}", kind(other))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
