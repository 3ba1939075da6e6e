/// Geometry primitives: polygons, meshes and face normals
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{normalize, Vec3};

/// Screen-space polygons with less area than this are not drawn
pub const MIN_SCREEN_AREA: f32 = 1e-6;

/// How a face normal is estimated from its vertices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalEstimation {
    /// Edges v1 - v0 and v3 - v0; assumes planar, consistently wound quads.
    /// Triangles fall back to v2 in place of v3.
    #[default]
    QuadCorners,
    /// Newell's method over every edge; handles any planar N-gon
    Newell,
}

/// An ordered, implicitly closed loop of vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec3>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Apply `f` to every vertex, keeping order
    pub fn map<F>(&self, f: F) -> Polygon
    where
        F: FnMut(&Vec3) -> Vec3,
    {
        Polygon::new(self.vertices.iter().map(f).collect())
    }

    /// Normal from the edges leaving vertex 0 towards vertices 1 and 3
    ///
    /// Winding decides the sign. Returns zero for collinear corners.
    pub fn quad_normal(&self) -> Vec3 {
        if self.vertices.len() < 3 {
            return Vec3::zeros();
        }
        let v0 = self.vertices[0];
        let v1 = self.vertices[1];
        let v3 = self.vertices[3.min(self.vertices.len() - 1)];

        let edge1 = v1 - v0;
        let edge2 = v3 - v0;

        normalize(&edge1.cross(&edge2))
    }

    /// Newell's method normal, zero for degenerate loops
    pub fn newell_normal(&self) -> Vec3 {
        normalize(&self.area_vector())
    }

    pub fn normal(&self, estimation: NormalEstimation) -> Vec3 {
        match estimation {
            NormalEstimation::QuadCorners => self.quad_normal(),
            NormalEstimation::Newell => self.newell_normal(),
        }
    }

    /// Twice the vector area of the loop (Newell sum)
    fn area_vector(&self) -> Vec3 {
        let n = self.vertices.len();
        let mut sum = Vec3::zeros();
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % n];
            sum.x += (current.y - next.y) * (current.z + next.z);
            sum.y += (current.z - next.z) * (current.x + next.x);
            sum.z += (current.x - next.x) * (current.y + next.y);
        }
        sum
    }

    /// Signed area of the loop projected onto the XY plane
    pub fn screen_area(&self) -> f32 {
        self.area_vector().z / 2.0
    }

    /// True when the polygon would draw nothing on screen
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.screen_area().abs() < MIN_SCREEN_AREA
    }
}

impl From<Vec<Vec3>> for Polygon {
    fn from(vertices: Vec<Vec3>) -> Self {
        Self::new(vertices)
    }
}

/// A 3D mesh composed of polygonal faces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub faces: Vec<Polygon>,
}

impl Mesh {
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
        }
    }

    pub fn add_face(&mut self, face: Polygon) {
        self.faces.push(face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Check every face has at least three finite vertices
    pub fn validate(&self) -> Result<()> {
        for (face, polygon) in self.faces.iter().enumerate() {
            if polygon.len() < 3 {
                return Err(Error::InvalidMesh {
                    face,
                    reason: format!("expected at least 3 vertices, found {}", polygon.len()),
                });
            }
            if let Some(vertex) = polygon.vertices.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
                return Err(Error::InvalidMesh {
                    face,
                    reason: format!("vertex {} has a non-finite coordinate", vertex),
                });
            }
        }
        Ok(())
    }

    /// Axis-aligned cube of quads with outward-facing quad normals
    ///
    /// Faces are ordered front (-Z), right (+X), back (+Z), left (-X),
    /// top (+Y), bottom (-Y).
    pub fn cube(min: Vec3, size: f32) -> Self {
        let corner = |i: f32, j: f32, k: f32| min + Vec3::new(i, j, k) * size;
        let quad = |a: Vec3, b: Vec3, c: Vec3, d: Vec3| Polygon::new(vec![a, b, c, d]);

        let mut mesh = Self::with_capacity(6);

        // Front face
        mesh.add_face(quad(corner(0.0, 0.0, 0.0), corner(0.0, 1.0, 0.0), corner(1.0, 1.0, 0.0), corner(1.0, 0.0, 0.0)));
        // Right face
        mesh.add_face(quad(corner(1.0, 0.0, 0.0), corner(1.0, 1.0, 0.0), corner(1.0, 1.0, 1.0), corner(1.0, 0.0, 1.0)));
        // Back face
        mesh.add_face(quad(corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0), corner(1.0, 1.0, 1.0), corner(0.0, 1.0, 1.0)));
        // Left face
        mesh.add_face(quad(corner(0.0, 0.0, 0.0), corner(0.0, 0.0, 1.0), corner(0.0, 1.0, 1.0), corner(0.0, 1.0, 0.0)));
        // Top face
        mesh.add_face(quad(corner(0.0, 1.0, 0.0), corner(0.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, 0.0)));
        // Bottom face
        mesh.add_face(quad(corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), corner(1.0, 0.0, 1.0), corner(0.0, 0.0, 1.0)));

        mesh
    }
}

impl From<Vec<Polygon>> for Mesh {
    fn from(faces: Vec<Polygon>) -> Self {
        Self { faces }
    }
}
