/// Half-space polygon clipping (Sutherland-Hodgman, one plane at a time)
use crate::geometry::Polygon;
use crate::math::{normalize, Vec3};

/// A plane through `point`; the kept half-space lies on the side `normal` points to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Normalizes `normal`
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normalize(&normal),
        }
    }

    pub fn signed_distance(&self, p: &Vec3) -> f32 {
        self.normal.dot(&(p - self.point))
    }
}

/// Clip `polygon` to the half-space where `plane.signed_distance >= 0`
///
/// The result keeps traversal order and may hold anywhere from 0 to 2N
/// vertices; callers drop results too small to draw.
pub fn clip(polygon: &Polygon, plane: &Plane) -> Polygon {
    let vertices = &polygon.vertices;
    let (first, last) = match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Polygon::default(),
    };

    let first_distance = plane.signed_distance(first);
    let mut emitted = Vec::with_capacity(vertices.len() * 2);

    // A zero seed means vertex 0 never yields an intersection here;
    // the closing edge is handled after the loop.
    let mut previous_distance = 0.0;
    let mut previous = first;

    for current in vertices {
        let current_distance = plane.signed_distance(current);
        if current_distance * previous_distance < 0.0 {
            let t = previous_distance / (previous_distance - current_distance);
            emitted.push(previous + (current - previous) * t);
        }
        if current_distance >= 0.0 {
            emitted.push(*current);
        }
        previous_distance = current_distance;
        previous = current;
    }

    if previous_distance * first_distance < 0.0 {
        let t = previous_distance / (previous_distance - first_distance);
        emitted.push(last + (first - last) * t);
    }

    Polygon::new(emitted)
}

/// Clip against each plane in turn, giving up as soon as nothing is left
pub fn clip_sequence(polygon: &Polygon, planes: &[Plane]) -> Polygon {
    let mut clipped = polygon.clone();
    for plane in planes {
        clipped = clip(&clipped, plane);
        if clipped.is_empty() {
            break;
        }
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ])
    }

    fn x_positive() -> Plane {
        Plane::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let plane = Plane::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(plane.normal, Vec3::z());
        assert_eq!(plane.signed_distance(&Vec3::new(3.0, 3.0, 2.0)), 2.0);
    }

    #[test]
    fn test_inside_polygon_is_unchanged() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::z());
        assert_eq!(clip(&square(), &plane), square());
    }

    #[test]
    fn test_outside_polygon_is_removed() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::z());
        assert!(clip(&square(), &plane).is_empty());
    }

    #[test]
    fn test_touching_vertices_are_kept() {
        let plane = Plane::new(Vec3::new(1.0, 0.0, 0.0), Vec3::x());
        let clipped = clip(&square(), &plane);
        assert_eq!(
            clipped.vertices,
            vec![Vec3::new(1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]
        );
        assert!(clipped.is_degenerate());
    }

    #[test]
    fn test_half_clip() {
        let clipped = clip(&square(), &x_positive());
        assert_eq!(
            clipped.vertices,
            vec![
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_closing_edge_intersection_comes_last() {
        let polygon = Polygon::new(vec![
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]);
        let clipped = clip(&polygon, &x_positive());
        assert_eq!(
            clipped.vertices,
            vec![
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_clip_is_idempotent() {
        let plane = x_positive();
        let once = clip(&square(), &plane);
        let twice = clip(&once, &plane);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_corner_cut_adds_a_vertex() {
        // Keep x + y <= 1: cuts the (1, 1) corner off
        let plane = Plane::new(Vec3::new(0.5, 0.5, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        let clipped = clip(&square(), &plane);
        assert_eq!(clipped.len(), 5);
        assert!((clipped.screen_area().abs() - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_empty_polygon() {
        assert!(clip(&Polygon::default(), &x_positive()).is_empty());
    }

    #[test]
    fn test_degenerate_quad_clips_to_nothing_drawable() {
        let degenerate = Polygon::new(vec![
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]);
        let plane = Plane::new(Vec3::new(0.5, 0.0, 0.0), Vec3::x());
        let clipped = clip(&degenerate, &plane);
        assert!(clipped.vertices.iter().all(|v| v.x >= 0.5 && v.y == 0.0));
        assert!(clipped.is_degenerate());
    }

    #[test]
    fn test_clip_sequence_stops_when_empty() {
        let planes = [
            Plane::new(Vec3::new(5.0, 0.0, 0.0), Vec3::x()),
            Plane::new(Vec3::zeros(), Vec3::new(-1.0, 0.0, 0.0)),
        ];
        assert!(clip_sequence(&square(), &planes).is_empty());
    }
}
