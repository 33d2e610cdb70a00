//! Vertices and triangles flowing through the pipeline.
//!
//! Triangles are plain values: the renderer copies them out of a mesh,
//! transforms, lights and clips them in place, then drops them.

use crate::math::interpolation::{find_weights_3d, interpolate3};
use crate::math::{Scalar, Vec3};
use crate::transform::Transform;

/// A vertex with position, color (`0..=65535` per channel) and normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, color: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }
}

/// Three vertices, clockwise as seen from the side the face is visible from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Triangle whose vertices all carry the face normal.
    pub fn new(positions: [Vec3; 3], colors: [Vec3; 3]) -> Self {
        let normal = face_normal(positions[0], positions[1], positions[2]);
        Self::with_normals(positions, colors, [normal; 3])
    }

    pub fn with_normals(positions: [Vec3; 3], colors: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        Self {
            vertices: [
                Vertex::new(positions[0], colors[0], normals[0]),
                Vertex::new(positions[1], colors[1], normals[1]),
                Vertex::new(positions[2], colors[2], normals[2]),
            ],
        }
    }

    pub const fn from_vertices(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.vertices.map(|v| v.position)
    }

    /// Moves positions as points and normals as vectors.
    pub fn apply_transform(&mut self, transform: &Transform) {
        for vertex in &mut self.vertices {
            vertex.position = transform.apply_to_point(vertex.position);
            vertex.normal = transform.apply_to_vector(vertex.normal);
        }
    }

    /// Normal of the surface spanned by the positions, ignoring vertex normals.
    pub fn surface_normal(&self) -> Vec3 {
        let [a, b, c] = self.positions();
        face_normal(a, b, c)
    }

    pub fn average_z(&self) -> Scalar {
        self.vertices.iter().map(|v| v.position.z).sum::<Scalar>() / 3.0
    }

    pub fn closest_z(&self) -> Scalar {
        self.vertices
            .iter()
            .map(|v| v.position.z)
            .fold(Scalar::INFINITY, Scalar::min)
    }

    /// Barycentric weights of `target` against the positions.
    pub fn find_weights(&self, target: Vec3) -> [Scalar; 3] {
        let [a, b, c] = self.positions();
        find_weights_3d(a, b, c, target)
    }

    /// Vertex with every attribute interpolated by `weights`.
    pub fn interpolate_vertex(&self, weights: [Scalar; 3]) -> Vertex {
        let [a, b, c] = &self.vertices;
        Vertex::new(
            interpolate3(a.position, b.position, c.position, weights),
            interpolate3(a.color, b.color, c.color, weights),
            interpolate3(a.normal, b.normal, c.normal, weights),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.position.is_finite())
    }
}

fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quaternion;
    use approx::assert_relative_eq;

    fn sample() -> Triangle {
        Triangle::new(
            [
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(2.0, 3.0, 0.0),
                Vec3::new(4.0, 1.0, 0.0),
            ],
            [Vec3::ZERO; 3],
        )
    }

    #[test]
    fn test_clockwise_triangle_faces_back() {
        let t = sample();
        assert_relative_eq!(t.surface_normal(), Vec3::BACK);
        assert_relative_eq!(t.vertices[1].normal, Vec3::BACK);
    }

    #[test]
    fn test_apply_transform_half_turn() {
        let mut t = sample();
        let transform = Transform::from_rotation(Quaternion::from_euler(180.0, 0.0, 0.0));
        t.apply_transform(&transform);

        assert_relative_eq!(t.vertices[0].position, Vec3::new(-1.0, 1.0, 0.0));
        assert_relative_eq!(t.vertices[1].position, Vec3::new(-2.0, 3.0, 0.0));
        assert_relative_eq!(t.vertices[2].position, Vec3::new(-4.0, 1.0, 0.0));
        assert_relative_eq!(t.vertices[0].normal, Vec3::FORWARD);
    }

    #[test]
    fn test_interpolate_vertex_at_weights() {
        let mut t = sample();
        t.vertices[0].color = Vec3::new(65535.0, 0.0, 0.0);
        t.vertices[2].color = Vec3::new(0.0, 0.0, 65535.0);
        let v = t.interpolate_vertex([0.5, 0.0, 0.5]);
        assert_relative_eq!(v.position, Vec3::new(2.5, 1.0, 0.0));
        assert_relative_eq!(v.color, Vec3::new(32767.5, 0.0, 32767.5));
    }

    #[test]
    fn test_find_weights_recovers_centroid() {
        let t = sample();
        let centroid = (t.vertices[0].position + t.vertices[1].position + t.vertices[2].position) / 3.0;
        let w = t.find_weights(centroid);
        for weight in w {
            assert_relative_eq!(weight, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_depth_helpers() {
        let mut t = sample();
        t.vertices[0].position.z = 3.0;
        t.vertices[1].position.z = 1.0;
        t.vertices[2].position.z = 2.0;
        assert_eq!(t.closest_z(), 1.0);
        assert_relative_eq!(t.average_z(), 2.0);
    }

    #[test]
    fn test_is_finite() {
        let mut t = sample();
        assert!(t.is_finite());
        t.vertices[2].position.x = Scalar::NAN;
        assert!(!t.is_finite());
    }
}
