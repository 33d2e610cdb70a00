//! Indexed triangle meshes.
//!
//! A [`Mesh`] is immutable once built. The renderer pulls triangles out of it
//! with [`Mesh::triangles`], choosing per instance whether to keep the stored
//! vertex normals or to recompute flat face normals.

use std::io::BufRead;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::math::{Scalar, Vec3};
use crate::triangle::Triangle;

/// Errors raised while building or loading a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to load OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("index count {0} is not a multiple of three")]
    NotTriangulated(usize),
}

/// Per-vertex data stored in a mesh. Colors use the `0..=65535` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexAttributes {
    pub position: Vec3,
    pub color: Vec3,
    pub normal: Vec3,
}

impl VertexAttributes {
    pub const fn new(position: Vec3, color: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }
}

/// Which normals a triangle iterator hands out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalSource {
    /// Normals stored on the mesh vertices.
    #[default]
    Mesh,
    /// Flat normal recomputed from each face's positions.
    Face,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<VertexAttributes>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Builds a mesh, checking every face index against the vertex list.
    pub fn new(vertices: Vec<VertexAttributes>, faces: Vec<[usize; 3]>) -> Result<Self, MeshError> {
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Loads every object of an OBJ file into a single mesh painted with
    /// `color`.
    ///
    /// OBJ data is right-handed with counter-clockwise faces, so Z is mirrored
    /// and every face reversed on the way in. Missing normals are averaged
    /// from the adjacent faces.
    pub fn from_obj<P: AsRef<Path>>(path: P, color: Vec3) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let mesh = Self::from_models(&models, color)?;
        debug!(
            "loaded {} ({} vertices, {} faces)",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Like [`Mesh::from_obj`], reading OBJ text from `reader`. Material
    /// libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R, color: Vec3) -> Result<Self, MeshError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models, color)
    }

    fn from_models(models: &[tobj::Model], color: Vec3) -> Result<Self, MeshError> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            if mesh.indices.len() % 3 != 0 {
                return Err(MeshError::NotTriangulated(mesh.indices.len()));
            }
            let offset = vertices.len();
            let has_normals = mesh.normals.len() == mesh.positions.len();

            for (i, p) in mesh.positions.chunks_exact(3).enumerate() {
                let normal = if has_normals {
                    let n = &mesh.normals[i * 3..i * 3 + 3];
                    Vec3::new(n[0] as Scalar, n[1] as Scalar, -(n[2] as Scalar))
                } else {
                    Vec3::ZERO
                };
                vertices.push(VertexAttributes::new(
                    Vec3::new(p[0] as Scalar, p[1] as Scalar, -(p[2] as Scalar)),
                    color,
                    normal,
                ));
            }

            let first_face = faces.len();
            faces.extend(mesh.indices.chunks_exact(3).map(|f| {
                [
                    offset + f[0] as usize,
                    offset + f[2] as usize,
                    offset + f[1] as usize,
                ]
            }));

            if !has_normals {
                average_face_normals(&mut vertices, &faces[first_face..]);
            }
        }

        Self::new(vertices, faces)
    }

    /// Axis-aligned cube centred on the origin with one flat-shaded quad per
    /// side.
    pub fn cube(size: Scalar, color: Vec3) -> Self {
        // (outward normal, right, up) as seen from outside the face
        const SIDES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::BACK, Vec3::RIGHT, Vec3::UP),
            (Vec3::FORWARD, Vec3::LEFT, Vec3::UP),
            (Vec3::RIGHT, Vec3::FORWARD, Vec3::UP),
            (Vec3::LEFT, Vec3::BACK, Vec3::UP),
            (Vec3::UP, Vec3::RIGHT, Vec3::FORWARD),
            (Vec3::DOWN, Vec3::RIGHT, Vec3::BACK),
        ];
        let half = size / 2.0;
        let mut vertices = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);

        for (normal, right, up) in SIDES {
            push_quad(
                &mut vertices,
                &mut faces,
                normal * half,
                right * half,
                up * half,
                normal,
                color,
            );
        }

        Self { vertices, faces }
    }

    /// Square of side `size` in the XY plane, facing [`Vec3::BACK`].
    pub fn quad(size: Scalar, color: Vec3) -> Self {
        let half = size / 2.0;
        let mut vertices = Vec::with_capacity(4);
        let mut faces = Vec::with_capacity(2);
        push_quad(
            &mut vertices,
            &mut faces,
            Vec3::ZERO,
            Vec3::RIGHT * half,
            Vec3::UP * half,
            Vec3::BACK,
            color,
        );
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[VertexAttributes] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// A fresh pass over every face of the mesh.
    pub fn triangles(&self, normals: NormalSource) -> Triangles<'_> {
        Triangles {
            mesh: self,
            normals,
            index: 0,
        }
    }

    fn triangle(&self, face: [usize; 3], normals: NormalSource) -> Triangle {
        let [a, b, c] = face.map(|i| self.vertices[i]);
        let positions = [a.position, b.position, c.position];
        let colors = [a.color, b.color, c.color];
        match normals {
            NormalSource::Mesh => {
                Triangle::with_normals(positions, colors, [a.normal, b.normal, c.normal])
            }
            NormalSource::Face => Triangle::new(positions, colors),
        }
    }
}

/// Iterator over the triangles of a [`Mesh`].
#[derive(Clone, Debug)]
pub struct Triangles<'a> {
    mesh: &'a Mesh,
    normals: NormalSource,
    index: usize,
}

impl Iterator for Triangles<'_> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        let face = *self.mesh.faces.get(self.index)?;
        self.index += 1;
        Some(self.mesh.triangle(face, self.normals))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mesh.faces.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Clockwise quad `center ± right ± up` split into two triangles.
fn push_quad(
    vertices: &mut Vec<VertexAttributes>,
    faces: &mut Vec<[usize; 3]>,
    center: Vec3,
    right: Vec3,
    up: Vec3,
    normal: Vec3,
    color: Vec3,
) {
    let base = vertices.len();
    let corners = [
        center - right + up,
        center + right + up,
        center + right - up,
        center - right - up,
    ];
    vertices.extend(
        corners
            .iter()
            .map(|&p| VertexAttributes::new(p, color, normal)),
    );
    faces.push([base, base + 1, base + 2]);
    faces.push([base + 2, base + 3, base]);
}

fn average_face_normals(vertices: &mut [VertexAttributes], faces: &[[usize; 3]]) {
    for face in faces {
        let [a, b, c] = face.map(|i| vertices[i].position);
        // unnormalized, so larger faces weigh more
        let n = (b - a).cross(c - a);
        for &i in face {
            vertices[i].normal += n;
        }
    }
    for face in faces {
        for &i in face {
            let n = vertices[i].normal;
            vertices[i].normal = n.try_normalize().unwrap_or(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const WHITE: Vec3 = Vec3::new(65535.0, 65535.0, 65535.0);

    #[test]
    fn test_new_rejects_bad_index() {
        let v = VertexAttributes::new(Vec3::ZERO, WHITE, Vec3::BACK);
        let err = Mesh::new(vec![v; 3], vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_triangles_is_restartable_and_exact() {
        let mesh = Mesh::cube(2.0, WHITE);
        let first = mesh.triangles(NormalSource::Mesh);
        assert_eq!(first.len(), 12);
        assert_eq!(first.count(), 12);
        assert_eq!(mesh.triangles(NormalSource::Face).count(), 12);
    }

    #[test]
    fn test_cube_faces_point_outwards() {
        let mesh = Mesh::cube(2.0, WHITE);
        for t in mesh.triangles(NormalSource::Mesh) {
            let centroid = (t.vertices[0].position + t.vertices[1].position + t.vertices[2].position) / 3.0;
            // face normal from clockwise winding must agree with the stored one
            assert_relative_eq!(t.surface_normal(), t.vertices[0].normal);
            assert!(t.surface_normal().dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_quad_faces_back() {
        let mesh = Mesh::quad(1.0, WHITE);
        assert_eq!(mesh.face_count(), 2);
        for t in mesh.triangles(NormalSource::Face) {
            assert_relative_eq!(t.surface_normal(), Vec3::BACK);
        }
    }

    #[test]
    fn test_face_normals_override_mesh_normals() {
        let vertices = vec![
            VertexAttributes::new(Vec3::new(0.0, 1.0, 0.0), WHITE, Vec3::UP),
            VertexAttributes::new(Vec3::new(1.0, 0.0, 0.0), WHITE, Vec3::UP),
            VertexAttributes::new(Vec3::new(0.0, 0.0, 0.0), WHITE, Vec3::UP),
        ];
        let mesh = Mesh::new(vertices, vec![[0, 1, 2]]).unwrap();
        let stored = mesh.triangles(NormalSource::Mesh).next().unwrap();
        let flat = mesh.triangles(NormalSource::Face).next().unwrap();
        assert_eq!(stored.vertices[0].normal, Vec3::UP);
        assert_relative_eq!(flat.vertices[0].normal, Vec3::BACK);
    }

    #[test]
    fn test_from_obj_reader_mirrors_z_and_computes_normals() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = Mesh::from_obj_reader(&mut Cursor::new(obj), WHITE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);

        // counter-clockwise facing +Z in the file, clockwise facing -Z here
        let t = mesh.triangles(NormalSource::Mesh).next().unwrap();
        assert_relative_eq!(t.surface_normal(), Vec3::BACK);
        assert_relative_eq!(t.vertices[0].normal, Vec3::BACK);
        assert_eq!(t.vertices[0].color, WHITE);
    }

    #[test]
    fn test_from_obj_reader_splits_quads() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n";
        let mesh = Mesh::from_obj_reader(&mut Cursor::new(obj), WHITE).unwrap();
        assert_eq!(mesh.face_count(), 2);
        for v in mesh.vertices() {
            assert_relative_eq!(v.normal, Vec3::BACK);
        }
    }

    #[test]
    fn test_from_obj_missing_file() {
        let err = Mesh::from_obj("does/not/exist.obj", WHITE).unwrap_err();
        assert!(matches!(err, MeshError::Obj(_)));
    }
}
