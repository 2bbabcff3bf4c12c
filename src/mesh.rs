//! Triangle meshes: the built-in cube and OBJ loading.

use std::io::BufRead;
use std::path::Path;

use crate::error::LoadError;
use crate::math::{Vec2, Vec3};
use crate::triangle::Face;

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

// (a, b, c) are 1-based indices into CUBE_VERTICES, clockwise from outside.
const CUBE_INDICES: [[usize; 3]; 12] = [
    // Front
    [1, 2, 3],
    [1, 3, 4],
    // Right
    [4, 3, 5],
    [4, 5, 6],
    // Back
    [6, 5, 7],
    [6, 7, 8],
    // Left
    [8, 7, 2],
    [8, 2, 1],
    // Top
    [2, 7, 5],
    [2, 5, 3],
    // Bottom
    [6, 8, 1],
    [6, 1, 4],
];

// Every cube side maps the whole texture; the two halves share the diagonal.
const CUBE_UVS: [[Vec2; 3]; 2] = [
    [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
    [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
];

/// A list of model-space faces with resolved positions and UVs.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    name: String,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            faces,
        }
    }

    /// The 12-triangle cube spanning `[-1, 1]` on every axis.
    pub fn cube() -> Self {
        let faces = CUBE_INDICES
            .iter()
            .enumerate()
            .map(|(i, [a, b, c])| {
                Face::new(
                    [
                        CUBE_VERTICES[a - 1],
                        CUBE_VERTICES[b - 1],
                        CUBE_VERTICES[c - 1],
                    ],
                    CUBE_UVS[i % 2],
                )
            })
            .collect();
        Self::new("cube", faces)
    }

    /// Loads every object of an OBJ file into a single mesh.
    ///
    /// Polygons are triangulated; corners without a UV get `(0, 0)`.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mesh = Self::new(name, faces_from_models(&models));
        log::debug!(
            "loaded mesh '{}' from {} ({} faces)",
            mesh.name,
            path.display(),
            mesh.face_count()
        );
        mesh.non_empty()
    }

    /// Same as [`Mesh::from_obj`] but reads OBJ text from any buffered reader.
    /// Material libraries are not followed.
    pub fn from_obj_reader<R: BufRead>(
        name: impl Into<String>,
        reader: &mut R,
    ) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::new(name, faces_from_models(&models)).non_empty()
    }

    fn non_empty(self) -> Result<Self, LoadError> {
        if self.faces.is_empty() {
            Err(LoadError::EmptyMesh)
        } else {
            Ok(self)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn faces_from_models(models: &[tobj::Model]) -> Vec<Face> {
    let mut faces = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let position = |index: u32| {
            let i = index as usize * 3;
            Vec3::new(mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2])
        };
        let texcoord = |index: u32| {
            let i = index as usize * 2;
            match mesh.texcoords.get(i..i + 2) {
                Some(uv) => Vec2::new(uv[0], uv[1]),
                None => Vec2::ZERO,
            }
        };

        for corner in mesh.indices.chunks_exact(3) {
            faces.push(Face::new(
                [position(corner[0]), position(corner[1]), position(corner[2])],
                [texcoord(corner[0]), texcoord(corner[1]), texcoord(corner[2])],
            ));
        }
    }

    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::face_normal;
    use std::io::Cursor;

    #[test]
    fn cube_has_twelve_outward_faces() {
        let cube = Mesh::cube();
        assert_eq!(cube.face_count(), 12);

        // Clockwise from outside in a left-handed system means the
        // (v1 - v0) x (v2 - v0) normal points away from the center.
        for face in cube.faces() {
            let centroid = (face.points[0] + face.points[1] + face.points[2]) / 3.0;
            assert!(face_normal(&face.points).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn obj_quad_is_triangulated_with_uvs() {
        let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";
        let mesh = Mesh::from_obj_reader("quad", &mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.name(), "quad");
        assert_eq!(mesh.face_count(), 2);

        let first = mesh.faces()[0];
        assert_eq!(first.points[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(first.points[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(first.points[2], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(first.texcoords[2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn obj_without_uvs_defaults_to_zero() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = Mesh::from_obj_reader("tri", &mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.faces()[0].texcoords, [Vec2::ZERO; 3]);
    }

    #[test]
    fn obj_without_faces_is_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\n";
        let result = Mesh::from_obj_reader("points", &mut Cursor::new(obj));
        assert!(matches!(result, Err(LoadError::EmptyMesh)));
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let result = Mesh::from_obj("does/not/exist.obj");
        assert!(matches!(result, Err(LoadError::Obj(_))));
    }
}
