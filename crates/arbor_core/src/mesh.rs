//! Polygon mesh primitive.
//!
//! Faces are convex, planar polygons given as indices into a shared vertex
//! list. Winding is counter-clockwise when viewed from the side the face
//! normal points to.

use arbor_math::{DVec3, Point3, Ray};
use thiserror::Error;

use crate::intersection::LocalHit;

/// Errors raised while building a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("face {face} has {len} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, len: usize },

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// One polygon: indices into the mesh's vertex list.
pub type Face = Vec<usize>;

/// A mesh of convex planar polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
    /// Unit plane normal per face (zero for degenerate faces)
    normals: Vec<DVec3>,
}

impl Mesh {
    /// Create a mesh, validating every face against the vertex list.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        for (i, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: i,
                    len: face.len(),
                });
            }
            if let Some(&index) = face.iter().find(|&&index| index >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: i,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let normals = faces
            .iter()
            .map(|face| {
                let (v0, v1, v2) = (vertices[face[0]], vertices[face[1]], vertices[face[2]]);
                let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
                if normal == DVec3::ZERO {
                    log::debug!("Mesh face {:?} is degenerate and will never be hit", face);
                }
                normal
            })
            .collect();

        Ok(Self {
            vertices,
            faces,
            normals,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Closest face hit along the ray.
    ///
    /// Each face plane is intersected, hits behind the origin or farther than
    /// the best face so far are skipped, and the remaining point must lie on
    /// the inner side of every edge.
    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        let mut closest: Option<LocalHit> = None;

        for (face, &normal) in self.faces.iter().zip(&self.normals) {
            let denom = normal.dot(ray.direction);
            // Parallel to the plane, or a degenerate face
            if denom.abs() < f64::EPSILON {
                continue;
            }

            let on_plane = self.vertices[face[0]];
            let t = normal.dot(on_plane - ray.origin) / denom;
            if t < 0.0 {
                continue;
            }
            if closest.is_some_and(|best| best.t < t) {
                continue;
            }

            let point = ray.at(t);
            if self.face_contains(face, normal, point) {
                closest = Some(LocalHit { t, point, normal });
            }
        }

        closest
    }

    /// Same-side test: `point` is inside when every edge turns towards it.
    fn face_contains(&self, face: &[usize], normal: DVec3, point: Point3) -> bool {
        let n = face.len();
        (0..n).all(|i| {
            let a = self.vertices[face[i]];
            let b = self.vertices[face[(i + 1) % n]];
            (b - a).cross(point - a).dot(normal) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_square_at(z: f64) -> (Vec<Point3>, Vec<Face>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ];
        (vertices, vec![vec![0, 1, 2, 3]])
    }

    #[test]
    fn test_mesh_creation() {
        let (vertices, faces) = unit_square_at(0.0);
        let mesh = Mesh::new(vertices, faces).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_face_validation() {
        let (vertices, _) = unit_square_at(0.0);

        let err = Mesh::new(vertices.clone(), vec![vec![0, 1]]).unwrap_err();
        assert_eq!(err, MeshError::FaceTooSmall { face: 0, len: 2 });

        let err = Mesh::new(vertices, vec![vec![0, 1, 2], vec![0, 2, 7]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 1,
                index: 7,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn test_quad_hit_inside() {
        let (vertices, faces) = unit_square_at(0.0);
        let mesh = Mesh::new(vertices, faces).unwrap();

        let ray = Ray::new(Point3::new(0.25, 0.75, 3.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).expect("should hit");

        assert!((hit.t - 3.0).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_quad_miss_outside_edges() {
        let (vertices, faces) = unit_square_at(0.0);
        let mesh = Mesh::new(vertices, faces).unwrap();

        for (x, y) in [(1.5, 0.5), (-0.5, 0.5), (0.5, 1.5), (0.5, -0.5)] {
            let ray = Ray::new(Point3::new(x, y, 3.0), DVec3::new(0.0, 0.0, -1.0));
            assert!(mesh.intersect(&ray).is_none(), "({}, {}) should miss", x, y);
        }
    }

    #[test]
    fn test_parallel_and_behind_rays_miss() {
        let (vertices, faces) = unit_square_at(0.0);
        let mesh = Mesh::new(vertices, faces).unwrap();

        let parallel = Ray::new(Point3::new(0.5, 0.5, 1.0), DVec3::X);
        assert!(mesh.intersect(&parallel).is_none());

        let behind = Ray::new(Point3::new(0.5, 0.5, 1.0), DVec3::Z);
        assert!(mesh.intersect(&behind).is_none());
    }

    #[test]
    fn test_closest_face_wins() {
        let vertices = vec![
            // Far square at z = -5
            Point3::new(0.0, 0.0, -5.0),
            Point3::new(1.0, 0.0, -5.0),
            Point3::new(1.0, 1.0, -5.0),
            Point3::new(0.0, 1.0, -5.0),
            // Near triangle at z = -2
            Point3::new(0.0, 0.0, -2.0),
            Point3::new(1.0, 0.0, -2.0),
            Point3::new(0.0, 1.0, -2.0),
        ];
        let faces = vec![vec![0, 1, 2, 3], vec![4, 5, 6]];
        let mesh = Mesh::new(vertices, faces).unwrap();

        let ray = Ray::new(Point3::new(0.2, 0.2, 0.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).expect("should hit");
        assert!((hit.t - 2.0).abs() < EPS);

        // Outside the triangle only the far square is hit
        let ray = Ray::new(Point3::new(0.9, 0.9, 0.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).expect("should hit");
        assert!((hit.t - 5.0).abs() < EPS);
    }
}
