use crate::{DMat4, DVec3, Mat4Ext, Point3};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. A parameter `t` is always
/// measured in multiples of the direction vector, so `t` for a given point is
/// unchanged when the ray is carried into another frame by an affine transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` passing through `target` at `t = 1`.
    pub fn through(origin: Point3, target: Point3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Carry the ray into another frame. The origin is transformed as a point
    /// and the direction as a vector (no translation).
    #[inline]
    pub fn transformed(&self, matrix: &DMat4) -> Ray {
        Ray::new(matrix.apply_point(self.origin), matrix.apply_vector(self.direction))
    }
}
