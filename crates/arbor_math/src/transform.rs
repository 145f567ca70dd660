// Transform utilities for DMat4
//
// Factory helpers return a matrix for a single operation, to be composed with
// others by multiplication. Composition is right-to-left: `t * r * s` applied
// to a point scales first, then rotates, then translates.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::Point3;

/// A principal axis, used for axis-aligned rotations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Parse the single-letter axis names used in scene descriptions.
    pub fn from_char(c: char) -> Option<Axis> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// Index of this axis into a vector (0=X, 1=Y, 2=Z).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Matrix translating by `offset`.
pub fn translation(offset: DVec3) -> DMat4 {
    DMat4::from_translation(offset)
}

/// Matrix rotating counter-clockwise by `radians` about `axis`
/// (looking from the positive axis towards the origin).
pub fn rotation(axis: Axis, radians: f64) -> DMat4 {
    match axis {
        Axis::X => DMat4::from_rotation_x(radians),
        Axis::Y => DMat4::from_rotation_y(radians),
        Axis::Z => DMat4::from_rotation_z(radians),
    }
}

/// Matrix scaling each axis by the matching component of `factors`.
pub fn scaling(factors: DVec3) -> DMat4 {
    DMat4::from_scale(factors)
}

/// Extension trait for DMat4 applying it to points, vectors and normals.
pub trait Mat4Ext {
    /// Transform a point (implicit w=1, translation applies).
    fn apply_point(&self, point: Point3) -> Point3;

    /// Transform a vector (implicit w=0, translation ignored).
    fn apply_vector(&self, vector: DVec3) -> DVec3;

    /// Transform a surface normal by the transpose of `self`.
    ///
    /// Call this on the *inverse* of a model-to-world matrix `M` to carry a
    /// model-space normal into world space as `(M⁻¹)ᵗ · n`. The result is not
    /// renormalised.
    fn trans_norm(&self, normal: DVec3) -> DVec3;
}

impl Mat4Ext for DMat4 {
    fn apply_point(&self, point: Point3) -> Point3 {
        let p = *self * DVec4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    fn apply_vector(&self, vector: DVec3) -> DVec3 {
        // Transform as direction (w=0) - translation should not affect vectors
        let v = *self * vector.extend(0.0);
        v.truncate()
    }

    fn trans_norm(&self, normal: DVec3) -> DVec3 {
        DMat3::from_mat4(*self).transpose() * normal
    }
}
