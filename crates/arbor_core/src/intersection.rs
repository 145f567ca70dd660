//! Ray intersection records.

use arbor_math::{DVec3, Point3};

use crate::Material;

/// A hit reported by a primitive, in the primitive's own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    /// Ray parameter of the hit
    pub t: f64,
    /// Point of intersection
    pub point: Point3,
    /// Outward surface normal (unit length)
    pub normal: DVec3,
}

/// Closest-hit accumulator threaded through a scene walk.
///
/// Starts at `t = +inf` with the caller's background material and is only
/// ever improved by strictly closer hits.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Parameter t of the closest hit so far
    pub t: f64,
    /// Hit point in the frame of the node currently holding the record
    pub point: Point3,
    /// Surface normal in the same frame as `point` (not renormalised)
    pub normal: DVec3,
    /// Material of the closest hit, or the background material
    pub material: &'a Material,
}

impl<'a> Intersection<'a> {
    /// Fresh record for a new ray.
    pub fn new(background: &'a Material) -> Self {
        Self {
            t: f64::INFINITY,
            point: Point3::ORIGIN,
            normal: DVec3::ZERO,
            material: background,
        }
    }

    /// Whether anything has been hit yet.
    pub fn is_hit(&self) -> bool {
        self.t.is_finite()
    }
}
