//! Points in 3D space.

use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec3;

/// A position in 3D space (implicit homogeneous `w = 1`).
///
/// Points can be translated by a vector, and the difference of two points
/// is a vector. Adding two points is deliberately not supported.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position vector of this point relative to the origin.
    #[inline]
    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Point at the tip of a position vector.
    #[inline]
    pub fn from_vec(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn distance(self, other: Point3) -> f64 {
        (self - other).length()
    }

    pub fn abs_diff_eq(self, other: Point3, max_abs_diff: f64) -> bool {
        self.to_vec().abs_diff_eq(other.to_vec(), max_abs_diff)
    }
}

impl Add<DVec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: DVec3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<DVec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: DVec3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub for Point3 {
    type Output = DVec3;

    #[inline]
    fn sub(self, rhs: Point3) -> DVec3 {
        DVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(a: [f64; 3]) -> Self {
        Point3::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
