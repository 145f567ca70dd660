//! Double-precision algebra for the arbor ray tracer.
//!
//! Vectors and matrices are glam's f64 types. Points get their own type so
//! that homogeneous transforms can tell `w = 1` (points) from `w = 0`
//! (vectors and normals) at the type level.

// Re-export the glam f64 types used throughout the workspace
pub use glam::{DMat3, DMat4, DVec3, DVec4};

mod point;
mod ray;
mod roots;
mod transform;

pub use point::Point3;
pub use ray::Ray;
pub use roots::{quadratic_roots, QuadraticRoots};
pub use transform::{rotation, scaling, translation, Axis, Mat4Ext};

/// Tolerance used for geometric comparisons across the workspace.
pub const EPSILON: f64 = 1e-9;
