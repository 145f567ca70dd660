//! Analytic primitives and their ray intersection tests.
//!
//! Every test works in the primitive's own frame; the enclosing geometry node
//! carries the ray there before asking.

use arbor_math::{quadratic_roots, Axis, DVec3, Point3, Ray};

use crate::intersection::LocalHit;
use crate::mesh::Mesh;

/// A sphere with arbitrary center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonhierSphere {
    pub center: Point3,
    pub radius: f64,
}

impl NonhierSphere {
    /// Radius 1 at the origin.
    pub const UNIT: NonhierSphere = NonhierSphere {
        center: Point3::ORIGIN,
        radius: 1.0,
    };

    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Nearest non-negative hit along the ray.
    ///
    /// Solves `(d.d)t^2 + 2d.(o-c)t + (o-c).(o-c) - r^2 = 0`. When the ray starts
    /// inside the sphere the exit point is reported.
    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let t = quadratic_roots(a, b, c).smallest_non_negative()?;
        let point = ray.at(t);
        Some(LocalHit {
            t,
            point,
            normal: (point - self.center).normalize(),
        })
    }
}

/// An axis-aligned cube given by its minimum corner and side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonhierBox {
    pub corner: Point3,
    pub size: f64,
}

impl NonhierBox {
    /// Side 1 with one corner at the origin.
    pub const UNIT: NonhierBox = NonhierBox {
        corner: Point3::ORIGIN,
        size: 1.0,
    };

    pub fn new(corner: Point3, size: f64) -> Self {
        Self { corner, size }
    }

    fn min(&self) -> DVec3 {
        self.corner.to_vec()
    }

    fn max(&self) -> DVec3 {
        self.corner.to_vec() + DVec3::splat(self.size)
    }

    /// Slab test against the three pairs of face planes.
    ///
    /// Zero direction components give infinite reciprocals, which the
    /// min/max reductions absorb. If the ray starts inside the box the exit
    /// point is reported.
    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        let inv_dir = ray.direction.recip();
        let origin = ray.origin.to_vec();

        let t1 = (self.min() - origin) * inv_dir;
        let t2 = (self.max() - origin) * inv_dir;

        let t_enter = t1.min(t2).max_element();
        let t_exit = t1.max(t2).min_element();

        if t_exit < 0.0 || t_exit < t_enter {
            return None;
        }

        let t = if t_enter >= 0.0 { t_enter } else { t_exit };
        let point = ray.at(t);
        Some(LocalHit {
            t,
            point,
            normal: self.face_normal(point),
        })
    }

    /// Outward normal of the face `point` lies on.
    ///
    /// Picks the face plane closest to the point so that rounding in the hit
    /// point never leaves the normal unresolved.
    fn face_normal(&self, point: Point3) -> DVec3 {
        let p = point.to_vec();
        let (min, max) = (self.min(), self.max());

        let mut best_distance = f64::INFINITY;
        let mut normal = DVec3::ZERO;
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let i = axis.index();
            let to_min = (p[i] - min[i]).abs();
            if to_min < best_distance {
                best_distance = to_min;
                normal = -axis.unit();
            }
            let to_max = (p[i] - max[i]).abs();
            if to_max < best_distance {
                best_distance = to_max;
                normal = axis.unit();
            }
        }
        normal
    }
}

/// Geometry that a geometry node can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Unit sphere at the origin
    Sphere,
    /// Unit cube spanning `[0, 1]` on each axis
    Cube,
    NonhierSphere(NonhierSphere),
    NonhierBox(NonhierBox),
    Mesh(Mesh),
}

impl Primitive {
    /// Intersect a ray given in this primitive's frame.
    pub fn intersect(&self, ray: &Ray) -> Option<LocalHit> {
        match self {
            Primitive::Sphere => NonhierSphere::UNIT.intersect(ray),
            Primitive::Cube => NonhierBox::UNIT.intersect(ray),
            Primitive::NonhierSphere(sphere) => sphere.intersect(ray),
            Primitive::NonhierBox(b) => b.intersect(ray),
            Primitive::Mesh(mesh) => mesh.intersect(ray),
        }
    }

    /// Short name used in logs and scene dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Sphere => "sphere",
            Primitive::Cube => "cube",
            Primitive::NonhierSphere(_) => "nh_sphere",
            Primitive::NonhierBox(_) => "nh_box",
            Primitive::Mesh(_) => "mesh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_unit_sphere_hit() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = Primitive::Sphere.intersect(&ray).expect("should hit");

        assert!((hit.t - 4.0).abs() < EPS);
        assert!(hit.point.abs_diff_eq(Point3::new(0.0, 0.0, 1.0), EPS));
        assert!(hit.normal.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_sphere_parameter_scales_with_direction() {
        // Direction of length 2 halves the parameter
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -2.0));
        let hit = Primitive::Sphere.intersect(&ray).expect("should hit");
        assert!((hit.t - 2.0).abs() < EPS);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Point3::new(0.0, 2.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(Primitive::Sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(Primitive::Sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_from_inside_reports_exit() {
        let ray = Ray::new(Point3::ORIGIN, DVec3::X);
        let hit = Primitive::Sphere.intersect(&ray).expect("should hit");
        assert!((hit.t - 1.0).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(DVec3::X, EPS));
    }

    #[test]
    fn test_nonhier_sphere() {
        let sphere = NonhierSphere::new(Point3::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray::new(Point3::ORIGIN, DVec3::new(0.0, 0.0, -1.0));
        let hit = sphere.intersect(&ray).expect("should hit");

        assert!((hit.t - 8.0).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_unit_cube_hit() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = Primitive::Cube.intersect(&ray).expect("should hit");

        assert!((hit.t - 4.0).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_cube_each_face_normal() {
        let cases = [
            (Point3::new(-3.0, 0.5, 0.5), DVec3::X, -DVec3::X),
            (Point3::new(4.0, 0.5, 0.5), -DVec3::X, DVec3::X),
            (Point3::new(0.5, -3.0, 0.5), DVec3::Y, -DVec3::Y),
            (Point3::new(0.5, 4.0, 0.5), -DVec3::Y, DVec3::Y),
            (Point3::new(0.5, 0.5, -3.0), DVec3::Z, -DVec3::Z),
        ];
        for (origin, direction, expected) in cases {
            let hit = Primitive::Cube
                .intersect(&Ray::new(origin, direction))
                .expect("should hit");
            assert!((hit.t - 3.0).abs() < EPS, "t = {}", hit.t);
            assert!(hit.normal.abs_diff_eq(expected, EPS), "normal = {:?}", hit.normal);
        }
    }

    #[test]
    fn test_cube_miss_and_behind() {
        let miss = Ray::new(Point3::new(2.0, 2.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(Primitive::Cube.intersect(&miss).is_none());

        let behind = Ray::new(Point3::new(0.5, 0.5, 5.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(Primitive::Cube.intersect(&behind).is_none());
    }

    #[test]
    fn test_cube_oblique_ray() {
        let ray = Ray::new(Point3::new(-1.0, -1.0, 0.5), DVec3::new(1.0, 1.0, 0.0));
        let hit = Primitive::Cube.intersect(&ray).expect("should hit the edge");
        assert!((hit.t - 1.0).abs() < EPS);
        assert!(hit.point.abs_diff_eq(Point3::new(0.0, 0.0, 0.5), EPS));
    }

    #[test]
    fn test_nonhier_box() {
        let b = NonhierBox::new(Point3::new(-1.0, -1.0, -6.0), 2.0);
        let ray = Ray::new(Point3::ORIGIN, DVec3::new(0.0, 0.0, -1.0));
        let hit = b.intersect(&ray).expect("should hit");

        assert!((hit.t - 4.0).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_box_from_inside_reports_exit() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), DVec3::new(0.0, 0.0, -1.0));
        let hit = Primitive::Cube.intersect(&ray).expect("should hit");
        assert!((hit.t - 0.5).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(-DVec3::Z, EPS));
    }
}
