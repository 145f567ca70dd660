//! Phong lighting with hard shadows.

use arbor_core::{Colour, Intersection, Light, Material, SceneNode};
use arbor_math::{Point3, Ray};

/// Offset applied along the normal before casting a shadow ray, and the
/// smallest blocker distance a shadow ray accepts.
pub const SHADOW_EPSILON: f64 = 1e-6;

/// Whether anything in the scene lies between `point` and the light.
///
/// The shadow ray reaches the light at `t = 1`, so only hits in
/// `(SHADOW_EPSILON, 1)` block it.
pub fn in_shadow(root: &SceneNode, point: Point3, light: &Light) -> bool {
    let shadow_ray = Ray::through(point, light.position);
    let background = Material::default();
    let mut hit = Intersection::new(&background);
    root.intersect(&shadow_ray, &mut hit);
    hit.t > SHADOW_EPSILON && hit.t < 1.0
}

/// Colour of a surface hit under ambient light and point lights.
///
/// `hit` must be a real hit of `ray` against `root`, with its point and
/// normal in world space.
pub fn phong(
    root: &SceneNode,
    ray: &Ray,
    hit: &Intersection<'_>,
    ambient: Colour,
    lights: &[Light],
) -> Colour {
    let material = hit.material;
    let kd = material.diffuse();
    let ks = material.specular();

    // Normals are only correct up to scale after transforms, and mesh faces
    // can be hit from behind
    let mut normal = hit.normal.normalize_or_zero();
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }
    let to_eye = (-ray.direction).normalize_or_zero();

    let mut colour = kd * ambient;
    for light in lights {
        let to_light = light.position - hit.point;
        let distance = to_light.length();
        if distance <= 0.0 {
            continue;
        }
        let l = to_light / distance;
        let n_dot_l = normal.dot(l);
        if n_dot_l <= 0.0 {
            continue;
        }

        let origin = hit.point + normal * SHADOW_EPSILON;
        if in_shadow(root, origin, light) {
            continue;
        }

        let reflected = 2.0 * n_dot_l * normal - l;
        let r_dot_v = reflected.dot(to_eye).max(0.0);
        let specular = if r_dot_v > 0.0 {
            ks * r_dot_v.powf(material.shininess())
        } else {
            Colour::ZERO
        };

        colour += (kd * n_dot_l + specular) * light.intensity_at(distance);
    }
    colour
}
