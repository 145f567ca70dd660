//! Point light sources.

use arbor_math::Point3;

use crate::Colour;

/// A point light with quadratic distance falloff.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Point3,
    pub colour: Colour,
    /// Attenuation coefficients `[c0, c1, c2]` for `c0 + c1*d + c2*d^2`
    pub falloff: [f64; 3],
}

impl Light {
    /// Create a light with no distance falloff.
    pub fn new(position: Point3, colour: Colour) -> Self {
        Self {
            position,
            colour,
            falloff: [1.0, 0.0, 0.0],
        }
    }

    pub fn with_falloff(mut self, falloff: [f64; 3]) -> Self {
        self.falloff = falloff;
        self
    }

    /// Light arriving at `distance` from the light.
    pub fn intensity_at(&self, distance: f64) -> Colour {
        let [c0, c1, c2] = self.falloff;
        let attenuation = c0 + c1 * distance + c2 * distance * distance;
        if attenuation <= 0.0 {
            return self.colour;
        }
        self.colour / attenuation
    }
}
