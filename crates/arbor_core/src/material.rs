//! Surface materials.

use arbor_math::DVec3;

/// Colour type alias (RGB values typically 0-1)
pub type Colour = DVec3;

/// Phong reflectance parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    /// Diffuse reflectance (kd)
    pub diffuse: Colour,
    /// Specular reflectance (ks)
    pub specular: Colour,
    /// Specular exponent
    pub shininess: f64,
}

/// A surface material. Pure value type, consumed at shading time.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Phong(PhongMaterial),
}

impl Material {
    /// Create a Phong material.
    pub fn phong(diffuse: Colour, specular: Colour, shininess: f64) -> Self {
        Material::Phong(PhongMaterial {
            diffuse,
            specular,
            shininess,
        })
    }

    /// A material that paints a flat colour with no highlight. Used for the
    /// background of a render.
    pub fn flat(colour: Colour) -> Self {
        Self::phong(colour, Colour::ZERO, 0.0)
    }

    pub fn diffuse(&self) -> Colour {
        match self {
            Material::Phong(m) => m.diffuse,
        }
    }

    pub fn specular(&self) -> Colour {
        match self {
            Material::Phong(m) => m.specular,
        }
    }

    pub fn shininess(&self) -> f64 {
        match self {
            Material::Phong(m) => m.shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        // Grey, matte
        Material::flat(Colour::splat(0.5))
    }
}
