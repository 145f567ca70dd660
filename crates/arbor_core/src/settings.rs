//! Render parameters carried by a scene description.

use std::path::PathBuf;

use arbor_math::{DVec3, Point3};
use serde::Deserialize;

use crate::{Colour, Light};

/// How the colour of a hit is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// Paint the diffuse colour of the closest hit
    #[default]
    Flat,
    /// Ambient plus per-light diffuse and specular, with shadow rays
    Phong,
}

/// Everything needed to render a scene besides the scene graph itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Where the image is written
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub eye: Point3,
    pub view: DVec3,
    pub up: DVec3,
    /// Vertical field of view in radians
    pub fov: f64,
    pub ambient: Colour,
    pub background: Colour,
    pub lights: Vec<Light>,
    pub shading: ShadingModel,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("render.png"),
            width: 256,
            height: 256,
            eye: Point3::ORIGIN,
            view: DVec3::NEG_Z,
            up: DVec3::Y,
            fov: 50.0_f64.to_radians(),
            ambient: Colour::ZERO,
            background: Colour::ZERO,
            lights: Vec::new(),
            shading: ShadingModel::Flat,
        }
    }
}
