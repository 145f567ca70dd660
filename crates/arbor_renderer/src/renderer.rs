//! Core ray casting renderer.
//!
//! Implements the per-pixel driver:
//! - One primary ray per pixel through the camera's unprojection matrix
//! - Closest-hit lookup through the scene graph
//! - Flat or Phong shading of the hit

use std::path::Path;

use arbor_core::{Colour, Intersection, Light, Material, RenderSettings, SceneNode, ShadingModel};
use arbor_math::Ray;
use thiserror::Error;

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::shading::phong;
use crate::Camera;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image of {width}x{height} has more pixels than fit in a u32")]
    TooLarge { width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Colour of pixels whose ray hits nothing
    pub background: Colour,
    /// Ambient light, used by Phong shading
    pub ambient: Colour,
    /// Point lights, used by Phong shading
    pub lights: Vec<Light>,
    pub shading: ShadingModel,
    /// Tile size for the parallel driver
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Colour::ZERO,
            ambient: Colour::ZERO,
            lights: Vec::new(),
            shading: ShadingModel::Flat,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Config matching a scene's render settings.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            background: settings.background,
            ambient: settings.ambient,
            lights: settings.lights.clone(),
            shading: settings.shading,
            ..Self::default()
        }
    }
}

/// Compute the colour seen by a ray.
pub fn trace(ray: &Ray, root: &SceneNode, config: &RenderConfig) -> Colour {
    let background = Material::flat(config.background);
    let mut hit = Intersection::new(&background);
    root.intersect(ray, &mut hit);

    match config.shading {
        // The background material doubles as the miss colour
        ShadingModel::Flat => hit.material.diffuse(),
        ShadingModel::Phong if hit.is_hit() => {
            phong(root, ray, &hit, config.ambient, &config.lights)
        }
        ShadingModel::Phong => config.background,
    }
}

/// Clamp a value to [0, 1] range, mapping NaN to 0.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Convert a colour to 8-bit RGB.
pub fn colour_to_rgb(colour: Colour) -> [u8; 3] {
    let r = (255.0 * clamp_01(colour.x)).round() as u8;
    let g = (255.0 * clamp_01(colour.y)).round() as u8;
    let b = (255.0 * clamp_01(colour.z)).round() as u8;
    [r, g, b]
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    root: &SceneNode,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Colour {
    let ray = camera.get_ray(x, y);
    trace(&ray, root, config)
}

/// Image buffer for storing render output.
///
/// Pixel `(x, y)` is the camera's pixel `(x, y)`, so row 0 is the bottom of
/// the picture. Conversion to an encoded image flips rows.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Colour>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Colour::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Colour {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), clamping each channel into [0, 1].
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) {
        if !colour.is_finite() {
            log::warn!("Non-finite colour {} at pixel ({}, {})", colour, x, y);
        }
        let clamped = Colour::new(clamp_01(colour.x), clamp_01(colour.y), clamp_01(colour.z));
        let index = self.index(x, y);
        self.pixels[index] = clamped;
    }

    /// Convert to an 8-bit RGB image, top row first.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, row| {
            image::Rgb(colour_to_rgb(self.get(x, self.height - 1 - row)))
        })
    }

    /// Write the image to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgb_image().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

pub(crate) fn check_size(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    if width.checked_mul(height).is_none() {
        return Err(RenderError::TooLarge { width, height });
    }
    Ok(())
}

/// Render the entire scene to an image buffer.
///
/// This is the single-threaded reference driver; pixels are visited in
/// raster order.
pub fn render(camera: &Camera, root: &SceneNode, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    check_size(camera.image_width, camera.image_height)?;
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let colour = render_pixel(camera, root, x, y, config);
            image.set(x, y, colour);
        }
    }

    Ok(image)
}

/// Render a scene with its loaded settings and write the image file.
pub fn render_to_file(root: &SceneNode, settings: &RenderSettings) -> RenderResult<ImageBuffer> {
    let camera = Camera::from_settings(settings);
    let config = RenderConfig::from_settings(settings);

    log::info!(
        "Rendering {}x{} with {} light(s), {:?} shading",
        settings.width,
        settings.height,
        config.lights.len(),
        config.shading
    );
    let start = std::time::Instant::now();
    let image = crate::bucket::render_parallel(&camera, root, &config)?;
    log::info!("Rendered in {:?}", start.elapsed());

    image.save(&settings.output)?;
    Ok(image)
}
