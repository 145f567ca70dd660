//! Arbor Renderer - ray casting for scene graphs.
//!
//! One primary ray per pixel is cast from the eye through the camera's
//! unprojection matrix and resolved against the scene graph. Hits are painted
//! flat with their diffuse colour or lit with Phong shading and hard shadows.

mod bucket;
mod camera;
mod renderer;
mod shading;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{unproject_matrix, Camera};
pub use renderer::{
    clamp_01, colour_to_rgb, render, render_pixel, render_to_file, trace, ImageBuffer,
    RenderConfig, RenderError, RenderResult,
};
pub use shading::{in_shadow, phong, SHADOW_EPSILON};

/// Re-export common types from arbor_core
pub use arbor_core::{Colour, Light, ShadingModel};
