//! Camera for ray generation.
//!
//! Pixels are mapped to world space by a single unprojection matrix built
//! once per render. Rays start at the eye and pass through the unprojected
//! pixel; their directions are left unnormalised.

use arbor_core::RenderSettings;
use arbor_math::{scaling, translation, DMat4, DVec3, DVec4, Mat4Ext, Point3, Ray};

/// Build the matrix mapping pixel `(x, y, 0)` onto the projection plane.
///
/// The plane sits at distance `focal_distance` along `view` from `eye` and
/// spans `2 * focal_distance * tan(fov / 2)` world units vertically. `fov` is
/// in radians. Pixel `y` grows along `up`, so row 0 is the bottom of the
/// projection plane.
pub fn unproject_matrix(
    width: u32,
    height: u32,
    fov: f64,
    focal_distance: f64,
    eye: Point3,
    view: DVec3,
    up: DVec3,
) -> DMat4 {
    let width = width as f64;
    let height = height as f64;
    let plane_height = 2.0 * focal_distance * (fov / 2.0).tan();

    let viewport_translate = translation(DVec3::new(-width / 2.0, -height / 2.0, focal_distance));
    let viewport_scale = scaling(DVec3::new(
        -plane_height / height,
        plane_height / height,
        1.0,
    ));

    let view = view.normalize();
    let up = up.normalize();
    let u = up.cross(view).normalize();
    let v = view.cross(u);
    let view_rotate = DMat4::from_cols(
        u.extend(0.0),
        v.extend(0.0),
        view.extend(0.0),
        DVec4::W,
    );

    let view_translate = translation(eye.to_vec());

    view_translate * view_rotate * viewport_scale * viewport_translate
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    eye: Point3,
    view: DVec3,
    up: DVec3,

    // Lens settings
    fov: f64,            // Vertical field of view in radians
    focal_distance: f64, // Distance from eye to the projection plane

    // Cached by initialize()
    unproject: DMat4,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 256,
            image_height: 256,
            eye: Point3::ORIGIN,
            view: DVec3::NEG_Z,
            up: DVec3::Y,
            fov: std::f64::consts::FRAC_PI_2,
            focal_distance: 1.0,
            unproject: DMat4::IDENTITY,
        }
    }

    /// Camera matching a scene's render settings, already initialised.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let mut camera = Camera::new()
            .with_resolution(settings.width, settings.height)
            .with_position(settings.eye, settings.view, settings.up)
            .with_lens(settings.fov, 1.0);
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set eye point, view direction and up vector.
    pub fn with_position(mut self, eye: Point3, view: DVec3, up: DVec3) -> Self {
        self.eye = eye;
        self.view = view;
        self.up = up;
        self
    }

    /// Set vertical field of view (radians) and focal distance.
    pub fn with_lens(mut self, fov: f64, focal_distance: f64) -> Self {
        self.fov = fov;
        self.focal_distance = focal_distance;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        debug_assert!(
            self.up.cross(self.view).length_squared() > 0.0,
            "up and view must not be parallel"
        );
        self.unproject = unproject_matrix(
            self.image_width,
            self.image_height,
            self.fov,
            self.focal_distance,
            self.eye,
            self.view,
            self.up,
        );
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }

    pub fn unproject_matrix(&self) -> &DMat4 {
        &self.unproject
    }

    /// World-space point on the projection plane for image coordinates `(x, y)`.
    pub fn unproject(&self, x: f64, y: f64) -> Point3 {
        self.unproject.apply_point(Point3::new(x, y, 0.0))
    }

    /// Ray from the eye through image coordinates `(x, y)`.
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        Ray::through(self.eye, self.unproject(x, y))
    }

    /// Generate the ray for pixel `(x, y)`.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        self.ray_through(x as f64, y as f64)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
