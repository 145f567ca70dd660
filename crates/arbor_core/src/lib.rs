//! Arbor Core - Scene graph, primitives and scene descriptions.
//!
//! This crate provides:
//!
//! - **Scene graph**: `SceneNode` trees of transform, joint and geometry nodes
//! - **Primitives**: spheres, boxes and polygon meshes with ray intersection
//! - **Shading inputs**: Phong materials and point lights
//! - **Scene descriptions**: JSON scene files loaded into a scene graph
//!
//! # Example
//!
//! ```ignore
//! use arbor_core::{load_scene, Intersection, Material};
//!
//! let scene = load_scene("scene.json")?;
//! let background = Material::default();
//! let mut hit = Intersection::new(&background);
//! if scene.root.intersect(&ray, &mut hit) {
//!     println!("hit at t = {}", hit.t);
//! }
//! ```

pub mod description;
pub mod intersection;
pub mod joint;
pub mod light;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use description::{load_scene, load_scene_from_str, LoadError, LoadResult, LoadedScene};
pub use intersection::{Intersection, LocalHit};
pub use joint::{JointAngles, JointNode, JointRange};
pub use light::Light;
pub use material::{Colour, Material, PhongMaterial};
pub use mesh::{Face, Mesh, MeshError};
pub use primitive::{NonhierBox, NonhierSphere, Primitive};
pub use scene::{GeometryNode, NodeKind, SceneNode};
pub use settings::{RenderSettings, ShadingModel};
