//! Serialized form of a scene description.
//!
//! These types mirror the JSON document one to one and are converted to the
//! scene graph by the loader.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ShadingModel;

/// Top level of a description file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    pub root: NodeDesc,
    #[serde(default)]
    pub render: Option<RenderDesc>,
}

/// Phong material parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDesc {
    pub kd: [f64; 3],
    #[serde(default)]
    pub ks: [f64; 3],
    #[serde(default)]
    pub shininess: f64,
}

/// A node and its subtree.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKindDesc,
    /// Material name, for geometry nodes
    #[serde(default)]
    pub material: Option<String>,
    /// Applied in order, each after the previous in the node's frame
    #[serde(default)]
    pub transforms: Vec<TransformOp>,
    #[serde(default)]
    pub children: Vec<NodeDesc>,
}

/// Node type and its type-specific fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKindDesc {
    Node,
    Joint {
        /// `[min, init, max]` in degrees
        joint_x: [f64; 3],
        joint_y: [f64; 3],
    },
    Sphere,
    Cube,
    NhSphere {
        center: [f64; 3],
        radius: f64,
    },
    NhBox {
        corner: [f64; 3],
        size: f64,
    },
    Mesh {
        vertices: Vec<[f64; 3]>,
        faces: Vec<Vec<usize>>,
    },
}

/// One transform operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate([f64; 3]),
    Scale([f64; 3]),
    /// `angle` in degrees about axis `x`, `y` or `z`
    Rotate { axis: char, angle: f64 },
}

/// A point light.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDesc {
    pub position: [f64; 3],
    pub colour: [f64; 3],
    #[serde(default = "default_falloff")]
    pub falloff: [f64; 3],
}

fn default_falloff() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

/// Render parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderDesc {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub eye: [f64; 3],
    pub view: [f64; 3],
    pub up: [f64; 3],
    /// Vertical field of view in degrees
    pub fov: f64,
    #[serde(default)]
    pub ambient: [f64; 3],
    #[serde(default)]
    pub background: [f64; 3],
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub shading: ShadingModel,
}
