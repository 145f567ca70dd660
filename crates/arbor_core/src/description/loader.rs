//! Converts scene description files into a scene graph.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use arbor_math::{Axis, DVec3, Point3};
use thiserror::Error;

use crate::description::types::{
    LightDesc, MaterialDesc, NodeDesc, NodeKindDesc, RenderDesc, SceneFile, TransformOp,
};
use crate::joint::{JointNode, JointRange};
use crate::light::Light;
use crate::material::Material;
use crate::mesh::{Mesh, MeshError};
use crate::primitive::{NonhierBox, NonhierSphere, Primitive};
use crate::scene::SceneNode;
use crate::settings::RenderSettings;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node '{node}' references unknown material '{material}'")]
    UnknownMaterial { node: String, material: String },

    #[error("Node '{node}' rotates about unknown axis '{axis}'")]
    UnknownAxis { node: String, axis: char },

    #[error("Node '{node}' has a singular transform")]
    SingularTransform { node: String },

    #[error("Invalid mesh in node '{node}': {source}")]
    Mesh {
        node: String,
        #[source]
        source: MeshError,
    },

    #[error("Field of view must lie strictly between 0 and 180 degrees, got {0}")]
    InvalidFov(f64),

    #[error("Scene has no render section")]
    MissingRender,
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A loaded scene: the graph plus everything the description declared.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub name: String,
    pub root: SceneNode,
    pub materials: BTreeMap<String, Arc<Material>>,
    pub render: Option<RenderSettings>,
}

impl LoadedScene {
    /// Render settings, for callers that cannot proceed without them.
    pub fn render_settings(&self) -> LoadResult<&RenderSettings> {
        self.render.as_ref().ok_or(LoadError::MissingRender)
    }
}

/// Load a scene description from a JSON file.
///
/// The scene is named after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&text)?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        scene.name = stem.to_string();
    }
    log::info!(
        "Loaded scene '{}' from {}: {} nodes, {} materials",
        scene.name,
        path.display(),
        scene.root.node_count(),
        scene.materials.len()
    );
    Ok(scene)
}

/// Load a scene description from a JSON string.
pub fn load_scene_from_str(text: &str) -> LoadResult<LoadedScene> {
    let file: SceneFile = serde_json::from_str(text)?;

    let materials: BTreeMap<String, Arc<Material>> = file
        .materials
        .iter()
        .map(|(name, desc)| (name.clone(), Arc::new(build_material(desc))))
        .collect();

    let root = build_node(&file.root, &materials)?;
    let render = file.render.as_ref().map(build_render).transpose()?;

    Ok(LoadedScene {
        name: file.root.name.clone(),
        root,
        materials,
        render,
    })
}

fn build_material(desc: &MaterialDesc) -> Material {
    Material::phong(
        DVec3::from_array(desc.kd),
        DVec3::from_array(desc.ks),
        desc.shininess,
    )
}

fn build_node(
    desc: &NodeDesc,
    materials: &BTreeMap<String, Arc<Material>>,
) -> LoadResult<SceneNode> {
    let material = match &desc.material {
        Some(name) => Some(materials.get(name).cloned().ok_or_else(|| {
            LoadError::UnknownMaterial {
                node: desc.name.clone(),
                material: name.clone(),
            }
        })?),
        None => None,
    };

    let mut node = match build_primitive(&desc.name, &desc.kind)? {
        Some(primitive) => {
            let material = material.clone().unwrap_or_else(|| {
                log::debug!("Node '{}' has no material, using default", desc.name);
                Arc::new(Material::default())
            });
            SceneNode::geometry(&desc.name, primitive, material)
        }
        None => match &desc.kind {
            NodeKindDesc::Joint { joint_x, joint_y } => SceneNode::joint(
                &desc.name,
                JointNode::new(JointRange::from(*joint_x), JointRange::from(*joint_y)),
            ),
            _ => SceneNode::new(&desc.name),
        },
    };

    if material.is_some() && node.as_geometry().is_none() {
        log::warn!("Material on non-geometry node '{}' is ignored", desc.name);
    }

    for op in &desc.transforms {
        apply_transform(&mut node, op)?;
    }

    for child in &desc.children {
        node.add_child(build_node(child, materials)?);
    }

    Ok(node)
}

/// Primitive for a geometry node, `None` for grouping nodes.
fn build_primitive(node: &str, kind: &NodeKindDesc) -> LoadResult<Option<Primitive>> {
    let primitive = match kind {
        NodeKindDesc::Node | NodeKindDesc::Joint { .. } => return Ok(None),
        NodeKindDesc::Sphere => Primitive::Sphere,
        NodeKindDesc::Cube => Primitive::Cube,
        NodeKindDesc::NhSphere { center, radius } => {
            Primitive::NonhierSphere(NonhierSphere::new(Point3::from(*center), *radius))
        }
        NodeKindDesc::NhBox { corner, size } => {
            Primitive::NonhierBox(NonhierBox::new(Point3::from(*corner), *size))
        }
        NodeKindDesc::Mesh { vertices, faces } => {
            let vertices = vertices.iter().copied().map(Point3::from).collect();
            let mesh = Mesh::new(vertices, faces.clone()).map_err(|source| LoadError::Mesh {
                node: node.to_string(),
                source,
            })?;
            Primitive::Mesh(mesh)
        }
    };
    Ok(Some(primitive))
}

/// Apply one transform operation through the node's mutators.
///
/// Translations and rotations are always invertible, so a scale with a zero
/// or non-finite factor is the only way to make the node singular.
fn apply_transform(node: &mut SceneNode, op: &TransformOp) -> LoadResult<()> {
    match op {
        TransformOp::Translate(v) => node.translate(DVec3::from_array(*v)),
        TransformOp::Scale(v) => {
            let factors = DVec3::from_array(*v);
            if !factors.is_finite() || factors.cmpeq(DVec3::ZERO).any() {
                return Err(LoadError::SingularTransform {
                    node: node.name().to_string(),
                });
            }
            node.scale(factors);
        }
        TransformOp::Rotate { axis, angle } => {
            let axis = Axis::from_char(*axis).ok_or_else(|| LoadError::UnknownAxis {
                node: node.name().to_string(),
                axis: *axis,
            })?;
            node.rotate(axis, *angle);
        }
    }
    Ok(())
}

fn build_light(desc: &LightDesc) -> Light {
    Light::new(Point3::from(desc.position), DVec3::from_array(desc.colour))
        .with_falloff(desc.falloff)
}

fn build_render(desc: &RenderDesc) -> LoadResult<RenderSettings> {
    if !(desc.fov > 0.0 && desc.fov < 180.0) {
        return Err(LoadError::InvalidFov(desc.fov));
    }
    Ok(RenderSettings {
        output: desc.output.clone(),
        width: desc.width,
        height: desc.height,
        eye: Point3::from(desc.eye),
        view: DVec3::from_array(desc.view),
        up: DVec3::from_array(desc.up),
        fov: desc.fov.to_radians(),
        ambient: DVec3::from_array(desc.ambient),
        background: DVec3::from_array(desc.background),
        lights: desc.lights.iter().map(build_light).collect(),
        shading: desc.shading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::Intersection;
    use crate::scene::NodeKind;
    use crate::settings::ShadingModel;
    use arbor_math::{Mat4Ext, Ray};

    const SIMPLE_SCENE: &str = r#"
    {
        "materials": {
            "red": { "kd": [1, 0, 0], "ks": [0.5, 0.5, 0.5], "shininess": 25 }
        },
        "root": {
            "name": "root",
            "type": "node",
            "children": [
                {
                    "name": "ball",
                    "type": "sphere",
                    "material": "red",
                    "transforms": [ { "translate": [0, 0, -5] } ]
                },
                {
                    "name": "arm",
                    "type": "joint",
                    "joint_x": [-45, 10, 45],
                    "joint_y": [0, 0, 0],
                    "transforms": [ { "translate": [5, 0, 0] } ],
                    "children": [
                        { "name": "box", "type": "cube" }
                    ]
                }
            ]
        },
        "render": {
            "output": "simple.png",
            "width": 64,
            "height": 48,
            "eye": [0, 0, 0],
            "view": [0, 0, -1],
            "up": [0, 1, 0],
            "fov": 90,
            "ambient": [0.1, 0.1, 0.1],
            "lights": [
                { "position": [0, 10, 0], "colour": [1, 1, 1] },
                { "position": [5, 0, 0], "colour": [0.5, 0.5, 0.5], "falloff": [1, 0.1, 0] }
            ],
            "shading": "phong"
        }
    }
    "#;

    #[test]
    fn test_load_simple_scene() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();

        assert_eq!(scene.name, "root");
        assert_eq!(scene.root.node_count(), 4);
        assert_eq!(scene.materials.len(), 1);

        let ball = scene.root.find("ball").unwrap();
        let geometry = ball.as_geometry().unwrap();
        assert_eq!(geometry.primitive(), &Primitive::Sphere);
        assert_eq!(geometry.material().diffuse(), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(geometry.material().shininess(), 25.0);

        let centre = ball.transform().apply_point(Point3::ORIGIN);
        assert!(centre.abs_diff_eq(Point3::new(0.0, 0.0, -5.0), 1e-12));
    }

    #[test]
    fn test_load_joint() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();
        let arm = scene.root.find("arm").unwrap();

        assert!(arm.is_joint());
        let joint = arm.as_joint().unwrap();
        assert_eq!(joint.range_x(), JointRange::new(-45.0, 10.0, 45.0));
        assert_eq!(joint.current_angles().x, 10.0);
        assert!(matches!(arm.children()[0].kind(), NodeKind::Geometry(_)));
    }

    #[test]
    fn test_load_render_settings() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();
        let render = scene.render_settings().unwrap();

        assert_eq!(render.width, 64);
        assert_eq!(render.height, 48);
        assert!((render.fov - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(render.shading, ShadingModel::Phong);
        assert_eq!(render.background, DVec3::ZERO);
        assert_eq!(render.lights.len(), 2);
        assert_eq!(render.lights[0].falloff, [1.0, 0.0, 0.0]);
        assert_eq!(render.lights[1].falloff, [1.0, 0.1, 0.0]);
    }

    #[test]
    fn test_loaded_scene_is_hittable() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();
        let background = Material::default();
        let mut hit = Intersection::new(&background);

        let ray = Ray::new(Point3::ORIGIN, DVec3::new(0.0, 0.0, -1.0));
        assert!(scene.root.intersect(&ray, &mut hit));
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert_eq!(hit.material.diffuse(), DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transforms_compose_in_order() {
        let json = r#"
        {
            "root": {
                "name": "root",
                "type": "node",
                "transforms": [
                    { "translate": [1, 0, 0] },
                    { "rotate": { "axis": "z", "angle": 90 } },
                    { "scale": [2, 2, 2] }
                ]
            }
        }
        "#;
        let scene = load_scene_from_str(json).unwrap();

        // Local (1, 0, 0) is scaled to (2, 0, 0), rotated to (0, 2, 0), then moved.
        let p = scene.root.transform().apply_point(Point3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Point3::new(1.0, 2.0, 0.0), 1e-12));
        assert!(scene.render.is_none());
        assert!(matches!(
            scene.render_settings(),
            Err(LoadError::MissingRender)
        ));
    }

    #[test]
    fn test_nonhier_and_mesh_nodes() {
        let json = r#"
        {
            "root": {
                "name": "root",
                "type": "node",
                "children": [
                    { "name": "s", "type": "nh_sphere", "center": [0, 0, -10], "radius": 2 },
                    { "name": "b", "type": "nh_box", "corner": [1, 1, 1], "size": 3 },
                    {
                        "name": "quad",
                        "type": "mesh",
                        "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
                        "faces": [[0, 1, 2, 3]]
                    }
                ]
            }
        }
        "#;
        let scene = load_scene_from_str(json).unwrap();

        let s = scene.root.find("s").unwrap().as_geometry().unwrap();
        assert_eq!(
            s.primitive(),
            &Primitive::NonhierSphere(NonhierSphere::new(Point3::new(0.0, 0.0, -10.0), 2.0))
        );
        // No material given
        assert_eq!(**s.material(), Material::default());

        let quad = scene.root.find("quad").unwrap().as_geometry().unwrap();
        match quad.primitive() {
            Primitive::Mesh(mesh) => {
                assert_eq!(mesh.vertex_count(), 4);
                assert_eq!(mesh.face_count(), 1);
            }
            other => panic!("expected mesh, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"
        { "root": { "name": "ball", "type": "sphere", "material": "missing" } }
        "#;
        match load_scene_from_str(json) {
            Err(LoadError::UnknownMaterial { node, material }) => {
                assert_eq!(node, "ball");
                assert_eq!(material, "missing");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_singular_transform_rejected() {
        let json = r#"
        { "root": { "name": "flat", "type": "cube", "transforms": [ { "scale": [1, 0, 1] } ] } }
        "#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::SingularTransform { .. })
        ));
    }

    #[test]
    fn test_tiny_scale_accepted() {
        let json = r#"
        { "root": { "name": "speck", "type": "sphere", "transforms": [ { "scale": [1e-6, 1e-6, 1e-6] } ] } }
        "#;
        let scene = load_scene_from_str(json).unwrap();
        let p = scene.root.inverse().apply_point(Point3::new(1e-6, 0.0, 0.0));
        assert!(p.abs_diff_eq(Point3::new(1.0, 0.0, 0.0), 1e-9));
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let json = r#"
        { "root": { "name": "r", "type": "node",
                    "transforms": [ { "rotate": { "axis": "w", "angle": 10 } } ] } }
        "#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::UnknownAxis { axis: 'w', .. })
        ));
    }

    #[test]
    fn test_bad_mesh_rejected() {
        let json = r#"
        { "root": { "name": "m", "type": "mesh",
                    "vertices": [[0, 0, 0], [1, 0, 0]], "faces": [[0, 1, 5]] } }
        "#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::Mesh { .. })
        ));
    }

    #[test]
    fn test_invalid_fov_rejected() {
        let json = r#"
        {
            "root": { "name": "root", "type": "node" },
            "render": { "output": "x.png", "width": 1, "height": 1,
                        "eye": [0, 0, 0], "view": [0, 0, -1], "up": [0, 1, 0], "fov": 180 }
        }
        "#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::InvalidFov(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_scene_from_str("{ \"root\": "),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_load_scene_from_file() {
        let path = std::env::temp_dir().join("arbor_loader_test_scene.json");
        std::fs::write(&path, SIMPLE_SCENE).unwrap();

        let scene = load_scene(&path).unwrap();
        assert_eq!(scene.name, "arbor_loader_test_scene");
        assert_eq!(scene.root.node_count(), 4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/scene.json"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn test_bundled_scenes_load() {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets");
        for file in ["simple.json", "puppet.json"] {
            let scene = load_scene(assets.join(file)).unwrap();
            assert!(scene.render.is_some(), "{} has no render section", file);
        }
    }
}
