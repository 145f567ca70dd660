//! Hierarchical scene graph.
//!
//! Every node carries a local transform (child frame to parent frame) and its
//! cached inverse. Children are owned by their parent and expressed in the
//! parent's local frame.

use std::sync::Arc;

use arbor_math::{rotation, scaling, translation, Axis, DMat4, DVec3, Mat4Ext, Ray};

use crate::intersection::Intersection;
use crate::joint::JointNode;
use crate::material::Material;
use crate::primitive::Primitive;

/// Geometry carried by a geometry node.
#[derive(Debug, Clone)]
pub struct GeometryNode {
    primitive: Arc<Primitive>,
    material: Arc<Material>,
}

impl GeometryNode {
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }
}

/// What a node is, beyond its transform and children.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Plain grouping transform
    Transform,
    /// Transform with rotation limits for the posing layer
    Joint(JointNode),
    /// Transform with a primitive and its material
    Geometry(GeometryNode),
}

/// A node of the scene graph.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    transform: DMat4,
    inverse: DMat4,
    children: Vec<SceneNode>,
    kind: NodeKind,
}

impl SceneNode {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: DMat4::IDENTITY,
            inverse: DMat4::IDENTITY,
            children: Vec::new(),
            kind,
        }
    }

    /// Create a plain transform node with the identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Transform)
    }

    /// Create a joint node.
    pub fn joint(name: impl Into<String>, joint: JointNode) -> Self {
        Self::with_kind(name, NodeKind::Joint(joint))
    }

    /// Create a geometry node.
    pub fn geometry(
        name: impl Into<String>,
        primitive: impl Into<Arc<Primitive>>,
        material: Arc<Material>,
    ) -> Self {
        Self::with_kind(
            name,
            NodeKind::Geometry(GeometryNode {
                primitive: primitive.into(),
                material,
            }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_joint(&self) -> bool {
        matches!(self.kind, NodeKind::Joint(_))
    }

    pub fn as_joint(&self) -> Option<&JointNode> {
        match &self.kind {
            NodeKind::Joint(joint) => Some(joint),
            _ => None,
        }
    }

    pub fn as_joint_mut(&mut self) -> Option<&mut JointNode> {
        match &mut self.kind {
            NodeKind::Joint(joint) => Some(joint),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&GeometryNode> {
        match &self.kind {
            NodeKind::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    pub fn as_geometry_mut(&mut self) -> Option<&mut GeometryNode> {
        match &mut self.kind {
            NodeKind::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Local transform (this node's frame to its parent's frame).
    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// Cached inverse of [`SceneNode::transform`].
    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    /// Replace the local transform. The cached inverse is recomputed here and
    /// nowhere else.
    ///
    /// The matrix must be invertible.
    pub fn set_transform(&mut self, matrix: DMat4) {
        debug_assert!(
            matrix.determinant() != 0.0,
            "singular transform on node '{}'",
            self.name
        );
        self.transform = matrix;
        self.inverse = matrix.inverse();
    }

    /// Rotate about a principal axis by `degrees`, applied before the
    /// existing transform.
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.set_transform(self.transform * rotation(axis, degrees.to_radians()));
    }

    /// Scale, applied before the existing transform.
    pub fn scale(&mut self, amount: DVec3) {
        self.set_transform(self.transform * scaling(amount));
    }

    /// Translate, applied before the existing transform.
    pub fn translate(&mut self, amount: DVec3) {
        self.set_transform(self.transform * translation(amount));
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Append a child. Insertion order is traversal order.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Builder-style [`SceneNode::add_child`].
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.add_child(child);
        self
    }

    /// Remove and return the first direct child with the given name.
    pub fn remove_child(&mut self, name: &str) -> Option<SceneNode> {
        let index = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(index))
    }

    /// Depth-first search for a node by name, including this node.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable variant of [`SceneNode::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Intersect a ray given in the parent's frame.
    ///
    /// The ray is carried into this node's frame and tested against this
    /// node's own primitive, then against every child in order. A primitive
    /// hit replaces the record only if its `t` is strictly smaller than the
    /// best so far, so ties keep the hit found first. On return the record's
    /// point and normal are in the parent's frame, and the result says
    /// whether this subtree improved the record.
    pub fn intersect<'a>(&'a self, ray: &Ray, hit: &mut Intersection<'a>) -> bool {
        let local_ray = ray.transformed(&self.inverse);

        let mut improved = false;
        if let NodeKind::Geometry(geometry) = &self.kind {
            if let Some(local) = geometry.primitive.intersect(&local_ray) {
                if local.t < hit.t {
                    hit.t = local.t;
                    hit.point = self.transform.apply_point(local.point);
                    hit.normal = self.inverse.trans_norm(local.normal);
                    hit.material = &geometry.material;
                    improved = true;
                }
            }
        }

        let mut child_improved = false;
        for child in &self.children {
            child_improved |= child.intersect(&local_ray, hit);
        }

        // A child left the record in this node's frame; lift it one level
        if child_improved {
            hit.point = self.transform.apply_point(hit.point);
            hit.normal = self.inverse.trans_norm(hit.normal);
        }

        improved || child_improved
    }
}
