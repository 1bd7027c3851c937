//! Scene description types consumed by the exporter.

pub mod mesh;
pub mod transform;

pub use mesh::{Face, Material, MeshData};
pub use transform::{axis_remap, transform, GeometryTransformer, YSFLIGHT_AXIS};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// What a scene node carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A polygon mesh with its material slots.
    Mesh(MeshData),
    /// Any non-mesh object (empty, camera, lamp, ...).
    #[default]
    Empty,
}

/// A node in the host's scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Object-to-world transform (column-major).
    #[serde(default = "default_transform")]
    pub world_transform: Mat4,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

fn default_visible() -> bool {
    true
}

fn default_transform() -> Mat4 {
    Mat4::IDENTITY
}

impl SceneNode {
    /// Create a visible mesh node at the world origin.
    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            visible: true,
            world_transform: Mat4::IDENTITY,
            kind: NodeKind::Mesh(mesh),
            children: Vec::new(),
        }
    }

    /// Create a visible non-mesh node at the world origin.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            world_transform: Mat4::IDENTITY,
            kind: NodeKind::Empty,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, world_transform: Mat4) -> Self {
        self.world_transform = world_transform;
        self
    }

    pub fn with_location(self, location: [f32; 3]) -> Self {
        self.with_transform(Mat4::from_translation(Vec3::from(location)))
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mesh data, if this node is a mesh.
    pub fn mesh_data(&self) -> Option<&MeshData> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Empty => None,
        }
    }

    /// World-space location (translation part of the world transform).
    pub fn world_location(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }

    /// Depth-first search for a node by name, including this node.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// The whole scene: top-level nodes in host order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(nodes: Vec<SceneNode>) -> Self {
        Self { nodes }
    }

    /// Parse a scene description from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a node anywhere in the scene by name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find_map(|node| node.find(name))
    }
}
