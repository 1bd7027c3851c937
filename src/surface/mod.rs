//! Flattening of the scene graph into uniquely identified surfaces.
//!
//! The walker visits the scene in pre-order and registers every exported
//! mesh with a job-scoped [`UidRegistry`]. The registry is an arena: a
//! surface's uid is its index, and parent/child links are stored as uids.

pub mod registry;
pub mod walker;

pub use registry::UidRegistry;
pub use walker::{visit_meshes, SceneWalker};

use crate::types::{axis_remap, MeshData, SceneNode, YSFLIGHT_AXIS};
use glam::{Mat4, Vec3};

/// Identifier of a surface within one export job.
pub type Uid = usize;

/// What to do when two meshes would produce the same surface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Leave the later mesh out of the export and log a warning.
    #[default]
    Skip,
    /// Fail the export job.
    Abort,
}

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Conversion from host coordinates into simulator coordinates.
    pub axis_conversion: Mat4,
    /// Appended to a node's name to form its surface name.
    pub surface_suffix: String,
    /// Handling of repeated surface names.
    pub duplicate_names: DuplicatePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            axis_conversion: YSFLIGHT_AXIS,
            surface_suffix: ".srf".to_string(),
            duplicate_names: DuplicatePolicy::Skip,
        }
    }
}

impl ExportConfig {
    pub fn with_axis_conversion(mut self, matrix: Mat4) -> Self {
        self.axis_conversion = matrix;
        self
    }

    pub fn with_surface_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.surface_suffix = suffix.into();
        self
    }

    pub fn with_duplicate_names(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_names = policy;
        self
    }

    /// Surface name for a scene node.
    pub fn surface_name(&self, node: &SceneNode) -> String {
        format!("{}{}", node.name, self.surface_suffix)
    }

    /// Pivot of a node in converted coordinates.
    pub fn local_origin(&self, node: &SceneNode) -> Vec3 {
        axis_remap(self.axis_conversion, node.world_location())
    }
}

/// One exported mesh and its place in the surface hierarchy.
#[derive(Debug, Clone)]
pub struct SurfaceNode<'a> {
    pub name: String,
    pub uid: Uid,
    /// Pivot in converted world coordinates.
    pub local_origin: Vec3,
    pub parent: Option<Uid>,
    /// Child uids in traversal order.
    pub children: Vec<Uid>,
    pub world_transform: Mat4,
    pub mesh: &'a MeshData,
}

impl<'a> SurfaceNode<'a> {
    /// Build an unregistered surface for a mesh node. The uid is assigned by
    /// [`UidRegistry::register`].
    pub fn from_scene_node(
        node: &'a SceneNode,
        mesh: &'a MeshData,
        config: &ExportConfig,
    ) -> Self {
        Self {
            name: config.surface_name(node),
            uid: 0,
            local_origin: config.local_origin(node),
            parent: None,
            children: Vec::new(),
            world_transform: node.world_transform,
            mesh,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
