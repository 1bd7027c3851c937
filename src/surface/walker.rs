//! Pre-order traversal of the scene graph.
//!
//! A node is exported when it is visible and carries mesh data. Other nodes
//! are elided but their descendants are still visited; an exported
//! descendant of an elided node becomes a root surface rather than being
//! re-parented to a grandparent.

use super::{DuplicatePolicy, ExportConfig, SurfaceNode, Uid, UidRegistry};
use crate::error::{ExportError, Result};
use crate::types::{MeshData, Scene, SceneNode};

/// Builds the surface hierarchy of one export job.
pub struct SceneWalker<'a, 'c> {
    config: &'c ExportConfig,
    registry: UidRegistry<'a>,
}

impl<'a, 'c> SceneWalker<'a, 'c> {
    pub fn new(config: &'c ExportConfig) -> Self {
        Self {
            config,
            registry: UidRegistry::new(),
        }
    }

    /// Walk the whole scene and return the populated registry.
    pub fn walk(self, scene: &'a Scene) -> Result<UidRegistry<'a>> {
        self.walk_nodes(&scene.nodes)
    }

    /// Walk a list of top-level nodes in order.
    pub fn walk_nodes(mut self, roots: &'a [SceneNode]) -> Result<UidRegistry<'a>> {
        for node in roots {
            self.visit(node, None)?;
        }
        tracing::debug!(surfaces = self.registry.len(), "scene walk complete");
        Ok(self.registry)
    }

    fn visit(&mut self, node: &'a SceneNode, parent: Option<Uid>) -> Result<()> {
        let uid = match exported_mesh(node) {
            Some(mesh) => self.accept(node, mesh)?,
            None => {
                tracing::trace!(node = %node.name, "skipping hidden or non-mesh node");
                None
            }
        };

        if let (Some(parent), Some(uid)) = (parent, uid) {
            self.registry.attach(parent, uid);
        }

        for child in &node.children {
            self.visit(child, uid)?;
        }
        Ok(())
    }

    fn accept(&mut self, node: &'a SceneNode, mesh: &'a MeshData) -> Result<Option<Uid>> {
        let surface = SurfaceNode::from_scene_node(node, mesh, self.config);
        match self.registry.register(surface) {
            Ok(uid) => Ok(Some(uid)),
            Err(ExportError::DuplicateName(name))
                if self.config.duplicate_names == DuplicatePolicy::Skip =>
            {
                tracing::warn!(surface = %name, "duplicate surface name, node left out of export");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Every mesh node of the scene in pre-order, hidden ones included,
/// without uid assignment.
pub fn visit_meshes(scene: &Scene) -> Vec<(&SceneNode, &MeshData)> {
    fn collect<'s>(node: &'s SceneNode, out: &mut Vec<(&'s SceneNode, &'s MeshData)>) {
        if let Some(mesh) = node.mesh_data() {
            out.push((node, mesh));
        }
        for child in &node.children {
            collect(child, out);
        }
    }

    let mut out = Vec::new();
    for node in &scene.nodes {
        collect(node, &mut out);
    }
    out
}

fn exported_mesh(node: &SceneNode) -> Option<&MeshData> {
    if node.visible {
        node.mesh_data()
    } else {
        None
    }
}
