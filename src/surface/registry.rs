//! UID assignment for the surfaces of one export job.

use super::{SurfaceNode, Uid};
use crate::error::{ExportError, Result};
use std::collections::HashSet;

/// Job-scoped surface arena. Uids are handed out from 0 in registration
/// order with no gaps; a uid is also the surface's index in [`list`](Self::list).
#[derive(Debug, Default)]
pub struct UidRegistry<'a> {
    surfaces: Vec<SurfaceNode<'a>>,
    names: HashSet<String>,
}

impl<'a> UidRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface and return its uid. Fails with
    /// [`ExportError::DuplicateName`] if the name is already taken; the
    /// registry is left unchanged in that case.
    pub fn register(&mut self, mut surface: SurfaceNode<'a>) -> Result<Uid> {
        if self.names.contains(&surface.name) {
            return Err(ExportError::DuplicateName(surface.name));
        }
        let uid = self.surfaces.len();
        surface.uid = uid;
        tracing::debug!(uid, name = %surface.name, "registered surface");
        self.names.insert(surface.name.clone());
        self.surfaces.push(surface);
        Ok(uid)
    }

    /// Link `child` under `parent`. Both must already be registered.
    pub fn attach(&mut self, parent: Uid, child: Uid) {
        self.surfaces[child].parent = Some(parent);
        self.surfaces[parent].children.push(child);
    }

    /// Registered surfaces in uid order.
    pub fn list(&self) -> &[SurfaceNode<'a>] {
        &self.surfaces
    }

    pub fn get(&self, uid: Uid) -> Option<&SurfaceNode<'a>> {
        self.surfaces.get(uid)
    }

    /// Parent surface of `surface`, if any.
    pub fn parent_of(&self, surface: &SurfaceNode<'a>) -> Option<&SurfaceNode<'a>> {
        surface.parent.and_then(|uid| self.surfaces.get(uid))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Counter back to 0, names and surfaces forgotten.
    pub fn reset(&mut self) {
        self.surfaces.clear();
        self.names.clear();
    }

    pub fn into_surfaces(self) -> Vec<SurfaceNode<'a>> {
        self.surfaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ExportConfig;
    use crate::types::{MeshData, SceneNode};

    fn surface<'a>(node: &'a SceneNode, mesh: &'a MeshData) -> SurfaceNode<'a> {
        SurfaceNode::from_scene_node(node, mesh, &ExportConfig::default())
    }

    #[test]
    fn test_uids_are_sequential() {
        let mesh = MeshData::default();
        let nodes: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|n| SceneNode::mesh(*n, MeshData::default()))
            .collect();

        let mut registry = UidRegistry::new();
        let uids: Vec<_> = nodes
            .iter()
            .map(|n| registry.register(surface(n, &mesh)).unwrap())
            .collect();

        assert_eq!(uids, vec![0, 1, 2]);
        assert_eq!(registry.list()[1].name, "B.srf");
        assert_eq!(registry.list()[2].uid, 2);
    }

    #[test]
    fn test_duplicate_name_rejected_without_consuming_uid() {
        let mesh = MeshData::default();
        let a = SceneNode::mesh("A", MeshData::default());
        let b = SceneNode::mesh("B", MeshData::default());

        let mut registry = UidRegistry::new();
        registry.register(surface(&a, &mesh)).unwrap();
        let err = registry.register(surface(&a, &mesh)).unwrap_err();
        assert!(matches!(err, ExportError::DuplicateName(ref n) if n == "A.srf"));
        assert_eq!(registry.register(surface(&b, &mesh)).unwrap(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reset_starts_over() {
        let mesh = MeshData::default();
        let a = SceneNode::mesh("A", MeshData::default());

        let mut registry = UidRegistry::new();
        registry.register(surface(&a, &mesh)).unwrap();
        registry.reset();
        assert!(registry.is_empty());
        assert_eq!(registry.register(surface(&a, &mesh)).unwrap(), 0);
    }

    #[test]
    fn test_attach_links_both_ways() {
        let mesh = MeshData::default();
        let a = SceneNode::mesh("A", MeshData::default());
        let b = SceneNode::mesh("B", MeshData::default());

        let mut registry = UidRegistry::new();
        let pa = registry.register(surface(&a, &mesh)).unwrap();
        let cb = registry.register(surface(&b, &mesh)).unwrap();
        registry.attach(pa, cb);

        assert_eq!(registry.list()[pa].children, vec![cb]);
        let child = registry.get(cb).unwrap();
        assert_eq!(registry.parent_of(child).unwrap().uid, pa);
    }
}
