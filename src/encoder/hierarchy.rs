//! `SRF` hierarchy block encoding.

use super::records::{HierarchyBlock, HierarchyRecord, Relation};
use crate::surface::SurfaceNode;
use glam::Vec3;

/// Animation class written for every surface.
const ANIMATION_CLASS: u32 = 0;
/// Number of animation states written for every surface.
const STATE_COUNT: u32 = 0;

/// Placement of a surface in its parent's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub center: Vec3,
}

impl Placement {
    /// Roots, and children of a parent pivoted at the origin, keep the
    /// absolute pivot as rotation center. Other children are offset from
    /// the parent pivot and rotate about their own origin.
    pub fn of(surface: &SurfaceNode, parent: Option<&SurfaceNode>) -> Self {
        match parent {
            Some(parent) if parent.local_origin != Vec3::ZERO => Self {
                position: surface.local_origin - parent.local_origin,
                center: Vec3::ZERO,
            },
            _ => Self {
                position: Vec3::ZERO,
                center: surface.local_origin,
            },
        }
    }
}

/// Encode a surface's placement and children. `parent` must be the surface
/// referenced by `surface.parent`.
pub fn encode_hierarchy(surface: &SurfaceNode, parent: Option<&SurfaceNode>) -> HierarchyBlock {
    let placement = Placement::of(surface, parent);

    let mut block = HierarchyBlock::new();
    block.push(HierarchyRecord::Srf(surface.uid));
    block.push(HierarchyRecord::Fil(surface.name.clone()));
    block.push(HierarchyRecord::Cla(ANIMATION_CLASS));
    block.push(HierarchyRecord::Nst(STATE_COUNT));
    block.push(HierarchyRecord::Pos(placement.position));
    block.push(HierarchyRecord::Cnt(placement.center));
    block.push(HierarchyRecord::Rel(Relation::Dependent));
    block.push(HierarchyRecord::Nch(surface.children.len()));
    for &child in &surface.children {
        block.push(HierarchyRecord::Cld(child));
    }
    block.push(HierarchyRecord::End);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ExportConfig, SceneWalker};
    use crate::types::{MeshData, Scene, SceneNode};

    fn mesh(name: &str, location: [f32; 3]) -> SceneNode {
        SceneNode::mesh(name, MeshData::default()).with_location(location)
    }

    fn hierarchy_text(scene: &Scene) -> Vec<String> {
        let config = ExportConfig::default();
        let registry = SceneWalker::new(&config).walk(scene).unwrap();
        registry
            .list()
            .iter()
            .map(|s| encode_hierarchy(s, registry.parent_of(s)).to_string())
            .collect()
    }

    #[test]
    fn test_root_without_children() {
        let text = hierarchy_text(&Scene::new(vec![mesh("Body", [1.0, 2.0, 3.0])]));
        assert_eq!(
            text[0],
            "SRF \"0\"\nFIL Body.srf\nCLA 0\nNST 0\n\
             POS 0.0000 0.0000 0.0000 0 0 0 1\nCNT -1.0000 3.0000 -2.0000\n\
             REL DEP\nNCH 0\nEND\n"
        );
    }

    #[test]
    fn test_child_of_offset_parent() {
        let scene = Scene::new(vec![mesh("Body", [1.0, 0.0, 0.0])
            .with_child(mesh("Flap", [3.0, 0.0, 1.0]))
            .with_child(mesh("Gear", [1.0, 1.0, 0.0]))]);
        let text = hierarchy_text(&scene);

        assert!(text[0].contains("NCH 2\nCLD \"1\"\nCLD \"2\"\nEND\n"));
        assert!(text[1].contains("POS -2.0000 1.0000 0.0000 0 0 0 1\nCNT 0.0000 0.0000 0.0000\n"));
        assert!(text[2].contains("POS 0.0000 0.0000 -1.0000 0 0 0 1\n"));
        assert!(!text[1].contains("CLD"));
    }

    #[test]
    fn test_child_of_parent_at_origin_keeps_absolute_pivot() {
        let scene = Scene::new(vec![
            mesh("Body", [0.0, 0.0, 0.0]).with_child(mesh("Prop", [0.0, 4.0, 0.0]))
        ]);
        let text = hierarchy_text(&scene);
        assert!(text[1].contains("POS 0.0000 0.0000 0.0000 0 0 0 1\nCNT 0.0000 0.0000 -4.0000\n"));
    }

    #[test]
    fn test_block_shape() {
        let scene = Scene::new(vec![mesh("A", [0.0; 3]).with_child(mesh("B", [0.0; 3]))]);
        let config = ExportConfig::default();
        let registry = SceneWalker::new(&config).walk(&scene).unwrap();
        let a = &registry.list()[0];
        let block = encode_hierarchy(a, None);
        assert_eq!(block.line_count(), 10);
        assert_eq!(block.records()[8], HierarchyRecord::Cld(1));
    }
}
