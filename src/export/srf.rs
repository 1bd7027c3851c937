//! Bare SRF (single surface) export.
//!
//! An SRF file is just the `SURF` geometry block: no `PCK` wrapper, no
//! document header, no hierarchy.

use crate::encoder::{encode_geometry, GeometryBlock};
use crate::error::{ExportError, Result};
use crate::surface::{visit_meshes, DuplicatePolicy, ExportConfig};
use crate::types::{GeometryTransformer, MeshData, Scene, SceneNode};
use glam::Vec3;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Encode one mesh node as a geometry block centered on its pivot.
pub fn single_surface_block(node: &SceneNode, config: &ExportConfig) -> Result<GeometryBlock> {
    let mesh = node
        .mesh_data()
        .ok_or_else(|| ExportError::NotAMesh(node.name.clone()))?;
    surface_block(node, mesh, config.local_origin(node), config)
}

/// Encode one mesh node as SRF text.
pub fn encode_single_surface(node: &SceneNode, config: &ExportConfig) -> Result<String> {
    Ok(single_surface_block(node, config)?.to_string())
}

/// Write one mesh node to an `.srf` file.
pub fn export_single_surface(
    node: &SceneNode,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    let path = path.as_ref();
    let text = encode_single_surface(node, config)?;
    std::fs::write(path, text)?;
    tracing::info!(node = %node.name, path = %path.display(), "exported SRF");
    Ok(())
}

/// Write every mesh of the scene, hidden or not, to its own `<name>.srf` file in
/// `dir`, in pre-order. Parts keep their converted world placement (no
/// pivot is subtracted) so they line up when loaded together.
///
/// All parts are encoded before the first file is written.
pub fn export_exploded_parts(
    scene: &Scene,
    dir: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut seen = HashSet::new();
    let mut parts = Vec::new();

    for (node, mesh) in visit_meshes(scene) {
        let file_name = part_file_name(node, config)?;
        if !seen.insert(file_name.clone()) {
            match config.duplicate_names {
                DuplicatePolicy::Skip => {
                    tracing::warn!(part = %file_name, "duplicate part name, node left out of export");
                    continue;
                }
                DuplicatePolicy::Abort => return Err(ExportError::DuplicateName(file_name)),
            }
        }
        let block = surface_block(node, mesh, Vec3::ZERO, config)?;
        parts.push((dir.join(&file_name), block));
    }

    let mut written = Vec::with_capacity(parts.len());
    for (path, block) in parts {
        std::fs::write(&path, block.to_string())?;
        tracing::debug!(path = %path.display(), lines = block.line_count(), "wrote part");
        written.push(path);
    }
    tracing::info!(parts = written.len(), dir = %dir.display(), "exported exploded parts");
    Ok(written)
}

fn surface_block(
    node: &SceneNode,
    mesh: &MeshData,
    origin: Vec3,
    config: &ExportConfig,
) -> Result<GeometryBlock> {
    let transformer = GeometryTransformer::new(config.axis_conversion, node.world_transform, origin)
        .ok_or_else(|| ExportError::geometry(&node.name, "world transform is singular"))?;
    encode_geometry(&node.name, mesh, &transformer)
}

fn part_file_name(node: &SceneNode, config: &ExportConfig) -> Result<String> {
    let name = node.name.as_str();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ExportError::Export(format!(
            "'{}' cannot be used as a part file name",
            name
        )));
    }
    Ok(config.surface_name(node))
}
