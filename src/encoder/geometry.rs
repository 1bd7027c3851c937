//! `SURF` geometry block encoding.

use super::records::{GeometryBlock, GeometryRecord, TransparentFace, ZA_PAIRS_PER_LINE};
use crate::error::{ExportError, Result};
use crate::surface::{ExportConfig, SurfaceNode};
use crate::types::mesh::weighted_center;
use crate::types::{GeometryTransformer, Material, MeshData};
use glam::Vec3;

/// Severity written for a fully transparent face.
const MAX_SEVERITY: f32 = 228.0;

/// Encode a registered surface, centered on its pivot.
pub fn encode_surface(surface: &SurfaceNode, config: &ExportConfig) -> Result<GeometryBlock> {
    let transformer = GeometryTransformer::new(
        config.axis_conversion,
        surface.world_transform,
        surface.local_origin,
    )
    .ok_or_else(|| ExportError::geometry(&surface.name, "world transform is singular"))?;
    encode_geometry(&surface.name, surface.mesh, &transformer)
}

/// Encode mesh geometry into a `SURF` block.
///
/// `name` is only used for error reporting. The mesh is validated first, so
/// a malformed mesh never yields a partial block.
pub fn encode_geometry(
    name: &str,
    mesh: &MeshData,
    transformer: &GeometryTransformer,
) -> Result<GeometryBlock> {
    mesh.validate().map_err(|msg| ExportError::geometry(name, msg))?;

    let mut block = GeometryBlock::new();
    block.push(GeometryRecord::Surf);

    let points: Vec<Vec3> = mesh
        .positions
        .iter()
        .map(|&p| transformer.point(Vec3::from(p)))
        .collect();
    for (&position, smooth) in points.iter().zip(mesh.smooth_vertices()) {
        block.push(GeometryRecord::Vertex { position, smooth });
    }

    let has_materials = !mesh.materials.is_empty();
    let mut transparent = Vec::new();

    for (index, face) in mesh.faces.iter().enumerate() {
        block.push(GeometryRecord::FaceStart);

        if has_materials {
            if let Some(material) = mesh.face_material(face) {
                block.push(GeometryRecord::Color(color_bytes(material)));
                if material.emit > 0.0 {
                    block.push(GeometryRecord::Bright);
                }
                if material.alpha < 1.0 {
                    transparent.push(TransparentFace {
                        face: index,
                        severity: severity(material.alpha),
                    });
                }
            }
        }

        let corners: Vec<Vec3> = face.vertices.iter().map(|&v| points[v as usize]).collect();
        let normal = transformer
            .normal(mesh.face_normal(face))
            .ok_or_else(|| ExportError::geometry(name, format!("face {} is degenerate", index)))?;
        block.push(GeometryRecord::Normal {
            center: weighted_center(&corners),
            normal: -normal,
        });
        block.push(GeometryRecord::FaceVertices(face.vertices.clone()));
        block.push(GeometryRecord::FaceEnd);
    }

    block.push(GeometryRecord::End);

    for line in transparent.chunks(ZA_PAIRS_PER_LINE) {
        block.push(GeometryRecord::Transparency(line.to_vec()));
    }

    Ok(block)
}

fn color_bytes(material: &Material) -> [u8; 3] {
    material
        .diffuse_color
        .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
}

fn severity(alpha: f32) -> u8 {
    ((1.0 - alpha) * MAX_SEVERITY).round().clamp(0.0, MAX_SEVERITY) as u8
}
