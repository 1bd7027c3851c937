//! Polygon mesh data handed over by the host editor.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Surface material of one material slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse color, each channel in 0.0..=1.0.
    #[serde(default = "default_diffuse")]
    pub diffuse_color: [f32; 3],
    /// Emission intensity. Anything above zero marks the face as self-lit.
    #[serde(default)]
    pub emit: f32,
    /// Opacity, 1.0 = fully opaque.
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

fn default_diffuse() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_alpha() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: default_diffuse(),
            emit: 0.0,
            alpha: default_alpha(),
        }
    }
}

impl Material {
    pub fn new(diffuse_color: [f32; 3]) -> Self {
        Self {
            diffuse_color,
            ..Self::default()
        }
    }

    pub fn with_emit(mut self, emit: f32) -> Self {
        self.emit = emit;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// A polygon with any number of corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices in winding order.
    pub vertices: Vec<u32>,
    /// Index into the owning object's material slots.
    #[serde(default)]
    pub material: usize,
    /// Smooth shading flag.
    #[serde(default)]
    pub smooth: bool,
}

impl Face {
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
            material: 0,
            smooth: false,
        }
    }

    pub fn with_material(mut self, slot: usize) -> Self {
        self.material = slot;
        self
    }

    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }

    /// Polygon edges as (from, to) pairs, closing the loop.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Mesh data of one scene object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions in object space.
    pub positions: Vec<[f32; 3]>,
    /// Polygons in mesh-native order.
    #[serde(default)]
    pub faces: Vec<Face>,
    /// Edges marked sharp (not smooth), as unordered vertex pairs.
    #[serde(default)]
    pub sharp_edges: Vec<[u32; 2]>,
    /// Material slots of the object. An empty slot is `None`.
    #[serde(default)]
    pub materials: Vec<Option<Material>>,
}

impl MeshData {
    pub fn new(positions: Vec<[f32; 3]>, faces: Vec<Face>) -> Self {
        Self {
            positions,
            faces,
            ..Self::default()
        }
    }

    pub fn with_materials(mut self, materials: Vec<Option<Material>>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_sharp_edges(mut self, edges: Vec<[u32; 2]>) -> Self {
        self.sharp_edges = edges;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn position(&self, index: u32) -> Vec3 {
        Vec3::from(self.positions[index as usize])
    }

    /// Check that every face can be encoded. Reports the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let count = self.positions.len();
        for (fi, face) in self.faces.iter().enumerate() {
            if face.vertices.len() < 3 {
                return Err(format!(
                    "face {} has {} vertices, at least 3 required",
                    fi,
                    face.vertices.len()
                ));
            }
            if let Some(&bad) = face.vertices.iter().find(|&&v| v as usize >= count) {
                return Err(format!(
                    "face {} references vertex {} but the mesh has {} vertices",
                    fi, bad, count
                ));
            }
            if !self.materials.is_empty() && face.material >= self.materials.len() {
                return Err(format!(
                    "face {} uses material slot {} but the object has {} slots",
                    fi,
                    face.material,
                    self.materials.len()
                ));
            }
        }
        if let Some(edge) = self
            .sharp_edges
            .iter()
            .find(|edge| edge.iter().any(|&v| v as usize >= count))
        {
            return Err(format!(
                "sharp edge {:?} references a vertex outside the mesh's {} vertices",
                edge, count
            ));
        }
        Ok(())
    }

    /// Material of a face, `None` when the object has no slots or the slot is empty.
    pub fn face_material(&self, face: &Face) -> Option<&Material> {
        self.materials.get(face.material).and_then(|slot| slot.as_ref())
    }

    /// Per-vertex smoothing flags: a vertex is smooth when none of its
    /// edges is sharp and at least one of its faces is smooth.
    pub fn smooth_vertices(&self) -> Vec<bool> {
        let mut has_sharp_edge = vec![false; self.positions.len()];
        let mut has_smooth_face = vec![false; self.positions.len()];

        // Loose edges count too: any sharp edge touching a vertex clears it.
        for &[a, b] in &self.sharp_edges {
            for v in [a, b] {
                if let Some(flag) = has_sharp_edge.get_mut(v as usize) {
                    *flag = true;
                }
            }
        }

        for face in &self.faces {
            if face.smooth {
                for &v in &face.vertices {
                    has_smooth_face[v as usize] = true;
                }
            }
        }

        has_sharp_edge
            .iter()
            .zip(&has_smooth_face)
            .map(|(&sharp, &smooth)| !sharp && smooth)
            .collect()
    }

    /// Face normal by Newell's method, unnormalized. Zero for degenerate polygons.
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        face.edges().fold(Vec3::ZERO, |acc, (a, b)| {
            let p = self.position(a);
            let q = self.position(b);
            acc + Vec3::new(
                (p.y - q.y) * (p.z + q.z),
                (p.z - q.z) * (p.x + q.x),
                (p.x - q.x) * (p.y + q.y),
            )
        })
    }
}

/// Edge-length weighted median of a polygon: each corner is weighted by the
/// summed length of its two polygon edges. Falls back to the plain average
/// when every edge has zero length.
pub fn weighted_center(points: &[Vec3]) -> Vec3 {
    let n = points.len();
    if n == 0 {
        return Vec3::ZERO;
    }

    let edge_len = |i: usize| points[i].distance(points[(i + 1) % n]);
    let mut center = Vec3::ZERO;
    let mut total = 0.0;
    let mut prev = edge_len(n - 1);
    for (i, &p) in points.iter().enumerate() {
        let curr = edge_len(i);
        let w = prev + curr;
        center += p * w;
        total += w;
        prev = curr;
    }

    if total > 0.0 {
        center / total
    } else {
        points.iter().copied().sum::<Vec3>() / n as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [2.0, 0.0, 0.0],
            ],
            vec![Face::new([0, 1, 2, 3]).smooth(), Face::new([1, 4, 2])],
        )
    }

    #[test]
    fn test_smooth_requires_smooth_face() {
        let smooth = quad().smooth_vertices();
        assert_eq!(smooth, vec![true, true, true, true, false]);
    }

    #[test]
    fn test_sharp_edge_clears_smoothing() {
        let mesh = quad().with_sharp_edges(vec![[3, 0]]);
        let smooth = mesh.smooth_vertices();
        assert_eq!(smooth, vec![false, true, true, false, false]);
    }

    #[test]
    fn test_loose_sharp_edge_clears_smoothing() {
        let mut mesh = MeshData::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            vec![Face::new([0, 1, 2]).smooth()],
        )
        .with_sharp_edges(vec![[0, 3]]);
        assert_eq!(mesh.smooth_vertices(), vec![false, true, true, false]);
        assert!(mesh.validate().is_ok());

        mesh.sharp_edges.push([1, 7]);
        assert_eq!(mesh.smooth_vertices(), vec![false, false, true, false]);
        assert!(mesh.validate().unwrap_err().contains("sharp edge"));
    }

    #[test]
    fn test_loose_vertex_is_not_smooth() {
        let mut mesh = quad();
        mesh.positions.push([5.0, 5.0, 5.0]);
        assert!(!mesh.smooth_vertices()[5]);
    }

    #[test]
    fn test_newell_normal() {
        let mesh = quad();
        let n = mesh.face_normal(&mesh.faces[0]).normalize();
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_weighted_center_of_square_is_centroid() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        assert!((weighted_center(&pts) - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_weighted_center_collapsed_polygon() {
        let pts = [Vec3::ONE; 3];
        assert_eq!(weighted_center(&pts), Vec3::ONE);
    }

    #[test]
    fn test_validate_rejects_bad_faces() {
        let mut mesh = quad();
        mesh.faces.push(Face::new([0, 1]));
        assert!(mesh.validate().unwrap_err().contains("at least 3"));

        let mut mesh = quad();
        mesh.faces.push(Face::new([0, 1, 9]));
        assert!(mesh.validate().unwrap_err().contains("vertex 9"));

        let mut mesh = quad().with_materials(vec![Some(Material::default())]);
        mesh.faces[1].material = 3;
        assert!(mesh.validate().unwrap_err().contains("slot 3"));
    }

    #[test]
    fn test_empty_slot_has_no_material() {
        let mesh = quad().with_materials(vec![None, Some(Material::new([1.0, 0.0, 0.0]))]);
        assert!(mesh.face_material(&mesh.faces[0]).is_none());
        let with_slot = Face::new([0, 1, 2]).with_material(1);
        assert_eq!(mesh.face_material(&with_slot).unwrap().diffuse_color, [1.0, 0.0, 0.0]);
    }
}
