//! Coordinate conversion into the simulator's axis convention.

use glam::{Mat3, Mat4, Vec3};

/// Host-to-YSFlight axis conversion: mirrors X and swaps Y/Z,
/// so a host point `(x, y, z)` becomes `(-x, z, -y)`.
///
/// Row-major this reads:
///
/// ```text
/// [-1  0  0  0]
/// [ 0  0  1  0]
/// [ 0 -1  0  0]
/// [ 0  0  0  1]
/// ```
pub const YSFLIGHT_AXIS: Mat4 = Mat4::from_cols_array(&[
    -1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, -1.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
]);

/// Full transform of a point: `matrix · world · point`.
pub fn transform(matrix: Mat4, world: Mat4, point: Vec3) -> Vec3 {
    (matrix * world).transform_point3(point)
}

/// Apply only the 3x3 part of `matrix` (used for pivots taken from a location vector).
pub fn axis_remap(matrix: Mat4, point: Vec3) -> Vec3 {
    Mat3::from_mat4(matrix) * point
}

/// Per-surface transformer: converts host-local geometry into converted
/// coordinates relative to `origin`.
#[derive(Debug, Clone, Copy)]
pub struct GeometryTransformer {
    combined: Mat4,
    normal_matrix: Mat3,
    origin: Vec3,
}

impl GeometryTransformer {
    /// Build a transformer for one surface. Returns `None` when the combined
    /// transform is singular and normals cannot be carried through it.
    pub fn new(matrix: Mat4, world: Mat4, origin: Vec3) -> Option<Self> {
        let combined = matrix * world;
        let linear = Mat3::from_mat4(combined);
        let det = linear.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            combined,
            normal_matrix: linear.inverse().transpose(),
            origin,
        })
    }

    /// Position in converted coordinates, relative to the surface origin.
    pub fn point(&self, p: Vec3) -> Vec3 {
        self.combined.transform_point3(p) - self.origin
    }

    /// Position in converted coordinates, without the origin offset.
    pub fn absolute_point(&self, p: Vec3) -> Vec3 {
        self.combined.transform_point3(p)
    }

    /// Unit normal in converted coordinates, or `None` for a zero-length input.
    pub fn normal(&self, n: Vec3) -> Option<Vec3> {
        (self.normal_matrix * n).try_normalize()
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}
