//! Surface encoders.
//!
//! Encoders build typed record blocks; text is only produced when a block
//! is written out.

pub mod geometry;
pub mod hierarchy;
pub mod records;

pub use geometry::{encode_geometry, encode_surface};
pub use hierarchy::{encode_hierarchy, Placement};
pub use records::{
    GeometryBlock, GeometryRecord, HierarchyBlock, HierarchyRecord, RecordBlock, Relation,
    TransparentFace,
};
