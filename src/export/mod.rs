//! DNM/SRF export entry points.
//!
//! - [`dnm`]: the whole scene as one hierarchical DNM document.
//! - [`srf`]: a single mesh as a bare SRF file, or every mesh as its own SRF part.

pub mod dnm;
pub mod srf;

pub use dnm::{
    build_document, encode_document, export_document, write_document, DnmDocument, Package,
};
pub use srf::{
    encode_single_surface, export_exploded_parts, export_single_surface, single_surface_block,
};
