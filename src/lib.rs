//! # DNM Exporter
//!
//! A Rust library for exporting mesh scenes to the YSFlight DNM/SRF model formats.
//!
//! ## Overview
//!
//! The exporter takes a scene graph of meshes, flattens it into uniquely
//! identified surfaces, converts coordinates into the simulator's axis
//! convention and writes the line-oriented DNM (hierarchical model) or SRF
//! (single surface) text format.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dnm_exporter::{export_document, ExportConfig, Scene};
//!
//! // Load a scene description
//! let scene = Scene::from_json(&std::fs::read_to_string("plane.json")?)?;
//!
//! // Write every visible mesh and its hierarchy to one DNM file
//! export_document(&scene, "plane.dnm", &ExportConfig::default())?;
//! ```
//!
//! ## Single Surfaces
//!
//! ```ignore
//! use dnm_exporter::{encode_single_surface, export_exploded_parts, ExportConfig};
//!
//! let config = ExportConfig::default();
//!
//! // One mesh as a bare SRF block
//! let wing = scene.find("Wing").unwrap();
//! let srf = encode_single_surface(wing, &config)?;
//!
//! // Every mesh as its own `<name>.srf` file
//! let written = export_exploded_parts(&scene, "parts/", &config)?;
//! ```

pub mod error;
pub mod types;
pub mod surface;
pub mod encoder;
pub mod export;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use types::{Face, Material, MeshData, NodeKind, Scene, SceneNode, YSFLIGHT_AXIS};
pub use surface::{DuplicatePolicy, ExportConfig, SceneWalker, SurfaceNode, Uid, UidRegistry};
pub use encoder::{encode_geometry, encode_hierarchy, GeometryBlock, HierarchyBlock};
pub use export::dnm::{encode_document, export_document, write_document, DnmDocument};
pub use export::srf::{encode_single_surface, export_exploded_parts, export_single_surface};

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    let json = std::fs::read_to_string(path)?;
    Scene::from_json(&json)
}

#[cfg(feature = "wasm")]
pub mod wasm;
