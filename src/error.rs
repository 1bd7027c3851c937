//! Error types for the DNM/SRF exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while creating or writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a scene description.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A surface with this name was already registered in the current job.
    #[error("Duplicate surface name: {0}")]
    DuplicateName(String),

    /// Mesh data that cannot be encoded.
    #[error("Invalid geometry in {surface}: {message}")]
    Geometry { surface: String, message: String },

    /// Single-surface export was asked for a node without mesh data.
    #[error("Node is not a mesh: {0}")]
    NotAMesh(String),

    /// No node with the requested name exists in the scene.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Failed to export the scene.
    #[error("Export error: {0}")]
    Export(String),
}

impl ExportError {
    pub(crate) fn geometry(surface: &str, message: impl Into<String>) -> Self {
        Self::Geometry {
            surface: surface.to_string(),
            message: message.into(),
        }
    }
}
