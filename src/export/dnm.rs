//! DNM (dynamic model) document assembly.
//!
//! A document lists every surface's geometry as a line-counted `PCK` block,
//! followed by one `SRF` hierarchy block per surface, both in uid order.

use crate::encoder::{encode_hierarchy, encode_surface, GeometryBlock, HierarchyBlock};
use crate::error::Result;
use crate::surface::{ExportConfig, SceneWalker, UidRegistry};
use crate::types::Scene;
use std::fmt::{self, Display};
use std::path::Path;

/// A named geometry block inside a DNM document.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub geometry: GeometryBlock,
}

/// Fully encoded DNM document.
#[derive(Debug, Clone, Default)]
pub struct DnmDocument {
    pub packages: Vec<Package>,
    pub hierarchy: Vec<HierarchyBlock>,
}

impl DnmDocument {
    /// Encode every registered surface.
    pub fn assemble(registry: &UidRegistry, config: &ExportConfig) -> Result<Self> {
        let mut doc = Self::default();
        for surface in registry.list() {
            doc.packages.push(Package {
                name: surface.name.clone(),
                geometry: encode_surface(surface, config)?,
            });
        }
        for surface in registry.list() {
            doc.hierarchy
                .push(encode_hierarchy(surface, registry.parent_of(surface)));
        }
        Ok(doc)
    }

    pub fn surface_count(&self) -> usize {
        self.packages.len()
    }

    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "DYNAMODEL")?;
        writeln!(out, "DNMVER 1")?;
        for package in &self.packages {
            writeln!(out, "PCK {} {}", package.name, package.geometry.line_count())?;
            package.geometry.write_to(out)?;
            // Blank separator, not part of the counted body.
            writeln!(out)?;
        }
        for block in &self.hierarchy {
            block.write_to(out)?;
        }
        writeln!(out, "END")
    }
}

impl Display for DnmDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Walk the scene and build its document. The registry only lives for
/// this call, so no uid or name state survives into the next export.
pub fn build_document(scene: &Scene, config: &ExportConfig) -> Result<DnmDocument> {
    let registry = SceneWalker::new(config).walk(scene)?;
    DnmDocument::assemble(&registry, config)
}

/// Encode a scene as DNM text.
pub fn encode_document(scene: &Scene, config: &ExportConfig) -> Result<String> {
    Ok(build_document(scene, config)?.to_string())
}

/// Encode a scene and write it to `writer`.
pub fn write_document<W: std::io::Write>(
    scene: &Scene,
    mut writer: W,
    config: &ExportConfig,
) -> Result<()> {
    let text = encode_document(scene, config)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encode a scene and write it to a `.dnm` file. Nothing is written if
/// encoding fails.
pub fn export_document(scene: &Scene, path: impl AsRef<Path>, config: &ExportConfig) -> Result<()> {
    let path = path.as_ref();
    let doc = build_document(scene, config)?;
    std::fs::write(path, doc.to_string())?;
    tracing::info!(surfaces = doc.surface_count(), path = %path.display(), "exported DNM");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DuplicatePolicy;
    use crate::types::{Face, MeshData, SceneNode};

    fn triangle(name: &str) -> SceneNode {
        SceneNode::mesh(
            name,
            MeshData::new(
                vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                vec![Face::new([0, 1, 2])],
            ),
        )
    }

    /// Check every `PCK` header against the body that follows it.
    fn assert_line_counts(text: &str) {
        let lines: Vec<&str> = text.lines().collect();
        let mut checked = 0;
        for (i, line) in lines.iter().enumerate() {
            if let Some(rest) = line.strip_prefix("PCK ") {
                let count: usize = rest.rsplit(' ').next().unwrap().parse().unwrap();
                assert_eq!(lines[i + 1], "SURF");
                let body = &lines[i + 1..i + 1 + count];
                let last = body.last().unwrap();
                assert!(*last == "E" || last.starts_with("ZA"));
                assert_eq!(lines[i + 1 + count], "");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_parent_and_child_document() {
        let scene = Scene::new(vec![triangle("A").with_child(triangle("B"))]);
        let text = encode_document(&scene, &ExportConfig::default()).unwrap();

        assert!(text.starts_with("DYNAMODEL\nDNMVER 1\nPCK A.srf 9\nSURF\n"));
        assert!(text.ends_with("END\nEND\n"));
        assert_eq!(text.matches("PCK ").count(), 2);
        assert_eq!(text.matches("SRF \"").count(), 2);
        assert_eq!(text.matches("CLD \"1\"").count(), 1);
        assert_eq!(text.matches("CLD \"0\"").count(), 0);

        // Geometry blocks come before every hierarchy block.
        let last_pck = text.rfind("PCK ").unwrap();
        let first_srf = text.find("SRF \"").unwrap();
        assert!(last_pck < first_srf);

        let b_block = &text[text.find("SRF \"1\"").unwrap()..];
        assert!(b_block.contains("NCH 0\nEND\n"));
        assert_line_counts(&text);
    }

    #[test]
    fn test_empty_scene() {
        let text = encode_document(&Scene::default(), &ExportConfig::default()).unwrap();
        assert_eq!(text, "DYNAMODEL\nDNMVER 1\nEND\n");
    }

    #[test]
    fn test_uids_restart_for_each_job() {
        let scene = Scene::new(vec![triangle("A"), triangle("B")]);
        let config = ExportConfig::default();
        let first = encode_document(&scene, &config).unwrap();
        let second = encode_document(&scene, &config).unwrap();
        assert_eq!(first, second);
        assert!(second.contains("SRF \"0\"\nFIL A.srf"));
    }

    #[test]
    fn test_duplicate_abort_surfaces_error() {
        let scene = Scene::new(vec![triangle("A"), triangle("A")]);
        let config = ExportConfig::default().with_duplicate_names(DuplicatePolicy::Abort);
        assert!(encode_document(&scene, &config).is_err());
    }

    #[test]
    fn test_write_document_to_stream() {
        let scene = Scene::new(vec![triangle("A")]);
        let mut buf = Vec::new();
        write_document(&scene, &mut buf, &ExportConfig::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_line_counts(&text);
    }

    #[test]
    fn test_file_matches_encoded_text() {
        let scene = Scene::new(vec![triangle("A").with_child(triangle("B"))]);
        let config = ExportConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.dnm");
        export_document(&scene, &path, &config).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, encode_document(&scene, &config).unwrap());
        assert_eq!(written, build_document(&scene, &config).unwrap().to_string());
    }
}
