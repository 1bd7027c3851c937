//! Typed DNM/SRF records and their text form.
//!
//! Every record renders to exactly one line, so the line count of a block
//! is the number of records it holds.

use crate::surface::Uid;
use glam::Vec3;
use std::fmt::{self, Display, Write};

/// Maximum number of face/severity pairs on one `ZA` line.
pub const ZA_PAIRS_PER_LINE: usize = 8;

/// A transparent face: positional face index and opacity severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparentFace {
    pub face: usize,
    pub severity: u8,
}

/// One line of a `SURF` geometry block.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryRecord {
    /// `SURF`
    Surf,
    /// `V x y z [R]`
    Vertex { position: Vec3, smooth: bool },
    /// `F`
    FaceStart,
    /// `C r g b`
    Color([u8; 3]),
    /// `B`, the face is self-lit.
    Bright,
    /// `N cx cy cz nx ny nz`
    Normal { center: Vec3, normal: Vec3 },
    /// `V i0 i1 ...`
    FaceVertices(Vec<u32>),
    /// `E` closing a face.
    FaceEnd,
    /// `E` closing the face list.
    End,
    /// `ZA face severity ...`, at most [`ZA_PAIRS_PER_LINE`] pairs.
    Transparency(Vec<TransparentFace>),
}

impl Display for GeometryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surf => f.write_str("SURF"),
            Self::Vertex { position, smooth } => {
                // The trailing space before the optional flag is part of the format.
                write!(f, "V {} ", Coords(*position))?;
                if *smooth {
                    f.write_char('R')?;
                }
                Ok(())
            }
            Self::FaceStart => f.write_str("F"),
            Self::Color([r, g, b]) => write!(f, "C {} {} {}", r, g, b),
            Self::Bright => f.write_str("B"),
            Self::Normal { center, normal } => {
                write!(f, "N {} {}", Coords(*center), Coords(*normal))
            }
            Self::FaceVertices(indices) => {
                f.write_char('V')?;
                for i in indices {
                    write!(f, " {}", i)?;
                }
                Ok(())
            }
            Self::FaceEnd | Self::End => f.write_str("E"),
            Self::Transparency(entries) => {
                f.write_str("ZA")?;
                for entry in entries {
                    write!(f, " {} {}", entry.face, entry.severity)?;
                }
                Ok(())
            }
        }
    }
}

/// Relationship between a surface and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `DEP`: the child moves with its parent.
    Dependent,
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dependent => f.write_str("DEP"),
        }
    }
}

/// One line of an `SRF` hierarchy block.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyRecord {
    /// `SRF "uid"`
    Srf(Uid),
    /// `FIL name`
    Fil(String),
    /// `CLA n`, animation class.
    Cla(u32),
    /// `NST n`, number of animation states.
    Nst(u32),
    /// `POS x y z 0 0 0 1`: offset, zero rotation, visible.
    Pos(Vec3),
    /// `CNT x y z`, rotation center.
    Cnt(Vec3),
    /// `REL rel`
    Rel(Relation),
    /// `NCH n`
    Nch(usize),
    /// `CLD "uid"`
    Cld(Uid),
    /// `END`
    End,
}

impl Display for HierarchyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srf(uid) => write!(f, "SRF \"{}\"", uid),
            Self::Fil(name) => write!(f, "FIL {}", name),
            Self::Cla(class) => write!(f, "CLA {}", class),
            Self::Nst(states) => write!(f, "NST {}", states),
            Self::Pos(offset) => write!(f, "POS {} 0 0 0 1", Coords(*offset)),
            Self::Cnt(center) => write!(f, "CNT {}", Coords(*center)),
            Self::Rel(rel) => write!(f, "REL {}", rel),
            Self::Nch(count) => write!(f, "NCH {}", count),
            Self::Cld(uid) => write!(f, "CLD \"{}\"", uid),
            Self::End => f.write_str("END"),
        }
    }
}

/// An ordered run of one-line records.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBlock<R> {
    records: Vec<R>,
}

pub type GeometryBlock = RecordBlock<GeometryRecord>;
pub type HierarchyBlock = RecordBlock<HierarchyRecord>;

impl<R> Default for RecordBlock<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Display> RecordBlock<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of newline-terminated lines the block renders to.
    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    /// Render every record followed by a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        for record in &self.records {
            writeln!(out, "{}", record)?;
        }
        Ok(())
    }
}

impl<R: Display> Display for RecordBlock<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Three coordinates at four decimal places. Values that round to zero
/// are written unsigned.
struct Coords(Vec3);

impl Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0.to_array().map(unsigned_zero);
        write!(f, "{:.4} {:.4} {:.4}", x, y, z)
    }
}

fn unsigned_zero(v: f32) -> f32 {
    if v.abs() < 0.00005 {
        0.0
    } else {
        v
    }
}
