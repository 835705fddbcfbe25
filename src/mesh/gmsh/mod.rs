//! Gmsh mesh file I/O.
//!
//! Supports reading and writing the Gmsh MSH format version 1 (ASCII):
//!
//! ```text
//! $NOD
//! <count>
//! <id> <x> <y> <z>
//! ...
//! $ENDNOD
//! $ELM
//! <count>
//! <id> <type> <physical-region> <element-region> <n> <node-id>...
//! ...
//! $ENDELM
//! ```
//!
//! Reading keeps the 1-based identifiers in file order, so writing the mesh
//! back reproduces the original enumeration.
//!
//! ## Example
//! ```no_run
//! use drape_rs::mesh::gmsh::{read_msh, write_msh, MshVersion};
//! use std::path::Path;
//!
//! let mesh = read_msh(Path::new("surface.msh")).expect("Failed to read mesh");
//! write_msh(&mesh, Path::new("draped.msh"), MshVersion::V1).expect("Failed to write mesh");
//! ```

mod parser;
mod scanner;
mod writer;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use super::{MeshError, SurfaceMesh};

pub use parser::Parser;
pub use scanner::{Scanner, Token, TokenKind};
pub use writer::{write_msh, write_msh_to};

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be read or written.
    #[error("I/O error on mesh file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error on a caller-supplied stream.
    #[error("I/O error while writing mesh: {0}")]
    Stream(#[from] std::io::Error),

    /// No lexical rule matched.
    #[error("unexpected character '{character}' at line {line}")]
    Lexical { line: usize, character: char },

    /// A token of the wrong kind where a specific one was required.
    #[error("expected {expected} at line {line} but found {found}")]
    Syntax {
        line: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric token that does not fit the field it was read for.
    #[error("invalid number '{text}' at line {line}")]
    InvalidNumber { line: usize, text: String },

    /// A record identifier outside 1..=count.
    #[error("{section} index {index} out of bounds (count {count}) at line {line}")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        count: usize,
        line: usize,
    },

    /// The same identifier appears twice in a section.
    #[error("duplicate {section} index {index} at line {line}")]
    DuplicateIndex {
        section: &'static str,
        index: usize,
        line: usize,
    },

    /// A second node or element section.
    #[error("duplicate {section} section at line {line}")]
    DuplicateSection { section: &'static str, line: usize },

    /// A catalogued element type with the wrong number of nodes.
    #[error("element {element} of type {element_type} has {found} nodes, expected {expected}")]
    NodeCountMismatch {
        element: usize,
        element_type: u32,
        expected: usize,
        found: usize,
    },

    /// Node identifier 0 in an element record.
    #[error("element {element} references node 0 at line {line}")]
    ZeroNodeReference { element: usize, line: usize },

    /// The parsed data violates a mesh invariant.
    #[error(transparent)]
    InvalidMesh(#[from] MeshError),

    /// Unsupported or undetectable format version.
    #[error("unsupported or unknown MSH version: {0}")]
    UnsupportedVersion(String),

    /// A coordinate that cannot be written as a decimal literal.
    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate { node: usize },
}

/// Mesh format version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MshVersion {
    /// Legacy `$NOD`/`$ELM` format
    #[default]
    V1,
}

impl fmt::Display for MshVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MshVersion::V1 => f.write_str("1"),
        }
    }
}

impl FromStr for MshVersion {
    type Err = GmshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1.0" | "v1" => Ok(MshVersion::V1),
            other => Err(GmshError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// Detect the format version from the first token of `source`.
///
/// Any of the four v1 section tags identifies version 1.
pub fn detect_version(source: &str) -> Option<MshVersion> {
    sniff_version(&mut Scanner::new(source)).ok()
}

fn sniff_version(scanner: &mut Scanner<'_>) -> Result<MshVersion, GmshError> {
    let first = scanner.next_token(None);
    if first.kind.is_section_tag() {
        Ok(MshVersion::V1)
    } else {
        Err(GmshError::UnsupportedVersion(format!(
            "file starts with {} at line {}",
            first.kind, first.line
        )))
    }
}

/// Parse mesh text.
///
/// The version is sniffed from the first token, then the same scanner is
/// rewound and the whole text parsed.
pub fn parse_msh(source: &str) -> Result<SurfaceMesh, GmshError> {
    let mut scanner = Scanner::new(source);
    let version = sniff_version(&mut scanner)?;
    scanner.reset(source);
    match version {
        MshVersion::V1 => Parser::new(scanner).parse_v1(),
    }
}

/// Read a Gmsh mesh file.
///
/// # Returns
/// * `Ok(SurfaceMesh)` - The parsed mesh
/// * `Err(GmshError)` - If reading or parsing fails
pub fn read_msh(path: &Path) -> Result<SurfaceMesh, GmshError> {
    let source = fs::read_to_string(path).map_err(|source| GmshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_msh(&source)?;
    info!(
        path = %path.display(),
        nodes = mesh.n_nodes(),
        elements = mesh.n_elements(),
        "Read mesh"
    );
    Ok(mesh)
}
