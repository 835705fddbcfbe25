//! Gmsh v1 writer.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::{GmshError, MshVersion, TokenKind};
use crate::mesh::SurfaceMesh;

/// Coordinate formatting: integral values without a fractional part,
/// everything else with the shortest text that parses back to the same value.
struct Real(f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Write a mesh to a Gmsh file.
///
/// Nothing is written if the mesh has a non-finite coordinate.
///
/// # Arguments
/// * `mesh` - The mesh to write
/// * `path` - Output file path
/// * `version` - Format version to emit
pub fn write_msh(mesh: &SurfaceMesh, path: &Path, version: MshVersion) -> Result<(), GmshError> {
    check_finite(mesh)?;

    let io_error = |source| GmshError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    match write_msh_to(&mut writer, mesh, version) {
        Err(GmshError::Stream(source)) => return Err(io_error(source)),
        other => other?,
    }
    writer.flush().map_err(io_error)?;

    info!(
        path = %path.display(),
        nodes = mesh.n_nodes(),
        elements = mesh.n_elements(),
        "Wrote mesh"
    );
    Ok(())
}

/// Write a mesh to any byte sink.
///
/// Nodes are written before elements, each in the file order recorded
/// when the mesh was read.
pub fn write_msh_to<W: Write>(
    writer: &mut W,
    mesh: &SurfaceMesh,
    version: MshVersion,
) -> Result<(), GmshError> {
    check_finite(mesh)?;
    match version {
        MshVersion::V1 => write_v1(writer, mesh)?,
    }
    Ok(())
}

fn check_finite(mesh: &SurfaceMesh) -> Result<(), GmshError> {
    let bad = mesh
        .nodes()
        .iter()
        .position(|n| !(n.x.is_finite() && n.y.is_finite() && n.z.is_finite()));
    match bad {
        Some(index) => Err(GmshError::NonFiniteCoordinate { node: index + 1 }),
        None => Ok(()),
    }
}

fn write_v1<W: Write>(writer: &mut W, mesh: &SurfaceMesh) -> std::io::Result<()> {
    writeln!(writer, "{}", TokenKind::NodesStart)?;
    writeln!(writer, "{}", mesh.n_nodes())?;
    for &index in mesh.node_order() {
        let node = &mesh.nodes()[index];
        writeln!(
            writer,
            "{} {} {} {}",
            index.one_based(),
            Real(node.x),
            Real(node.y),
            Real(node.z)
        )?;
    }
    writeln!(writer, "{}", TokenKind::NodesEnd)?;

    writeln!(writer, "{}", TokenKind::ElementsStart)?;
    writeln!(writer, "{}", mesh.n_elements())?;
    for &index in mesh.element_order() {
        let elem = &mesh.elements()[index];
        write!(
            writer,
            "{} {} {} {} {}",
            index.one_based(),
            elem.element_type,
            elem.physical_region,
            elem.element_region,
            elem.nodes.len()
        )?;
        for node in &elem.nodes {
            write!(writer, " {}", node.one_based())?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "{}", TokenKind::ElementsEnd)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::gmsh::parse_msh;
    use crate::mesh::{Element, ElementType, Node};
    use crate::types::NodeIndex;

    fn to_text(mesh: &SurfaceMesh) -> String {
        let mut buf = Vec::new();
        write_msh_to(&mut buf, mesh, MshVersion::V1).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_real_formatting() {
        assert_eq!(Real(3.0).to_string(), "3");
        assert_eq!(Real(-718600.0).to_string(), "-718600");
        assert_eq!(Real(0.1).to_string(), "0.1");
        assert_eq!(Real(718753.02).to_string(), "718753.02");
        assert_eq!(Real(1e-7).to_string(), "0.0000001");
    }

    #[test]
    fn test_write_preserves_file_order() {
        let source = "$NOD\n3\n3 0 2 -1\n1 0 0 0.25\n2 1.5 0 0\n$ENDNOD\n\
                      $ELM\n2\n2 2 1 5 3 3 1 2\n1 15 1 1 1 2\n$ENDELM\n";
        let mesh = parse_msh(source).unwrap();
        assert_eq!(to_text(&mesh), source);
    }

    #[test]
    fn test_write_programmatic_mesh() {
        let nodes = vec![
            Node::new(0.0, 0.0, 0.0),
            Node::new(1.0, 0.0, 0.5),
            Node::new(0.0, 1.0, 0.0),
        ];
        let elements = vec![Element::new(
            ElementType::TRIANGLE_3,
            0,
            1,
            vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)],
        )];
        let mesh = SurfaceMesh::new(nodes, elements).unwrap();
        assert_eq!(
            to_text(&mesh),
            "$NOD\n3\n1 0 0 0\n2 1 0 0.5\n3 0 1 0\n$ENDNOD\n$ELM\n1\n1 2 0 1 3 1 2 3\n$ENDELM\n"
        );
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut mesh = SurfaceMesh::new(vec![Node::default(); 2], Vec::new()).unwrap();
        mesh.nodes_mut()[1].z = f64::NAN;
        let err = write_msh_to(&mut Vec::new(), &mesh, MshVersion::V1).unwrap_err();
        assert!(matches!(err, GmshError::NonFiniteCoordinate { node: 2 }));
    }

    #[test]
    fn test_write_file() {
        let mesh = SurfaceMesh::new(vec![Node::new(1.0, 2.0, 3.0)], Vec::new()).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_msh(&mesh, file.path(), MshVersion::V1).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "$NOD\n1\n1 1 2 3\n$ENDNOD\n$ELM\n0\n$ENDELM\n");
    }
}
