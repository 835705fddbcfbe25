//! Integration tests for Gmsh v1 file I/O.
//!
//! These tests verify:
//! - Read-write-read reproduces the file's index enumeration and values
//! - Draped coordinates survive a write and re-read
//! - Format errors surface from `read_msh` with line information

use std::fs;
use std::io::Write;

use approx::assert_abs_diff_eq;
use drape_rs::geometry::{DrapeMode, drape_face};
use drape_rs::mesh::{GmshError, MshVersion, read_msh, write_msh};
use drape_rs::topography::TopographyGrid;
use drape_rs::{ElementType, NodeIndex};
use tempfile::{NamedTempFile, tempdir};

/// Two quads and a triangle, enumerated out of order.
const SKIN: &str = "$NOD
7
5 718753.02 6690100.5 -12.125
1 718600 6690000 -10
2 718753.02 6690000 -11.5
3 718906.04 6690000 -12
4 718600 6690100.5 -10.75
6 718906.04 6690100.5 -13
7 718906.04 6690201 0.1
$ENDNOD
$ELM
3
3 2 10 2 3 6 7 5
1 3 10 1 4 1 2 5 4
2 3 10 1 4 2 3 6 5
$ENDELM
";

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_read_write_reproduces_text() {
    let input = write_temp(SKIN);
    let mesh = read_msh(input.path()).unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("skin_out.msh");
    write_msh(&mesh, &out, MshVersion::V1).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), SKIN);
}

#[test]
fn test_round_trip_preserves_enumeration() {
    let input = write_temp(SKIN);
    let mesh = read_msh(input.path()).unwrap();
    assert_eq!(mesh.n_nodes(), 7);
    assert_eq!(mesh.n_elements(), 3);

    let dir = tempdir().unwrap();
    let out = dir.path().join("again.msh");
    write_msh(&mesh, &out, MshVersion::V1).unwrap();
    let again = read_msh(&out).unwrap();

    assert_eq!(again.node_order(), mesh.node_order());
    assert_eq!(again.element_order(), mesh.element_order());
    for (a, b) in mesh.nodes().iter().zip(again.nodes()) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
    }
    assert_eq!(again.elements(), mesh.elements());
}

#[test]
fn test_stored_by_identifier() {
    let input = write_temp(SKIN);
    let mesh = read_msh(input.path()).unwrap();

    let tri = &mesh.elements()[2];
    assert_eq!(tri.element_type, ElementType::TRIANGLE_3);
    assert_eq!(tri.physical_region, 10);
    assert_eq!(tri.element_region, 2);
    assert_eq!(
        tri.nodes,
        vec![NodeIndex::new(5), NodeIndex::new(6), NodeIndex::new(4)]
    );
    assert_eq!(mesh.nodes()[4].z, -12.125);
}

#[test]
fn test_draped_values_round_trip() {
    let input = write_temp(SKIN);
    let mut mesh = read_msh(input.path()).unwrap();
    let grid = TopographyGrid::new(
        vec![718600.0, 718753.02, 718906.04],
        vec![6690000.0, 6690201.0],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )
    .unwrap();

    let report = drape_face(&mut mesh, 1, &grid, DrapeMode::Add);
    assert_eq!(report.marked, 6);
    assert_eq!(report.skipped, 0);

    let dir = tempdir().unwrap();
    let out = dir.path().join("draped.msh");
    write_msh(&mesh, &out, MshVersion::V1).unwrap();
    let again = read_msh(&out).unwrap();

    for (a, b) in mesh.nodes().iter().zip(again.nodes()) {
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
    }
    // vertex of the grid: value added exactly
    assert_eq!(again.nodes()[0].z, -9.0);
    // region 2 only node is untouched
    assert_eq!(again.nodes()[6].z, 0.1);
}

#[test]
fn test_truncated_element_section() {
    let text = "$NOD\n3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n$ENDNOD\n$ELM\n2\n1 2 0 1 3 1 2 3\n$ENDELM\n";
    let input = write_temp(text);
    match read_msh(input.path()).unwrap_err() {
        GmshError::Syntax { line, found, .. } => {
            assert_eq!(line, 10);
            assert_eq!(found, "$ENDELM");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lexical_error_reports_line() {
    let input = write_temp("$NOD\n1\n1 0 0 0\n$ENDNOD\n$ELM\n1\n1 15 0 1 1 @\n$ENDELM\n");
    match read_msh(input.path()).unwrap_err() {
        GmshError::Lexical { line, character } => {
            assert_eq!(line, 7);
            assert_eq!(character, '@');
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unrecognized_version() {
    let input = write_temp("$MeshFormat\n2.2 0 8\n$EndMeshFormat\n");
    assert!(matches!(
        read_msh(input.path()),
        Err(GmshError::UnsupportedVersion(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = read_msh(&dir.path().join("absent.msh")).unwrap_err();
    assert!(matches!(err, GmshError::Io { .. }));
    assert!(err.to_string().contains("absent.msh"));
}
