//! Integration tests for the configured drape pipeline.
//!
//! These tests verify:
//! - A TOML configuration drives read, drape, smooth and write
//! - Faces beyond the number of topography files reuse the last grid
//! - Interior face nodes relax while the face boundary stays fixed
//! - Failures leave no output file behind

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use drape_rs::config::DrapeConfig;
use drape_rs::mesh::{Node, read_msh};
use drape_rs::pipeline::{self, DrapeError};
use tempfile::tempdir;

/// Face 1 is a fan of eight triangles around the off-centre node 5;
/// face 2 is one triangle reaching outside the topography grid:
///
/// ```text
/// 7---8---9
/// | \ | / | \
/// 4---5---6--10
/// | / | \ |
/// 1---2---3
/// ```
const MESH: &str = "$NOD
10
1 0 0 0
2 10 0 0
3 20 0 0
4 0 10 0
5 13 6 0
6 20 10 0
7 0 20 0
8 10 20 0
9 20 20 0
10 30 20 5
$ENDNOD
$ELM
9
1 2 1 1 3 1 2 5
2 2 1 1 3 1 5 4
3 2 1 1 3 2 3 5
4 2 1 1 3 3 6 5
5 2 1 1 3 4 5 7
6 2 1 1 3 5 8 7
7 2 1 1 3 5 6 9
8 2 1 1 3 5 9 8
9 2 1 2 3 6 10 9
$ENDELM
";

fn setup(dir: &Path, config: &str) -> DrapeConfig {
    fs::write(dir.join("skin.msh"), MESH).unwrap();
    fs::write(dir.join("flat.txt"), "2 2\n0 20\n0 20\n1 1 1 1\n").unwrap();
    fs::write(
        dir.join("flat.xyz"),
        "20 20 2\n0 0 2\n20 0 2\n0 20 2\n",
    )
    .unwrap();
    let path = dir.join("drape.toml");
    fs::write(&path, config).unwrap();
    DrapeConfig::from_file(&path).unwrap()
}

#[test]
fn test_drape_and_smooth_face() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        r#"
mesh_in = "skin.msh"
mesh_out = "out/skin_draped.msh"
topography_files = ["flat.txt"]
topography_format = "grid"
drape_faces = [1]
smooth_faces = [1]
"#,
    );
    fs::create_dir(dir.path().join("out")).unwrap();

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.drape.len(), 1);
    assert_eq!(report.drape[0].marked, 9);
    assert_eq!(report.drape[0].draped, 9);

    let smoothing = report.smoothing[0];
    assert!(smoothing.converged);
    assert_eq!(smoothing.iterations, 2);
    assert_eq!(smoothing.relaxed_nodes, 1);

    let out = read_msh(&dir.path().join("out/skin_draped.msh")).unwrap();
    let nodes = out.nodes();
    // the fan centre moves to the mean of its ring
    assert_eq!(nodes[4], Node::new(10.0, 10.0, 1.0));
    // the face boundary stays where draping put it
    for k in [0, 1, 2, 3, 5, 6, 7, 8] {
        let expected = Node::new(10.0 * (k % 3) as f64, 10.0 * (k / 3) as f64, 1.0);
        assert_eq!(nodes[k], expected, "boundary node {} moved", k + 1);
    }
    // face 2 only
    assert_eq!(nodes[9], Node::new(30.0, 20.0, 5.0));
}

#[test]
fn test_faces_reuse_last_scattered_grid() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        r#"
mesh_in = "skin.msh"
mesh_out = "draped.msh"
topography_files = ["flat.xyz"]
drape_faces = [1, 2]

[resolution]
nx = 3
ny = 3
"#,
    );

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.drape.len(), 2);
    assert_eq!(report.drape[1].face, 2);
    assert_eq!(report.drape[1].marked, 3);
    // node 10 lies outside the grid
    assert_eq!(report.skipped_nodes(), 1);
    assert!(report.smoothing.is_empty());

    let out = read_msh(&dir.path().join("draped.msh")).unwrap();
    let z: Vec<f64> = out.nodes().iter().map(|n| n.z).collect();
    // nodes 6 and 9 belong to both faces
    let expected = [2.0, 2.0, 2.0, 2.0, 2.0, 4.0, 2.0, 2.0, 4.0, 5.0];
    for (z, e) in z.iter().zip(expected) {
        assert_relative_eq!(*z, e, epsilon = 1e-12);
    }
}

#[test]
fn test_replace_mode() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        r#"
mesh_in = "skin.msh"
mesh_out = "draped.msh"
topography_files = ["flat.txt"]
topography_format = "grid"
drape_faces = [2]
drape_mode = "replace"
"#,
    );

    pipeline::run(&config).unwrap();
    let out = read_msh(&dir.path().join("draped.msh")).unwrap();
    assert_eq!(out.nodes()[5].z, 1.0);
    assert_eq!(out.nodes()[8].z, 1.0);
    assert_eq!(out.nodes()[9].z, 5.0);
    assert_eq!(out.nodes()[0].z, 0.0);
}

#[test]
fn test_bad_topography_aborts_before_write() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        r#"
mesh_in = "skin.msh"
mesh_out = "draped.msh"
topography_files = ["missing.xyz"]
drape_faces = [1]
"#,
    );

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, DrapeError::TopographyFile(_)));
    assert!(err.to_string().contains("missing.xyz"));
    assert!(!dir.path().join("draped.msh").exists());
}

#[test]
fn test_malformed_mesh_aborts() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        "mesh_in = \"flat.txt\"\nmesh_out = \"draped.msh\"\n",
    );

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, DrapeError::Mesh(_)));
    assert!(!dir.path().join("draped.msh").exists());
}
