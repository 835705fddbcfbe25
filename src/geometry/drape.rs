//! Draping topography onto mesh faces.
//!
//! Every node of a face is localized in the grid by interval search on each
//! axis and receives the bilinear (Q1) interpolation of the four corner
//! elevations of its cell. Nodes outside the grid are left untouched.

use serde::Deserialize;
use tracing::{debug, info};

use crate::mesh::SurfaceMesh;
use crate::topography::TopographyGrid;

/// How the interpolated elevation is combined with a node's z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrapeMode {
    /// z += h; the mesh z acts as a datum
    #[default]
    Add,
    /// z = h
    Replace,
}

impl DrapeMode {
    #[inline]
    fn apply(self, z: f64, h: f64) -> f64 {
        match self {
            DrapeMode::Add => z + h,
            DrapeMode::Replace => h,
        }
    }
}

/// Outcome of draping one face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrapeReport {
    /// Element-region tag of the face
    pub face: i32,
    /// Distinct nodes on the face
    pub marked: usize,
    /// Nodes that received an elevation
    pub draped: usize,
    /// Nodes outside the grid
    pub skipped: usize,
}

/// Bilinear interpolation of the grid at `(x, y)`.
///
/// Returns `None` outside the grid. At a grid vertex the result is that
/// vertex's value exactly.
///
/// # Example
///
/// ```
/// use drape_rs::geometry::bilinear;
/// use drape_rs::topography::TopographyGrid;
///
/// let grid = TopographyGrid::new(
///     vec![0.0, 2.0],
///     vec![0.0, 2.0],
///     vec![1.0, 3.0, 5.0, 7.0],
/// ).unwrap();
/// assert_eq!(bilinear(&grid, 0.0, 2.0), Some(5.0));
/// assert_eq!(bilinear(&grid, 1.0, 1.0), Some(4.0));
/// assert_eq!(bilinear(&grid, 3.0, 1.0), None);
/// ```
pub fn bilinear(grid: &TopographyGrid, x: f64, y: f64) -> Option<f64> {
    let (ix, iy) = grid.locate(x, y)?;
    let (xs, ys) = (grid.x_axis(), grid.y_axis());

    // Normalized cell coordinates in [-1, 1]
    let dx = xs[ix + 1] - xs[ix];
    let dy = ys[iy + 1] - ys[iy];
    let xi = 2.0 * ((x - xs[ix]) / dx) - 1.0;
    let eta = 2.0 * ((y - ys[iy]) / dy) - 1.0;

    let (s1, s2) = (1.0 - xi, 1.0 + xi);
    let (t1, t2) = (1.0 - eta, 1.0 + eta);

    // Counter-clockwise corners starting at (ix, iy)
    let h = grid.value(ix, iy) * (s1 * t1)
        + grid.value(ix + 1, iy) * (s2 * t1)
        + grid.value(ix + 1, iy + 1) * (s2 * t2)
        + grid.value(ix, iy + 1) * (s1 * t2);
    Some(0.25 * h)
}

/// Drape `grid` onto the nodes of `face`.
pub fn drape_face(
    mesh: &mut SurfaceMesh,
    face: i32,
    grid: &TopographyGrid,
    mode: DrapeMode,
) -> DrapeReport {
    let summary = mesh.mark_face(face);
    let mut report = DrapeReport {
        face,
        marked: summary.marked_nodes,
        ..DrapeReport::default()
    };

    let (nodes, marks) = mesh.nodes_and_marks_mut();
    for (node, _) in nodes.iter_mut().zip(marks).filter(|(_, marked)| **marked) {
        match bilinear(grid, node.x, node.y) {
            Some(h) => {
                node.z = mode.apply(node.z, h);
                report.draped += 1;
            }
            None => report.skipped += 1,
        }
    }

    if report.skipped > 0 {
        debug!(face, skipped = report.skipped, "Nodes outside topography grid left untouched");
    }
    info!(
        face,
        marked = report.marked,
        draped = report.draped,
        elements = summary.face_elements,
        "Draped face"
    );
    report
}

/// Drape the same grid onto several faces in order.
///
/// A node on more than one face is draped once per face.
pub fn drape_faces(
    mesh: &mut SurfaceMesh,
    faces: &[i32],
    grid: &TopographyGrid,
    mode: DrapeMode,
) -> Vec<DrapeReport> {
    faces
        .iter()
        .map(|&face| drape_face(mesh, face, grid, mode))
        .collect()
}
