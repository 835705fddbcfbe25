//! Mesh geometry engine.
//!
//! Operates in place on a [`SurfaceMesh`](crate::mesh::SurfaceMesh):
//! - **Draping**: bilinear interpolation of a topography grid onto the nodes
//!   of selected faces
//! - **Smoothing**: Laplacian relaxation of face nodes with boundary nodes
//!   held fixed and a relative convergence test
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use drape_rs::geometry::{drape_faces, smooth_faces, DrapeMode, SmoothingParams};
//! use drape_rs::io::read_grid_file;
//! use drape_rs::mesh::read_msh;
//!
//! let mut mesh = read_msh(Path::new("surface.msh")).unwrap();
//! let grid = read_grid_file(Path::new("topo.txt")).unwrap();
//! drape_faces(&mut mesh, &[1, 2], &grid, DrapeMode::Add);
//! smooth_faces(&mut mesh, &[1], &SmoothingParams::default());
//! ```

mod drape;
mod smoothing;

pub use drape::{DrapeMode, DrapeReport, bilinear, drape_face, drape_faces};
pub use smoothing::{
    Adjacency, SmoothingParams, SmoothingReport, smooth_face, smooth_face_with, smooth_faces,
};
