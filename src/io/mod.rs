//! I/O utilities for topography data files.
//!
//! This module provides:
//! - **Rectangular grids**: `nx ny` header, axes, then row-major elevations
//! - **Scattered points**: unordered `x y z` records assembled into a grid
//! - **Grid output**: writes the rectangular format, e.g. for resampled grids
//!
//! Mesh files are handled by [`crate::mesh::gmsh`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use drape_rs::io::{read_scattered_grid, write_grid};
//! use drape_rs::topography::resample;
//! use drape_rs::types::Resolution2D;
//!
//! let grid = read_scattered_grid(Path::new("survey.xyz")).unwrap();
//! let fine = resample(&grid, Resolution2D::new(400, 300)).unwrap();
//! write_grid(&fine, Path::new("survey_fine.txt")).unwrap();
//! ```

mod topography_reader;

pub use topography_reader::{
    TopographyFileError, parse_grid, parse_scattered, read_grid_file, read_scattered_file,
    read_scattered_grid, write_grid,
};
