//! # drape-rs
//!
//! Drape topography onto finite-element surface meshes.
//!
//! This crate provides:
//! - Gmsh v1 mesh reading and writing (scanner, parser, writer)
//! - Topography grids assembled from scattered samples, with bicubic resampling
//! - Bilinear draping of grid elevations onto selected mesh faces
//! - Boundary-preserving Laplacian smoothing of mesh faces
//! - A TOML-configured pipeline driving the above
//!
//! # Example
//!
//! ```no_run
//! use drape_rs::{DrapeConfig, pipeline};
//!
//! let config = DrapeConfig::from_file("drape.toml").unwrap();
//! let report = pipeline::run(&config).unwrap();
//! assert!(report.all_converged());
//! ```

pub mod config;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod pipeline;
pub mod topography;
pub mod types;

// Re-export main types for convenience
pub use config::{ConfigError, DrapeConfig, TopographyFormat};
pub use geometry::{DrapeMode, DrapeReport, SmoothingParams, SmoothingReport};
pub use mesh::{Element, ElementType, GmshError, MshVersion, Node, SurfaceMesh};
pub use pipeline::{DrapeError, PipelineReport};
pub use topography::{TopographyError, TopographyGrid};
pub use types::{Bounds2D, ElementIndex, NodeIndex, Resolution2D};
