//! Topography grid model.
//!
//! Provides:
//! - [`TopographyGrid`], a rectilinear elevation grid with strictly
//!   increasing axes and row-major values
//! - [`find_interval`], the binary search used to localize points in a grid
//! - Assembly of a grid from an unordered lattice of scattered samples
//! - Resampling to a new resolution through a [`SurfaceEvaluator`]

mod assembly;
mod grid;
mod resample;
mod spline;

use thiserror::Error;

pub use assembly::{Sample, assemble_grid};
pub use grid::{TopographyGrid, find_interval};
pub use resample::{resample, resample_with};
pub use spline::{BicubicSpline, SurfaceEvaluator};

/// Error type for grid construction, assembly and resampling.
#[derive(Debug, Error, PartialEq)]
pub enum TopographyError {
    /// Not enough samples for a 2×2 lattice.
    #[error("at least 4 samples are needed to assemble a grid, found {found}")]
    TooFewSamples { found: usize },

    /// No sample repeats the x coordinate of the first one.
    #[error("could not determine row length: no x value repeats")]
    NoRowRepeat,

    /// Sample count is not a multiple of the row length.
    #[error("{samples} samples do not form complete rows of {row_length}")]
    IncompleteLattice { samples: usize, row_length: usize },

    /// A sample does not lie on the lattice spanned by the first row and column.
    #[error("sample {index} does not lie on the grid lattice")]
    IrregularLattice { index: usize },

    /// An axis with fewer than two samples.
    #[error("{axis} axis has {len} samples, at least 2 are needed")]
    AxisTooShort { axis: &'static str, len: usize },

    /// An axis that is not strictly increasing.
    #[error("{axis} axis is not strictly increasing at sample {index}")]
    NonMonotonicAxis { axis: &'static str, index: usize },

    /// An axis coordinate that is NaN or infinite.
    #[error("{axis} axis sample {index} is not finite")]
    NonFiniteAxis { axis: &'static str, index: usize },

    /// Value count does not equal nx × ny.
    #[error("expected {expected} grid values, found {found}")]
    ValueCountMismatch { expected: usize, found: usize },

    /// A sample or grid value that is NaN or infinite.
    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// Evaluation requested outside the grid bounds.
    #[error("point ({x}, {y}) lies outside the topography grid")]
    OutsideGrid { x: f64, y: f64 },
}
