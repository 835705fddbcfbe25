//! Grid assembly from scattered samples.
//!
//! A scattered cloud is accepted if it is a complete rectangular lattice
//! listed in any order. After sorting by y then x, the row length is the
//! offset of the first sample whose x equals the first sample's x.

use tracing::debug;

use super::{TopographyError, TopographyGrid};

/// A single `(x, y, z)` elevation sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Assemble a grid from an unordered lattice of samples.
///
/// # Errors
///
/// - [`TopographyError::TooFewSamples`] for fewer than four samples
/// - [`TopographyError::NoRowRepeat`] if no x value repeats
/// - [`TopographyError::IncompleteLattice`] if the count is not a multiple
///   of the row length
/// - [`TopographyError::IrregularLattice`] if a sample is off the lattice
///
/// # Example
///
/// ```
/// use drape_rs::topography::{assemble_grid, Sample};
///
/// let samples = vec![
///     Sample::new(1.0, 1.0, 4.0),
///     Sample::new(0.0, 0.0, 1.0),
///     Sample::new(0.0, 1.0, 3.0),
///     Sample::new(1.0, 0.0, 2.0),
/// ];
/// let grid = assemble_grid(samples).unwrap();
/// assert_eq!(grid.values(), &[1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn assemble_grid(mut samples: Vec<Sample>) -> Result<TopographyGrid, TopographyError> {
    let n = samples.len();
    if n < 4 {
        return Err(TopographyError::TooFewSamples { found: n });
    }
    if let Some(index) = samples
        .iter()
        .position(|s| !(s.x.is_finite() && s.y.is_finite() && s.z.is_finite()))
    {
        return Err(TopographyError::NonFiniteSample { index });
    }

    samples.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let x0 = samples[0].x;
    let nx = samples
        .iter()
        .skip(1)
        .position(|s| s.x == x0)
        .map(|p| p + 1)
        .ok_or(TopographyError::NoRowRepeat)?;
    if n % nx != 0 {
        return Err(TopographyError::IncompleteLattice {
            samples: n,
            row_length: nx,
        });
    }
    let ny = n / nx;
    debug!(nx, ny, samples = n, "Detected topography lattice");

    let x: Vec<f64> = samples[..nx].iter().map(|s| s.x).collect();
    let y: Vec<f64> = samples.iter().step_by(nx).map(|s| s.y).collect();

    for (k, s) in samples.iter().enumerate() {
        if s.x != x[k % nx] || s.y != y[k / nx] {
            return Err(TopographyError::IrregularLattice { index: k });
        }
    }

    let values = samples.iter().map(|s| s.z).collect();
    TopographyGrid::new(x, y, values)
}
