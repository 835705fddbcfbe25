//! Structured rectangular topography grid.

use super::TopographyError;
use crate::types::{Bounds2D, Resolution2D};

/// Locate the grid interval containing `value`.
///
/// Returns `i` such that `axis[i] <= value < axis[i + 1]`, with the last
/// grid line belonging to the last interval. Values outside
/// `[axis[0], axis[last]]` (and NaN) give `None`, as does an axis with
/// fewer than two samples.
///
/// # Example
///
/// ```
/// use drape_rs::topography::find_interval;
///
/// let axis = [718600.0, 718753.02, 718906.04];
/// assert_eq!(find_interval(&axis, 718600.0), Some(0));
/// assert_eq!(find_interval(&axis, 718800.0), Some(1));
/// assert_eq!(find_interval(&axis, 718906.04), Some(1));
/// assert_eq!(find_interval(&axis, 718599.0), None);
/// ```
pub fn find_interval(axis: &[f64], value: f64) -> Option<usize> {
    if axis.len() < 2 {
        return None;
    }
    let (first, last) = (axis[0], axis[axis.len() - 1]);
    if !(value >= first && value <= last) {
        return None;
    }
    let upper = axis.partition_point(|&a| a <= value);
    Some((upper - 1).min(axis.len() - 2))
}

/// Elevation samples on a rectilinear grid.
///
/// Values are stored row-major: row = y index, column = x index.
/// Both axes are strictly increasing and have at least two samples.
#[derive(Clone, Debug, PartialEq)]
pub struct TopographyGrid {
    x: Vec<f64>,
    y: Vec<f64>,
    values: Vec<f64>,
}

impl TopographyGrid {
    /// Create a grid, validating axes and value count.
    pub fn new(x: Vec<f64>, y: Vec<f64>, values: Vec<f64>) -> Result<Self, TopographyError> {
        check_axis("x", &x)?;
        check_axis("y", &y)?;

        let expected = x.len() * y.len();
        if values.len() != expected {
            return Err(TopographyError::ValueCountMismatch {
                expected,
                found: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(TopographyError::NonFiniteSample { index });
        }

        Ok(Self { x, y, values })
    }

    /// Number of samples along x.
    #[inline]
    pub fn nx(&self) -> usize {
        self.x.len()
    }

    /// Number of samples along y.
    #[inline]
    pub fn ny(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn resolution(&self) -> Resolution2D {
        Resolution2D::new(self.nx(), self.ny())
    }

    /// X-axis sample coordinates.
    #[inline]
    pub fn x_axis(&self) -> &[f64] {
        &self.x
    }

    /// Y-axis sample coordinates.
    #[inline]
    pub fn y_axis(&self) -> &[f64] {
        &self.y
    }

    /// Row-major elevation values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// One row of elevations (fixed y index).
    #[inline]
    pub fn row(&self, iy: usize) -> &[f64] {
        let nx = self.nx();
        &self.values[iy * nx..(iy + 1) * nx]
    }

    /// Elevation at column `ix`, row `iy`.
    #[inline]
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.nx() + ix]
    }

    /// Coordinate bounds spanned by the axes.
    pub fn bounds(&self) -> Bounds2D {
        Bounds2D::new(
            self.x[0],
            self.x[self.nx() - 1],
            self.y[0],
            self.y[self.ny() - 1],
        )
    }

    /// Cell `(ix, iy)` containing the point, or `None` outside the grid.
    #[inline]
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        Some((find_interval(&self.x, x)?, find_interval(&self.y, y)?))
    }
}

fn check_axis(axis: &'static str, samples: &[f64]) -> Result<(), TopographyError> {
    if samples.len() < Resolution2D::MIN_SAMPLES {
        return Err(TopographyError::AxisTooShort {
            axis,
            len: samples.len(),
        });
    }
    if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
        return Err(TopographyError::NonFiniteAxis { axis, index });
    }
    if let Some(index) = samples.windows(2).position(|w| w[1] <= w[0]) {
        return Err(TopographyError::NonMonotonicAxis {
            axis,
            index: index + 1,
        });
    }
    Ok(())
}
