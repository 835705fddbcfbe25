//! Resampling a grid to a new resolution.

use tracing::info;

use super::{BicubicSpline, SurfaceEvaluator, TopographyError, TopographyGrid};
use crate::types::Resolution2D;

/// Resample `grid` onto a uniform lattice spanning its bounds.
///
/// New axes run from the minimum to the maximum of the original axes with
/// `resolution` samples each, both ends included. Elevations come from a
/// natural bicubic spline fitted to the original grid.
///
/// # Example
///
/// ```
/// use drape_rs::topography::{resample, TopographyGrid};
/// use drape_rs::types::Resolution2D;
///
/// let grid = TopographyGrid::new(
///     vec![0.0, 1.0],
///     vec![0.0, 1.0],
///     vec![0.0, 1.0, 2.0, 3.0],
/// ).unwrap();
/// let fine = resample(&grid, Resolution2D::new(3, 3)).unwrap();
/// assert_eq!(fine.x_axis(), &[0.0, 0.5, 1.0]);
/// assert!((fine.value(1, 1) - 1.5).abs() < 1e-12);
/// ```
pub fn resample(
    grid: &TopographyGrid,
    resolution: Resolution2D,
) -> Result<TopographyGrid, TopographyError> {
    let bounds = grid.bounds();
    let xs = bounds.subdivide_x(resolution.nx());
    let ys = bounds.subdivide_y(resolution.ny());

    let spline = BicubicSpline::new(grid);
    let resampled = resample_with(&spline, xs, ys)?;
    info!(
        from = %grid.resolution(),
        to = %resolution,
        bounds = %bounds,
        "Resampled topography"
    );
    Ok(resampled)
}

/// Evaluate `evaluator` on the lattice `xs × ys`.
///
/// Every lattice point must lie within the evaluator's bounds; the first
/// one that does not is reported before any evaluation takes place.
pub fn resample_with<E: SurfaceEvaluator + ?Sized>(
    evaluator: &E,
    xs: Vec<f64>,
    ys: Vec<f64>,
) -> Result<TopographyGrid, TopographyError> {
    let bounds = evaluator.bounds();
    for &y in &ys {
        for &x in &xs {
            if !bounds.contains(x, y) {
                return Err(TopographyError::OutsideGrid { x, y });
            }
        }
    }

    let values = evaluator.evaluate_lattice(&xs, &ys);
    TopographyGrid::new(xs, ys, values)
}
