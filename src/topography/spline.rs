//! Surface evaluators used for resampling.
//!
//! [`BicubicSpline`] is a tensor-product natural cubic spline: each grid row
//! is splined along x, and the row results at a given x are splined along y.
//! It interpolates the grid values exactly and reproduces bilinear surfaces.

use super::{TopographyGrid, find_interval};
use crate::types::Bounds2D;

/// A smooth surface that can be evaluated anywhere within its bounds.
pub trait SurfaceEvaluator {
    /// Region in which evaluation is defined.
    fn bounds(&self) -> Bounds2D;

    /// Surface value at `(x, y)`.
    ///
    /// Callers must stay within [`bounds`](Self::bounds); outside it the
    /// result is an extrapolation.
    fn evaluate(&self, x: f64, y: f64) -> f64;

    /// Values at every lattice point, row-major with `ys` as rows.
    fn evaluate_lattice(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        let mut values = Vec::with_capacity(xs.len() * ys.len());
        for &y in ys {
            for &x in xs {
                values.push(self.evaluate(x, y));
            }
        }
        values
    }
}

/// Natural cubic spline second derivatives at the knots.
///
/// Solves the tridiagonal system with the Thomas algorithm; end curvatures
/// are zero.
fn natural_curvature(knots: &[f64], values: &[f64]) -> Vec<f64> {
    let n = knots.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = knots[i] - knots[i - 1];
        let h1 = knots[i + 1] - knots[i];
        let rhs = 6.0 * ((values[i + 1] - values[i]) / h1 - (values[i] - values[i - 1]) / h0);
        let denom = 2.0 * (h0 + h1) - h0 * c_prime[i - 1];
        c_prime[i] = h1 / denom;
        d_prime[i] = (rhs - h0 * d_prime[i - 1]) / denom;
    }
    for i in (1..n - 1).rev() {
        m[i] = d_prime[i] - c_prime[i] * m[i + 1];
    }
    m
}

/// Evaluate a cubic spline given its knots, values and curvatures.
fn eval_cubic(knots: &[f64], values: &[f64], curvature: &[f64], t: f64) -> f64 {
    let last = knots.len() - 1;
    let i = find_interval(knots, t).unwrap_or(if t < knots[0] { 0 } else { last - 1 });
    let h = knots[i + 1] - knots[i];
    let a = (knots[i + 1] - t) / h;
    let b = (t - knots[i]) / h;
    a * values[i]
        + b * values[i + 1]
        + ((a * a * a - a) * curvature[i] + (b * b * b - b) * curvature[i + 1]) * h * h / 6.0
}

/// Natural bicubic spline fitted to a [`TopographyGrid`].
#[derive(Clone, Debug)]
pub struct BicubicSpline<'a> {
    grid: &'a TopographyGrid,
    /// Per-row x curvatures, row-major like the grid values
    row_curvature: Vec<f64>,
}

impl<'a> BicubicSpline<'a> {
    /// Fit the spline to every row of the grid.
    pub fn new(grid: &'a TopographyGrid) -> Self {
        let mut row_curvature = Vec::with_capacity(grid.values().len());
        for iy in 0..grid.ny() {
            row_curvature.extend(natural_curvature(grid.x_axis(), grid.row(iy)));
        }
        Self {
            grid,
            row_curvature,
        }
    }

    /// Row splines evaluated at `x`, one value per y sample.
    fn column_at(&self, x: f64) -> Vec<f64> {
        let nx = self.grid.nx();
        (0..self.grid.ny())
            .map(|iy| {
                eval_cubic(
                    self.grid.x_axis(),
                    self.grid.row(iy),
                    &self.row_curvature[iy * nx..(iy + 1) * nx],
                    x,
                )
            })
            .collect()
    }
}

impl SurfaceEvaluator for BicubicSpline<'_> {
    fn bounds(&self) -> Bounds2D {
        self.grid.bounds()
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        let column = self.column_at(x);
        let curvature = natural_curvature(self.grid.y_axis(), &column);
        eval_cubic(self.grid.y_axis(), &column, &curvature, y)
    }

    /// Column-wise evaluation: the y spline is fitted once per target x.
    fn evaluate_lattice(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        let nx = xs.len();
        let mut values = vec![0.0; nx * ys.len()];
        for (i, &x) in xs.iter().enumerate() {
            let column = self.column_at(x);
            let curvature = natural_curvature(self.grid.y_axis(), &column);
            for (j, &y) in ys.iter().enumerate() {
                values[j * nx + i] = eval_cubic(self.grid.y_axis(), &column, &curvature, y);
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bilinear_grid() -> TopographyGrid {
        let x = vec![0.0, 1.0, 2.5, 4.0];
        let y = vec![-1.0, 0.0, 2.0];
        let mut values = Vec::new();
        for &yj in &y {
            for &xi in &x {
                values.push(3.0 + 2.0 * xi - yj + 0.5 * xi * yj);
            }
        }
        TopographyGrid::new(x, y, values).unwrap()
    }

    #[test]
    fn test_interpolates_grid_values() {
        let grid = bilinear_grid();
        let spline = BicubicSpline::new(&grid);
        for (iy, &y) in grid.y_axis().iter().enumerate() {
            for (ix, &x) in grid.x_axis().iter().enumerate() {
                assert_relative_eq!(spline.evaluate(x, y), grid.value(ix, iy), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_reproduces_bilinear_surface() {
        let grid = bilinear_grid();
        let spline = BicubicSpline::new(&grid);
        for &(x, y) in &[(0.3, -0.7), (1.7, 1.1), (3.9, 1.99), (2.5, 0.5)] {
            let expected = 3.0 + 2.0 * x - y + 0.5 * x * y;
            assert_relative_eq!(spline.evaluate(x, y), expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lattice_matches_pointwise() {
        let grid = bilinear_grid();
        let spline = BicubicSpline::new(&grid);
        let xs = [0.0, 0.9, 2.0, 4.0];
        let ys = [-1.0, 0.25, 2.0];
        let lattice = spline.evaluate_lattice(&xs, &ys);
        for (j, &y) in ys.iter().enumerate() {
            for (i, &x) in xs.iter().enumerate() {
                assert_relative_eq!(lattice[j * xs.len() + i], spline.evaluate(x, y));
            }
        }
    }

    #[test]
    fn test_natural_curvature_of_parabola_samples() {
        // Symmetric data: middle curvature is the only unknown.
        let m = natural_curvature(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]);
        assert_eq!(m[0], 0.0);
        assert_eq!(m[2], 0.0);
        assert_relative_eq!(m[1], -3.0);
    }

    #[test]
    fn test_two_knots_is_linear() {
        let m = natural_curvature(&[0.0, 2.0], &[1.0, 5.0]);
        assert_eq!(m, vec![0.0, 0.0]);
        assert_relative_eq!(eval_cubic(&[0.0, 2.0], &[1.0, 5.0], &m, 0.5), 2.0);
    }
}
