//! 2D coordinate bounds of a topography grid.

use std::fmt;

/// Axis-aligned rectangular bounds in the horizontal plane.
///
/// # Example
///
/// ```
/// use drape_rs::types::Bounds2D;
///
/// let bounds = Bounds2D::new(718600.0, 718906.04, 6_690_000.0, 6_690_400.0);
///
/// assert!(bounds.contains(718753.02, 6_690_200.0));
/// assert!(!bounds.contains(718500.0, 6_690_200.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Minimum x-coordinate
    pub x_min: f64,
    /// Maximum x-coordinate
    pub x_max: f64,
    /// Minimum y-coordinate
    pub y_min: f64,
    /// Maximum y-coordinate
    pub y_max: f64,
}

impl Bounds2D {
    /// Create new bounds.
    ///
    /// # Panics
    ///
    /// Panics if `x_max <= x_min` or `y_max <= y_min`.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        assert!(
            x_max > x_min,
            "x_max ({}) must be greater than x_min ({})",
            x_max,
            x_min
        );
        assert!(
            y_max > y_min,
            "y_max ({}) must be greater than y_min ({})",
            y_max,
            y_min
        );

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Check if a point is inside the bounds (inclusive).
    ///
    /// NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// `n` evenly spaced samples from `x_min` to `x_max`, both ends included.
    ///
    /// The last sample is exactly `x_max` so that it never falls outside
    /// the bounds through rounding.
    pub fn subdivide_x(&self, n: usize) -> Vec<f64> {
        subdivide(self.x_min, self.x_max, n)
    }

    /// `n` evenly spaced samples from `y_min` to `y_max`, both ends included.
    pub fn subdivide_y(&self, n: usize) -> Vec<f64> {
        subdivide(self.y_min, self.y_max, n)
    }
}

fn subdivide(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut samples: Vec<f64> = (0..n).map(|i| min + i as f64 * step).collect();
            samples[n - 1] = max;
            samples
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}] × [{:.2}, {:.2}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let b = Bounds2D::new(0.0, 100.0, 0.0, 50.0);
        assert!(b.contains(50.0, 25.0));
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(100.0, 50.0));
        assert!(!b.contains(-1.0, 25.0));
        assert!(!b.contains(50.0, 51.0));
        assert!(!b.contains(f64::NAN, 25.0));
    }

    #[test]
    fn test_subdivide_includes_both_ends() {
        let b = Bounds2D::new(0.1, 0.7, -3.0, 3.0);
        let xs = b.subdivide_x(7);
        assert_eq!(xs.len(), 7);
        assert_eq!(xs[0], 0.1);
        assert_eq!(xs[6], 0.7);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));

        let ys = b.subdivide_y(3);
        assert_eq!(ys, vec![-3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_display() {
        let b = Bounds2D::new(0.0, 1.0, 2.0, 3.0);
        assert_eq!(format!("{}", b), "[0.00, 1.00] × [2.00, 3.00]");
    }

    #[test]
    #[should_panic(expected = "x_max")]
    fn test_invalid_x() {
        Bounds2D::new(100.0, 0.0, 0.0, 50.0);
    }

    #[test]
    #[should_panic(expected = "y_max")]
    fn test_invalid_y() {
        Bounds2D::new(0.0, 100.0, 50.0, 0.0);
    }
}
