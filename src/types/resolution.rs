//! Grid resolution type.

use std::fmt;

/// Number of grid samples along each axis of a topography grid.
///
/// Bilinear interpolation needs at least one interval per axis, so both
/// counts are at least 2.
///
/// # Example
///
/// ```
/// use drape_rs::types::Resolution2D;
///
/// let res = Resolution2D::new(100, 50);
/// assert_eq!(res.nx(), 100);
/// assert_eq!(res.ny(), 50);
/// assert!(Resolution2D::checked(1, 50).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution2D {
    /// Number of samples in x-direction
    nx: usize,
    /// Number of samples in y-direction
    ny: usize,
}

impl Resolution2D {
    /// Smallest admissible sample count along an axis.
    pub const MIN_SAMPLES: usize = 2;

    /// Create a new resolution.
    ///
    /// # Panics
    ///
    /// Panics if either `nx` or `ny` is below [`Self::MIN_SAMPLES`].
    pub fn new(nx: usize, ny: usize) -> Self {
        assert!(nx >= Self::MIN_SAMPLES, "nx must be at least 2, got {}", nx);
        assert!(ny >= Self::MIN_SAMPLES, "ny must be at least 2, got {}", ny);
        Self { nx, ny }
    }

    /// Create a resolution, returning `None` if either count is below 2.
    pub fn checked(nx: usize, ny: usize) -> Option<Self> {
        (nx >= Self::MIN_SAMPLES && ny >= Self::MIN_SAMPLES).then_some(Self { nx, ny })
    }

    /// Number of samples in x-direction.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of samples in y-direction.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }
}

impl fmt::Display for Resolution2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.nx, self.ny)
    }
}
