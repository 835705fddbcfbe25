//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and structured types that keep node and
//! element indices apart and give grid extents named fields.
//!
//! # Example
//!
//! ```
//! use drape_rs::types::{Bounds2D, NodeIndex, Resolution2D};
//!
//! let bounds = Bounds2D::new(0.0, 100e3, 0.0, 50e3);
//! assert!(bounds.contains(50e3, 25e3));
//!
//! let res = Resolution2D::new(101, 51);
//! let xs = bounds.subdivide_x(res.nx());
//! assert_eq!(xs[1], 1e3);
//!
//! let node = NodeIndex::from_one_based(1).unwrap();
//! assert_eq!(node.get(), 0);
//! ```

mod bounds;
mod indices;
mod resolution;

pub use bounds::Bounds2D;
pub use indices::{ElementIndex, NodeIndex};
pub use resolution::Resolution2D;
