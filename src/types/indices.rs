//! Strongly-typed index newtypes.
//!
//! Mesh files enumerate nodes and elements with 1-based identifiers while the
//! in-memory store is dense and 0-based. These types keep the two apart and
//! prevent node indices from being used where element indices are expected.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new (0-based) index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Convert a 1-based file identifier into a 0-based index.
            ///
            /// Returns `None` for identifier 0, which has no 0-based counterpart.
            #[inline]
            pub const fn from_one_based(id: usize) -> Option<Self> {
                match id.checked_sub(1) {
                    Some(index) => Some(Self(index)),
                    None => None,
                }
            }

            /// Get the raw 0-based index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// The 1-based identifier used in mesh files.
            #[inline]
            pub const fn one_based(self) -> usize {
                self.0 + 1
            }

            /// Iterate over [0, n).
            pub fn iter(n: usize) -> impl ExactSizeIterator<Item = $name> {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        // Allow using as array index
        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }
    };
}

define_index!(
    /// Node index in a surface mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use drape_rs::types::NodeIndex;
    ///
    /// let node = NodeIndex::from_one_based(4).unwrap();
    /// assert_eq!(node.get(), 3);
    /// assert_eq!(node.one_based(), 4);
    /// ```
    NodeIndex,
    "N"
);

define_index!(
    /// Element index in a surface mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use drape_rs::types::ElementIndex;
    ///
    /// let elem = ElementIndex::new(42);
    /// assert_eq!(elem.get(), 42);
    /// ```
    ElementIndex,
    "E"
);
