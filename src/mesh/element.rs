//! Mesh elements and the Gmsh element-type catalogue.

use std::fmt;

use crate::types::NodeIndex;

/// Gmsh element type code.
///
/// Any integer read from a file is accepted and written back unchanged;
/// the associated constants name the codes the geometry engine knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ElementType(u32);

impl ElementType {
    /// 2-node line.
    pub const LINE_2: Self = Self(1);
    /// 3-node triangle.
    pub const TRIANGLE_3: Self = Self(2);
    /// 4-node quadrilateral.
    pub const QUADRANGLE_4: Self = Self(3);
    /// 4-node tetrahedron.
    pub const TETRAHEDRON_4: Self = Self(4);
    /// 8-node hexahedron.
    pub const HEXAHEDRON_8: Self = Self(5);
    /// 6-node prism.
    pub const PRISM_6: Self = Self(6);
    /// 5-node pyramid.
    pub const PYRAMID_5: Self = Self(7);
    /// 3-node second-order line.
    pub const LINE_3: Self = Self(8);
    /// 6-node second-order triangle.
    pub const TRIANGLE_6: Self = Self(9);
    /// 9-node second-order quadrilateral.
    pub const QUADRANGLE_9: Self = Self(10);
    /// 10-node second-order tetrahedron.
    pub const TETRAHEDRON_10: Self = Self(11);
    /// 27-node second-order hexahedron.
    pub const HEXAHEDRON_27: Self = Self(12);
    /// 18-node second-order prism.
    pub const PRISM_18: Self = Self(13);
    /// 14-node second-order pyramid.
    pub const PYRAMID_14: Self = Self(14);
    /// 1-node point.
    pub const POINT: Self = Self(15);
    /// 8-node serendipity quadrilateral.
    pub const QUADRANGLE_8: Self = Self(16);

    /// Wrap a raw type code.
    #[inline]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Raw type code as written in the file.
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Number of nodes an element of this type carries, if the type is catalogued.
    pub const fn node_count(self) -> Option<usize> {
        match self.0 {
            1 => Some(2),
            2 => Some(3),
            3 => Some(4),
            4 => Some(4),
            5 => Some(8),
            6 => Some(6),
            7 => Some(5),
            8 => Some(3),
            9 => Some(6),
            10 => Some(9),
            11 => Some(10),
            12 => Some(27),
            13 => Some(18),
            14 => Some(14),
            15 => Some(1),
            16 => Some(8),
            _ => None,
        }
    }

    /// Surface cells (linear and higher-order triangles and quadrilaterals).
    ///
    /// Only these take part in draping and smoothing.
    #[inline]
    pub const fn is_drapable(self) -> bool {
        matches!(self.0, 2 | 3 | 9 | 10 | 16)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementType {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// A mesh cell as stored in a Gmsh v1 element record.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Geometric type of the element
    pub element_type: ElementType,
    /// Tag of the physical region
    pub physical_region: i32,
    /// Tag of the element region; elements sharing it form a face
    pub element_region: i32,
    /// Ordered node references (0-based)
    pub nodes: Vec<NodeIndex>,
}

impl Element {
    /// Create a new element.
    pub fn new(
        element_type: ElementType,
        physical_region: i32,
        element_region: i32,
        nodes: Vec<NodeIndex>,
    ) -> Self {
        Self {
            element_type,
            physical_region,
            element_region,
            nodes,
        }
    }

    /// Whether this element is a drapable surface cell on the given face.
    #[inline]
    pub fn is_on_face(&self, face: i32) -> bool {
        self.element_type.is_drapable() && self.element_region == face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drapable_catalogue() {
        let drapable: Vec<u32> = (0..20)
            .filter(|&c| ElementType::new(c).is_drapable())
            .collect();
        assert_eq!(drapable, vec![2, 3, 9, 10, 16]);
    }

    #[test]
    fn test_node_counts() {
        assert_eq!(ElementType::TRIANGLE_3.node_count(), Some(3));
        assert_eq!(ElementType::QUADRANGLE_8.node_count(), Some(8));
        assert_eq!(ElementType::POINT.node_count(), Some(1));
        assert_eq!(ElementType::new(99).node_count(), None);
    }

    #[test]
    fn test_is_on_face() {
        let nodes = vec![NodeIndex::new(0), NodeIndex::new(1)];
        let line = Element::new(ElementType::LINE_2, 1, 7, nodes.clone());
        assert!(!line.is_on_face(7));

        let tri = Element::new(
            ElementType::TRIANGLE_3,
            1,
            7,
            vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)],
        );
        assert!(tri.is_on_face(7));
        assert!(!tri.is_on_face(8));
    }
}
