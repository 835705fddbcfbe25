//! Surface mesh entity store.
//!
//! Nodes and elements are stored densely by 0-based index. A separate
//! emission-order sequence per entity kind records the identifiers in the
//! order they appeared in the source file, so the writer can reproduce that
//! order. Every emission-order entry is a valid index into the store and
//! every store index appears exactly once in emission order.

use thiserror::Error;

use super::element::Element;
use crate::types::{ElementIndex, NodeIndex};

/// Mesh node position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another node.
    #[inline]
    pub fn distance_squared(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Violations of the mesh store invariants.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// An element references a node that does not exist.
    #[error("element {element} references node {node} but the mesh has {node_count} nodes")]
    NodeReferenceOutOfRange {
        /// 1-based element identifier
        element: usize,
        /// 1-based node identifier
        node: usize,
        node_count: usize,
    },

    /// An emission-order sequence is not a permutation of the store.
    #[error("{section} order is not a permutation of 0..{count}")]
    InvalidOrder { section: &'static str, count: usize },
}

/// Statistics gathered while marking a face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceSummary {
    /// Element-region tag that was marked
    pub face: i32,
    /// Number of distinct nodes flagged
    pub marked_nodes: usize,
    /// Drapable elements on this face
    pub face_elements: usize,
    /// Drapable elements in the whole mesh
    pub drapable_elements: usize,
    /// Largest node count over all drapable elements
    pub max_element_nodes: usize,
}

/// Finite-element surface mesh read from a Gmsh v1 file.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    nodes: Vec<Node>,
    node_order: Vec<NodeIndex>,
    elements: Vec<Element>,
    element_order: Vec<ElementIndex>,
    /// Per-node scratch flags, sized lazily on first use
    mark: Vec<bool>,
}

impl SurfaceMesh {
    /// Build a mesh whose emission order equals storage order.
    pub fn new(nodes: Vec<Node>, elements: Vec<Element>) -> Result<Self, MeshError> {
        let node_order = NodeIndex::iter(nodes.len()).collect();
        let element_order = ElementIndex::iter(elements.len()).collect();
        Self::from_parts(nodes, node_order, elements, element_order)
    }

    /// Build a mesh from a store and explicit emission orders.
    ///
    /// Fails if either order is not a permutation of its store or if an
    /// element references a missing node.
    pub fn from_parts(
        nodes: Vec<Node>,
        node_order: Vec<NodeIndex>,
        elements: Vec<Element>,
        element_order: Vec<ElementIndex>,
    ) -> Result<Self, MeshError> {
        check_permutation("node", node_order.iter().map(|i| i.get()), nodes.len())?;
        check_permutation(
            "element",
            element_order.iter().map(|i| i.get()),
            elements.len(),
        )?;

        for (k, elem) in elements.iter().enumerate() {
            if let Some(bad) = elem.nodes.iter().find(|n| n.get() >= nodes.len()) {
                return Err(MeshError::NodeReferenceOutOfRange {
                    element: k + 1,
                    node: bad.one_based(),
                    node_count: nodes.len(),
                });
            }
        }

        Ok(Self {
            nodes,
            node_order,
            elements,
            element_order,
            mark: Vec::new(),
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Nodes in storage order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable node positions. Node identity cannot change through this view.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Elements in storage order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Node indices in file order.
    #[inline]
    pub fn node_order(&self) -> &[NodeIndex] {
        &self.node_order
    }

    /// Element indices in file order.
    #[inline]
    pub fn element_order(&self) -> &[ElementIndex] {
        &self.element_order
    }

    /// Drapable elements whose element region equals `face`.
    pub fn face_elements(&self, face: i32) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.is_on_face(face))
    }

    /// Flag every node of the drapable elements on `face`.
    ///
    /// Previous marks are cleared first. The returned summary also counts
    /// drapable elements across the whole mesh.
    pub fn mark_face(&mut self, face: i32) -> FaceSummary {
        self.reset_marks();

        let mut summary = FaceSummary {
            face,
            ..FaceSummary::default()
        };
        for elem in self.elements.iter().filter(|e| e.element_type.is_drapable()) {
            summary.drapable_elements += 1;
            summary.max_element_nodes = summary.max_element_nodes.max(elem.nodes.len());
            if elem.element_region != face {
                continue;
            }
            summary.face_elements += 1;
            for &node in &elem.nodes {
                if !self.mark[node] {
                    self.mark[node] = true;
                    summary.marked_nodes += 1;
                }
            }
        }
        summary
    }

    /// Whether `node` was flagged by the last [`mark_face`](Self::mark_face).
    #[inline]
    pub fn is_marked(&self, node: NodeIndex) -> bool {
        self.mark.get(node.get()).copied().unwrap_or(false)
    }

    /// Node positions together with the mark flags of the last marking pass.
    ///
    /// The flag slice is empty if no face has been marked yet.
    pub fn nodes_and_marks_mut(&mut self) -> (&mut [Node], &[bool]) {
        (&mut self.nodes, &self.mark)
    }

    fn reset_marks(&mut self) {
        if self.mark.len() == self.nodes.len() {
            self.mark.fill(false);
        } else {
            self.mark.clear();
            self.mark.resize(self.nodes.len(), false);
        }
    }
}

fn check_permutation(
    section: &'static str,
    order: impl ExactSizeIterator<Item = usize>,
    count: usize,
) -> Result<(), MeshError> {
    let err = MeshError::InvalidOrder { section, count };
    if order.len() != count {
        return Err(err);
    }
    let mut seen = vec![false; count];
    for i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(err),
        }
    }
    Ok(())
}
