//! Boundary-preserving Laplacian smoothing of mesh faces.
//!
//! # Algorithm
//!
//! For each face:
//! 1. Build node adjacency from the drapable elements of the face. Every
//!    other node of an incident element is a neighbor; the distinct
//!    neighbors are kept along with the number of incident elements.
//! 2. Nodes whose distinct neighbor count equals their incident element
//!    count are free; all others are held fixed. In a triangulated face a
//!    node surrounded by a closed fan of `k` triangles has `k` neighbors,
//!    while a node on the face boundary has one neighbor more than it has
//!    triangles.
//! 3. Jacobi relaxation: each free node moves to the mean of its neighbors'
//!    positions from the previous iteration.
//! 4. The displacement metric `sqrt(Σ|d|²) / n_free` of the first iteration
//!    is the baseline. From the second iteration on, the pass stops once
//!    the metric drops below `tolerance × baseline`.

use tracing::{info, warn};

use crate::mesh::{Node, SurfaceMesh};
use crate::types::NodeIndex;

/// Iteration limits for a smoothing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingParams {
    /// Upper bound on relaxation sweeps
    pub max_iterations: usize,
    /// Convergence ratio relative to the first sweep
    pub tolerance: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 0.01,
        }
    }
}

/// Outcome of smoothing one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingReport {
    pub face: i32,
    /// Sweeps performed
    pub iterations: usize,
    pub converged: bool,
    /// Last metric divided by the first-sweep baseline
    pub ratio: f64,
    /// Free nodes moved in each sweep
    pub relaxed_nodes: usize,
}

#[derive(Clone, Debug, Default)]
struct NodeConnections {
    /// Distinct neighbors in first-seen order
    neighbors: Vec<NodeIndex>,
    /// Incident elements
    total: usize,
}

impl NodeConnections {
    fn clear(&mut self) {
        self.neighbors.clear();
        self.total = 0;
    }

    fn add(&mut self, node: NodeIndex) {
        if !self.neighbors.contains(&node) {
            self.neighbors.push(node);
        }
    }

    #[inline]
    fn is_interior(&self) -> bool {
        !self.neighbors.is_empty() && self.neighbors.len() == self.total
    }
}

/// Node adjacency restricted to one face.
///
/// Sized to the whole mesh once and rebuilt per face; neighbor lists keep
/// their capacity between rebuilds.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    connections: Vec<NodeConnections>,
}

impl Adjacency {
    /// Empty adjacency for a mesh with `n_nodes` nodes.
    pub fn new(n_nodes: usize) -> Self {
        Self {
            connections: vec![NodeConnections::default(); n_nodes],
        }
    }

    /// Rebuild from the drapable elements of `face`.
    ///
    /// Also marks the face's nodes in the mesh.
    pub fn rebuild(&mut self, mesh: &mut SurfaceMesh, face: i32) {
        self.connections
            .resize_with(mesh.n_nodes(), NodeConnections::default);
        self.connections.iter_mut().for_each(NodeConnections::clear);

        mesh.mark_face(face);
        for elem in mesh.face_elements(face) {
            for (i, &node) in elem.nodes.iter().enumerate() {
                let conns = &mut self.connections[node];
                conns.total += 1;
                for (j, &other) in elem.nodes.iter().enumerate() {
                    if i != j {
                        conns.add(other);
                    }
                }
            }
        }
    }

    /// Distinct neighbors of `node`.
    pub fn neighbors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.connections[node].neighbors
    }

    /// Number of face elements incident to `node`.
    pub fn total_connections(&self, node: NodeIndex) -> usize {
        self.connections[node].total
    }

    /// Whether `node` is free to move.
    pub fn is_interior(&self, node: NodeIndex) -> bool {
        self.connections[node].is_interior()
    }
}

fn neighbor_mean(snapshot: &[Node], neighbors: &[NodeIndex]) -> Node {
    let mut sum = Node::default();
    for &n in neighbors {
        let p = &snapshot[n];
        sum.x += p.x;
        sum.y += p.y;
        sum.z += p.z;
    }
    let count = neighbors.len() as f64;
    Node::new(sum.x / count, sum.y / count, sum.z / count)
}

/// Smooth one face using a caller-provided adjacency buffer.
pub fn smooth_face_with(
    mesh: &mut SurfaceMesh,
    face: i32,
    params: &SmoothingParams,
    adjacency: &mut Adjacency,
) -> SmoothingReport {
    adjacency.rebuild(mesh, face);
    let free: Vec<NodeIndex> = NodeIndex::iter(mesh.n_nodes())
        .filter(|&n| mesh.is_marked(n) && adjacency.is_interior(n))
        .collect();

    let mut report = SmoothingReport {
        face,
        iterations: 0,
        converged: false,
        ratio: 0.0,
        relaxed_nodes: free.len(),
    };

    let mut snapshot = mesh.nodes().to_vec();
    let mut baseline: Option<f64> = None;
    while report.iterations < params.max_iterations {
        report.iterations += 1;
        snapshot.copy_from_slice(mesh.nodes());

        let nodes = mesh.nodes_mut();
        let mut sum_sq = 0.0;
        for &n in &free {
            let mean = neighbor_mean(&snapshot, adjacency.neighbors(n));
            sum_sq += snapshot[n].distance_squared(&mean);
            nodes[n] = mean;
        }
        let metric = if free.is_empty() {
            0.0
        } else {
            sum_sq.sqrt() / free.len() as f64
        };

        match baseline {
            None if metric == 0.0 => {
                report.converged = true;
                break;
            }
            None => {
                baseline = Some(metric);
                report.ratio = 1.0;
            }
            Some(first) => {
                report.ratio = metric / first;
                if metric < params.tolerance * first {
                    report.converged = true;
                    break;
                }
            }
        }
    }

    if report.converged {
        info!(
            face,
            iterations = report.iterations,
            relaxed = report.relaxed_nodes,
            "Smoothing converged"
        );
    } else {
        warn!(
            face,
            iterations = report.iterations,
            ratio = report.ratio,
            "Smoothing did not converge"
        );
    }
    report
}

/// Smooth one face.
pub fn smooth_face(mesh: &mut SurfaceMesh, face: i32, params: &SmoothingParams) -> SmoothingReport {
    let mut adjacency = Adjacency::new(mesh.n_nodes());
    smooth_face_with(mesh, face, params, &mut adjacency)
}

/// Smooth several faces in order, sharing one adjacency buffer.
pub fn smooth_faces(
    mesh: &mut SurfaceMesh,
    faces: &[i32],
    params: &SmoothingParams,
) -> Vec<SmoothingReport> {
    let mut adjacency = Adjacency::new(mesh.n_nodes());
    faces
        .iter()
        .map(|&face| smooth_face_with(mesh, face, params, &mut adjacency))
        .collect()
}
