//! Mesh representation.
//!
//! Provides the surface mesh entity model used by the geometry engine:
//! - Nodes stored densely by 0-based index, with the file order kept apart
//! - Elements with a Gmsh type code, physical and element region tags
//! - A reusable per-node mark buffer for face selection
//! - Gmsh v1 mesh file I/O

mod element;
pub mod gmsh;
mod surface_mesh;

pub use element::{Element, ElementType};
pub use gmsh::{GmshError, MshVersion, read_msh, write_msh};
pub use surface_mesh::{FaceSummary, MeshError, Node, SurfaceMesh};
