//! # tessera-mesh
//!
//! Tetrahedral body meshes and the topology walk that turns them into
//! constraint sets.
//!
//! ## Key Types
//!
//! - [`BodyMesh`]: Vertex positions (with a transient hit flag in `w`),
//!   surface triangles, and tetrahedra.
//! - [`Topology`]: Deduplicated edges and tetrahedra keyed by
//!   [`ConstraintKey`].
//! - Procedural generators for test and benchmark bodies (cuboids,
//!   single tetrahedra).

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::BodyMesh;
pub use topology::{ConstraintKey, EdgeKey, TetKey, Topology};
