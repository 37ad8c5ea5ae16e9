//! Mesh topology queries.
//!
//! Walks the triangle and tetrahedron index buffers once at scene
//! setup and produces the unique edges and tetrahedra the solver turns
//! into constraints.

use std::collections::BTreeSet;

use crate::mesh::BodyMesh;

/// An unordered set of `N` vertex indices, stored sorted.
///
/// Two keys built from the same indices in any order compare and hash
/// equal, so `{a, b}` and `{b, a}` deduplicate to one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintKey<const N: usize>([u32; N]);

/// Key for an edge constraint.
pub type EdgeKey = ConstraintKey<2>;

/// Key for a tetrahedron constraint.
pub type TetKey = ConstraintKey<4>;

impl<const N: usize> ConstraintKey<N> {
    /// Creates a key from indices in any order.
    pub fn new(mut indices: [u32; N]) -> Self {
        indices.sort_unstable();
        Self(indices)
    }

    /// Returns the indices in ascending order.
    #[inline]
    pub fn indices(&self) -> [u32; N] {
        self.0
    }
}

/// The six edges of a tetrahedron, as positions into its index array.
const TET_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Precomputed constraint topology for a body mesh.
///
/// Built once when a scene is loaded. Both lists are sorted by key so
/// the result does not depend on the order triangles or tetrahedra
/// appear in the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Unique edges from triangle sides and tetrahedron edges.
    pub edges: Vec<EdgeKey>,

    /// Unique tetrahedra.
    pub tetrahedra: Vec<TetKey>,
}

impl Topology {
    /// Build topology from a body mesh.
    pub fn build(mesh: &BodyMesh) -> Self {
        let mut edges: BTreeSet<EdgeKey> = BTreeSet::new();
        let mut tetrahedra: BTreeSet<TetKey> = BTreeSet::new();

        for &[a, b, c] in &mesh.triangles {
            edges.insert(EdgeKey::new([a, b]));
            edges.insert(EdgeKey::new([b, c]));
            edges.insert(EdgeKey::new([c, a]));
        }

        for tet in &mesh.tetrahedra {
            tetrahedra.insert(TetKey::new(*tet));
            for (i, j) in TET_EDGES {
                edges.insert(EdgeKey::new([tet[i], tet[j]]));
            }
        }

        Self {
            edges: edges.into_iter().collect(),
            tetrahedra: tetrahedra.into_iter().collect(),
        }
    }

    /// Returns the number of unique edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of unique tetrahedra.
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }
}
