//! Core body mesh type.
//!
//! Vertices are stored as `Vec4`: `xyz` is the position and `w` is a
//! collision-hit flag written by the solver for the renderer. The flag
//! carries no physical meaning.

use serde::{Deserialize, Serialize};
use tessera_math::{Vec3, Vec4};
use tessera_types::{TesseraError, TesseraResult};

/// A tetrahedralized mesh owned by a single body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMesh {
    /// Vertex positions; `w` is the collision-hit flag (0 or 1).
    pub vertices: Vec<Vec4>,

    /// Surface triangles as local vertex indices.
    pub triangles: Vec<[u32; 3]>,

    /// Volume tetrahedra as local vertex indices.
    pub tetrahedra: Vec<[u32; 4]>,
}

impl BodyMesh {
    /// Builds a mesh from plain positions, clearing all hit flags.
    pub fn new(positions: &[Vec3], triangles: Vec<[u32; 3]>, tetrahedra: Vec<[u32; 4]>) -> Self {
        Self {
            vertices: positions.iter().map(|p| p.extend(0.0)).collect(),
            triangles,
            tetrahedra,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of surface triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Returns the position of vertex `i` without its hit flag.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.vertices[i].truncate()
    }

    /// Sets the position of vertex `i`, preserving its hit flag.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        let flag = self.vertices[i].w;
        self.vertices[i] = p.extend(flag);
    }

    /// Returns true if vertex `i` was corrected by collision response.
    #[inline]
    pub fn is_hit(&self, i: usize) -> bool {
        self.vertices[i].w != 0.0
    }

    /// Marks vertex `i` as corrected by collision response.
    #[inline]
    pub fn mark_hit(&mut self, i: usize) {
        self.vertices[i].w = 1.0;
    }

    /// Clears every hit flag.
    pub fn clear_hits(&mut self) {
        for v in &mut self.vertices {
            v.w = 0.0;
        }
    }

    /// Iterates over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.truncate())
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - The mesh has at least one vertex
    /// - All positions are finite
    /// - Triangle and tetrahedron indices are within bounds
    /// - No primitive repeats a vertex index
    pub fn validate(&self) -> TesseraResult<()> {
        let n = self.vertices.len();
        if n == 0 {
            return Err(TesseraError::InvalidMesh("Mesh has no vertices".into()));
        }

        if let Some(i) = self.vertices.iter().position(|v| !v.truncate().is_finite()) {
            return Err(TesseraError::InvalidMesh(format!(
                "Vertex {} has a non-finite position",
                i
            )));
        }

        for (t, tri) in self.triangles.iter().enumerate() {
            check_primitive("Triangle", t, tri, n)?;
        }
        for (t, tet) in self.tetrahedra.iter().enumerate() {
            check_primitive("Tetrahedron", t, tet, n)?;
        }

        Ok(())
    }
}

fn check_primitive(kind: &str, index: usize, verts: &[u32], vertex_count: usize) -> TesseraResult<()> {
    for &v in verts {
        if v as usize >= vertex_count {
            return Err(TesseraError::InvalidMesh(format!(
                "{} {} references vertex {} (vertex count: {})",
                kind, index, v, vertex_count
            )));
        }
    }
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            if verts[i] == verts[j] {
                return Err(TesseraError::InvalidMesh(format!(
                    "{} {} has repeated vertex indices: {:?}",
                    kind, index, verts
                )));
            }
        }
    }
    Ok(())
}
