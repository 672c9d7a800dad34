//! Error types for mesh invariants.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Violations of the indexed mesh invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The operation needs at least one vertex (and, for serialization, one face).
    #[error("mesh is empty: {vertices} vertices, {faces} faces")]
    EmptyMesh {
        /// Number of vertices in the mesh.
        vertices: usize,
        /// Number of faces in the mesh.
        faces: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Position of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face references fewer than three distinct vertices.
    #[error("face {face} is degenerate: {indices:?}")]
    DegenerateFace {
        /// Position of the offending face.
        face: usize,
        /// The face's vertex indices.
        indices: [u32; 3],
    },
}

impl MeshError {
    /// Create an `EmptyMesh` error from the observed counts.
    #[must_use]
    pub const fn empty(vertices: usize, faces: usize) -> Self {
        Self::EmptyMesh { vertices, faces }
    }
}
