//! Result type for mesh generation.

use mesh_types::{IndexedMesh, MeshTopology};

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The generated mesh.
    pub mesh: IndexedMesh,

    /// Faces that were drawn again because they repeated an index.
    pub resampled_faces: usize,

    /// Degenerate faces left in the output.
    pub degenerate_faces: usize,
}

impl GenerationResult {
    /// Check whether every face references three distinct vertices.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.degenerate_faces == 0
    }

    /// Consume the result, keeping only the mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }
}

impl std::fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generated {} vertices, {} faces ({} resampled, {} degenerate)",
            self.mesh.vertex_count(),
            self.mesh.face_count(),
            self.resampled_faces,
            self.degenerate_faces
        )
    }
}
