//! Traits for mesh types.

use crate::{Aabb, MeshResult, Triangle, Vertex};

/// Read access to a mesh's vertices and faces.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Get a face by index as a 0-based vertex index triple.
    ///
    /// Returns `None` if the index is out of bounds.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Iterate over all vertices in index order.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Iterate over faces with resolved positions.
    ///
    /// Faces with an out-of-range index are skipped; call
    /// [`IndexedMesh::validate`](crate::IndexedMesh::validate) first when
    /// every face must be accounted for.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that can report their axis-aligned bounding box.
pub trait MeshBounds {
    /// Compute the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyMesh`](crate::MeshError::EmptyMesh) when
    /// there are no vertices to bound.
    fn bounding_box(&self) -> MeshResult<Aabb>;
}
