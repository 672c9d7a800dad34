//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshError, MeshResult, MeshTopology, Triangle, Vertex, compute_bounding_box};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by 0-based index.
///
/// # Invariant
///
/// Every face index satisfies `index < vertices.len()`. The fields are
/// public for construction convenience, so consumers that accept meshes
/// from outside call [`IndexedMesh::validate`] before relying on it.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex data in index order.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as 0-based indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces without validating them.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from vertices and faces, checking index bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOutOfBounds`] for the first face that
    /// references a missing vertex.
    pub fn try_from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> MeshResult<Self> {
        let mesh = Self { vertices, faces };
        mesh.check_indices()?;
        Ok(mesh)
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// Trailing values that do not form a full triple are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self { vertices, faces }
    }

    /// Check that every face index refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOutOfBounds`] for the first bad index.
    pub fn check_indices(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfBounds {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Check that the mesh is non-empty and every index is in range.
    ///
    /// This is the precondition of every serializer.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyMesh`] when there are no vertices or no
    /// faces, and [`MeshError::IndexOutOfBounds`] for a dangling index.
    pub fn validate(&self) -> MeshResult<()> {
        if self.is_empty() {
            return Err(MeshError::empty(self.vertices.len(), self.faces.len()));
        }
        self.check_indices()
    }

    /// Check that no face repeats a vertex index.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateFace`] for the first degenerate face.
    pub fn check_degenerate(&self) -> MeshResult<()> {
        match self.degenerate_faces().next() {
            Some(face) => Err(MeshError::DegenerateFace {
                face,
                indices: self.faces[face],
            }),
            None => Ok(()),
        }
    }

    /// Positions of faces that reference fewer than three distinct vertices.
    pub fn degenerate_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| is_degenerate(**f))
            .map(|(i, _)| i)
    }
}

/// Check whether a face triple repeats a vertex index.
///
/// This is a topological check only; distinct vertices that happen to be
/// collinear are not considered degenerate here.
#[inline]
#[must_use]
pub const fn is_degenerate([a, b, c]: [u32; 3]) -> bool {
    a == b || b == c || a == c
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().filter_map(|&[i0, i1, i2]| {
            Some(Triangle {
                v0: self.vertices.get(i0 as usize)?.position,
                v1: self.vertices.get(i1 as usize)?.position,
                v2: self.vertices.get(i2 as usize)?.position,
            })
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounding_box(&self) -> MeshResult<Aabb> {
        compute_bounding_box(self)
    }
}

/// Create a unit cube mesh from (0,0,0) to (1,1,1).
///
/// Faces wind counter-clockwise when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let positions = [
        0.0, 0.0, 0.0, // 0
        1.0, 0.0, 0.0, // 1
        1.0, 1.0, 0.0, // 2
        0.0, 1.0, 0.0, // 3
        0.0, 0.0, 1.0, // 4
        1.0, 0.0, 1.0, // 5
        1.0, 1.0, 1.0, // 6
        0.0, 1.0, 1.0, // 7
    ];
    let indices = [
        0, 2, 1, 0, 3, 2, // bottom (-Z)
        4, 5, 6, 4, 6, 7, // top (+Z)
        0, 1, 5, 0, 5, 4, // front (-Y)
        3, 7, 6, 3, 6, 2, // back (+Y)
        0, 4, 7, 0, 7, 3, // left (-X)
        1, 2, 6, 1, 6, 5, // right (+X)
    ];
    IndexedMesh::from_raw(&positions, &indices)
}
