//! Mesh content sources.

use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies vertex positions and face index triples to the generator.
///
/// The generator calls [`next_vertex`](Self::next_vertex) once per vertex
/// and [`next_face`](Self::next_face) at least once per face, in order.
/// Implementations must return indices below `vertex_count`; the generator
/// reports a violation as an error rather than emitting a broken mesh.
pub trait MeshSource {
    /// Produce the next vertex position.
    fn next_vertex(&mut self) -> Point3<f64>;

    /// Produce the next face as 0-based indices below `vertex_count`.
    fn next_face(&mut self, vertex_count: u32) -> [u32; 3];
}

impl<S: MeshSource + ?Sized> MeshSource for &mut S {
    fn next_vertex(&mut self) -> Point3<f64> {
        (**self).next_vertex()
    }

    fn next_face(&mut self, vertex_count: u32) -> [u32; 3] {
        (**self).next_face(vertex_count)
    }
}

/// Uniform random mesh content.
///
/// Vertices are drawn with x, y in `[-1, 1]` and z in `[0, 1]`; face
/// indices uniformly from `[0, vertex_count)`. Seeded instances are fully
/// reproducible.
///
/// # Example
///
/// ```
/// use mesh_generate::{MeshSource, RandomSource};
///
/// let mut a = RandomSource::seeded(9);
/// let mut b = RandomSource::seeded(9);
/// assert_eq!(a.next_vertex(), b.next_vertex());
/// assert_eq!(a.next_face(10), b.next_face(10));
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a reproducible source from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a seeded source when a seed is given, otherwise an entropy one.
    #[must_use]
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl MeshSource for RandomSource {
    fn next_vertex(&mut self) -> Point3<f64> {
        Point3::new(
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(0.0..=1.0),
        )
    }

    fn next_face(&mut self, vertex_count: u32) -> [u32; 3] {
        if vertex_count == 0 {
            return [0; 3];
        }
        [
            self.rng.gen_range(0..vertex_count),
            self.rng.gen_range(0..vertex_count),
            self.rng.gen_range(0..vertex_count),
        ]
    }
}

/// Replays fixed vertex and face lists.
///
/// Both lists are cycled when the budget exceeds their length, and face
/// indices are reduced modulo the vertex count so every face stays in
/// range. Intended for deterministic tests.
///
/// # Example
///
/// ```
/// use mesh_generate::{FixtureSource, MeshSource};
/// use nalgebra::Point3;
///
/// let mut source = FixtureSource::new(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
///     vec![[0, 1, 5]],
/// );
/// assert_eq!(source.next_vertex(), Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(source.next_face(4), [0, 1, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
    vertex_cursor: usize,
    face_cursor: usize,
}

impl FixtureSource {
    /// Create a fixture from explicit vertex positions and faces.
    ///
    /// An empty vertex list yields the origin; an empty face list yields
    /// the fan `[0, 1, 2]` reduced to the vertex count.
    #[must_use]
    pub const fn new(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            vertex_cursor: 0,
            face_cursor: 0,
        }
    }

    /// Create a fixture that replays an existing mesh.
    #[must_use]
    pub fn from_mesh(mesh: &mesh_types::IndexedMesh) -> Self {
        Self::new(
            mesh.vertices.iter().map(|v| v.position).collect(),
            mesh.faces.clone(),
        )
    }
}

impl MeshSource for FixtureSource {
    fn next_vertex(&mut self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let vertex = self.vertices[self.vertex_cursor % self.vertices.len()];
        self.vertex_cursor += 1;
        vertex
    }

    fn next_face(&mut self, vertex_count: u32) -> [u32; 3] {
        let n = vertex_count.max(1);
        let face = if self.faces.is_empty() {
            [0, 1, 2]
        } else {
            self.faces[self.face_cursor % self.faces.len()]
        };
        self.face_cursor += 1;
        face.map(|i| i % n)
    }
}
