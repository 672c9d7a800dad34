//! Budgeted mesh generation.

use mesh_types::{IndexedMesh, MeshError, Vertex, is_degenerate};
use tracing::{debug, info, warn};

use crate::error::{GenerateError, GenerateResult};
use crate::params::{DegeneratePolicy, GenerateParams};
use crate::result::GenerationResult;
use crate::source::{MeshSource, RandomSource};

/// Builds meshes from a [`MeshSource`].
///
/// The generator owns its source, so consecutive calls continue the same
/// random stream. Build a fresh generator per request when requests must
/// not influence each other.
///
/// # Example
///
/// ```
/// use mesh_generate::{FixtureSource, GenerateParams, MeshGenerator};
/// use nalgebra::Point3;
///
/// let source = FixtureSource::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let result = MeshGenerator::new(source)
///     .generate(&GenerateParams::new(3, 1))
///     .unwrap();
/// assert_eq!(result.mesh.faces, vec![[0, 1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct MeshGenerator<S> {
    source: S,
}

impl<S: MeshSource> MeshGenerator<S> {
    /// Create a generator drawing from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Give back the source, e.g. to inspect a fixture's progress.
    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Generate a mesh with exactly the budgeted vertex and face counts.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidBudget`](crate::GenerateError::InvalidBudget)
    ///   if a budget is zero or too large
    /// - [`MeshError::DegenerateFace`] under [`DegeneratePolicy::Reject`]
    /// - [`MeshError::IndexOutOfBounds`] if the source hands out an index
    ///   outside `[0, vertex_budget)`
    pub fn generate(&mut self, params: &GenerateParams) -> GenerateResult<GenerationResult> {
        params.validate()?;

        info!(
            vertices = params.vertex_budget,
            faces = params.face_budget,
            policy = ?params.degenerate_policy,
            "Generating mesh"
        );

        let mut mesh = reserve_mesh(params)?;
        for _ in 0..params.vertex_budget {
            mesh.vertices.push(Vertex::new(self.source.next_vertex()));
        }

        // validate() guarantees the budget fits in u32.
        #[allow(clippy::cast_possible_truncation)]
        let vertex_count = params.vertex_budget as u32;

        let can_resample = vertex_count >= 3;
        if params.degenerate_policy == DegeneratePolicy::Resample && !can_resample {
            warn!(
                vertices = vertex_count,
                "Fewer than three vertices; every face will be degenerate"
            );
        }

        let mut resampled_faces = 0;
        let mut degenerate_faces = 0;

        for face_index in 0..params.face_budget {
            let mut face = self.source.next_face(vertex_count);
            check_face(face_index, face, vertex_count)?;

            if is_degenerate(face) {
                match params.degenerate_policy {
                    DegeneratePolicy::Allow => degenerate_faces += 1,
                    DegeneratePolicy::Reject => {
                        return Err(MeshError::DegenerateFace {
                            face: face_index,
                            indices: face,
                        }
                        .into());
                    }
                    DegeneratePolicy::Resample if !can_resample => degenerate_faces += 1,
                    DegeneratePolicy::Resample => {
                        face = self.resample(face_index, face, vertex_count, params)?;
                        resampled_faces += 1;
                    }
                }
            }

            mesh.faces.push(face);
        }

        debug!(
            resampled = resampled_faces,
            degenerate = degenerate_faces,
            "Mesh generation complete"
        );

        Ok(GenerationResult {
            mesh,
            resampled_faces,
            degenerate_faces,
        })
    }

    /// Redraw a degenerate face, falling back to a fixed distinct triple.
    fn resample(
        &mut self,
        face_index: usize,
        mut face: [u32; 3],
        vertex_count: u32,
        params: &GenerateParams,
    ) -> GenerateResult<[u32; 3]> {
        for _ in 0..params.max_resample_attempts {
            face = self.source.next_face(vertex_count);
            check_face(face_index, face, vertex_count)?;
            if !is_degenerate(face) {
                return Ok(face);
            }
        }

        Ok(fallback_face(face[0], vertex_count))
    }
}

/// Allocate the whole mesh up front, reporting a failed reservation as a budget error.
fn reserve_mesh(params: &GenerateParams) -> GenerateResult<IndexedMesh> {
    let too_large = |_| GenerateError::InvalidBudget {
        vertices: params.vertex_budget,
        faces: params.face_budget,
        reason: "budget exceeds available memory",
    };

    let mut mesh = IndexedMesh::new();
    mesh.vertices
        .try_reserve_exact(params.vertex_budget)
        .map_err(too_large)?;
    mesh.faces
        .try_reserve_exact(params.face_budget)
        .map_err(too_large)?;
    Ok(mesh)
}

/// Consecutive indices from `first`, distinct whenever `vertex_count >= 3`.
fn fallback_face(first: u32, vertex_count: u32) -> [u32; 3] {
    let n = u64::from(vertex_count);
    let a = u64::from(first);
    // Each value is reduced below vertex_count, so it fits in u32.
    #[allow(clippy::cast_possible_truncation)]
    let wrap = |offset: u64| ((a + offset) % n) as u32;
    [wrap(0), wrap(1), wrap(2)]
}

fn check_face(face: usize, indices: [u32; 3], vertex_count: u32) -> Result<(), MeshError> {
    match indices.iter().find(|&&i| i >= vertex_count) {
        Some(&index) => Err(MeshError::IndexOutOfBounds {
            face,
            index,
            vertex_count: vertex_count as usize,
        }),
        None => Ok(()),
    }
}

/// Generate a mesh with default params from an entropy-seeded source.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidBudget`](crate::GenerateError::InvalidBudget)
/// if either budget is zero.
///
/// # Example
///
/// ```
/// use mesh_generate::generate;
/// use mesh_types::MeshTopology;
///
/// let mesh = generate(10, 18).unwrap();
/// assert_eq!(mesh.vertex_count(), 10);
/// assert!(generate(0, 18).is_err());
/// ```
pub fn generate(vertex_budget: usize, face_budget: usize) -> GenerateResult<IndexedMesh> {
    generate_with(
        RandomSource::from_entropy(),
        &GenerateParams::new(vertex_budget, face_budget),
    )
    .map(GenerationResult::into_mesh)
}

/// Generate a reproducible mesh with default params.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidBudget`](crate::GenerateError::InvalidBudget)
/// if either budget is zero.
pub fn generate_seeded(
    vertex_budget: usize,
    face_budget: usize,
    seed: u64,
) -> GenerateResult<IndexedMesh> {
    generate_with(
        RandomSource::seeded(seed),
        &GenerateParams::new(vertex_budget, face_budget),
    )
    .map(GenerationResult::into_mesh)
}

/// Generate a mesh from an explicit source and params.
///
/// # Errors
///
/// See [`MeshGenerator::generate`].
pub fn generate_with<S: MeshSource>(
    source: S,
    params: &GenerateParams,
) -> GenerateResult<GenerationResult> {
    MeshGenerator::new(source).generate(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;
    use mesh_types::MeshTopology;
    use nalgebra::Point3;

    fn square_fixture(faces: Vec<[u32; 3]>) -> FixtureSource {
        FixtureSource::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces,
        )
    }

    /// Source whose faces ignore the vertex count.
    struct RogueSource;

    impl MeshSource for RogueSource {
        fn next_vertex(&mut self) -> Point3<f64> {
            Point3::origin()
        }

        fn next_face(&mut self, vertex_count: u32) -> [u32; 3] {
            [0, 1, vertex_count]
        }
    }

    #[test]
    fn test_exact_counts() {
        let mesh = generate_seeded(4, 2, 11).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_zero_budget_fails() {
        assert!(matches!(
            generate_seeded(0, 3, 1),
            Err(GenerateError::InvalidBudget { .. })
        ));
        assert!(matches!(
            generate_seeded(3, 0, 1),
            Err(GenerateError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn test_oversized_face_budget_fails() {
        assert!(matches!(
            generate_seeded(3, usize::MAX / 2, 1),
            Err(GenerateError::InvalidBudget { .. })
        ));
        assert!(matches!(
            generate_seeded(3, GenerateParams::MAX_FACE_BUDGET + 1, 1),
            Err(GenerateError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn test_fallback_face_wraps_at_index_limit() {
        assert_eq!(fallback_face(u32::MAX - 1, u32::MAX), [u32::MAX - 1, 0, 1]);
        assert_eq!(fallback_face(u32::MAX - 2, u32::MAX), [u32::MAX - 2, u32::MAX - 1, 0]);
        assert_eq!(fallback_face(3, 4), [3, 0, 1]);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = generate_seeded(50, 90, 1234).unwrap();
        let b = generate_seeded(50, 90, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resample_removes_degenerates() {
        let source = square_fixture(vec![[0, 0, 1], [1, 2, 3]]);
        let result = generate_with(source, &GenerateParams::new(4, 1)).unwrap();
        assert_eq!(result.mesh.faces, vec![[1, 2, 3]]);
        assert_eq!(result.resampled_faces, 1);
        assert!(result.is_clean());
    }

    #[test]
    fn test_resample_falls_back_after_attempts() {
        let source = square_fixture(vec![[3, 3, 3]]);
        let params = GenerateParams::new(4, 2).with_max_resample_attempts(4);
        let result = generate_with(source, &params).unwrap();
        assert_eq!(result.mesh.faces, vec![[3, 0, 1], [3, 0, 1]]);
        assert_eq!(result.resampled_faces, 2);
        assert!(result.mesh.check_degenerate().is_ok());
    }

    #[test]
    fn test_reject_policy_fails_on_degenerate() {
        let source = square_fixture(vec![[0, 1, 2], [2, 2, 0]]);
        let params = GenerateParams::new(4, 2).with_degenerate_policy(DegeneratePolicy::Reject);
        let err = generate_with(source, &params).unwrap_err();
        assert_eq!(
            err,
            GenerateError::Mesh(MeshError::DegenerateFace {
                face: 1,
                indices: [2, 2, 0],
            })
        );
    }

    #[test]
    fn test_allow_policy_keeps_degenerates() {
        let source = square_fixture(vec![[1, 1, 1]]);
        let params = GenerateParams::new(4, 3).with_degenerate_policy(DegeneratePolicy::Allow);
        let result = generate_with(source, &params).unwrap();
        assert_eq!(result.degenerate_faces, 3);
        assert_eq!(result.resampled_faces, 0);
        assert_eq!(result.mesh.faces, vec![[1, 1, 1]; 3]);
    }

    #[test]
    fn test_tiny_vertex_budget_still_generates() {
        let mesh = generate_seeded(1, 3, 5).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.faces, vec![[0, 0, 0]; 3]);

        let result = generate_with(RandomSource::seeded(5), &GenerateParams::new(2, 4)).unwrap();
        assert_eq!(result.degenerate_faces, 4);
        assert!(result.mesh.validate().is_ok());
    }

    #[test]
    fn test_rogue_source_reported() {
        let err = generate_with(RogueSource, &GenerateParams::new(3, 1)).unwrap_err();
        assert_eq!(
            err,
            GenerateError::Mesh(MeshError::IndexOutOfBounds {
                face: 0,
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn test_generator_reuses_source_stream() {
        let mut generator = MeshGenerator::new(RandomSource::seeded(3));
        let first = generator.generate(&GenerateParams::new(5, 5)).unwrap();
        let second = generator.generate(&GenerateParams::new(5, 5)).unwrap();
        assert_ne!(first.mesh, second.mesh);
    }
}
