//! Parameters for mesh generation.

use crate::error::{GenerateError, GenerateResult};

/// How the generator treats faces that repeat a vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Draw again until the face has three distinct indices.
    ///
    /// After `max_resample_attempts` draws the generator falls back to a
    /// deterministic distinct triple. Meshes with fewer than three vertices
    /// cannot have distinct triples; their faces are kept as drawn.
    #[default]
    Resample,

    /// Fail with [`MeshError::DegenerateFace`](mesh_types::MeshError::DegenerateFace)
    /// on the first degenerate face.
    Reject,

    /// Keep degenerate faces unchanged.
    Allow,
}

/// Parameters for mesh generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateParams {
    /// Exact number of vertices to produce. Must be positive.
    pub vertex_budget: usize,

    /// Exact number of faces to produce. Must be positive.
    pub face_budget: usize,

    /// Treatment of degenerate faces. Default: [`DegeneratePolicy::Resample`]
    pub degenerate_policy: DegeneratePolicy,

    /// Extra draws allowed per degenerate face before falling back.
    /// Default: 16
    pub max_resample_attempts: u32,
}

impl GenerateParams {
    /// Vertices generated per image pixel by [`Self::from_image_dimensions`].
    pub const VERTICES_PER_PIXEL: f64 = 0.1;

    /// Faces generated per vertex by [`Self::from_image_dimensions`].
    pub const FACES_PER_VERTEX: f64 = 1.8;

    /// Largest face budget whose index array is addressable.
    pub const MAX_FACE_BUDGET: usize = isize::MAX.unsigned_abs() / std::mem::size_of::<[u32; 3]>();

    /// Create params for an exact vertex and face budget.
    #[must_use]
    pub const fn new(vertex_budget: usize, face_budget: usize) -> Self {
        Self {
            vertex_budget,
            face_budget,
            degenerate_policy: DegeneratePolicy::Resample,
            max_resample_attempts: 16,
        }
    }

    /// Derive budgets from source image dimensions.
    ///
    /// One vertex per ten pixels and 1.8 faces per vertex, both rounded
    /// down. Tiny images yield a zero budget, which [`Self::validate`]
    /// rejects.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_generate::GenerateParams;
    ///
    /// let params = GenerateParams::from_image_dimensions(640, 480);
    /// assert_eq!(params.vertex_budget, 30_720);
    /// assert_eq!(params.face_budget, 55_296);
    /// ```
    #[must_use]
    pub fn from_image_dimensions(width: u32, height: u32) -> Self {
        // Integer arithmetic keeps floor() exact: 0.1 = 1/10, 1.8 = 9/5.
        let pixels = u64::from(width) * u64::from(height);
        let vertices = usize::try_from(pixels / 10).unwrap_or(usize::MAX);
        Self::new(vertices, Self::face_budget_for(vertices))
    }

    /// Faces paired with a vertex budget: 1.8 per vertex, rounded down.
    ///
    /// ```
    /// use mesh_generate::GenerateParams;
    ///
    /// assert_eq!(GenerateParams::face_budget_for(10), 18);
    /// assert_eq!(GenerateParams::face_budget_for(3), 5);
    /// ```
    #[must_use]
    pub const fn face_budget_for(vertex_budget: usize) -> usize {
        // Divide first for huge budgets so the product cannot overflow.
        if vertex_budget > usize::MAX / 9 {
            vertex_budget / 5 * 9
        } else {
            vertex_budget * 9 / 5
        }
    }

    /// Set the degenerate face policy.
    #[must_use]
    pub const fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Set the number of extra draws per degenerate face.
    #[must_use]
    pub const fn with_max_resample_attempts(mut self, attempts: u32) -> Self {
        self.max_resample_attempts = attempts;
        self
    }

    /// Check that both budgets are positive, that vertices are indexable by
    /// `u32` and that faces fit in an addressable array.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidBudget`] describing the first problem.
    pub fn validate(&self) -> GenerateResult<()> {
        let reason = if self.vertex_budget == 0 {
            Some("vertex budget must be positive")
        } else if self.face_budget == 0 {
            Some("face budget must be positive")
        } else if u32::try_from(self.vertex_budget).is_err() {
            Some("vertex budget exceeds the u32 index range")
        } else if self.face_budget > Self::MAX_FACE_BUDGET {
            Some("face budget exceeds the addressable face array")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GenerateError::InvalidBudget {
                vertices: self.vertex_budget,
                faces: self.face_budget,
                reason,
            }),
            None => Ok(()),
        }
    }
}
