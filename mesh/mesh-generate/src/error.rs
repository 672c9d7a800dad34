//! Error types for mesh generation.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Vertex or face budget is unusable.
    #[error("invalid budget: {vertices} vertices, {faces} faces ({reason})")]
    InvalidBudget {
        /// Requested vertex count.
        vertices: usize,
        /// Requested face count.
        faces: usize,
        /// Why the budget was rejected.
        reason: &'static str,
    },

    /// The generated faces violate a mesh invariant.
    ///
    /// Raised for degenerate faces under [`DegeneratePolicy::Reject`](crate::DegeneratePolicy::Reject)
    /// and for sources that hand out out-of-range indices.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result type for generation operations.
pub type GenerateResult<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenerateError::InvalidBudget {
            vertices: 0,
            faces: 5,
            reason: "vertex budget must be positive",
        };
        let msg = format!("{err}");
        assert!(msg.contains("0 vertices"));
        assert!(msg.contains("must be positive"));

        let err = GenerateError::from(MeshError::DegenerateFace {
            face: 3,
            indices: [1, 1, 0],
        });
        assert!(format!("{err}").contains("face 3 is degenerate"));
    }
}
