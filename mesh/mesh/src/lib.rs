//! Tetra mesh export toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency:
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Aabb`
//! - [`generate`] - Budgeted mesh generation with pluggable sources
//! - [`io`] - OBJ, STL and PLY serialization and parsing
//! - [`convert`] - The conversion service used by transports
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let mesh = generate_seeded(4, 2, 42).unwrap();
//! let bounds = compute_bounding_box(&mesh).unwrap();
//! assert!(bounds.min.z >= 0.0);
//!
//! let ply = serialize(&mesh, MeshFormat::Ply).unwrap();
//! assert!(String::from_utf8(ply).unwrap().contains("element face 2"));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Budgeted mesh generation.
pub use mesh_generate as generate;

/// OBJ, STL and PLY serialization and parsing.
pub use mesh_io as io;

/// Conversion service: generate, bound, serialize, store.
pub use mesh_convert as convert;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh export.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, IndexedMesh, MeshBounds, MeshTopology, Vertex, compute_bounding_box,
    };

    // Generation
    pub use mesh_generate::{DegeneratePolicy, GenerateParams, generate, generate_seeded};

    // Serialization
    pub use mesh_io::{ExportOptions, MeshFormat, load_mesh, save_mesh, serialize};

    // Conversion
    pub use mesh_convert::{ConversionRequest, ConvertConfig, Converter, FormatSelection};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(MeshFormat::ALL.len(), 3);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::IndexedMesh::new();
        let _ = generate::GenerateParams::new(1, 1);
        let _ = io::ExportOptions::default();
        let _ = convert::ConvertConfig::default();
    }
}
