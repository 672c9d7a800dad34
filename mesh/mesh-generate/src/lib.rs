//! Budgeted triangle mesh generation.
//!
//! This crate builds an [`IndexedMesh`](mesh_types::IndexedMesh) with an
//! exact number of vertices and faces. Mesh content comes from a
//! [`MeshSource`], so the same generator drives both the seeded random
//! source used in production and fixed fixtures used in tests.
//!
//! # Guarantees
//!
//! - Exactly `vertex_budget` vertices and `face_budget` faces
//! - Every face index lies in `[0, vertex_budget)`
//! - Degenerate faces are handled by a [`DegeneratePolicy`]
//! - The same seed always yields the same mesh
//!
//! # Example
//!
//! ```
//! use mesh_generate::{generate_seeded, GenerateParams, MeshGenerator, RandomSource};
//! use mesh_types::MeshTopology;
//!
//! // Quick path: a reproducible mesh from a seed
//! let mesh = generate_seeded(4, 2, 42).unwrap();
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.face_count(), 2);
//!
//! // Full control: explicit source and params
//! let mut generator = MeshGenerator::new(RandomSource::seeded(7));
//! let result = generator.generate(&GenerateParams::new(100, 180)).unwrap();
//! println!("{result}");
//! ```
//!
//! # Reference Domain
//!
//! [`RandomSource`] draws x and y uniformly from `[-1, 1]` and z from
//! `[0, 1]`, and face indices uniformly from `[0, vertex_budget)`.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod generate;
mod params;
mod result;
mod source;

pub use error::{GenerateError, GenerateResult};
pub use generate::{MeshGenerator, generate, generate_seeded, generate_with};
pub use params::{DegeneratePolicy, GenerateParams};
pub use result::GenerationResult;
pub use source::{FixtureSource, MeshSource, RandomSource};
