//! Core mesh types for the Tetra export toolkit.
//!
//! This crate provides the data model shared by the generator, the format
//! serializers and the conversion service:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with 0-based indexed faces
//! - [`Triangle`] - A face with resolved vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Indexing
//!
//! Faces are stored as `[u32; 3]` triples of **0-based** indices into the
//! vertex array. Formats that count from one (OBJ) shift the base when
//! writing, never when storing.
//!
//! # Example
//!
//! ```
//! use mesh_types::{compute_bounding_box, IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate().is_ok());
//!
//! let bounds = compute_bounding_box(&mesh).unwrap();
//! assert_eq!(bounds.max.x, 1.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod error;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::{Aabb, compute_bounding_box};
pub use error::{MeshError, MeshResult};
pub use mesh::{IndexedMesh, is_degenerate, unit_cube};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
