//! JSON payloads returned to clients.

use std::fmt::Display;
use std::path::PathBuf;

use mesh_io::MeshFormat;
use mesh_types::Aabb;
use serde::{Serialize, Serializer};

use crate::model_id::ModelId;
use crate::request::FormatSelection;
use crate::size::format_file_size;

fn display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Bounding box as `min` and `max` coordinate arrays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBoxDto {
    /// Smallest coordinate on each axis.
    pub min: [f64; 3],
    /// Largest coordinate on each axis.
    pub max: [f64; 3],
}

impl From<&Aabb> for BoundingBoxDto {
    fn from(aabb: &Aabb) -> Self {
        Self {
            min: aabb.min_array(),
            max: aabb.max_array(),
        }
    }
}

/// One serialized artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactFile {
    /// Artifact format.
    #[serde(serialize_with = "display")]
    pub format: MeshFormat,

    /// Download name, `<modelId>.<ext>`.
    pub file_name: String,

    /// Location on disk, absent when artifacts are not written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Exact size in bytes.
    pub size_bytes: u64,

    /// Human-readable size, e.g. `1.5 KB`.
    pub size: String,
}

impl ArtifactFile {
    /// Describe an artifact of `size_bytes` bytes.
    #[must_use]
    pub fn new(id: &ModelId, format: MeshFormat, size_bytes: u64, path: Option<PathBuf>) -> Self {
        Self {
            format,
            file_name: id.file_name(format),
            path,
            size_bytes,
            size: format_file_size(size_bytes),
        }
    }
}

/// Result of a conversion as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    /// Unique id of this conversion.
    pub model_id: ModelId,
    /// `tetra_3d_model_<modelId>`.
    pub model_name: String,
    /// Number of generated vertices.
    pub vertex_count: usize,
    /// Number of generated faces.
    pub face_count: usize,
    /// Requested format selection.
    pub format: FormatSelection,
    /// Extents of the generated vertices.
    pub bounding_box: BoundingBoxDto,
    /// Size of the first artifact in bytes.
    pub file_size_bytes: u64,
    /// Every artifact produced, in format order.
    pub files: Vec<ArtifactFile>,
}
