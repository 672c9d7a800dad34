//! Error types for the conversion service.

use std::path::PathBuf;

use mesh_generate::GenerateError;
use mesh_io::IoError;
use mesh_types::MeshError;
use serde::Serialize;
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while serving a conversion or artifact lookup.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Mesh generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Serialization failed or the format was rejected.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The generated mesh violated an invariant.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// An artifact could not be written.
    #[error("failed to write artifact {path}: {source}")]
    Artifact {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A model id did not have the `model_<32 hex digits>` shape.
    #[error("invalid model id: {value}")]
    InvalidModelId {
        /// The rejected value.
        value: String,
    },

    /// A download name was not of the form `<modelId>.<ext>`.
    #[error("invalid artifact name: {name}")]
    InvalidArtifactName {
        /// The rejected name.
        name: String,
    },

    /// No artifact exists under a well-formed name.
    #[error("artifact not found: {name}")]
    ArtifactNotFound {
        /// The requested name.
        name: String,
    },
}

/// Flat classification of [`ConvertError`] for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A budget was zero or too large.
    InvalidBudget,
    /// The format name is not `obj`, `stl`, `ply` or `all`.
    UnsupportedFormat,
    /// A mesh had no vertices or no faces.
    EmptyMesh,
    /// A face repeated a vertex index.
    DegenerateFace,
    /// A face referenced a missing vertex.
    IndexOutOfBounds,
    /// A malformed model id or artifact name.
    InvalidRequest,
    /// A well-formed artifact name with nothing behind it.
    NotFound,
    /// File system failure or unreadable content.
    Io,
}

impl ErrorKind {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBudget => "invalid_budget",
            Self::UnsupportedFormat => "unsupported_format",
            Self::EmptyMesh => "empty_mesh",
            Self::DegenerateFace => "degenerate_face",
            Self::IndexOutOfBounds => "index_out_of_bounds",
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn mesh_kind(err: &MeshError) -> ErrorKind {
    match err {
        MeshError::EmptyMesh { .. } => ErrorKind::EmptyMesh,
        MeshError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
        MeshError::DegenerateFace { .. } => ErrorKind::DegenerateFace,
    }
}

impl ConvertError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Generate(GenerateError::InvalidBudget { .. }) => ErrorKind::InvalidBudget,
            Self::Generate(GenerateError::Mesh(e)) | Self::Io(IoError::Mesh(e)) | Self::Mesh(e) => {
                mesh_kind(e)
            }
            Self::Io(IoError::UnsupportedFormat { .. }) => ErrorKind::UnsupportedFormat,
            Self::Io(IoError::FileNotFound { .. }) | Self::ArtifactNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Io(_) | Self::Artifact { .. } => ErrorKind::Io,
            Self::InvalidModelId { .. } | Self::InvalidArtifactName { .. } => {
                ErrorKind::InvalidRequest
            }
        }
    }
}
