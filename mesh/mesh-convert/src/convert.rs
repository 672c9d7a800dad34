//! The conversion pipeline.

use mesh_generate::{RandomSource, generate_with};
use mesh_io::{MeshFormat, serialize_with};
use mesh_types::{Aabb, IndexedMesh, compute_bounding_box};
use tracing::{debug, info, warn};

use crate::config::ConvertConfig;
use crate::error::ConvertResult;
use crate::model_id::ModelId;
use crate::request::ConversionRequest;
use crate::response::{ArtifactFile, BoundingBoxDto, ConversionResponse};
use crate::status::{HealthReport, ServiceStatus};
use crate::store::ArtifactStore;

/// One serialized format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Format of `bytes`.
    pub format: MeshFormat,
    /// Serialized mesh.
    pub bytes: Vec<u8>,
}

/// Everything a conversion produced.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Client-facing summary.
    pub response: ConversionResponse,
    /// The generated mesh.
    pub mesh: IndexedMesh,
    /// Bounding box of `mesh`.
    pub bounds: Aabb,
    /// Serialized output, one entry per requested format.
    pub payloads: Vec<Payload>,
}

impl Conversion {
    /// Consume the conversion, keeping only the response.
    #[must_use]
    pub fn into_response(self) -> ConversionResponse {
        self.response
    }
}

/// Runs conversions: generate, bound, serialize, then optionally store.
///
/// A converter holds no per-request state. It is `Send + Sync`, so one
/// instance can serve concurrent callers.
///
/// # Example
///
/// ```
/// use mesh_convert::{ConversionRequest, ConvertConfig, Converter, FormatSelection};
///
/// let converter = Converter::new(ConvertConfig::in_memory());
/// let request = ConversionRequest::new(4, 2)
///     .with_format(FormatSelection::All)
///     .with_seed(1);
/// let response = converter.convert(&request).unwrap().into_response();
///
/// assert_eq!(response.vertex_count, 4);
/// assert_eq!(response.files.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
    store: ArtifactStore,
}

impl Converter {
    /// Create a converter from a config.
    #[must_use]
    pub fn new(config: ConvertConfig) -> Self {
        let store = ArtifactStore::new(&config.output_dir);
        Self { config, store }
    }

    /// The active config.
    #[must_use]
    pub const fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// The artifact store.
    #[must_use]
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Run one conversion.
    ///
    /// Every format is serialized before anything is written, and a failed
    /// write removes the artifacts already written for this model, so an
    /// error never leaves partial output.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidBudget`](mesh_generate::GenerateError::InvalidBudget)
    ///   for a zero budget
    /// - [`MeshError::DegenerateFace`](mesh_types::MeshError::DegenerateFace)
    ///   under the `Reject` policy
    /// - [`ConvertError::Artifact`](crate::ConvertError::Artifact) if an
    ///   artifact cannot be written
    pub fn convert(&self, request: &ConversionRequest) -> ConvertResult<Conversion> {
        info!(
            vertices = request.vertex_budget,
            faces = request.face_budget,
            format = %request.format,
            seed = ?request.seed,
            "Starting conversion"
        );

        let params = request.generate_params(self.config.degenerate_policy);
        let generated = generate_with(RandomSource::from_seed_opt(request.seed), &params)?;
        if !generated.is_clean() {
            warn!(
                degenerate = generated.degenerate_faces,
                "Mesh contains degenerate faces"
            );
        }
        let mesh = generated.into_mesh();
        let bounds = compute_bounding_box(&mesh)?;

        let payloads = request
            .format
            .formats()
            .iter()
            .map(|&format| -> ConvertResult<Payload> {
                let bytes = serialize_with(&mesh, format, &self.config.export)?;
                debug!(%format, bytes = bytes.len(), "Serialized");
                Ok(Payload { format, bytes })
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        let id = ModelId::generate();
        let files = if self.config.write_artifacts {
            self.store_all(&id, &payloads)?
        } else {
            payloads
                .iter()
                .map(|p| ArtifactFile::new(&id, p.format, p.bytes.len() as u64, None))
                .collect()
        };

        let response = ConversionResponse {
            model_name: id.model_name(),
            model_id: id,
            vertex_count: mesh.vertices.len(),
            face_count: mesh.faces.len(),
            format: request.format,
            bounding_box: BoundingBoxDto::from(&bounds),
            file_size_bytes: files.first().map_or(0, |f| f.size_bytes),
            files,
        };

        info!(
            model_id = %response.model_id,
            files = response.files.len(),
            "Conversion complete"
        );

        Ok(Conversion {
            response,
            mesh,
            bounds,
            payloads,
        })
    }

    fn store_all(&self, id: &ModelId, payloads: &[Payload]) -> ConvertResult<Vec<ArtifactFile>> {
        let mut files = Vec::with_capacity(payloads.len());
        for payload in payloads {
            match self.store.write(id, payload.format, &payload.bytes) {
                Ok(path) => files.push(ArtifactFile::new(
                    id,
                    payload.format,
                    payload.bytes.len() as u64,
                    Some(path),
                )),
                Err(err) => {
                    self.store.discard(id);
                    return Err(err);
                }
            }
        }
        Ok(files)
    }

    /// Resolve a download name to a stored artifact.
    ///
    /// # Errors
    ///
    /// See [`ArtifactStore::locate`].
    pub fn locate(&self, file_name: &str) -> ConvertResult<ArtifactFile> {
        self.store.locate(file_name)
    }

    /// Describe this service.
    #[must_use]
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus::new(&self.config.output_dir)
    }

    /// Report liveness.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn health(&self) -> HealthReport {
        HealthReport::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, ErrorKind};
    use crate::request::FormatSelection;
    use mesh_generate::DegeneratePolicy;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn converter_is_send_sync() {
        assert_send_sync::<Converter>();
    }

    #[test]
    fn in_memory_conversion() {
        let converter = Converter::new(ConvertConfig::in_memory());
        let request = ConversionRequest::new(10, 18).with_format(MeshFormat::Ply);
        let conversion = converter.convert(&request).unwrap();

        assert_eq!(conversion.payloads.len(), 1);
        let response = &conversion.response;
        assert_eq!(response.vertex_count, 10);
        assert_eq!(response.face_count, 18);
        assert_eq!(response.files[0].path, None);
        assert_eq!(
            response.file_size_bytes,
            conversion.payloads[0].bytes.len() as u64
        );
        assert_eq!(
            response.model_name,
            format!("tetra_3d_model_{}", response.model_id)
        );
    }

    #[test]
    fn bounding_box_matches_mesh() {
        let converter = Converter::new(ConvertConfig::in_memory());
        let conversion = converter
            .convert(&ConversionRequest::new(50, 10).with_seed(3))
            .unwrap();
        let expected = compute_bounding_box(&conversion.mesh).unwrap();
        assert_eq!(conversion.bounds, expected);
        assert_eq!(conversion.response.bounding_box.min, expected.min_array());
    }

    #[test]
    fn zero_budget_is_invalid_budget() {
        let converter = Converter::new(ConvertConfig::in_memory());
        let err = converter.convert(&ConversionRequest::new(0, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBudget);
    }

    #[test]
    fn reject_policy_surfaces_degenerate_face() {
        // Two vertices can only form degenerate faces.
        let config = ConvertConfig::in_memory().with_degenerate_policy(DegeneratePolicy::Reject);
        let err = Converter::new(config)
            .convert(&ConversionRequest::new(2, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateFace);
    }

    #[test]
    fn failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be makes every write fail.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, b"").unwrap();

        let converter = Converter::new(ConvertConfig::new(&blocked));
        let request = ConversionRequest::new(5, 5).with_format(FormatSelection::All);
        let err = converter.convert(&request).unwrap_err();
        assert!(matches!(err, ConvertError::Artifact { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
