//! On-disk artifact storage.
//!
//! Layout: `<root>/<modelId>/<modelId>.<ext>`. Every path is built from a
//! validated [`ModelId`] and a [`MeshFormat`], never from raw client input.

use std::fs;
use std::path::{Path, PathBuf};

use mesh_io::MeshFormat;
use tracing::{debug, warn};

use crate::error::{ConvertError, ConvertResult};
use crate::model_id::ModelId;
use crate::response::ArtifactFile;

/// Artifact directory rooted at the configured output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root`. Nothing is created until a write.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one model's artifacts.
    #[must_use]
    pub fn model_dir(&self, id: &ModelId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Path of one artifact.
    #[must_use]
    pub fn path_for(&self, id: &ModelId, format: MeshFormat) -> PathBuf {
        self.model_dir(id).join(id.file_name(format))
    }

    /// Write an artifact, creating the model directory as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Artifact`] if the directory or file cannot be
    /// written.
    pub fn write(&self, id: &ModelId, format: MeshFormat, bytes: &[u8]) -> ConvertResult<PathBuf> {
        let dir = self.model_dir(id);
        fs::create_dir_all(&dir).map_err(|source| ConvertError::Artifact {
            path: dir.clone(),
            source,
        })?;

        let path = self.path_for(id, format);
        fs::write(&path, bytes).map_err(|source| ConvertError::Artifact {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(path)
    }

    /// Remove a model's directory, logging instead of failing.
    pub fn discard(&self, id: &ModelId) {
        let dir = self.model_dir(id);
        if let Err(err) = fs::remove_dir_all(&dir) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %dir.display(), error = %err, "Failed to discard partial artifacts");
            }
        }
    }

    /// Resolve a download name `<modelId>.<ext>` to its artifact.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidArtifactName`] if the name is not exactly
    ///   `<modelId>.<ext>` with a supported extension
    /// - [`ConvertError::ArtifactNotFound`] if no such file exists
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_convert::{ArtifactStore, ConvertError};
    ///
    /// let store = ArtifactStore::new("outputs");
    /// assert!(matches!(
    ///     store.locate("../../etc/passwd"),
    ///     Err(ConvertError::InvalidArtifactName { .. })
    /// ));
    /// ```
    pub fn locate(&self, file_name: &str) -> ConvertResult<ArtifactFile> {
        let invalid = || ConvertError::InvalidArtifactName {
            name: file_name.to_string(),
        };

        let (stem, ext) = file_name.rsplit_once('.').ok_or_else(invalid)?;
        let id: ModelId = stem.parse().map_err(|_| invalid())?;
        let format: MeshFormat = ext.parse().map_err(|_| invalid())?;
        // Reject case variants so one artifact has exactly one name.
        if id.file_name(format) != file_name {
            return Err(invalid());
        }

        let path = self.path_for(&id, format);
        let metadata = fs::metadata(&path)
            .ok()
            .filter(fs::Metadata::is_file)
            .ok_or_else(|| ConvertError::ArtifactNotFound {
                name: file_name.to_string(),
            })?;

        Ok(ArtifactFile::new(&id, format, metadata.len(), Some(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let store = ArtifactStore::new("/srv/out");
        let id: ModelId = "model_0123456789abcdef0123456789abcdef".parse().unwrap();
        assert_eq!(
            store.path_for(&id, MeshFormat::Obj),
            PathBuf::from("/srv/out/model_0123456789abcdef0123456789abcdef")
                .join("model_0123456789abcdef0123456789abcdef.obj")
        );
    }

    #[test]
    fn write_then_locate() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let id = ModelId::generate();

        let path = store.write(&id, MeshFormat::Ply, b"ply\n").unwrap();
        assert!(path.starts_with(dir.path()));

        let found = store.locate(&id.file_name(MeshFormat::Ply)).unwrap();
        assert_eq!(found.path.as_deref(), Some(path.as_path()));
        assert_eq!(found.size_bytes, 4);
        assert_eq!(found.size, "4 B");

        store.discard(&id);
        assert!(!store.model_dir(&id).exists());
        assert!(matches!(
            store.locate(&id.file_name(MeshFormat::Ply)),
            Err(ConvertError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn locate_rejects_unsafe_names() {
        let store = ArtifactStore::new("outputs");
        for name in [
            "",
            "model_0123456789abcdef0123456789abcdef",
            "model_0123456789abcdef0123456789abcdef.glb",
            "model_0123456789abcdef0123456789abcdef.OBJ",
            "../model_0123456789abcdef0123456789abcdef.obj",
            "model_0123456789abcdef0123456789abcdef/../x.obj",
            "sample.obj",
        ] {
            assert!(
                matches!(store.locate(name), Err(ConvertError::InvalidArtifactName { .. })),
                "{name:?}"
            );
        }
    }

    #[test]
    fn discard_missing_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        ArtifactStore::new(dir.path()).discard(&ModelId::generate());
    }
}
