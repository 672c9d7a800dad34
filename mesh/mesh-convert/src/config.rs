//! Configuration for the conversion service.

use std::path::{Path, PathBuf};

use mesh_generate::DegeneratePolicy;
use mesh_io::ExportOptions;

/// Default directory for written artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Configuration for a [`Converter`](crate::Converter).
///
/// # Example
///
/// ```
/// use mesh_convert::ConvertConfig;
/// use mesh_generate::DegeneratePolicy;
///
/// let config = ConvertConfig::new("/tmp/tetra")
///     .with_degenerate_policy(DegeneratePolicy::Reject);
/// assert!(config.write_artifacts);
///
/// let preview = ConvertConfig::in_memory();
/// assert!(!preview.write_artifacts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Root directory for artifacts. Default: `outputs`
    pub output_dir: PathBuf,

    /// Write serialized artifacts to `output_dir`. Default: true
    pub write_artifacts: bool,

    /// Degenerate face handling for generated meshes.
    pub degenerate_policy: DegeneratePolicy,

    /// Serializer options shared by every format.
    pub export: ExportOptions,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl ConvertConfig {
    /// Create a config writing artifacts under `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            write_artifacts: true,
            degenerate_policy: DegeneratePolicy::default(),
            export: ExportOptions::default(),
        }
    }

    /// Config that serializes without touching the file system.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            write_artifacts: false,
            ..Self::default()
        }
    }

    /// Set the artifact root directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    /// Enable or disable artifact writing.
    #[must_use]
    pub const fn with_write_artifacts(mut self, write: bool) -> Self {
        self.write_artifacts = write;
        self
    }

    /// Set the degenerate face policy.
    #[must_use]
    pub const fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Set the serializer options.
    #[must_use]
    pub fn with_export_options(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }
}
