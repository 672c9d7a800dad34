//! Service status and health payloads.

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use mesh_io::MeshFormat;
use serde::Serialize;

/// Name reported by the status payload.
pub const SERVICE_NAME: &str = "Tetra 3D mesh converter";

/// Crate version reported by status and health.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static description of the running service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Service name.
    pub service: &'static str,
    /// Always `active` while the service can answer.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Formats accepted by conversions, besides the `all` selector.
    pub supported_formats: Vec<String>,
    /// Where artifacts are written.
    pub output_dir: PathBuf,
}

impl ServiceStatus {
    /// Status for a service writing to `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            service: SERVICE_NAME,
            status: "active",
            version: VERSION,
            supported_formats: MeshFormat::ALL.iter().map(ToString::to_string).collect(),
            output_dir: output_dir.into(),
        }
    }
}

/// Liveness report with a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Always `healthy` while the service can answer.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

impl HealthReport {
    /// Report stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Report stamped with a fixed time.
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            status: "healthy",
            version: VERSION,
            timestamp: time.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
