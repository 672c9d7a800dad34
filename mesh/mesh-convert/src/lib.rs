//! Conversion service for the Tetra export toolkit.
//!
//! A [`Converter`] turns a [`ConversionRequest`] into a
//! [`ConversionResponse`]: it generates a mesh with the requested budgets,
//! computes its bounding box, serializes it to every requested format and,
//! when configured to, writes the artifacts to disk under a fresh
//! [`ModelId`].
//!
//! Transports (the `tetra` CLI) build one converter from a
//! [`ConvertConfig`] and call it for every request. Errors carry an
//! [`ErrorKind`] for mapping onto status or exit codes.
//!
//! # Example
//!
//! ```no_run
//! use mesh_convert::{ConversionRequest, ConvertConfig, Converter, FormatSelection};
//!
//! let converter = Converter::new(ConvertConfig::new("outputs"));
//! let request = ConversionRequest::from_image_dimensions(640, 480)
//!     .with_format(FormatSelection::All);
//! let response = converter.convert(&request).unwrap().into_response();
//!
//! for file in &response.files {
//!     println!("{} ({})", file.file_name, file.size);
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod config;
mod convert;
mod error;
mod model_id;
mod request;
mod response;
mod size;
mod status;
mod store;

pub use config::{ConvertConfig, DEFAULT_OUTPUT_DIR};
pub use convert::{Conversion, Converter, Payload};
pub use error::{ConvertError, ConvertResult, ErrorKind};
pub use model_id::{MODEL_NAME_PREFIX, ModelId};
pub use request::{ConversionRequest, FormatSelection};
pub use response::{ArtifactFile, BoundingBoxDto, ConversionResponse};
pub use size::format_file_size;
pub use status::{HealthReport, SERVICE_NAME, ServiceStatus, VERSION};
pub use store::ArtifactStore;
