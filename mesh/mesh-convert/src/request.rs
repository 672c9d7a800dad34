//! Conversion requests.

use std::fmt;
use std::str::FromStr;

use mesh_generate::{DegeneratePolicy, GenerateParams};
use mesh_io::{IoError, MeshFormat};
use serde::{Serialize, Serializer};

/// Formats requested for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatSelection {
    /// A single format.
    Single(MeshFormat),
    /// Every supported format, in [`MeshFormat::ALL`] order.
    All,
}

impl FormatSelection {
    /// The selected formats in output order.
    #[must_use]
    pub fn formats(&self) -> &[MeshFormat] {
        match self {
            Self::Single(format) => std::slice::from_ref(format),
            Self::All => &MeshFormat::ALL,
        }
    }
}

impl Default for FormatSelection {
    fn default() -> Self {
        Self::Single(MeshFormat::Obj)
    }
}

impl From<MeshFormat> for FormatSelection {
    fn from(format: MeshFormat) -> Self {
        Self::Single(format)
    }
}

impl FromStr for FormatSelection {
    type Err = IoError;

    /// Parse `all` or a single format name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Single)
        }
    }
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(format) => write!(f, "{format}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl Serialize for FormatSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One mesh conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Exact number of vertices to generate.
    pub vertex_budget: usize,

    /// Exact number of faces to generate.
    pub face_budget: usize,

    /// Output formats. Default: OBJ
    pub format: FormatSelection,

    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl ConversionRequest {
    /// Request an OBJ mesh with the given budgets.
    #[must_use]
    pub fn new(vertex_budget: usize, face_budget: usize) -> Self {
        Self {
            vertex_budget,
            face_budget,
            format: FormatSelection::default(),
            seed: None,
        }
    }

    /// Request budgets derived from source image dimensions.
    ///
    /// See [`GenerateParams::from_image_dimensions`].
    #[must_use]
    pub fn from_image_dimensions(width: u32, height: u32) -> Self {
        let params = GenerateParams::from_image_dimensions(width, height);
        Self::new(params.vertex_budget, params.face_budget)
    }

    /// Set the output formats.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<FormatSelection>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generator params for this request under a policy.
    #[must_use]
    pub const fn generate_params(&self, policy: DegeneratePolicy) -> GenerateParams {
        GenerateParams::new(self.vertex_budget, self.face_budget).with_degenerate_policy(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selection() {
        assert_eq!("all".parse::<FormatSelection>().unwrap(), FormatSelection::All);
        assert_eq!("ALL".parse::<FormatSelection>().unwrap(), FormatSelection::All);
        assert_eq!(
            "stl".parse::<FormatSelection>().unwrap(),
            FormatSelection::Single(MeshFormat::Stl)
        );
        assert!(matches!(
            "glb".parse::<FormatSelection>(),
            Err(IoError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn selection_formats() {
        assert_eq!(FormatSelection::All.formats(), &MeshFormat::ALL);
        assert_eq!(
            FormatSelection::Single(MeshFormat::Ply).formats(),
            &[MeshFormat::Ply]
        );
        assert_eq!(FormatSelection::All.to_string(), "all");
        assert_eq!(FormatSelection::default().to_string(), "obj");
    }

    #[test]
    fn request_from_image() {
        let request = ConversionRequest::from_image_dimensions(100, 50)
            .with_format(MeshFormat::Stl)
            .with_seed(9);
        assert_eq!(request.vertex_budget, 500);
        assert_eq!(request.face_budget, 900);
        assert_eq!(request.format, FormatSelection::Single(MeshFormat::Stl));
        assert_eq!(request.seed, Some(9));

        let params = request.generate_params(DegeneratePolicy::Reject);
        assert_eq!(params.vertex_budget, 500);
        assert_eq!(params.degenerate_policy, DegeneratePolicy::Reject);
    }
}
