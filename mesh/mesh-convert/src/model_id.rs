//! Model identifiers.

use std::fmt;
use std::str::FromStr;

use mesh_io::MeshFormat;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ConvertError;

const PREFIX: &str = "model_";

/// Prefix of the human-readable model name.
pub const MODEL_NAME_PREFIX: &str = "tetra_3d_model_";

/// Unique id of one conversion, `model_` followed by 32 lowercase hex digits.
///
/// Ids name artifact directories and files, so parsing accepts nothing
/// that could escape the output directory.
///
/// # Example
///
/// ```
/// use mesh_convert::ModelId;
/// use mesh_io::MeshFormat;
///
/// let id: ModelId = "model_0123456789abcdef0123456789abcdef".parse().unwrap();
/// assert_eq!(
///     id.file_name(MeshFormat::Obj),
///     "model_0123456789abcdef0123456789abcdef.obj"
/// );
/// assert!("model_../../etc".parse::<ModelId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name reported to clients: `tetra_3d_model_<id>`.
    #[must_use]
    pub fn model_name(&self) -> String {
        format!("{MODEL_NAME_PREFIX}{}", self.0)
    }

    /// Artifact file name for a format: `<id>.<ext>`.
    #[must_use]
    pub fn file_name(&self, format: MeshFormat) -> String {
        format!("{}.{}", self.0, format.extension())
    }
}

impl FromStr for ModelId {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.strip_prefix(PREFIX).is_some_and(|hex| {
            hex.len() == 32 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        });
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ConvertError::InvalidModelId {
                value: s.to_string(),
            })
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
