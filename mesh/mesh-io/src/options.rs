//! Export options for the format serializers.

/// Default STL solid name.
pub const DEFAULT_SOLID_NAME: &str = "tetra_3d_model";

/// Default generator comment written into OBJ and PLY headers.
pub const DEFAULT_COMMENT: &str = "Generated by Tetra mesh-io";

/// Byte encoding for formats that have both text and binary variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Human-readable text.
    #[default]
    Ascii,
    /// Little-endian binary.
    BinaryLittleEndian,
}

/// How STL facet normals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMode {
    /// Write `0 0 0` and let readers recompute normals from winding.
    #[default]
    Zero,
    /// Write the unit normal of each face (zero for zero-area faces).
    Computed,
}

/// Options controlling serializer output.
///
/// The default reproduces the canonical text formats exactly: ASCII STL
/// with zero normals and ASCII PLY.
///
/// # Example
///
/// ```
/// use mesh_io::{Encoding, ExportOptions, NormalMode};
///
/// let options = ExportOptions::default()
///     .with_solid_name("bracket")
///     .with_stl_normals(NormalMode::Computed);
/// assert_eq!(options.solid_name, "bracket");
/// assert_eq!(options.stl_encoding, Encoding::Ascii);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Name written after `solid` and `endsolid` in ASCII STL.
    /// Default: `tetra_3d_model`
    pub solid_name: String,

    /// Generator line written as an OBJ `#` comment and a PLY `comment`.
    pub comment: String,

    /// STL encoding. Default: ASCII
    pub stl_encoding: Encoding,

    /// STL facet normals. Default: [`NormalMode::Zero`]
    pub stl_normals: NormalMode,

    /// PLY encoding. Default: ASCII
    pub ply_encoding: Encoding,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            stl_encoding: Encoding::Ascii,
            stl_normals: NormalMode::Zero,
            ply_encoding: Encoding::Ascii,
        }
    }
}

impl ExportOptions {
    /// Binary STL and PLY with computed normals, for compact artifacts.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            stl_encoding: Encoding::BinaryLittleEndian,
            stl_normals: NormalMode::Computed,
            ply_encoding: Encoding::BinaryLittleEndian,
            ..Self::default()
        }
    }

    /// Set the STL solid name.
    ///
    /// Whitespace is replaced with `_` so the name stays a single token on
    /// the `solid` line; an empty name falls back to the default.
    #[must_use]
    pub fn with_solid_name(mut self, name: impl AsRef<str>) -> Self {
        let name: String = name
            .as_ref()
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        self.solid_name = if name.is_empty() {
            DEFAULT_SOLID_NAME.to_string()
        } else {
            name
        };
        self
    }

    /// Set the header comment. Line breaks are flattened to spaces.
    #[must_use]
    pub fn with_comment(mut self, comment: impl AsRef<str>) -> Self {
        self.comment = comment.as_ref().replace(['\r', '\n'], " ");
        self
    }

    /// Set the STL encoding.
    #[must_use]
    pub const fn with_stl_encoding(mut self, encoding: Encoding) -> Self {
        self.stl_encoding = encoding;
        self
    }

    /// Set the STL normal mode.
    #[must_use]
    pub const fn with_stl_normals(mut self, normals: NormalMode) -> Self {
        self.stl_normals = normals;
        self
    }

    /// Set the PLY encoding.
    #[must_use]
    pub const fn with_ply_encoding(mut self, encoding: Encoding) -> Self {
        self.ply_encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical_text() {
        let options = ExportOptions::default();
        assert_eq!(options.solid_name, "tetra_3d_model");
        assert_eq!(options.stl_encoding, Encoding::Ascii);
        assert_eq!(options.stl_normals, NormalMode::Zero);
        assert_eq!(options.ply_encoding, Encoding::Ascii);
    }

    #[test]
    fn compact_preset() {
        let options = ExportOptions::compact();
        assert_eq!(options.stl_encoding, Encoding::BinaryLittleEndian);
        assert_eq!(options.ply_encoding, Encoding::BinaryLittleEndian);
        assert_eq!(options.stl_normals, NormalMode::Computed);
        assert_eq!(options.solid_name, DEFAULT_SOLID_NAME);
    }

    #[test]
    fn solid_name_is_single_token() {
        let options = ExportOptions::default().with_solid_name(" my part  v2 ");
        assert_eq!(options.solid_name, "my_part__v2");

        let options = ExportOptions::default().with_solid_name("   ");
        assert_eq!(options.solid_name, DEFAULT_SOLID_NAME);
    }

    #[test]
    fn comment_is_single_line() {
        let options = ExportOptions::default().with_comment("a\nb\r\nc");
        assert_eq!(options.comment, "a b  c");
    }
}
