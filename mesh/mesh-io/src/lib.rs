//! Mesh serialization for the Tetra export toolkit.
//!
//! This crate turns an [`IndexedMesh`] into file bytes and back:
//!
//! - **OBJ** (Wavefront) - ASCII, 1-based face indices
//! - **STL** (Stereolithography) - ASCII or binary
//! - **PLY** (Polygon File Format) - ASCII or binary, 0-based face indices
//!
//! Any other format name, including `glb`, is rejected with
//! [`IoError::UnsupportedFormat`].
//!
//! # Example
//!
//! ```
//! use mesh_io::{serialize, MeshFormat};
//! use mesh_types::unit_cube;
//!
//! let bytes = serialize(&unit_cube(), MeshFormat::Ply).unwrap();
//! let text = String::from_utf8(bytes).unwrap();
//! assert!(text.contains("element vertex 8"));
//! assert!(text.contains("element face 12"));
//!
//! // Names are parsed case-insensitively; unknown names fail.
//! assert_eq!("OBJ".parse::<MeshFormat>().unwrap(), MeshFormat::Obj);
//! assert!("glb".parse::<MeshFormat>().is_err());
//! ```
//!
//! # Validation
//!
//! Every serializer validates the mesh before writing a single byte: a mesh
//! without vertices or faces fails with
//! [`MeshError::EmptyMesh`](mesh_types::MeshError::EmptyMesh), and a face
//! pointing past the vertex array fails with
//! [`MeshError::IndexOutOfBounds`](mesh_types::MeshError::IndexOutOfBounds).

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod obj;
mod options;
mod ply;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::parse_obj;
pub use options::{DEFAULT_COMMENT, DEFAULT_SOLID_NAME, Encoding, ExportOptions, NormalMode};
pub use ply::parse_ply;
pub use stl::parse_stl;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use mesh_types::IndexedMesh;
use tracing::debug;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// OBJ (Wavefront) text.
    Obj,
    /// STL (Stereolithography), ASCII or binary.
    Stl,
    /// PLY (Polygon File Format), ASCII or binary.
    Ply,
}

impl MeshFormat {
    /// Every supported format, in the order artifacts are produced.
    pub const ALL: [Self; 3] = [Self::Obj, Self::Stl, Self::Ply];

    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is missing or not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Stl => "stl",
            Self::Ply => "ply",
        }
    }
}

impl FromStr for MeshFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "obj" => Ok(Self::Obj),
            "stl" => Ok(Self::Stl),
            "ply" => Ok(Self::Ply),
            _ => Err(IoError::unsupported(s)),
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serialize a mesh with default [`ExportOptions`].
///
/// # Errors
///
/// Returns [`IoError::Mesh`] if the mesh is empty or has an out-of-range
/// face index.
pub fn serialize(mesh: &IndexedMesh, format: MeshFormat) -> IoResult<Vec<u8>> {
    serialize_with(mesh, format, &ExportOptions::default())
}

/// Serialize a mesh to a format given by name.
///
/// The name is checked first, so an unsupported name fails with
/// [`IoError::UnsupportedFormat`] whatever the mesh contains.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown names, then the
/// errors of [`serialize`].
///
/// # Example
///
/// ```
/// use mesh_io::{serialize_named, IoError};
/// use mesh_types::IndexedMesh;
///
/// let err = serialize_named(&IndexedMesh::new(), "glb").unwrap_err();
/// assert!(matches!(err, IoError::UnsupportedFormat { .. }));
/// ```
pub fn serialize_named(mesh: &IndexedMesh, format: &str) -> IoResult<Vec<u8>> {
    let format: MeshFormat = format.parse()?;
    serialize(mesh, format)
}

/// Serialize a mesh with explicit options.
///
/// # Errors
///
/// See [`serialize`].
pub fn serialize_with(
    mesh: &IndexedMesh,
    format: MeshFormat,
    options: &ExportOptions,
) -> IoResult<Vec<u8>> {
    // Rough per-record sizes of the text encodings.
    let mut bytes = Vec::with_capacity(mesh.vertices.len() * 40 + mesh.faces.len() * 24);
    write_mesh(mesh, format, options, &mut bytes)?;
    Ok(bytes)
}

/// Validate a mesh and stream it to a writer.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns [`IoError::Mesh`] for invalid meshes and [`IoError::Io`] if the
/// writer fails.
pub fn write_mesh<W: Write>(
    mesh: &IndexedMesh,
    format: MeshFormat,
    options: &ExportOptions,
    writer: W,
) -> IoResult<()> {
    mesh.validate()?;

    debug!(
        %format,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Serializing mesh"
    );

    match format {
        MeshFormat::Obj => obj::write_obj(mesh, options, writer),
        MeshFormat::Stl => stl::write_stl(mesh, options, writer),
        MeshFormat::Ply => ply::write_ply(mesh, options, writer),
    }
}

/// Parse mesh bytes in the given format.
///
/// # Errors
///
/// Returns the parse errors of [`parse_obj`], [`parse_stl`] or
/// [`parse_ply`].
pub fn parse_mesh(bytes: &[u8], format: MeshFormat) -> IoResult<IndexedMesh> {
    let mesh = match format {
        MeshFormat::Obj => parse_obj(bytes)?,
        MeshFormat::Stl => parse_stl(bytes)?,
        MeshFormat::Ply => parse_ply(bytes)?,
    };
    debug!(
        %format,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Parsed mesh"
    );
    Ok(mesh)
}

fn format_for_path(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| {
        IoError::unsupported(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)"),
        )
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not `obj`, `stl` or `ply`
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_mesh;
///
/// let mesh = load_mesh("model.ply").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let format = format_for_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    parse_mesh(&bytes, format)
}

/// Save a mesh to a file with default options, detecting format from extension.
///
/// # Errors
///
/// See [`save_mesh_with`].
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    save_mesh_with(mesh, path, &ExportOptions::default())
}

/// Save a mesh to a file, detecting format from extension.
///
/// The mesh is validated before the file is created, so an invalid mesh
/// never leaves an empty file behind.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not `obj`, `stl` or `ply`
/// - The mesh is empty or has an out-of-range index
/// - The file cannot be written
pub fn save_mesh_with<P: AsRef<Path>>(
    mesh: &IndexedMesh,
    path: P,
    options: &ExportOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = format_for_path(path)?;
    mesh.validate()?;

    let mut writer = BufWriter::new(File::create(path)?);
    write_mesh(mesh, format, options, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{MeshError, Vertex, unit_cube};

    #[test]
    fn format_from_name() {
        assert_eq!("obj".parse::<MeshFormat>().unwrap(), MeshFormat::Obj);
        assert_eq!("STL".parse::<MeshFormat>().unwrap(), MeshFormat::Stl);
        assert_eq!(" Ply ".parse::<MeshFormat>().unwrap(), MeshFormat::Ply);
    }

    #[test]
    fn unsupported_names_rejected() {
        for name in ["glb", "gltf", "3mf", "", "all"] {
            let err = name.parse::<MeshFormat>().unwrap_err();
            assert!(
                matches!(&err, IoError::UnsupportedFormat { name: n } if n == name),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn format_from_path() {
        assert_eq!(MeshFormat::from_path("model.stl"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("/out/m.OBJ"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("model.ply"), Some(MeshFormat::Ply));
        assert_eq!(MeshFormat::from_path("model.glb"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
    }

    #[test]
    fn extension_and_display_agree() {
        for format in MeshFormat::ALL {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.extension().parse::<MeshFormat>().unwrap(), format);
        }
    }

    #[test]
    fn empty_mesh_rejected_by_every_format() {
        let no_faces = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
        for format in MeshFormat::ALL {
            for mesh in [IndexedMesh::new(), no_faces.clone()] {
                assert!(matches!(
                    serialize(&mesh, format),
                    Err(IoError::Mesh(MeshError::EmptyMesh { .. }))
                ));
            }
        }
    }

    #[test]
    fn bad_index_writes_nothing() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 1, 99]);
        for format in MeshFormat::ALL {
            let mut out = Vec::new();
            let result = write_mesh(&mesh, format, &ExportOptions::default(), &mut out);
            assert!(matches!(
                result,
                Err(IoError::Mesh(MeshError::IndexOutOfBounds { index: 99, .. }))
            ));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn named_format_checked_before_mesh() {
        assert!(matches!(
            serialize_named(&IndexedMesh::new(), "GLB"),
            Err(IoError::UnsupportedFormat { .. })
        ));
        assert!(serialize_named(&unit_cube(), "obj").is_ok());
    }

    #[test]
    fn save_and_load_each_format() {
        let dir = tempfile::tempdir().unwrap();
        for format in MeshFormat::ALL {
            let path = dir.path().join(format!("cube.{format}"));
            save_mesh(&unit_cube(), &path).unwrap();
            let loaded = load_mesh(&path).unwrap();
            assert_eq!(loaded.faces.len(), 12, "{format}");
        }
    }

    #[test]
    fn save_invalid_mesh_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.obj");
        assert!(save_mesh(&IndexedMesh::new(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn load_missing_and_unknown() {
        assert!(matches!(
            load_mesh("nonexistent_file_12345.obj"),
            Err(IoError::FileNotFound { .. })
        ));
        assert!(matches!(
            load_mesh("model.glb"),
            Err(IoError::UnsupportedFormat { name }) if name == "glb"
        ));
    }
}
