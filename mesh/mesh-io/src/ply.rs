//! PLY (Polygon File Format) support.
//!
//! Meshes are written with a hand-built header so the output matches the
//! canonical layout exactly:
//!
//! ```text
//! ply
//! format ascii 1.0
//! comment Generated by Tetra mesh-io
//! element vertex 3
//! property float x
//! property float y
//! property float z
//! element face 1
//! property list uchar int vertex_index
//! end_header
//! 0.000000 0.000000 0.000000
//! 1.000000 0.000000 0.000000
//! 0.000000 1.000000 0.000000
//! 3 0 1 2
//! ```
//!
//! Face indices are 0-based. Reading goes through `ply-rs` and accepts
//! ASCII and both binary byte orders, with faces listed under either
//! `vertex_index` or `vertex_indices`.

use std::io::{BufRead, Write};

use mesh_types::{IndexedMesh, Vertex};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{IoError, IoResult};
use crate::options::{Encoding, ExportOptions};

/// Write a validated mesh as PLY in the configured encoding.
pub(crate) fn write_ply<W: Write>(
    mesh: &IndexedMesh,
    options: &ExportOptions,
    mut writer: W,
) -> IoResult<()> {
    if options.ply_encoding == Encoding::BinaryLittleEndian {
        check_int_indices(mesh)?;
    }
    write_header(mesh, options, &mut writer)?;
    match options.ply_encoding {
        Encoding::Ascii => write_body_ascii(mesh, writer),
        Encoding::BinaryLittleEndian => write_body_binary(mesh, writer),
    }
}

fn write_header<W: Write>(mesh: &IndexedMesh, options: &ExportOptions, writer: &mut W) -> IoResult<()> {
    let format = match options.ply_encoding {
        Encoding::Ascii => "ascii",
        Encoding::BinaryLittleEndian => "binary_little_endian",
    };
    writeln!(writer, "ply")?;
    writeln!(writer, "format {format} 1.0")?;
    writeln!(writer, "comment {}", options.comment)?;
    writeln!(writer, "element vertex {}", mesh.vertices.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "element face {}", mesh.faces.len())?;
    writeln!(writer, "property list uchar int vertex_index")?;
    writeln!(writer, "end_header")?;
    Ok(())
}

fn write_body_ascii<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    for v in &mesh.vertices {
        let p = &v.position;
        writeln!(writer, "{:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    for &[a, b, c] in &mesh.faces {
        writeln!(writer, "3 {a} {b} {c}")?;
    }
    Ok(())
}

/// Binary body, written by hand: ply-rs writes the element count where a
/// binary list expects its length.
/// Binary faces store indices as `int`; reject larger ones before any output.
fn check_int_indices(mesh: &IndexedMesh) -> IoResult<()> {
    match mesh.faces.iter().flatten().find(|&&i| i32::try_from(i).is_err()) {
        Some(index) => Err(IoError::invalid_content(format!(
            "vertex index {index} exceeds PLY int range"
        ))),
        None => Ok(()),
    }
}

fn write_body_binary<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    for v in &mesh.vertices {
        // Truncation: the header declares float (f32) coordinates
        #[allow(clippy::cast_possible_truncation)]
        let coords = [
            v.position.x as f32,
            v.position.y as f32,
            v.position.z as f32,
        ];
        for c in coords {
            writer.write_all(&c.to_le_bytes())?;
        }
    }

    for face in &mesh.faces {
        writer.write_all(&[3u8])?;
        for &index in face {
            // check_int_indices ran before the header.
            #[allow(clippy::cast_possible_wrap)]
            let index = index as i32;
            writer.write_all(&index.to_le_bytes())?;
        }
    }

    Ok(())
}

/// Parse PLY data into an indexed mesh.
///
/// Polygons with more than three corners are split into a triangle fan.
///
/// # Errors
///
/// Returns an error if:
/// - The header or payload is not valid PLY
/// - A vertex lacks an `x`, `y` or `z` property
/// - A face index is negative or references a missing vertex
///
/// # Example
///
/// ```
/// use mesh_io::parse_ply;
///
/// let text = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_index\nend_header\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
/// let mesh = parse_ply(text.as_bytes()).unwrap();
/// assert_eq!(mesh.faces, vec![[0, 1, 2]]);
/// ```
pub fn parse_ply<R: BufRead>(mut reader: R) -> IoResult<IndexedMesh> {
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut mesh = IndexedMesh::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        mesh.vertices.reserve(vertex_elements.len());
        for (i, element) in vertex_elements.iter().enumerate() {
            let coord = |key: &str| {
                get_float_property(element, key).ok_or_else(|| {
                    IoError::invalid_content(format!("vertex {i} has no numeric '{key}' property"))
                })
            };
            mesh.vertices
                .push(Vertex::from_coords(coord("x")?, coord("y")?, coord("z")?));
        }
    }

    if let Some(face_elements) = payload.get("face") {
        mesh.faces.reserve(face_elements.len());
        for (i, element) in face_elements.iter().enumerate() {
            let indices = get_index_list(element)
                .ok_or_else(|| IoError::invalid_content(format!("face {i} has no index list")))?
                .map_err(|index| {
                    IoError::invalid_content(format!("face {i} has invalid index {index}"))
                })?;
            if indices.len() < 3 {
                return Err(IoError::invalid_content(format!(
                    "face {i} has {} vertices, expected at least 3",
                    indices.len()
                )));
            }
            for k in 1..indices.len() - 1 {
                mesh.faces.push([indices[0], indices[k], indices[k + 1]]);
            }
        }
    }

    mesh.check_indices()?;
    Ok(mesh)
}

/// Extract a float property from a PLY element.
fn get_float_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

/// Extract the face index list, trying both common property names.
///
/// The inner error carries the first index that does not fit a `u32`.
fn get_index_list(element: &DefaultElement) -> Option<Result<Vec<u32>, i64>> {
    fn convert<T: Copy + Into<i64>>(values: &[T]) -> Result<Vec<u32>, i64> {
        values
            .iter()
            .map(|&v| {
                let v: i64 = v.into();
                u32::try_from(v).map_err(|_| v)
            })
            .collect()
    }

    ["vertex_index", "vertex_indices"]
        .iter()
        .find_map(|key| match element.get(*key)? {
            Property::ListInt(v) => Some(convert(v)),
            Property::ListUInt(v) => Some(convert(v)),
            Property::ListShort(v) => Some(convert(v)),
            Property::ListUShort(v) => Some(convert(v)),
            Property::ListChar(v) => Some(convert(v)),
            Property::ListUChar(v) => Some(convert(v)),
            _ => None,
        })
}
