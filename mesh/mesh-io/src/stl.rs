//! STL (Stereolithography) support.
//!
//! STL stores an unindexed triangle soup, so every face gets three vertices
//! of its own when parsed. Shared vertices of the source mesh are not
//! recovered.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::io::{BufRead, Write};

use mesh_types::{IndexedMesh, MeshTopology, Point3, Triangle, Vector3, Vertex};

use crate::error::{IoError, IoResult};
use crate::options::{Encoding, ExportOptions, NormalMode};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Write a validated mesh as STL in the configured encoding.
pub(crate) fn write_stl<W: Write>(
    mesh: &IndexedMesh,
    options: &ExportOptions,
    writer: W,
) -> IoResult<()> {
    match options.stl_encoding {
        Encoding::Ascii => write_stl_ascii(mesh, options, writer),
        Encoding::BinaryLittleEndian => write_stl_binary(mesh, options.stl_normals, writer),
    }
}

fn facet_normal(triangle: &Triangle, mode: NormalMode) -> Vector3<f64> {
    match mode {
        NormalMode::Zero => Vector3::zeros(),
        NormalMode::Computed => triangle.normal().unwrap_or_else(Vector3::zeros),
    }
}

fn write_stl_ascii<W: Write>(
    mesh: &IndexedMesh,
    options: &ExportOptions,
    mut writer: W,
) -> IoResult<()> {
    let name = &options.solid_name;
    writeln!(writer, "solid {name}")?;

    for triangle in mesh.triangles() {
        match options.stl_normals {
            NormalMode::Zero => writeln!(writer, "  facet normal 0 0 0")?,
            NormalMode::Computed => {
                let n = triangle.normal().unwrap_or_else(Vector3::zeros);
                writeln!(writer, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
            }
        }
        writeln!(writer, "    outer loop")?;
        for p in triangle.corners() {
            writeln!(writer, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;
    Ok(())
}

/// Triangle count for the binary header.
fn binary_face_count(faces: usize) -> IoResult<u32> {
    u32::try_from(faces).map_err(|_| {
        IoError::invalid_content(format!(
            "binary STL holds at most {} faces, mesh has {faces}",
            u32::MAX
        ))
    })
}

fn write_stl_binary<W: Write>(mesh: &IndexedMesh, normals: NormalMode, mut writer: W) -> IoResult<()> {
    let face_count = binary_face_count(mesh.faces.len())?;

    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by Tetra mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;
    writer.write_all(&face_count.to_le_bytes())?;

    for triangle in mesh.triangles() {
        let n = facet_normal(&triangle, normals);
        write_f32_triple(&mut writer, n.x, n.y, n.z)?;
        for p in triangle.corners() {
            write_f32_triple(&mut writer, p.x, p.y, p.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write three values as little-endian f32s.
fn write_f32_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    // Truncation: STL stores single precision
    #[allow(clippy::cast_possible_truncation)]
    let values = [x as f32, y as f32, z as f32];
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

/// Parse STL bytes, detecting ASCII or binary encoding.
///
/// A buffer whose length matches the triangle count in a binary header is
/// read as binary even if its header starts with `solid`; otherwise a
/// leading `solid` (any case) selects the ASCII reader.
///
/// # Errors
///
/// Returns an error if:
/// - A binary buffer is shorter than its header or its declared triangles
/// - An ASCII facet does not have exactly three vertices
/// - A coordinate is not a number
///
/// # Example
///
/// ```
/// use mesh_io::parse_stl;
///
/// let text = b"solid t\n facet normal 0 0 0\n  outer loop\n   vertex 0 0 0\n   vertex 1 0 0\n   vertex 0 1 0\n  endloop\n endfacet\nendsolid t\n";
/// let mesh = parse_stl(text).unwrap();
/// assert_eq!(mesh.faces, vec![[0, 1, 2]]);
/// ```
pub fn parse_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if is_sized_like_binary(bytes) {
        return parse_stl_binary(bytes);
    }

    let text_start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let keyword = bytes[text_start..].get(..5);
    if keyword.is_some_and(|k| k.eq_ignore_ascii_case(b"solid")) {
        parse_stl_ascii(bytes)
    } else {
        parse_stl_binary(bytes)
    }
}

/// Check whether the buffer length is exactly what a binary header declares.
fn is_sized_like_binary(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_SIZE + 4 {
        return false;
    }
    let declared = read_face_count(bytes) as usize;
    declared
        .checked_mul(TRIANGLE_SIZE)
        .and_then(|body| body.checked_add(HEADER_SIZE + 4))
        == Some(bytes.len())
}

fn read_face_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ])
}

fn parse_stl_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if bytes.len() < HEADER_SIZE + 4 {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: bytes.len(),
        });
    }

    let face_count = read_face_count(bytes);
    let body = &bytes[HEADER_SIZE + 4..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < face_count as usize {
        // Fewer than face_count, so it fits.
        #[allow(clippy::cast_possible_truncation)]
        let got = available as u32;
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got,
        });
    }

    let mut mesh = IndexedMesh::with_capacity(face_count as usize * 3, face_count as usize);
    for chunk in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        // Skip the stored normal; it is recomputed from winding when needed.
        let base = next_index(&mesh)?;
        mesh.vertices.push(read_vertex(&chunk[12..24]));
        mesh.vertices.push(read_vertex(&chunk[24..36]));
        mesh.vertices.push(read_vertex(&chunk[36..48]));
        mesh.faces.push([base, base + 1, base + 2]);
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

/// Index the next appended vertex will get.
fn next_index(mesh: &IndexedMesh) -> IoResult<u32> {
    u32::try_from(mesh.vertices.len())
        .ok()
        .filter(|base| base.checked_add(2).is_some())
        .ok_or_else(|| IoError::invalid_content("STL has more vertices than u32 indices allow"))
}

fn parse_stl_ascii<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                corners.clear();
            }
            "outer" => {
                if parts.get(1).is_some_and(|p| p.eq_ignore_ascii_case("loop")) {
                    in_loop = true;
                }
            }
            "vertex" if in_loop => {
                if parts.len() < 4 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs x, y and z",
                        line_index + 1
                    )));
                }
                corners.push(Point3::new(parts[1].parse()?, parts[2].parse()?, parts[3].parse()?));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if in_facet {
                    if corners.len() != 3 {
                        return Err(IoError::invalid_content(format!(
                            "line {}: facet has {} vertices, expected 3",
                            line_index + 1,
                            corners.len()
                        )));
                    }
                    let base = next_index(&mesh)?;
                    mesh.vertices.extend(corners.drain(..).map(Vertex::new));
                    mesh.faces.push([base, base + 1, base + 2]);
                }
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}
