//! Wavefront OBJ support.
//!
//! Only geometry is handled: `v` records and `f` records. Texture
//! coordinates, normals, groups and materials are skipped when reading and
//! never written.
//!
//! # Output Layout
//!
//! ```text
//! # Generated by Tetra mesh-io
//! # Vertices: 3
//! # Faces: 1
//! v 0.000000 0.000000 0.000000
//! v 1.000000 0.000000 0.000000
//! v 0.000000 1.000000 0.000000
//! f 1 2 3
//! ```
//!
//! OBJ counts vertices from one. Indices are shifted by one on write and
//! back on read; the in-memory mesh always stays 0-based.

use std::io::{BufRead, Write};

use mesh_types::{IndexedMesh, Vertex};

use crate::error::{IoError, IoResult};
use crate::options::ExportOptions;

/// Write a validated mesh as OBJ text.
pub(crate) fn write_obj<W: Write>(
    mesh: &IndexedMesh,
    options: &ExportOptions,
    mut writer: W,
) -> IoResult<()> {
    writeln!(writer, "# {}", options.comment)?;
    writeln!(writer, "# Vertices: {}", mesh.vertices.len())?;
    writeln!(writer, "# Faces: {}", mesh.faces.len())?;

    for v in &mesh.vertices {
        let p = &v.position;
        writeln!(writer, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }

    for &[a, b, c] in &mesh.faces {
        writeln!(
            writer,
            "f {} {} {}",
            u64::from(a) + 1,
            u64::from(b) + 1,
            u64::from(c) + 1
        )?;
    }

    Ok(())
}

/// Parse OBJ text into an indexed mesh.
///
/// Face corners may be written as `i`, `i/t`, `i//n` or `i/t/n`; only the
/// position index is used. Negative indices count back from the most
/// recent vertex. Polygons with more than three corners are split into a
/// triangle fan.
///
/// # Errors
///
/// Returns an error if:
/// - A `v` record has fewer than three coordinates
/// - A face has fewer than three corners or uses index `0`
/// - A face references a vertex that is never defined
///
/// # Example
///
/// ```
/// use mesh_io::parse_obj;
///
/// let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let mesh = parse_obj(text.as_bytes()).unwrap();
/// assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
/// ```
pub fn parse_obj<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut polygon: Vec<u32> = Vec::with_capacity(4);

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_position(tokens, line_number)?;
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
            Some("f") => {
                polygon.clear();
                for token in tokens {
                    polygon.push(resolve_index(token, mesh.vertices.len(), line_number)?);
                }
                if polygon.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {line_number}: face needs at least 3 vertices, got {}",
                        polygon.len()
                    )));
                }
                for i in 1..polygon.len() - 1 {
                    mesh.faces.push([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }
            _ => {}
        }
    }

    // Forward references are legal while reading, so bounds are checked once at the end.
    mesh.check_indices()?;
    Ok(mesh)
}

fn parse_position<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_number: usize,
) -> IoResult<[f64; 3]> {
    let mut next = || -> IoResult<f64> {
        let token = tokens.next().ok_or_else(|| {
            IoError::invalid_content(format!("line {line_number}: vertex needs x, y and z"))
        })?;
        Ok(token.parse()?)
    };
    Ok([next()?, next()?, next()?])
}

/// Resolve one face corner to a 0-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line_number: usize) -> IoResult<u32> {
    let position = token.split('/').next().unwrap_or(token);
    let index: i64 = position.parse()?;

    let resolved = match index {
        0 => {
            return Err(IoError::invalid_content(format!(
                "line {line_number}: OBJ indices start at 1"
            )));
        }
        i if i > 0 => i - 1,
        i => i64::try_from(vertex_count).unwrap_or(i64::MAX) + i,
    };

    u32::try_from(resolved).map_err(|_| {
        IoError::invalid_content(format!(
            "line {line_number}: index {index} is out of range"
        ))
    })
}
