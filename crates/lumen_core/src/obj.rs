//! Wavefront OBJ model loading.
//!
//! Loads triangulated OBJ files into [`MeshData`]. Only the geometry
//! statements are interpreted (`v`, `vn`, `vt`, `f`); grouping, smoothing
//! and material statements are skipped. Faces must already be triangles;
//! this loader does not tessellate polygons.

use std::fs;
use std::path::Path;

use lumen_math::Vec3;
use thiserror::Error;

use crate::mesh::MeshData;

/// Errors that can occur while loading an OBJ model.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("face at line {line} is not a triangle")]
    NonTriangularFace { line: usize },

    #[error("vertex index out of range at line {line}")]
    IndexOutOfRange { line: usize },
}

/// Result type for OBJ loading.
pub type ObjResult<T> = Result<T, ObjError>;

/// Load a triangulated OBJ file.
///
/// Missing vertex normals are replaced by the face normal computed from
/// the triangle winding; missing texture coordinates become `[0, 0]`.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<MeshData> {
    let text = fs::read_to_string(&path)?;
    let mesh = parse_obj(&text)?;

    log::info!(
        "Loaded model {} with {} triangles",
        path.as_ref().display(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Parse OBJ text into mesh data.
pub fn parse_obj(text: &str) -> ObjResult<MeshData> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut mesh = MeshData::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line)?;
                positions.push(Vec3::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line)?;
                normals.push(Vec3::new(x, y, z));
            }
            Some("vt") => {
                let [u, v] = parse_floats::<2>(&mut tokens, line)?;
                uvs.push([u, v]);
            }
            Some("f") => {
                let refs: Vec<&str> = tokens.collect();
                if refs.len() != 3 {
                    return Err(ObjError::NonTriangularFace { line });
                }

                let mut corners = [FaceCorner::default(); 3];
                for (corner, text) in corners.iter_mut().zip(&refs) {
                    *corner = parse_face_corner(text, &positions, &normals, &uvs, line)?;
                }

                // Fall back to the face normal when any corner lacks one.
                let fallback = (corners[1].position - corners[0].position)
                    .cross(corners[2].position - corners[0].position)
                    .normalize_or_zero();

                for corner in corners {
                    mesh.push_vertex(
                        corner.position,
                        corner.normal.unwrap_or(fallback),
                        corner.uv.unwrap_or([0.0, 0.0]),
                    );
                }
            }
            // Comments, groups, materials and empty lines are skipped.
            _ => {}
        }
    }

    Ok(mesh)
}

#[derive(Copy, Clone, Default)]
struct FaceCorner {
    position: Vec3,
    normal: Option<Vec3>,
    uv: Option<[f32; 2]>,
}

fn parse_floats<const N: usize>(
    tokens: &mut dyn Iterator<Item = &str>,
    line: usize,
) -> ObjResult<[f32; N]> {
    let mut out = [0.0f32; N];
    for value in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| ObjError::Parse {
            line,
            msg: "missing coordinate".into(),
        })?;
        *value = token.parse().map_err(|_| ObjError::Parse {
            line,
            msg: format!("invalid number `{token}`"),
        })?;
    }
    Ok(out)
}

/// Parse one face vertex reference: `v`, `v/vt`, `v//vn` or `v/vt/vn`.
fn parse_face_corner(
    text: &str,
    positions: &[Vec3],
    normals: &[Vec3],
    uvs: &[[f32; 2]],
    line: usize,
) -> ObjResult<FaceCorner> {
    let mut parts = text.splitn(3, '/');

    let position = match parts.next() {
        Some(token) if !token.is_empty() => {
            let index = resolve_index(token, positions.len(), line)?;
            positions[index]
        }
        _ => {
            return Err(ObjError::Parse {
                line,
                msg: format!("invalid face reference `{text}`"),
            })
        }
    };

    let uv = match parts.next() {
        Some("") | None => None,
        Some(token) => Some(uvs[resolve_index(token, uvs.len(), line)?]),
    };

    let normal = match parts.next() {
        Some("") | None => None,
        Some(token) => Some(normals[resolve_index(token, normals.len(), line)?]),
    };

    Ok(FaceCorner {
        position,
        normal,
        uv,
    })
}

/// Resolve a 1-based (or negative, end-relative) OBJ index.
fn resolve_index(token: &str, len: usize, line: usize) -> ObjResult<usize> {
    let index: isize = token.parse().map_err(|_| ObjError::Parse {
        line,
        msg: format!("invalid index `{token}`"),
    })?;

    let resolved = if index > 0 {
        (index - 1) as usize
    } else if index < 0 {
        let back = (-index) as usize;
        if back > len {
            return Err(ObjError::IndexOutOfRange { line });
        }
        len - back
    } else {
        return Err(ObjError::IndexOutOfRange { line });
    };

    if resolved >= len {
        return Err(ObjError::IndexOutOfRange { line });
    }

    Ok(resolved)
}
