//! Mesh records consumed by the rendering pipeline.
//!
//! A [`Mesh`] can only be built through [`Mesh::new`] (or the OBJ loader that
//! calls it), which validates the record up front. Everything downstream may
//! therefore index vertices and colors without further checks.

use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::{LoadError, MeshError, MeshResult};
use crate::math::Vec3;

/// A planar polygon described by indices into the mesh's vertex list.
///
/// Winding order determines the normal direction: counter-clockwise when
/// seen from the side the normal points to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<const N: usize> From<[usize; N]> for Face {
    fn from(indices: [usize; N]) -> Self {
        Self::new(indices.to_vec())
    }
}

/// Direction of the painter's sort for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest depth metric first, so nearer faces overwrite farther ones.
    #[default]
    FarToNear,
    /// Smallest depth metric first.
    NearToFar,
}

/// Which depth-based decisions make sense for a mesh's topology.
///
/// Closed, orientable meshes support both. Open one-sided surfaces have no
/// meaningful outside, so culling would drop half of them and sorting gains
/// nothing; they render in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRenderPolicy {
    pub supports_depth_sort: bool,
    pub supports_culling: bool,
    pub sort_order: SortOrder,
}

impl MeshRenderPolicy {
    pub const CLOSED: Self = Self {
        supports_depth_sort: true,
        supports_culling: true,
        sort_order: SortOrder::FarToNear,
    };

    pub const ONE_SIDED: Self = Self {
        supports_depth_sort: false,
        supports_culling: false,
        sort_order: SortOrder::FarToNear,
    };
}

impl Default for MeshRenderPolicy {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Vertices, polygonal faces and one base color per face.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    colors: Vec<Color>,
    policy: MeshRenderPolicy,
}

impl Mesh {
    /// Builds a mesh after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] if the color count differs from the face count,
    /// a face has fewer than three indices, an index is out of range, or a
    /// vertex coordinate is not finite.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        colors: Vec<Color>,
        policy: MeshRenderPolicy,
    ) -> MeshResult<Self> {
        if colors.len() != faces.len() {
            return Err(MeshError::ColorCountMismatch {
                faces: faces.len(),
                colors: colors.len(),
            });
        }

        if let Some(index) = vertices
            .iter()
            .position(|v| !v.is_finite())
        {
            return Err(MeshError::NonFiniteVertex { index });
        }

        for (face_index, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: face_index,
                    len: face.len(),
                });
            }
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            vertices,
            faces,
            colors,
            policy,
        })
    }

    /// A mesh with no geometry. Renders as zero visible faces.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
            colors: Vec::new(),
            policy: MeshRenderPolicy::default(),
        }
    }

    /// Loads a Wavefront OBJ file, merging all of its objects into one mesh.
    ///
    /// Polygons are kept as-is (no triangulation) and every face gets
    /// [`Color::GRAY`]. Faces with fewer than three vertices are dropped.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|source| LoadError::Obj {
                path: path.to_path_buf(),
                source,
            })?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );

            let mut cursor = 0usize;
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };
            for arity in arities {
                let Some(slice) = mesh.indices.get(cursor..cursor + arity) else {
                    break;
                };
                cursor += arity;
                if arity >= 3 {
                    // Indices are per object; rebase onto the merged vertex list.
                    faces.push(Face::new(
                        slice.iter().map(|&i| base + i as usize).collect::<Vec<_>>(),
                    ));
                }
            }
        }

        if vertices.is_empty() || faces.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let colors = vec![Color::GRAY; faces.len()];

        debug!(
            path = %path.display(),
            vertices = vertices.len(),
            faces = faces.len(),
            "loaded OBJ mesh"
        );

        Ok(Self::new(
            name,
            vertices,
            faces,
            colors,
            MeshRenderPolicy::CLOSED,
        )?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn policy(&self) -> MeshRenderPolicy {
        self.policy
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }
}
