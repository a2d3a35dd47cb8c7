//! Error types for mesh construction, import and frame rendering.
//!
//! Geometric degeneracy (collinear faces, zero-area projections) is not an
//! error anywhere in the crate: those cases have local fallbacks. Only
//! contract violations that would make a frame meaningless end up here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mesh construction.
pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh record that violates the mesh invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// The per-face color list does not line up with the face list.
    #[error("mesh has {faces} faces but {colors} colors")]
    ColorCountMismatch { faces: usize, colors: usize },

    /// A face with fewer than three vertices cannot describe a polygon.
    #[error("face {face} has {len} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, len: usize },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },
}

/// Errors that can occur while importing a mesh from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    #[error("failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The file parsed but holds no usable vertices or faces.
    #[error("{0} contains no vertices or faces")]
    Empty(PathBuf),

    /// The imported data does not form a valid mesh.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Input that cannot be rendered; the surface is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    /// The rotated vertex list does not match the mesh.
    #[error("expected {expected} rotated vertices, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },

    /// A rotated vertex has a NaN or infinite coordinate.
    #[error("rotated vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    /// Camera distance must be finite and positive.
    #[error("invalid camera distance {0}")]
    InvalidDistance(f64),

    /// Field of view must be finite and positive.
    #[error("invalid field of view {0}")]
    InvalidFov(f64),
}

/// Failure to write a surface snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Image(#[from] image::ImageError),
}
