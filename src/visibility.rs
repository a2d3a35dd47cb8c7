//! Face visibility: back-face culling and draw ordering.
//!
//! Two strategies decide which face wins a contested pixel:
//!
//! - **Painter's sort** orders whole faces by a depth metric and draws them
//!   back to front, so nearer faces overwrite farther ones. Cheap, but wrong
//!   for interpenetrating or cyclically overlapping faces.
//! - **Depth buffer** keeps declaration order and lets the per-pixel depth
//!   test in the frame buffer decide. Every face carries one flat depth, its
//!   centroid's distance to the camera.

use tracing::trace;

use crate::geometry::FaceGeometry;
use crate::math::{Vec2, Vec3};
use crate::mesh::{Mesh, SortOrder};

/// How hidden surfaces are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityStrategy {
    /// Sort faces by depth and draw in order.
    #[default]
    PainterSort,
    /// Draw in declaration order with a per-pixel depth test.
    DepthBuffer,
}

impl VisibilityStrategy {
    /// The other strategy.
    pub fn toggled(self) -> Self {
        match self {
            VisibilityStrategy::PainterSort => VisibilityStrategy::DepthBuffer,
            VisibilityStrategy::DepthBuffer => VisibilityStrategy::PainterSort,
        }
    }
}

impl std::fmt::Display for VisibilityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityStrategy::PainterSort => write!(f, "Painter"),
            VisibilityStrategy::DepthBuffer => write!(f, "Z-Buffer"),
        }
    }
}

/// Per-face scalar used by the painter's sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMetric {
    /// Euclidean distance from the camera to the face centroid.
    #[default]
    CameraDistance,
    /// Mean rotated-space Z of the face's vertices.
    AverageZ,
}

impl DepthMetric {
    pub fn evaluate(self, geometry: &FaceGeometry, camera_position: Vec3) -> f64 {
        match self {
            DepthMetric::CameraDistance => geometry.centroid.distance(camera_position),
            DepthMetric::AverageZ => geometry.average_z,
        }
    }
}

/// A face that survived culling, in the order it must be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFace {
    /// Index into the mesh's faces and colors.
    pub index: usize,
    /// Sort metric for the painter's sort, camera distance for the depth buffer.
    pub depth: f64,
    /// Unit normal in rotated space.
    pub normal: Vec3,
}

/// Result of one visibility pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub faces: Vec<ResolvedFace>,
    /// Faces dropped because a vertex could not be projected.
    pub dropped_singular: usize,
}

/// Decides which faces are drawn and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibilityResolver {
    pub strategy: VisibilityStrategy,
    pub metric: DepthMetric,
    pub back_face_culling: bool,
}

impl VisibilityResolver {
    pub fn new(strategy: VisibilityStrategy, metric: DepthMetric, back_face_culling: bool) -> Self {
        Self {
            strategy,
            metric,
            back_face_culling,
        }
    }

    /// Resolves the draw list for one frame.
    ///
    /// `geometry` holds one entry per mesh face and `projected` one entry per
    /// vertex. A face is kept when it faces the camera (if culling applies to
    /// this mesh) and every one of its vertices projected.
    pub fn resolve(
        &self,
        mesh: &Mesh,
        geometry: &[FaceGeometry],
        projected: &[Option<Vec2>],
        camera_position: Vec3,
    ) -> Resolution {
        let policy = mesh.policy();
        let cull = self.back_face_culling && policy.supports_culling;
        let mut resolution = Resolution::default();

        for (index, (face, geo)) in mesh.faces().iter().zip(geometry).enumerate() {
            if cull && !is_front_facing(geo, camera_position) {
                continue;
            }
            if face.indices.iter().any(|&i| projected[i].is_none()) {
                trace!(face = index, "dropping face with unprojectable vertex");
                resolution.dropped_singular += 1;
                continue;
            }
            let depth = match self.strategy {
                VisibilityStrategy::PainterSort => self.metric.evaluate(geo, camera_position),
                VisibilityStrategy::DepthBuffer => geo.centroid.distance(camera_position),
            };
            resolution.faces.push(ResolvedFace {
                index,
                depth,
                normal: geo.normal,
            });
        }

        if self.strategy == VisibilityStrategy::PainterSort && policy.supports_depth_sort {
            painter_sort(&mut resolution.faces, policy.sort_order);
        }
        resolution
    }
}

/// True when the face's normal points toward the camera.
pub fn is_front_facing(geometry: &FaceGeometry, camera_position: Vec3) -> bool {
    geometry.normal.dot(camera_position - geometry.centroid) > 0.0
}

/// Stable sort by depth; equal depths keep declaration order.
pub fn painter_sort(faces: &mut [ResolvedFace], order: SortOrder) {
    match order {
        SortOrder::FarToNear => faces.sort_by(|a, b| b.depth.total_cmp(&a.depth)),
        SortOrder::NearToFar => faces.sort_by(|a, b| a.depth.total_cmp(&b.depth)),
    }
}
