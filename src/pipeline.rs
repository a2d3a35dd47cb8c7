//! Per-frame rendering pipeline.
//!
//! One call to [`Pipeline::render`] runs every stage in order:
//!
//! ```text
//! project -> face geometry -> visibility -> shade -> fill + outline
//! ```
//!
//! The pipeline owns nothing between frames except its rasterizer choice.
//! The caller hands in the rotated vertices and the target surface, and is
//! responsible for clearing the surface beforehand.

use tracing::{debug, trace, warn};

use crate::camera::Camera;
use crate::color::WIREFRAME;
use crate::error::FrameError;
use crate::geometry::FaceGeometry;
use crate::light::DirectionalLight;
use crate::math::{Vec2, Vec3};
use crate::mesh::Mesh;
use crate::projection::Projector;
use crate::render::{
    draw_outline, DepthBuffer, Polygon, Rasterizer, RasterizerDispatcher, RasterizerType, Surface,
};
use crate::visibility::{DepthMetric, VisibilityResolver, VisibilityStrategy};

/// Everything a single frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub mesh: &'a Mesh,
    /// Mesh vertices after this frame's rotation, one per mesh vertex.
    pub rotated: &'a [Vec3],
    pub camera: &'a Camera,
    pub light: &'a DirectionalLight,
    pub back_face_culling: bool,
    pub strategy: VisibilityStrategy,
    pub metric: DepthMetric,
}

impl<'a> FrameInput<'a> {
    /// Input with culling on, painter's sort and the camera-distance metric.
    pub fn new(
        mesh: &'a Mesh,
        rotated: &'a [Vec3],
        camera: &'a Camera,
        light: &'a DirectionalLight,
    ) -> Self {
        Self {
            mesh,
            rotated,
            camera,
            light,
            back_face_culling: true,
            strategy: VisibilityStrategy::default(),
            metric: DepthMetric::default(),
        }
    }

    pub fn with_culling(mut self, back_face_culling: bool) -> Self {
        self.back_face_culling = back_face_culling;
        self
    }

    pub fn with_strategy(mut self, strategy: VisibilityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_metric(mut self, metric: DepthMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Counters reported after each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces that survived culling and projection. Never exceeds the face count.
    pub visible_faces: usize,
    /// Visible faces whose projection had no area; outlined but not filled.
    pub degenerate_skipped: usize,
    /// Faces dropped because a vertex sat on the camera plane.
    pub dropped_singular: usize,
}

/// Composes the rendering stages for one frame.
#[derive(Debug, Default)]
pub struct Pipeline {
    rasterizer: RasterizerDispatcher,
}

impl Pipeline {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            rasterizer: RasterizerDispatcher::new(rasterizer_type),
        }
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    /// Draws one frame of `input` into `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] if the rotated vertex count differs from the
    /// mesh's, a rotated vertex is not finite, or the camera has a non-positive or non-finite distance or FOV.
    /// The surface is left untouched in that case.
    pub fn render(&self, input: &FrameInput, surface: &mut Surface) -> Result<FrameStats, FrameError> {
        let mesh = input.mesh;
        if input.rotated.len() != mesh.vertices().len() {
            let err = FrameError::VertexCountMismatch {
                expected: mesh.vertices().len(),
                actual: input.rotated.len(),
            };
            warn!(%err, "rejecting frame");
            return Err(err);
        }
        if let Some(index) = input.rotated.iter().position(|v| !v.is_finite()) {
            let err = FrameError::NonFiniteVertex { index };
            warn!(%err, "rejecting frame");
            return Err(err);
        }
        if let Err(err) = input.camera.validate() {
            warn!(%err, "rejecting frame");
            return Err(err);
        }
        if mesh.is_empty() {
            debug!(mesh = mesh.name(), "empty mesh, nothing to draw");
            return Ok(FrameStats::default());
        }

        // Stage 1: project every vertex once
        let projector = Projector::new(surface.width(), surface.height(), input.camera);
        let projected = projector.project_all(input.rotated);

        // Stage 2: normals and centroids in rotated space
        let geometry = FaceGeometry::compute(mesh, input.rotated);

        // Stage 3: cull and order
        let resolver =
            VisibilityResolver::new(input.strategy, input.metric, input.back_face_culling);
        let resolution =
            resolver.resolve(mesh, &geometry, &projected, input.camera.position());

        let mut stats = FrameStats {
            visible_faces: resolution.faces.len(),
            degenerate_skipped: 0,
            dropped_singular: resolution.dropped_singular,
        };

        // Lives for this frame only.
        let mut depth_buffer = match input.strategy {
            VisibilityStrategy::DepthBuffer => {
                Some(DepthBuffer::new(surface.width(), surface.height()))
            }
            VisibilityStrategy::PainterSort => None,
        };
        let mut buffer = surface.as_framebuffer(depth_buffer.as_mut());

        // Stages 4 and 5: shade, fill, outline
        for face in &resolution.faces {
            let points: Vec<Vec2> = mesh.faces()[face.index]
                .indices
                .iter()
                .filter_map(|&i| projected[i])
                .collect();
            let color = input.light.shade(mesh.colors()[face.index], face.normal);
            let polygon = Polygon::new(points, color, face.depth);

            if polygon.is_degenerate() {
                trace!(face = face.index, "skipping fill of degenerate face");
                stats.degenerate_skipped += 1;
            } else {
                self.rasterizer.fill_polygon(&polygon, &mut buffer);
            }
            draw_outline(&polygon, WIREFRAME, &mut buffer);
        }

        trace!(
            visible = stats.visible_faces,
            degenerate = stats.degenerate_skipped,
            singular = stats.dropped_singular,
            "frame rendered"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, BACKGROUND};
    use crate::config::LIGHT_DIRECTION;
    use crate::mesh::{Face, MeshRenderPolicy};
    use crate::shapes;

    fn light() -> DirectionalLight {
        DirectionalLight::new(LIGHT_DIRECTION, 0.3)
    }

    #[test]
    fn rejects_mismatched_vertex_count() {
        let cube = shapes::cube().unwrap();
        let rotated = &cube.vertices()[..4];
        let camera = Camera::default();
        let light = light();
        let mut surface = Surface::new(64, 48);
        let before = surface.clone();

        let result = Pipeline::default().render(&FrameInput::new(&cube, rotated, &camera, &light), &mut surface);
        assert_eq!(
            result,
            Err(FrameError::VertexCountMismatch {
                expected: 8,
                actual: 4
            })
        );
        assert_eq!(surface, before);
    }

    #[test]
    fn rejects_non_finite_rotation() {
        let cube = shapes::cube().unwrap();
        let mut rotated = cube.vertices().to_vec();
        rotated[5] = cube.vertices()[5].rotate_y(f64::NAN);
        let camera = Camera::default();
        let light = light();
        let mut surface = Surface::new(64, 48);
        let before = surface.clone();

        let input = FrameInput::new(&cube, &rotated, &camera, &light).with_culling(false);
        let result = Pipeline::default().render(&input, &mut surface);
        assert_eq!(result, Err(FrameError::NonFiniteVertex { index: 5 }));
        assert_eq!(surface, before);
    }

    #[test]
    fn rejects_invalid_camera() {
        let cube = shapes::cube().unwrap();
        let light = light();
        let mut surface = Surface::new(64, 48);
        for camera in [Camera::new(0.0, 500.0), Camera::new(5.0, f64::NAN)] {
            let input = FrameInput::new(&cube, cube.vertices(), &camera, &light);
            assert!(Pipeline::default().render(&input, &mut surface).is_err());
        }
        assert!(surface.pixels().iter().all(|&p| p == BACKGROUND.to_argb()));
    }

    #[test]
    fn front_face_is_lit_at_full_intensity() {
        let cube = shapes::cube().unwrap();
        let camera = Camera::default();
        let light = light();
        let mut surface = Surface::new(800, 600);
        let stats = Pipeline::default()
            .render(&FrameInput::new(&cube, cube.vertices(), &camera, &light), &mut surface)
            .unwrap();

        assert_eq!(stats.visible_faces, 1);
        // The -Z face points straight at the light.
        assert_eq!(surface.get_pixel(400, 300), Some(Color::BLUE));
    }

    #[test]
    fn degenerate_face_is_outlined_but_not_filled() {
        let mesh = Mesh::new(
            "sliver",
            vec![
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            vec![Face::from([0, 1, 2])],
            vec![Color::RED],
            MeshRenderPolicy::CLOSED,
        )
        .unwrap();
        let camera = Camera::default();
        let light = light();
        let mut surface = Surface::new(800, 600);
        let input = FrameInput::new(&mesh, mesh.vertices(), &camera, &light).with_culling(false);
        let stats = Pipeline::default().render(&input, &mut surface).unwrap();

        assert_eq!(stats.visible_faces, 1);
        assert_eq!(stats.degenerate_skipped, 1);
        assert_eq!(surface.get_pixel(400, 300), Some(WIREFRAME));
        assert!(!surface.pixels().contains(&Color::RED.to_argb()));
    }
}
