//! Perspective projection from rotated model space to screen space.
//!
//! The projection is the classic "divide by depth" model:
//!
//! ```text
//! factor   = fov / (distance + z)
//! screen_x = x * factor + width / 2
//! screen_y = y * factor + height / 2
//! ```
//!
//! There is no near plane and no frustum clipping. Points with negative
//! `distance + z` (behind the camera) project mirrored through the centre of
//! the screen. The only rejected input is the singularity itself.

use crate::camera::Camera;
use crate::math::{Vec2, Vec3};

/// `|distance + z|` below this is treated as the projection singularity.
pub const PROJECTION_EPSILON: f64 = 1e-9;

/// Projects vertices for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    half_width: f64,
    half_height: f64,
    distance: f64,
    fov: f64,
}

impl Projector {
    pub fn new(width: u32, height: u32, camera: &Camera) -> Self {
        Self {
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
            distance: camera.distance,
            fov: camera.fov,
        }
    }

    /// Projects a single vertex.
    ///
    /// Returns `None` when the vertex lies on the camera plane
    /// (`|distance + z| < PROJECTION_EPSILON`), where the projection is
    /// undefined. Faces that touch such a vertex are dropped for the frame.
    #[inline]
    pub fn project(&self, v: Vec3) -> Option<Vec2> {
        let denominator = self.distance + v.z;
        if denominator.abs() < PROJECTION_EPSILON {
            return None;
        }
        let factor = self.fov / denominator;
        Some(Vec2::new(
            v.x * factor + self.half_width,
            v.y * factor + self.half_height,
        ))
    }

    /// Projects every vertex, keeping indices aligned with the input.
    pub fn project_all(&self, vertices: &[Vec3]) -> Vec<Option<Vec2>> {
        vertices.iter().map(|&v| self.project(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_factor_origin_maps_to_screen_centre() {
        // fov == distance + z gives factor 1.
        let projector = Projector::new(800, 600, &Camera::new(5.0, 5.0));
        let p = projector.project(Vec3::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn factor_scales_offsets() {
        let projector = Projector::new(800, 600, &Camera::new(5.0, 500.0));
        let p = projector.project(Vec3::new(1.0, -1.0, 0.0)).unwrap();
        assert_relative_eq!(p.x, 500.0);
        assert_relative_eq!(p.y, 200.0);
    }

    #[test]
    fn farther_points_move_toward_centre() {
        let projector = Projector::new(800, 600, &Camera::new(5.0, 500.0));
        let near = projector.project(Vec3::new(1.0, 0.0, -1.0)).unwrap();
        let far = projector.project(Vec3::new(1.0, 0.0, 1.0)).unwrap();
        assert!(near.x > far.x);
        assert!(far.x > 400.0);
    }

    #[test]
    fn camera_plane_is_rejected() {
        let projector = Projector::new(800, 600, &Camera::new(5.0, 500.0));
        assert_eq!(projector.project(Vec3::new(1.0, 1.0, -5.0)), None);
    }

    #[test]
    fn behind_camera_is_mirrored() {
        let projector = Projector::new(800, 600, &Camera::new(5.0, 500.0));
        let p = projector.project(Vec3::new(1.0, 0.0, -6.0)).unwrap();
        assert!(p.x < 400.0);
    }

    #[test]
    fn project_all_keeps_alignment() {
        let projector = Projector::new(100, 100, &Camera::new(5.0, 500.0));
        let projected = projector.project_all(&[
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
        ]);
        assert_eq!(projected.len(), 3);
        assert!(projected[0].is_some());
        assert!(projected[1].is_none());
        assert!(projected[2].is_some());
    }
}
