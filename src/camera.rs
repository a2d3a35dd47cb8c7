//! Fixed-axis viewer used by the projector and the visibility resolver.
//!
//! The camera sits on the Z axis at `(0, 0, -distance)` looking toward +Z.
//! There is no orientation: the mesh rotates, the camera only zooms.

use crate::config::{CAMERA_DISTANCE_DEFAULT, FOV_DEFAULT, MAX_DISTANCE, MIN_DISTANCE, ZOOM_SPEED};
use crate::error::FrameError;
use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Distance from the origin along -Z.
    pub distance: f64,
    /// Scalar multiplied into the projection; larger values zoom in.
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CAMERA_DISTANCE_DEFAULT, FOV_DEFAULT)
    }
}

impl Camera {
    pub fn new(distance: f64, fov: f64) -> Self {
        Self { distance, fov }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.distance)
    }

    /// Moves closer by [`ZOOM_SPEED`], never nearer than [`MIN_DISTANCE`].
    pub fn zoom_in(&mut self) {
        self.distance = (self.distance - ZOOM_SPEED).max(MIN_DISTANCE);
    }

    /// Moves away by [`ZOOM_SPEED`], never farther than [`MAX_DISTANCE`].
    pub fn zoom_out(&mut self) {
        self.distance = (self.distance + ZOOM_SPEED).min(MAX_DISTANCE);
    }

    /// Checks that distance and FOV are finite and positive.
    pub fn validate(&self) -> Result<(), FrameError> {
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(FrameError::InvalidDistance(self.distance));
        }
        if !(self.fov.is_finite() && self.fov > 0.0) {
            return Err(FrameError::InvalidFov(self.fov));
        }
        Ok(())
    }
}
