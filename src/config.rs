//! Defaults and value ranges for the renderer and its front end.

use crate::math::Vec3;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

pub const FOV_MIN: f64 = 100.0;
pub const FOV_MAX: f64 = 1000.0;
pub const FOV_DEFAULT: f64 = 500.0;
pub const FOV_STEP: f64 = 25.0;

pub const AMBIENT_MIN: f64 = 0.0;
pub const AMBIENT_MAX: f64 = 1.0;
pub const AMBIENT_DEFAULT: f64 = 0.3;
pub const AMBIENT_STEP: f64 = 0.05;

/// Unit vector pointing toward the light, which sits behind the camera.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

pub const CAMERA_DISTANCE_DEFAULT: f64 = 5.0;
pub const MIN_DISTANCE: f64 = 2.0;
pub const MAX_DISTANCE: f64 = 20.0;
pub const ZOOM_SPEED: f64 = 0.5;

/// Radians added per tick when rotating about a single axis.
pub const ROTATION_SPEED: f64 = 0.01;
/// Y-axis speed used while rotating about X and Y together.
pub const ROTATION_SPEED_XY_SECONDARY: f64 = 0.008;

/// Per-run knobs gathered in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub camera_distance: f64,
    pub fov: f64,
    pub ambient: f64,
    pub light_direction: Vec3,
    pub back_face_culling: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            camera_distance: CAMERA_DISTANCE_DEFAULT,
            fov: FOV_DEFAULT,
            ambient: AMBIENT_DEFAULT,
            light_direction: LIGHT_DIRECTION,
            back_face_culling: true,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
