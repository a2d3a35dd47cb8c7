//! Between-frame state of an interactive viewer.
//!
//! A [`Session`] owns the current mesh and every knob the viewer exposes
//! (rotation, zoom, field of view, ambient light, culling, visibility
//! strategy). Front ends translate their input into [`Command`]s, call
//! [`Session::tick`] once per frame and then [`Session::render`].

use tracing::{debug, info};

use crate::camera::Camera;
use crate::color::BACKGROUND;
use crate::config::{
    RenderConfig, AMBIENT_MAX, AMBIENT_MIN, FOV_MAX, FOV_MIN, ROTATION_SPEED,
    ROTATION_SPEED_XY_SECONDARY,
};
use crate::error::{FrameError, MeshResult};
use crate::light::DirectionalLight;
use crate::math::Vec3;
use crate::mesh::Mesh;
use crate::pipeline::{FrameInput, FrameStats, Pipeline};
use crate::render::{RasterizerType, Surface};
use crate::shapes::ShapeKind;
use crate::visibility::{DepthMetric, VisibilityStrategy};

/// Which axes advance every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    X,
    Y,
    Z,
    /// X and Y together at slightly different speeds.
    XY,
    #[default]
    Stopped,
}

impl RotationMode {
    /// Per-tick angle increments around (x, y, z), in radians.
    pub fn step(self) -> Vec3 {
        match self {
            RotationMode::X => Vec3::new(ROTATION_SPEED, 0.0, 0.0),
            RotationMode::Y => Vec3::new(0.0, ROTATION_SPEED, 0.0),
            RotationMode::Z => Vec3::new(0.0, 0.0, ROTATION_SPEED),
            RotationMode::XY => Vec3::new(ROTATION_SPEED, ROTATION_SPEED_XY_SECONDARY, 0.0),
            RotationMode::Stopped => Vec3::ZERO,
        }
    }
}

impl std::fmt::Display for RotationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationMode::X => write!(f, "X"),
            RotationMode::Y => write!(f, "Y"),
            RotationMode::Z => write!(f, "Z"),
            RotationMode::XY => write!(f, "XY"),
            RotationMode::Stopped => write!(f, "Stopped"),
        }
    }
}

/// A user action applied between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetRotation(RotationMode),
    SelectShape(ShapeKind),
    /// Replace the mesh with an already validated one (e.g. an OBJ import).
    LoadMesh(Mesh),
    ToggleCulling,
    SetStrategy(VisibilityStrategy),
    SetRasterizer(RasterizerType),
    ZoomIn,
    ZoomOut,
    /// Clamped to `[FOV_MIN, FOV_MAX]`.
    SetFov(f64),
    /// Clamped to `[AMBIENT_MIN, AMBIENT_MAX]`.
    SetAmbient(f64),
    TogglePause,
}

/// The mesh being shown plus all viewer settings.
#[derive(Debug)]
pub struct Session {
    mesh: Mesh,
    /// Built-in shape the mesh came from; `None` for imported meshes.
    shape: Option<ShapeKind>,
    /// Accumulated rotation around x, y and z.
    angles: Vec3,
    rotation_mode: RotationMode,
    paused: bool,
    camera: Camera,
    light: DirectionalLight,
    back_face_culling: bool,
    strategy: VisibilityStrategy,
    metric: DepthMetric,
    pipeline: Pipeline,
}

impl Session {
    /// Starts a session showing the cube.
    pub fn new(config: &RenderConfig) -> MeshResult<Self> {
        let mesh = ShapeKind::Cube.build()?;
        let mut session = Self::with_mesh(mesh, config);
        session.shape = Some(ShapeKind::Cube);
        Ok(session)
    }

    /// Starts a session showing `mesh`.
    pub fn with_mesh(mesh: Mesh, config: &RenderConfig) -> Self {
        Self {
            mesh,
            shape: None,
            angles: Vec3::ZERO,
            rotation_mode: RotationMode::default(),
            paused: false,
            camera: Camera::new(config.camera_distance, config.fov),
            light: DirectionalLight::new(config.light_direction, config.ambient),
            back_face_culling: config.back_face_culling,
            strategy: VisibilityStrategy::default(),
            metric: DepthMetric::default(),
            pipeline: Pipeline::default(),
        }
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// Only [`Command::SelectShape`] can fail, if the shape builder produces
    /// an invalid mesh. The current mesh is kept in that case.
    pub fn apply(&mut self, command: Command) -> MeshResult<()> {
        match command {
            Command::SetRotation(mode) => {
                self.rotation_mode = mode;
                info!(%mode, "rotation mode");
            }
            Command::SelectShape(kind) => {
                let mesh = kind.build()?;
                self.replace_mesh(mesh, Some(kind));
            }
            Command::LoadMesh(mesh) => self.replace_mesh(mesh, None),
            Command::ToggleCulling => {
                self.back_face_culling = !self.back_face_culling;
                info!(enabled = self.back_face_culling, "back-face culling");
            }
            Command::SetStrategy(strategy) => {
                self.strategy = strategy;
                info!(%strategy, "visibility strategy");
            }
            Command::SetRasterizer(rasterizer) => {
                self.pipeline.set_rasterizer(rasterizer);
                info!(%rasterizer, "rasterizer");
            }
            Command::ZoomIn => {
                self.camera.zoom_in();
                debug!(distance = self.camera.distance, "zoom in");
            }
            Command::ZoomOut => {
                self.camera.zoom_out();
                debug!(distance = self.camera.distance, "zoom out");
            }
            Command::SetFov(fov) => {
                // NaN keeps the current value.
                if !fov.is_nan() {
                    self.camera.fov = fov.clamp(FOV_MIN, FOV_MAX);
                }
                debug!(fov = self.camera.fov, "field of view");
            }
            Command::SetAmbient(ambient) => {
                if !ambient.is_nan() {
                    self.light.set_ambient(ambient.clamp(AMBIENT_MIN, AMBIENT_MAX));
                }
                debug!(ambient = self.light.ambient_intensity, "ambient light");
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "rotation");
            }
        }
        Ok(())
    }

    fn replace_mesh(&mut self, mesh: Mesh, shape: Option<ShapeKind>) {
        debug!(
            from = self.mesh.name(),
            to = mesh.name(),
            vertices = mesh.vertices().len(),
            faces = mesh.faces().len(),
            "switching mesh"
        );
        self.mesh = mesh;
        self.shape = shape;
    }

    /// Advances the rotation angles by one frame's worth, unless paused.
    pub fn tick(&mut self) {
        if !self.paused {
            self.angles += self.rotation_mode.step();
        }
    }

    /// Mesh vertices rotated by `R = Rz * Rx * Ry` at the current angles.
    pub fn rotated_vertices(&self) -> Vec<Vec3> {
        let Vec3 { x, y, z } = self.angles;
        self.mesh
            .vertices()
            .iter()
            .map(|v| v.rotate_y(y).rotate_x(x).rotate_z(z))
            .collect()
    }

    /// Clears `surface` to the background color and draws the current frame.
    pub fn render(&self, surface: &mut Surface) -> Result<FrameStats, FrameError> {
        let rotated = self.rotated_vertices();
        let input = FrameInput {
            mesh: &self.mesh,
            rotated: &rotated,
            camera: &self.camera,
            light: &self.light,
            back_face_culling: self.back_face_culling,
            strategy: self.strategy,
            metric: self.metric,
        };
        surface.clear(BACKGROUND);
        self.pipeline.render(&input, surface)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn shape(&self) -> Option<ShapeKind> {
        self.shape
    }

    pub fn angles(&self) -> Vec3 {
        self.angles
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn back_face_culling(&self) -> bool {
        self.back_face_culling
    }

    pub fn strategy(&self) -> VisibilityStrategy {
        self.strategy
    }

    pub fn metric(&self) -> DepthMetric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: DepthMetric) {
        self.metric = metric;
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.pipeline.rasterizer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FOV_DEFAULT, MIN_DISTANCE};
    use approx::assert_relative_eq;

    fn session() -> Session {
        Session::new(&RenderConfig::default()).unwrap()
    }

    #[test]
    fn starts_with_stopped_cube() {
        let s = session();
        assert_eq!(s.shape(), Some(ShapeKind::Cube));
        assert_eq!(s.rotation_mode(), RotationMode::Stopped);
        assert_eq!(s.camera().fov, FOV_DEFAULT);
        assert!(s.back_face_culling());
    }

    #[test]
    fn tick_advances_active_axes() {
        let mut s = session();
        s.apply(Command::SetRotation(RotationMode::XY)).unwrap();
        s.tick();
        s.tick();
        assert_relative_eq!(s.angles(), Vec3::new(0.02, 0.016, 0.0), epsilon = 1e-12);

        s.apply(Command::TogglePause).unwrap();
        s.tick();
        assert_relative_eq!(s.angles(), Vec3::new(0.02, 0.016, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_applies_y_then_x_then_z() {
        let mesh = Mesh::new(
            "point",
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)],
            vec![crate::mesh::Face::from([0, 1, 2])],
            vec![crate::color::Color::RED],
            crate::mesh::MeshRenderPolicy::CLOSED,
        )
        .unwrap();
        let mut s = Session::with_mesh(mesh, &RenderConfig::default());
        // Quarter turns: y maps +X to -Z, x maps -Z to +Y, z maps +Y to -X.
        s.angles = Vec3::new(
            std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
        );
        let rotated = s.rotated_vertices();
        assert_relative_eq!(rotated[0], Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn setters_clamp_to_ranges() {
        let mut s = session();
        s.apply(Command::SetFov(5000.0)).unwrap();
        assert_eq!(s.camera().fov, FOV_MAX);
        s.apply(Command::SetFov(f64::NAN)).unwrap();
        assert_eq!(s.camera().fov, FOV_MAX);
        s.apply(Command::SetAmbient(-3.0)).unwrap();
        assert_eq!(s.light().ambient_intensity, AMBIENT_MIN);
        for _ in 0..100 {
            s.apply(Command::ZoomIn).unwrap();
        }
        assert_eq!(s.camera().distance, MIN_DISTANCE);
    }

    #[test]
    fn switching_meshes_keeps_angles() {
        let mut s = session();
        s.apply(Command::SetRotation(RotationMode::Y)).unwrap();
        s.tick();
        s.apply(Command::SelectShape(ShapeKind::Torus)).unwrap();
        assert_eq!(s.shape(), Some(ShapeKind::Torus));
        assert_eq!(s.mesh().name(), "torus");
        assert_relative_eq!(s.angles().y, ROTATION_SPEED);

        s.apply(Command::LoadMesh(Mesh::empty("nothing"))).unwrap();
        assert_eq!(s.shape(), None);
    }

    #[test]
    fn render_clears_and_reports_visible_faces() {
        let mut s = session();
        let mut surface = Surface::new(800, 600);
        surface.clear(crate::color::Color::RED);
        let stats = s.render(&mut surface).unwrap();
        assert_eq!(stats.visible_faces, 1);
        assert_eq!(surface.get_pixel(0, 0), Some(BACKGROUND));

        s.apply(Command::ToggleCulling).unwrap();
        let stats = s.render(&mut surface).unwrap();
        assert_eq!(stats.visible_faces, 6);
    }
}
