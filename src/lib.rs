//! A CPU software renderer for rotating polygonal meshes.
//!
//! Every frame runs the same fixed pipeline on the CPU: perspective
//! projection, per-face normals, back-face culling, painter's sort or a
//! per-pixel depth buffer, flat Lambertian shading, polygon fill and
//! Bresenham outlines. SDL2 is used only to show the result, behind the
//! `window` feature.
//!
//! # Quick Start
//!
//! ```
//! use facet::prelude::*;
//! use facet::config::RenderConfig;
//!
//! let mut session = Session::new(&RenderConfig::default()).unwrap();
//! session.apply(Command::SetRotation(RotationMode::XY)).unwrap();
//! session.tick();
//!
//! let mut surface = Surface::new(800, 600);
//! let stats = session.render(&mut surface).unwrap();
//! assert!(stats.visible_faces <= session.mesh().faces().len());
//! ```

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod session;
pub mod shapes;
pub mod visibility;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use error::{FrameError, LoadError, MeshError, SnapshotError};
pub use mesh::{Face, Mesh, MeshRenderPolicy};
pub use pipeline::{FrameInput, FrameStats, Pipeline};
pub use render::Surface;
pub use session::{Command, RotationMode, Session};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use facet::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Face, Mesh, MeshRenderPolicy, SortOrder};
    pub use crate::shapes::ShapeKind;

    // Math
    pub use crate::math::{Vec2, Vec3};

    // Rendering
    pub use crate::pipeline::{FrameInput, FrameStats, Pipeline};
    pub use crate::render::{RasterizerType, Surface};
    pub use crate::visibility::{DepthMetric, VisibilityStrategy};

    // Session
    pub use crate::session::{Command, RotationMode, Session};

    // Window & Input
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, InputAction, Window};
}
