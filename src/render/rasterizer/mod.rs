//! Polygon fill algorithms.
//!
//! This module provides multiple rasterizer implementations that can be
//! swapped at runtime for testing and benchmarking purposes.
//!
//! Available algorithms:
//! - [`ScanlineRasterizer`]: Even-odd span filling, one scanline at a time
//! - [`EdgeFunctionRasterizer`]: Bounding box iteration with edge function tests

mod edgefunction;
mod scanline;

pub use edgefunction::EdgeFunctionRasterizer;
pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::color::Color;
use crate::math::Vec2;

/// Twice-area threshold (in square pixels) below which a polygon is degenerate.
pub const DEGENERATE_AREA: f64 = 1e-6;

/// A projected face ready for rasterization in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Vec2>,
    pub color: Color,
    /// Flat depth shared by every pixel of the face (smaller is nearer).
    pub depth: f64,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>, color: Color, depth: f64) -> Self {
        Self {
            points,
            color,
            depth,
        }
    }

    /// Twice the signed area (shoelace formula).
    ///
    /// Positive for counter-clockwise winding in a y-up frame, which is
    /// clockwise on screen where y grows downward.
    pub fn signed_area2(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].cross(self.points[(i + 1) % n]))
            .sum()
    }

    /// True for polygons with fewer than three points or (near) zero area,
    /// e.g. faces seen exactly edge-on. Such polygons are never filled.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || !(self.signed_area2().abs() >= DEGENERATE_AREA)
    }

    /// Pixel-space bounding box `(min_x, min_y, max_x, max_y)` clipped to the buffer.
    ///
    /// Returns `None` when the polygon lies entirely off-screen.
    fn clipped_bounds(&self, buffer: &FrameBuffer) -> Option<(i32, i32, i32, i32)> {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let min_x = (min_x.floor().max(0.0)) as i32;
        let min_y = (min_y.floor().max(0.0)) as i32;
        let max_x = (max_x.ceil().min(buffer.width() as f64 - 1.0)) as i32;
        let max_y = (max_y.ceil().min(buffer.height() as f64 - 1.0)) as i32;
        if min_x > max_x || min_y > max_y {
            None
        } else {
            Some((min_x, min_y, max_x, max_y))
        }
    }
}

/// Trait for polygon fill algorithms.
///
/// Implementors define how a polygon's interior is written into a frame
/// buffer. Every covered pixel goes through [`FrameBuffer::plot`] with the
/// polygon's flat depth, so depth testing is the buffer's concern.
pub trait Rasterizer {
    /// Fill a polygon into the frame buffer with its color.
    ///
    /// Degenerate polygons must be ignored without panicking.
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer);
}

/// Available rasterization algorithms.
///
/// Use this enum to select which rasterizer the pipeline should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// Even-odd scanline fill. Handles any simple polygon, convex or not.
    #[default]
    Scanline,
    /// Edge function rasterizer that tests each pixel in the bounding box.
    /// Requires convex polygons.
    EdgeFunction,
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::Scanline => write!(f, "Scanline"),
            RasterizerType::EdgeFunction => write!(f, "EdgeFunction"),
        }
    }
}

/// Holds both rasterizer implementations and forwards to the active one.
#[derive(Debug, Default)]
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    edge_function: EdgeFunctionRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            edge_function: EdgeFunctionRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer) {
        match self.active {
            RasterizerType::Scanline => self.scanline.fill_polygon(polygon, buffer),
            RasterizerType::EdgeFunction => self.edge_function.fill_polygon(polygon, buffer),
        }
    }
}
