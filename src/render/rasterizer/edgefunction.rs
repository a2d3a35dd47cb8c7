//! Edge function-based polygon rasterization.
//!
//! This module fills convex polygons using the edge function algorithm, the
//! foundation of modern GPU rasterization. Each pixel in the polygon's
//! bounding box is tested against one edge equation per polygon edge.
//!
//! # Algorithm Overview
//!
//! The edge function algorithm works by:
//! 1. Computing a bounding box around the polygon
//! 2. For each pixel in the bounding box, evaluating every edge function
//! 3. A pixel is inside the polygon if all edge functions have the same sign
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! Its sign tells which side of the edge P lies on; zero means P is exactly
//! on the edge and counts as inside.
//!
//! # Winding Order
//!
//! Both windings are handled by checking the sign of the total signed area.
//! For one winding every edge function is non-negative on interior points,
//! for the other every one is non-positive.
//!
//! # Convexity
//!
//! The all-same-sign test only describes the interior of a convex polygon.
//! Concave faces must go through the scanline rasterizer instead.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::{Polygon, Rasterizer};
use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// Convex polygon rasterizer using the edge function algorithm.
///
/// # Performance Considerations
///
/// The bounding box approach means many pixels outside the polygon are
/// tested, especially for thin faces seen almost edge-on.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new edge function rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    ///
    /// Positive when P is on one side of AB, negative on the other, zero on it.
    #[inline]
    fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f64 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Whether `p` lies inside or on the boundary of the convex polygon.
    ///
    /// `orientation` is the sign of the polygon's signed area.
    #[inline]
    fn covers(points: &[Vec2], orientation: f64, p: Vec2) -> bool {
        let n = points.len();
        (0..n).all(|i| {
            let w = Self::edge_function(points[i], points[(i + 1) % n], p);
            w * orientation <= 0.0
        })
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer) {
        if polygon.is_degenerate() {
            return;
        }
        let Some((min_x, min_y, max_x, max_y)) = polygon.clipped_bounds(buffer) else {
            return;
        };

        // E(P) as written above is (P - A) x (B - A), the negated shoelace
        // term, so interior points have the opposite sign to the area.
        let orientation = polygon.signed_area2().signum();
        let color = polygon.color.to_argb();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if Self::covers(&polygon.points, orientation, p) {
                    buffer.plot(x, y, polygon.depth, color);
                }
            }
        }
    }
}
