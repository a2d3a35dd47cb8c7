//! Scanline-based polygon rasterization.
//!
//! This module fills polygons one horizontal line at a time using the
//! even-odd rule. It works for any simple polygon, convex or concave, and
//! touches only the pixels it actually covers.
//!
//! # Algorithm Overview
//!
//! For every pixel row inside the polygon's clipped bounding box:
//!
//! 1. **Intersect** the horizontal line through the row's pixel centres with
//!    every polygon edge
//! 2. **Sort** the intersection X coordinates
//! 3. **Fill** between consecutive pairs (inside, outside, inside, ...)
//!
//! ```text
//!          /\          /\
//!         /  \        /  \
//!   -----x====x------x====x-----   <- scanline at y + 0.5
//!       /      \    /      \
//!      /        \__/        \
//! ```
//!
//! # Half-open Edge Rule
//!
//! An edge from `p` to `q` crosses the scanline `cy` when exactly one of its
//! endpoints is at or above it: `(p.y <= cy) != (q.y <= cy)`. A vertex lying
//! exactly on the scanline is then counted once, not twice, and horizontal
//! edges are skipped entirely, which keeps every row's crossing count even.
//!
//! # References
//!
//! - Foley, van Dam et al., "Computer Graphics: Principles and Practice"

use super::{Polygon, Rasterizer};
use crate::render::framebuffer::FrameBuffer;

/// Even-odd scanline polygon rasterizer.
///
/// A pixel is filled when its centre lies inside the polygon or on its
/// left/right boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Collects the X coordinates where the polygon's edges cross `cy`, sorted.
    fn crossings(polygon: &Polygon, cy: f64, xs: &mut Vec<f64>) {
        xs.clear();
        let points = &polygon.points;
        let n = points.len();
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            if (p.y <= cy) != (q.y <= cy) {
                let t = (cy - p.y) / (q.y - p.y);
                xs.push(p.x + t * (q.x - p.x));
            }
        }
        xs.sort_by(|a, b| a.total_cmp(b));
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_polygon(&self, polygon: &Polygon, buffer: &mut FrameBuffer) {
        if polygon.is_degenerate() {
            return;
        }
        let Some((min_x, min_y, max_x, max_y)) = polygon.clipped_bounds(buffer) else {
            return;
        };

        let color = polygon.color.to_argb();
        let mut xs = Vec::with_capacity(polygon.points.len());

        for y in min_y..=max_y {
            // Sample at pixel centre
            let cy = y as f64 + 0.5;
            Self::crossings(polygon, cy, &mut xs);

            for span in xs.chunks_exact(2) {
                // Pixel x is covered when span[0] <= x + 0.5 <= span[1]
                let start = (span[0] - 0.5).ceil().max(min_x as f64) as i32;
                let end = (span[1] - 0.5).floor().min(max_x as f64) as i32;
                for x in start..=end {
                    buffer.plot(x, y, polygon.depth, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::math::Vec2;

    #[test]
    fn fills_concave_polygon_without_bridging_the_notch() {
        // A "U" shape: the notch between the arms must stay empty.
        let u = Polygon::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 6.0),
                Vec2::new(5.0, 6.0),
                Vec2::new(5.0, 0.0),
                Vec2::new(8.0, 0.0),
                Vec2::new(8.0, 8.0),
                Vec2::new(0.0, 8.0),
            ],
            Color::RED,
            1.0,
        );
        let mut color = vec![0u32; 64];
        let mut fb = FrameBuffer::new(&mut color, None, 8, 8);
        ScanlineRasterizer::new().fill_polygon(&u, &mut fb);

        assert_ne!(fb.get_pixel(1, 1), Some(0));
        assert_ne!(fb.get_pixel(6, 1), Some(0));
        assert_eq!(fb.get_pixel(4, 1), Some(0));
        assert_ne!(fb.get_pixel(4, 7), Some(0));
    }

    #[test]
    fn crossings_count_shared_vertex_once() {
        // Diamond with vertices exactly on the scanline through its middle.
        let diamond = Polygon::new(
            vec![
                Vec2::new(4.0, 0.5),
                Vec2::new(7.5, 4.5),
                Vec2::new(4.0, 8.5),
                Vec2::new(0.5, 4.5),
            ],
            Color::RED,
            1.0,
        );
        let mut xs = Vec::new();
        ScanlineRasterizer::crossings(&diamond, 4.5, &mut xs);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs, vec![0.5, 7.5]);
    }
}
