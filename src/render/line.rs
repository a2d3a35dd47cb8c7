//! Bresenham line tracing and polygon outlines.

use super::framebuffer::FrameBuffer;
use super::rasterizer::Polygon;
use crate::color::Color;
use crate::math::Vec2;

/// Iterator over the pixels of a Bresenham line, both endpoints included.
///
/// Bresenham's algorithm determines which pixels to illuminate using only
/// integer arithmetic. It steps one pixel at a time along the dominant axis
/// (the one with the greater distance) and tracks an error term measuring how
/// far the ideal line has drifted from the current minor-axis position. When
/// the accumulated error crosses zero, it also steps along the minor axis.
///
/// The endpoints are first put in a canonical order (ascending along the
/// dominant axis), so tracing `a -> b` and `b -> a` visits exactly the same
/// pixels.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    /// Remaining pixels, including the current one.
    remaining: u64,
    x_dominant: bool,
    /// Step direction along the minor axis (+1 or -1).
    minor_step: i32,
    /// 2 * delta along the dominant axis.
    major_delta2: i64,
    /// 2 * delta along the minor axis.
    minor_delta2: i64,
    error: i64,
}

impl BresenhamLine {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = (x1 as i64 - x0 as i64).abs();
        let dy = (y1 as i64 - y0 as i64).abs();
        let x_dominant = dx >= dy;

        // Canonical start: the endpoint with the smaller dominant coordinate.
        let ((sx, sy), (ex, ey)) = if (x_dominant && x0 > x1) || (!x_dominant && y0 > y1) {
            ((x1, y1), (x0, y0))
        } else {
            ((x0, y0), (x1, y1))
        };

        let (major, minor, minor_step) = if x_dominant {
            (dx, dy, if ey >= sy { 1 } else { -1 })
        } else {
            (dy, dx, if ex >= sx { 1 } else { -1 })
        };

        Self {
            x: sx,
            y: sy,
            remaining: major as u64 + 1,
            x_dominant,
            minor_step,
            major_delta2: 2 * major,
            minor_delta2: 2 * minor,
            error: 2 * minor - major,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = (self.x, self.y);
        self.remaining -= 1;

        if self.remaining > 0 {
            // Error reached zero: the ideal line is at least half a pixel
            // away, so move along the minor axis too.
            if self.error >= 0 {
                if self.x_dominant {
                    self.y += self.minor_step;
                } else {
                    self.x += self.minor_step;
                }
                self.error -= self.major_delta2;
            }
            self.error += self.minor_delta2;
            if self.x_dominant {
                self.x += 1;
            } else {
                self.y += 1;
            }
        }
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

/// Every pixel on the integer line from `(x0, y0)` to `(x1, y1)`.
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    BresenhamLine::new(x0, y0, x1, y1).collect()
}

/// Clips the segment `a -> b` to `[min, max]` on both axes (Liang–Barsky).
///
/// Returns `None` when the segment lies entirely outside.
fn clip_segment(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some((
        Vec2::new(a.x + t0 * d.x, a.y + t0 * d.y),
        Vec2::new(a.x + t1 * d.x, a.y + t1 * d.y),
    ))
}

/// Traces one edge into the buffer.
///
/// Endpoints are truncated to integers. Segments reaching far outside the
/// surface (extreme projections near the camera plane) are first clipped to a
/// margin around it so tracing cost stays bounded; pixels still outside the
/// surface are discarded by the buffer.
pub fn draw_line(buffer: &mut FrameBuffer, a: Vec2, b: Vec2, depth: f64, color: u32) {
    let margin = 2.0;
    let min = Vec2::new(-margin, -margin);
    let max = Vec2::new(
        buffer.width() as f64 + margin,
        buffer.height() as f64 + margin,
    );
    let inside = |p: Vec2| p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y;

    let (a, b) = if inside(a) && inside(b) {
        (a, b)
    } else {
        match clip_segment(a, b, min, max) {
            Some(clipped) => clipped,
            None => return,
        }
    };

    let (x0, y0) = a.to_pixel();
    let (x1, y1) = b.to_pixel();
    for (x, y) in BresenhamLine::new(x0, y0, x1, y1) {
        buffer.plot_outline(x, y, depth, color);
    }
}

/// Draws every edge of the polygon, including the closing edge from the last
/// point back to the first.
pub fn draw_outline(polygon: &Polygon, color: Color, buffer: &mut FrameBuffer) {
    let points = &polygon.points;
    let argb = color.to_argb();
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_line(buffer, a, b, polygon.depth, argb);
    }
}
