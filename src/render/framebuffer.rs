//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a bounds-checked view into a color buffer and, optionally, a
//! per-frame depth buffer. Rasterizers only ever write through this view.

use super::surface::pixel_count;

/// A view into a color buffer and an optional depth buffer.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// for the duration of one frame's rasterization pass.
///
/// # Depth Buffer
///
/// Depth values are camera distances: smaller is nearer. Every slot starts the
/// frame at `f64::INFINITY` and only ever decreases. Without a depth buffer,
/// writes are unconditional and draw order decides visibility.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: Option<&'a mut [f64]>,
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if buffer lengths don't match width * height
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: Option<&'a mut [f64]>,
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            pixel_count(width, height),
            "Color buffer size doesn't match dimensions"
        );
        if let Some(depth) = &depth_buffer {
            debug_assert_eq!(
                depth.len(),
                pixel_count(width, height),
                "Depth buffer size doesn't match dimensions"
            );
        }
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a fill pixel, depth-tested when a depth buffer is attached.
    ///
    /// With a depth buffer the pixel is written only if `depth` is strictly
    /// nearer than the stored value, and the stored depth is updated.
    /// Silently ignores out-of-bounds coordinates.
    ///
    /// Returns whether the pixel was written.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, depth: f64, color: u32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if let Some(depths) = self.depth_buffer.as_deref_mut() {
            if depth >= depths[idx] {
                return false;
            }
            depths[idx] = depth;
        }
        self.color_buffer[idx] = color;
        true
    }

    /// Write an outline pixel.
    ///
    /// With a depth buffer the pixel is written if `depth` is not farther than
    /// the stored value, so an outline lands on its own face's fill but never
    /// on a nearer face. A written outline pixel stores `depth`, so farther
    /// faces filled later cannot cover it.
    #[inline]
    pub fn plot_outline(&mut self, x: i32, y: i32, depth: f64, color: u32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if let Some(depths) = self.depth_buffer.as_deref_mut() {
            if depth > depths[idx] {
                return false;
            }
            depths[idx] = depth;
        }
        self.color_buffer[idx] = color;
        true
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None without a depth buffer or out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f64> {
        let idx = self.index(x, y)?;
        self.depth_buffer.as_deref().map(|depths| depths[idx])
    }
}
