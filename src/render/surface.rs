//! Owned pixel targets: the color surface and the per-frame depth buffer.

use std::path::Path;

use tracing::info;

use super::framebuffer::FrameBuffer;
use crate::color::{Color, BACKGROUND};
use crate::error::SnapshotError;

/// Number of pixels in a `width` x `height` target, computed without `u32` overflow.
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// An ARGB8888 pixel surface of fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        let size = pixel_count(width, height);
        Self {
            color_buffer: vec![BACKGROUND.to_argb(); size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = pixel_count(width, height);
        self.color_buffer = vec![BACKGROUND.to_argb(); size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color.to_argb());
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.width as usize + x as usize;
            self.color_buffer[index] = color.to_argb();
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.width as usize + x as usize;
            Some(Color::from_argb(self.color_buffer[index]))
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Pixels as native-endian ARGB8888 bytes, ready for a streaming texture.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|px| px.to_ne_bytes())
            .collect()
    }

    /// Writes the surface to an image file; the format follows the extension.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let image = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = Color::from_argb(self.color_buffer[y as usize * self.width as usize + x as usize]);
            image::Rgb([c.r, c.g, c.b])
        });
        image.save(path.as_ref())?;
        info!(path = %path.as_ref().display(), "saved snapshot");
        Ok(())
    }

    /// Get a FrameBuffer view, optionally attaching a depth buffer of the same size.
    pub fn as_framebuffer<'a>(&'a mut self, depth: Option<&'a mut DepthBuffer>) -> FrameBuffer<'a> {
        debug_assert!(depth
            .as_ref()
            .map_or(true, |d| d.width == self.width && d.height == self.height));
        FrameBuffer::new(
            &mut self.color_buffer,
            depth.map(|d| d.depths.as_mut_slice()),
            self.width,
            self.height,
        )
    }
}

/// One camera distance per pixel, nearest wins.
///
/// Created at frame start with every slot at `f64::INFINITY` and dropped at
/// frame end. Never shared across frames.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    depths: Vec<f64>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f64::INFINITY; pixel_count(width, height)],
            width,
            height,
        }
    }
}
