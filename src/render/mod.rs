//! Pixel targets and the algorithms that write into them.

pub mod framebuffer;
pub mod line;
pub mod rasterizer;
pub mod surface;

pub use framebuffer::FrameBuffer;
pub use line::{bresenham, draw_line, draw_outline, BresenhamLine};
pub use rasterizer::{
    EdgeFunctionRasterizer, Polygon, Rasterizer, RasterizerDispatcher, RasterizerType,
    ScanlineRasterizer, DEGENERATE_AREA,
};
pub use surface::{DepthBuffer, Surface};
