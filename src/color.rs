//! RGB colors and the ARGB8888 packing used by the pixel surface.

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const LIGHT_BLUE: Self = Self::rgb(173, 216, 230);
    pub const MAGENTA: Self = Self::rgb(255, 100, 235);
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiplies every channel by `factor`, truncating toward zero.
    ///
    /// `factor` is clamped to `[0, 1]` so the result never exceeds `self`.
    pub fn scale(self, factor: f64) -> Self {
        let factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        let channel = |c: u8| (c as f64 * factor) as u8;
        Self::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Packs into ARGB8888 with full alpha.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpacks an ARGB8888 value, ignoring alpha.
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

/// Surface clear color.
pub const BACKGROUND: Color = Color::BLACK;
/// Outline color for every face.
pub const WIREFRAME: Color = Color::WHITE;
