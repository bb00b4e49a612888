//! Fill colors handed to the renderer.

/// Color used for canvas backgrounds, letterbox bars and borders.
///
/// Only carried through to draw operations; no blending or color-space
/// conversion happens in this crate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    #[default]
    Transparent,
    /// sRGB color with alpha (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8, a: u8 },
}

impl CanvasColor {
    /// Opaque sRGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Srgb { r, g, b, a: 255 }
    }

    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// RGBA channels, transparent as all zeros.
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Srgb { r, g, b, a } => [r, g, b, a],
        }
    }

    /// Whether painting this color has any visible effect.
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent | Self::Srgb { a: 0, .. })
    }
}
