//! Texture windows: which part of a repeat-addressed texture a quad samples.

use ignition_shared::Vec2;

/// Offset and repeat applied to a quad's texture coordinates.
///
/// Works in the usual "v up" convention: sampled `uv = base_uv * repeat +
/// offset`. [`UvWindow::corners`] converts to the "v down" image space GPU
/// engines sample in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvWindow {
    /// Shift of the sampled window.
    pub offset: Vec2,
    /// Size of the sampled window; `0.25` on x shows one tile of four.
    pub repeat: Vec2,
}

impl UvWindow {
    /// The whole texture, unshifted.
    pub const FULL: Self = Self {
        offset: Vec2::ZERO,
        repeat: Vec2::ONE,
    };

    /// A window one tile wide over a horizontal strip of `tiles` tiles.
    #[must_use]
    pub fn strip(tiles: u32) -> Self {
        Self {
            offset: Vec2::ZERO,
            repeat: Vec2::new(1.0 / tiles.max(1) as f32, 1.0),
        }
    }

    /// Same window with a new offset.
    #[must_use]
    pub fn with_offset(self, x: f32, y: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            ..self
        }
    }

    /// Image-space UVs for a quad's corners, ordered bottom-left,
    /// bottom-right, top-right, top-left.
    #[must_use]
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let Vec2 { x: ox, y: oy } = self.offset;
        let Vec2 { x: rx, y: ry } = self.repeat;
        let u0 = ox;
        let u1 = ox + rx;
        // v flips: the bottom edge samples the highest image row.
        let v_bottom = 1.0 - oy;
        let v_top = 1.0 - (oy + ry);
        [[u0, v_bottom], [u1, v_bottom], [u1, v_top], [u0, v_top]]
    }
}
