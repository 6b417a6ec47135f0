//! Viewport sizing.

use ignition_shared::ViewportConfig;

/// What a renderer needs to apply after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportUpdate {
    /// Logical width in CSS pixels.
    pub width: u32,
    /// Logical height in CSS pixels.
    pub height: u32,
    /// Camera aspect ratio.
    pub aspect: f32,
    /// Effective pixel ratio after capping.
    pub pixel_ratio: f32,
    /// Drawing buffer width in device pixels.
    pub physical_width: u32,
    /// Drawing buffer height in device pixels.
    pub physical_height: u32,
}

/// Tracks the drawing surface size and pixel ratio.
#[derive(Debug, Clone)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
    resize_count: u64,
}

impl Viewport {
    /// Creates a viewport at the configured initial size, pixel ratio 1.
    #[must_use]
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pixel_ratio: 1.0,
            max_pixel_ratio: config.max_pixel_ratio,
            resize_count: 0,
        }
    }

    /// Records a new surface size and returns the values to apply.
    ///
    /// The pixel ratio is capped at the configured maximum.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> ViewportUpdate {
        self.width = width;
        self.height = height;
        self.pixel_ratio = device_pixel_ratio.max(f32::EPSILON).min(self.max_pixel_ratio);
        self.resize_count += 1;
        self.current()
    }

    /// Values for the current size.
    #[must_use]
    pub fn current(&self) -> ViewportUpdate {
        ViewportUpdate {
            width: self.width,
            height: self.height,
            aspect: self.aspect(),
            pixel_ratio: self.pixel_ratio,
            physical_width: scale(self.width, self.pixel_ratio),
            physical_height: scale(self.height, self.pixel_ratio),
        }
    }

    /// Width over height. A zero height counts as one.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Resizes handled so far.
    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(logical: u32, ratio: f32) -> u32 {
    (logical as f32 * ratio).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewport = Viewport::new(&ViewportConfig::default());
        let update = viewport.resize(800, 400, 1.0);

        assert_eq!(update.aspect, 2.0);
        assert_eq!(update.physical_width, 800);
        assert_eq!(viewport.resize_count(), 1);
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let mut viewport = Viewport::new(&ViewportConfig::default());
        let update = viewport.resize(100, 50, 3.0);

        assert_eq!(update.pixel_ratio, 2.0);
        assert_eq!(update.physical_width, 200);
        assert_eq!(update.physical_height, 100);
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let mut viewport = Viewport::new(&ViewportConfig::default());
        let update = viewport.resize(640, 0, 1.0);
        assert_eq!(update.aspect, 640.0);
    }
}
