//! Flame sprite stepping.
//!
//! The flame is a horizontal strip of tiles sampled one tile at a time. Time
//! accumulates every frame; each time it crosses the frame interval the
//! sampled window moves one tile to the right.
//!
//! The offset is never folded back into `[0, 1)` here. The texture uses
//! repeat addressing, so `x = 1.25` samples the same tile as `x = 0.25`.

use crate::clock::sanitize_delta;

/// Horizontal texture offset of the flame sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteOffset {
    /// Raw offset. Grows without bound over a session; `f64` keeps whole
    /// tile steps exact for far longer than any session runs.
    pub x: f64,
}

impl SpriteOffset {
    /// The offset as the sampler sees it, folded into `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn folded(self) -> f32 {
        self.x.rem_euclid(1.0) as f32
    }
}

/// Frame-stepping state of the flame sprite.
#[derive(Debug, Clone)]
pub struct FlameAnimation {
    /// Current sprite frames per second.
    frames_per_second: u32,
    /// Seconds between sprite frames (`1 / frames_per_second`).
    frame_interval: f64,
    /// Seconds collected toward the next sprite frame.
    accumulated: f64,
    /// Offset advanced per sprite frame.
    tile_step: f64,
}

impl FlameAnimation {
    /// Creates the animation. A zero `frames_per_second` is raised to one.
    #[must_use]
    pub fn new(frames_per_second: u32, tile_step: f32) -> Self {
        let frames_per_second = frames_per_second.max(1);
        Self {
            frames_per_second,
            frame_interval: 1.0 / f64::from(frames_per_second),
            accumulated: 0.0,
            tile_step: f64::from(tile_step),
        }
    }

    /// Changes the sprite rate. Takes effect on the next tick; time already
    /// accumulated is kept as-is.
    pub fn set_frames_per_second(&mut self, frames_per_second: u32) {
        self.frames_per_second = frames_per_second.max(1);
        self.frame_interval = 1.0 / f64::from(self.frames_per_second);
    }

    /// Current sprite frames per second.
    #[inline]
    #[must_use]
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Seconds between sprite frames.
    #[inline]
    #[must_use]
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Seconds collected toward the next sprite frame.
    #[inline]
    #[must_use]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Offset advanced per sprite frame.
    #[inline]
    #[must_use]
    pub fn tile_step(&self) -> f64 {
        self.tile_step
    }

    /// Advances by `delta` seconds, stepping `offset` once per crossed
    /// interval. Returns the number of steps taken, saturating at
    /// `u32::MAX`.
    ///
    /// The remainder past the last crossing carries over, so the step count
    /// over a span of time does not depend on how that span was sliced into
    /// frames. Non-finite deltas count as zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick(&mut self, delta: f32, offset: &mut SpriteOffset) -> u32 {
        self.accumulated += f64::from(sanitize_delta(delta));

        let crossings = (self.accumulated / self.frame_interval).floor();
        if crossings < 1.0 {
            return 0;
        }
        self.accumulated = (self.accumulated - crossings * self.frame_interval).max(0.0);
        offset.x += crossings * self.tile_step;
        // Float-to-int `as` saturates.
        crossings as u32
    }
}
