//! The animation context: every piece of animated state in one owner.
//!
//! ```text
//! advance(delta):
//!   1. flame.tick(delta)                      → sprite offset steps
//!   2. starfield.y += ratio * delta
//!   3. spin: reset if >= 2π, then += speed * π * delta * ratio
//! ```
//!
//! `advance` is pure state-in, state-out. Camera controls and rendering are
//! the caller's business.

use ignition_shared::{FlameConfig, IgnitionConfig, RocketConfig};
use tracing::debug;

use crate::clock::sanitize_delta;
use crate::flame::{FlameAnimation, SpriteOffset};
use crate::motion::{RocketSpin, StarfieldScroll};
use crate::texture::UvWindow;

/// What one call to [`AnimationContext::advance`] produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameAdvance {
    /// Seconds consumed.
    pub delta: f32,
    /// Sprite frames stepped this call.
    pub sprite_steps: u32,
    /// Raw sprite offset after the call.
    pub sprite_offset_x: f64,
    /// Raw starfield offset after the call.
    pub starfield_offset_y: f64,
    /// Rocket rotation after the call.
    pub rotation_y: f32,
    /// The rotation was reset to zero before this call's increment.
    pub spin_wrapped: bool,
}

/// Owner of all per-frame animation state.
#[derive(Debug, Clone)]
pub struct AnimationContext {
    flame: FlameAnimation,
    sprite: SpriteOffset,
    starfield: StarfieldScroll,
    spin: RocketSpin,
    baseline_fps: f32,
    tiles: u32,
}

impl AnimationContext {
    /// Creates a context at rest.
    #[must_use]
    pub fn new(flame: &FlameConfig, rocket: &RocketConfig) -> Self {
        Self {
            flame: FlameAnimation::new(flame.frames_per_second, flame.tile_step()),
            sprite: SpriteOffset::default(),
            starfield: StarfieldScroll::default(),
            spin: RocketSpin::new(rocket.base_rotation_speed),
            baseline_fps: rocket.baseline_fps,
            tiles: flame.tiles,
        }
    }

    /// Creates a context from the full scene configuration.
    #[must_use]
    pub fn from_config(config: &IgnitionConfig) -> Self {
        Self::new(&config.flame, &config.rocket)
    }

    /// Advances every animated quantity by `delta` seconds.
    pub fn advance(&mut self, delta: f32) -> FrameAdvance {
        let delta = sanitize_delta(delta);
        let ratio = self.speed_ratio();

        let sprite_steps = self.flame.tick(delta, &mut self.sprite);
        self.starfield.advance(delta, ratio);
        let spin_wrapped = self.spin.advance(delta, ratio);

        FrameAdvance {
            delta,
            sprite_steps,
            sprite_offset_x: self.sprite.x,
            starfield_offset_y: self.starfield.y,
            rotation_y: self.spin.rotation_y,
            spin_wrapped,
        }
    }

    /// Current sprite frames per second.
    #[must_use]
    pub fn frames_per_second(&self) -> u32 {
        self.flame.frames_per_second()
    }

    /// Scene speed relative to the baseline rate.
    #[must_use]
    pub fn speed_ratio(&self) -> f32 {
        self.flame.frames_per_second() as f32 / self.baseline_fps
    }

    /// Changes the sprite rate; the frame interval follows immediately.
    pub fn set_frames_per_second(&mut self, frames_per_second: u32) {
        self.flame.set_frames_per_second(frames_per_second);
        debug!(
            "Flame rate {} fps (interval {:.4}s)",
            self.flame.frames_per_second(),
            self.flame.frame_interval()
        );
    }

    /// Overwrites the sprite offset.
    pub fn set_sprite_offset(&mut self, x: f32) {
        self.sprite.x = f64::from(x);
    }

    /// Flame stepping state.
    #[must_use]
    pub fn flame(&self) -> &FlameAnimation {
        &self.flame
    }

    /// Flame sprite offset.
    #[must_use]
    pub fn sprite_offset(&self) -> SpriteOffset {
        self.sprite
    }

    /// Starfield scroll.
    #[must_use]
    pub fn starfield(&self) -> StarfieldScroll {
        self.starfield
    }

    /// Rocket spin.
    #[must_use]
    pub fn spin(&self) -> RocketSpin {
        self.spin
    }

    /// Texture window the flame quad should sample. The offset is folded.
    #[must_use]
    pub fn flame_window(&self) -> UvWindow {
        UvWindow::strip(self.tiles).with_offset(self.sprite.folded(), 0.0)
    }

    /// Texture window the starfield plane should sample. The offset is
    /// folded.
    #[must_use]
    pub fn starfield_window(&self) -> UvWindow {
        UvWindow::FULL.with_offset(0.0, self.starfield.folded())
    }
}

impl Default for AnimationContext {
    fn default() -> Self {
        Self::from_config(&IgnitionConfig::default())
    }
}
