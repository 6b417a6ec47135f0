//! Continuous motion: the scrolling starfield and the spinning rocket.
//!
//! Both run at `speed_ratio = fps / baseline_fps`, so raising the sprite rate
//! speeds the whole scene up together.

use std::f32::consts::{PI, TAU};

/// Vertical texture offset of the starfield backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StarfieldScroll {
    /// Raw offset. Monotonic and unbounded; repeat addressing folds it.
    pub y: f64,
}

impl StarfieldScroll {
    /// Scrolls by `speed_ratio * delta`.
    pub fn advance(&mut self, delta: f32, speed_ratio: f32) {
        self.y += f64::from(speed_ratio) * f64::from(delta);
    }

    /// The offset as the sampler sees it, folded into `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn folded(self) -> f32 {
        self.y.rem_euclid(1.0) as f32
    }
}

/// Spin of the rocket group around its vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketSpin {
    /// Current rotation in radians.
    pub rotation_y: f32,
    /// Half-turns per second at the baseline rate.
    pub base_speed: f32,
}

impl RocketSpin {
    /// Creates a spin at rotation zero.
    #[must_use]
    pub fn new(base_speed: f32) -> Self {
        Self {
            rotation_y: 0.0,
            base_speed,
        }
    }

    /// Advances the spin. Returns `true` if the rotation was reset this call.
    ///
    /// The full-turn check runs before the increment, so a frame may leave
    /// the rotation past `2π`; it is reset to zero on the following call.
    pub fn advance(&mut self, delta: f32, speed_ratio: f32) -> bool {
        let wrapped = self.rotation_y >= TAU;
        if wrapped {
            self.rotation_y = 0.0;
        }
        self.rotation_y += self.base_speed * PI * delta * speed_ratio;
        wrapped
    }
}

impl Default for RocketSpin {
    fn default() -> Self {
        Self::new(1.0)
    }
}
