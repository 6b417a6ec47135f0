//! Frame clocks.
//!
//! A clock answers one question: how many seconds passed since it was last
//! asked. It never reports total elapsed time.

use std::collections::VecDeque;
use std::time::Instant;

/// Source of per-frame delta time.
pub trait FrameClock {
    /// Seconds since the previous call. Never negative.
    fn delta_seconds(&mut self) -> f32;
}

/// Clamps a clock delta to a finite, non-negative number of seconds.
#[inline]
#[must_use]
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() {
        delta.max(0.0)
    } else {
        0.0
    }
}

/// Wall clock. The first query returns `0.0`.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    /// Creates a clock that starts counting at its first query.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl FrameClock for SystemClock {
    fn delta_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last = Some(now);
        delta
    }
}

/// Clock that advances by the same step every query.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f32,
}

impl FixedStepClock {
    /// Creates a clock that always reports `step` seconds (negative steps
    /// report zero).
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self {
            step: sanitize_delta(step),
        }
    }

    /// Clock stepping at `hz` frames per second.
    #[must_use]
    pub fn from_hz(hz: u32) -> Self {
        Self::new(1.0 / hz.max(1) as f32)
    }
}

impl FrameClock for FixedStepClock {
    fn delta_seconds(&mut self) -> f32 {
        self.step
    }
}

/// Clock that replays a fixed sequence of deltas, then reports zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    deltas: VecDeque<f32>,
}

impl ScriptedClock {
    /// Creates a clock replaying `deltas` in order.
    #[must_use]
    pub fn new(deltas: impl IntoIterator<Item = f32>) -> Self {
        Self {
            deltas: deltas.into_iter().map(sanitize_delta).collect(),
        }
    }

    /// Queues another delta.
    pub fn push(&mut self, delta: f32) {
        self.deltas.push_back(sanitize_delta(delta));
    }

    /// Deltas not yet reported.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deltas.len()
    }
}

impl FrameClock for ScriptedClock {
    fn delta_seconds(&mut self) -> f32 {
        self.deltas.pop_front().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_first_delta_is_zero() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.delta_seconds(), 0.0);
        assert!(clock.delta_seconds() >= 0.0);
    }

    #[test]
    fn test_scripted_clock_replays_then_idles() {
        let mut clock = ScriptedClock::new([0.1, -1.0, 0.3]);
        assert_eq!(clock.delta_seconds(), 0.1);
        assert_eq!(clock.delta_seconds(), 0.0);
        assert_eq!(clock.delta_seconds(), 0.3);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.delta_seconds(), 0.0);
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.25), 0.25);
        assert_eq!(sanitize_delta(-0.1), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
    }

    #[test]
    fn test_fixed_step_clock() {
        let mut clock = FixedStepClock::from_hz(60);
        assert!((clock.delta_seconds() - 1.0 / 60.0).abs() < 1e-7);
    }
}
