//! Frame timing statistics.

use std::time::Duration;

use tracing::info;

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Timing of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Animation advance time in microseconds.
    pub animation_us: u64,
    /// Render time in microseconds.
    pub render_us: u64,
    /// Events dispatched before the frame.
    pub events_processed: u32,
    /// Simulated seconds consumed.
    pub delta: f32,
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of animation times.
    pub animation_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Sum of simulated seconds.
    pub simulated_seconds: f64,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            animation_us_sum: 0,
            render_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            simulated_seconds: 0.0,
        }
    }

    /// Records a frame's statistics.
    #[allow(clippy::cast_possible_truncation)]
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.animation_us_sum += stats.animation_us;
        self.render_us_sum += stats.render_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.simulated_seconds += f64::from(stats.delta);

        if stats.total_us > TARGET_FRAME_TIME.as_micros() as u64 {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Frames per simulated second: the rate a viewer would see.
    #[must_use]
    pub fn simulated_fps(&self) -> f64 {
        if self.simulated_seconds <= 0.0 {
            return 0.0;
        }
        self.frames_recorded as f64 / self.simulated_seconds
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary of the statistics.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            info!("Frame stats: no frames recorded");
            return;
        }
        let frames = self.frames_recorded as f64;
        info!(
            "Frame stats: {} frames, avg {:.3} ms ({:.1} FPS), min {:.3} ms, max {:.3} ms",
            self.frames_recorded,
            self.avg_frame_ms(),
            self.avg_fps(),
            self.min_frame_us as f64 / 1000.0,
            self.max_frame_us as f64 / 1000.0,
        );
        info!(
            "Frame stats: animation {:.3} ms, render {:.3} ms, over budget {} ({:.1}%), simulated {:.2}s",
            self.animation_us_sum as f64 / frames / 1000.0,
            self.render_us_sum as f64 / frames / 1000.0,
            self.frames_over_budget,
            self.over_budget_ratio() * 100.0,
            self.simulated_seconds,
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(total_us: u64, delta: f32) -> FrameStats {
        FrameStats {
            total_us,
            delta,
            ..FrameStats::default()
        }
    }

    #[test]
    fn test_empty_accumulator() {
        let stats = FrameStatsAccumulator::new();
        assert_eq!(stats.avg_fps(), 0.0);
        assert_eq!(stats.over_budget_ratio(), 0.0);
        assert_eq!(stats.simulated_fps(), 0.0);
    }

    #[test]
    fn test_averages_and_budget() {
        let mut stats = FrameStatsAccumulator::new();
        stats.record(frame(10_000, 0.1));
        stats.record(frame(20_000, 0.1));

        assert!((stats.avg_frame_ms() - 15.0).abs() < 1e-9);
        assert_eq!(stats.min_frame_us, 10_000);
        assert_eq!(stats.max_frame_us, 20_000);
        assert_eq!(stats.frames_over_budget, 1);
        assert!((stats.over_budget_ratio() - 0.5).abs() < 1e-9);
        assert!((stats.simulated_fps() - 10.0).abs() < 1e-3);
    }
}
