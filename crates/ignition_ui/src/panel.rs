//! The parameter panel.

use ignition_core::AnimationContext;
use ignition_shared::FlameConfig;
use tracing::debug;

use crate::control::{ControlId, NumericControl};
use crate::event::{ParamEvent, ParamListener};

/// Offset control step: one tile of the default four-tile strip.
const OFFSET_STEP: f32 = 0.25;

/// The two live-tunable parameters.
#[derive(Debug, Clone)]
pub struct ParamPanel {
    frames_per_second: NumericControl,
    offset_x: NumericControl,
}

impl ParamPanel {
    /// Builds the panel with ranges from the flame configuration.
    #[must_use]
    pub fn new(flame: &FlameConfig) -> Self {
        Self {
            frames_per_second: NumericControl::new(
                ControlId::FramesPerSecond,
                flame.min_fps as f32,
                flame.max_fps as f32,
                1.0,
                flame.frames_per_second as f32,
            ),
            offset_x: NumericControl::new(ControlId::OffsetX, 0.0, 1.0, OFFSET_STEP, 0.0),
        }
    }

    /// Refreshes displayed values from live state.
    pub fn sync(&mut self, context: &AnimationContext) {
        self.frames_per_second
            .listen(context.frames_per_second() as f32);
        self.offset_x.listen(context.sprite_offset().folded());
    }

    /// Frames-per-second control.
    #[must_use]
    pub fn frames_per_second(&self) -> &NumericControl {
        &self.frames_per_second
    }

    /// Sprite offset control.
    #[must_use]
    pub fn offset_x(&self) -> &NumericControl {
        &self.offset_x
    }

    /// Both controls, in display order.
    #[must_use]
    pub fn controls(&self) -> [&NumericControl; 2] {
        [&self.offset_x, &self.frames_per_second]
    }

    /// Writes the frames-per-second control. Notifies `listener` if the
    /// stored value changed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn edit_frames_per_second(&mut self, value: f32, listener: &mut dyn ParamListener) -> bool {
        match self.frames_per_second.set(value) {
            Some(fps) => {
                let event = ParamEvent::FramesPerSecondChanged { fps: fps as u32 };
                debug!("Panel edit: {:?}", event);
                listener.on_param_change(&event);
                true
            }
            None => false,
        }
    }

    /// Writes the sprite offset control. Notifies `listener` if the stored
    /// value changed.
    pub fn edit_offset_x(&mut self, value: f32, listener: &mut dyn ParamListener) -> bool {
        match self.offset_x.set(value) {
            Some(x) => {
                let event = ParamEvent::SpriteOffsetSet { x };
                debug!("Panel edit: {:?}", event);
                listener.on_param_change(&event);
                true
            }
            None => false,
        }
    }
}

impl Default for ParamPanel {
    fn default() -> Self {
        Self::new(&FlameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_flame_config() {
        let panel = ParamPanel::default();
        assert_eq!(panel.frames_per_second().value(), 9.0);
        assert_eq!(panel.frames_per_second().min, 1.0);
        assert_eq!(panel.frames_per_second().max, 30.0);
        assert_eq!(panel.offset_x().value(), 0.0);
        assert_eq!(panel.offset_x().step, 0.25);
    }

    #[test]
    fn test_edit_emits_typed_event() {
        let mut panel = ParamPanel::default();
        let mut events = Vec::new();

        assert!(panel.edit_frames_per_second(12.4, &mut events));
        assert!(panel.edit_offset_x(0.3, &mut events));

        assert_eq!(
            events,
            vec![
                ParamEvent::FramesPerSecondChanged { fps: 12 },
                ParamEvent::SpriteOffsetSet { x: 0.25 },
            ]
        );
    }

    #[test]
    fn test_unchanged_edit_is_silent() {
        let mut panel = ParamPanel::default();
        let mut events = Vec::new();
        assert!(!panel.edit_frames_per_second(9.2, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_sync_tracks_live_offset() {
        let mut panel = ParamPanel::default();
        let mut ctx = AnimationContext::default();
        for _ in 0..12 {
            ctx.advance(0.1);
        }
        panel.sync(&ctx);
        // Raw 2.5, shown folded.
        assert!((panel.offset_x().value() - 0.5).abs() < 1e-5);
    }
}
