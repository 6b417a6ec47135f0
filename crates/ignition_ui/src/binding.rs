//! Applies panel edits to the animation state.

use ignition_core::AnimationContext;

use crate::event::{ParamEvent, ParamListener};

impl ParamListener for AnimationContext {
    fn on_param_change(&mut self, event: &ParamEvent) {
        match *event {
            ParamEvent::FramesPerSecondChanged { fps } => self.set_frames_per_second(fps),
            ParamEvent::SpriteOffsetSet { x } => self.set_sprite_offset(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::ParamPanel;

    #[test]
    fn test_panel_drives_context() {
        let mut panel = ParamPanel::default();
        let mut ctx = AnimationContext::default();

        panel.edit_frames_per_second(18.0, &mut ctx);
        assert_eq!(ctx.frames_per_second(), 18);
        assert!((ctx.speed_ratio() - 2.0).abs() < 1e-6);

        panel.edit_offset_x(0.75, &mut ctx);
        assert_eq!(ctx.sprite_offset().x, 0.75);
    }

    #[test]
    fn test_rate_change_keeps_accumulated_time() {
        let mut ctx = AnimationContext::default();
        ctx.advance(0.1);
        ctx.on_param_change(&ParamEvent::FramesPerSecondChanged { fps: 20 });
        assert!((ctx.flame().accumulated() - 0.1).abs() < 1e-6);
        assert_eq!(ctx.flame().frame_interval(), 0.05);
    }
}
