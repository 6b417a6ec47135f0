//! Parameter change events.

/// A parameter edit made through the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
    /// New sprite rate. The frame interval follows immediately.
    FramesPerSecondChanged {
        /// Frames per second, within the panel's range.
        fps: u32,
    },
    /// Sprite offset written directly.
    SpriteOffsetSet {
        /// New offset.
        x: f32,
    },
}

/// Receives parameter edits.
pub trait ParamListener {
    /// Applies one edit.
    fn on_param_change(&mut self, event: &ParamEvent);
}

/// Collects events, for tests and for forwarding in batches.
impl ParamListener for Vec<ParamEvent> {
    fn on_param_change(&mut self, event: &ParamEvent) {
        self.push(*event);
    }
}
