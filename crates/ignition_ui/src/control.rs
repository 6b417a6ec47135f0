//! Numeric controls.

/// Identifies a panel control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Sprite frames per second.
    FramesPerSecond,
    /// Horizontal sprite offset.
    OffsetX,
}

impl ControlId {
    /// Label shown next to the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FramesPerSecond => "framesPerSecond",
            Self::OffsetX => "offsetX",
        }
    }
}

/// A bounded numeric control with a fixed step.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericControl {
    /// Which control this is.
    pub id: ControlId,
    /// Lower bound, inclusive.
    pub min: f32,
    /// Upper bound, inclusive.
    pub max: f32,
    /// Granularity. Values snap to `min + k * step`.
    pub step: f32,
    value: f32,
}

impl NumericControl {
    /// Creates a control. The initial value is clamped and snapped.
    #[must_use]
    pub fn new(id: ControlId, min: f32, max: f32, step: f32, value: f32) -> Self {
        let mut control = Self {
            id,
            min,
            max,
            step,
            value: min,
        };
        control.value = control.normalize(value);
        control
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Label shown next to the control.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    /// Writes a user edit. Returns the stored value if it changed.
    pub fn set(&mut self, value: f32) -> Option<f32> {
        let value = self.normalize(value);
        if (value - self.value).abs() < f32::EPSILON {
            return None;
        }
        self.value = value;
        Some(value)
    }

    /// Mirrors a live backing field without snapping it.
    ///
    /// The sprite offset grows past the control's range during playback;
    /// the control shows it folded into range.
    pub fn listen(&mut self, live: f32) {
        let span = self.max - self.min;
        self.value = if span > 0.0 && (live < self.min || live > self.max) {
            self.min + (live - self.min).rem_euclid(span)
        } else {
            live
        };
    }

    fn normalize(&self, value: f32) -> f32 {
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_to_range() {
        let mut fps = NumericControl::new(ControlId::FramesPerSecond, 1.0, 30.0, 1.0, 9.0);
        assert_eq!(fps.set(45.0), Some(30.0));
        assert_eq!(fps.set(-3.0), Some(1.0));
    }

    #[test]
    fn test_set_snaps_to_step() {
        let mut offset = NumericControl::new(ControlId::OffsetX, 0.0, 1.0, 0.25, 0.0);
        assert_eq!(offset.set(0.6), Some(0.5));
        assert_eq!(offset.set(0.55), None);
        assert_eq!(offset.set(0.9), Some(1.0));
    }

    #[test]
    fn test_listen_folds_unbounded_values() {
        let mut offset = NumericControl::new(ControlId::OffsetX, 0.0, 1.0, 0.25, 0.0);
        offset.listen(2.75);
        assert!((offset.value() - 0.75).abs() < 1e-6);
        offset.listen(0.5);
        assert_eq!(offset.value(), 0.5);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ControlId::FramesPerSecond.label(), "framesPerSecond");
        assert_eq!(ControlId::OffsetX.label(), "offsetX");
    }
}
