//! Pointer events as delivered by a host, and the samples recorded from them.

use crate::math::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Pen,
    Touch,
    Mouse,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position in logical surface pixels.
    pub position: Vec2,
    pub kind: PointerKind,
    /// Normalized pen pressure, `[0, 1]`. Ignored for non-pen pointers.
    pub pressure: Option<f32>,
    /// Whether this is the primary pointer of a (possibly multi-touch) gesture.
    pub is_primary: bool,
}
impl PointerEvent {
    /// Pressure of this event, if it comes from a pen that reports one.
    #[must_use]
    pub fn pen_pressure(&self) -> Option<f32> {
        match self.kind {
            PointerKind::Pen => self.pressure.map(|p| p.clamp(0.0, 1.0)),
            _ => None,
        }
    }
    /// Record this event as a sample of a line of the given nominal width.
    ///
    /// Pen samples are widened according to pressure, others use `line_width` as-is.
    #[must_use]
    pub fn sample(&self, line_width: f32) -> Sample {
        let pressure = self.pen_pressure();
        let width_hint = match pressure {
            Some(pressure) => 0.5 + pressure * line_width * 2.0,
            None => line_width,
        };
        Sample {
            position: self.position,
            pressure,
            width_hint,
        }
    }
}

/// A single recorded pointer position. Immutable once recorded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub position: Vec2,
    /// `None` when the input device doesn't report pressure.
    pub pressure: Option<f32>,
    /// Stroke width to use when drawing up to this sample as a plain line.
    pub width_hint: f32,
}
impl Sample {
    /// A pressure-less sample.
    #[must_use]
    pub fn new(position: Vec2, width_hint: f32) -> Self {
        Self {
            position,
            pressure: None,
            width_hint,
        }
    }
}

/// Decides which pointer events reach the drawing state machine.
///
/// Only the primary pointer is honored. Once a pen touches down, everything that isn't
/// a pen is ignored until the pen lifts or drawing is stopped, so a resting palm can't
/// start strokes of its own.
#[derive(Default, Debug, Clone, Copy)]
pub struct PointerFilter {
    pen_lock: bool,
}
impl PointerFilter {
    /// Returns whether `event` should be handled. Updates the pen lock as a side effect.
    pub fn accept(&mut self, event: &PointerEvent) -> bool {
        if !event.is_primary {
            return false;
        }
        let is_pen = event.kind == PointerKind::Pen;
        if self.pen_lock && !is_pen {
            return false;
        }
        if is_pen && event.phase == PointerPhase::Down {
            self.pen_lock = true;
        }
        true
    }
    /// Drop the pen lock.
    pub fn release(&mut self) {
        self.pen_lock = false;
    }
    #[must_use]
    pub fn is_pen_locked(&self) -> bool {
        self.pen_lock
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn event(phase: PointerPhase, kind: PointerKind) -> PointerEvent {
        PointerEvent {
            phase,
            position: Vec2::new(1.0, 2.0),
            kind,
            pressure: Some(0.5),
            is_primary: true,
        }
    }

    #[test]
    fn width_hints() {
        let pen = event(PointerPhase::Move, PointerKind::Pen).sample(4.0);
        assert_eq!(pen.pressure, Some(0.5));
        assert_eq!(pen.width_hint, 4.5);
        let mouse = event(PointerPhase::Move, PointerKind::Mouse).sample(4.0);
        assert_eq!(mouse.pressure, None);
        assert_eq!(mouse.width_hint, 4.0);
    }
    #[test]
    fn secondary_pointers_are_ignored() {
        let mut filter = PointerFilter::default();
        let mut secondary = event(PointerPhase::Down, PointerKind::Touch);
        secondary.is_primary = false;
        assert!(!filter.accept(&secondary));
    }
    #[test]
    fn pen_contact_locks_out_touch() {
        let mut filter = PointerFilter::default();
        assert!(filter.accept(&event(PointerPhase::Down, PointerKind::Pen)));
        assert!(filter.is_pen_locked());
        assert!(!filter.accept(&event(PointerPhase::Move, PointerKind::Touch)));
        assert!(filter.accept(&event(PointerPhase::Move, PointerKind::Pen)));
        filter.release();
        assert!(filter.accept(&event(PointerPhase::Down, PointerKind::Touch)));
    }
}
