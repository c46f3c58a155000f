//! # Strokes
//!
//! Every finished stroke, in both styles, plus the shared history that orders them.

use crate::bezier::Bezier;
use crate::input::Sample;
use crate::math::Vec2;

/// A raw ink line, drawn exactly as sampled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineStroke {
    pub samples: Vec<Sample>,
}
impl LineStroke {
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
    /// Whether any sample came with real pen pressure.
    #[must_use]
    pub fn has_pressure(&self) -> bool {
        self.samples.iter().any(|s| s.pressure.is_some())
    }
}

/// A fitted brush stroke. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct CalligraphyStroke {
    pub segments: Vec<Bezier>,
}
impl CalligraphyStroke {
    /// Fit a stroke to the given path. `None` if the path is empty.
    #[must_use]
    pub fn fit(path: &[Vec2]) -> Option<Self> {
        let segments = crate::fit::fit_stroke(path);
        (!segments.is_empty()).then_some(Self { segments })
    }
}

/// Which collection a history entry refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
pub enum StrokeKind {
    Line,
    Calligraphy,
}

/// Finished strokes. The history always has exactly one entry per stroke, and the `n`th
/// entry of a kind refers to the `n`th stroke of that collection.
#[derive(Clone, Debug, Default)]
pub struct Strokes {
    lines: Vec<LineStroke>,
    calligraphy: Vec<CalligraphyStroke>,
    history: Vec<StrokeKind>,
}
// Public methods for readers
impl Strokes {
    #[must_use]
    pub fn lines(&self) -> &[LineStroke] {
        &self.lines
    }
    #[must_use]
    pub fn calligraphy(&self) -> &[CalligraphyStroke] {
        &self.calligraphy
    }
    /// Stroke kinds, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StrokeKind] {
        &self.history
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
// Modification, only by the owning pipeline.
impl Strokes {
    pub(super) fn push_line(&mut self, stroke: LineStroke) {
        self.lines.push(stroke);
        self.history.push(StrokeKind::Line);
    }
    pub(super) fn push_calligraphy(&mut self, stroke: CalligraphyStroke) {
        self.calligraphy.push(stroke);
        self.history.push(StrokeKind::Calligraphy);
    }
    /// Remove the most recent stroke, returning which kind it was.
    pub(super) fn pop(&mut self) -> Option<StrokeKind> {
        let kind = self.history.pop()?;
        let removed = match kind {
            StrokeKind::Line => self.lines.pop().is_some(),
            StrokeKind::Calligraphy => self.calligraphy.pop().is_some(),
        };
        if !removed {
            log::error!("history named a {} stroke that doesn't exist", kind.as_ref());
        }
        Some(kind)
    }
    pub(super) fn clear(&mut self) {
        self.lines.clear();
        self.calligraphy.clear();
        self.history.clear();
    }
}
