//! Per-frame painting of the stroke buffers, resuming from wherever the last frame stopped.

use super::strokes::{LineStroke, StrokeKind, Strokes};
use crate::brush;
use crate::canvas::{Canvas, Path};
use crate::input::Sample;
use crate::math::{self, Vec2};
use crate::settings::PenSettings;

/// Width of the calligraphy guide line.
pub const GUIDE_WIDTH: f32 = 1.0;

/// The next thing that hasn't been painted yet.
///
/// Line strokes are painted one step per sample, and sealed strokes get one more step to
/// reach their final sample. `line` may equal the number of sealed lines, in which case `step`
/// counts into the stroke still being drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderCursor {
    pub line: usize,
    pub step: usize,
    pub calligraphy: usize,
}

/// Read-only view of everything a frame paints.
pub(super) struct Frame<'a> {
    pub strokes: &'a Strokes,
    pub active: Option<&'a LineStroke>,
    pub guide: Option<&'a [Vec2]>,
    pub settings: &'a PenSettings,
}

#[derive(Debug)]
pub(super) struct Renderer {
    cursor: RenderCursor,
    full_redraw: bool,
    /// Freehand outlines of the first `outlines.len()` sealed lines.
    outlines: Vec<Path>,
    /// Number of guide points on the guide canvas, `None` if it's blank.
    guide_drawn: Option<usize>,
}
impl Default for Renderer {
    fn default() -> Self {
        Self {
            cursor: RenderCursor::default(),
            // Canvases start out in an unknown state.
            full_redraw: true,
            outlines: Vec::new(),
            guide_drawn: None,
        }
    }
}
impl Renderer {
    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }
    pub fn needs_full_redraw(&self) -> bool {
        self.full_redraw
    }
    pub fn cached_outlines(&self) -> usize {
        self.outlines.len()
    }
    /// Repaint everything next frame.
    pub fn request_full_redraw(&mut self) {
        self.full_redraw = true;
    }
    /// Repaint everything next frame, and drop anything derived from the pen settings.
    pub fn invalidate(&mut self) {
        self.outlines.clear();
        self.full_redraw = true;
    }
    /// Sealed lines past `remaining` no longer exist.
    pub fn forget_lines(&mut self, remaining: usize) {
        self.outlines.truncate(remaining);
        self.full_redraw = true;
    }
    /// Back to the origin, with nothing cached.
    pub fn reset(&mut self) {
        self.cursor = RenderCursor::default();
        self.invalidate();
    }
    /// Paint whatever changed since the last call. Returns whether either canvas was touched.
    pub fn tick<M, G>(&mut self, frame: &Frame<'_>, main: &mut M, guide: &mut G) -> bool
    where
        M: Canvas + ?Sized,
        G: Canvas + ?Sized,
    {
        let strokes = frame.strokes;
        let mut drew = false;
        if std::mem::take(&mut self.full_redraw) {
            main.clear();
            guide.clear();
            self.guide_drawn = None;
            self.cursor = RenderCursor::default();
            drew = true;

            let (mut line, mut calligraphy) = (0, 0);
            for kind in strokes.history() {
                match kind {
                    StrokeKind::Line => {
                        if let Some(stroke) = strokes.lines().get(line) {
                            self.paint_sealed_line(main, frame.settings, line, stroke, 0);
                        }
                        line += 1;
                    }
                    StrokeKind::Calligraphy => {
                        if let Some(stroke) = strokes.calligraphy().get(calligraphy) {
                            brush::draw_stroke(
                                main,
                                &stroke.segments,
                                brush::WEIGHT,
                                frame.settings.color,
                            );
                        }
                        calligraphy += 1;
                    }
                }
            }
        } else {
            for (index, stroke) in strokes.lines().iter().enumerate().skip(self.cursor.line) {
                let from = if index == self.cursor.line {
                    self.cursor.step
                } else {
                    0
                };
                self.paint_sealed_line(main, frame.settings, index, stroke, from);
                drew = true;
            }
            for stroke in strokes.calligraphy().iter().skip(self.cursor.calligraphy) {
                brush::draw_stroke(main, &stroke.segments, brush::WEIGHT, frame.settings.color);
                drew = true;
            }
        }
        if self.cursor.line != strokes.lines().len() {
            self.cursor.line = strokes.lines().len();
            self.cursor.step = 0;
        }
        self.cursor.calligraphy = strokes.calligraphy().len();

        if let Some(active) = frame.active {
            let len = active.samples.len();
            if self.cursor.step < len {
                if frame.settings.freehand {
                    // Regenerated whole each time, and may shrink, so it lives on the scratch layer.
                    guide.clear();
                    paint_live_outline(guide, frame.settings, active);
                } else {
                    paint_active_line(main, frame.settings, active, self.cursor.step);
                }
                self.cursor.step = len;
                drew = true;
            }
        }

        match frame.guide {
            Some(points) if self.guide_drawn != Some(points.len()) => {
                guide.clear();
                guide.stroke(&Path::polyline(points), frame.settings.color, GUIDE_WIDTH);
                self.guide_drawn = Some(points.len());
                drew = true;
            }
            None if self.guide_drawn.is_some() => {
                guide.clear();
                self.guide_drawn = None;
                drew = true;
            }
            _ => (),
        }
        drew
    }
    /// Paint a sealed line from step `from` onwards, to completion.
    fn paint_sealed_line<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        settings: &PenSettings,
        index: usize,
        stroke: &LineStroke,
        from: usize,
    ) {
        if settings.freehand {
            if let Some(outline) = self.outlines.get(index) {
                canvas.fill(outline, settings.color);
                return;
            }
            let options = settings.freehand_options(stroke.has_pressure(), true);
            let outline = Path::polygon(&crate::freehand::outline(&stroke.samples, &options));
            canvas.fill(&outline, settings.color);
            // Only cache contiguously, so indices stay aligned with the lines.
            if index == self.outlines.len() {
                self.outlines.push(outline);
            }
        } else {
            for step in from..=stroke.samples.len() {
                if let Some((path, width)) = line_step(&stroke.samples, step) {
                    canvas.stroke(&path, settings.color, width);
                }
            }
        }
    }
}

/// Paint the new steps of a plain line that is still growing.
fn paint_active_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    settings: &PenSettings,
    stroke: &LineStroke,
    from: usize,
) {
    for step in from..stroke.samples.len() {
        if let Some((path, width)) = line_step(&stroke.samples, step) {
            canvas.stroke(&path, settings.color, width);
        }
    }
}

/// Fill the outline of a freehand line that is still growing.
fn paint_live_outline<C: Canvas + ?Sized>(
    canvas: &mut C,
    settings: &PenSettings,
    stroke: &LineStroke,
) {
    let options = settings.freehand_options(stroke.has_pressure(), false);
    let outline = crate::freehand::outline(&stroke.samples, &options);
    canvas.fill(&Path::polygon(&outline), settings.color);
}

/// Smoothed piece of a plain line, and the width to stroke it with.
///
/// Step `j` curves from the midpoint before sample `j - 1` to the midpoint after it. Step
/// `samples.len()` finishes the line at its last sample. Out of range steps give `None`.
#[must_use]
pub fn line_step(samples: &[Sample], step: usize) -> Option<(Path, f32)> {
    let mut path = Path::new();
    if step < samples.len() {
        let a = samples.get(step.saturating_sub(2))?.position;
        let b = samples.get(step.saturating_sub(1))?.position;
        let c = samples.get(step)?;
        path.move_to(math::lerp(a, b, 0.5))
            .quad_to(b, math::lerp(b, c.position, 0.5));
        Some((path, c.width_hint))
    } else if step == samples.len() {
        let a = samples.get(step.saturating_sub(2))?.position;
        let b = samples.get(step.checked_sub(1)?)?;
        path.move_to(math::lerp(a, b.position, 0.5))
            .line_to(b.position);
        Some((path, b.width_hint))
    } else {
        None
    }
}
