//! # Stroke pipeline
//!
//! Owns every stroke, the one being drawn, and the render state. Hosts feed it pointer
//! events as they arrive and call [`Pipeline::tick`] once per frame to paint.
//!
//! Everything here runs on one thread. Event handlers mutate the buffers, `tick` only reads
//! them and advances its own cursor and caches.

mod render;
pub mod strokes;

pub use render::{line_step, RenderCursor, GUIDE_WIDTH};
pub use strokes::{CalligraphyStroke, LineStroke, StrokeKind, Strokes};

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::input::{PointerEvent, PointerFilter, PointerPhase};
use crate::math::{self, Vec2};
use crate::settings::{PenSettings, SettingsError};

/// Calligraphy guide points closer than this to the previous one are dropped.
pub const MIN_GUIDE_DISTANCE: f32 = 5.0;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum DrawingMode {
    /// Raw ink, painted as it's sampled.
    #[default]
    Line,
    /// A live guide while drawing, fitted and brushed on release.
    Calligraphy,
}
impl DrawingMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Calligraphy,
            Self::Calligraphy => Self::Line,
        }
    }
}

#[derive(Debug)]
pub struct Pipeline {
    strokes: Strokes,
    renderer: render::Renderer,
    settings: PenSettings,
    mode: DrawingMode,
    visible: bool,
    filter: PointerFilter,
    /// Line being drawn, not yet part of the history.
    active: Option<LineStroke>,
    /// Calligraphy path being drawn.
    guide: Option<Vec<Vec2>>,
}
impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PenSettings::default())
    }
}
// Reading state
impl Pipeline {
    #[must_use]
    pub fn new(settings: PenSettings) -> Self {
        Self {
            strokes: Strokes::default(),
            renderer: render::Renderer::default(),
            settings,
            mode: DrawingMode::default(),
            visible: true,
            filter: PointerFilter::default(),
            active: None,
            guide: None,
        }
    }
    #[must_use]
    pub fn strokes(&self) -> &Strokes {
        &self.strokes
    }
    #[must_use]
    pub fn history(&self) -> &[StrokeKind] {
        self.strokes.history()
    }
    /// Whether there's anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }
    #[must_use]
    pub fn mode(&self) -> DrawingMode {
        self.mode
    }
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    /// Whether a pointer is currently down and drawing.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.active.is_some() || self.guide.is_some()
    }
    #[must_use]
    pub fn settings(&self) -> &PenSettings {
        &self.settings
    }
    #[must_use]
    pub fn cursor(&self) -> RenderCursor {
        self.renderer.cursor()
    }
    #[must_use]
    pub fn needs_full_redraw(&self) -> bool {
        self.renderer.needs_full_redraw()
    }
    /// Number of sealed lines with a remembered freehand outline.
    #[must_use]
    pub fn cached_outlines(&self) -> usize {
        self.renderer.cached_outlines()
    }
}
// Editing
impl Pipeline {
    /// Append a finished line to the history.
    pub fn push_line_stroke(&mut self, stroke: LineStroke) {
        self.stop_drawing();
        self.strokes.push_line(stroke);
    }
    /// Append a finished calligraphy stroke to the history.
    pub fn push_calligraphy_stroke(&mut self, stroke: CalligraphyStroke) {
        self.stop_drawing();
        self.strokes.push_calligraphy(stroke);
    }
    /// Remove the most recent stroke. Does nothing if there are none.
    pub fn undo(&mut self) {
        self.stop_drawing();
        let Some(kind) = self.strokes.pop() else {
            return;
        };
        log::trace!("undid {} stroke", kind.as_ref());
        if self.strokes.is_empty() {
            self.clear();
        } else {
            self.renderer.forget_lines(self.strokes.lines().len());
        }
    }
    /// Drop every stroke.
    pub fn clear(&mut self) {
        self.stop_drawing();
        self.strokes.clear();
        self.renderer.reset();
    }
    /// Abandon any stroke in progress.
    pub fn stop_drawing(&mut self) {
        self.filter.release();
        if self.active.take().is_some() {
            // Parts of it may already be on the canvas.
            self.renderer.request_full_redraw();
        }
        self.guide = None;
    }
    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.stop_drawing();
        self.mode = mode;
    }
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }
    /// Hidden overlays ignore all pointer input.
    pub fn set_visible(&mut self, visible: bool) {
        self.stop_drawing();
        self.visible = visible;
    }
    pub fn toggle_visibility(&mut self) {
        self.set_visible(!self.visible);
    }
    /// Repaint everything next frame. For when the host lost the canvas contents.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}
// Settings. Any change repaints existing strokes with the new values.
impl Pipeline {
    pub fn set_settings(&mut self, settings: PenSettings) {
        if settings != self.settings {
            self.settings = settings;
            self.renderer.invalidate();
        }
    }
    pub fn set_color(&mut self, color: Rgb) {
        let mut settings = self.settings;
        settings.color = color;
        self.set_settings(settings);
    }
    pub fn set_line_width(&mut self, width: f32) -> Result<(), SettingsError> {
        let mut settings = self.settings;
        settings.set_line_width(width)?;
        self.set_settings(settings);
        Ok(())
    }
    pub fn set_opacity(&mut self, opacity: f32) -> Result<(), SettingsError> {
        let mut settings = self.settings;
        settings.set_opacity(opacity)?;
        self.set_settings(settings);
        Ok(())
    }
    pub fn set_freehand(&mut self, freehand: bool) {
        let mut settings = self.settings;
        settings.freehand = freehand;
        self.set_settings(settings);
    }
}
// Input and output
impl Pipeline {
    /// Feed a pointer event. Returns whether the overlay consumed it, `false` meaning it should
    /// go to whatever is underneath. Only events that start or belong to a stroke are consumed,
    /// so hovering passes through.
    pub fn pointer(&mut self, event: &PointerEvent) -> bool {
        if !self.visible || !self.filter.accept(event) {
            return false;
        }
        match self.mode {
            DrawingMode::Line => self.pointer_line(event),
            DrawingMode::Calligraphy => self.pointer_calligraphy(event),
        }
    }
    fn pointer_line(&mut self, event: &PointerEvent) -> bool {
        let sample = event.sample(self.settings.line_width());
        match (event.phase, &mut self.active) {
            (PointerPhase::Down, None) => {
                self.active = Some(LineStroke::new(vec![sample]));
            }
            (PointerPhase::Move, Some(active)) => active.samples.push(sample),
            (PointerPhase::Up, Some(active)) => {
                active.samples.push(sample);
                if let Some(sealed) = self.active.take() {
                    self.strokes.push_line(sealed);
                }
                if self.settings.freehand {
                    // The in-progress outline differs from the sealed one.
                    self.renderer.request_full_redraw();
                }
                self.filter.release();
            }
            // Down while drawing.
            (PointerPhase::Down, Some(_)) => (),
            (PointerPhase::Up, None) => {
                self.filter.release();
                return false;
            }
            (PointerPhase::Move, None) => return false,
        }
        true
    }
    fn pointer_calligraphy(&mut self, event: &PointerEvent) -> bool {
        let position = event.position;
        match (event.phase, &mut self.guide) {
            (PointerPhase::Down, None) => self.guide = Some(vec![position]),
            (PointerPhase::Move | PointerPhase::Up, Some(guide)) => {
                let far_enough = guide
                    .last()
                    .map_or(true, |&last| math::distance(last, position) >= MIN_GUIDE_DISTANCE);
                if far_enough {
                    guide.push(position);
                }
                if event.phase == PointerPhase::Up {
                    self.finish_calligraphy();
                }
            }
            // Down while drawing.
            (PointerPhase::Down, Some(_)) => (),
            (PointerPhase::Up, None) => {
                self.filter.release();
                return false;
            }
            (PointerPhase::Move, None) => return false,
        }
        true
    }
    fn finish_calligraphy(&mut self) {
        self.filter.release();
        let Some(guide) = self.guide.take() else {
            return;
        };
        if let Some(stroke) = CalligraphyStroke::fit(&guide) {
            log::trace!(
                "fit {} guide points to {} segments",
                guide.len(),
                stroke.segments.len()
            );
            self.strokes.push_calligraphy(stroke);
        }
    }
    /// Paint one frame. Strokes go to `main`. The live calligraphy guide and the live freehand
    /// outline go to `guide`.
    /// Returns whether either canvas changed.
    pub fn tick<M, G>(&mut self, main: &mut M, guide: &mut G) -> bool
    where
        M: Canvas + ?Sized,
        G: Canvas + ?Sized,
    {
        let frame = render::Frame {
            strokes: &self.strokes,
            active: self.active.as_ref(),
            guide: self.guide.as_deref(),
            settings: &self.settings,
        };
        self.renderer.tick(&frame, main, guide)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::{Command, Recording};
    use crate::input::{PointerKind, Sample};

    fn event(phase: PointerPhase, x: f32, y: f32) -> PointerEvent {
        PointerEvent {
            phase,
            position: Vec2::new(x, y),
            kind: PointerKind::Mouse,
            pressure: None,
            is_primary: true,
        }
    }
    fn draw(pipeline: &mut Pipeline, points: &[(f32, f32)]) {
        let Some((&(x, y), rest)) = points.split_first() else {
            return;
        };
        assert!(pipeline.pointer(&event(PointerPhase::Down, x, y)));
        for (i, &(x, y)) in rest.iter().enumerate() {
            let phase = if i + 1 == rest.len() {
                PointerPhase::Up
            } else {
                PointerPhase::Move
            };
            assert!(pipeline.pointer(&event(phase, x, y)));
        }
    }
    fn line_stroke(points: &[(f32, f32)]) -> LineStroke {
        LineStroke::new(
            points
                .iter()
                .map(|&(x, y)| Sample::new(Vec2::new(x, y), 4.0))
                .collect(),
        )
    }
    fn tick(pipeline: &mut Pipeline) -> (Recording, Recording) {
        let (mut main, mut guide) = (Recording::default(), Recording::default());
        pipeline.tick(&mut main, &mut guide);
        (main, guide)
    }

    #[test]
    fn three_point_line() {
        let mut pipeline = Pipeline::default();
        draw(&mut pipeline, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(pipeline.history(), &[StrokeKind::Line]);

        let (main, _) = tick(&mut pipeline);
        let mut points = Vec::new();
        for command in main.visible() {
            let Command::Stroke { path, color, width } = command else {
                panic!("unexpected {command:?}");
            };
            assert_eq!(*color, Rgb::MAGENTA);
            assert_eq!(*width, 4.0);
            points.extend(path.points());
        }
        for expected in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            let expected = Vec2::new(expected.0, expected.1);
            assert!(points.contains(&expected), "{expected:?} not in {points:?}");
        }
        assert_eq!(
            pipeline.cursor(),
            RenderCursor {
                line: 1,
                step: 0,
                calligraphy: 0
            }
        );
    }
    #[test]
    fn draws_only_whats_new() {
        let mut pipeline = Pipeline::default();
        pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0));
        pipeline.pointer(&event(PointerPhase::Move, 5.0, 0.0));
        let (main, _) = tick(&mut pipeline);
        // A clear, then a step per sample.
        assert_eq!(main.commands.len(), 3);
        assert_eq!(pipeline.cursor().step, 2);

        let (main, _) = tick(&mut pipeline);
        assert!(main.commands.is_empty());

        pipeline.pointer(&event(PointerPhase::Move, 10.0, 0.0));
        let (main, _) = tick(&mut pipeline);
        assert_eq!(main.commands.len(), 1);

        // Releasing adds the final sample, and the tail to reach it.
        pipeline.pointer(&event(PointerPhase::Up, 15.0, 0.0));
        let (main, _) = tick(&mut pipeline);
        assert_eq!(main.commands.len(), 2);
        assert_eq!(pipeline.cursor().line, 1);
    }
    #[test]
    fn undo_is_inverse_of_push() {
        let mut pipeline = Pipeline::default();
        pipeline.push_line_stroke(line_stroke(&[(0.0, 0.0), (1.0, 1.0)]));
        let before = pipeline.strokes().clone();

        pipeline.push_line_stroke(line_stroke(&[(5.0, 5.0)]));
        pipeline.undo();
        assert_eq!(pipeline.strokes().lines(), before.lines());
        assert_eq!(pipeline.history(), before.history());

        let stroke = CalligraphyStroke::fit(&[Vec2::zero(), Vec2::new(80.0, 0.0)]).unwrap();
        pipeline.push_calligraphy_stroke(stroke);
        pipeline.undo();
        assert_eq!(pipeline.strokes().calligraphy(), before.calligraphy());
        assert_eq!(pipeline.history(), before.history());
    }
    #[test]
    fn undo_nothing() {
        let mut pipeline = Pipeline::default();
        tick(&mut pipeline);
        pipeline.undo();
        assert!(!pipeline.can_undo());
        assert!(!pipeline.needs_full_redraw());
    }
    #[test]
    fn undo_last_is_clear() {
        let mut pipeline = Pipeline::default();
        draw(&mut pipeline, &[(0.0, 0.0), (10.0, 0.0)]);
        assert!(pipeline.can_undo());
        tick(&mut pipeline);
        pipeline.undo();
        assert!(!pipeline.can_undo());
        assert_eq!(pipeline.cursor(), RenderCursor::default());
        let (main, guide) = tick(&mut pipeline);
        assert_eq!(main.commands, vec![Command::Clear]);
        assert_eq!(guide.commands, vec![Command::Clear]);
    }
    #[test]
    fn undo_repaints_the_rest() {
        let mut pipeline = Pipeline::default();
        draw(&mut pipeline, &[(0.0, 0.0), (10.0, 0.0)]);
        draw(&mut pipeline, &[(0.0, 5.0), (10.0, 5.0)]);
        tick(&mut pipeline);
        pipeline.undo();
        let (main, _) = tick(&mut pipeline);
        // Clear, two steps, and the tail of the first line.
        assert_eq!(main.commands.len(), 4);
        assert_eq!(main.commands[0], Command::Clear);
    }
    #[test]
    fn clear_resets_everything() {
        let mut pipeline = Pipeline::default();
        draw(&mut pipeline, &[(0.0, 0.0), (10.0, 0.0)]);
        pipeline.toggle_mode();
        draw(&mut pipeline, &[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]);
        pipeline.pointer(&event(PointerPhase::Down, 3.0, 3.0));
        tick(&mut pipeline);
        assert_ne!(pipeline.cursor(), RenderCursor::default());

        pipeline.clear();
        assert_eq!(pipeline.cursor(), RenderCursor::default());
        assert!(pipeline.history().is_empty());
        assert!(pipeline.strokes().lines().is_empty());
        assert!(pipeline.strokes().calligraphy().is_empty());
        assert!(!pipeline.is_drawing());
        assert!(pipeline.needs_full_redraw());
    }
    #[test]
    fn history_matches_collections() {
        let mut pipeline = Pipeline::default();
        let mut seed = 0x1234_5678_u32;
        let mut next = move || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed >> 8
        };
        for _ in 0..400 {
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = ((next() % 200) as f32, (next() % 200) as f32);
            match next() % 10 {
                0 => pipeline.pointer(&event(PointerPhase::Down, x, y)),
                1..=4 => pipeline.pointer(&event(PointerPhase::Move, x, y)),
                5 => pipeline.pointer(&event(PointerPhase::Up, x, y)),
                6 => {
                    pipeline.undo();
                    true
                }
                7 => {
                    pipeline.toggle_mode();
                    true
                }
                8 => {
                    if next() % 8 == 0 {
                        pipeline.clear();
                    }
                    true
                }
                _ => {
                    tick(&mut pipeline);
                    true
                }
            };
            let strokes = pipeline.strokes();
            assert_eq!(
                strokes.history().len(),
                strokes.lines().len() + strokes.calligraphy().len()
            );
        }
    }
    #[test]
    fn freehand_outlines_are_cached() {
        let mut pipeline = Pipeline::default();
        pipeline.set_freehand(true);
        pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0));
        pipeline.pointer(&event(PointerPhase::Move, 20.0, 0.0));
        let (main, guide) = tick(&mut pipeline);
        // The live outline goes on the scratch layer.
        assert_eq!(main.commands, vec![Command::Clear]);
        assert!(matches!(guide.commands[..], [Command::Clear, Command::Fill { .. }]));
        // Still drawing, so nothing is remembered yet.
        assert_eq!(pipeline.cached_outlines(), 0);

        pipeline.pointer(&event(PointerPhase::Move, 40.0, 0.0));
        pipeline.pointer(&event(PointerPhase::Up, 60.0, 0.0));
        assert!(pipeline.needs_full_redraw());
        let (main, guide) = tick(&mut pipeline);
        assert!(matches!(main.commands[..], [Command::Clear, Command::Fill { .. }]));
        assert_eq!(guide.commands, vec![Command::Clear]);
        assert_eq!(pipeline.cached_outlines(), 1);

        let (main, _) = tick(&mut pipeline);
        assert!(main.commands.is_empty());

        // New settings need new outlines.
        pipeline.set_color(Rgb::WHITE);
        assert_eq!(pipeline.cached_outlines(), 0);
        let (main, _) = tick(&mut pipeline);
        assert!(matches!(
            main.commands[..],
            [Command::Clear, Command::Fill { color: Rgb::WHITE, .. }]
        ));
        assert_eq!(pipeline.cached_outlines(), 1);

        pipeline.undo();
        assert_eq!(pipeline.cached_outlines(), 0);
    }
    #[test]
    fn calligraphy_guide_then_brush() {
        let mut pipeline = Pipeline::default();
        pipeline.toggle_mode();
        assert_eq!(pipeline.mode(), DrawingMode::Calligraphy);
        tick(&mut pipeline);

        pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0));
        // Too close to keep.
        pipeline.pointer(&event(PointerPhase::Move, 2.0, 0.0));
        for x in 1..10 {
            #[allow(clippy::cast_precision_loss)]
            pipeline.pointer(&event(PointerPhase::Move, x as f32 * 10.0, 0.0));
        }
        let (main, guide) = tick(&mut pipeline);
        assert!(main.commands.is_empty());
        let [Command::Clear, Command::Stroke { path, width, .. }] = &guide.commands[..] else {
            panic!("unexpected {:?}", guide.commands);
        };
        assert_eq!(*width, GUIDE_WIDTH);
        assert_eq!(path.points().count(), 10);
        assert!(pipeline.history().is_empty());

        pipeline.pointer(&event(PointerPhase::Up, 100.0, 0.0));
        assert_eq!(pipeline.history(), &[StrokeKind::Calligraphy]);
        let (main, guide) = tick(&mut pipeline);
        // Horizontal stroke: two caps and a body.
        assert_eq!(main.commands.len(), 3);
        assert_eq!(guide.commands, vec![Command::Clear]);
    }
    #[test]
    fn calligraphy_click_is_a_dot() {
        let mut pipeline = Pipeline::default();
        pipeline.set_mode(DrawingMode::Calligraphy);
        pipeline.pointer(&event(PointerPhase::Down, 10.0, 10.0));
        pipeline.pointer(&event(PointerPhase::Up, 10.0, 10.0));
        assert_eq!(pipeline.history(), &[StrokeKind::Calligraphy]);
        assert_eq!(pipeline.strokes().calligraphy()[0].segments.len(), 1);
    }
    #[test]
    fn hidden_ignores_input() {
        let mut pipeline = Pipeline::default();
        pipeline.toggle_visibility();
        assert!(!pipeline.is_visible());
        assert!(!pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0)));
        assert!(!pipeline.is_drawing());
    }
    #[test]
    fn toggles_drop_stroke_in_progress() {
        let mut pipeline = Pipeline::default();
        pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0));
        pipeline.pointer(&event(PointerPhase::Move, 10.0, 0.0));
        tick(&mut pipeline);
        pipeline.toggle_mode();
        assert!(!pipeline.is_drawing());
        assert!(pipeline.history().is_empty());
        // The partial line has to be erased.
        let (main, _) = tick(&mut pipeline);
        assert_eq!(main.commands, vec![Command::Clear]);
        // The release of the dropped stroke is harmless.
        pipeline.pointer(&event(PointerPhase::Up, 20.0, 0.0));
        assert!(pipeline.history().is_empty());
    }
    #[test]
    fn pen_locks_out_touch() {
        let mut pipeline = Pipeline::default();
        let pen = |phase, x| PointerEvent {
            kind: PointerKind::Pen,
            pressure: Some(0.5),
            ..event(phase, x, 0.0)
        };
        let touch = |phase, x| PointerEvent {
            kind: PointerKind::Touch,
            ..event(phase, x, 0.0)
        };
        assert!(pipeline.pointer(&pen(PointerPhase::Down, 0.0)));
        assert!(!pipeline.pointer(&touch(PointerPhase::Move, 50.0)));
        assert!(pipeline.pointer(&pen(PointerPhase::Up, 10.0)));
        let samples = &pipeline.strokes().lines()[0].samples;
        assert_eq!(samples.len(), 2);
        // 0.5 + pressure * width * 2
        assert_eq!(samples[0].width_hint, 4.5);
        // Lifting the pen frees other pointers.
        assert!(pipeline.pointer(&touch(PointerPhase::Down, 0.0)));
    }
    #[test]
    fn settings_keep_strokes() {
        let mut pipeline = Pipeline::default();
        draw(&mut pipeline, &[(0.0, 0.0), (10.0, 0.0)]);
        tick(&mut pipeline);
        assert!(pipeline.set_line_width(-1.0).is_err());
        assert!(!pipeline.needs_full_redraw());
        pipeline.set_line_width(8.0).unwrap();
        assert!(pipeline.needs_full_redraw());
        assert_eq!(pipeline.history().len(), 1);
        pipeline.set_opacity(0.3).unwrap();
        assert_eq!(pipeline.settings().opacity(), 0.3);
        let (main, _) = tick(&mut pipeline);
        assert_eq!(main.commands.len(), 4);
    }
    #[test]
    fn live_outline_replaces_itself() {
        let mut pipeline = Pipeline::default();
        pipeline.set_freehand(true);
        pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0));
        pipeline.pointer(&event(PointerPhase::Move, 20.0, 0.0));
        tick(&mut pipeline);
        for x in [40.0, 60.0] {
            pipeline.pointer(&event(PointerPhase::Move, x, 0.0));
            let (main, guide) = tick(&mut pipeline);
            // Never layered over the previous frame's outline.
            assert!(main.commands.is_empty());
            assert!(matches!(guide.commands[..], [Command::Clear, Command::Fill { .. }]));
        }
        let (_, guide) = tick(&mut pipeline);
        assert!(guide.commands.is_empty());
    }
    #[test]
    fn hover_is_not_consumed() {
        let mut pipeline = Pipeline::default();
        assert!(!pipeline.pointer(&event(PointerPhase::Move, 5.0, 5.0)));
        assert!(!pipeline.pointer(&event(PointerPhase::Up, 5.0, 5.0)));
        assert!(pipeline.history().is_empty());

        assert!(pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0)));
        assert!(pipeline.pointer(&event(PointerPhase::Move, 5.0, 0.0)));
        assert!(pipeline.pointer(&event(PointerPhase::Up, 10.0, 0.0)));
        assert!(!pipeline.pointer(&event(PointerPhase::Move, 20.0, 0.0)));

        pipeline.set_mode(DrawingMode::Calligraphy);
        assert!(!pipeline.pointer(&event(PointerPhase::Move, 5.0, 5.0)));
        assert!(pipeline.pointer(&event(PointerPhase::Down, 0.0, 0.0)));
        assert!(pipeline.pointer(&event(PointerPhase::Up, 0.0, 0.0)));
    }
    #[test]
    fn color_and_freehand_keep_the_rest() {
        let mut pipeline = Pipeline::default();
        pipeline.set_line_width(8.0).unwrap();
        pipeline.set_opacity(0.3).unwrap();
        tick(&mut pipeline);

        pipeline.set_color(Rgb::WHITE);
        assert!(pipeline.needs_full_redraw());
        pipeline.set_freehand(true);
        let settings = pipeline.settings();
        assert_eq!(settings.color, Rgb::WHITE);
        assert!(settings.freehand);
        assert_eq!(settings.line_width(), 8.0);
        assert_eq!(settings.opacity(), 0.3);
    }
}
