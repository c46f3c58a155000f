//! The drawing surface the pipeline paints onto, and the paths it paints.
//!
//! Backends implement [`Canvas`]. Paths are in logical surface pixels, a backend is responsible for
//! any device pixel scaling.

use crate::color::Rgb;
use crate::math::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Control, end.
    QuadTo(Vec2, Vec2),
    /// Control, control, end.
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathEl>,
}
impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Closed polygon through `points`. Fewer than two points makes an empty path.
    #[must_use]
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        if let [first, rest @ ..] = points {
            if rest.is_empty() {
                return path;
            }
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }
    /// Open polyline through `points`.
    #[must_use]
    pub fn polyline(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        if let [first, rest @ ..] = points {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }
    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.elements.push(PathEl::MoveTo(p));
        self
    }
    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.elements.push(PathEl::LineTo(p));
        self
    }
    pub fn quad_to(&mut self, control: Vec2, p: Vec2) -> &mut Self {
        self.elements.push(PathEl::QuadTo(control, p));
        self
    }
    pub fn cubic_to(&mut self, c0: Vec2, c1: Vec2, p: Vec2) -> &mut Self {
        self.elements.push(PathEl::CubicTo(c0, c1, p));
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathEl::Close);
        self
    }
    #[must_use]
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    /// Every point the path passes through or pulls towards, in order.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.elements.iter().flat_map(|el| {
            let points: smallvec::SmallVec<[Vec2; 3]> = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => smallvec::smallvec![p],
                PathEl::QuadTo(c, p) => smallvec::smallvec![c, p],
                PathEl::CubicTo(c0, c1, p) => smallvec::smallvec![c0, c1, p],
                PathEl::Close => smallvec::SmallVec::new(),
            };
            points
        })
    }
}

pub trait Canvas {
    /// Erase everything to transparent.
    fn clear(&mut self);
    /// Fill with the non-zero winding rule.
    fn fill(&mut self, path: &Path, color: Rgb);
    /// Stroke with round caps and joins.
    fn stroke(&mut self, path: &Path, color: Rgb, width: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Clear,
    Fill { path: Path, color: Rgb },
    Stroke { path: Path, color: Rgb, width: f32 },
}

/// A canvas that only remembers what was asked of it.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub commands: Vec<Command>,
}
impl Recording {
    /// Commands since the most recent clear.
    #[must_use]
    pub fn visible(&self) -> &[Command] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == Command::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }
}
impl Canvas for Recording {
    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }
    fn fill(&mut self, path: &Path, color: Rgb) {
        self.commands.push(Command::Fill {
            path: path.clone(),
            color,
        });
    }
    fn stroke(&mut self, path: &Path, color: Rgb, width: f32) {
        self.commands.push(Command::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }
}
