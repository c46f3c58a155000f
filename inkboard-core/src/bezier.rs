//! Bezier curves of any order, with arclength queries.

use crate::math::{self, Vec2};

/// Number of chords used when estimating arclength.
pub const LENGTH_RESOLUTION: u16 = 50;
/// Parameter increment used when marching along a curve to find a length.
pub const MARCH_STEP: f32 = 0.01;

/// A Bezier curve defined by its control points. Cubics are by far the most common,
/// and are stored inline.
#[derive(Clone, Debug, PartialEq)]
pub struct Bezier {
    control_points: smallvec::SmallVec<[Vec2; 4]>,
}
impl Bezier {
    /// Create a curve from at least one control point. Returns `None` if empty.
    #[must_use]
    pub fn new(control_points: &[Vec2]) -> Option<Self> {
        if control_points.is_empty() {
            None
        } else {
            Some(Self {
                control_points: control_points.into(),
            })
        }
    }
    #[must_use]
    pub fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self {
            control_points: smallvec::smallvec![p0, p1, p2, p3],
        }
    }
    /// A cubic running straight from `start` to `end`, with its handles at the quarter points.
    #[must_use]
    pub fn straight(start: Vec2, end: Vec2) -> Self {
        Self::cubic(
            start,
            math::lerp(start, end, 0.25),
            math::lerp(start, end, 0.75),
            end,
        )
    }
    #[must_use]
    pub fn control_points(&self) -> &[Vec2] {
        &self.control_points
    }
    #[must_use]
    pub fn order(&self) -> usize {
        self.control_points.len() - 1
    }
    #[must_use]
    pub fn start(&self) -> Vec2 {
        self.control_points[0]
    }
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.control_points[self.control_points.len() - 1]
    }
    /// Evaluate the curve at `t` by de Casteljau's algorithm.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let mut scratch = self.control_points.clone();
        for len in (1..scratch.len()).rev() {
            for i in 0..len {
                scratch[i] = math::lerp(scratch[i], scratch[i + 1], t);
            }
        }
        scratch[0]
    }
    /// Un-normalized derivative at `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f32) -> Vec2 {
        let order = self.order();
        if order == 0 {
            return Vec2::zero();
        }
        let hodograph: smallvec::SmallVec<[Vec2; 4]> = self
            .control_points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) * order as f32)
            .collect();
        Self {
            control_points: hodograph,
        }
        .point_at(t)
    }
    #[must_use]
    pub fn tangent_at(&self, t: f32) -> Vec2 {
        math::normalize(self.derivative_at(t))
    }
    /// Approximate arclength, summing [`LENGTH_RESOLUTION`] chords.
    #[must_use]
    pub fn length(&self) -> f32 {
        let mut len = 0.0;
        let mut prev = self.start();
        for i in 1..=LENGTH_RESOLUTION {
            let next = self.point_at(f32::from(i) / f32::from(LENGTH_RESOLUTION));
            len += math::distance(prev, next);
            prev = next;
        }
        len
    }
    /// Parameter at which `length` has been travelled from the start.
    /// Saturates at `1.0` if the curve is shorter than `length`.
    #[must_use]
    pub fn t_at_length(&self, length: f32) -> f32 {
        let mut t = 0.0;
        let mut travelled = 0.0;
        let mut prev = self.start();
        while travelled < length {
            t += MARCH_STEP;
            if t >= 1.0 {
                return 1.0;
            }
            let next = self.point_at(t);
            travelled += math::distance(prev, next);
            prev = next;
        }
        t
    }
    /// Parameter at which `length` has been travelled backwards from the end.
    /// Saturates at `0.0` if the curve is shorter than `length`.
    #[must_use]
    pub fn t_at_length_from_end(&self, length: f32) -> f32 {
        let mut t = 1.0;
        let mut travelled = 0.0;
        let mut prev = self.end();
        while travelled < length {
            t -= MARCH_STEP;
            if t <= 0.0 {
                return 0.0;
            }
            let next = self.point_at(t);
            travelled += math::distance(prev, next);
            prev = next;
        }
        t
    }
}
