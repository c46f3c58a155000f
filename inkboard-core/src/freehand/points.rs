//! Resampling raw samples into evenly-behaved stroke points.

use super::{FreehandOptions, DEFAULT_FIRST_PRESSURE, DEFAULT_PRESSURE};
use crate::input::Sample;
use crate::math::{self, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokePoint {
    pub point: Vec2,
    pub pressure: f32,
    /// Unit vector pointing back towards the previous point.
    pub vector: Vec2,
    /// Distance from the previous point.
    pub distance: f32,
    /// Total distance travelled up to this point.
    pub running_length: f32,
}

/// Smooth and resample `samples`.
///
/// Each sample pulls the stroke towards itself rather than being taken verbatim, which
/// suppresses jitter. Points before the stroke has travelled `options.size` are dropped so
/// the start doesn't become a blob. A single sample yields a single point.
#[must_use]
pub fn stroke_points(samples: &[Sample], options: &FreehandOptions) -> Vec<StrokePoint> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let t = 0.15 + (1.0 - options.streamline.clamp(0.0, 1.0)) * 0.85;

    let mut raw: Vec<(Vec2, Option<f32>)> =
        samples.iter().map(|s| (s.position, s.pressure)).collect();
    if let &[start, end] = raw.as_slice() {
        // Too few points to smooth against, so fill in the gap.
        raw.truncate(1);
        for i in 1..5 {
            let f = i as f32 / 4.0;
            let pressure = match (start.1, end.1) {
                (Some(a), Some(b)) => Some(math::lin_interpolate(a, b, f)),
                _ => None,
            };
            raw.push((math::lerp(start.0, end.0, f), pressure));
        }
    }

    let mut points = Vec::with_capacity(raw.len());
    points.push(StrokePoint {
        point: first.position,
        pressure: first.pressure.unwrap_or(DEFAULT_FIRST_PRESSURE),
        vector: Vec2::new(1.0, 1.0),
        distance: 0.0,
        running_length: 0.0,
    });

    let max = raw.len() - 1;
    let mut has_reached_minimum_length = false;
    let mut running_length = 0.0;
    let mut prev = points[0];
    for (i, &(position, pressure)) in raw.iter().enumerate().skip(1) {
        let point = if options.last && i == max {
            position
        } else {
            math::lerp(prev.point, position, t)
        };
        if point == prev.point {
            continue;
        }
        let distance = math::distance(point, prev.point);
        running_length += distance;
        if i < max && !has_reached_minimum_length {
            if running_length < options.size {
                continue;
            }
            has_reached_minimum_length = true;
        }
        prev = StrokePoint {
            point,
            pressure: pressure.unwrap_or(DEFAULT_PRESSURE),
            vector: math::normalize(prev.point - point),
            distance,
            running_length,
        };
        points.push(prev);
    }

    points[0].vector = points.get(1).map_or_else(Vec2::zero, |p| p.vector);
    points
}
