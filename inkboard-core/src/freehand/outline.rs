//! Offsetting stroke points into a closed, fillable outline.

use super::points::StrokePoint;
use super::{Easing, FreehandOptions, RATE_OF_PRESSURE_CHANGE};
use crate::math::{self, Vec2};
use std::f32::consts::{PI, TAU};

/// Points in the circle emitted for a single-point stroke.
pub const DOT_POINTS: u16 = 13;
/// Fan resolution used at cusps and the start cap.
const FAN_STEPS: u16 = 13;
/// End cap resolution.
const END_CAP_STEPS: u16 = 29;
/// Points this close to the end of the stroke are dropped, the last point covers them.
const END_NOISE_LENGTH: f32 = 3.0;
/// How far a flat cap extends past the end of the stroke, as a fraction of its width.
const FLAT_CAP_DEPTH: f32 = 0.01;

#[must_use]
pub fn stroke_radius(size: f32, thinning: f32, pressure: f32, easing: Easing) -> f32 {
    size * easing.apply(0.5 - thinning * (0.5 - pressure))
}

/// Pressure implied by moving `distance` since the last point, eased from `previous`.
fn simulated_pressure(previous: f32, distance: f32, size: f32) -> f32 {
    let speed = (distance / size).min(1.0);
    let rest = (1.0 - speed).min(1.0);
    (previous + (rest - previous) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
}

fn fan_fraction(step: u16, steps: u16) -> f32 {
    f32::from(step) / f32::from(steps)
}

/// Closed polygon around `points`.
///
/// Winding runs along the left side, around the end cap, back along the right side, then around
/// the start cap. A single point, or a stroke shorter than its own cap radius, produces a
/// [`DOT_POINTS`]-gon. No points produce nothing.
#[must_use]
pub fn outline_points(points: &[StrokePoint], options: &FreehandOptions) -> Vec<Vec2> {
    let size = options.size;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if size.is_nan() || size <= 0.0 {
        return Vec::new();
    }
    if points.len() == 1 {
        return dot(first.point, dot_radius(first.pressure, options));
    }

    let total_length = last.running_length;
    let taper_start = options.start.taper.distance(size, total_length);
    let taper_end = options.end.taper.distance(size, total_length);
    let min_distance = (size * options.smoothing).powi(2);
    let taper_scale = |running_length: f32| {
        let start = if running_length < taper_start {
            options.start.easing.apply(running_length / taper_start)
        } else {
            1.0
        };
        let remaining = total_length - running_length;
        let end = if remaining < taper_end {
            options.end.easing.apply(remaining / taper_end)
        } else {
            1.0
        };
        start.min(end)
    };

    let mut left: Vec<Vec2> = Vec::with_capacity(points.len() + 16);
    let mut right: Vec<Vec2> = Vec::with_capacity(points.len() + 16);

    // Seed the running pressure from the first few points so the start isn't abrupt.
    let mut prev_pressure = points.iter().take(10).fold(first.pressure, |acc, point| {
        let pressure = if options.simulate_pressure {
            simulated_pressure(acc, point.distance, size)
        } else {
            point.pressure
        };
        (acc + pressure) / 2.0
    });
    let mut radius = stroke_radius(size, options.thinning, last.pressure, options.easing);
    let mut cap_radius = radius;
    let mut prev_vector = first.vector;
    let mut prev_left = first.point;
    let mut prev_right = first.point;
    let mut is_prev_sharp = false;

    for (i, point) in points.iter().enumerate() {
        let is_last = i == points.len() - 1;
        if !is_last && total_length - point.running_length < END_NOISE_LENGTH {
            continue;
        }

        let mut pressure = point.pressure;
        if options.thinning == 0.0 {
            radius = size / 2.0;
        } else {
            if options.simulate_pressure {
                pressure = simulated_pressure(prev_pressure, point.distance, size);
            }
            radius = stroke_radius(size, options.thinning, pressure, options.easing);
        }
        cap_radius = radius;
        radius = (radius * taper_scale(point.running_length)).max(0.01);

        let next_vector = if is_last {
            point.vector
        } else {
            points[i + 1].vector
        };
        let next_dot = if is_last {
            1.0
        } else {
            point.vector.dot(next_vector)
        };
        let prev_dot = point.vector.dot(prev_vector);

        let is_sharp = prev_dot < 0.0 && !is_prev_sharp;
        let is_next_sharp = next_dot < 0.0;
        if is_sharp || is_next_sharp {
            // Swing both sides half way around the point, so the outline turns the cusp
            // instead of crossing itself.
            let offset = math::perp(prev_vector) * radius;
            for step in 0..=FAN_STEPS {
                let t = fan_fraction(step, FAN_STEPS);
                prev_left = math::rotate_around(point.point - offset, point.point, PI * t);
                left.push(prev_left);
                prev_right = math::rotate_around(point.point + offset, point.point, -PI * t);
                right.push(prev_right);
            }
            if is_next_sharp {
                is_prev_sharp = true;
            }
            continue;
        }
        is_prev_sharp = false;

        if is_last {
            let offset = math::perp(point.vector) * radius;
            left.push(point.point - offset);
            right.push(point.point + offset);
            continue;
        }

        let offset = math::perp(math::lerp(next_vector, point.vector, next_dot)) * radius;
        let candidate = point.point - offset;
        if i <= 1 || math::distance_sq(prev_left, candidate) > min_distance {
            left.push(candidate);
            prev_left = candidate;
        }
        let candidate = point.point + offset;
        if i <= 1 || math::distance_sq(prev_right, candidate) > min_distance {
            right.push(candidate);
            prev_right = candidate;
        }
        prev_pressure = pressure;
        prev_vector = point.vector;
    }

    if total_length < cap_radius {
        // Too short for two caps to fit, so it becomes a single point.
        let middle = math::lerp(first.point, last.point, 0.5);
        let radius = (cap_radius * taper_scale(total_length / 2.0)).max(0.01);
        return dot(middle, radius);
    }

    let (Some(&left_start), Some(&right_start)) = (left.first(), right.first()) else {
        return Vec::new();
    };
    let first_point = first.point;
    let last_point = last.point;

    let mut start_cap = Vec::new();
    if taper_start > 0.0 {
        // Tapered to nothing, no cap needed.
    } else if options.start.cap {
        start_cap.extend((1..FAN_STEPS).map(|step| {
            math::rotate_around(
                right_start,
                first_point,
                PI * fan_fraction(step, FAN_STEPS),
            )
        }));
    } else {
        // Square off just behind the first point. `vector` points backwards.
        let across = left_start - right_start;
        let behind = first.vector * (across.mag() * FLAT_CAP_DEPTH);
        let half = across * 0.5;
        start_cap.extend([
            first_point - half,
            first_point - half + behind,
            first_point + half + behind,
            first_point + half,
        ]);
    }

    let mut end_cap = Vec::new();
    let direction = math::perp(-last.vector);
    if taper_end > 0.0 {
        end_cap.push(last_point);
    } else if options.end.cap {
        let start = last_point + direction * radius;
        end_cap.extend((1..END_CAP_STEPS).map(|step| {
            math::rotate_around(
                start,
                last_point,
                PI * fan_fraction(step, END_CAP_STEPS),
            )
        }));
    } else {
        let ahead = -last.vector * (2.0 * radius * FLAT_CAP_DEPTH);
        end_cap.extend([
            last_point + direction * radius,
            last_point + direction * radius + ahead,
            last_point - direction * radius + ahead,
            last_point - direction * radius,
        ]);
    }

    let mut ring = left;
    ring.reserve(end_cap.len() + right.len() + start_cap.len());
    ring.extend(end_cap);
    ring.extend(right.into_iter().rev());
    ring.extend(start_cap);
    ring
}

/// Radius of a single-point stroke. Half the size, unless thinning lets pressure scale it.
fn dot_radius(pressure: f32, options: &FreehandOptions) -> f32 {
    if options.thinning == 0.0 {
        options.size / 2.0
    } else {
        stroke_radius(options.size, options.thinning, pressure, options.easing)
    }
    .max(0.01)
}

/// A small circle for strokes that never went anywhere.
fn dot(center: Vec2, radius: f32) -> Vec<Vec2> {
    let start = center + Vec2::new(radius, 0.0);
    (1..=DOT_POINTS)
        .map(|step| math::rotate_around(start, center, TAU * fan_fraction(step, DOT_POINTS)))
        .collect()
}
