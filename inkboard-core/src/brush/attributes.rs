//! Geometric measurements of fitted segments that the brush rules decide on.

use crate::bezier::Bezier;
use crate::math::{self, Vec2};

/// How far along a segment to look when measuring its direction at an end.
/// Closer than this and hand wobble dominates.
pub const ANGLE_BACK_LENGTH: f32 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
pub enum Attribute {
    StartAngle,
    EndAngle,
    Length,
    InAngle,
    OutAngle,
    BetweenAngle,
}

/// Anything the rules can be evaluated against.
pub trait Attributes {
    /// The value of `attribute`, or `None` if this kind of decision point doesn't have it.
    fn get(&self, attribute: Attribute) -> Option<f32>;
}

/// Direction the segment leaves its start in, radians `[0, 2π)`.
#[must_use]
pub fn start_angle(segment: &Bezier) -> f32 {
    let meter = segment.point_at(segment.t_at_length(ANGLE_BACK_LENGTH));
    math::angle_of(meter - segment.start())
}

/// Direction the segment arrives at its end in, radians `[0, 2π)`.
#[must_use]
pub fn end_angle(segment: &Bezier) -> f32 {
    let meter = segment.point_at(segment.t_at_length_from_end(ANGLE_BACK_LENGTH));
    math::angle_of(segment.end() - meter)
}

/// Signed angle between the path arriving at `in_deg` and leaving at `out_deg`, in degrees.
/// Positive turns one way, negative the other.
#[must_use]
pub fn inner_angle(in_deg: f32, out_deg: f32) -> f32 {
    let back = math::reduce_angle_deg(in_deg + 180.0);
    let angle = math::smaller_angle_deg(back - out_deg).abs();
    if back > out_deg {
        if back - 180.0 < out_deg {
            angle
        } else {
            -angle
        }
    } else if out_deg - 180.0 < back {
        -angle
    } else {
        angle
    }
}

/// Angles in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentAttributes {
    pub start_angle: f32,
    pub end_angle: f32,
    pub start_point: Vec2,
    pub end_point: Vec2,
    pub length: f32,
}
impl SegmentAttributes {
    #[must_use]
    pub fn of(segment: &Bezier) -> Self {
        Self {
            start_angle: start_angle(segment).to_degrees(),
            end_angle: end_angle(segment).to_degrees(),
            start_point: segment.start(),
            end_point: segment.end(),
            length: segment.length(),
        }
    }
}
impl Attributes for SegmentAttributes {
    fn get(&self, attribute: Attribute) -> Option<f32> {
        match attribute {
            Attribute::StartAngle => Some(self.start_angle),
            Attribute::EndAngle => Some(self.end_angle),
            Attribute::Length => Some(self.length),
            _ => None,
        }
    }
}

/// The joint between two consecutive segments. Angles in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerAttributes {
    pub in_angle: f32,
    pub out_angle: f32,
    pub between_angle: f32,
    pub point: Vec2,
}
impl CornerAttributes {
    #[must_use]
    pub fn between(incoming: &Bezier, outgoing: &Bezier) -> Self {
        let in_angle = end_angle(incoming).to_degrees();
        let out_angle = start_angle(outgoing).to_degrees();
        Self {
            in_angle,
            out_angle,
            between_angle: inner_angle(in_angle, out_angle),
            point: incoming.end(),
        }
    }
}
impl Attributes for CornerAttributes {
    fn get(&self, attribute: Attribute) -> Option<f32> {
        match attribute {
            Attribute::InAngle => Some(self.in_angle),
            Attribute::OutAngle => Some(self.out_angle),
            Attribute::BetweenAngle => Some(self.between_angle),
            _ => None,
        }
    }
}
