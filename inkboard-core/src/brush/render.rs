//! Painting fitted strokes with brush corners and variable-width bodies.

use super::attributes::{CornerAttributes, SegmentAttributes};
use super::catalog::Corner;
use super::profile::{self, WidthProfile};
use super::rules::{self, BasicStyle};
use super::shape::BoneLabel;
use crate::bezier::Bezier;
use crate::canvas::{Canvas, Path};
use crate::color::Rgb;
use crate::math::{self, Placement, Vec2};

/// Nominal width of a calligraphy stroke.
pub const WEIGHT: f32 = 15.0;
/// Arclength between body samples.
pub const RESOLUTION: f32 = 4.0;
/// Corners are authored at ten times the unit stroke width.
const CORNER_SCALE: f32 = 10.0;
/// Dot width divisor.
const DOT_WIDTH_SCALE: f32 = 13.0;
/// Dot length divisor.
const DOT_LENGTH_SCALE: f32 = 20.0;

/// Paint a whole calligraphy stroke. A single segment is classified as a basic stroke,
/// more are drawn as a compound stroke with jointed corners.
pub fn draw_stroke<C: Canvas + ?Sized>(
    canvas: &mut C,
    segments: &[Bezier],
    width: f32,
    color: Rgb,
) {
    match segments {
        [] => (),
        [segment] => draw_basic(canvas, segment, width, color),
        _ => draw_compound(canvas, segments, width, color),
    }
}

fn draw_basic<C: Canvas + ?Sized>(canvas: &mut C, segment: &Bezier, width: f32, color: Rgb) {
    let attrs = SegmentAttributes::of(segment);
    let class = rules::classify(&attrs);
    log::trace!("basic stroke {} of length {}", class.as_ref(), attrs.length);
    match class.style() {
        BasicStyle::Dot(corner) => {
            let center = math::lerp(attrs.start_point, attrs.end_point, 0.5);
            let scale = Vec2::new(attrs.length / DOT_LENGTH_SCALE, width / DOT_WIDTH_SCALE);
            draw_corner(canvas, corner, center, attrs.start_angle.to_radians(), scale, color);
        }
        BasicStyle::Shaped { start, body, end } => {
            let scale = Vec2::broadcast(width / CORNER_SCALE);
            draw_corner(
                canvas,
                start,
                attrs.start_point,
                attrs.start_angle.to_radians(),
                scale,
                color,
            );
            if let Some(end) = end {
                draw_corner(
                    canvas,
                    end,
                    attrs.end_point,
                    attrs.end_angle.to_radians(),
                    scale,
                    color,
                );
            }
            canvas.fill(&body_polygon(segment, width, &body), color);
        }
    }
}

fn draw_compound<C: Canvas + ?Sized>(canvas: &mut C, segments: &[Bezier], width: f32, color: Rgb) {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return;
    };
    let scale = Vec2::broadcast(width / CORNER_SCALE);

    let first_attrs = SegmentAttributes::of(first);
    let start = rules::START_CORNERS.evaluate(&first_attrs).copied();
    if let Some(corner) = start {
        draw_corner(
            canvas,
            corner,
            first_attrs.start_point,
            first_attrs.start_angle.to_radians(),
            scale,
            color,
        );
    }
    for pair in segments.windows(2) {
        let attrs = CornerAttributes::between(&pair[0], &pair[1]);
        if let Some(&corner) = rules::JOINT_CORNERS.evaluate(&attrs) {
            draw_jointed_corner(canvas, corner, &attrs, width, color);
        }
    }
    let last_attrs = SegmentAttributes::of(last);
    let end = rules::END_CORNERS.evaluate(&last_attrs).copied();
    if let Some(corner) = end {
        draw_corner(
            canvas,
            corner,
            last_attrs.end_point,
            last_attrs.end_angle.to_radians(),
            scale,
            color,
        );
    }

    let last_index = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        let body = match i {
            0 if start.is_none() => profile::SEGMENT_III,
            i if i == last_index && end.is_none() => profile::SEGMENT_II,
            _ => profile::SEGMENT_I,
        };
        canvas.fill(&body_polygon(segment, width, &body), color);
    }
}

/// Fill a corner placed at `position`, rotated to `direction` radians, and scaled per-axis.
pub fn draw_corner<C: Canvas + ?Sized>(
    canvas: &mut C,
    corner: Corner,
    position: Vec2,
    direction: f32,
    scale: Vec2,
    color: Rgb,
) {
    let path = corner
        .shape()
        .path(&Placement::new(position, direction, scale));
    canvas.fill(&path, color);
}

/// Fill a corner at the joint between two segments. The whole shape turns so its first arm
/// follows the incoming segment, and the second arm is bent towards the outgoing one.
pub fn draw_jointed_corner<C: Canvas + ?Sized>(
    canvas: &mut C,
    corner: Corner,
    attrs: &CornerAttributes,
    width: f32,
    color: Rgb,
) {
    let shape = corner.shape();
    let arm_a = shape.bone(BoneLabel::ArmA).map_or(0.0, |bone| bone.offset_deg);
    let in_angle = attrs.in_angle - arm_a;
    let bent = shape.with_bone_angles(&[(
        BoneLabel::ArmB,
        (attrs.out_angle - in_angle).to_radians(),
    )]);
    let placement = Placement::new(
        attrs.point,
        in_angle.to_radians(),
        Vec2::broadcast(width / CORNER_SCALE),
    );
    canvas.fill(&bent.path(&placement), color);
}

/// Outline of a segment swept with a varying width: the left edge forward, then the right
/// edge back.
#[must_use]
pub fn body_polygon(segment: &Bezier, width: f32, profile: &WidthProfile) -> Path {
    // Saturating float to int, lengths are never negative.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = ((segment.length() / RESOLUTION).round() as usize).max(1);
    let start = segment.start();
    let first_handle = segment
        .control_points()
        .get(1)
        .copied()
        .unwrap_or_else(|| segment.end());
    // Mirror of the first handle, so the first sample faces along the start tangent.
    let mut previous = start * 2.0 - first_handle;

    let mut left = Vec::with_capacity(steps * 2 + 2);
    let mut right = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f32 / steps as f32;
        let center = segment.point_at(t);
        let offset = math::perp_norm(center - previous) * (profile.sample(t) * width / 2.0);
        left.push(center + offset);
        right.push(center - offset);
        previous = center;
    }
    left.extend(right.into_iter().rev());
    Path::polygon(&left)
}
