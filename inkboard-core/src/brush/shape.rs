//! Brush shapes: small closed outlines built from cubic sections, with optional bones
//! that bend part of the outline towards a direction.
//!
//! Shapes in the [catalog](super::catalog) are never modified. Every transform here returns a new
//! shape.

use crate::canvas::Path;
use crate::math::{self, Placement, Vec2};
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
pub enum BoneLabel {
    ArmA,
    ArmB,
}

/// A set of control points that rotate together about the shape origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    /// `(section, control point)` indices.
    pub points: SmallVec<[(usize, usize); 12]>,
    /// Direction the bone points in the untransformed shape, degrees in `[0, 360)`.
    pub offset_deg: f32,
}

pub type Section = [Vec2; 4];

#[derive(Clone, Debug, PartialEq)]
pub struct BezierShape {
    pub name: &'static str,
    sections: SmallVec<[Section; 6]>,
    skeleton: SmallVec<[(BoneLabel, Bone); 2]>,
}
impl BezierShape {
    #[must_use]
    pub fn new(name: &'static str, sections: &[[[f32; 2]; 4]]) -> Self {
        Self {
            name,
            sections: sections
                .iter()
                .map(|section| (*section).map(Vec2::from))
                .collect(),
            skeleton: SmallVec::new(),
        }
    }
    #[must_use]
    pub fn with_bone(mut self, label: BoneLabel, points: &[(usize, usize)], offset_deg: f32) -> Self {
        self.skeleton.retain(|(l, _)| *l != label);
        self.skeleton.push((
            label,
            Bone {
                points: points.into(),
                offset_deg: math::reduce_angle_deg(offset_deg),
            },
        ));
        self
    }
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
    #[must_use]
    pub fn bone(&self, label: BoneLabel) -> Option<&Bone> {
        self.skeleton
            .iter()
            .find_map(|(l, bone)| (*l == label).then_some(bone))
    }
    fn map_points(&self, f: impl Fn(Vec2) -> Vec2) -> SmallVec<[Section; 6]> {
        self.sections
            .iter()
            .map(|section| (*section).map(&f))
            .collect()
    }
    /// Mirror across the vertical axis. Bone directions are mirrored too.
    #[must_use]
    pub fn flipped_horizontal(&self, name: &'static str) -> Self {
        Self {
            name,
            sections: self.map_points(|p| Vec2::new(-p.x, p.y)),
            skeleton: self
                .skeleton
                .iter()
                .map(|(label, bone)| {
                    let mut bone = bone.clone();
                    bone.offset_deg = math::reduce_angle_deg(180.0 - bone.offset_deg);
                    (*label, bone)
                })
                .collect(),
        }
    }
    /// Mirror across the horizontal axis. Bone directions are mirrored too.
    #[must_use]
    pub fn flipped_vertical(&self, name: &'static str) -> Self {
        Self {
            name,
            sections: self.map_points(|p| Vec2::new(p.x, -p.y)),
            skeleton: self
                .skeleton
                .iter()
                .map(|(label, bone)| {
                    let mut bone = bone.clone();
                    bone.offset_deg = math::reduce_angle_deg(360.0 - bone.offset_deg);
                    (*label, bone)
                })
                .collect(),
        }
    }
    /// Swing the named bones so they point in the given directions (radians).
    /// Labels this shape doesn't have are ignored.
    #[must_use]
    pub fn with_bone_angles(&self, directions: &[(BoneLabel, f32)]) -> Self {
        let mut shape = self.clone();
        for &(label, direction) in directions {
            let Some(bone) = self.bone(label) else {
                log::trace!("shape {} has no bone {}", self.name, label.as_ref());
                continue;
            };
            let turn = direction - bone.offset_deg.to_radians();
            for &(section, point) in &bone.points {
                if let Some(p) = shape
                    .sections
                    .get_mut(section)
                    .and_then(|s| s.get_mut(point))
                {
                    *p = math::rotate(*p, turn);
                }
            }
        }
        shape
    }
    /// Outline of the shape, placed onto the canvas.
    ///
    /// Only the first section's start point is used, each section continues from wherever the
    /// previous one ended.
    #[must_use]
    pub fn path(&self, placement: &Placement) -> Path {
        let mut path = Path::new();
        let Some(first) = self.sections.first() else {
            return path;
        };
        path.move_to(placement.apply(first[0]));
        for [_, c0, c1, end] in &self.sections {
            path.cubic_to(
                placement.apply(*c0),
                placement.apply(*c1),
                placement.apply(*end),
            );
        }
        path.close();
        path
    }
}
