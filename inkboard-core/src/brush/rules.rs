//! Ordered, first-match-wins rule tables that pick brush corners and body styles.

use super::attributes::{Attribute, Attributes};
use super::catalog::Corner;
use super::profile::{self, WidthProfile};

/// Segments at least this long count as long strokes.
pub const LONG_STROKE: f32 = 60.0;
/// Segments shorter than this are dots.
pub const SHORT_STROKE: f32 = 40.0;

/// A predicate over named attributes. An attribute the decision point doesn't have
/// never satisfies a comparison.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Condition {
    Always,
    /// Inside any of the half-open `[low, high)` ranges.
    InRanges(Attribute, &'static [(f32, f32)]),
    /// `>= threshold`
    AtLeast(Attribute, f32),
    /// `< threshold`
    LessThan(Attribute, f32),
    All(&'static [Condition]),
    Any(&'static [Condition]),
}
impl Condition {
    #[must_use]
    pub fn check(&self, attrs: &dyn Attributes) -> bool {
        match *self {
            Self::Always => true,
            Self::InRanges(attribute, ranges) => attrs
                .get(attribute)
                .is_some_and(|v| ranges.iter().any(|&(low, high)| v >= low && v < high)),
            Self::AtLeast(attribute, threshold) => {
                attrs.get(attribute).is_some_and(|v| v >= threshold)
            }
            Self::LessThan(attribute, threshold) => {
                attrs.get(attribute).is_some_and(|v| v < threshold)
            }
            Self::All(conditions) => conditions.iter().all(|c| c.check(attrs)),
            Self::Any(conditions) => conditions.iter().any(|c| c.check(attrs)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rule<T: 'static> {
    pub result: T,
    pub condition: Condition,
}

#[derive(Copy, Clone, Debug)]
pub struct RuleSet<T: 'static>(pub &'static [Rule<T>]);
impl<T> RuleSet<T> {
    /// Result of the first rule whose condition holds.
    #[must_use]
    pub fn evaluate(&self, attrs: &dyn Attributes) -> Option<&'static T> {
        let rules: &'static [Rule<T>] = self.0;
        rules
            .iter()
            .find(|rule| rule.condition.check(attrs))
            .map(|rule| &rule.result)
    }
}

const HORIZONTAL: &[(f32, f32)] = &[(0.0, 10.0), (350.0, 360.0)];
const VERTICAL: &[(f32, f32)] = &[(80.0, 100.0)];

/// Corner at the start of the first segment of a multi-segment stroke.
pub const START_CORNERS: RuleSet<Corner> = RuleSet(&[
    Rule {
        result: Corner::C2,
        condition: Condition::InRanges(Attribute::StartAngle, HORIZONTAL),
    },
    Rule {
        result: Corner::C4,
        condition: Condition::InRanges(Attribute::StartAngle, &[(80.0, 350.0)]),
    },
]);

/// Corner at the end of the last segment of a multi-segment stroke.
pub const END_CORNERS: RuleSet<Corner> = RuleSet(&[
    Rule {
        result: Corner::C3,
        condition: Condition::InRanges(Attribute::EndAngle, HORIZONTAL),
    },
    Rule {
        result: Corner::C7,
        condition: Condition::InRanges(Attribute::EndAngle, &[(10.0, 80.0)]),
    },
    Rule {
        result: Corner::C5,
        condition: Condition::InRanges(Attribute::EndAngle, VERTICAL),
    },
]);

const TURNS_POSITIVE: Condition = Condition::InRanges(Attribute::BetweenAngle, &[(0.0, 180.0)]);
const TURNS_NEGATIVE: Condition = Condition::InRanges(Attribute::BetweenAngle, &[(-180.0, 0.0)]);

/// Corner at the joint between two segments.
pub const JOINT_CORNERS: RuleSet<Corner> = RuleSet(&[
    Rule {
        result: Corner::C8,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::InAngle, &[(0.0, 45.0), (315.0, 360.0)]),
            TURNS_POSITIVE,
        ]),
    },
    Rule {
        result: Corner::C8R,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::InAngle, &[(60.0, 170.0)]),
            TURNS_NEGATIVE,
        ]),
    },
    Rule {
        result: Corner::C9,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::InAngle, &[(45.0, 145.0)]),
            TURNS_POSITIVE,
        ]),
    },
    Rule {
        result: Corner::C9R,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::InAngle, &[(0.0, 60.0), (240.0, 360.0)]),
            TURNS_NEGATIVE,
        ]),
    },
]);

/// Kinds of single-segment stroke.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumIter)]
pub enum StrokeClass {
    /// Dot.
    Dian,
    /// Horizontal.
    Hen,
    /// Long vertical.
    Shu1,
    /// Short vertical.
    Shu2,
    /// Falling diagonal.
    Na,
    Other,
}

/// How a single-segment stroke is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BasicStyle {
    /// Just the corner, stretched along the segment.
    Dot(Corner),
    Shaped {
        start: Corner,
        body: WidthProfile,
        end: Option<Corner>,
    },
}
impl StrokeClass {
    #[must_use]
    pub fn style(self) -> BasicStyle {
        let shaped = |start, body, end| BasicStyle::Shaped { start, body, end };
        match self {
            Self::Dian => BasicStyle::Dot(Corner::C1),
            Self::Hen => shaped(Corner::C2, profile::SEGMENT_I, Some(Corner::C3)),
            Self::Shu1 => shaped(Corner::C4, profile::SEGMENT_I, Some(Corner::C5)),
            Self::Shu2 | Self::Other => shaped(Corner::C4, profile::SEGMENT_II, None),
            Self::Na => shaped(Corner::C6, profile::SEGMENT_I, Some(Corner::C7)),
        }
    }
}

pub const BASIC_STROKES: RuleSet<StrokeClass> = RuleSet(&[
    Rule {
        result: StrokeClass::Dian,
        condition: Condition::LessThan(Attribute::Length, SHORT_STROKE),
    },
    Rule {
        result: StrokeClass::Hen,
        condition: Condition::InRanges(Attribute::StartAngle, HORIZONTAL),
    },
    Rule {
        result: StrokeClass::Shu1,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::StartAngle, VERTICAL),
            Condition::AtLeast(Attribute::Length, LONG_STROKE),
        ]),
    },
    Rule {
        result: StrokeClass::Shu2,
        condition: Condition::All(&[
            Condition::InRanges(Attribute::StartAngle, VERTICAL),
            Condition::InRanges(Attribute::Length, &[(SHORT_STROKE, LONG_STROKE)]),
        ]),
    },
    Rule {
        result: StrokeClass::Na,
        condition: Condition::InRanges(Attribute::StartAngle, &[(10.0, 80.0)]),
    },
    Rule {
        result: StrokeClass::Other,
        condition: Condition::Always,
    },
]);

/// Classify a single-segment stroke. Always succeeds, falling back to [`StrokeClass::Other`].
#[must_use]
pub fn classify(attrs: &dyn Attributes) -> StrokeClass {
    BASIC_STROKES
        .evaluate(attrs)
        .copied()
        .unwrap_or(StrokeClass::Other)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::brush::attributes::{CornerAttributes, SegmentAttributes};
    use crate::math::Vec2;

    fn segment(start_angle: f32, end_angle: f32, length: f32) -> SegmentAttributes {
        SegmentAttributes {
            start_angle,
            end_angle,
            start_point: Vec2::zero(),
            end_point: Vec2::zero(),
            length,
        }
    }
    fn joint(in_angle: f32, between_angle: f32) -> CornerAttributes {
        CornerAttributes {
            in_angle,
            out_angle: 0.0,
            between_angle,
            point: Vec2::zero(),
        }
    }

    #[test]
    fn horizontal_wins_over_vertical() {
        let class = classify(&segment(5.0, 5.0, 70.0));
        assert_eq!(class, StrokeClass::Hen);
        assert_eq!(
            class.style(),
            BasicStyle::Shaped {
                start: Corner::C2,
                body: profile::SEGMENT_I,
                end: Some(Corner::C3)
            }
        );
    }
    #[test]
    fn basic_classes() {
        assert_eq!(classify(&segment(90.0, 90.0, 30.0)), StrokeClass::Dian);
        assert_eq!(classify(&segment(355.0, 0.0, 45.0)), StrokeClass::Hen);
        assert_eq!(classify(&segment(90.0, 90.0, 60.0)), StrokeClass::Shu1);
        assert_eq!(classify(&segment(90.0, 90.0, 59.9)), StrokeClass::Shu2);
        assert_eq!(classify(&segment(45.0, 45.0, 100.0)), StrokeClass::Na);
        assert_eq!(classify(&segment(200.0, 200.0, 100.0)), StrokeClass::Other);
    }
    #[test]
    fn end_corners() {
        assert_eq!(END_CORNERS.evaluate(&segment(0.0, 5.0, 1.0)), Some(&Corner::C3));
        assert_eq!(END_CORNERS.evaluate(&segment(0.0, 85.0, 1.0)), Some(&Corner::C5));
        assert_eq!(END_CORNERS.evaluate(&segment(0.0, 200.0, 1.0)), None);
    }
    #[test]
    fn start_corners() {
        assert_eq!(START_CORNERS.evaluate(&segment(352.0, 0.0, 1.0)), Some(&Corner::C2));
        assert_eq!(START_CORNERS.evaluate(&segment(120.0, 0.0, 1.0)), Some(&Corner::C4));
        assert_eq!(START_CORNERS.evaluate(&segment(40.0, 0.0, 1.0)), None);
    }
    #[test]
    fn joints_first_match() {
        assert_eq!(JOINT_CORNERS.evaluate(&joint(10.0, 90.0)), Some(&Corner::C8));
        assert_eq!(JOINT_CORNERS.evaluate(&joint(90.0, -90.0)), Some(&Corner::C8R));
        assert_eq!(JOINT_CORNERS.evaluate(&joint(90.0, 90.0)), Some(&Corner::C9));
        assert_eq!(JOINT_CORNERS.evaluate(&joint(20.0, -90.0)), Some(&Corner::C9R));
        assert_eq!(JOINT_CORNERS.evaluate(&joint(200.0, 90.0)), None);
    }
    #[test]
    fn missing_attributes_never_match() {
        // Joints have no length.
        assert!(!Condition::AtLeast(Attribute::Length, 0.0).check(&joint(0.0, 0.0)));
        assert!(Condition::Always.check(&joint(0.0, 0.0)));
        assert!(Condition::Any(&[
            Condition::LessThan(Attribute::Length, 1.0),
            Condition::AtLeast(Attribute::InAngle, 0.0),
        ])
        .check(&joint(0.0, 0.0)));
    }
}
