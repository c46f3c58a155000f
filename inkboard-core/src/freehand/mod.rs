//! Pressure-sensitive stroke outlines.
//!
//! A stroke's samples are first smoothed and resampled into [`points::StrokePoint`]s, which are then
//! offset to either side into one closed polygon (see [`outline::outline_points`]). The polygon is
//! meant to be *filled*, never stroked.

pub mod outline;
pub mod points;

use crate::input::Sample;
use crate::math::Vec2;

/// Pressure assumed for samples that don't report one.
pub const DEFAULT_PRESSURE: f32 = 0.5;
/// Pressure assumed for the very first sample, if it doesn't report one.
pub const DEFAULT_FIRST_PRESSURE: f32 = 0.25;
/// How quickly simulated pressure approaches its target.
pub const RATE_OF_PRESSURE_CHANGE: f32 = 0.275;

/// Shaping curve over `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, strum::EnumIter, strum::AsRefStr)]
pub enum Easing {
    #[default]
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseInOutSine,
}
impl Easing {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseOutCubic => (t - 1.0).powi(3) + 1.0,
            Self::EaseInOutSine => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// How far from an end of the stroke its radius shrinks to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Taper {
    #[default]
    None,
    /// Taper over the larger of the stroke size and the whole stroke length.
    Full,
    Distance(f32),
}
impl Taper {
    #[must_use]
    pub fn distance(self, size: f32, total_length: f32) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Full => size.max(total_length),
            Self::Distance(d) => d.max(0.0),
        }
    }
}

/// Treatment of one end of the stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EndOptions {
    /// Round cap if true, flat if false. Ignored when tapered.
    pub cap: bool,
    pub taper: Taper,
    pub easing: Easing,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FreehandOptions {
    /// Base diameter of the stroke.
    pub size: f32,
    /// Effect of pressure on the radius. Zero ignores pressure entirely.
    pub thinning: f32,
    /// Minimum spacing of outline points, as a fraction of `size`.
    pub smoothing: f32,
    /// How strongly input jitter is suppressed.
    pub streamline: f32,
    /// Applied to pressure before it affects the radius.
    pub easing: Easing,
    /// Derive pressure from drawing speed instead of the samples.
    pub simulate_pressure: bool,
    pub start: EndOptions,
    pub end: EndOptions,
    /// The stroke is finished, so its last sample is used verbatim.
    pub last: bool,
}
impl Default for FreehandOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            easing: Easing::Linear,
            simulate_pressure: true,
            start: EndOptions {
                cap: true,
                taper: Taper::None,
                easing: Easing::EaseOutQuad,
            },
            end: EndOptions {
                cap: true,
                taper: Taper::None,
                easing: Easing::EaseOutCubic,
            },
            last: false,
        }
    }
}

/// Full pipeline, samples to filled outline. Empty input gives an empty outline.
#[must_use]
pub fn outline(samples: &[Sample], options: &FreehandOptions) -> Vec<Vec2> {
    let points = points::stroke_points(samples, options);
    outline::outline_points(&points, options)
}

#[cfg(test)]
mod test {
    use super::{Easing, Taper};
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn easings_fix_endpoints() {
        for easing in Easing::iter() {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-6);
        }
    }
    #[test]
    fn taper_distances() {
        assert_eq!(Taper::None.distance(16.0, 100.0), 0.0);
        assert_eq!(Taper::Full.distance(16.0, 100.0), 100.0);
        assert_eq!(Taper::Full.distance(16.0, 4.0), 16.0);
        assert_eq!(Taper::Distance(-3.0).distance(16.0, 4.0), 0.0);
    }
}
