//! Width profiles: how wide a brush body is along its length, as a multiple of the nominal width.

use crate::math;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Cosine,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WidthProfile {
    pub name: &'static str,
    /// `(t, width)` pairs, sorted by `t`.
    knots: &'static [(f32, f32)],
    interpolation: Interpolation,
}
impl WidthProfile {
    #[must_use]
    pub const fn new(
        name: &'static str,
        knots: &'static [(f32, f32)],
        interpolation: Interpolation,
    ) -> Self {
        Self {
            name,
            knots,
            interpolation,
        }
    }
    /// Width multiplier at `t`. Clamps to the first and last knots outside of their range.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        let (Some(&(first_t, first)), Some(&(_, last))) = (self.knots.first(), self.knots.last())
        else {
            return 1.0;
        };
        if t <= first_t {
            return first;
        }
        for pair in self.knots.windows(2) {
            let [(t0, w0), (t1, w1)] = [pair[0], pair[1]];
            if t > t0 && t <= t1 {
                let mu = (t - t0) / (t1 - t0);
                return match self.interpolation {
                    Interpolation::Linear => math::lin_interpolate(w0, w1, mu),
                    Interpolation::Cosine => math::cos_interpolate(w0, w1, mu),
                };
            }
        }
        last
    }
}

/// Full at both ends, pinched in the middle.
pub const SEGMENT_I: WidthProfile = WidthProfile::new(
    "I",
    &[(0.0, 1.0), (0.5, 0.7), (1.0, 1.0)],
    Interpolation::Cosine,
);
/// Starts full, trails off.
pub const SEGMENT_II: WidthProfile = WidthProfile::new(
    "II",
    &[(0.0, 1.0), (0.5, 0.8), (1.0, 0.2)],
    Interpolation::Linear,
);
/// Starts thin, builds up.
pub const SEGMENT_III: WidthProfile = WidthProfile::new(
    "III",
    &[(0.0, 0.2), (0.5, 0.8), (1.0, 1.0)],
    Interpolation::Linear,
);
