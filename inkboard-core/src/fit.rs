//! Fit a chain of cubic Beziers to a raw input polyline ("chord").
//!
//! The chord is first cut at sharp corners, then each piece gets a single least-squares cubic
//! whose endpoints are pinned to the piece's endpoints.

use crate::bezier::Bezier;
use crate::math::{self, SolveError, Vec2};

/// Interior angles at or below this many degrees are corners.
pub const CORNER_THRESHOLD_DEG: f32 = 135.0;

/// Indices of interior points of `chord` whose interior angle is at most `threshold_deg`.
///
/// Points that coincide with a neighbor have no defined angle and are never corners.
#[must_use]
pub fn detect_corners(chord: &[Vec2], threshold_deg: f32) -> Vec<usize> {
    let mut corners = Vec::new();
    for (i, window) in chord.windows(3).enumerate() {
        let [prev, here, next] = [window[0], window[1], window[2]];
        let incoming = prev - here;
        let outgoing = next - here;
        if incoming.mag_sq() == 0.0 || outgoing.mag_sq() == 0.0 {
            continue;
        }
        let angle = math::smaller_angle(math::angle_between(incoming, outgoing)).to_degrees();
        if angle <= threshold_deg {
            corners.push(i + 1);
        }
    }
    corners
}

/// Cut `chord` at each of `corners`. Neighboring pieces share the corner point.
#[must_use]
pub fn split_chord<'a>(chord: &'a [Vec2], corners: &[usize]) -> Vec<&'a [Vec2]> {
    let mut pieces = Vec::with_capacity(corners.len() + 1);
    let mut from = 0;
    for &corner in corners {
        pieces.push(&chord[from..=corner]);
        from = corner;
    }
    pieces.push(&chord[from..]);
    pieces
}

/// Normalized cumulative chord length of each point, from `0.0` at the start to `1.0` at the end.
///
/// A chord with no length at all is parameterized uniformly instead.
#[must_use]
pub fn parameterize(chord: &[Vec2]) -> Vec<f32> {
    let mut lengths = Vec::with_capacity(chord.len());
    let mut total = 0.0;
    lengths.push(0.0);
    for pair in chord.windows(2) {
        total += math::distance(pair[0], pair[1]);
        lengths.push(total);
    }
    if total > 0.0 {
        lengths.iter_mut().for_each(|len| *len /= total);
    } else if chord.len() > 1 {
        let last = (chord.len() - 1) as f32;
        lengths
            .iter_mut()
            .enumerate()
            .for_each(|(i, len)| *len = i as f32 / last);
    }
    lengths
}

/// Least-squares cubic through `chord` at parameters `ts`, with the ends pinned.
///
/// Chords of fewer than four points don't constrain the handles, so they get
/// [`Bezier::straight`]. `chord` must not be empty, and `ts` must be as long as `chord`.
pub fn least_squares_fit(chord: &[Vec2], ts: &[f32]) -> Result<Bezier, SolveError> {
    let (Some(&first), Some(&last)) = (chord.first(), chord.last()) else {
        return Err(SolveError::Shape);
    };
    if chord.len() < 4 {
        return Ok(Bezier::straight(first, last));
    }
    if ts.len() != chord.len() {
        return Err(SolveError::Shape);
    }

    let (x0, y0) = (f64::from(first.x), f64::from(first.y));
    let (x3, y3) = (f64::from(last.x), f64::from(last.y));
    let mut a = [[0.0f64; 2]; 2];
    let mut rhs_x = [0.0f64; 2];
    let mut rhs_y = [0.0f64; 2];
    for (p, &t) in chord.iter().zip(ts) {
        let t = f64::from(t);
        let s = 1.0 - t;
        // Residual after removing the pinned endpoints' contribution.
        let rx = f64::from(p.x) - s.powi(3) * x0 - t.powi(3) * x3;
        let ry = f64::from(p.y) - s.powi(3) * y0 - t.powi(3) * y3;

        a[0][0] += 3.0 * t.powi(2) * s.powi(4);
        a[0][1] += 3.0 * t.powi(3) * s.powi(3);
        a[1][1] += 3.0 * t.powi(4) * s.powi(2);
        rhs_x[0] += t * s.powi(2) * rx;
        rhs_x[1] += t.powi(2) * s * rx;
        rhs_y[0] += t * s.powi(2) * ry;
        rhs_y[1] += t.powi(2) * s * ry;
    }
    a[1][0] = a[0][1];

    let xs = math::gaussian_elimination([
        [a[0][0], a[0][1], rhs_x[0]],
        [a[1][0], a[1][1], rhs_x[1]],
    ])?;
    let ys = math::gaussian_elimination([
        [a[0][0], a[0][1], rhs_y[0]],
        [a[1][0], a[1][1], rhs_y[1]],
    ])?;

    #[allow(clippy::cast_possible_truncation)]
    Ok(Bezier::cubic(
        first,
        Vec2::new(xs[0] as f32, ys[0] as f32),
        Vec2::new(xs[1] as f32, ys[1] as f32),
        last,
    ))
}

/// Fit one cubic to `chord` at the given parameters, falling back to a straight segment
/// if the fit can't be solved. `chord` must not be empty.
#[must_use]
pub fn fit_chord_with(chord: &[Vec2], ts: &[f32]) -> Bezier {
    match least_squares_fit(chord, ts) {
        Ok(curve) => curve,
        Err(e) => {
            log::debug!("curve fit of {} points fell back to a line: {e}", chord.len());
            let first = chord.first().copied().unwrap_or_else(Vec2::zero);
            let last = chord.last().copied().unwrap_or(first);
            Bezier::straight(first, last)
        }
    }
}

/// Fit one cubic to `chord`, parameterized by chord length.
#[must_use]
pub fn fit_chord(chord: &[Vec2]) -> Bezier {
    fit_chord_with(chord, &parameterize(chord))
}

/// Fit a continuous chain of cubics to the whole input path.
///
/// The first control point of the chain is the first input point, the last is the last input point,
/// and each segment starts exactly where the previous one ends.
#[must_use]
pub fn fit_stroke(chord: &[Vec2]) -> Vec<Bezier> {
    if chord.is_empty() {
        return Vec::new();
    }
    let corners = detect_corners(chord, CORNER_THRESHOLD_DEG);
    split_chord(chord, &corners)
        .into_iter()
        .map(fit_chord)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Tiny deterministic generator so the tests are reproducible.
    struct Lcg(u32);
    impl Lcg {
        fn next(&mut self) -> f32 {
            self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (self.0 >> 8) as f32 / (1u32 << 24) as f32
        }
    }

    fn zigzag() -> Vec<Vec2> {
        // Right, then sharply down, then right again.
        let mut points: Vec<Vec2> = (0..=10).map(|i| Vec2::new(i as f32 * 10.0, 0.0)).collect();
        points.extend((1..=10).map(|i| Vec2::new(100.0, i as f32 * 10.0)));
        points.extend((1..=10).map(|i| Vec2::new(100.0 + i as f32 * 10.0, 100.0)));
        points
    }

    #[test]
    fn endpoints_are_preserved() {
        let mut rng = Lcg(7);
        for len in 2..40 {
            let chord: Vec<Vec2> = (0..len)
                .map(|_| Vec2::new(rng.next() * 300.0, rng.next() * 300.0))
                .collect();
            let curves = fit_stroke(&chord);
            assert!(!curves.is_empty());
            assert_eq!(curves[0].start(), chord[0]);
            assert_eq!(curves[curves.len() - 1].end(), chord[len - 1]);
            for pair in curves.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
            }
        }
    }
    #[test]
    fn corners_split_sharp_turns() {
        let chord = zigzag();
        assert_eq!(detect_corners(&chord, CORNER_THRESHOLD_DEG), vec![10, 20]);
        let pieces = split_chord(&chord, &[10, 20]);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].last(), pieces[1].first());
        assert_eq!(pieces[1].last(), pieces[2].first());
    }
    #[test]
    fn corner_detection_is_idempotent() {
        let chord = zigzag();
        let corners = detect_corners(&chord, CORNER_THRESHOLD_DEG);
        for piece in split_chord(&chord, &corners) {
            assert!(detect_corners(piece, CORNER_THRESHOLD_DEG).is_empty());
        }
    }
    #[test]
    fn gentle_curves_have_no_corners() {
        let chord: Vec<Vec2> = (0..20)
            .map(|i| {
                let a = i as f32 * 0.1;
                Vec2::new(a.cos() * 100.0, a.sin() * 100.0)
            })
            .collect();
        assert!(detect_corners(&chord, CORNER_THRESHOLD_DEG).is_empty());
        assert_eq!(fit_stroke(&chord).len(), 1);
    }
    #[test]
    fn parameterize_is_normalized() {
        let ts = parameterize(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(4.0, 0.0),
        ]);
        assert_eq!(ts, vec![0.0, 0.25, 1.0]);
        // No length, spread evenly.
        let ts = parameterize(&[Vec2::zero(); 3]);
        assert_eq!(ts, vec![0.0, 0.5, 1.0]);
    }
    #[test]
    fn fits_points_on_a_cubic() {
        let target = Bezier::cubic(
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 60.0),
            Vec2::new(70.0, 60.0),
            Vec2::new(100.0, 0.0),
        );
        let ts: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
        let chord: Vec<Vec2> = ts.iter().map(|&t| target.point_at(t)).collect();
        let fitted = least_squares_fit(&chord, &ts).unwrap();
        for (got, want) in fitted.control_points().iter().zip(target.control_points()) {
            assert_abs_diff_eq!(got.x, want.x, epsilon = 1e-2);
            assert_abs_diff_eq!(got.y, want.y, epsilon = 1e-2);
        }
    }
    #[test]
    fn short_chords_are_straight() {
        let chord = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 1.0), Vec2::new(8.0, 0.0)];
        assert_eq!(
            fit_chord(&chord),
            Bezier::straight(Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0))
        );
        let single = fit_stroke(&[Vec2::new(3.0, 4.0)]);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].start(), single[0].end());
        assert!(fit_stroke(&[]).is_empty());
    }
    #[test]
    fn singular_fit_falls_back_to_straight() {
        let chord = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 9.0),
            Vec2::new(6.0, -2.0),
            Vec2::new(9.0, 0.0),
        ];
        // Every sample at t = 0 leaves the handles unconstrained.
        let ts = [0.0; 4];
        assert_eq!(least_squares_fit(&chord, &ts), Err(SolveError::Singular));
        assert_eq!(
            fit_chord_with(&chord, &ts),
            Bezier::straight(chord[0], chord[3])
        );
    }
}
