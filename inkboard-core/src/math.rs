//! Vector helpers, angle bookkeeping, interpolation, and a small dense linear solver.
//!
//! Vectors are [`ultraviolet::Vec2`]. Everything here is pure.
//! Angles are radians unless the name ends in `_deg`.

pub use ultraviolet::Vec2;

use std::f32::consts::{PI, TAU};

/// Unit vector in the direction of `v`, or the zero vector if `v` has no length.
#[must_use]
pub fn normalize(v: Vec2) -> Vec2 {
    let mag = v.mag();
    if mag > 0.0 && mag.is_finite() {
        v / mag
    } else {
        Vec2::zero()
    }
}

/// `v` rotated a quarter turn, `(y, -x)`.
#[must_use]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

#[must_use]
pub fn perp_norm(v: Vec2) -> Vec2 {
    normalize(perp(v))
}

#[must_use]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).mag()
}

#[must_use]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (b - a).mag_sq()
}

#[must_use]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Wrap an angle into `[0, 2π)`.
#[must_use]
pub fn reduce_angle(angle: f32) -> f32 {
    let reduced = angle - (angle / TAU).floor() * TAU;
    // Rounding can land exactly on the upper bound for tiny negative inputs.
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn reduce_angle_deg(angle: f32) -> f32 {
    let reduced = angle - (angle / 360.0).floor() * 360.0;
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Direction of `v` in `[0, 2π)`, measured from +x towards +y.
/// The zero vector has angle zero.
#[must_use]
pub fn angle_of(v: Vec2) -> f32 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    reduce_angle(v.y.atan2(v.x))
}

/// Absolute difference of the directions of `a` and `b`, in `[0, 2π)`.
#[must_use]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    (angle_of(a) - angle_of(b)).abs()
}

/// Fold an angle difference in `(-2π, 2π)` to the shorter way around.
#[must_use]
pub fn smaller_angle(angle: f32) -> f32 {
    if angle > PI {
        TAU - angle
    } else if angle < -PI {
        -TAU - angle
    } else {
        angle
    }
}

#[must_use]
pub fn smaller_angle_deg(angle: f32) -> f32 {
    if angle > 180.0 {
        360.0 - angle
    } else if angle < -180.0 {
        -360.0 - angle
    } else {
        angle
    }
}

/// Rotate `v` about the origin.
#[must_use]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate `p` about `center`.
#[must_use]
pub fn rotate_around(p: Vec2, center: Vec2, angle: f32) -> Vec2 {
    rotate(p - center, angle) + center
}

#[must_use]
pub fn lin_interpolate(y0: f32, y1: f32, mu: f32) -> f32 {
    y0 * (1.0 - mu) + y1 * mu
}

/// Interpolate with a half-cosine ease, flat at both ends.
#[must_use]
pub fn cos_interpolate(y0: f32, y1: f32, mu: f32) -> f32 {
    let mu2 = (1.0 - (mu * PI).cos()) / 2.0;
    y0 * (1.0 - mu2) + y1 * mu2
}

/// Scale, then rotate, then translate. Maps shape-local coordinates into canvas space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub translate: Vec2,
    pub rotate: f32,
    pub scale: Vec2,
}
impl Placement {
    #[must_use]
    pub fn new(translate: Vec2, rotate: f32, scale: Vec2) -> Self {
        Self {
            translate,
            rotate,
            scale,
        }
    }
    #[must_use]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        rotate(p * self.scale, self.rotate) + self.translate
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("matrix is singular")]
    Singular,
    #[error("augmented matrix must have exactly one more column than rows")]
    Shape,
}

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Solve the augmented system `matrix = [A | b]` for `x` in `Ax = b`.
///
/// Uses Gaussian elimination with partial pivoting, choosing the largest magnitude
/// entry of the remaining column as pivot. `M` must equal `N + 1`.
pub fn gaussian_elimination<const N: usize, const M: usize>(
    mut matrix: [[f64; M]; N],
) -> Result<[f64; N], SolveError> {
    if M != N + 1 {
        return Err(SolveError::Shape);
    }
    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))
            .unwrap_or(col);
        let pivot = matrix[pivot_row][col];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPSILON {
            return Err(SolveError::Singular);
        }
        matrix.swap(col, pivot_row);

        for row in col + 1..N {
            let factor = matrix[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..M {
                matrix[row][k] -= factor * matrix[col][k];
            }
        }
    }

    let mut solution = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = (row + 1..N).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (matrix[row][N] - tail) / matrix[row][row];
    }
    if solution.iter().all(|x| x.is_finite()) {
        Ok(solution)
    } else {
        Err(SolveError::Singular)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(Vec2::zero()), Vec2::zero());
        let n = normalize(Vec2::new(3.0, 4.0));
        assert_abs_diff_eq!(n.x, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(n.y, 0.8, epsilon = 1e-6);
    }
    #[test]
    fn angles_are_quadrant_correct() {
        assert_abs_diff_eq!(angle_of(Vec2::new(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(angle_of(Vec2::new(0.0, 1.0)), PI / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(angle_of(Vec2::new(-1.0, 0.0)), PI, epsilon = 1e-6);
        assert_abs_diff_eq!(
            angle_of(Vec2::new(0.0, -1.0)),
            3.0 * PI / 2.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            angle_of(Vec2::new(1.0, -1.0)),
            7.0 * PI / 4.0,
            epsilon = 1e-6
        );
        assert_eq!(angle_of(Vec2::zero()), 0.0);
    }
    #[test]
    fn reduce_wraps() {
        assert_abs_diff_eq!(reduce_angle(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(reduce_angle_deg(370.0), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(reduce_angle_deg(-90.0), 270.0, epsilon = 1e-4);
    }
    #[test]
    fn smaller_angle_folds() {
        assert_abs_diff_eq!(smaller_angle(3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(smaller_angle_deg(-270.0), -90.0);
        assert_abs_diff_eq!(smaller_angle_deg(90.0), 90.0);
    }
    #[test]
    fn rotation() {
        let r = rotate(Vec2::new(1.0, 0.0), PI / 2.0);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.y, 1.0, epsilon = 1e-6);
        let r = rotate_around(Vec2::new(2.0, 1.0), Vec2::new(1.0, 1.0), PI);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.y, 1.0, epsilon = 1e-6);
    }
    #[test]
    fn interpolation_endpoints() {
        assert_abs_diff_eq!(lin_interpolate(1.0, 3.0, 0.5), 2.0);
        assert_abs_diff_eq!(cos_interpolate(1.0, 3.0, 0.0), 1.0);
        assert_abs_diff_eq!(cos_interpolate(1.0, 3.0, 1.0), 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cos_interpolate(1.0, 3.0, 0.5), 2.0, epsilon = 1e-6);
    }
    #[test]
    fn placement_scales_then_rotates() {
        let placement = Placement::new(Vec2::new(10.0, 0.0), PI / 2.0, Vec2::new(2.0, 1.0));
        let p = placement.apply(Vec2::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-5);
    }
    #[test]
    fn solves_with_pivoting() {
        // Zero in the top-left forces a row swap.
        let x = gaussian_elimination([[0.0, 2.0, 4.0], [3.0, 1.0, 5.0]]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);

        let x = gaussian_elimination([
            [2.0, 1.0, -1.0, 8.0],
            [-3.0, -1.0, 2.0, -11.0],
            [-2.0, 1.0, 2.0, -3.0],
        ])
        .unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-9);
    }
    #[test]
    fn singular_is_an_error() {
        assert_eq!(
            gaussian_elimination([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]]),
            Err(SolveError::Singular)
        );
        assert_eq!(
            gaussian_elimination([[0.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
            Err(SolveError::Singular)
        );
        assert_eq!(
            gaussian_elimination([[1.0, 2.0], [2.0, 4.0]]),
            Err(SolveError::Shape)
        );
    }
}
