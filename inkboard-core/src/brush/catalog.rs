//! The fixed set of brush corners, like a font's glyph table.

use super::shape::{BezierShape, BoneLabel};
use strum::{EnumCount, IntoEnumIterator};

/// Circle control point distance for a radius of 1.
const KAPPA: f32 = 0.552_284_8;

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
pub enum Corner {
    Circle,
    /// Dot.
    C1,
    /// Horizontal start.
    C2,
    /// Horizontal end.
    C3,
    /// Vertical start.
    C4,
    /// Vertical end.
    C5,
    /// Falling start.
    C6,
    /// Falling end.
    C7,
    /// Right turn, bending down.
    C8,
    C8R,
    /// Downward turn, bending left.
    C9,
    C9R,
    C10,
}
impl Corner {
    /// The canonical shape. Copy before transforming.
    #[must_use]
    pub fn shape(self) -> &'static BezierShape {
        static CATALOG: std::sync::OnceLock<Vec<BezierShape>> = std::sync::OnceLock::new();
        let catalog = CATALOG.get_or_init(|| Corner::iter().map(build).collect());
        debug_assert_eq!(catalog.len(), Corner::COUNT);
        &catalog[self as usize]
    }
}

#[rustfmt::skip]
fn build(corner: Corner) -> BezierShape {
    use BoneLabel::{ArmA, ArmB};
    let k = 5.0 * KAPPA;
    match corner {
        Corner::Circle => BezierShape::new("CIRCLE", &[
            [[-5.0, 0.0], [-5.0, -k], [-k, -5.0], [0.0, -5.0]],
            [[0.0, -5.0], [k, -5.0], [5.0, -k], [5.0, 0.0]],
            [[5.0, 0.0], [5.0, k], [k, 5.0], [0.0, 5.0]],
            [[0.0, 5.0], [-k, 5.0], [-5.0, k], [-5.0, 0.0]],
        ]),
        Corner::C1 => BezierShape::new("C1", &[
            [[15.0, 6.0], [-3.0, 4.0], [-11.0, 5.0], [-20.0, 0.0]],
            [[-20.0, 0.0], [-15.0, -5.0], [4.0, -9.0], [13.0, -5.0]],
            [[13.0, -5.0], [20.0, 0.0], [21.0, 8.0], [15.0, 6.0]],
        ]),
        Corner::C2 => BezierShape::new("C2", &[
            [[2.0, 5.0], [-2.0, 5.0], [-12.0, 2.0], [-13.0, -2.0]],
            [[-13.0, 2.0], [-7.0, -5.0], [0.0, -5.0], [2.0, -5.0]],
            [[2.0, -5.0], [3.0, -5.0], [3.0, 5.0], [2.0, 5.0]],
        ]),
        Corner::C3 => BezierShape::new("C3", &[
            [[-8.0, 5.0], [-10.0, 5.0], [-10.0, -5.0], [-8.0, -5.0]],
            [[-8.0, -5.0], [3.0, -5.0], [15.0, 0.0], [15.0, 5.0]],
            [[15.0, 5.0], [10.0, 7.0], [2.0, 5.0], [-8.0, 5.0]],
        ]),
        Corner::C4 => BezierShape::new("C4", &[
            [[0.0, 5.0], [-2.0, 5.0], [-4.0, 7.0], [-5.0, 8.0]],
            [[-5.0, 8.0], [-7.0, 10.0], [-9.0, 12.0], [-8.0, 5.0]],
            [[-8.0, 5.0], [-7.0, 3.0], [-5.0, -5.0], [0.0, -5.0]],
            [[0.0, -5.0], [3.0, -5.0], [3.0, 5.0], [0.0, 5.0]],
        ]),
        Corner::C5 => BezierShape::new("C5", &[
            [[0.0, -5.0], [-3.0, -5.0], [-3.0, 5.0], [0.0, 5.0]],
            [[0.0, 5.0], [8.0, 5.0], [10.0, 5.0], [15.0, 2.0]],
            [[15.0, 2.0], [12.0, -2.0], [-2.0, -5.0], [0.0, -5.0]],
        ]),
        Corner::C6 => BezierShape::new("C6", &[
            [[0.0, 5.0], [-6.0, 6.0], [-8.0, 7.0], [-12.0, 8.0]],
            [[-12.0, 8.0], [-13.0, 9.0], [-13.0, 7.0], [-12.0, 6.0]],
            [[-12.0, 6.0], [-10.0, 3.0], [-5.0, -4.0], [0.0, -5.0]],
            [[0.0, -5.0], [3.0, -5.0], [3.0, 5.0], [0.0, 5.0]],
        ]),
        Corner::C7 => BezierShape::new("C7", &[
            [[-5.0, -5.0], [0.0, -5.0], [11.0, -7.0], [15.0, -6.0]],
            [[15.0, -6.0], [17.0, -5.0], [2.0, 4.0], [1.0, 5.0]],
            [[1.0, 5.0], [0.0, 5.0], [0.0, 5.0], [-5.0, 5.0]],
            [[-5.0, 5.0], [-8.0, 5.0], [-8.0, -5.0], [-5.0, -5.0]],
        ]),
        Corner::C8 => BezierShape::new("C8", &[
            [[-13.0, 3.0], [-20.0, 3.0], [-20.0, -3.0], [-13.0, -3.0]],
            [[-13.0, -3.0], [-5.0, -5.0], [-6.0, -7.0], [-4.0, -8.0]],
            [[-4.0, -8.0], [0.0, -8.0], [12.0, 3.0], [7.0, 5.0]],
            [[7.0, 5.0], [5.0, 6.0], [5.0, 8.0], [3.0, 13.0]],
            [[3.0, 13.0], [3.0, 20.0], [-3.0, 20.0], [-3.0, 13.0]],
            [[-3.0, 13.0], [-5.0, 5.0], [-10.0, 5.0], [-13.0, 3.0]],
        ])
        .with_bone(ArmA, &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (5, 2), (5, 3)], 0.0)
        .with_bone(ArmB, &[(4, 0), (4, 1), (4, 2), (4, 3), (3, 2), (3, 3), (5, 0), (5, 1),
                           (1, 2), (1, 3), (2, 0), (2, 1)], 90.0),
        Corner::C8R => build(Corner::C8).flipped_horizontal("C8R"),
        Corner::C9 => BezierShape::new("C9", &[
            [[-4.0, -12.0], [-4.0, -15.0], [4.0, -15.0], [5.0, -12.0]],
            [[5.0, -12.0], [5.0, -2.0], [6.0, 3.0], [1.0, 8.0]],
            [[-1.0, 8.0], [-3.0, 11.0], [-4.0, 2.0], [-12.0, -5.0]],
            [[-12.0, -5.0], [-15.0, -7.0], [-15.0, -9.0], [-10.0, -8.0]],
            [[-10.0, -8.0], [-6.0, -8.0], [-4.0, -7.0], [-4.0, -12.0]],
        ])
        .with_bone(ArmA, &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (4, 2), (4, 3), (1, 2)], 90.0)
        .with_bone(ArmB, &[(3, 0), (3, 1), (3, 2), (3, 3), (4, 0), (4, 1), (2, 2), (2, 3)], 210.0),
        Corner::C9R => build(Corner::C9).flipped_vertical("C9R"),
        Corner::C10 => BezierShape::new("C10", &[
            [[-5.0, 5.0], [-6.0, 5.0], [-6.0, -5.0], [-5.0, -5.0]],
            [[-5.0, -5.0], [-2.0, -7.0], [2.0, -7.0], [5.0, -5.0]],
            [[5.0, -5.0], [6.0, -5.0], [6.0, 5.0], [5.0, 5.0]],
            [[5.0, 5.0], [2.0, 7.0], [-2.0, 7.0], [-5.0, 5.0]],
        ])
        .with_bone(ArmA, &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 2), (3, 2), (3, 3)], 0.0)
        .with_bone(ArmB, &[(2, 0), (2, 1), (2, 2), (2, 3), (3, 0), (3, 1), (1, 2), (1, 3)], 0.0),
    }
}
