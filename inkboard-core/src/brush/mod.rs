//! Calligraphy brush: turns fitted curve segments into stylized strokes with shaped corners.
//!
//! Which corner goes where is decided by the ordered tables in [`rules`], looking at the
//! [`attributes`] of each segment and joint.

pub mod attributes;
pub mod catalog;
pub mod profile;
pub mod render;
pub mod rules;
pub mod shape;

pub use catalog::Corner;
pub use render::{draw_stroke, WEIGHT};
