#![warn(clippy::pedantic)]
//! Geometry and stroke pipeline for a freehand ink overlay.
//!
//! Pointer samples go in through [`pipeline::Pipeline`], and come out as paths
//! painted onto any [`canvas::Canvas`] during [`pipeline::Pipeline::tick`].

pub mod bezier;
pub mod brush;
pub mod canvas;
pub mod color;
pub mod fit;
pub mod freehand;
pub mod input;
pub mod math;
pub mod pipeline;
pub mod settings;
pub mod util;

pub use color::Rgb;
pub use pipeline::Pipeline;
pub use settings::PenSettings;
