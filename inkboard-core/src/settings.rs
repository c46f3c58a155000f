//! # Pen settings
//!
//! What new ink looks like. Changing any of these re-renders all existing strokes with the new
//! values, strokes do not remember the settings they were drawn with.

use crate::color::Rgb;
use crate::freehand::FreehandOptions;
use crate::util::{FiniteF32, FiniteF32Error};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    #[error("line width {0}")]
    LineWidth(FiniteF32Error),
    #[error("opacity {0}")]
    Opacity(FiniteF32Error),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PenSettings {
    pub color: Rgb,
    #[serde(deserialize_with = "positive")]
    line_width: FiniteF32,
    /// Opacity of the whole overlay layer, in `[0, 1]`.
    #[serde(deserialize_with = "unit")]
    opacity: FiniteF32,
    /// Draw lines as pressure-shaped outlines rather than plain curves.
    pub freehand: bool,
}
impl Default for PenSettings {
    fn default() -> Self {
        Self {
            color: Rgb::MAGENTA,
            // Known-good constants.
            line_width: FiniteF32::new_positive(4.0).unwrap_or(FiniteF32::ONE),
            opacity: FiniteF32::new_unit(0.8).unwrap_or(FiniteF32::ONE),
            freehand: false,
        }
    }
}
impl PenSettings {
    #[must_use]
    pub fn line_width(&self) -> f32 {
        self.line_width.get()
    }
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }
    /// Set the nominal line width, which must be finite and greater than zero.
    /// On error the settings are unchanged.
    pub fn set_line_width(&mut self, width: f32) -> Result<(), SettingsError> {
        self.line_width = FiniteF32::new_positive(width).map_err(SettingsError::LineWidth)?;
        Ok(())
    }
    /// Set the layer opacity, clamped to `[0, 1]`. Must be finite.
    pub fn set_opacity(&mut self, opacity: f32) -> Result<(), SettingsError> {
        self.opacity = FiniteF32::new_unit(opacity).map_err(SettingsError::Opacity)?;
        Ok(())
    }
    /// Outline options for a freehand line drawn with these settings.
    ///
    /// `has_pressure` strokes use their recorded pressure, others simulate it from speed.
    #[must_use]
    pub fn freehand_options(&self, has_pressure: bool, sealed: bool) -> FreehandOptions {
        FreehandOptions {
            size: self.line_width(),
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: !has_pressure,
            last: sealed,
            ..FreehandOptions::default()
        }
    }
}

fn positive<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<FiniteF32, D::Error> {
    let val = <f32 as serde::Deserialize>::deserialize(deserializer)?;
    FiniteF32::new_positive(val).map_err(serde::de::Error::custom)
}
fn unit<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<FiniteF32, D::Error> {
    let val = <f32 as serde::Deserialize>::deserialize(deserializer)?;
    FiniteF32::new_unit(val).map_err(serde::de::Error::custom)
}
