//! # Actions
//!
//! Everything a hotkey can ask the overlay to do.

pub mod hotkeys;

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    strum::AsRefStr,
    strum::EnumIter,
    Clone,
    Copy,
    Debug,
)]
pub enum Action {
    /// Remove the most recent stroke.
    Undo,
    /// Remove every stroke.
    Clear,
    /// Show or hide the drawing, keeping it.
    ToggleVisibility,
    /// Switch between plain lines and calligraphy.
    ToggleMode,
    /// Enable or disable the whole overlay.
    ToggleOverlay,
}
impl Action {
    /// Whether this action does anything while the overlay is disabled.
    #[must_use]
    pub fn works_when_disabled(self) -> bool {
        matches!(self, Self::ToggleOverlay)
    }
}
