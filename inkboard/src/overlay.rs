//! The overlay controller: glue between a host, the stroke pipeline, and a two-layer surface.
//!
//! The host reports what happens (pointer events, keys, lifecycle changes) and calls
//! [`Overlay::frame`] from its render loop. Nothing here blocks, and nothing here fails during a
//! frame. Content that can't be measured yet is retried on the next frame.

use crate::actions::{hotkeys::KeyboardHotkey, hotkeys::KeysToActions, Action};
use inkboard_core::canvas::Canvas;
use inkboard_core::input::PointerEvent;
use inkboard_core::{PenSettings, Pipeline};

/// Size in logical (CSS-like) pixels.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    pub width: f32,
    pub height: f32,
}
impl LogicalSize {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
    /// Backing store size for the given ratio, rounded up. Non-finite or negative sizes give zero.
    #[must_use]
    pub fn physical(self, device_pixel_ratio: f32) -> [u32; 2] {
        let scale = |logical: f32| -> u32 {
            let physical = (logical * device_pixel_ratio).ceil();
            if physical.is_finite() {
                az::saturating_cast(physical)
            } else {
                0
            }
        };
        [scale(self.width), scale(self.height)]
    }
}

/// Layout of the content the overlay sits on top of.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentMetrics {
    pub scroll_width: f32,
    pub scroll_height: f32,
    pub client_width: f32,
    pub client_height: f32,
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f32,
}
fn default_pixel_ratio() -> f32 {
    1.0
}
impl ContentMetrics {
    /// The overlay covers all scrollable content, and at least the visible area.
    #[must_use]
    pub fn canvas_size(&self) -> LogicalSize {
        LogicalSize::new(
            self.scroll_width.max(self.client_width),
            self.scroll_height.max(self.client_height),
        )
    }
    /// Pixel ratio, falling back to 1 for nonsense values.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }
}

/// Asks the host about its content. `None` while the content isn't laid out yet.
pub trait ContentMeter {
    fn measure(&self) -> Option<ContentMetrics>;
}

/// Where the overlay paints. Finished ink and the live guide go to separate layers.
pub trait Surface {
    type Layer: Canvas;
    /// Reallocate to cover `size`. Previous contents are lost.
    fn resize(&mut self, size: LogicalSize, device_pixel_ratio: f32);
    /// (main, guide)
    fn layers(&mut self) -> (&mut Self::Layer, &mut Self::Layer);
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OverlayError {
    #[error("the host session isn't ready yet")]
    NotReady,
}

pub struct Overlay<S: Surface> {
    pipeline: Pipeline,
    surface: S,
    session_ready: bool,
    enabled: bool,
    /// Waiting for measurable content to size the surface to.
    pending_resize: bool,
}
impl<S: Surface> Overlay<S> {
    /// A disabled overlay. The host must report its session ready before enabling.
    #[must_use]
    pub fn new(surface: S, settings: PenSettings) -> Self {
        Self {
            pipeline: Pipeline::new(settings),
            surface,
            session_ready: false,
            enabled: false,
            pending_resize: false,
        }
    }
    // Public methods for readers
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
    #[must_use]
    pub fn is_session_ready(&self) -> bool {
        self.session_ready
    }
    /// Whether the host should draw the surface over its content this frame.
    #[must_use]
    pub fn is_composited(&self) -> bool {
        self.enabled && self.pipeline.is_visible()
    }
    /// Opacity to composite the whole surface with.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.pipeline.settings().opacity()
    }
    #[must_use]
    pub fn is_resize_pending(&self) -> bool {
        self.pending_resize
    }
}
impl<S: Surface> Overlay<S> {
    /// The host reports whether it has a session able to show the overlay.
    /// Losing the session disables the overlay.
    pub fn set_session_ready(&mut self, ready: bool) {
        self.session_ready = ready;
        if !ready {
            self.disable();
        }
    }
    /// Start capturing input and compositing.
    /// # Errors
    /// [`OverlayError::NotReady`] before the host session is ready. The overlay stays disabled.
    pub fn enable(&mut self) -> Result<(), OverlayError> {
        if !self.session_ready {
            return Err(OverlayError::NotReady);
        }
        if !self.enabled {
            log::debug!("overlay enabled");
            self.enabled = true;
            // Anything painted while disabled is stale.
            self.pipeline.invalidate();
        }
        Ok(())
    }
    /// Stop capturing input. Strokes are kept for when it's enabled again.
    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("overlay disabled");
            self.pipeline.stop_drawing();
            self.enabled = false;
        }
    }
    /// # Errors
    /// See [`Self::enable`].
    pub fn toggle(&mut self) -> Result<(), OverlayError> {
        if self.enabled {
            self.disable();
            Ok(())
        } else {
            self.enable()
        }
    }
    /// Replace the pen settings. Existing strokes are repainted with them on the next frame.
    pub fn set_settings(&mut self, settings: PenSettings) {
        self.pipeline.set_settings(settings);
    }
    /// Returns whether the overlay consumed the event. Unconsumed events belong to the content.
    pub fn pointer(&mut self, event: &PointerEvent) -> bool {
        self.enabled && self.pipeline.pointer(event)
    }
    /// Run the action bound to `pressed`, if any. Returns whether a binding was found and
    /// allowed to run.
    pub fn handle_key(&mut self, pressed: &KeyboardHotkey, bindings: &KeysToActions) -> bool {
        let Some(action) = bindings
            .action_of(pressed)
            .or_else(|| bindings.best_match(pressed))
        else {
            return false;
        };
        if !self.enabled && !action.works_when_disabled() {
            return false;
        }
        log::trace!("{pressed} -> {}", action.as_ref());
        self.perform(action);
        true
    }
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Undo => self.pipeline.undo(),
            Action::Clear => self.pipeline.clear(),
            Action::ToggleVisibility => self.pipeline.toggle_visibility(),
            Action::ToggleMode => self.pipeline.toggle_mode(),
            Action::ToggleOverlay => {
                if let Err(e) = self.toggle() {
                    log::warn!("can't enable overlay: {e}");
                }
            }
        }
    }
    /// Viewport resized or content reloaded. Resizes now if the content can be measured,
    /// otherwise on a later frame.
    pub fn on_surface_changed(&mut self, meter: &dyn ContentMeter) {
        if !self.try_resize(meter) {
            log::warn!("content not measurable, deferring resize");
            self.pending_resize = true;
        }
    }
    /// The host is about to show different content. Drops every stroke, and resizes once the
    /// new layout is known.
    pub fn on_new_content(&mut self) {
        self.pipeline.clear();
        self.pending_resize = true;
    }
    /// One render-loop step. Returns whether any layer changed.
    pub fn frame(&mut self, meter: &dyn ContentMeter) -> bool {
        if self.pending_resize && !self.try_resize(meter) {
            log::trace!("still waiting on content layout");
        }
        if !self.enabled {
            return false;
        }
        let (main, guide) = self.surface.layers();
        self.pipeline.tick(main, guide)
    }
    fn try_resize(&mut self, meter: &dyn ContentMeter) -> bool {
        let Some(metrics) = meter.measure() else {
            return false;
        };
        let size = metrics.canvas_size();
        let ratio = metrics.pixel_ratio();
        log::debug!("resizing surface to {}x{} @{ratio}", size.width, size.height);
        self.surface.resize(size, ratio);
        self.pipeline.invalidate();
        self.pending_resize = false;
        true
    }
}
