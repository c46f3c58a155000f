//! Recorded host sessions, replayed into an overlay as if a host were driving it live.
//!
//! ```toml
//! background = "#fff"
//!
//! [content]
//! scroll_width = 800
//! scroll_height = 600
//! client_width = 800
//! client_height = 600
//!
//! [pen]
//! color = "#000"
//!
//! [[events]]
//! type = "down"
//! x = 10
//! y = 10
//! ```

use crate::actions::hotkeys::{KeyboardHotkey, KeysToActions};
use crate::overlay::{ContentMetrics, ContentMeter, Overlay, Surface};
use inkboard_core::input::{PointerEvent, PointerKind, PointerPhase};
use inkboard_core::math::Vec2;
use inkboard_core::{PenSettings, Rgb};

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_kind")]
    pub kind: PointerKind,
    #[serde(default)]
    pub pressure: Option<f32>,
    #[serde(default = "default_primary")]
    pub primary: bool,
}
fn default_kind() -> PointerKind {
    PointerKind::Mouse
}
fn default_primary() -> bool {
    true
}
impl Pointer {
    #[must_use]
    pub fn event(&self, phase: PointerPhase) -> PointerEvent {
        PointerEvent {
            phase,
            position: Vec2::new(self.x, self.y),
            kind: self.kind,
            pressure: self.pressure,
            is_primary: self.primary,
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Down(Pointer),
    Move(Pointer),
    Up(Pointer),
    Key { hotkey: KeyboardHotkey },
    Frame,
    SurfaceChanged,
    /// Content is swapped out, and stays unmeasurable until the next `layout`.
    NewContent,
    /// The content's layout became known or changed.
    Layout(ContentMetrics),
    Enable,
    Disable,
    Settings(PenSettings),
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Session {
    pub content: ContentMetrics,
    /// Replaces the user's pen settings for this session.
    #[serde(default)]
    pub pen: Option<PenSettings>,
    /// Fill behind the overlay in the output image. Transparent if absent.
    #[serde(default)]
    pub background: Option<Rgb>,
    #[serde(default)]
    pub events: Vec<Event>,
}
impl Session {
    /// # Errors
    /// The file can't be read or isn't a valid session.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Content as the session describes it at this point of the replay.
pub struct SessionMeter(Option<ContentMetrics>);
impl ContentMeter for SessionMeter {
    fn measure(&self) -> Option<ContentMetrics> {
        self.0
    }
}

/// Drives an overlay through a session's events.
pub struct Replay<'keys, S: Surface> {
    pub overlay: Overlay<S>,
    meter: SessionMeter,
    bindings: &'keys KeysToActions,
}
impl<'keys, S: Surface> Replay<'keys, S> {
    /// Starts the overlay the way a host would on session start: sized to the content,
    /// and enabled if `enabled`.
    pub fn start(
        session: &Session,
        surface: S,
        settings: PenSettings,
        enabled: bool,
        bindings: &'keys KeysToActions,
    ) -> Self {
        let mut overlay = Overlay::new(surface, session.pen.unwrap_or(settings));
        let meter = SessionMeter(Some(session.content));
        overlay.set_session_ready(true);
        overlay.on_surface_changed(&meter);
        if enabled {
            if let Err(e) = overlay.enable() {
                log::warn!("{e}");
            }
        }
        Self {
            overlay,
            meter,
            bindings,
        }
    }
    pub fn apply(&mut self, event: &Event) {
        let overlay = &mut self.overlay;
        match event {
            Event::Down(p) => {
                overlay.pointer(&p.event(PointerPhase::Down));
            }
            Event::Move(p) => {
                overlay.pointer(&p.event(PointerPhase::Move));
            }
            Event::Up(p) => {
                overlay.pointer(&p.event(PointerPhase::Up));
            }
            Event::Key { hotkey } => {
                if !overlay.handle_key(hotkey, self.bindings) {
                    log::debug!("{hotkey} did nothing");
                }
            }
            Event::Frame => {
                overlay.frame(&self.meter);
            }
            Event::SurfaceChanged => overlay.on_surface_changed(&self.meter),
            Event::NewContent => {
                self.meter.0 = None;
                overlay.on_new_content();
            }
            Event::Layout(metrics) => self.meter.0 = Some(*metrics),
            Event::Enable => {
                if let Err(e) = overlay.enable() {
                    log::warn!("{e}");
                }
            }
            Event::Disable => overlay.disable(),
            Event::Settings(settings) => overlay.set_settings(*settings),
        }
    }
    /// Apply every event, then tick one last frame so everything is painted.
    pub fn run(mut self, events: &[Event]) -> Overlay<S> {
        for event in events {
            self.apply(event);
        }
        self.overlay.frame(&self.meter);
        self.overlay
    }
}
