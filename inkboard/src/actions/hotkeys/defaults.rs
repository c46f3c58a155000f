use super::super::Action;
use super::{Key, KeyboardHotkey};

pub const KEYBOARD: &[(Action, &[KeyboardHotkey])] = &[
    (
        Action::Undo,
        &[KeyboardHotkey {
            alt: true,
            ctrl: false,
            shift: false,
            key: Key::KeyZ,
        }],
    ),
    (Action::Clear, &[KeyboardHotkey::bare(Key::Slash)]),
    (Action::ToggleVisibility, &[KeyboardHotkey::bare(Key::Comma)]),
    (
        Action::ToggleMode,
        &[KeyboardHotkey {
            alt: true,
            ctrl: false,
            shift: false,
            key: Key::KeyC,
        }],
    ),
    (
        Action::ToggleOverlay,
        &[KeyboardHotkey {
            alt: false,
            ctrl: true,
            shift: false,
            key: Key::KeyR,
        }],
    ),
];
