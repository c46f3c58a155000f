//! Keyboard hotkeys.
//!
//! Actions can have many hotkeys bound to them, and a hotkey can be bound to at most one action.
//! The one-to-many mapping of actions to keys is what users edit on disk, the reverse is built
//! when loading.

use std::sync::Arc;
mod defaults;

/// Physical key names, following the W3C `KeyboardEvent.code` naming.
#[derive(
    Hash,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum Key {
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Backquote,
    Backslash,
    BracketLeft,
    BracketRight,
    Comma,
    Equal,
    Minus,
    Period,
    Quote,
    Semicolon,
    Slash,
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug, Copy)]
pub struct KeyboardHotkey {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: Key,
}
impl serde::Serialize for KeyboardHotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Strings, so the file stays human-editable.
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> serde::Deserialize<'de> for KeyboardHotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Borrowed or owned, depending on what the deserializer can do.
        let str =
            <std::borrow::Cow<'de, str> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        str.parse().map_err(serde::de::Error::custom)
    }
}
impl KeyboardHotkey {
    /// A hotkey with no modifiers.
    #[must_use]
    pub const fn bare(key: Key) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }
    /// Arbitrary score of how specific this key is. Higher shadows lower.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        u8::from(self.ctrl) + u8::from(self.alt) + u8::from(self.shift)
    }
    /// Whether this hotkey, when held, hides `other`: same key, and at least as many modifiers.
    #[must_use]
    pub fn shadows(&self, other: &Self) -> bool {
        other.key == self.key && other.specificity() <= self.specificity()
    }
}
/// Formatted as accepted by [`std::str::FromStr`].
impl std::fmt::Display for KeyboardHotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut components = smallvec::SmallVec::<[&str; 4]>::new();
        if self.ctrl {
            components.push("ctrl");
        }
        if self.alt {
            components.push("alt");
        }
        if self.shift {
            components.push("shift");
        }
        components.push(self.key.as_ref());
        f.write_str(&components.join("+"))
    }
}
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyboardHotkeyFromStrError {
    #[error("unrecognized key name")]
    InvalidKeyName,
}
/// Parse from syntax `[ctrl+][alt+][shift+]<key name>`, case-sensitive.
impl std::str::FromStr for KeyboardHotkey {
    type Err = KeyboardHotkeyFromStrError;
    fn from_str(mut str: &str) -> Result<Self, Self::Err> {
        let mut take_if_has = |prefix: &str| -> bool {
            if let Some(new_str) = str.strip_prefix(prefix) {
                str = new_str;
                true
            } else {
                false
            }
        };
        let ctrl = take_if_has("ctrl+");
        let alt = take_if_has("alt+");
        let shift = take_if_has("shift+");
        // Only the key name is left.
        let key = str
            .parse()
            .map_err(|_| KeyboardHotkeyFromStrError::InvalidKeyName)?;

        Ok(Self {
            ctrl,
            alt,
            shift,
            key,
        })
    }
}

/// Hotkeys of one action. Kept as an Arc'd slice, as it is not intended to change frequently.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default)]
pub struct HotkeyCollection {
    pub keyboard: Option<Arc<[KeyboardHotkey]>>,
}
impl HotkeyCollection {
    pub fn iter(&self) -> impl Iterator<Item = KeyboardHotkey> + '_ {
        self.keyboard.iter().flat_map(|keys| keys.iter().copied())
    }
}

/// Maps each action onto potentially many hotkeys.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct ActionsToKeys(hashbrown::HashMap<super::Action, HotkeyCollection>);
impl Default for ActionsToKeys {
    fn default() -> Self {
        let mut keys_map = hashbrown::HashMap::with_capacity(defaults::KEYBOARD.len());
        for (action, keys) in defaults::KEYBOARD {
            keys_map.insert(
                *action,
                HotkeyCollection {
                    keyboard: Some((*keys).into()),
                },
            );
        }

        let new = Self(keys_map);
        // Make sure we didn't accidentally bind a single key twice
        debug_assert!(TryInto::<KeysToActions>::try_into(&new).is_ok());
        new
    }
}
impl ActionsToKeys {
    #[must_use]
    pub fn keys_of(&self, action: super::Action) -> Option<&HotkeyCollection> {
        self.0.get(&action)
    }
}

/// Derived from [`ActionsToKeys`], maps each hotkey onto at most one action.
#[derive(Debug)]
pub struct KeysToActions(hashbrown::HashMap<KeyboardHotkey, super::Action>);
#[derive(thiserror::Error, Debug)]
pub enum KeysToActionsError {
    /// A single key was bound to multiple actions.
    /// Only the first two encountered (in arbitrary order) are reported.
    #[error("hotkey {key} used for more than one action: {actions:?}")]
    DuplicateBinding {
        key: KeyboardHotkey,
        actions: [super::Action; 2],
    },
}
impl TryFrom<&ActionsToKeys> for KeysToActions {
    type Error = KeysToActionsError;
    fn try_from(value: &ActionsToKeys) -> Result<Self, Self::Error> {
        let mut new = KeysToActions(hashbrown::HashMap::default());

        for (action, keys) in &value.0 {
            for key in keys.iter() {
                // The slot wasn't empty!
                if let Some(old) = new.0.insert(key, *action) {
                    return Err(KeysToActionsError::DuplicateBinding {
                        key,
                        actions: [*action, old],
                    });
                }
            }
        }

        Ok(new)
    }
}
impl KeysToActions {
    #[must_use]
    pub fn contains(&self, key: &KeyboardHotkey) -> bool {
        self.0.contains_key(key)
    }
    /// The action bound to exactly this combination.
    #[must_use]
    pub fn action_of(&self, key: &KeyboardHotkey) -> Option<super::Action> {
        self.0.get(key).copied()
    }
    /// The action of the most specific binding shadowed by `pressed`. Lets `ctrl+shift+KeyZ`
    /// fall back to a `ctrl+KeyZ` binding when nothing more specific exists.
    #[must_use]
    pub fn best_match(&self, pressed: &KeyboardHotkey) -> Option<super::Action> {
        self.0
            .iter()
            .filter(|(bound, _)| pressed.shadows(bound) && modifiers_subset(bound, pressed))
            .max_by_key(|(bound, _)| bound.specificity())
            .map(|(_, action)| *action)
    }
}
/// Every modifier `inner` holds, `outer` also holds.
fn modifiers_subset(inner: &KeyboardHotkey, outer: &KeyboardHotkey) -> bool {
    (!inner.ctrl || outer.ctrl) && (!inner.alt || outer.alt) && (!inner.shift || outer.shift)
}
