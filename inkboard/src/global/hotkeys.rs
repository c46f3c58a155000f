use crate::actions;

const DOCUMENTATION: &str = r#"# Inkboard hotkeys. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# See `actions::Action` for available actions, specified here in [brackets].
# Keyboard hotkeys, specified by the "keyboard" field of an action, are written `[ctrl+][alt+][shift+]<key code>`.
# Key codes follow the web `KeyboardEvent.code` names, such as KeyZ, Digit1, Slash, or Comma.
# Each action may have many hotkeys associated with it, but each hotkey should only be used at most once.

# Examples:
# [Undo]
# keyboard = ["alt+KeyZ"]
# [Clear]
# keyboard = ["Slash", "ctrl+Delete"]

"#;

pub struct Hotkeys {
    failed_to_load: bool,
    pub actions_to_keys: actions::hotkeys::ActionsToKeys,
    pub keys_to_actions: actions::hotkeys::KeysToActions,
}
impl Hotkeys {
    const FILENAME: &'static str = "hotkeys.toml";
    /// Shared global hotkeys, saved and loaded from user preferences.
    /// (Or defaulted, if unavailable for some reason)
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_HOTKEYS: std::sync::OnceLock<Hotkeys> = std::sync::OnceLock::new();

        GLOBAL_HOTKEYS.get_or_init(|| {
            let mut dir = super::preferences_dir();
            match dir.as_mut() {
                None => Self::no_path(),
                Some(dir) => {
                    dir.push(Self::FILENAME);
                    Self::load_or_default(dir)
                }
            }
        })
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Hotkeys weren't available, defaulting.");
        Self {
            failed_to_load: true,
            ..Self::default()
        }
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(hotkeys) => hotkeys,
            Err(e) => {
                log::warn!("Failed to load hotkeys from {path:?}: {e:#}");
                Self::no_path()
            }
        }
    }
    /// Load and validate hotkeys from a file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let mappings: anyhow::Result<(ActionsToKeys, KeysToActions)> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let actions_to_keys : ActionsToKeys = toml::from_str(&string)?;
            let keys_to_actions : KeysToActions = (&actions_to_keys).try_into()?;

            Ok((actions_to_keys,keys_to_actions))
        };
        let (actions_to_keys, keys_to_actions) = mappings?;
        Ok(Self {
            failed_to_load: false,
            actions_to_keys,
            keys_to_actions,
        })
    }
    /// Return true if loading user's settings failed. This can be useful for
    /// displaying a warning.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let string = toml::ser::to_string_pretty(&self.actions_to_keys)?;
        super::save_preference(Self::FILENAME, DOCUMENTATION, &string)
    }
}
impl Default for Hotkeys {
    fn default() -> Self {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let actions_to_keys = ActionsToKeys::default();
        // Defaults never bind a key twice, this is asserted when building them.
        let keys_to_actions = KeysToActions::try_from(&actions_to_keys)
            .unwrap_or_else(|e| unreachable!("default hotkeys conflict: {e}"));
        Self {
            failed_to_load: false,
            actions_to_keys,
            keys_to_actions,
        }
    }
}
