use inkboard_core::PenSettings;

const DOCUMENTATION: &str = r##"# Inkboard settings. You may edit this file, but be aware that formatting and comments will not
# be preserved.

# [pen]
# color = "#f0f"        Ink color, as `#rgb` or `#rrggbb`.
# line_width = 4.0      Nominal line width in pixels, greater than zero.
# opacity = 0.8         Opacity of the whole drawing, from 0 to 1.
# freehand = false      Draw lines as pressure-shaped outlines.
#
# enabled = true        Whether the overlay starts enabled.

"##;

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub enabled: bool,
    pub pen: PenSettings,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            pen: PenSettings::default(),
        }
    }
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    /// Shared global settings, loaded from user preferences, or defaulted if unavailable.
    /// Changes are only persisted by an explicit [`Settings::save`].
    #[must_use]
    pub fn get() -> &'static parking_lot::RwLock<Settings> {
        static ONCE: std::sync::OnceLock<parking_lot::RwLock<Settings>> =
            std::sync::OnceLock::new();

        ONCE.get_or_init(|| {
            let settings = match super::preferences_dir() {
                None => {
                    log::warn!("No preferences dir, using default settings.");
                    Self::default()
                }
                Some(mut dir) => {
                    dir.push(Self::FILENAME);
                    Self::load_or_default(&dir)
                }
            };
            parking_lot::RwLock::new(settings)
        })
    }
    #[must_use]
    pub fn read_clone() -> Self {
        *Self::get().read()
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {path:?}, defaulting: {e:#}");
                Self::default()
            }
        }
    }
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let string = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&string)?)
    }
    /// Apply `change` to the shared settings. Returns the new settings if anything changed.
    pub fn modify(change: impl FnOnce(&mut Settings)) -> Option<Self> {
        Self::modify_in(Self::get(), change)
    }
    fn modify_in(
        lock: &parking_lot::RwLock<Settings>,
        change: impl FnOnce(&mut Settings),
    ) -> Option<Self> {
        let mut settings = lock.write();
        let before = *settings;
        change(&mut settings);
        (*settings != before).then_some(*settings)
    }
    pub fn save(&self) -> anyhow::Result<()> {
        super::save_preference(Self::FILENAME, DOCUMENTATION, &self.to_toml()?)
    }
    fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::ser::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use inkboard_core::Rgb;

    #[test]
    fn partial_file() {
        let settings: Settings = toml::from_str("enabled = false\n[pen]\nline_width = 9.0\n").unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.pen.line_width(), 9.0);
        assert_eq!(settings.pen.color, Rgb::MAGENTA);
    }
    #[test]
    fn invalid_values_are_rejected() {
        assert!(toml::from_str::<Settings>("[pen]\nline_width = -2.0\n").is_err());
        assert!(toml::from_str::<Settings>("[pen]\ncolor = \"#12\"\n").is_err());
    }
    #[test]
    fn documented_file_loads() {
        let mut settings = Settings::default();
        settings.pen.color = "#336699".parse().unwrap();
        let string = DOCUMENTATION.to_owned() + &toml::ser::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&string).unwrap();
        assert_eq!(parsed, settings);
    }
    #[test]
    fn documentation_is_whole() {
        assert!(DOCUMENTATION.contains("color = \"#f0f\""));
        assert!(DOCUMENTATION.contains("# enabled = true"));
        assert!(DOCUMENTATION.ends_with("\n\n"));
    }
    #[test]
    fn modified_settings_persist() {
        let lock = parking_lot::RwLock::new(Settings::default());
        assert_eq!(Settings::modify_in(&lock, |_| ()), None);

        let mut pen = PenSettings::default();
        pen.freehand = true;
        pen.set_line_width(7.0).unwrap();
        let changed = Settings::modify_in(&lock, |settings| settings.pen = pen).unwrap();
        assert_eq!(lock.read().pen, pen);
        assert_eq!(changed.pen, pen);

        let text = DOCUMENTATION.to_owned() + &changed.to_toml().unwrap();
        let reloaded: Settings = toml::from_str(&text).unwrap();
        assert_eq!(reloaded, changed);
    }
    #[test]
    fn missing_file_defaults() {
        let settings = Settings::load_or_default(std::path::Path::new("/nonexistent/settings.toml"));
        assert_eq!(settings, Settings::default());
    }
}
