//! Global singletons, loaded from the user's preferences.

pub mod hotkeys;
pub mod settings;

/// Where preference files live. `None` on platforms without a preferences directory.
#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

/// Write `contents` into `name` in the preferences directory, prefixed by `documentation`.
pub(crate) fn save_preference(
    name: &str,
    documentation: &str,
    contents: &str,
) -> anyhow::Result<()> {
    let mut preferences =
        preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
    // Explicity do *not* create recursively. If not found, the user probably has a good reason.
    // Ignore errors (could already exist). Any real errors will be emitted by file access below.
    let _ = std::fs::DirBuilder::new().create(&preferences);

    preferences.push(name);
    std::fs::write(preferences, documentation.to_owned() + contents)?;
    Ok(())
}
