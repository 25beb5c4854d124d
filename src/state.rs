use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::favourites::PreferenceStore;
use crate::theme::ThemeChoice;

static STATE_FILE_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub icon_roots: Vec<PathBuf>,
    #[serde(default)]
    pub theme: ThemeChoice,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

impl AppState {
    pub fn load() -> Self {
        state_file_path().map_or_else(Self::default, |path| Self::load_from(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path).map_or_else(
            |_| Self::default(),
            |raw| toml::from_str(&raw).unwrap_or_default(),
        )
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let raw = toml::to_string(self).context("Failed to serialize state")?;
        fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
    }
}

pub fn set_state_file_override(path: PathBuf) -> Result<(), PathBuf> {
    STATE_FILE_OVERRIDE.set(path)
}

pub fn state_file_path() -> Option<PathBuf> {
    STATE_FILE_OVERRIDE
        .get()
        .cloned()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("iconscope").join("state.toml")))
}

/// Preferences kept inside the persisted [`AppState`]; every write saves
/// the whole state file.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    state: AppState,
    path: Option<PathBuf>,
}

impl TomlPreferences {
    pub const fn new(state: AppState, path: Option<PathBuf>) -> Self {
        Self { state, path }
    }

    #[cfg(test)]
    pub const fn state(&self) -> &AppState {
        &self.state
    }
}

impl PreferenceStore for TomlPreferences {
    fn get_string(&self, key: &str) -> String {
        self.state.preferences.get(key).cloned().unwrap_or_default()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.state
            .preferences
            .insert(key.to_string(), value.to_string());
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(err) = self.state.save_to(path) {
            warn!(error = %format!("{err:#}"), key, "failed to persist preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::favourites::{FAVOURITES_KEY, PreferenceStore};
    use crate::theme::ThemeChoice;

    use super::{AppState, TomlPreferences};

    #[test]
    fn state_round_trips_through_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("state.toml");
        let mut state = AppState {
            icon_roots: vec![PathBuf::from("/usr/share/icons")],
            theme: ThemeChoice::Nord,
            ..AppState::default()
        };
        state
            .preferences
            .insert(FAVOURITES_KEY.to_string(), "A,B".to_string());

        state.save_to(&path).expect("save state");
        let loaded = AppState::load_from(&path);

        assert_eq!(loaded.icon_roots, state.icon_roots);
        assert_eq!(loaded.theme, ThemeChoice::Nord);
        assert_eq!(
            loaded.preferences.get(FAVOURITES_KEY).map(String::as_str),
            Some("A,B")
        );
    }

    #[test]
    fn missing_or_corrupt_state_falls_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let missing = AppState::load_from(&dir.path().join("absent.toml"));
        assert!(missing.icon_roots.is_empty());

        let corrupt = dir.path().join("corrupt.toml");
        std::fs::write(&corrupt, "icon_roots = 12 [[[").expect("write corrupt");
        assert!(AppState::load_from(&corrupt).preferences.is_empty());
    }

    #[test]
    fn preference_writes_are_saved_immediately() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("state.toml");
        let mut prefs = TomlPreferences::new(AppState::default(), Some(path.clone()));

        assert_eq!(prefs.get_string(FAVOURITES_KEY), "");
        prefs.set_string(FAVOURITES_KEY, "Beta");

        let reloaded = AppState::load_from(&path);
        assert_eq!(
            reloaded.preferences.get(FAVOURITES_KEY).map(String::as_str),
            Some("Beta")
        );
        assert_eq!(prefs.state().preferences.len(), 1);
    }
}
