//! JSON-file preference store.
//!
//! Loads leniently and saves best-effort: a corrupt or unwritable
//! preference file must never stop resolution, it only loses the
//! stored choice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rscout_core::ports::PreferenceStore;

const DEFAULT_RENDERING_MODE: &str = "auto";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct StoredPrefs {
    bin_dir: PathBuf,
    rendering_mode: String,
}

impl Default for StoredPrefs {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::new(),
            rendering_mode: DEFAULT_RENDERING_MODE.to_string(),
        }
    }
}

/// Preference store persisted as a JSON file.
pub struct FilePreferences {
    path: PathBuf,
    stored: StoredPrefs,
}

impl FilePreferences {
    /// Default location under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rscout").join("preferences.json"))
    }

    /// Load from `path`. A missing file starts empty; an unreadable or
    /// corrupt one is logged and also starts empty.
    pub fn load(path: PathBuf) -> Self {
        let stored = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring corrupt preference file");
                    StoredPrefs::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredPrefs::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read preference file");
                StoredPrefs::default()
            }
        };
        Self { path, stored }
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), %err, "failed to create preference directory");
                return;
            }
        }
        match serde_json::to_string_pretty(&self.stored) {
            Ok(text) => {
                if let Err(err) = std::fs::write(&self.path, text) {
                    warn!(path = %self.path.display(), %err, "failed to save preferences");
                } else {
                    debug!(path = %self.path.display(), "saved preferences");
                }
            }
            Err(err) => warn!(%err, "failed to serialize preferences"),
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn bin_dir(&self) -> PathBuf {
        self.stored.bin_dir.clone()
    }

    fn set_bin_dir(&mut self, dir: &Path) {
        self.stored.bin_dir = dir.to_path_buf();
        self.save();
    }

    fn rendering_mode(&self) -> String {
        self.stored.rendering_mode.clone()
    }

    fn set_rendering_mode(&mut self, mode: &str) {
        self.stored.rendering_mode = mode.to_string();
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::load(dir.path().join("preferences.json"));
        assert_eq!(prefs.bin_dir(), PathBuf::new());
        assert_eq!(prefs.rendering_mode(), "auto");
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ not json").unwrap();

        let prefs = FilePreferences::load(path);
        assert_eq!(prefs.bin_dir(), PathBuf::new());
    }

    #[test]
    fn writes_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut prefs = FilePreferences::load(path.clone());
        prefs.set_bin_dir(Path::new("/opt/R/R-4.2/bin/x64"));
        prefs.set_rendering_mode("software");

        let reloaded = FilePreferences::load(path);
        assert_eq!(reloaded.bin_dir(), PathBuf::from("/opt/R/R-4.2/bin/x64"));
        assert_eq!(reloaded.rendering_mode(), "software");
    }

    #[test]
    fn unknown_fields_are_ignored_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(
            &path,
            r#"{"bin_dir": "/opt/R/bin", "rendering_mode": "desktop", "future": 1}"#,
        )
        .unwrap();

        let prefs = FilePreferences::load(path);
        assert_eq!(prefs.bin_dir(), PathBuf::from("/opt/R/bin"));
        assert_eq!(prefs.rendering_mode(), "desktop");
    }
}
