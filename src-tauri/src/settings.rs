use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TabListError;
use crate::modules::sort::SortMode;

/// Popup configuration. Read-only: the popup never writes user choices back,
/// so a sort picked during a session is gone once the popup closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Window label of the popup itself, excluded from the tab list.
    pub popup_window_label: String,
    /// Reload the list even when Close is pressed with nothing checked.
    pub reload_when_nothing_selected: bool,
    pub log_level: String, // "error", "warn", "info", "debug", "trace"
    /// Sort mode a new session starts with.
    pub default_sort: SortMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            popup_window_label: "main".to_string(),
            reload_when_nothing_selected: true,
            log_level: "info".to_string(),
            default_sort: SortMode::None,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, TabListError> {
        serde_json::from_str(json).map_err(|e| TabListError::Config(e.to_string()))
    }

    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing or unusable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::from_json_str(&content).unwrap_or_else(|e| {
                log::warn!("[Settings] {}, returning defaults", e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                Self::default()
            }
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(feature = "desktop")]
impl Settings {
    pub fn load(app: &tauri::AppHandle) -> Self {
        use tauri::Manager;

        match app.path().app_config_dir() {
            Ok(dir) => Self::load_from(&dir.join("settings.json")),
            Err(e) => {
                log::warn!("[Settings] No config dir: {}, returning defaults", e);
                Self::default()
            }
        }
    }
}
