use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: ThemeMode,
    pub show_sidebar: bool,
    pub show_assistant: bool,
    /// Simulated assistant thinking time.
    pub assistant_latency_ms: u64,
    /// Pointer travel (px) that turns a node click into a drag.
    pub drag_threshold_px: f32,
    pub grid_size: f32,
    pub show_grid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[serde(alias = "Light")]
    Latte,
    Frappe,
    Macchiato,
    #[default]
    #[serde(alias = "Dark")]
    Mocha,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 4] = [
        ThemeMode::Latte,
        ThemeMode::Frappe,
        ThemeMode::Macchiato,
        ThemeMode::Mocha,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Latte => "Latte",
            ThemeMode::Frappe => "Frappé",
            ThemeMode::Macchiato => "Macchiato",
            ThemeMode::Mocha => "Mocha",
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Mocha,
            show_sidebar: true,
            show_assistant: true,
            assistant_latency_ms: 1500,
            drag_threshold_px: hexar_graph::DEFAULT_DRAG_THRESHOLD,
            grid_size: 40.0,
            show_grid: true,
        }
    }
}

impl AppSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hexar").join("settings.json"))
    }

    /// Load from the user config dir, falling back to defaults.
    pub fn load() -> (Self, Option<String>) {
        Self::load_or_default(Self::default_path().as_deref())
    }

    /// The second value is a warning for the user when an existing file
    /// could not be read.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        let Some(path) = path else {
            tracing::info!("No config directory, using default settings");
            return (Self::default(), None);
        };
        tracing::info!("Loading settings from {:?}", path);
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(settings) => (settings, None),
            Err(e) => {
                tracing::error!("Failed to load settings: {:#}", e);
                let warning = format!("Settings could not be read, using defaults: {e:#}");
                (Self::default(), Some(warning))
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Best effort; failures are logged, never surfaced.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            self.drag_threshold_px = defaults.drag_threshold_px;
        }
        if !self.grid_size.is_finite() || self.grid_size < 4.0 {
            self.grid_size = defaults.grid_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            theme: ThemeMode::Latte,
            show_grid: false,
            assistant_latency_ms: 250,
            ..AppSettings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "theme": "Dark", "grid_size": 1.0 }"#).unwrap();
        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.theme, ThemeMode::Mocha);
        assert_eq!(settings.grid_size, 40.0);
        assert!(settings.show_sidebar);
        assert_eq!(settings.assistant_latency_ms, 1500);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppSettings::load_from(&path).is_err());
    }

    #[test]
    fn test_load_or_default_warns_only_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let (settings, warning) = AppSettings::load_or_default(Some(&path));
        assert_eq!(settings, AppSettings::default());
        assert!(warning.is_none());

        std::fs::write(&path, "{ broken").unwrap();
        let (settings, warning) = AppSettings::load_or_default(Some(&path));
        assert_eq!(settings, AppSettings::default());
        assert!(warning.unwrap().starts_with("Settings could not be read"));

        let (_, warning) = AppSettings::load_or_default(None);
        assert!(warning.is_none());
    }
}
