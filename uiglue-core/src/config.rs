use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WidgetError};

/// Centralized widget defaults, stored at ~/.uiglue/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    pub search: SearchConfig,
    pub toast: ToastConfig,
    pub loading_button: LoadingButtonConfig,
}

/// Debounced search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Debounce window in milliseconds
    pub delay_ms: u64,
    /// Minimum trimmed query length (in chars) that triggers a lookup
    pub min_length: usize,
    /// Explicit disabled flag; unset means "derive from the bound elements"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            min_length: 2,
            disabled: None,
        }
    }
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Toast queue settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// How long a toast stays visible unless dismissed
    pub duration_ms: u64,
    /// Oldest toasts are evicted once this many are visible
    pub max_toasts: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2500,
            max_toasts: 3,
        }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingButtonConfig {
    pub loading_text: String,
}

impl Default for LoadingButtonConfig {
    fn default() -> Self {
        Self {
            loading_text: "Loading…".to_string(),
        }
    }
}

impl WidgetsConfig {
    /// Load config from ~/.uiglue/config.toml, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = ?config_path, "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path; a missing file is an error here
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WidgetError::io(path, e))?;

        let config: Self = toml::from_str(&content).map_err(|source| WidgetError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get config file path: ~/.uiglue/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".uiglue/config.toml")
    }

    /// Reject values no widget can work with
    pub fn validate(&self) -> Result<()> {
        if self.toast.max_toasts == 0 {
            return Err(WidgetError::config("toast.max_toasts must be at least 1"));
        }
        Ok(())
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| WidgetError::io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str).map_err(|e| WidgetError::io(path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_widget_defaults() {
        let config = WidgetsConfig::default();
        assert_eq!(config.search.delay(), Duration::from_millis(300));
        assert_eq!(config.search.min_length, 2);
        assert_eq!(config.search.disabled, None);
        assert_eq!(config.toast.max_toasts, 3);
        assert_eq!(config.toast.duration(), Duration::from_millis(2500));
        assert_eq!(config.loading_button.loading_text, "Loading…");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\ndelay_ms = 150\n").unwrap();

        let config = WidgetsConfig::load_from(&path).unwrap();
        assert_eq!(config.search.delay_ms, 150);
        assert_eq!(config.search.min_length, 2);
        assert_eq!(config.toast, ToastConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = WidgetsConfig::default();
        config.search.disabled = Some(true);
        config.toast.max_toasts = 5;
        config.save_to(&path).unwrap();

        let loaded = WidgetsConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search\n").unwrap();

        let err = WidgetsConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, WidgetError::TomlParse { .. }));
    }

    #[test]
    fn test_zero_max_toasts_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[toast]\nmax_toasts = 0\n").unwrap();

        let err = WidgetsConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, WidgetError::Config { .. }));
    }
}
