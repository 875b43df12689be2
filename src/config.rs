//! Persistent viewer settings stored as TOML in the app directory.
//!
//! Config keys: `report_source`, `metric_policy` (`first_model` | `union`),
//! `[display]` with `show_metrics`, `show_graphs`, `show_reports`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::report::{DisplayOptions, MetricSetPolicy};

/// Default filename used to store the settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable config directory.
    #[error("Config directory unavailable: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    /// Failed to create the directory holding the config file.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for these settings.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Settings could not be serialized.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
}

/// Settings persisted between launches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Path or URL of the result document. `None` uses `final_report.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_source: Option<String>,
    #[serde(default)]
    pub metric_policy: MetricSetPolicy,
    #[serde(default)]
    pub display: DisplayOptions,
}

/// Resolve the config file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings, falling back to defaults when no file exists yet.
pub fn load_or_default() -> Result<ViewerSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<ViewerSettings, ConfigError> {
    if !path.exists() {
        return Ok(ViewerSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist settings to the default location.
pub fn save(settings: &ViewerSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Persist settings to `path`, creating parent directories as needed.
pub fn save_to_path(settings: &ViewerSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, ViewerSettings::default());
        assert!(settings.display.show_graphs);
        assert_eq!(settings.metric_policy, MetricSetPolicy::FirstModel);
    }

    #[test]
    fn saves_and_reloads_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let settings = ViewerSettings {
            report_source: Some("https://example.com/final_report.json".to_string()),
            metric_policy: MetricSetPolicy::Union,
            display: DisplayOptions {
                show_graphs: false,
                ..DisplayOptions::default()
            },
        };
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "metric_policy = \"union\"\n[display]\nshow_reports = false\n")
            .unwrap();
        let settings = load_from(&path).unwrap();
        assert_eq!(settings.metric_policy, MetricSetPolicy::Union);
        assert!(settings.display.show_metrics);
        assert!(!settings.display.show_reports);
        assert!(settings.report_source.is_none());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "metric_policy = \"sometimes\"").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn default_location_follows_config_home() {
        let dir = tempdir().unwrap();
        let _guard = app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let path = config_path().unwrap();
        assert_eq!(
            path,
            dir.path().join(app_dirs::APP_DIR_NAME).join(CONFIG_FILE_NAME)
        );
    }
}
