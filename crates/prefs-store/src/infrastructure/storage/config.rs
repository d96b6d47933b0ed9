//! Where the preferences document lives.
//!
//! By default the file is `preferences.toml` inside the platform-appropriate
//! application-data directory:
//! - Windows:  `%APPDATA%\NearbyWeather\preferences.toml`
//! - Linux:    `$XDG_DATA_HOME/nearbyweather/preferences.toml`
//!             (or `~/.local/share/nearbyweather/preferences.toml`)
//! - macOS:    `~/Library/Application Support/NearbyWeather/preferences.toml`
//!
//! Setting `NEARBY_PREFS_DIR` overrides the directory, which is how tests and
//! portable installs point the store somewhere else.
//!
//! # Serde default values
//!
//! [`StorageConfig`] derives `Deserialize` with `#[serde(default)]` so a host
//! can embed it in its own configuration file and omit any field.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the storage directory.
pub const STORAGE_DIR_ENV: &str = "NEARBY_PREFS_DIR";

/// File name used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "preferences.toml";

/// Error type for storage configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// An environment variable held a value that could not be interpreted.
    #[error("invalid value {value:?} for {variable}")]
    InvalidValue { variable: String, value: String },
}

/// Location of the preferences document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the document.  `None` selects the platform directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Name of the document inside `storage_dir`.
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl StorageConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<std::ffi::OsString>) -> Self {
        let storage_dir = lookup(STORAGE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            storage_dir,
            ..Self::default()
        }
    }

    /// Resolves the full path of the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformDataDir`] when no directory is
    /// configured and the platform directory cannot be determined.
    pub fn file_path(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => platform_data_dir().ok_or(ConfigError::NoPlatformDataDir)?,
        };
        Ok(dir.join(&self.file_name))
    }
}

/// Resolves the platform data directory including the `NearbyWeather` subdirectory.
fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("NearbyWeather"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME or ~/.local/share
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })?;
        Some(base.join("nearbyweather"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("NearbyWeather")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_platform_dir_and_default_file_name() {
        let cfg = StorageConfig::default();
        assert_eq!(cfg.storage_dir, None);
        assert_eq!(cfg.file_name, "preferences.toml");
    }

    #[test]
    fn test_from_lookup_reads_storage_dir_override() {
        // Arrange / Act
        let cfg = StorageConfig::from_lookup(|key| {
            (key == STORAGE_DIR_ENV).then(|| "/srv/nearby".into())
        });

        // Assert
        assert_eq!(cfg.storage_dir, Some(PathBuf::from("/srv/nearby")));
        assert_eq!(
            cfg.file_path().expect("explicit dir always resolves"),
            PathBuf::from("/srv/nearby/preferences.toml")
        );
    }

    #[test]
    fn test_from_lookup_ignores_empty_override() {
        let cfg = StorageConfig::from_lookup(|_| Some("".into()));
        assert_eq!(cfg.storage_dir, None);
    }

    #[test]
    fn test_deserialize_partial_config_keeps_defaults() {
        // Arrange
        let toml_str = r#"storage_dir = "/var/lib/nearby""#;

        // Act
        let cfg: StorageConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.storage_dir, Some(PathBuf::from("/var/lib/nearby")));
        assert_eq!(cfg.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_default_config_omits_storage_dir_when_serialized() {
        let text = toml::to_string(&StorageConfig::default()).expect("serialize");
        assert!(!text.contains("storage_dir"), "got:\n{text}");
        assert!(text.contains("file_name = \"preferences.toml\""), "got:\n{text}");
    }

    #[test]
    fn test_file_path_ends_with_file_name() {
        // A stripped CI environment may have no platform dir; that is acceptable.
        if let Ok(path) = StorageConfig::default().file_path() {
            assert!(
                path.ends_with("preferences.toml"),
                "document must be named preferences.toml, got {path:?}"
            );
        }
    }

    #[test]
    fn test_platform_data_dir_returns_some_on_this_platform() {
        let result = platform_data_dir();
        #[cfg(target_os = "windows")]
        if std::env::var_os("APPDATA").is_some() {
            assert!(result.is_some());
        }
        #[cfg(target_os = "linux")]
        {
            let has_xdg = std::env::var_os("XDG_DATA_HOME").is_some();
            let has_home = std::env::var_os("HOME").is_some();
            if has_xdg || has_home {
                assert!(result.is_some());
            }
        }
        #[cfg(target_os = "macos")]
        if std::env::var_os("HOME").is_some() {
            assert!(result.is_some());
        }
    }
}
