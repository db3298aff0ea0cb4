//! TOML application settings.
//!
//! Reads `AppSettings` from the platform-appropriate settings file:
//! - Windows:  `%APPDATA%\SoundBind\settings.toml`
//! - Linux:    `~/.config/soundbind/settings.toml`
//! - macOS:    `~/Library/Application Support/SoundBind/settings.toml`
//!
//! The file is optional and every field has a default, so a first run needs
//! no setup at all.  Example:
//!
//! ```toml
//! log_level = "debug"
//! bindings_file = "/home/me/.config/soundbind/bindings.json"
//! volume = 0.6
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  This keeps
//! older or partial settings files loading after new fields are added.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bindings_file::DEFAULT_BINDINGS_FILE;

/// Upper bound for [`AppSettings::volume`].
const MAX_VOLUME: f32 = 2.0;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// `tracing` filter used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"soundbind=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Location of the JSON bindings file.
    #[serde(default = "default_bindings_file")]
    pub bindings_file: PathBuf,
    /// Playback volume multiplier; `1.0` is the file's own level.
    #[serde(default = "default_volume")]
    pub volume: f32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_bindings_file() -> PathBuf {
    PathBuf::from(DEFAULT_BINDINGS_FILE)
}
fn default_volume() -> f32 {
    1.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            bindings_file: default_bindings_file(),
            volume: default_volume(),
        }
    }
}

impl AppSettings {
    /// The configured volume clamped to `0.0..=2.0`.  NaN counts as silence.
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, MAX_VOLUME)
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    Ok(config_dir()?.join("settings.toml"))
}

/// Loads `AppSettings` from the platform settings file.
///
/// # Errors
///
/// See [`load_settings_from`].
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    load_settings_from(&settings_file_path()?)
}

/// Loads `AppSettings` from `path`, returning `AppSettings::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config base directory including the `SoundBind` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("SoundBind"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("soundbind"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/SoundBind
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("SoundBind")
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
    use uuid::Uuid;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.bindings_file, PathBuf::from("soundbind_config.json"));
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let settings: AppSettings = toml::from_str("").expect("deserialize empty");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_deserialize_partial_toml_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
volume = 0.5
"#;

        // Act
        let settings: AppSettings = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(settings.volume, 0.5);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let settings = AppSettings {
            log_level: "debug".to_string(),
            bindings_file: PathBuf::from("/tmp/b.json"),
            volume: 0.25,
        };

        let text = toml::to_string_pretty(&settings).expect("serialize");
        let restored: AppSettings = toml::from_str(&text).expect("deserialize");

        assert_eq!(settings, restored);
    }

    #[test]
    fn test_effective_volume_is_clamped() {
        let mut settings = AppSettings::default();

        settings.volume = 7.0;
        assert_eq!(settings.effective_volume(), 2.0);

        settings.volume = -1.0;
        assert_eq!(settings.effective_volume(), 0.0);

        settings.volume = f32::NAN;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_load_settings_from_missing_file_returns_default() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/settings.toml");
        let settings = load_settings_from(&path).expect("missing file is not an error");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_load_settings_from_invalid_toml_returns_parse_error() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("soundbind_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_settings_from(&path);

        // Assert
        assert!(matches!(result, Err(SettingsError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_settings_file_path_ends_with_settings_toml() {
        if let Ok(path) = settings_file_path() {
            assert!(
                path.ends_with("settings.toml"),
                "settings file must be named settings.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. a stripped CI env) is also acceptable.
    }
}
