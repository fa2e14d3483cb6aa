//! Settings of the `devnet-config` tool itself.
//!
//! These control how the tool behaves (currently logging) and are unrelated
//! to the development network document it validates.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::infrastructure::logging::LogConfig;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "DEVNET_";

/// Tool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Log file name cannot be empty")]
    EmptyLogFileName,
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. Settings file, when one is given
    /// 3. Environment variables (`DEVNET_*`, `__` separates nested keys)
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Settings file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.to_lowercase().as_str()) {
            return Err(SettingsError::InvalidLogLevel(
                settings.logging.level.clone(),
            ));
        }

        if settings.logging.file_name.trim().is_empty() {
            return Err(SettingsError::EmptyLogFileName);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::{LogFormat, RotationPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.logging.log_dir.is_none());
        SettingsLoader::validate(&settings).expect("Default settings should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: json
  log_dir: /tmp/devnet-logs
  rotation: hourly
";
        let settings: Settings = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.rotation, RotationPolicy::Hourly);
        assert_eq!(settings.logging.file_name, "devnet-config.log");
        SettingsLoader::validate(&settings).expect("Parsed settings should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "chatty".to_string();
        match SettingsLoader::validate(&settings).unwrap_err() {
            SettingsError::InvalidLogLevel(level) => assert_eq!(level, "chatty"),
            SettingsError::EmptyLogFileName => panic!("Expected InvalidLogLevel error"),
        }
    }

    #[test]
    fn test_validate_empty_file_name() {
        let mut settings = Settings::default();
        settings.logging.file_name = "  ".to_string();
        assert!(matches!(
            SettingsLoader::validate(&settings),
            Err(SettingsError::EmptyLogFileName)
        ));
    }

    #[test]
    fn test_missing_settings_file() {
        let result = SettingsLoader::load(Some(Path::new("/no/such/settings.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_and_env_merging() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: info\n  format: json").unwrap();
        file.flush().unwrap();

        temp_env::with_vars([("DEVNET_LOGGING__LEVEL", Some("debug"))], || {
            let settings = SettingsLoader::load(Some(file.path())).unwrap();
            assert_eq!(settings.logging.level, "debug", "Environment should win");
            assert_eq!(
                settings.logging.format,
                LogFormat::Json,
                "File value should persist when not overridden"
            );
        });
    }

    #[test]
    fn test_env_invalid_level_rejected() {
        temp_env::with_vars([("DEVNET_LOGGING__LEVEL", Some("shouty"))], || {
            assert!(SettingsLoader::load(None).is_err());
        });
    }
}
