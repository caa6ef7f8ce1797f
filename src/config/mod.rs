//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::LEADERBOARD_SIZE;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Leaderboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Entries kept on each leaderboard, at most `LEADERBOARD_SIZE`
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

fn default_leaderboard_size() -> usize {
    LEADERBOARD_SIZE
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Currency code used for tournaments that carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analytics: AnalyticsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analytics.leaderboard_size == 0 {
            return Err(ConfigError::ValidationError(
                "Leaderboard size must be greater than 0".to_string(),
            ));
        }

        if self.analytics.leaderboard_size > LEADERBOARD_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "Leaderboard size must be at most {}, got {}",
                LEADERBOARD_SIZE, self.analytics.leaderboard_size
            )));
        }

        if let Some(code) = &self.report.default_currency {
            if code.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Default currency must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analytics.leaderboard_size, 10);
        assert!(config.report.default_currency.is_none());
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_leaderboard() {
        let mut config = AppConfig::default();
        config.analytics.leaderboard_size = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_leaderboard_over_cap() {
        let mut config = AppConfig::default();
        config.analytics.leaderboard_size = 25;
        assert!(config.validate().is_err());

        config.analytics.leaderboard_size = LEADERBOARD_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_rejects_oversized_leaderboard() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\nleaderboard_size = 25\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_blank_currency() {
        let mut config = AppConfig::default();
        config.report.default_currency = Some("  ".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/srv/poker"

            [report]
            default_currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/poker"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analytics.leaderboard_size, 10);
        assert_eq!(config.report.default_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\nleaderboard_size = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.analytics.leaderboard_size, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.analytics.leaderboard_size, parsed.analytics.leaderboard_size);
    }
}
